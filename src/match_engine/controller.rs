//! Session orchestration: level progression, error attribution, review level.
//!
//! The controller is the single owner of all mutable game state. Clicks go
//! straight to the active [`Board`]; the reveal, recovery and celebration
//! delays are queued on a virtual clock that the host drives with
//! [`GameController::advance`]. Each deck gets a fresh generation number, and
//! a timer whose generation no longer matches is dropped when it comes due.

use std::time::Duration;

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::match_engine::{
    board::{Board, ClickOutcome, Resolution},
    catalog::LevelCatalog,
    config::GameConfig,
    deck::build_deck,
    models::{CardId, CardView, Face, GameEvent, GamePhase, GameSnapshot, ALL_LEVELS_COMPLETED},
    review,
    timer::{ScheduledTask, TimerAction, TimerQueue},
};

pub struct GameController {
    config: GameConfig,
    catalog: LevelCatalog,
    rng: StdRng,
    level_index: usize,
    board: Board,
    generation: u64,
    phase: GamePhase,
    error_count: u32,
    error_log: Vec<u32>,
    review_created: bool,
    timers: TimerQueue,
}

impl GameController {
    /// Start a session on the first level of `catalog`.
    pub fn new(catalog: LevelCatalog, config: GameConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let mut controller = GameController {
            config,
            catalog,
            rng,
            level_index: 0,
            board: Board::new(Vec::new()),
            generation: 0,
            phase: GamePhase::Playing,
            error_count: 0,
            error_log: Vec::new(),
            review_created: false,
            timers: TimerQueue::new(),
        };
        controller.enter_level(0, &mut Vec::new());
        controller
    }

    // ── accessors ──

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn error_log(&self) -> &[u32] {
        &self.error_log
    }

    pub fn review_created(&self) -> bool {
        self.review_created
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Stamp carried by timers scheduled for the current deck.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time until the next queued timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    // ── input ──

    /// Handle a click on `card`. Ignored unless the phase is `Playing`.
    pub fn click(&mut self, card: CardId) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            trace!("click on {card} ignored in phase {}", self.phase);
            return Vec::new();
        }

        match self.board.click(card) {
            ClickOutcome::Ignored => Vec::new(),
            ClickOutcome::Selected { card } => vec![GameEvent::CardFlipped { card }],
            ClickOutcome::Matched { first, second } => {
                debug!("pair {first} / {second} matched");
                self.schedule(self.config.timings.reveal, TimerAction::Reveal);
                vec![GameEvent::CardFlipped { card: second }]
            }
            ClickOutcome::Mismatched { first, second } => {
                let (a, b) = (first.word_id(), second.word_id());
                self.error_count += 1;
                if a != b {
                    self.error_log.extend([a, b]);
                }
                debug!("pair {first} / {second} mismatched, {} errors", self.error_count);
                self.schedule(self.config.timings.recovery, TimerAction::Recover);
                vec![
                    GameEvent::CardFlipped { card: second },
                    GameEvent::PairMismatched { first: a, second: b, error_count: self.error_count },
                ]
            }
        }
    }

    /// Move the virtual clock forward and run every timer that comes due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let target = self.timers.now() + elapsed;
        let mut events = Vec::new();
        while let Some(task) = self.timers.pop_due(target) {
            self.fire(task, &mut events);
        }
        self.timers.settle(target);
        events
    }

    /// Run queued timers until none remain.
    pub fn run_until_idle(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(wait) = self.timers.next_deadline() {
            events.extend(self.advance(wait));
        }
        events
    }

    // ── lifecycle ──

    /// Back to the first level with a clean error record and no review level.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        info!("restarting session after {} errors", self.error_count);
        self.error_count = 0;
        self.error_log.clear();
        self.review_created = false;
        self.catalog.clear_review();
        let mut events = Vec::new();
        self.enter_level(0, &mut events);
        events
    }

    /// Reshuffle the current level. Errors already recorded are kept.
    pub fn retry_current_level(&mut self) -> Vec<GameEvent> {
        if self.phase == GamePhase::Complete {
            return Vec::new();
        }
        let mut events = Vec::new();
        self.enter_level(self.level_index, &mut events);
        events
    }

    /// Jump to `index`. Anything past the last level completes the game.
    pub fn select_level(&mut self, index: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.enter_level(index, &mut events);
        events
    }

    // ── output ──

    pub fn snapshot(&self) -> GameSnapshot {
        let level = self.catalog.get(self.level_index);
        let cards = self
            .board
            .cards()
            .iter()
            .map(|c| {
                let content = level
                    .and_then(|l| l.word(c.word_id))
                    .map(|w| match c.face {
                        Face::Word    => w.text.clone(),
                        Face::Meaning => w.meaning.clone(),
                    })
                    .unwrap_or_default();
                CardView {
                    id: c.id,
                    word_id: c.word_id,
                    face: c.face,
                    content,
                    flipped: c.flipped,
                    matched: c.matched,
                }
            })
            .collect();

        let total_levels = self.catalog.len();
        let progress = if total_levels == 0 {
            1.0
        } else {
            self.level_index as f64 / total_levels as f64
        };

        GameSnapshot {
            level_name: level.map_or_else(|| ALL_LEVELS_COMPLETED.to_string(), |l| l.name.clone()),
            level_index: self.level_index,
            total_levels,
            is_review_level: self.catalog.is_review_index(self.level_index),
            error_count: self.error_count,
            error_log: self.error_log.clone(),
            cards,
            phase: self.phase,
            progress,
            advisory_limit_reached: self
                .config
                .advisory_error_limit
                .is_some_and(|limit| self.error_count >= limit),
        }
    }

    // ── internals ──

    fn schedule(&mut self, delay: Duration, action: TimerAction) {
        let task = self.timers.schedule(delay, self.generation, action);
        debug!("scheduled {:?} at {:?} (generation {})", action, task.due, task.generation);
    }

    fn enter_level(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        self.generation += 1;
        self.level_index = index.min(self.catalog.len());

        match self.catalog.get(self.level_index) {
            Some(level) => {
                self.board = Board::new(build_deck(level, &mut self.rng));
                self.phase = GamePhase::Playing;
                info!("level {} '{}' started ({} words)", self.level_index, level.name, level.words.len());
                events.push(GameEvent::LevelStarted { level_index: self.level_index, name: level.name.clone() });
            }
            None => {
                self.board = Board::new(Vec::new());
                self.phase = GamePhase::Complete;
                info!("game complete with {} errors", self.error_count);
                events.push(GameEvent::GameComplete { error_count: self.error_count });
            }
        }
    }

    fn fire(&mut self, task: ScheduledTask, events: &mut Vec<GameEvent>) {
        if task.generation != self.generation {
            trace!("dropping stale {:?} (generation {} != {})", task.action, task.generation, self.generation);
            return;
        }

        match task.action {
            TimerAction::Reveal | TimerAction::Recover => match self.board.resolve() {
                Resolution::Nothing => {}
                Resolution::PairMatched { word_id } => events.push(GameEvent::PairMatched { word_id }),
                Resolution::CardsHidden { first, second } => {
                    events.push(GameEvent::CardsHidden { first, second })
                }
                Resolution::LevelDone { word_id } => {
                    events.push(GameEvent::PairMatched { word_id });
                    events.push(GameEvent::LevelCleared { level_index: self.level_index });
                    self.phase = GamePhase::LevelCelebrating;
                    info!("level {} cleared", self.level_index);
                    self.schedule(self.config.timings.celebration, TimerAction::Celebrate);
                }
            },
            TimerAction::Celebrate => self.leave_level(events),
        }
    }

    fn leave_level(&mut self, events: &mut Vec<GameEvent>) {
        let next = self.level_index + 1;
        if next < self.catalog.len() {
            self.enter_level(next, events);
            return;
        }

        if self.error_log.is_empty() || self.review_created {
            self.enter_level(next, events);
            return;
        }

        let level = review::synthesize(&self.error_log, &self.catalog.all_words(), self.config.review_size);
        if level.words.is_empty() {
            warn!("review size {} yields no words, finishing instead", self.config.review_size);
            self.enter_level(next, events);
            return;
        }
        let word_ids: Vec<u32> = level.words.iter().map(|w| w.id).collect();
        match self.catalog.append_review(level) {
            Ok(index) => {
                self.review_created = true;
                info!("review level created with words {word_ids:?}");
                events.push(GameEvent::ReviewLevelCreated { word_ids });
                self.enter_level(index, events);
            }
            Err(e) => {
                warn!("could not add review level: {e}");
                self.enter_level(self.catalog.len(), events);
            }
        }
    }
}
