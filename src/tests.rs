//! Session-level tests for the `word_match` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Deck | Every level deals each (word, face) once; seeds are reproducible |
//! | Matching | Match/mismatch effects, error attribution, ignored clicks |
//! | Progression | Level advance, single level-cleared event, completion |
//! | Review | Synthesis rules, once-per-session creation, review-level errors |
//! | Lifecycle | `restart` and `retry_current_level` |
//! | Snapshot | Level name sentinel, progress, advisory limit, JSON view |

use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::match_engine::{
    build_deck, synthesize, CardId, Face, GameConfig, GameController, GameEvent, GamePhase,
    Level, LevelCatalog, Word, ALL_LEVELS_COMPLETED, REVIEW_LEVEL_NAME,
};
use crate::to_client_state;

// ── helpers ──────────────────────────────────────────────────────────────────

const REVEAL: Duration = Duration::from_millis(500);
const RECOVERY: Duration = Duration::from_millis(700);
const CELEBRATION: Duration = Duration::from_millis(2000);

fn word_card(id: u32) -> CardId { CardId::new(id, Face::Word) }
fn meaning_card(id: u32) -> CardId { CardId::new(id, Face::Meaning) }

/// Catalog whose level `i` holds the word ids in `levels[i]`.
fn catalog(levels: &[&[u32]]) -> LevelCatalog {
    LevelCatalog::new(
        levels
            .iter()
            .enumerate()
            .map(|(i, ids)| {
                Level::new(
                    format!("Level {}", i + 1),
                    ids.iter().map(|&id| Word::new(id, format!("word{id}"), format!("meaning{id}"))).collect(),
                )
            })
            .collect(),
    )
    .unwrap()
}

fn game(levels: &[&[u32]]) -> GameController {
    GameController::new(catalog(levels), GameConfig::with_seed(2024))
}

/// Match every pair of the current level and wait out each delay.
fn clear_level(g: &mut GameController) -> Vec<GameEvent> {
    let ids: Vec<u32> = g.catalog().get(g.level_index()).unwrap().words.iter().map(|w| w.id).collect();
    let mut events = Vec::new();
    for id in ids {
        g.click(word_card(id));
        g.click(meaning_card(id));
        events.extend(g.advance(REVEAL));
    }
    events.extend(g.advance(CELEBRATION));
    events
}

/// Click a wrong pair and wait for it to turn back.
fn miss(g: &mut GameController, a: CardId, b: CardId) {
    g.click(a);
    g.click(b);
    g.advance(RECOVERY);
}

// ── deck ─────────────────────────────────────────────────────────────────────

#[test]
fn every_builtin_level_deals_each_word_face_once() {
    let cat = LevelCatalog::builtin();
    for seed in [1u64, 42, 999, 0xDEAD_BEEF, 7] {
        let mut rng = StdRng::seed_from_u64(seed);
        for i in 0..cat.len() {
            let level = cat.get(i).unwrap();
            let deck = build_deck(level, &mut rng);
            assert_eq!(deck.len(), 2 * level.words.len());
            let pairs: HashSet<(u32, Face)> = deck.iter().map(|c| (c.word_id, c.face)).collect();
            assert_eq!(pairs.len(), deck.len(), "duplicate card in '{}' seed={seed}", level.name);
            for w in &level.words {
                assert!(pairs.contains(&(w.id, Face::Word)));
                assert!(pairs.contains(&(w.id, Face::Meaning)));
            }
        }
    }
}

#[test]
fn same_seed_deals_same_order() {
    let order = |seed: u64| -> Vec<CardId> {
        let g = GameController::new(LevelCatalog::builtin(), GameConfig::with_seed(seed));
        g.board().cards().iter().map(|c| c.id).collect()
    };
    assert_eq!(order(5), order(5));
    assert_ne!(order(5), order(6));
}

#[test]
fn entropy_seed_produces_a_playable_deck() {
    let g = GameController::new(LevelCatalog::builtin(), GameConfig::default());
    assert_eq!(g.board().cards().len(), 12);
    assert_eq!(g.phase(), GamePhase::Playing);
}

// ── matching ─────────────────────────────────────────────────────────────────

#[test]
fn single_word_level_matches_and_finishes() {
    let cat = LevelCatalog::new(vec![Level::new("Fruit", vec![Word::new(1, "apple", "苹果")])]).unwrap();
    let mut g = GameController::new(cat, GameConfig::with_seed(1));

    g.click(word_card(1));
    g.click(meaning_card(1));
    assert!(g.board().is_locked());
    assert!(g.board().cards().iter().all(|c| c.flipped && !c.matched));

    let events = g.advance(REVEAL);
    assert!(g.board().cards().iter().all(|c| c.matched));
    assert!(g.board().is_done());
    assert_eq!(g.phase(), GamePhase::LevelCelebrating);
    assert_eq!(
        events,
        vec![GameEvent::PairMatched { word_id: 1 }, GameEvent::LevelCleared { level_index: 0 }]
    );
}

#[test]
fn reveal_does_not_fire_early() {
    let mut g = game(&[&[1, 2]]);
    g.click(word_card(1));
    g.click(meaning_card(1));
    assert!(g.advance(REVEAL - Duration::from_millis(1)).is_empty());
    assert!(g.board().cards().iter().all(|c| !c.matched));
    assert_eq!(g.advance(Duration::from_millis(1)), vec![GameEvent::PairMatched { word_id: 1 }]);
}

#[test]
fn match_touches_only_its_own_pair() {
    let mut g = game(&[&[1, 2, 3]]);
    let before: Vec<_> = g.board().cards().iter().filter(|c| c.word_id != 2).copied().collect();

    g.click(meaning_card(2));
    g.click(word_card(2));
    g.advance(REVEAL);

    let after: Vec<_> = g.board().cards().iter().filter(|c| c.word_id != 2).copied().collect();
    assert_eq!(before, after);
    assert!(g.board().cards().iter().filter(|c| c.word_id == 2).all(|c| c.matched));
    assert_eq!(g.error_count(), 0);
}

#[test]
fn mismatch_counts_one_error_and_logs_both_words() {
    let mut g = game(&[&[1, 2]]);
    g.click(word_card(1));
    let events = g.click(meaning_card(2));
    assert_eq!(g.error_count(), 1, "error counted at comparison time");
    assert_eq!(g.error_log(), &[1, 2]);
    assert!(events.contains(&GameEvent::PairMismatched { first: 1, second: 2, error_count: 1 }));

    g.advance(RECOVERY);
    for id in [word_card(1), meaning_card(2)] {
        let card = g.board().card(id).unwrap();
        assert!(!card.flipped && !card.matched);
    }
    assert_eq!(g.error_count(), 1);
    assert_eq!(g.phase(), GamePhase::Playing);
}

#[test]
fn two_words_of_same_face_are_a_mismatch() {
    let mut g = game(&[&[1, 2]]);
    miss(&mut g, meaning_card(1), meaning_card(2));
    assert_eq!(g.error_count(), 1);
    assert_eq!(g.error_log(), &[1, 2]);
}

#[test]
fn clicks_during_resolution_are_dropped_not_queued() {
    let mut g = game(&[&[1, 2]]);
    g.click(word_card(1));
    g.click(meaning_card(2));
    assert!(g.click(word_card(2)).is_empty());
    assert!(g.click(meaning_card(1)).is_empty());
    g.advance(RECOVERY);
    assert!(g.board().cards().iter().all(|c| !c.flipped));
    assert_eq!(g.board().pending(), None);
    assert_eq!(g.error_count(), 1);
}

#[test]
fn reclicking_flipped_or_matched_cards_is_a_no_op() {
    let mut g = game(&[&[1, 2]]);
    g.click(word_card(1));
    assert!(g.click(word_card(1)).is_empty());
    g.click(meaning_card(1));
    g.advance(REVEAL);
    assert!(g.click(word_card(1)).is_empty());
    assert!(g.click(meaning_card(1)).is_empty());
    assert_eq!(g.board().pending(), None);
    assert_eq!(g.error_count(), 0);
}

#[test]
fn errors_are_never_fatal() {
    let mut g = game(&[&[1, 2]]);
    for _ in 0..20 {
        miss(&mut g, word_card(1), word_card(2));
    }
    assert_eq!(g.error_count(), 20);
    assert_eq!(g.phase(), GamePhase::Playing);
    assert!(g.snapshot().advisory_limit_reached);
    clear_level(&mut g);
    assert_ne!(g.level_index(), 0);
}

// ── progression ──────────────────────────────────────────────────────────────

#[test]
fn level_cleared_is_reported_once_per_deck() {
    let mut g = game(&[&[1, 2], &[3]]);
    let events = clear_level(&mut g);
    let cleared = events.iter().filter(|e| matches!(e, GameEvent::LevelCleared { .. })).count();
    assert_eq!(cleared, 1);
    assert_eq!(g.level_index(), 1);
    assert_eq!(g.board().cards().len(), 2);
}

#[test]
fn clean_run_completes_without_review() {
    let mut g = game(&[&[1, 2], &[3, 4]]);
    clear_level(&mut g);
    let events = clear_level(&mut g);
    assert_eq!(g.phase(), GamePhase::Complete);
    assert!(!g.review_created());
    assert_eq!(g.catalog().len(), 2);
    assert_eq!(events.last(), Some(&GameEvent::GameComplete { error_count: 0 }));
}

#[test]
fn builtin_catalog_plays_through() {
    let mut g = GameController::new(LevelCatalog::builtin(), GameConfig::with_seed(3));
    for _ in 0..5 {
        clear_level(&mut g);
    }
    assert_eq!(g.phase(), GamePhase::Complete);
    assert_eq!(g.snapshot().progress, 1.0);
}

// ── review ───────────────────────────────────────────────────────────────────

#[test]
fn review_from_repeated_errors_pads_in_catalog_order() {
    let words: Vec<Word> = (1..=10).map(|i| Word::new(i, format!("w{i}"), format!("m{i}"))).collect();
    let level = synthesize(&[1, 1, 2], &words, 6);
    let ids: Vec<u32> = level.words.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(level.name, REVIEW_LEVEL_NAME);
}

#[test]
fn errors_create_one_review_level_after_the_last_level() {
    let mut g = game(&[&[1, 2, 3], &[4, 5, 6], &[7, 8]]);
    miss(&mut g, word_card(1), meaning_card(3));
    clear_level(&mut g);
    clear_level(&mut g);
    miss(&mut g, word_card(8), meaning_card(7));
    let events = clear_level(&mut g);

    assert!(g.review_created());
    assert_eq!(g.catalog().len(), 4);
    assert_eq!(g.level_index(), 3);
    assert!(events.contains(&GameEvent::ReviewLevelCreated { word_ids: vec![1, 3, 7, 8, 2, 4] }));

    let snap = g.snapshot();
    assert_eq!(snap.level_name, REVIEW_LEVEL_NAME);
    assert!(snap.is_review_level);
    assert_eq!(snap.cards.len(), 12);
    assert_eq!(snap.progress, 0.75);
}

#[test]
fn review_level_errors_are_logged_but_no_second_review() {
    let mut g = game(&[&[1, 2]]);
    miss(&mut g, word_card(1), meaning_card(2));
    clear_level(&mut g);
    assert_eq!(g.level_index(), 1, "entered review level");

    miss(&mut g, word_card(2), meaning_card(1));
    assert_eq!(g.error_log(), &[1, 2, 2, 1]);
    assert_eq!(g.error_count(), 2);

    clear_level(&mut g);
    assert_eq!(g.phase(), GamePhase::Complete);
    assert_eq!(g.catalog().len(), 2);
    assert_eq!(g.snapshot().level_name, ALL_LEVELS_COMPLETED);
}

#[test]
fn review_size_comes_from_config() {
    let cfg = GameConfig { review_size: 2, ..GameConfig::with_seed(8) };
    let mut g = GameController::new(catalog(&[&[1, 2, 3, 4]]), cfg);
    miss(&mut g, word_card(4), word_card(3));
    clear_level(&mut g);
    let ids: Vec<u32> = g.catalog().get(1).unwrap().words.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![3, 4]);
}

// ── lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn restart_clears_errors_and_review_level() {
    let mut g = game(&[&[1, 2], &[3]]);
    miss(&mut g, word_card(1), word_card(2));
    clear_level(&mut g);
    clear_level(&mut g);
    assert!(g.review_created());
    assert_eq!(g.catalog().len(), 3);

    g.restart();
    assert_eq!(g.level_index(), 0);
    assert_eq!(g.error_count(), 0);
    assert!(g.error_log().is_empty());
    assert!(!g.review_created());
    assert_eq!(g.catalog().len(), 2);
    assert_eq!(g.phase(), GamePhase::Playing);
    assert!(g.board().cards().iter().all(|c| !c.flipped && !c.matched));
}

#[test]
fn restart_from_complete_allows_a_new_review() {
    let mut g = game(&[&[1, 2]]);
    clear_level(&mut g);
    assert_eq!(g.phase(), GamePhase::Complete);

    g.restart();
    miss(&mut g, word_card(1), word_card(2));
    clear_level(&mut g);
    assert!(g.review_created());
    assert_eq!(g.catalog().len(), 2);
}

#[test]
fn retry_reshuffles_and_keeps_errors() {
    let mut g = game(&[&[1, 2, 3, 4, 5, 6]]);
    miss(&mut g, word_card(1), word_card(2));
    g.click(word_card(3));
    g.click(meaning_card(3));
    g.advance(REVEAL);

    let before: Vec<CardId> = g.board().cards().iter().map(|c| c.id).collect();
    g.retry_current_level();
    let after: Vec<CardId> = g.board().cards().iter().map(|c| c.id).collect();

    assert_ne!(before, after, "retry deals a fresh shuffle");
    assert!(g.board().cards().iter().all(|c| !c.flipped && !c.matched));
    assert_eq!(g.board().pending(), None);
    assert_eq!(g.error_count(), 1);
    assert_eq!(g.error_log(), &[1, 2]);
    assert_eq!(g.level_index(), 0);
}

#[test]
fn retry_mid_resolution_cancels_pending_recovery() {
    let mut g = game(&[&[1, 2]]);
    g.click(word_card(1));
    g.click(word_card(2));
    g.retry_current_level();
    assert!(!g.board().is_locked());

    g.click(meaning_card(1));
    assert!(g.advance(RECOVERY).is_empty(), "stale recovery must not touch the new deck");
    assert!(g.board().card(meaning_card(1)).unwrap().flipped);
    assert_eq!(g.board().pending(), Some(meaning_card(1)));
}

#[test]
fn retry_during_celebration_replays_the_level() {
    let mut g = game(&[&[1], &[2]]);
    g.click(word_card(1));
    g.click(meaning_card(1));
    g.advance(REVEAL);
    assert_eq!(g.phase(), GamePhase::LevelCelebrating);

    g.retry_current_level();
    g.advance(CELEBRATION);
    assert_eq!(g.level_index(), 0, "stale celebration must not advance");
    assert_eq!(g.phase(), GamePhase::Playing);
}

// ── snapshot ─────────────────────────────────────────────────────────────────

#[test]
fn snapshot_reports_faces_and_progress() {
    let g = GameController::new(LevelCatalog::builtin(), GameConfig::with_seed(9));
    let snap = g.snapshot();
    assert_eq!(snap.level_name, "Beginner");
    assert_eq!(snap.total_levels, 5);
    assert_eq!(snap.progress, 0.0);
    assert!(!snap.advisory_limit_reached);
    let apple = snap.cards.iter().find(|c| c.id == word_card(1)).unwrap();
    assert_eq!(apple.content, "apple");
    let meaning = snap.cards.iter().find(|c| c.id == meaning_card(1)).unwrap();
    assert_eq!(meaning.content, "苹果");
}

#[test]
fn advisory_limit_can_be_disabled() {
    let cfg = GameConfig { advisory_error_limit: None, ..GameConfig::with_seed(1) };
    let mut g = GameController::new(catalog(&[&[1, 2]]), cfg);
    for _ in 0..10 {
        miss(&mut g, word_card(1), word_card(2));
    }
    assert!(!g.snapshot().advisory_limit_reached);
}

#[test]
fn client_state_reflects_a_live_game() {
    let mut g = GameController::new(LevelCatalog::builtin(), GameConfig::with_seed(4));
    g.click(word_card(1));
    let v = to_client_state(&g.snapshot());
    assert_eq!(v["screen"], "board");
    assert_eq!(v["header"]["level"], "Beginner");
    let cards = v["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 12);
    let selected = cards.iter().filter(|c| c["is_flipped"] == true).count();
    assert_eq!(selected, 1);
}
