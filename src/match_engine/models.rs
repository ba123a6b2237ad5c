use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// One vocabulary entry. `id` is unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: u32,
    #[serde(alias = "word")]
    pub text: String,
    pub meaning: String,
}

impl Word {
    pub fn new(id: u32, text: impl Into<String>, meaning: impl Into<String>) -> Self {
        Word { id, text: text.into(), meaning: meaning.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub words: Vec<Word>,
}

impl Level {
    pub fn new(name: impl Into<String>, words: Vec<Word>) -> Self {
        Level { name: name.into(), words }
    }

    pub fn word(&self, id: u32) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Word,
    Meaning,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Word    => write!(f, "word"),
            Face::Meaning => write!(f, "meaning"),
        }
    }
}

/// Card identifier packing `(word_id, face)`: `word_id << 1 | face_bit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

impl CardId {
    pub fn new(word_id: u32, face: Face) -> Self {
        let bit = match face {
            Face::Word    => 0,
            Face::Meaning => 1,
        };
        CardId((u64::from(word_id) << 1) | bit)
    }

    pub fn word_id(self) -> u32 {
        (self.0 >> 1) as u32
    }

    pub fn face(self) -> Face {
        if self.0 & 1 == 0 { Face::Word } else { Face::Meaning }
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.word_id(), self.face())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub word_id: u32,
    pub face: Face,
    pub flipped: bool,
    pub matched: bool,
}

impl Card {
    /// A face-down, unmatched card.
    pub fn new(word_id: u32, face: Face) -> Self {
        Card { id: CardId::new(word_id, face), word_id, face, flipped: false, matched: false }
    }

    /// Whether a click on this card may change anything.
    pub fn is_selectable(&self) -> bool {
        !self.flipped && !self.matched
    }

    /// Two cards form a pair iff they share a word and show different faces.
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.word_id == other.word_id && self.face != other.face
    }
}

// ---------------------------------------------------------------------------
// Session state exposed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Clicks are accepted.
    Playing,
    /// The current deck is fully matched; waiting out the celebration pause.
    LevelCelebrating,
    /// Every level (review included, if any) is done.
    Complete,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Playing          => write!(f, "Playing"),
            GamePhase::LevelCelebrating => write!(f, "Level Celebrating"),
            GamePhase::Complete         => write!(f, "Complete"),
        }
    }
}

/// Render-ready view of one card, face text included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub word_id: u32,
    pub face: Face,
    pub content: String,
    pub flipped: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Active level name, or [`ALL_LEVELS_COMPLETED`] once past the catalog.
    pub level_name: String,
    pub level_index: usize,
    pub total_levels: usize,
    pub is_review_level: bool,
    pub error_count: u32,
    pub error_log: Vec<u32>,
    pub cards: Vec<CardView>,
    pub phase: GamePhase,
    /// `level_index / total_levels`, in `0.0..=1.0`.
    pub progress: f64,
    /// Advisory only; play continues regardless.
    pub advisory_limit_reached: bool,
}

/// Level-name sentinel shown once every level has been played.
pub const ALL_LEVELS_COMPLETED: &str = "All levels completed";

/// Events reported to the caller of [`crate::GameController`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CardFlipped { card: CardId },
    PairMatched { word_id: u32 },
    PairMismatched { first: u32, second: u32, error_count: u32 },
    CardsHidden { first: CardId, second: CardId },
    LevelCleared { level_index: usize },
    LevelStarted { level_index: usize, name: String },
    ReviewLevelCreated { word_ids: Vec<u32> },
    GameComplete { error_count: u32 },
}
