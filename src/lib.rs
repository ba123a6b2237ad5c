//! # word_match
//!
//! The state machine behind a word ↔ meaning card-matching game.
//!
//! A player turns over cards two at a time, trying to pair each word with its
//! meaning. Levels are played in order; every wrong pair is counted and the
//! words involved are logged. Once the regular levels are done, the logged
//! words are replayed as a single review level.
//!
//! ## How it works
//!
//! 1. Build a [`LevelCatalog`] — [`LevelCatalog::builtin`], from JSON, or from
//!    your own `Vec<Level>`.
//! 2. Create a [`GameController`] with a [`GameConfig`] (timings, review size,
//!    optional RNG seed).
//! 3. Feed it clicks with [`GameController::click`] and drive its timers with
//!    [`GameController::advance`]. Both return [`GameEvent`]s for animation.
//! 4. Render from [`GameController::snapshot`], or hand the snapshot to
//!    [`to_client_state`] for a ready-made JSON view.
//!
//! Nothing here draws, plays sound, or persists; those belong to the host.
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::Duration;
//! use word_match::{CardId, Face, GameConfig, GameController, GamePhase, Level, LevelCatalog, Word};
//!
//! let catalog = LevelCatalog::new(vec![
//!     Level::new("Fruit", vec![Word::new(1, "apple", "苹果")]),
//! ])
//! .unwrap();
//! let mut game = GameController::new(catalog, GameConfig::with_seed(42));
//!
//! game.click(CardId::new(1, Face::Word));
//! game.click(CardId::new(1, Face::Meaning));
//! game.advance(Duration::from_millis(500));   // reveal delay
//! assert_eq!(game.phase(), GamePhase::LevelCelebrating);
//!
//! game.advance(Duration::from_secs(2));       // celebration pause
//! assert_eq!(game.phase(), GamePhase::Complete);
//! println!("{}", game.snapshot().level_name);
//! ```

pub mod client_adapter;
pub mod match_engine;

// Convenience re-exports so callers can use `word_match::GameController`
// directly without reaching into `match_engine::`.
pub use client_adapter::to_client_state;
pub use match_engine::{
    CardId, CardView, CatalogError, ConfigError, Face, GameConfig, GameController, GameEvent,
    GamePhase, GameSnapshot, Level, LevelCatalog, Timings, Word, ALL_LEVELS_COMPLETED,
    REVIEW_LEVEL_NAME,
};

#[cfg(test)]
mod tests;
