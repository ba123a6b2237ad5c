//! Core matching engine — deck building, per-deck state machine, and session flow.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: words, levels, cards, snapshot, events |
//! | `deck`       | Two cards per word, Fisher-Yates shuffle with an injected RNG |
//! | `board`      | Per-deck selection state machine (`Idle → OneSelected → Resolving`) |
//! | `review`     | Review-level synthesis from the error log |
//! | `catalog`    | Immutable level list plus the single review slot |
//! | `timer`      | Virtual-clock queue of generation-stamped deferred actions |
//! | `config`     | Timings and review/advisory settings, loadable from TOML |
//! | `error`      | Catalog and config loading errors |
//! | `controller` | `GameController` — the only owner of session state |

pub mod board;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod deck;
pub mod error;
pub mod models;
pub mod review;
pub mod timer;

// Re-export the public API surface so callers can use
// `match_engine::GameController` without reaching into sub-modules.
pub use board::{Board, ClickOutcome, Resolution, Selection};
pub use catalog::LevelCatalog;
pub use config::{GameConfig, Timings};
pub use controller::GameController;
pub use deck::build_deck;
pub use error::{CatalogError, ConfigError};
pub use models::{
    Card, CardId, CardView, Face, GameEvent, GamePhase, GameSnapshot, Level, Word,
    ALL_LEVELS_COMPLETED,
};
pub use review::{synthesize, REVIEW_LEVEL_NAME};
