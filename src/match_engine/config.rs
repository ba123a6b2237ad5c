//! Game configuration.
//!
//! Everything has a default, so an empty TOML document (or `GameConfig::default()`)
//! yields the standard game: 500 ms reveal, 700 ms recovery, 2 s celebration,
//! six-word review level, advisory limit of 5 errors, entropy-seeded shuffles.
//!
//! ```toml
//! rng_seed = 42
//!
//! [timings]
//! reveal_ms = 500
//! recovery_ms = 700
//! celebration_ms = 2000
//!
//! [review]
//! size = 6
//!
//! [general]
//! advisory_error_limit = 5   # 0 disables the advisory
//! ```

use std::time::Duration;
use serde::Deserialize;

use crate::match_engine::error::ConfigError;
use crate::match_engine::review::DEFAULT_REVIEW_SIZE;

// ── Public config structs ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub timings: Timings,
    /// Maximum words in the synthesized review level.
    pub review_size: usize,
    /// Error count at which the snapshot flags `advisory_limit_reached`.
    pub advisory_error_limit: Option<u32>,
    /// Seed for deck shuffles; `None` draws from entropy.
    pub rng_seed: Option<u64>,
}

/// Delays between a click and its deferred effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Matched pair stays face up this long before it is marked matched.
    pub reveal: Duration,
    /// Mismatched pair stays face up this long before turning back.
    pub recovery: Duration,
    /// Pause after the last pair of a level.
    pub celebration: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            reveal: Duration::from_millis(default_reveal()),
            recovery: Duration::from_millis(default_recovery()),
            celebration: Duration::from_millis(default_celebration()),
        }
    }
}

impl Timings {
    /// All delays zero. Deferred effects fire on the next `advance`.
    pub fn immediate() -> Self {
        Timings { reveal: Duration::ZERO, recovery: Duration::ZERO, celebration: Duration::ZERO }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            timings: Timings::default(),
            review_size: DEFAULT_REVIEW_SIZE,
            advisory_error_limit: default_advisory_limit(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        GameConfig { rng_seed: Some(seed), ..GameConfig::default() }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: TomlConfig = toml::from_str(text)?;
        if raw.review.size == 0 {
            return Err(ConfigError::ZeroReviewSize);
        }
        Ok(GameConfig {
            timings: Timings {
                reveal: Duration::from_millis(raw.timings.reveal_ms),
                recovery: Duration::from_millis(raw.timings.recovery_ms),
                celebration: Duration::from_millis(raw.timings.celebration_ms),
            },
            review_size: raw.review.size,
            advisory_error_limit: raw.general.advisory_error_limit.filter(|&n| n > 0),
            rng_seed: raw.rng_seed,
        })
    }
}

// ── TOML schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    rng_seed: Option<u64>,
    #[serde(default)]
    timings: TomlTimings,
    #[serde(default)]
    review: TomlReview,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlTimings {
    #[serde(default = "default_reveal")]
    reveal_ms: u64,
    #[serde(default = "default_recovery")]
    recovery_ms: u64,
    #[serde(default = "default_celebration")]
    celebration_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlReview {
    #[serde(default = "default_review_size")]
    size: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_advisory_limit")]
    advisory_error_limit: Option<u32>,
}

// ── Defaults ──

fn default_reveal() -> u64 { 500 }
fn default_recovery() -> u64 { 700 }
fn default_celebration() -> u64 { 2000 }
fn default_review_size() -> usize { DEFAULT_REVIEW_SIZE }
fn default_advisory_limit() -> Option<u32> { Some(5) }

impl Default for TomlTimings {
    fn default() -> Self {
        TomlTimings {
            reveal_ms: default_reveal(),
            recovery_ms: default_recovery(),
            celebration_ms: default_celebration(),
        }
    }
}

impl Default for TomlReview {
    fn default() -> Self {
        TomlReview { size: default_review_size() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { advisory_error_limit: default_advisory_limit() }
    }
}
