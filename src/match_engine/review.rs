//! Builds the remedial review level from the words a player got wrong.

use std::collections::HashSet;
use crate::match_engine::models::{Level, Word};

/// Name given to the synthesized level. Catalog levels may not use it.
pub const REVIEW_LEVEL_NAME: &str = "Review Level";

/// Default number of words in a review level.
pub const DEFAULT_REVIEW_SIZE: usize = 6;

/// Deduplicate `error_log`, keeping first-seen order.
pub fn distinct_errors(error_log: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::new();
    error_log.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Build a review level of at most `size` distinct words.
///
/// Words from the error log come first, in catalog (`all_words`) order. The
/// remaining slots are padded with words outside the error set, also in
/// catalog order, until `size` is reached or the pool runs out.
pub fn synthesize(error_log: &[u32], all_words: &[Word], size: usize) -> Level {
    let errors: HashSet<u32> = distinct_errors(error_log).into_iter().collect();
    let mut picked: Vec<Word> = Vec::with_capacity(size);
    let mut taken: HashSet<u32> = HashSet::new();

    let missed = all_words.iter().filter(|w| errors.contains(&w.id));
    let filler = all_words.iter().filter(|w| !errors.contains(&w.id));
    for word in missed.chain(filler) {
        if picked.len() >= size {
            break;
        }
        if taken.insert(word.id) {
            picked.push(word.clone());
        }
    }

    Level::new(REVIEW_LEVEL_NAME, picked)
}
