use rand::Rng;
use crate::match_engine::models::{Card, Face, Level};

/// Build a face-down deck for `level` and shuffle it with `rng`.
///
/// Each word contributes one [`Face::Word`] and one [`Face::Meaning`] card, so
/// the result always holds `2 * level.words.len()` cards.
pub fn build_deck<R: Rng>(level: &Level, rng: &mut R) -> Vec<Card> {
    let mut cards: Vec<Card> = level
        .words
        .iter()
        .flat_map(|w| [Card::new(w.id, Face::Word), Card::new(w.id, Face::Meaning)])
        .collect();

    shuffle(&mut cards, rng);
    cards
}

/// Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
