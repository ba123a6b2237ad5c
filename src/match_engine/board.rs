//! Per-deck matching state machine.
//!
//! ```text
//!   Idle ──click──▶ OneSelected ──click──▶ Resolving ──resolve──▶ Idle
//!                                                      └─resolve──▶ LevelDone
//! ```
//!
//! A second click flips its card immediately and locks the board in
//! `Resolving`. The caller decides when to call [`Board::resolve`] (after the
//! reveal or recovery delay); until then every click is ignored.

use log::trace;
use crate::match_engine::models::{Card, CardId};

/// Selection state of one deck instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    OneSelected { first: CardId },
    Resolving { first: CardId, second: CardId, matched: bool },
    /// Every card matched. Terminal for this deck.
    LevelDone,
}

/// What a click did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Unknown card, card already flipped/matched, or board locked.
    Ignored,
    /// First card of a pair is now face up.
    Selected { card: CardId },
    /// Second card pairs with the first; awaiting [`Board::resolve`].
    Matched { first: CardId, second: CardId },
    /// Second card does not pair with the first; awaiting [`Board::resolve`].
    Mismatched { first: CardId, second: CardId },
}

/// Result of settling a `Resolving` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Board was not resolving.
    Nothing,
    PairMatched { word_id: u32 },
    /// The last pair matched. Reported once per deck.
    LevelDone { word_id: u32 },
    CardsHidden { first: CardId, second: CardId },
}

#[derive(Debug, Clone)]
pub struct Board {
    cards: Vec<Card>,
    selection: Selection,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Self {
        Board { cards, selection: Selection::Idle }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// True while a pair is in flight.
    pub fn is_locked(&self) -> bool {
        matches!(self.selection, Selection::Resolving { .. })
    }

    pub fn is_done(&self) -> bool {
        self.selection == Selection::LevelDone
    }

    /// The face-up card waiting for its partner, if any.
    pub fn pending(&self) -> Option<CardId> {
        match self.selection {
            Selection::OneSelected { first } => Some(first),
            _ => None,
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn click(&mut self, id: CardId) -> ClickOutcome {
        match self.selection {
            Selection::Resolving { .. } | Selection::LevelDone => {
                trace!("click on {id} ignored: board locked");
                return ClickOutcome::Ignored;
            }
            Selection::Idle | Selection::OneSelected { .. } => {}
        }

        let card = match self.card_mut(id) {
            Some(c) if c.is_selectable() => c,
            Some(_) => {
                trace!("click on {id} ignored: card already face up");
                return ClickOutcome::Ignored;
            }
            None => {
                trace!("click on {id} ignored: not in this deck");
                return ClickOutcome::Ignored;
            }
        };
        card.flipped = true;
        let clicked = *card;

        let first = match self.selection {
            Selection::OneSelected { first } => first,
            _ => {
                self.selection = Selection::OneSelected { first: id };
                return ClickOutcome::Selected { card: id };
            }
        };

        // A OneSelected card is always present in the deck.
        let matched = self.card(first).is_some_and(|f| f.pairs_with(&clicked));
        self.selection = Selection::Resolving { first, second: id, matched };
        if matched {
            ClickOutcome::Matched { first, second: id }
        } else {
            ClickOutcome::Mismatched { first, second: id }
        }
    }

    /// Settle the pair in flight: mark a match, or turn a mismatch face down.
    pub fn resolve(&mut self) -> Resolution {
        let (first, second, matched) = match self.selection {
            Selection::Resolving { first, second, matched } => (first, second, matched),
            _ => return Resolution::Nothing,
        };

        for id in [first, second] {
            if let Some(card) = self.card_mut(id) {
                if matched {
                    card.matched = true;
                } else {
                    card.flipped = false;
                }
            }
        }

        if !matched {
            self.selection = Selection::Idle;
            return Resolution::CardsHidden { first, second };
        }

        let word_id = first.word_id();
        if self.cards.iter().all(|c| c.matched) {
            self.selection = Selection::LevelDone;
            Resolution::LevelDone { word_id }
        } else {
            self.selection = Selection::Idle;
            Resolution::PairMatched { word_id }
        }
    }
}
