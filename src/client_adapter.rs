use serde_json::{json, Value};
use crate::match_engine::models::{CardView, Face, GamePhase, GameSnapshot};

/// CSS class list for one card tile, e.g. `"card word selected"`.
fn card_class(card: &CardView) -> String {
    let mut class = String::from("card");
    if card.matched {
        class.push_str(" matched");
    }
    class.push_str(match card.face {
        Face::Word    => " word",
        Face::Meaning => " meaning",
    });
    if card.flipped {
        class.push_str(" selected");
    }
    class
}

/// Theme class for the game container: `level-review` or `level-<index>`.
fn container_class(snapshot: &GameSnapshot) -> String {
    if snapshot.is_review_level {
        "level-review".to_string()
    } else {
        format!("level-{}", snapshot.level_index)
    }
}

/// Which top-level view the client should show.
fn screen(snapshot: &GameSnapshot) -> &'static str {
    match snapshot.phase {
        GamePhase::Complete         => "complete",
        GamePhase::LevelCelebrating => "celebrating",
        GamePhase::Playing          => "board",
    }
}

fn card_entry(card: &CardView) -> Value {
    json!({
        "id": card.id.0,
        "word_id": card.word_id,
        "type": card.face,
        "content": card.content,
        "is_flipped": card.flipped,
        "is_matched": card.matched,
        "class": card_class(card)
    })
}

/// Map a [`GameSnapshot`] to the JSON state object consumed by the web client.
///
/// Card ids are emitted as plain integers; the client sends them back
/// unchanged as `CardId(n)`.
pub fn to_client_state(snapshot: &GameSnapshot) -> Value {
    let cards: Vec<Value> = snapshot.cards.iter().map(card_entry).collect();

    json!({
        "screen": screen(snapshot),
        "container_class": container_class(snapshot),
        "header": {
            "level": snapshot.level_name,
            "errors": snapshot.error_count
        },
        "progress_percent": snapshot.progress * 100.0,
        "show_confetti": snapshot.phase == GamePhase::LevelCelebrating,
        "advisory_game_over": snapshot.advisory_limit_reached,
        "cards": cards,
        "summary": {
            "error_count": snapshot.error_count,
            "missed_words": snapshot.error_log.len()
        }
    })
}
