//! Scripted play-through of the built-in catalog.
//!
//! Run with: `cargo run --example demo`
//! (set `RUST_LOG=debug` to watch the engine's own log lines)
//!
//! A simulated player clears every level, fumbling the first pair of each
//! level once so the error log fills up. After the fifth level the engine
//! builds the review level from those mistakes, the player clears it, and
//! the final snapshot is printed both as a summary and as client JSON.
//!
//! ## Key concepts demonstrated
//!
//! - `GameConfig::with_seed(u64)` makes every shuffle reproducible.
//! - `click()` flips immediately; matches and mismatches settle only when
//!   `advance()` moves the virtual clock past the reveal/recovery delay.
//! - `snapshot()` is everything a renderer needs; `to_client_state()` turns it
//!   into JSON.

use std::time::Duration;

use word_match::{
    to_client_state, CardId, Face, GameConfig, GameController, GameEvent, GamePhase, LevelCatalog,
};

fn print_board(game: &GameController) {
    let snap = game.snapshot();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{}]  Errors: {}  Progress: {:.0}%",
        snap.level_name, snap.error_count, snap.progress * 100.0);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let row: Vec<String> = snap
        .cards
        .iter()
        .map(|c| {
            let mark = if c.matched { "✓" } else if c.flipped { "*" } else { " " };
            format!("{mark}{}", c.content)
        })
        .collect();
    println!("  {}", row.join(" | "));
}

fn print_events(events: &[GameEvent]) {
    for e in events {
        match e {
            GameEvent::PairMismatched { first, second, error_count } => {
                println!("    ✗ {first} ≠ {second} (errors: {error_count})")
            }
            GameEvent::PairMatched { word_id } => println!("    ✓ word {word_id}"),
            GameEvent::LevelCleared { level_index } => println!("    ★ level {level_index} cleared"),
            GameEvent::ReviewLevelCreated { word_ids } => println!("    ↻ review words {word_ids:?}"),
            GameEvent::GameComplete { error_count } => println!("    ■ done with {error_count} errors"),
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let config = GameConfig::with_seed(2024);
    let timings = config.timings;
    let mut game = GameController::new(LevelCatalog::builtin(), config);

    while game.phase() != GamePhase::Complete {
        print_board(&game);
        let ids: Vec<u32> = match game.catalog().get(game.level_index()) {
            Some(level) => level.words.iter().map(|w| w.id).collect(),
            None => break,
        };

        // One wrong guess per level: first word against the last meaning.
        if let (Some(&first), Some(&last)) = (ids.first(), ids.last()) {
            if first != last {
                game.click(CardId::new(first, Face::Word));
                print_events(&game.click(CardId::new(last, Face::Meaning)));
                print_events(&game.advance(timings.recovery));
            }
        }

        for id in ids {
            game.click(CardId::new(id, Face::Word));
            game.click(CardId::new(id, Face::Meaning));
            print_events(&game.advance(timings.reveal));
        }
        print_events(&game.advance(timings.celebration + Duration::from_millis(1)));
        println!();
    }

    let snap = game.snapshot();
    println!("Final: {} — {} errors, error log {:?}", snap.level_name, snap.error_count, snap.error_log);
    match serde_json::to_string_pretty(&to_client_state(&snap)) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("could not render client state: {e}"),
    }
}
