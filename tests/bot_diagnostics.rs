//! Bot-vs-bot diagnostic simulations.
//!
//! The arena runs are NOT run in CI — use them locally to verify bot
//! strength and catch integration issues (e.g. a tier that stops finding
//! moves, or heuristics that tank the win rate).
//!
//! Run with:
//!     cargo test --release --test bot_diagnostics -- --ignored --nocapture

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use words_game_engine::arena::{run_arena, ArenaConfig};
use words_game_engine::bot::{Bot, Difficulty};
use words_game_engine::dictionary::Dictionary;
use words_game_engine::round::{Round, RoundConfig};
use words_game_engine::tiles::{Tile, TileId};
use words_game_engine::types::{Letter, Player};

fn diagnostic_dict() -> Dictionary {
    Dictionary::from_words([
        "CAT", "AT", "TA", "ATE", "TEA", "EAT", "TAE", "ETA", "RAT", "TAR", "ART", "EAR", "ERA",
        "ARE", "TOE", "OAT", "NET", "TEN", "ONE", "EON", "NOT", "TON", "SEA", "SET", "TIE", "SIT",
        "ITS", "TIS", "IRE", "AIR", "RAN", "NEAR", "EARN", "RATE", "TEAR", "STAR", "ARTS", "RATS",
        "NOTE", "TONE", "STONE", "TONES", "RETAINS", "NASTIER",
    ])
}

/// Every tier must find and commit the obvious opening play.
#[test]
fn each_tier_finds_an_opening_move() {
    let letters = [
        // p0 rack
        Letter::C,
        Letter::A,
        Letter::T,
        Letter::E,
        Letter::R,
        Letter::N,
        Letter::S,
        // p1 rack
        Letter::O,
        Letter::O,
        Letter::O,
        Letter::O,
        Letter::O,
        Letter::O,
        Letter::O,
        // bag
        Letter::A,
        Letter::E,
    ];
    let tiles: Vec<Tile> = letters
        .iter()
        .enumerate()
        .map(|(i, &l)| Tile::new(i as TileId, l))
        .collect();
    let dict = diagnostic_dict();

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let config = RoundConfig {
            tiles: Some(tiles.clone()),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(17);
        let players = vec![Player::new("p0", "Bot"), Player::new("p1", "One")];
        let mut round = Round::new(players, config, &mut rng).unwrap();

        let bot = Bot::new(difficulty);
        let placements = bot
            .choose_move(&round, "p0", &dict, &mut rng)
            .unwrap_or_else(|| panic!("{difficulty:?} found no opening move"));

        let score = round.place_word("p0", &placements, &dict).unwrap();
        assert!(score > 0, "{difficulty:?} committed a zero-score move");
    }
}

/// Hard vs Easy over a handful of games. Baseline: hard should win the
/// clear majority and outscore easy on average.
#[test]
#[ignore]
fn hard_vs_easy() {
    let mut bots = HashMap::new();
    bots.insert("hard".to_string(), Bot::new(Difficulty::Hard));
    bots.insert("easy".to_string(), Bot::new(Difficulty::Easy));

    let config = ArenaConfig {
        num_games: 20,
        base_seed: 42,
        alternate_seats: true,
        max_turns: 500,
    };
    let result = run_arena(
        &bots,
        &diagnostic_dict(),
        &config,
        Some(&|done, total| {
            eprintln!("  game {done}/{total}");
        }),
    );

    println!("\n{}", result.summary());
    println!(
        "\n  hard avg={:.1} (+/-{:.1})  easy avg={:.1} (+/-{:.1})  hard win rate={:.0}%",
        result.avg_score("hard"),
        result.score_stddev("hard"),
        result.avg_score("easy"),
        result.score_stddev("easy"),
        result.win_rate("hard") * 100.0,
    );

    let total_outcomes = result.wins.values().sum::<usize>() + result.draws;
    assert_eq!(total_outcomes, 20);
}

/// Medium vs Medium sanity run: seat alternation should keep the matchup
/// close to even over enough games.
#[test]
#[ignore]
fn medium_mirror_match() {
    let mut bots = HashMap::new();
    bots.insert("m1".to_string(), Bot::new(Difficulty::Medium));
    bots.insert("m2".to_string(), Bot::new(Difficulty::Medium));

    let config = ArenaConfig {
        num_games: 20,
        base_seed: 7,
        alternate_seats: true,
        max_turns: 500,
    };
    let result = run_arena(&bots, &diagnostic_dict(), &config, None);

    println!("\n{}", result.summary());
    let total_outcomes = result.wins.values().sum::<usize>() + result.draws;
    assert_eq!(total_outcomes, 20);
}
