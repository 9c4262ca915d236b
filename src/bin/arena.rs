//! Arena CLI — run bot-vs-bot experiments from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --dictionary words.txt --games 100 --p1-difficulty hard --p2-difficulty easy
//!   cargo run --release --bin arena -- --dictionary words.txt --games 50 --p1-profile tournament --p2-max-combinations 10

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use words_game_engine::arena::{run_arena, ArenaConfig};
use words_game_engine::bot::{Bot, BotParams, Difficulty};
use words_game_engine::bot_profiles::{load_default_profiles, load_profiles, BotProfilesFile};
use words_game_engine::dictionary::Dictionary;

#[derive(Parser)]
#[command(name = "arena", about = "Run bot-vs-bot arena experiments")]
struct Cli {
    /// Path to the dictionary word list (one word per line)
    #[arg(long, env = "WORDS_DICTIONARY")]
    dictionary: PathBuf,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate seat positions between games
    #[arg(long, default_value = "true")]
    alternate_seats: bool,

    /// Turn cap per game; capped games count as draws
    #[arg(long, default_value = "500")]
    max_turns: usize,

    /// Path to bot_profiles.toml
    #[arg(long)]
    profiles: Option<PathBuf>,

    // --- Player 1 ---
    /// P1 display name
    #[arg(long, default_value = "p1")]
    p1_name: String,

    /// P1 difficulty tier: easy, medium, hard
    #[arg(long, default_value = "medium")]
    p1_difficulty: Difficulty,

    /// P1 profile name (from bot_profiles.toml)
    #[arg(long)]
    p1_profile: Option<String>,

    /// P1 permutation cap per anchor
    #[arg(long)]
    p1_max_combinations: Option<usize>,

    /// P1 search time limit (ms)
    #[arg(long)]
    p1_time: Option<u64>,

    // --- Player 2 ---
    /// P2 display name
    #[arg(long, default_value = "p2")]
    p2_name: String,

    /// P2 difficulty tier: easy, medium, hard
    #[arg(long, default_value = "medium")]
    p2_difficulty: Difficulty,

    /// P2 profile name (from bot_profiles.toml)
    #[arg(long)]
    p2_profile: Option<String>,

    /// P2 permutation cap per anchor
    #[arg(long)]
    p2_max_combinations: Option<usize>,

    /// P2 search time limit (ms)
    #[arg(long)]
    p2_time: Option<u64>,
}

struct PlayerSpec {
    name: String,
    difficulty: Difficulty,
    profile: Option<String>,
    max_combinations: Option<usize>,
    time: Option<u64>,
}

fn build_bot(spec: &PlayerSpec, profiles: &BotProfilesFile) -> Bot {
    // Start from the named profile when given, else the tier mapping.
    let mut params = match &spec.profile {
        Some(name) => {
            let profile = profiles.profiles.get(name).unwrap_or_else(|| {
                eprintln!("Error: profile '{name}' not found in bot_profiles.toml");
                eprintln!(
                    "Available profiles: {:?}",
                    profiles.profiles.keys().collect::<Vec<_>>()
                );
                std::process::exit(1);
            });
            profile.to_params(spec.difficulty)
        }
        None => profiles.params_for(spec.difficulty),
    };

    // CLI overrides on top of the profile.
    if let Some(v) = spec.max_combinations {
        params.max_combinations = v;
    }
    if let Some(v) = spec.time {
        params.time_limit_ms = Some(v);
    }

    Bot::with_params(spec.difficulty, params)
}

fn print_config(spec: &PlayerSpec, params: &BotParams) {
    eprintln!(
        "  {}: difficulty={:?}, combinations={}, random_p={}, time={}",
        spec.name,
        spec.difficulty,
        params.max_combinations,
        params.random_move_probability,
        params
            .time_limit_ms
            .map_or("none".to_string(), |ms| format!("{ms}ms")),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path).unwrap_or_else(|e| {
            eprintln!("Error loading profiles: {e}");
            std::process::exit(1);
        }),
        None => load_default_profiles(),
    };

    let dict = Dictionary::from_path(&cli.dictionary);
    if dict.is_empty() {
        eprintln!(
            "Error: dictionary at {} is empty or unreadable",
            cli.dictionary.display()
        );
        std::process::exit(1);
    }

    let p1 = PlayerSpec {
        name: cli.p1_name,
        difficulty: cli.p1_difficulty,
        profile: cli.p1_profile,
        max_combinations: cli.p1_max_combinations,
        time: cli.p1_time,
    };
    let p2 = PlayerSpec {
        name: cli.p2_name,
        difficulty: cli.p2_difficulty,
        profile: cli.p2_profile,
        max_combinations: cli.p2_max_combinations,
        time: cli.p2_time,
    };

    let bot1 = build_bot(&p1, &profiles);
    let bot2 = build_bot(&p2, &profiles);

    eprintln!(
        "Arena: {} games, seed={}, alternate_seats={}, dictionary={} words",
        cli.games,
        cli.seed,
        cli.alternate_seats,
        dict.len(),
    );
    print_config(&p1, &bot1.params);
    print_config(&p2, &bot2.params);
    eprintln!();

    let mut bots: HashMap<String, Bot> = HashMap::new();
    bots.insert(p1.name.clone(), bot1);
    bots.insert(p2.name.clone(), bot2);

    let total = cli.games;
    let progress_cb = move |done: usize, _total: usize| {
        eprint!("\r  [{done}/{total}] games completed");
    };

    let config = ArenaConfig {
        num_games: cli.games,
        base_seed: cli.seed,
        alternate_seats: cli.alternate_seats,
        max_turns: cli.max_turns,
    };
    let result = run_arena(&bots, &dict, &config, Some(&progress_cb));

    eprintln!("\r                                    "); // clear progress line
    println!("{}", result.summary());
}
