//! Bot-vs-bot arena runner.

use std::collections::HashMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bot::Bot;
use crate::dictionary::Dictionary;
use crate::round::{Round, RoundConfig};
use crate::types::Player;

/// Arena run options.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub num_games: usize,
    pub base_seed: u64,
    /// Rotate seat order between games so neither bot always opens.
    pub alternate_seats: bool,
    /// Games that reach this many turns count as draws.
    pub max_turns: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            base_seed: 42,
            alternate_seats: true,
            max_turns: 500,
        }
    }
}

/// Aggregated results from an arena run.
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    pub total_scores: HashMap<String, Vec<f64>>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        let scores = self.total_scores.get(name);
        match scores {
            Some(s) if !s.is_empty() => s.iter().sum::<f64>() / s.len() as f64,
            _ => 0.0,
        }
    }

    pub fn score_stddev(&self, name: &str) -> f64 {
        let scores = match self.total_scores.get(name) {
            Some(s) if s.len() >= 2 => s,
            _ => return 0.0,
        };
        let avg = self.avg_score(name);
        let variance =
            scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / (scores.len() - 1) as f64;
        variance.sqrt()
    }

    /// Wilson interval on the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let wr = self.win_rate(name);
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            let avg = self.avg_score(name);
            let std = self.score_stddev(name);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  avg={:5.1} +/- {:4.1}",
                name,
                self.wins[name],
                wr * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                avg,
                std,
            ));
        }
        lines.push(format!("  {:>12}: {}", "Draws", self.draws));
        if !self.game_durations_ms.is_empty() {
            let avg_ms =
                self.game_durations_ms.iter().sum::<f64>() / self.game_durations_ms.len() as f64;
            let total_s = self.game_durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!("  Avg game: {:.0}ms  |  Total: {:.1}s", avg_ms, total_s));
        }
        lines.join("\n")
    }
}

/// Run games between the named bots and return aggregated stats. Every game
/// derives its rng from `base_seed + game_index`, so a run is reproducible.
pub fn run_arena(
    bots: &HashMap<String, Bot>,
    dict: &Dictionary,
    config: &ArenaConfig,
    progress_callback: Option<&dyn Fn(usize, usize)>,
) -> ArenaResult {
    let mut bot_names: Vec<String> = bots.keys().cloned().collect();
    bot_names.sort();
    let num_players = bot_names.len();

    let mut result = ArenaResult {
        num_games: config.num_games,
        wins: bot_names.iter().map(|n| (n.clone(), 0)).collect(),
        draws: 0,
        total_scores: bot_names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        game_durations_ms: Vec::new(),
    };

    for game_idx in 0..config.num_games {
        let seed = config.base_seed + game_idx as u64;

        let seat_assignment: Vec<String> = if config.alternate_seats {
            (0..num_players)
                .map(|i| bot_names[(i + game_idx) % num_players].clone())
                .collect()
        } else {
            bot_names.clone()
        };

        let players: Vec<Player> = (0..num_players)
            .map(|i| Player::new(format!("p{i}"), seat_assignment[i].clone()))
            .collect();
        let pid_to_bot: HashMap<String, &Bot> = (0..num_players)
            .map(|i| (format!("p{i}"), &bots[&seat_assignment[i]]))
            .collect();
        let pid_to_name: HashMap<String, String> = (0..num_players)
            .map(|i| (format!("p{i}"), seat_assignment[i].clone()))
            .collect();

        let t0 = Instant::now();
        let finished = play_one_game(players, &pid_to_bot, dict, seed, config.max_turns);
        result
            .game_durations_ms
            .push(t0.elapsed().as_secs_f64() * 1000.0);

        match finished {
            None => {
                result.draws += 1;
                for name in &bot_names {
                    if let Some(scores) = result.total_scores.get_mut(name) {
                        scores.push(0.0);
                    }
                }
            }
            Some(round) => {
                for player in round.players() {
                    if let Some(name) = pid_to_name.get(&player.id) {
                        if let Some(scores) = result.total_scores.get_mut(name) {
                            scores.push(player.score as f64);
                        }
                    }
                }
                if let Some(winner) = round.winner() {
                    if let Some(name) = pid_to_name.get(&winner.id) {
                        if let Some(count) = result.wins.get_mut(name) {
                            *count += 1;
                        }
                    }
                }
            }
        }

        if let Some(cb) = progress_callback {
            cb(game_idx + 1, config.num_games);
        }
    }

    result
}

/// Play a single game to completion, or `None` when the turn cap is hit or
/// no seat can act.
fn play_one_game(
    players: Vec<Player>,
    pid_to_bot: &HashMap<String, &Bot>,
    dict: &Dictionary,
    seed: u64,
    max_turns: usize,
) -> Option<Round> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut round = match Round::new(players, RoundConfig::default(), &mut rng) {
        Ok(round) => round,
        Err(e) => {
            tracing::error!(error = %e, "arena game setup failed");
            return None;
        }
    };

    for _ in 0..max_turns {
        if round.is_complete() {
            return Some(round);
        }
        let pid = round.current_player()?.id.clone();
        let bot = pid_to_bot.get(&pid)?;

        if let Some(placements) = bot.choose_move(&round, &pid, dict, &mut rng) {
            match round.place_word(&pid, &placements, dict) {
                Ok(_) => continue,
                Err(e) => {
                    // Generated moves validate against the live round, so
                    // this indicates a generator bug; fall through.
                    tracing::warn!(player = %pid, error = %e, "generated move rejected");
                }
            }
        }

        // No playable word: exchange the whole rack when the bag covers it,
        // otherwise pass (forbidden only before the opening word).
        let rack_len = round.rack(&pid).map_or(0, <[_]>::len);
        if rack_len > 0 && round.tiles_remaining_in_bag() >= rack_len {
            let rack = round.rack(&pid).map(<[_]>::to_vec).unwrap_or_default();
            if round.exchange(&pid, &rack, &mut rng).is_ok() {
                continue;
            }
        }
        if round.pass(&pid).is_err() {
            // Opening seat with no word, no exchange, no pass: stalemate.
            return None;
        }
    }

    if round.is_complete() {
        Some(round)
    } else {
        None
    }
}
