//! Named bot profiles: bundles of search params keyed by profile name.
//! Loaded from TOML at runtime for the arena CLI.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::bot::{BotParams, Difficulty};

/// A named bot profile. Every field is optional; unspecified fields fall
/// back to the difficulty tier's built-in defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfile {
    pub description: Option<String>,

    pub max_combinations: Option<usize>,
    pub random_move_probability: Option<f64>,
    pub premium_square_bonus: Option<f64>,
    pub edge_penalty: Option<f64>,
    pub time_limit_ms: Option<u64>,
}

impl BotProfile {
    /// Convert to BotParams, filling gaps from the tier defaults.
    pub fn to_params(&self, difficulty: Difficulty) -> BotParams {
        let d = difficulty.default_params();
        BotParams {
            max_combinations: self.max_combinations.unwrap_or(d.max_combinations),
            random_move_probability: self
                .random_move_probability
                .unwrap_or(d.random_move_probability),
            premium_square_bonus: self.premium_square_bonus.unwrap_or(d.premium_square_bonus),
            edge_penalty: self.edge_penalty.unwrap_or(d.edge_penalty),
            time_limit_ms: self.time_limit_ms.or(d.time_limit_ms),
        }
    }
}

/// Maps difficulty tiers to profile names.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProductionConfig {
    pub easy: Option<String>,
    pub medium: Option<String>,
    pub hard: Option<String>,
    pub default: Option<String>,
}

impl ProductionConfig {
    pub fn resolve(&self, difficulty: Difficulty) -> Option<&str> {
        match difficulty {
            Difficulty::Easy => self.easy.as_deref().or(self.default.as_deref()),
            Difficulty::Medium => self.medium.as_deref().or(self.default.as_deref()),
            Difficulty::Hard => self.hard.as_deref().or(self.default.as_deref()),
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfilesFile {
    #[serde(default)]
    pub profiles: HashMap<String, BotProfile>,
    #[serde(default)]
    pub production: ProductionConfig,
}

impl BotProfilesFile {
    /// Params for a tier: the production-mapped profile when one exists,
    /// otherwise the tier defaults.
    pub fn params_for(&self, difficulty: Difficulty) -> BotParams {
        self.production
            .resolve(difficulty)
            .and_then(|name| self.profiles.get(name))
            .map(|profile| profile.to_params(difficulty))
            .unwrap_or_else(|| difficulty.default_params())
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<BotProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load profiles from well-known paths, returning a default if none found.
pub fn load_default_profiles() -> BotProfilesFile {
    let candidates = [
        "bot_profiles.toml",
        "../bot_profiles.toml",
        "/etc/words/bot_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded bot profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load bot profiles");
                }
            }
        }
    }
    tracing::info!("no bot_profiles.toml found, using built-in defaults");
    BotProfilesFile::default()
}
