//! Simulation configuration.

use anyhow::Context;
use dicemm_quoter::QuoterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level simulation configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub game: GameSection,
    #[serde(default)]
    pub sim: SimSection,
    #[serde(default = "QuoterConfig::default")]
    pub quoter: QuoterConfig,
}

impl SimConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game: GameSection::default(),
            sim: SimSection::default(),
            quoter: QuoterConfig::default(),
        }
    }
}

/// Game parameters handed to the strategy at start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSection {
    #[serde(default = "default_dice_sides")]
    pub dice_sides: u32,
    #[serde(default = "default_team_name")]
    pub team_name: String,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            dice_sides: default_dice_sides(),
            team_name: default_team_name(),
        }
    }
}

/// Knobs of the simulated game itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSection {
    /// Rounds per game.
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Subrounds (revealed rolls) per round.
    #[serde(default = "default_subrounds")]
    pub subrounds: u32,
    /// Training rolls published before the first round.
    #[serde(default = "default_training_rolls")]
    pub training_rolls: usize,
    /// Strike grid step for the synthetic option catalog.
    #[serde(default = "default_strike_step")]
    pub strike_step: f64,
    /// Strike levels on each side of the expected settlement mean.
    #[serde(default = "default_strikes_per_side")]
    pub strikes_per_side: u32,
    /// Probability a counterparty trades against each quoted side.
    #[serde(default = "default_fill_probability")]
    pub fill_probability: f64,
    /// PRNG seed; overridable from the command line.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SimSection {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            subrounds: default_subrounds(),
            training_rolls: default_training_rolls(),
            strike_step: default_strike_step(),
            strikes_per_side: default_strikes_per_side(),
            fill_probability: default_fill_probability(),
            seed: default_seed(),
        }
    }
}

fn default_dice_sides() -> u32 {
    6
}
fn default_team_name() -> String {
    "dicemm".to_string()
}
fn default_rounds() -> u32 {
    10
}
fn default_subrounds() -> u32 {
    3
}
fn default_training_rolls() -> usize {
    20
}
fn default_strike_step() -> f64 {
    50.0
}
fn default_strikes_per_side() -> u32 {
    4
}
fn default_fill_probability() -> f64 {
    0.3
}
fn default_seed() -> u64 {
    42
}
