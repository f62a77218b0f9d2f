//! Shared quoting and host-interface types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Net positions by instrument id. Positive = long. Owned and mutated
/// by the host; the engine only ever reads a snapshot.
pub type Positions = HashMap<String, i64>;

/// A firm two-sided market for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: f64,
    pub ask: f64,
}

impl Quote {
    pub fn new(bid: f64, ask: f64) -> Self {
        Self { bid, ask }
    }

    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// A quote the host may execute against: finite and `bid < ask`.
    pub fn is_well_formed(&self) -> bool {
        self.bid.is_finite() && self.ask.is_finite() && self.bid < self.ask
    }
}

/// Per-call round position delivered by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// Round index within the game.
    #[serde(default)]
    pub round: u32,
    /// Subround index within the round (number of rolls revealed so far).
    pub subround: u32,
}

/// One-time game parameters delivered by the host at start.
///
/// `dice_sides` carries no serde default: a host payload without it is
/// the single fatal misconfiguration the engine refuses to start on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Faces per die. Each subround value aggregates 2000 of them.
    pub dice_sides: u32,
    /// Team display name, used only for logging.
    #[serde(default = "default_team_name")]
    pub team_name: String,
}

fn default_team_name() -> String {
    "dicemm".to_string()
}

/// Host notification at the end of a round. Informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    #[serde(default)]
    pub pnl: f64,
}

/// Host notification at the end of the game. Informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    #[serde(default)]
    pub total_pnl: f64,
    #[serde(default)]
    pub final_score: f64,
}
