//! Strike selection for option quoting.
//!
//! Selection operates per (underlying, expiry) group at the
//! (strike, expiry) granularity: a selected level quotes both its call
//! and its put where they exist. Only strikes near the forward mean
//! are worth making; a settled distribution is a payoff step function
//! with unbounded adverse-selection risk, so it selects nothing.

use crate::config::QuoterConfig;
use dicemm_model::SettlementDist;
use std::cmp::Ordering;

/// A call/put pair sharing one (strike, expiry) level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrikeLevel {
    pub strike: f64,
    pub expiry_subround: u32,
    /// Catalog id of the call at this level, if present.
    pub call_id: Option<String>,
    /// Catalog id of the put at this level, if present.
    pub put_id: Option<String>,
}

impl StrikeLevel {
    pub fn new(strike: f64, expiry_subround: u32) -> Self {
        Self {
            strike,
            expiry_subround,
            call_id: None,
            put_id: None,
        }
    }
}

/// Select the strike levels worth quoting for one group.
///
/// Keeps strikes with `|strike - mean| <= strike_sigma_window * sigma`,
/// ranks by distance from the mean ascending (ties by strike
/// ascending, so the result is deterministic), and truncates to
/// `max_option_quotes`.
pub fn select_strikes(
    config: &QuoterConfig,
    dist: SettlementDist,
    levels: Vec<StrikeLevel>,
) -> Vec<StrikeLevel> {
    let sigma = dist.sigma();
    if sigma <= 0.0 {
        return Vec::new();
    }
    let window = config.strike_sigma_window * sigma;

    let mut kept: Vec<StrikeLevel> = levels
        .into_iter()
        .filter(|level| (level.strike - dist.mean).abs() <= window)
        .collect();

    kept.sort_by(|a, b| {
        let da = (a.strike - dist.mean).abs();
        let db = (b.strike - dist.mean).abs();
        da.partial_cmp(&db)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.strike.partial_cmp(&b.strike).unwrap_or(Ordering::Equal))
    });
    kept.truncate(config.max_option_quotes);
    kept
}
