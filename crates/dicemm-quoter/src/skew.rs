//! Inventory-aware mid-price skew.
//!
//! A positive net exposure lowers the quoted mid, making the book
//! cheaper to buy from and less attractive to sell into, which nudges
//! the position back toward flat. Futures skew on their own net
//! position; options skew on the delta-weighted exposure of the whole
//! underlying so prices stay consistent across strikes.

use crate::config::QuoterConfig;
use dicemm_core::{Instrument, Positions};
use dicemm_model::{call_value, put_value, RollEstimator, RollStats};
use tracing::debug;

/// Net signed position for one instrument id.
pub fn instrument_position(positions: &Positions, id: &str) -> i64 {
    positions.get(id).copied().unwrap_or(0)
}

/// Delta-weighted net exposure on one underlying.
///
/// Held options contribute `quantity * delta` (priced at their own
/// expiry against the current forward distribution); held futures
/// contribute their raw net quantity (delta 1). Position ids that fail
/// to parse or price are ignored: the host owns position integrity.
pub fn net_delta_exposure(
    underlying: &str,
    positions: &Positions,
    estimator: &RollEstimator,
    stats: RollStats,
    current_rolls: &[f64],
) -> f64 {
    let mut exposure = 0.0;
    for (id, qty) in positions {
        if *qty == 0 {
            continue;
        }
        let inst = match Instrument::parse(id) {
            Ok(inst) => inst,
            Err(err) => {
                debug!(%id, %err, "ignoring unparseable position id for exposure");
                continue;
            }
        };
        if inst.underlying() != underlying {
            continue;
        }
        match inst {
            Instrument::Future { .. } => exposure += *qty as f64,
            Instrument::Call {
                strike,
                expiry_subround,
                ..
            } => {
                let dist = estimator.settlement(stats, current_rolls, expiry_subround);
                if let Ok(value) = call_value(dist, strike) {
                    exposure += *qty as f64 * value.delta;
                }
            }
            Instrument::Put {
                strike,
                expiry_subround,
                ..
            } => {
                let dist = estimator.settlement(stats, current_rolls, expiry_subround);
                if let Ok(value) = put_value(dist, strike) {
                    exposure += *qty as f64 * value.delta;
                }
            }
        }
    }
    exposure
}

/// Skewed mid for a future: `fair - alpha_f * net_position`.
pub fn futures_mid(config: &QuoterConfig, fair: f64, net_position: i64) -> f64 {
    fair - config.inventory_alpha_futures * net_position as f64
}

/// Skewed mid for an option: `fair - alpha_o * delta_exposure`. The
/// same shift applies to every option on the underlying.
pub fn option_mid(config: &QuoterConfig, fair: f64, delta_exposure: f64) -> f64 {
    fair - config.inventory_alpha_options * delta_exposure
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn positions(entries: &[(&str, i64)]) -> Positions {
        entries
            .iter()
            .map(|(id, qty)| (id.to_string(), *qty))
            .collect()
    }

    #[test]
    fn test_futures_mid_shift() {
        // net +10 at alpha 0.1 shifts the mid down by exactly 1.0
        let config = QuoterConfig::default();
        let mid = futures_mid(&config, 21000.0, 10);
        assert!((mid - 20999.0).abs() < 1e-12);

        // short position shifts the mid up
        let mid = futures_mid(&config, 21000.0, -10);
        assert!((mid - 21001.0).abs() < 1e-12);

        // flat book: no shift
        assert_eq!(futures_mid(&config, 21000.0, 0), 21000.0);
    }

    #[test]
    fn test_delta_exposure_counts_futures_at_unit_delta() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[], &[]);
        let pos = positions(&[("S,F,3", 4), ("S,F,2", -1)]);
        let exposure = net_delta_exposure("S", &pos, &est, stats, &[]);
        assert!((exposure - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_delta_exposure_weights_options_by_delta() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[], &[]);
        // Deep in-the-money call at expiry 1: delta ~ 1
        let pos = positions(&[("S,C,1,1", 2)]);
        let exposure = net_delta_exposure("S", &pos, &est, stats, &[]);
        assert!((exposure - 2.0).abs() < 1e-3);

        // Deep in-the-money put: delta ~ -1
        let pos = positions(&[("S,P,50000,1", 3)]);
        let exposure = net_delta_exposure("S", &pos, &est, stats, &[]);
        assert!((exposure + 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_delta_exposure_filters_other_underlyings() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[], &[]);
        let pos = positions(&[("T,F,3", 100), ("S,F,3", 1)]);
        let exposure = net_delta_exposure("S", &pos, &est, stats, &[]);
        assert!((exposure - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_delta_exposure_ignores_bad_ids_and_zero_qty() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[], &[]);
        let mut pos: Positions = HashMap::new();
        pos.insert("garbage".to_string(), 5);
        pos.insert("S,F,3".to_string(), 0);
        assert_eq!(net_delta_exposure("S", &pos, &est, stats, &[]), 0.0);
    }

    #[test]
    fn test_option_mid_uniform_shift() {
        let config = QuoterConfig::default();
        let exposure = 20.0;
        let shift = config.inventory_alpha_options * exposure;
        for fair in [10.0, 110.0, 410.0] {
            assert!((option_mid(&config, fair, exposure) - (fair - shift)).abs() < 1e-12);
        }
    }
}
