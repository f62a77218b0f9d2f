//! Half-spread sizing from residual uncertainty.
//!
//! Spreads scale with the remaining settlement sigma and tighten as
//! the round progresses, but never collapse below the base tick.

use crate::config::QuoterConfig;
use dicemm_model::math::norm_pdf;
use dicemm_model::SettlementDist;

/// Half-spread for a future: `max(base_tick, k_futures * sigma)`.
pub fn futures_half_spread(config: &QuoterConfig, sigma: f64) -> f64 {
    (config.k_futures * sigma).max(config.base_tick)
}

/// Half-spread for an option: `max(base_tick, k_options * sigma * phi(d))`
/// while uncertainty remains, base tick once the settlement is known
/// (no uncertainty premium on a settled payoff).
pub fn option_half_spread(config: &QuoterConfig, dist: SettlementDist, strike: f64) -> f64 {
    match dist.standardized(strike) {
        Some(d) => (config.k_options * dist.sigma() * norm_pdf(d)).max(config.base_tick),
        None => config.base_tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(mean: f64, variance: f64) -> SettlementDist {
        SettlementDist { mean, variance }
    }

    #[test]
    fn test_futures_spread_floor() {
        let config = QuoterConfig::default();
        // tiny sigma: floored at base tick
        assert_eq!(futures_half_spread(&config, 0.0), config.base_tick);
        assert_eq!(futures_half_spread(&config, 1.0), config.base_tick);
        // large sigma: k * sigma dominates
        let half = futures_half_spread(&config, 1000.0);
        assert!((half - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_futures_spread_monotone_in_sigma() {
        let config = QuoterConfig::default();
        let mut last = f64::INFINITY;
        for sigma in [500.0, 200.0, 100.0, 10.0, 0.0] {
            let half = futures_half_spread(&config, sigma);
            assert!(half <= last);
            assert!(half >= config.base_tick);
            last = half;
        }
    }

    #[test]
    fn test_option_spread_floor_and_settled() {
        let config = QuoterConfig::default();
        // settled: exactly the base tick
        assert_eq!(
            option_half_spread(&config, dist(21000.0, 0.0), 21000.0),
            config.base_tick
        );
        // live but far from the money: phi(d) ~ 0, floored
        let far = option_half_spread(&config, dist(21000.0, 100.0), 50000.0);
        assert_eq!(far, config.base_tick);
    }

    #[test]
    fn test_option_spread_monotone_in_sigma() {
        // At the money so phi(d) = phi(0) stays fixed while sigma shrinks.
        let config = QuoterConfig {
            k_options: 10.0,
            ..Default::default()
        };
        let mut last = f64::INFINITY;
        for var in [10000.0, 2500.0, 400.0, 0.0] {
            let half = option_half_spread(&config, dist(21000.0, var), 21000.0);
            assert!(half <= last);
            assert!(half >= config.base_tick);
            last = half;
        }
        assert_eq!(last, config.base_tick);
    }
}
