//! Forward distribution estimation for the settlement sum.
//!
//! Each subround reveals one aggregate roll (the sum of 2000 fair
//! dice). Training rolls and the rolls realized so far this round are
//! pooled into per-roll moments; the settlement distribution for a
//! target subround is the realized partial sum plus a Normal tail with
//! mean and variance growing linearly in the remaining subrounds
//! (independent increments).

use tracing::warn;

/// Number of dice aggregated into one subround roll.
pub const DICE_PER_SUBROUND: u32 = 2000;

/// Minimum pooled sample size before falling back to theoretical moments.
pub const MIN_POOLED_SAMPLES: usize = 2;

/// Per-roll moments pooled from training and realized samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollStats {
    /// Arithmetic mean of one aggregate roll.
    pub mean: f64,
    /// Population variance (divide by n) of one aggregate roll.
    pub variance: f64,
    /// Pooled sample count.
    pub sample_count: usize,
    /// True when the theoretical prior was used instead of the sample.
    pub from_prior: bool,
}

/// Forward distribution of a settlement sum at some target subround.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlementDist {
    pub mean: f64,
    /// Residual variance; zero once the settlement is fully realized.
    pub variance: f64,
}

impl SettlementDist {
    /// Standard deviation of the remaining uncertainty (sigma_U).
    pub fn sigma(&self) -> f64 {
        self.variance.max(0.0).sqrt()
    }

    /// Whether the settlement value is already a point mass.
    pub fn is_settled(&self) -> bool {
        self.variance <= 0.0
    }

    /// Standardized moneyness `d = (mean - strike) / sigma`, or `None`
    /// for a settled distribution.
    pub fn standardized(&self, strike: f64) -> Option<f64> {
        let s = self.sigma();
        if s > 0.0 {
            Some((self.mean - strike) / s)
        } else {
            None
        }
    }
}

/// Pools roll observations and projects settlement distributions.
#[derive(Debug, Clone, Copy)]
pub struct RollEstimator {
    dice_sides: u32,
}

impl RollEstimator {
    pub fn new(dice_sides: u32) -> Self {
        Self { dice_sides }
    }

    /// Theoretical moments of one aggregate roll of 2000 fair dice.
    pub fn prior(&self) -> (f64, f64) {
        let s = self.dice_sides as f64;
        let n = DICE_PER_SUBROUND as f64;
        let mean = n * (s + 1.0) / 2.0;
        let variance = n * (s * s - 1.0) / 12.0;
        (mean, variance)
    }

    /// Pooled mean and population variance of training + current rolls.
    ///
    /// Sample order is irrelevant. Below `MIN_POOLED_SAMPLES` the
    /// theoretical prior is used instead; a negative or non-finite
    /// sample variance (corrupted input rolls) clamps to zero.
    pub fn pooled_stats(&self, training: &[f64], current: &[f64]) -> RollStats {
        let n = training.len() + current.len();
        if n < MIN_POOLED_SAMPLES {
            let (mean, variance) = self.prior();
            return RollStats {
                mean,
                variance,
                sample_count: n,
                from_prior: true,
            };
        }

        let sum: f64 = training.iter().chain(current.iter()).sum();
        let mean = sum / n as f64;
        let ss: f64 = training
            .iter()
            .chain(current.iter())
            .map(|x| (x - mean) * (x - mean))
            .sum();
        let variance = clamp_variance(ss / n as f64, "pooled roll variance");

        RollStats {
            mean,
            variance,
            sample_count: n,
            from_prior: false,
        }
    }

    /// Forward distribution of the settlement sum at `target_subround`.
    ///
    /// Realized rolls contribute their exact partial sum; each
    /// remaining subround adds `stats.mean` to the mean and
    /// `stats.variance` to the variance. Taking `K = min(len, target)`
    /// also covers instruments whose expiry is already behind the
    /// current subround: they price as settled, never with a negative
    /// horizon.
    pub fn settlement(
        &self,
        stats: RollStats,
        current_rolls: &[f64],
        target_subround: u32,
    ) -> SettlementDist {
        let target = target_subround as usize;
        let realized = target.min(current_rolls.len());
        let known: f64 = current_rolls[..realized].iter().sum();
        let remaining = (target - realized) as f64;

        let mean = known + stats.mean * remaining;
        let variance = clamp_variance(stats.variance * remaining, "settlement variance");

        SettlementDist { mean, variance }
    }
}

fn clamp_variance(variance: f64, context: &'static str) -> f64 {
    if variance.is_nan() || variance < 0.0 {
        warn!(variance, context, "clamping invalid variance to zero");
        0.0
    } else {
        variance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_six_sided() {
        let est = RollEstimator::new(6);
        let (mu0, var0) = est.prior();
        assert!((mu0 - 7000.0).abs() < 1e-9);
        assert!((var0 - 5833.333_333_333).abs() < 1e-3);
    }

    #[test]
    fn test_pooled_stats_population_variance() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[2.0, 4.0], &[6.0]);
        assert_eq!(stats.sample_count, 3);
        assert!(!stats.from_prior);
        assert!((stats.mean - 4.0).abs() < 1e-12);
        // population variance: ((2-4)^2 + 0 + (6-4)^2) / 3
        assert!((stats.variance - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pooled_stats_order_irrelevant() {
        let est = RollEstimator::new(6);
        let a = est.pooled_stats(&[1.0, 5.0], &[3.0]);
        let b = est.pooled_stats(&[3.0], &[5.0, 1.0]);
        assert!((a.mean - b.mean).abs() < 1e-12);
        assert!((a.variance - b.variance).abs() < 1e-12);
    }

    #[test]
    fn test_prior_fallback_below_min_samples() {
        let est = RollEstimator::new(6);
        let empty = est.pooled_stats(&[], &[]);
        assert!(empty.from_prior);
        assert!((empty.mean - 7000.0).abs() < 1e-9);

        let single = est.pooled_stats(&[], &[7000.0]);
        assert!(single.from_prior);
        assert_eq!(single.sample_count, 1);
    }

    #[test]
    fn test_settlement_partially_realized() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[], &[7000.0]); // falls back to prior
        let dist = est.settlement(stats, &[7000.0], 3);
        assert!((dist.mean - 21000.0).abs() < 1e-6);
        assert!((dist.variance - 2.0 * 5833.333_333_333).abs() < 1e-2);
        assert!((dist.sigma() - 108.012).abs() < 0.01);
        assert!(!dist.is_settled());
    }

    #[test]
    fn test_settlement_fully_realized() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[7000.0, 6900.0, 7100.0], &[]);
        let rolls = [6950.0, 7050.0, 7010.0];
        let dist = est.settlement(stats, &rolls, 3);
        assert!((dist.mean - 21010.0).abs() < 1e-9);
        assert_eq!(dist.variance, 0.0);
        assert!(dist.is_settled());
        assert_eq!(dist.standardized(21000.0), None);
    }

    #[test]
    fn test_settlement_expired_target_uses_prefix() {
        // Target behind the current subround: only the first N rolls count.
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[7000.0, 7000.0], &[]);
        let rolls = [6900.0, 7100.0, 7050.0];
        let dist = est.settlement(stats, &rolls, 2);
        assert!((dist.mean - 14000.0).abs() < 1e-9);
        assert!(dist.is_settled());
    }

    #[test]
    fn test_variance_shrinks_as_rolls_reveal() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[7000.0, 6900.0, 7100.0], &[]);
        let rolls = [6950.0, 7050.0, 7010.0];
        let mut last = f64::INFINITY;
        for k in 0..=3 {
            let dist = est.settlement(stats, &rolls[..k], 3);
            assert!(dist.variance <= last);
            last = dist.variance;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_corrupted_rolls_clamp_to_settled() {
        let est = RollEstimator::new(6);
        let stats = est.pooled_stats(&[f64::NAN, 7000.0], &[]);
        // NaN sample variance clamps to zero rather than poisoning sigma
        assert_eq!(stats.variance, 0.0);
    }
}
