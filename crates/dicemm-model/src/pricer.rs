//! Bachelier fair values and deltas.
//!
//! The settlement sum is Normal, so options price under the Bachelier
//! (additive) model rather than Black-Scholes: with `m` the forward
//! mean, `s` the residual standard deviation and `d = (m - K) / s`,
//!
//! ```text
//! call = (m - K) * Phi(d) + s * phi(d)      call_delta = Phi(d)
//! put  = call - (m - K)                     put_delta  = Phi(d) - 1
//! ```
//!
//! At `s = 0` the settlement is a point mass: prices collapse to
//! intrinsic value and deltas to step functions (ties resolve to 0).

use crate::error::{ModelError, ModelResult};
use crate::estimator::SettlementDist;
use crate::math::{norm_cdf, norm_pdf};

/// Fair value and delta of one priced option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionValue {
    pub price: f64,
    pub delta: f64,
}

/// Futures fair value: the expected settlement sum.
pub fn future_fair(dist: SettlementDist) -> ModelResult<f64> {
    ensure_finite("settlement mean", dist.mean)?;
    Ok(dist.mean)
}

/// Bachelier call value and delta.
pub fn call_value(dist: SettlementDist, strike: f64) -> ModelResult<OptionValue> {
    ensure_finite("settlement mean", dist.mean)?;
    ensure_finite("strike", strike)?;

    let m = dist.mean;
    match dist.standardized(strike) {
        None => Ok(OptionValue {
            price: (m - strike).max(0.0),
            delta: if m > strike { 1.0 } else { 0.0 },
        }),
        Some(d) => {
            let s = dist.sigma();
            let price = (m - strike) * norm_cdf(d) + s * norm_pdf(d);
            ensure_finite("call price", price)?;
            Ok(OptionValue {
                price,
                delta: norm_cdf(d),
            })
        }
    }
}

/// Bachelier put value and delta, via put-call parity.
pub fn put_value(dist: SettlementDist, strike: f64) -> ModelResult<OptionValue> {
    let call = call_value(dist, strike)?;
    let m = dist.mean;

    if dist.is_settled() {
        return Ok(OptionValue {
            price: (strike - m).max(0.0),
            delta: if m < strike { -1.0 } else { 0.0 },
        });
    }

    Ok(OptionValue {
        price: call.price - (m - strike),
        delta: call.delta - 1.0,
    })
}

fn ensure_finite(context: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite { context, value })
    }
}
