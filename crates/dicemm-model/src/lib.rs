//! Distribution estimation and Bachelier pricing.
//!
//! The settlement value of every instrument is a cumulative sum of
//! aggregate dice rolls revealed one subround at a time. This crate
//! turns roll observations into a shrinking Normal forward
//! distribution and prices futures and European options against it:
//!
//! ```text
//! rolls -> RollEstimator::pooled_stats -> RollStats
//!       -> RollEstimator::settlement   -> SettlementDist
//!       -> pricer::{future_fair, call_value, put_value}
//! ```

pub mod error;
pub mod estimator;
pub mod math;
pub mod pricer;

pub use error::{ModelError, ModelResult};
pub use estimator::{
    RollEstimator, RollStats, SettlementDist, DICE_PER_SUBROUND, MIN_POOLED_SAMPLES,
};
pub use pricer::{call_value, future_fair, put_value, OptionValue};
