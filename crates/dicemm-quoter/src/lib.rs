//! Market-making quote generation for dice-sum derivatives.
//!
//! `DiceStrategy` wraps the per-subround `QuoteEngine`, which composes
//! the pieces in this crate: spread sizing from residual uncertainty,
//! inventory-aware mid skew, and strike selection around the forward
//! mean. Pricing and distribution estimation live in `dicemm-model`.

pub mod config;
pub mod engine;
pub mod error;
pub mod skew;
pub mod spread;
pub mod strategy;
pub mod strikes;

pub use config::QuoterConfig;
pub use engine::{QuoteBook, QuoteEngine, SkipReason, SkippedInstrument};
pub use error::{QuoterError, QuoterResult};
pub use strategy::DiceStrategy;
