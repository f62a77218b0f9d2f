//! Core domain types for the dice derivatives market maker.
//!
//! This crate provides the types shared by the model and quoting
//! layers:
//! - `Instrument`: typed product descriptors parsed from catalog ids
//! - `Quote`: a firm two-sided market
//! - Host lifecycle payloads (`GameConfig`, `RoundResult`, `GameSummary`)
//! - `ParseError`: catalog parse failures

pub mod error;
pub mod instrument;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use instrument::Instrument;
pub use types::{GameConfig, GameSummary, Positions, Quote, RoundInfo, RoundResult};
