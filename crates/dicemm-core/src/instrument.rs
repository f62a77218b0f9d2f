//! Product identifiers and their typed descriptors.
//!
//! The host catalog is a list of comma-separated id strings:
//!
//! - `S,F,N` — future on underlying `S`, settling on the sum of the
//!   first `N` subround values.
//! - `S,C,STRIKE,EXPIRY` / `S,P,STRIKE,EXPIRY` — European call/put on
//!   the settlement value at subround `EXPIRY`.
//!
//! Parsing happens once per call and produces a closed variant type so
//! that downstream code never re-splits strings or re-checks kind
//! tokens. The id string itself remains the instrument's identity.

use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A parsed product descriptor. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instrument {
    /// Future settling on the sum of the first `settle_subround` rolls.
    Future {
        underlying: String,
        settle_subround: u32,
    },
    /// European call on the settlement value at `expiry_subround`.
    Call {
        underlying: String,
        strike: f64,
        expiry_subround: u32,
    },
    /// European put on the settlement value at `expiry_subround`.
    Put {
        underlying: String,
        strike: f64,
        expiry_subround: u32,
    },
}

impl Instrument {
    /// Parse a product identifier.
    pub fn parse(id: &str) -> ParseResult<Self> {
        let fields: Vec<&str> = id.split(',').collect();
        if fields.len() < 3 {
            return Err(ParseError::FieldCount {
                id: id.to_string(),
                expected: 3,
                got: fields.len(),
            });
        }

        let underlying = fields[0].to_string();
        match fields[1] {
            "F" => {
                if fields.len() != 3 {
                    return Err(ParseError::FieldCount {
                        id: id.to_string(),
                        expected: 3,
                        got: fields.len(),
                    });
                }
                let settle_subround = parse_subround(id, "settle subround", fields[2])?;
                Ok(Instrument::Future {
                    underlying,
                    settle_subround,
                })
            }
            "C" | "P" => {
                if fields.len() != 4 {
                    return Err(ParseError::FieldCount {
                        id: id.to_string(),
                        expected: 4,
                        got: fields.len(),
                    });
                }
                let strike = parse_strike(id, fields[2])?;
                let expiry_subround = parse_subround(id, "expiry subround", fields[3])?;
                if fields[1] == "C" {
                    Ok(Instrument::Call {
                        underlying,
                        strike,
                        expiry_subround,
                    })
                } else {
                    Ok(Instrument::Put {
                        underlying,
                        strike,
                        expiry_subround,
                    })
                }
            }
            other => Err(ParseError::UnknownKind {
                id: id.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    /// The underlying symbol.
    pub fn underlying(&self) -> &str {
        match self {
            Instrument::Future { underlying, .. }
            | Instrument::Call { underlying, .. }
            | Instrument::Put { underlying, .. } => underlying,
        }
    }

    /// The subround whose cumulative sum this instrument settles against.
    pub fn target_subround(&self) -> u32 {
        match self {
            Instrument::Future {
                settle_subround, ..
            } => *settle_subround,
            Instrument::Call {
                expiry_subround, ..
            }
            | Instrument::Put {
                expiry_subround, ..
            } => *expiry_subround,
        }
    }

    /// Whether this is a future.
    pub fn is_future(&self) -> bool {
        matches!(self, Instrument::Future { .. })
    }
}

impl FromStr for Instrument {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        Instrument::parse(s)
    }
}

fn parse_subround(id: &str, field: &'static str, value: &str) -> ParseResult<u32> {
    value.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

fn parse_strike(id: &str, value: &str) -> ParseResult<f64> {
    let strike = value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        id: id.to_string(),
        field: "strike",
        value: value.to_string(),
    })?;
    // "NaN"/"inf" satisfy f64::from_str but are never a real strike
    if !strike.is_finite() {
        return Err(ParseError::InvalidNumber {
            id: id.to_string(),
            field: "strike",
            value: value.to_string(),
        });
    }
    Ok(strike)
}
