//! Per-subround quote orchestration.
//!
//! `QuoteEngine::make_market` is the single entry point the host calls
//! each subround. It is a pure function of its inputs: parse the
//! catalog, estimate the forward distribution, quote every future,
//! select and quote option strikes, and return the assembled book. No
//! instrument-level failure ever escapes the call; failed or filtered
//! instruments land in `QuoteBook::skipped` with a typed reason.

use std::collections::HashMap;

use dicemm_core::{Instrument, ParseError, Positions, Quote, RoundInfo};
use dicemm_model::{call_value, future_fair, put_value, ModelError, RollEstimator, RollStats};
use tracing::{debug, warn};

use crate::config::QuoterConfig;
use crate::error::{QuoterError, QuoterResult};
use crate::skew::{futures_mid, instrument_position, net_delta_exposure, option_mid};
use crate::spread::{futures_half_spread, option_half_spread};
use crate::strikes::{select_strikes, StrikeLevel};

/// Why an instrument was left out of the quote book.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The id did not parse; the rest of the catalog is unaffected.
    Parse(ParseError),
    /// Pricing produced a non-finite value.
    Price(ModelError),
    /// Option strike outside the selection window or beyond the
    /// per-group cap. Policy, not failure.
    Filtered,
}

/// An instrument that was attempted but not quoted this subround. The
/// host reads an absent entry as "no market made".
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedInstrument {
    pub id: String,
    pub reason: SkipReason,
}

/// Quotes for one subround plus the instruments left unquoted, so
/// every catalog entry is accounted for exactly once.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QuoteBook {
    pub quotes: HashMap<String, Quote>,
    pub skipped: Vec<SkippedInstrument>,
}

impl QuoteBook {
    fn skip(&mut self, id: &str, reason: SkipReason) {
        self.skipped.push(SkippedInstrument {
            id: id.to_string(),
            reason,
        });
    }
}

/// One parsed future awaiting a quote.
struct FutureEntry {
    id: String,
    settle_subround: u32,
}

/// Options grouped per (underlying, expiry) at (strike, expiry)
/// granularity, so a selected level quotes call and put together.
type OptionGroups = HashMap<(String, u32), Vec<StrikeLevel>>;

/// The per-subround quoting engine. Configuration is immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    config: QuoterConfig,
    estimator: RollEstimator,
}

impl QuoteEngine {
    /// Build an engine for a game. Fails only on invalid configuration.
    pub fn new(config: QuoterConfig, dice_sides: u32) -> QuoterResult<Self> {
        config.validate()?;
        if dice_sides < 2 {
            return Err(QuoterError::InvalidConfig(format!(
                "dice_sides must be at least 2, got {dice_sides}"
            )));
        }
        Ok(Self {
            config,
            estimator: RollEstimator::new(dice_sides),
        })
    }

    /// Produce firm two-sided quotes for one subround.
    ///
    /// Futures are quoted unconditionally; options pass through strike
    /// selection first. The catalog is re-parsed on every call — the
    /// host may change it between rounds.
    pub fn make_market(
        &self,
        catalog: &[String],
        training_rolls: &[f64],
        current_rolls: &[f64],
        positions: &Positions,
        round_info: &RoundInfo,
    ) -> QuoteBook {
        let mut book = QuoteBook::default();
        let stats = self.estimator.pooled_stats(training_rolls, current_rolls);

        let (futures, groups) = self.classify(catalog, &mut book);
        self.quote_futures(&futures, stats, current_rolls, positions, &mut book);
        self.quote_options(groups, stats, current_rolls, positions, &mut book);

        debug!(
            subround = round_info.subround,
            quoted = book.quotes.len(),
            skipped = book.skipped.len(),
            from_prior = stats.from_prior,
            "made market"
        );
        book
    }

    /// Parse and classify the catalog. Parse failures are recorded and
    /// skipped without affecting the rest.
    fn classify(&self, catalog: &[String], book: &mut QuoteBook) -> (Vec<FutureEntry>, OptionGroups) {
        let mut futures = Vec::new();
        let mut groups: OptionGroups = HashMap::new();

        for id in catalog {
            match Instrument::parse(id) {
                Ok(Instrument::Future {
                    settle_subround, ..
                }) => futures.push(FutureEntry {
                    id: id.clone(),
                    settle_subround,
                }),
                Ok(Instrument::Call {
                    underlying,
                    strike,
                    expiry_subround,
                }) => {
                    let level =
                        level_for(&mut groups, underlying, strike, expiry_subround);
                    level.call_id = Some(id.clone());
                }
                Ok(Instrument::Put {
                    underlying,
                    strike,
                    expiry_subround,
                }) => {
                    let level =
                        level_for(&mut groups, underlying, strike, expiry_subround);
                    level.put_id = Some(id.clone());
                }
                Err(err) => {
                    warn!(%id, %err, "skipping unparseable product id");
                    book.skip(id, SkipReason::Parse(err));
                }
            }
        }
        (futures, groups)
    }

    fn quote_futures(
        &self,
        futures: &[FutureEntry],
        stats: RollStats,
        current_rolls: &[f64],
        positions: &Positions,
        book: &mut QuoteBook,
    ) {
        for future in futures {
            let dist = self
                .estimator
                .settlement(stats, current_rolls, future.settle_subround);
            let fair = match future_fair(dist) {
                Ok(fair) => fair,
                Err(err) => {
                    warn!(id = %future.id, %err, "skipping future on pricing failure");
                    book.skip(&future.id, SkipReason::Price(err));
                    continue;
                }
            };
            let net = instrument_position(positions, &future.id);
            let mid = futures_mid(&self.config, fair, net);
            let half = futures_half_spread(&self.config, dist.sigma());
            self.emit(&future.id, mid, half, book);
        }
    }

    fn quote_options(
        &self,
        groups: OptionGroups,
        stats: RollStats,
        current_rolls: &[f64],
        positions: &Positions,
        book: &mut QuoteBook,
    ) {
        // One delta-exposure figure per underlying, shared by every
        // quoted option on it.
        let mut exposures: HashMap<String, f64> = HashMap::new();

        for ((underlying, expiry), levels) in sorted_groups(groups) {
            let dist = self.estimator.settlement(stats, current_rolls, expiry);
            let selected = select_strikes(&self.config, dist, levels.clone());

            for level in &levels {
                if !selected.contains(level) {
                    for id in level.call_id.iter().chain(level.put_id.iter()) {
                        book.skip(id, SkipReason::Filtered);
                    }
                }
            }

            if selected.is_empty() {
                continue;
            }

            let exposure = *exposures.entry(underlying.clone()).or_insert_with(|| {
                net_delta_exposure(&underlying, positions, &self.estimator, stats, current_rolls)
            });

            for level in selected {
                let half = option_half_spread(&self.config, dist, level.strike);

                if let Some(id) = &level.call_id {
                    match call_value(dist, level.strike) {
                        Ok(value) => {
                            let mid = option_mid(&self.config, value.price, exposure);
                            self.emit(id, mid, half, book);
                        }
                        Err(err) => {
                            warn!(%id, %err, "skipping call on pricing failure");
                            book.skip(id, SkipReason::Price(err));
                        }
                    }
                }
                if let Some(id) = &level.put_id {
                    match put_value(dist, level.strike) {
                        Ok(value) => {
                            let mid = option_mid(&self.config, value.price, exposure);
                            self.emit(id, mid, half, book);
                        }
                        Err(err) => {
                            warn!(%id, %err, "skipping put on pricing failure");
                            book.skip(id, SkipReason::Price(err));
                        }
                    }
                }
            }
        }
    }

    /// Assemble and record a quote. The half-spread is floored at half
    /// the base tick so `bid < ask` survives any skew magnitude.
    fn emit(&self, id: &str, mid: f64, half_spread: f64, book: &mut QuoteBook) {
        let half = half_spread.max(self.config.base_tick / 2.0);
        let quote = Quote::new(mid - half, mid + half);
        if quote.is_well_formed() {
            book.quotes.insert(id.to_string(), quote);
        } else {
            warn!(%id, ?quote, "dropping malformed quote");
            book.skip(
                id,
                SkipReason::Price(ModelError::NonFinite {
                    context: "quote mid",
                    value: mid,
                }),
            );
        }
    }
}

fn level_for(
    groups: &mut OptionGroups,
    underlying: String,
    strike: f64,
    expiry_subround: u32,
) -> &mut StrikeLevel {
    let levels = groups.entry((underlying, expiry_subround)).or_default();
    let idx = match levels.iter().position(|l| l.strike == strike) {
        Some(idx) => idx,
        None => {
            levels.push(StrikeLevel::new(strike, expiry_subround));
            levels.len() - 1
        }
    };
    &mut levels[idx]
}

/// Iterate groups in a stable order so the skipped list is
/// reproducible for identical inputs.
fn sorted_groups(groups: OptionGroups) -> Vec<((String, u32), Vec<StrikeLevel>)> {
    let mut entries: Vec<_> = groups.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}
