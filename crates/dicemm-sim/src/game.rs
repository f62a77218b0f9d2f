//! The simulated game loop.
//!
//! Reproduces the host's turn structure: publish training rolls, then
//! for each round ask the strategy for a book once per subround,
//! trade against it with a random counterparty, reveal the next roll,
//! and settle every open position at round end.

use anyhow::Result;
use dicemm_core::{GameConfig, GameSummary, Instrument, Positions, RoundInfo, RoundResult};
use dicemm_model::{RollEstimator, DICE_PER_SUBROUND};
use dicemm_quoter::DiceStrategy;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracing::{debug, info};

use crate::config::SimConfig;

pub struct GameSim {
    config: SimConfig,
    rng: Pcg64,
    strategy: DiceStrategy,
}

impl GameSim {
    pub fn new(config: SimConfig) -> Self {
        let rng = Pcg64::seed_from_u64(config.sim.seed);
        let strategy = DiceStrategy::new(config.quoter.clone());
        Self {
            config,
            rng,
            strategy,
        }
    }

    /// Play a full game and return the summary handed to the strategy.
    pub fn run(&mut self) -> Result<GameSummary> {
        self.strategy.on_game_start(&GameConfig {
            dice_sides: self.config.game.dice_sides,
            team_name: self.config.game.team_name.clone(),
        })?;

        let training: Vec<f64> = (0..self.config.sim.training_rolls)
            .map(|_| self.roll())
            .collect();
        info!(samples = training.len(), "training rolls published");

        let catalog = self.build_catalog();
        info!(instruments = catalog.len(), "catalog built");

        let mut total_pnl = 0.0;
        for round in 0..self.config.sim.rounds {
            let pnl = self.play_round(round, &training, &catalog);
            total_pnl += pnl;
            self.strategy
                .on_round_end(&RoundInfo { round, subround: 0 }, &RoundResult { pnl });
        }

        let summary = GameSummary {
            total_pnl,
            final_score: total_pnl,
        };
        self.strategy.on_game_end(&summary);
        Ok(summary)
    }

    /// One round: quote, get filled, reveal, repeat; then settle.
    fn play_round(&mut self, round: u32, training: &[f64], catalog: &[String]) -> f64 {
        let subrounds = self.config.sim.subrounds;
        let mut rolls: Vec<f64> = Vec::with_capacity(subrounds as usize);
        let mut positions = Positions::new();
        let mut cash = 0.0;

        for subround in 0..subrounds {
            let book = self.strategy.make_market(
                catalog,
                training,
                &rolls,
                &positions,
                &RoundInfo { round, subround },
            );

            for (id, quote) in &book.quotes {
                // counterparty lifts our offer: we are short one
                if self.rng.gen_bool(self.config.sim.fill_probability) {
                    cash += quote.ask;
                    *positions.entry(id.clone()).or_insert(0) -= 1;
                }
                // counterparty hits our bid: we are long one
                if self.rng.gen_bool(self.config.sim.fill_probability) {
                    cash -= quote.bid;
                    *positions.entry(id.clone()).or_insert(0) += 1;
                }
            }

            rolls.push(self.roll());
        }

        let settlement: f64 = positions
            .iter()
            .filter(|(_, qty)| **qty != 0)
            .filter_map(|(id, qty)| payoff(id, &rolls).map(|p| *qty as f64 * p))
            .sum();
        let pnl = cash + settlement;
        debug!(round, cash, settlement, pnl, "round complete");
        pnl
    }

    /// One aggregate roll: the sum of 2000 fair dice.
    fn roll(&mut self) -> f64 {
        let sides = self.config.game.dice_sides;
        (0..DICE_PER_SUBROUND)
            .map(|_| self.rng.gen_range(1..=sides) as f64)
            .sum()
    }

    /// Futures on every subround, calls and puts on the final expiry
    /// with a strike grid centered on the expected settlement sum.
    fn build_catalog(&self) -> Vec<String> {
        let sim = &self.config.sim;
        let mut catalog = Vec::new();
        for t in 1..=sim.subrounds {
            catalog.push(format!("S,F,{t}"));
        }

        let (mu0, _) = RollEstimator::new(self.config.game.dice_sides).prior();
        let center = (mu0 * sim.subrounds as f64 / sim.strike_step).round() * sim.strike_step;
        let side = sim.strikes_per_side as i64;
        for i in -side..=side {
            let strike = center + i as f64 * sim.strike_step;
            catalog.push(format!("S,C,{strike},{}", sim.subrounds));
            catalog.push(format!("S,P,{strike},{}", sim.subrounds));
        }
        catalog
    }
}

/// Settlement payoff of one held instrument, `None` for ids that fail
/// to parse (none are generated here, but positions are untrusted).
fn payoff(id: &str, rolls: &[f64]) -> Option<f64> {
    let inst = Instrument::parse(id).ok()?;
    let settle = |t: u32| -> f64 { rolls[..(t as usize).min(rolls.len())].iter().sum() };
    Some(match inst {
        Instrument::Future {
            settle_subround, ..
        } => settle(settle_subround),
        Instrument::Call {
            strike,
            expiry_subround,
            ..
        } => (settle(expiry_subround) - strike).max(0.0),
        Instrument::Put {
            strike,
            expiry_subround,
            ..
        } => (strike - settle(expiry_subround)).max(0.0),
    })
}
