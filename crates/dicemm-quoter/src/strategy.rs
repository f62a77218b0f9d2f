//! Game lifecycle adapter around the quote engine.
//!
//! The host drives a strategy through four hooks: game start, a
//! make-market call per subround, round end, game end. Only game start
//! can fail; everything after it degrades per instrument inside the
//! engine.

use dicemm_core::{GameConfig, GameSummary, Positions, RoundInfo, RoundResult};
use tracing::{info, warn};

use crate::config::QuoterConfig;
use crate::engine::{QuoteBook, QuoteEngine};
use crate::error::QuoterResult;

/// Market-making strategy for one game.
///
/// Constructed with quoting parameters, armed by `on_game_start`, then
/// queried once per subround.
#[derive(Debug)]
pub struct DiceStrategy {
    config: QuoterConfig,
    engine: Option<QuoteEngine>,
    team_name: String,
}

impl DiceStrategy {
    pub fn new(config: QuoterConfig) -> Self {
        Self {
            config,
            engine: None,
            team_name: String::new(),
        }
    }

    /// Arm the strategy with the game parameters. Rejects invalid
    /// configuration or a degenerate die; this is the only hook that
    /// can fail.
    pub fn on_game_start(&mut self, game: &GameConfig) -> QuoterResult<()> {
        let engine = QuoteEngine::new(self.config.clone(), game.dice_sides)?;
        self.engine = Some(engine);
        self.team_name = game.team_name.clone();
        info!(
            team = %self.team_name,
            dice_sides = game.dice_sides,
            "strategy armed"
        );
        Ok(())
    }

    /// Quote the catalog for one subround. Before `on_game_start` this
    /// returns an empty book rather than guessing at game parameters.
    pub fn make_market(
        &self,
        catalog: &[String],
        training_rolls: &[f64],
        current_rolls: &[f64],
        positions: &Positions,
        round_info: &RoundInfo,
    ) -> QuoteBook {
        match &self.engine {
            Some(engine) => {
                engine.make_market(catalog, training_rolls, current_rolls, positions, round_info)
            }
            None => {
                warn!("make_market called before game start, returning empty book");
                QuoteBook::default()
            }
        }
    }

    pub fn on_round_end(&self, round_info: &RoundInfo, result: &RoundResult) {
        info!(round = round_info.round, pnl = result.pnl, "round settled");
    }

    pub fn on_game_end(&self, summary: &GameSummary) {
        info!(
            team = %self.team_name,
            total_pnl = summary.total_pnl,
            final_score = summary.final_score,
            "game over"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(dice_sides: u32) -> GameConfig {
        GameConfig {
            dice_sides,
            team_name: "test".to_string(),
        }
    }

    #[test]
    fn test_empty_book_before_game_start() {
        let strategy = DiceStrategy::new(QuoterConfig::default());
        let book = strategy.make_market(
            &["S,F,3".to_string()],
            &[],
            &[],
            &Positions::new(),
            &RoundInfo::default(),
        );
        assert!(book.quotes.is_empty());
        assert!(book.skipped.is_empty());
    }

    #[test]
    fn test_game_start_rejects_degenerate_die() {
        let mut strategy = DiceStrategy::new(QuoterConfig::default());
        assert!(strategy.on_game_start(&game(1)).is_err());
        assert!(strategy.on_game_start(&game(6)).is_ok());
    }

    #[test]
    fn test_quotes_after_game_start() {
        let mut strategy = DiceStrategy::new(QuoterConfig::default());
        strategy.on_game_start(&game(6)).unwrap();
        let book = strategy.make_market(
            &["S,F,3".to_string()],
            &[],
            &[],
            &Positions::new(),
            &RoundInfo::default(),
        );
        assert_eq!(book.quotes.len(), 1);
    }
}
