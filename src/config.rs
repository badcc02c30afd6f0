//! Command line configuration for the playing agent

use anyhow::{bail, Result};
use clap::Parser;

use crate::evaluator::{Evaluator, EvaluatorKind};
use crate::strategy::{Algorithm, Strategy};

/// Search depth used unless configured otherwise
pub const DEFAULT_DEPTH: usize = 3;

/// Deepest search accepted, beyond this a single move takes minutes
pub const MAX_DEPTH: usize = 12;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "fourinarow",
    about = "Plays four in a row, reading the game from stdin and writing moves to stdout"
)]
pub struct Config {
    /// How moves are chosen
    #[arg(long, value_enum, default_value_t = Algorithm::AlphaBeta)]
    pub strategy: Algorithm,

    /// How positions at the search horizon are scored
    #[arg(long, value_enum, default_value_t = EvaluatorKind::Immediate)]
    pub evaluator: EvaluatorKind,

    /// Number of opponent replies searched below each candidate column
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Log filter for stderr, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Draw the board to stderr before every move
    #[arg(long)]
    pub show_board: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.depth > MAX_DEPTH {
            bail!(
                "search depth {} is too deep, the maximum is {}",
                self.depth,
                MAX_DEPTH
            );
        }
        Ok(())
    }

    /// Builds the configured strategy
    pub fn strategy(&self) -> Strategy {
        Strategy::new(self.strategy, Evaluator::new(self.evaluator), self.depth)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Algorithm::AlphaBeta,
            evaluator: EvaluatorKind::Immediate,
            depth: DEFAULT_DEPTH,
            log_level: "info".to_string(),
            show_board: false,
        }
    }
}
