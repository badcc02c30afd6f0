//! An agent for playing the board game 'Four in a Row'
//!
//! The agent searches a few moves ahead with minimax or alpha-beta pruning
//! and scores the positions it reaches with a heuristic evaluator.
//!
//! # Basic Usage
//!
//! ```
//! use fourinarow_ai::{Algorithm, Board, Evaluator, EvaluatorKind, Strategy};
//!
//!# fn main() -> fourinarow_ai::anyhow::Result<()> {
//! let mut board = Board::new();
//! board.set_my_id(1)?;
//! board.update_from_field(
//!     "0,0,0,0,0,0,0;0,0,0,0,0,0,0;0,0,0,0,0,0,0;0,0,0,0,0,0,0;0,0,0,0,0,0,0;0,0,1,1,1,0,0",
//! )?;
//!
//! let mut strategy = Strategy::new(Algorithm::AlphaBeta, Evaluator::new(EvaluatorKind::Immediate), 3);
//! let column = strategy.next_move(&mut board);
//!
//! assert_eq!(column, Some(1));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod location;

pub mod board;

pub mod evaluator;

pub mod immediate;

pub mod incremental;

pub mod strategy;

pub mod config;

pub mod session;


pub use board::{Board, Cell, Player};
pub use evaluator::{Evaluator, EvaluatorKind, Score};
pub use strategy::{Algorithm, Strategy};

/// The default width of the game board in tiles
pub const WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const HEIGHT: usize = 6;

// a board smaller than this cannot hold four in a row in every direction
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
