//! Position evaluation for the leaves of the search tree

use crate::board::{Board, Player};
use crate::immediate::{CellScope, ImmediateEvaluator};
use crate::incremental::IncrementalEvaluator;

/// A position score, positive when the position favours the acting player
pub type Score = f64;

/// The available evaluation functions
#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum EvaluatorKind {
    /// Four-space strengths over every cell, rescanned at each leaf
    Immediate,
    /// Four-space strengths over empty cells only, rescanned at each leaf
    ImmediateEmptyCells,
    /// Potential line lengths kept up to date move by move
    Incremental,
}

/// Scores positions for a [`Strategy`](crate::strategy::Strategy)
///
/// The search calls [`initialize_heuristics`](Evaluator::initialize_heuristics)
/// once per decision, then brackets every speculative disc with
/// [`after_move`](Evaluator::after_move) and [`after_undo`](Evaluator::after_undo)
/// so that stateful evaluators can follow the board.
#[derive(Clone, Debug)]
pub enum Evaluator {
    Immediate(ImmediateEvaluator),
    Incremental(IncrementalEvaluator),
}

impl Evaluator {
    pub fn new(kind: EvaluatorKind) -> Self {
        match kind {
            EvaluatorKind::Immediate => Evaluator::Immediate(ImmediateEvaluator::full()),
            EvaluatorKind::ImmediateEmptyCells => {
                Evaluator::Immediate(ImmediateEvaluator::empty_cells_only())
            }
            EvaluatorKind::Incremental => Evaluator::Incremental(IncrementalEvaluator::new()),
        }
    }

    pub fn kind(&self) -> EvaluatorKind {
        match self {
            Evaluator::Immediate(evaluator) => match evaluator.scope() {
                CellScope::AllCells => EvaluatorKind::Immediate,
                CellScope::EmptyCells => EvaluatorKind::ImmediateEmptyCells,
            },
            Evaluator::Incremental(_) => EvaluatorKind::Incremental,
        }
    }

    /// Rebuilds any auxiliary state from the whole board
    pub fn initialize_heuristics(&mut self, board: &Board) {
        match self {
            // recomputed from scratch in `evaluate`
            Evaluator::Immediate(_) => {}
            Evaluator::Incremental(evaluator) => evaluator.initialize(board),
        }
    }

    /// Follows a disc `player` just dropped at (row, column)
    pub fn after_move(&mut self, board: &Board, player: Player, row: usize, column: usize) {
        match self {
            Evaluator::Immediate(_) => {}
            Evaluator::Incremental(evaluator) => evaluator.after_move(board, player, row, column),
        }
    }

    /// Follows the removal of `player`'s disc from (row, column)
    pub fn after_undo(&mut self, board: &Board, player: Player, row: usize, column: usize) {
        match self {
            Evaluator::Immediate(_) => {}
            Evaluator::Incremental(evaluator) => evaluator.after_undo(board, player, row, column),
        }
    }

    pub fn evaluate(&self, board: &Board) -> Score {
        match self {
            Evaluator::Immediate(evaluator) => evaluator.evaluate(board),
            Evaluator::Incremental(evaluator) => evaluator.evaluate(board),
        }
    }
}
