//! Evaluators that rescan the whole board at every leaf of the search
//!
//! Both variants score a player by the "strength" of every cell: the most discs
//! that player already has in any four-cell window through the cell which the
//! opponent has not blocked yet. Horizontal and diagonal windows are counted.
//! Vertical lines are left out since they are blocked with a single disc; the
//! search still sees vertical wins through its own win check.

use crate::board::{Board, Cell, Player};
use crate::evaluator::Score;
use crate::location::{Compass, Location};

// weights per row (top to bottom) for the player that will fill the board's last
// cell, and for the player that will not
const EVEN_ROW_WEIGHTS: [f64; 6] = [2.0, 1.0, 2.0, 1.0, 2.0, 1.0];
const ODD_ROW_WEIGHTS: [f64; 6] = [1.0, 2.0, 1.0, 2.0, 1.0, 2.0];

// finer variants of the above, lower rows break ties
const FINE_EVEN_ROW_WEIGHTS: [f64; 6] = [2.0, 1.0, 2.1, 1.1, 2.2, 1.2];
const FINE_ODD_ROW_WEIGHTS: [f64; 6] = [1.0, 2.0, 1.1, 2.1, 1.2, 2.2];

/// Headings of the windows that are scored, each window starting at its leftmost cell
const WINDOW_HEADINGS: [Compass; 3] = [Compass::East, Compass::SouthEast, Compass::NorthEast];

/// Which cells contribute their strength to the score
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CellScope {
    AllCells,
    EmptyCells,
}

#[derive(Clone, Debug)]
pub struct ImmediateEvaluator {
    scope: CellScope,
}

impl ImmediateEvaluator {
    /// Scores every cell, with whole-number row weights
    pub fn full() -> Self {
        Self {
            scope: CellScope::AllCells,
        }
    }

    /// Scores only cells that are still empty, with fractional row weights
    pub fn empty_cells_only() -> Self {
        Self {
            scope: CellScope::EmptyCells,
        }
    }

    pub fn scope(&self) -> CellScope {
        self.scope
    }

    pub fn evaluate(&self, board: &Board) -> Score {
        let (even, odd) = match self.scope {
            CellScope::AllCells => (&EVEN_ROW_WEIGHTS, &ODD_ROW_WEIGHTS),
            CellScope::EmptyCells => (&FINE_EVEN_ROW_WEIGHTS, &FINE_ODD_ROW_WEIGHTS),
        };
        // with an even number of empty cells left, the opponent of the player to
        // move places the last disc
        let (mine, theirs) = if board.empty_cells() % 2 == 0 {
            (even, odd)
        } else {
            (odd, even)
        };

        self.quadratic_strength(board, &StrengthTable::scan(board, Player::Me), mine)
            - self.quadratic_strength(board, &StrengthTable::scan(board, Player::Opponent), theirs)
    }

    fn quadratic_strength(&self, board: &Board, strengths: &StrengthTable, weights: &[f64; 6]) -> Score {
        let mut total = 0.0;
        for row in 0..board.rows() {
            for column in 0..board.columns() {
                if self.scope == CellScope::EmptyCells && !board.is_empty(row, column) {
                    continue;
                }
                let strength = strengths.get(row, column) as f64;
                total += strength * strength * weights[row % weights.len()];
            }
        }
        total
    }
}

/// Per-cell strength of one player
#[derive(Clone, Debug)]
pub struct StrengthTable {
    columns: usize,
    strengths: Vec<u32>,
}

impl StrengthTable {
    /// Scans every horizontal and diagonal four-cell window on the board
    pub fn scan(board: &Board, player: Player) -> Self {
        let mut table = Self {
            columns: board.columns(),
            strengths: vec![0; board.rows() * board.columns()],
        };

        for &heading in WINDOW_HEADINGS.iter() {
            for row in 0..board.rows() {
                for column in 0..board.columns() {
                    let start = Location::new(row, column);
                    if let Some(discs) = window_discs(board, player, start, heading) {
                        table.raise_window(start, heading, discs);
                    }
                }
            }
        }
        table
    }

    pub fn get(&self, row: usize, column: usize) -> u32 {
        self.strengths[row * self.columns + column]
    }

    fn raise_window(&mut self, start: Location, heading: Compass, discs: u32) {
        let mut location = start;
        for _ in 0..4 {
            let index = location.row as usize * self.columns + location.column as usize;
            self.strengths[index] = self.strengths[index].max(discs);
            location = location.step(heading);
        }
    }
}

/// Number of `player`'s discs in the window of four cells from `start` towards
/// `heading`, or `None` if the window leaves the board or the opponent holds a cell
fn window_discs(board: &Board, player: Player, start: Location, heading: Compass) -> Option<u32> {
    let mut discs = 0;
    let mut location = start;
    for _ in 0..4 {
        match board.cell_at(location)? {
            Cell::Disc(owner) if owner == player => discs += 1,
            Cell::Disc(_) => return None,
            Cell::Empty => {}
        }
        location = location.step(heading);
    }
    Some(discs)
}
