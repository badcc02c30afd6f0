//! An evaluator that keeps per-cell line lengths up to date move by move
//!
//! For both players the evaluator stores the [potential length] of the empty
//! cells that can plausibly be played soon. A column is tracked from its lowest
//! empty cell upwards for as long as each cell is on the bottom row or has a disc
//! diagonally below it; every other cell holds 0. A disc can only change that
//! for its own column and the two next to it, plus the empty cells just past
//! the ends of its own lines, so move and undo refresh exactly those cells and
//! the tables always match a fresh scan of the board.
//!
//! [potential length]: crate::board::Board::potential_length

use tracing::trace;

use crate::board::{Board, Cell, Player};
use crate::evaluator::Score;
use crate::location::{Axis, Location};

/// Weight of the squared potential lengths relative to disc placement
const LENGTH_WEIGHT: f64 = 10.0;

#[derive(Clone, Debug, Default)]
pub struct IncrementalEvaluator {
    rows: usize,
    columns: usize,
    // potential lengths per player, row by row
    lengths: [Vec<u32>; 2],
    // lowest empty row of every column, `None` once the column is full
    free_rows: Vec<Option<usize>>,
}

impl IncrementalEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every table from `board`
    pub fn initialize(&mut self, board: &Board) {
        self.rows = board.rows();
        self.columns = board.columns();
        self.free_rows = (0..self.columns)
            .map(|column| board.lowest_empty_row(column))
            .collect();
        self.lengths = [
            vec![0; self.rows * self.columns],
            vec![0; self.rows * self.columns],
        ];
        for column in 0..self.columns {
            self.refresh_column(board, column);
        }
        trace!(free_rows = ?self.free_rows, "incremental heuristics initialised");
    }

    /// Called right after `player` dropped a disc at (row, column)
    pub fn after_move(&mut self, board: &Board, player: Player, row: usize, column: usize) {
        self.free_rows[column] = row.checked_sub(1);
        let index = self.index(row, column);
        for &side in Player::BOTH.iter() {
            self.lengths[side.index()][index] = 0;
        }
        self.refresh_line_ends(board, player, row, column);
        self.refresh_neighbourhood(board, column);
    }

    /// Called right after `player`'s disc at (row, column) was removed again
    pub fn after_undo(&mut self, board: &Board, player: Player, row: usize, column: usize) {
        self.free_rows[column] = Some(row);
        let tracked = self.is_tracked(board, row, column);
        let index = self.index(row, column);
        for &side in Player::BOTH.iter() {
            self.lengths[side.index()][index] = if tracked {
                board.potential_length(side, row, column) as u32
            } else {
                0
            };
        }
        self.refresh_line_ends(board, player, row, column);
        self.refresh_neighbourhood(board, column);
    }

    /// Potential length stored for `player` at (row, column)
    pub fn length(&self, player: Player, row: usize, column: usize) -> u32 {
        self.lengths[player.index()][self.index(row, column)]
    }

    pub fn free_row(&self, column: usize) -> Option<usize> {
        self.free_rows[column]
    }

    pub fn evaluate(&self, board: &Board) -> Score {
        let centre = (self.columns as f64 - 1.0) / 2.0;
        let mut score = 0.0;

        for column in 0..self.columns {
            // discs nearer the centre take part in more lines
            let centrality = centre + 1.0 - (column as f64 - centre).abs();
            let first_disc = self.free_rows[column].map_or(0, |free| free + 1);
            for row in first_disc..self.rows {
                match board.cell(row, column) {
                    Cell::Disc(Player::Me) => score += centrality,
                    Cell::Disc(Player::Opponent) => score -= centrality,
                    Cell::Empty => {}
                }
            }

            // lengths count above the lowest empty cell, not at it
            if let Some(free) = self.free_rows[column] {
                for row in 0..free {
                    let mine = self.length(Player::Me, row, column) as f64;
                    let theirs = self.length(Player::Opponent, row, column) as f64;
                    score += LENGTH_WEIGHT * (mine * mine - theirs * theirs);
                }
            }
        }
        score
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Whether a cell is on the bottom row or rests diagonally on a disc
    fn is_reachable(&self, board: &Board, row: usize, column: usize) -> bool {
        if row == self.rows - 1 {
            return true;
        }
        let below = Location::new(row, column).south();
        [below.west(), below.east()]
            .iter()
            .any(|&location| matches!(board.cell_at(location), Some(Cell::Disc(_))))
    }

    fn is_tracked(&self, board: &Board, row: usize, column: usize) -> bool {
        match self.free_rows[column] {
            Some(free) if row <= free => {
                (row..=free).all(|chain_row| self.is_reachable(board, chain_row, column))
            }
            _ => false,
        }
    }

    /// Recomputes a whole column, walking up from its lowest empty cell
    fn refresh_column(&mut self, board: &Board, column: usize) {
        for row in 0..self.rows {
            let index = self.index(row, column);
            self.lengths[0][index] = 0;
            self.lengths[1][index] = 0;
        }

        let mut row = match self.free_rows[column] {
            Some(row) => row,
            None => return,
        };
        while self.is_reachable(board, row, column) {
            let index = self.index(row, column);
            for &side in Player::BOTH.iter() {
                self.lengths[side.index()][index] = board.potential_length(side, row, column) as u32;
            }
            if row == 0 {
                break;
            }
            row -= 1;
        }
    }

    /// Refreshes the columns whose tracked cells a disc in `column` can change
    fn refresh_neighbourhood(&mut self, board: &Board, column: usize) {
        let last = (column + 1).min(self.columns - 1);
        for neighbour in column.saturating_sub(1)..=last {
            self.refresh_column(board, neighbour);
        }
    }

    /// Recomputes `player`'s length at the empty cells just past each end of
    /// `player`'s lines through (row, column)
    fn refresh_line_ends(&mut self, board: &Board, player: Player, row: usize, column: usize) {
        for &axis in Axis::ALL.iter() {
            let (near, far) = axis.headings();
            for &heading in [near, far].iter() {
                let beyond = board.line_end(player, row, column, heading).step(heading);
                if board.cell_at(beyond) != Some(Cell::Empty) {
                    continue;
                }
                let (end_row, end_column) = (beyond.row as usize, beyond.column as usize);
                let length = if self.is_tracked(board, end_row, end_column) {
                    board.potential_length(player, end_row, end_column) as u32
                } else {
                    0
                };
                let index = self.index(end_row, end_column);
                self.lengths[player.index()][index] = length;
            }
        }
    }
}
