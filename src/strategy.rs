//! Depth-limited game tree search for the best column to play

use rand::seq::IteratorRandom;
use tracing::{debug, info};

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Player};
use crate::evaluator::{Evaluator, Score};

/// Score of a position the acting player has won
pub const WIN_SCORE: Score = f64::MAX;
/// Score of a position the opponent has won
pub const LOSS_SCORE: Score = f64::MIN;
/// Score of a full board without a winner
pub const DRAW_SCORE: Score = 0.0;

/// The available ways of choosing a move
#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum Algorithm {
    /// Plain minimax over every reply
    Minimax,
    /// Minimax with alpha-beta pruning, columns in left to right order
    AlphaBeta,
    /// Alpha-beta pruning trying central columns first
    AlphaBetaOrdered,
    /// Any open column, uniformly at random
    Random,
}

/// Returns the columns of a board ordered from the middle outwards, as
/// the middle columns are often better moves
pub fn move_order(columns: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..columns).collect();
    // twice the distance to the centre keeps even widths in whole numbers
    order.sort_by_key(|&column| (2 * column as isize - (columns as isize - 1)).abs());
    order
}

/// Chooses moves for the player a board is set up for
///
/// # Position Scoring
/// Leaves at the configured depth are scored by the [`Evaluator`]. A line of
/// four completed by the acting player scores [`WIN_SCORE`], one completed by the
/// opponent [`LOSS_SCORE`], and a full board [`DRAW_SCORE`].
///
/// # Depth
/// The depth counts the opponent replies searched below each root column: at
/// depth 0 every column is scored right after the acting player's disc, at depth
/// 1 after the opponent's best reply, and so on.
#[derive(Clone, Debug)]
pub struct Strategy {
    algorithm: Algorithm,
    evaluator: Evaluator,
    depth: usize,

    /// The number of discs explored while choosing the last move (for diagnostics only)
    pub node_count: usize,
    /// The score of the last chosen column, `None` when it was chosen at random
    pub last_score: Option<Score>,
}

impl Strategy {
    pub fn new(algorithm: Algorithm, evaluator: Evaluator, depth: usize) -> Self {
        Self {
            algorithm,
            evaluator,
            depth,
            node_count: 0,
            last_score: None,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Picks the column to play on `board`, or `None` if every column is full
    ///
    /// The board is used as scratch space during the search and is returned in
    /// the state it was passed in.
    pub fn next_move(&mut self, board: &mut Board) -> Option<usize> {
        self.node_count = 0;
        self.last_score = None;

        let ordering = match self.algorithm {
            Algorithm::Random => {
                let column = board.open_columns().choose(&mut rand::thread_rng());
                info!(?column, "chose a random column");
                return column;
            }
            Algorithm::AlphaBetaOrdered => true,
            Algorithm::Minimax | Algorithm::AlphaBeta => false,
        };

        self.evaluator.initialize_heuristics(board);
        let mut search = Search::new(board, &mut self.evaluator, self.depth, ordering);
        let best = match self.algorithm {
            Algorithm::Minimax => search.minimax_root(),
            _ => search.alpha_beta_root(),
        };
        self.node_count = search.node_count;

        let (column, score) = best?;
        self.last_score = Some(score);
        info!(
            column,
            score,
            nodes = self.node_count,
            algorithm = ?self.algorithm,
            depth = self.depth,
            "chose column"
        );
        Some(column)
    }
}

/// The state of one decision: the board and evaluator being explored
pub(crate) struct Search<'a> {
    board: &'a mut Board,
    evaluator: &'a mut Evaluator,
    depth: usize,
    ordering: bool,
    pub(crate) node_count: usize,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        board: &'a mut Board,
        evaluator: &'a mut Evaluator,
        depth: usize,
        ordering: bool,
    ) -> Self {
        Self {
            board,
            evaluator,
            depth,
            ordering,
            node_count: 0,
        }
    }

    /// Drops a disc for `player` into `column`; the disc is taken back when the
    /// returned explorer goes out of scope, on every path out of the caller
    pub(crate) fn explore(&mut self, player: Player, column: usize) -> Explorer<'_, 'a> {
        self.node_count += 1;
        let row = self.board.drop_disc(column, player);
        self.evaluator.after_move(&*self.board, player, row, column);
        Explorer {
            search: self,
            player,
            column,
            row,
        }
    }

    fn evaluate(&self) -> Score {
        self.evaluator.evaluate(&*self.board)
    }

    fn open_columns(&self) -> Vec<usize> {
        self.board.open_columns().collect()
    }

    fn ordered_open_columns(&self) -> Vec<usize> {
        move_order(self.board.columns())
            .into_iter()
            .filter(|&column| self.board.is_empty(0, column))
            .collect()
    }

    /// Score of the position after one of the acting player's root discs
    fn root_reply(&mut self, alpha: Score, beta: Score, pruning: bool) -> Score {
        if self.depth == 0 {
            self.evaluate()
        } else if pruning {
            self.alpha_beta_opponent(alpha, beta, 0)
        } else {
            self.minimax_opponent(0)
        }
    }

    pub(crate) fn minimax_root(&mut self) -> Option<(usize, Score)> {
        let mut best: Option<(usize, Score)> = None;
        for column in self.open_columns() {
            let mut explorer = self.explore(Player::Me, column);
            if explorer.is_win() {
                return Some((column, WIN_SCORE));
            }

            let score = explorer.root_reply(f64::NEG_INFINITY, f64::INFINITY, false);
            debug!(column, score, "root column scored");
            if best.map_or(true, |(_, highest)| highest < score) {
                best = Some((column, score));
            }
        }
        best
    }

    fn minimax_me(&mut self, current_depth: usize) -> Score {
        if current_depth == self.depth {
            return self.evaluate();
        }
        let columns = self.open_columns();
        if columns.is_empty() {
            return DRAW_SCORE;
        }

        let mut highest = f64::NEG_INFINITY;
        for column in columns {
            let mut explorer = self.explore(Player::Me, column);
            if explorer.is_win() {
                return WIN_SCORE;
            }
            let score = explorer.minimax_opponent(current_depth);
            if highest < score {
                highest = score;
            }
        }
        highest
    }

    fn minimax_opponent(&mut self, current_depth: usize) -> Score {
        let columns = self.open_columns();
        if columns.is_empty() {
            return DRAW_SCORE;
        }

        let mut lowest = f64::INFINITY;
        for column in columns {
            let mut explorer = self.explore(Player::Opponent, column);
            if explorer.is_win() {
                return LOSS_SCORE;
            }
            let score = explorer.minimax_me(current_depth + 1);
            if score < lowest {
                lowest = score;
            }
        }
        lowest
    }

    /// Top level of the alpha-beta search: every column is scored, nothing is
    /// pruned here so the reported column is the true best one
    pub(crate) fn alpha_beta_root(&mut self) -> Option<(usize, Score)> {
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;

        let mut best: Option<(usize, Score)> = None;
        for column in self.open_columns() {
            let mut explorer = self.explore(Player::Me, column);
            if explorer.is_win() {
                return Some((column, WIN_SCORE));
            }

            let score = explorer.root_reply(alpha, beta, true);
            debug!(column, score, "root column scored");
            // the acting player will get at least this score
            if alpha < score {
                alpha = score;
            }
            if best.map_or(true, |(_, highest)| highest < score) {
                best = Some((column, score));
            }
        }
        best
    }

    fn alpha_beta_me(&mut self, mut alpha: Score, beta: Score, current_depth: usize) -> Score {
        if current_depth == self.depth {
            return self.evaluate();
        }
        let columns = if self.ordering {
            self.ordered_open_columns()
        } else {
            self.open_columns()
        };
        if columns.is_empty() {
            return DRAW_SCORE;
        }

        let mut highest = f64::NEG_INFINITY;
        for column in columns {
            let mut explorer = self.explore(Player::Me, column);
            if explorer.is_win() {
                return WIN_SCORE;
            }

            let score = explorer.alpha_beta_opponent(alpha, beta, current_depth);
            if alpha < score {
                alpha = score;
            }
            // the opponent already has a branch that keeps the score at or below this
            if beta <= score {
                return score;
            }
            if highest < score {
                highest = score;
            }
        }
        highest
    }

    fn alpha_beta_opponent(&mut self, alpha: Score, mut beta: Score, current_depth: usize) -> Score {
        let columns = self.open_columns();
        if columns.is_empty() {
            return DRAW_SCORE;
        }

        let mut lowest = f64::INFINITY;
        for column in columns {
            let mut explorer = self.explore(Player::Opponent, column);
            if explorer.is_win() {
                return LOSS_SCORE;
            }

            let score = explorer.alpha_beta_me(alpha, beta, current_depth + 1);
            if score < beta {
                beta = score;
            }
            // the acting player already has a branch that guarantees at least this
            if score <= alpha {
                return score;
            }
            if score < lowest {
                lowest = score;
            }
        }
        lowest
    }
}

/// A speculative disc on the board, removed again when dropped
pub(crate) struct Explorer<'s, 'a> {
    search: &'s mut Search<'a>,
    player: Player,
    column: usize,
    row: usize,
}

impl Explorer<'_, '_> {
    /// Whether the explored disc completed four in a row
    pub(crate) fn is_win(&self) -> bool {
        self.search
            .board
            .has_four_in_a_row(self.player, self.row, self.column)
    }
}

impl<'a> Deref for Explorer<'_, 'a> {
    type Target = Search<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.search
    }
}

impl<'a> DerefMut for Explorer<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.search
    }
}

impl Drop for Explorer<'_, '_> {
    fn drop(&mut self) {
        let search = &mut *self.search;
        let row = search.board.remove_top_disc(self.column);
        debug_assert_eq!(row, self.row, "undo removed a different disc");
        search
            .evaluator
            .after_undo(&*search.board, self.player, self.row, self.column);
    }
}
