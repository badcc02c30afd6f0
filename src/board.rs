//! The playing field: a grid of stacked columns and the line geometry around each cell

use anyhow::{anyhow, bail, Context, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::Write;

use crate::location::{Axis, Compass, Location};
use crate::{HEIGHT, WIDTH};

/// The raw value of an empty cell in a field snapshot
pub const NO_DISC: u8 = 0;

/// The two player ids a field snapshot may contain
pub const PLAYER_IDS: [u8; 2] = [1, 2];

/// The side a disc belongs to, relative to the player the agent is acting for
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    Me,
    Opponent,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::Me, Player::Opponent];

    /// Slot of this player in per-player tables
    pub fn index(self) -> usize {
        match self {
            Player::Me => 0,
            Player::Opponent => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Player::Me => Player::Opponent,
            Player::Opponent => Player::Me,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Disc(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A rectangular grid of columns that discs drop into
///
/// Rows are numbered from the top (row 0) down, columns from the left. Every
/// column is a stack: the cells above the highest disc in a column are always
/// empty. [`drop_disc`](Board::drop_disc) and [`remove_top_disc`](Board::remove_top_disc)
/// keep it that way, and [`update`](Board::update) refuses snapshots that break it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    rows: usize,
    columns: usize,
    // cells are stored row by row, top to bottom
    cells: Vec<Cell>,
    my_id: Option<u8>,
}

impl Board {
    /// Creates an empty board of the default dimensions
    pub fn new() -> Self {
        Self::with_size(HEIGHT, WIDTH)
    }

    /// Creates an empty board of the given dimensions
    pub fn with_size(rows: usize, columns: usize) -> Self {
        assert!(
            rows > 0 && columns > 0,
            "a board needs at least one row and one column, got {}x{}",
            rows,
            columns
        );
        Self {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
            my_id: None,
        }
    }

    /// Assigns the id of the player the agent acts for, the opponent takes the other id
    ///
    /// Discs already on the board keep their raw ids, so switching sides swaps
    /// which of them count as the agent's.
    pub fn set_my_id(&mut self, id: u8) -> Result<()> {
        if !PLAYER_IDS.contains(&id) {
            bail!(
                "invalid player id {}, expected one of {:?}",
                id,
                PLAYER_IDS
            );
        }
        if self.my_id.map_or(false, |old| old != id) {
            for cell in self.cells.iter_mut() {
                if let Cell::Disc(player) = *cell {
                    *cell = Cell::Disc(player.other());
                }
            }
        }
        self.my_id = Some(id);
        Ok(())
    }

    pub fn my_id(&self) -> Option<u8> {
        self.my_id
    }

    pub fn opponent_id(&self) -> Option<u8> {
        self.id_of(Player::Opponent)
    }

    /// The raw id of `player`, once the acting id has been assigned
    pub fn id_of(&self, player: Player) -> Option<u8> {
        let me = self.my_id?;
        Some(match player {
            Player::Me => me,
            Player::Opponent => {
                if me == PLAYER_IDS[0] {
                    PLAYER_IDS[1]
                } else {
                    PLAYER_IDS[0]
                }
            }
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn last_column(&self) -> usize {
        self.columns - 1
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    pub fn is_empty(&self, row: usize, column: usize) -> bool {
        self.cell(row, column).is_empty()
    }

    pub fn is_player(&self, player: Player, row: usize, column: usize) -> bool {
        self.cell(row, column) == Cell::Disc(player)
    }

    /// Whether `location` lies on the board
    pub fn contains(&self, location: Location) -> bool {
        location.row >= 0
            && location.column >= 0
            && (location.row as usize) < self.rows
            && (location.column as usize) < self.columns
    }

    /// The cell at `location`, or `None` off the board
    pub fn cell_at(&self, location: Location) -> Option<Cell> {
        if self.contains(location) {
            Some(self.cell(location.row as usize, location.column as usize))
        } else {
            None
        }
    }

    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({}, {}) is outside the {}x{} board",
            row,
            column,
            self.rows,
            self.columns
        );
        row * self.columns + column
    }

    /// Replaces every cell with the contents of a field snapshot
    ///
    /// The snapshot must match the board's dimensions, hold only empty cells and
    /// the two player ids, and have no disc floating above an empty cell. The board
    /// is left untouched when the snapshot is rejected.
    pub fn update(&mut self, field: &[Vec<u8>]) -> Result<()> {
        let me = self
            .my_id
            .ok_or_else(|| anyhow!("player id must be assigned before the field"))?;

        if field.len() != self.rows {
            bail!(
                "field has {} rows, board has {}",
                field.len(),
                self.rows
            );
        }

        let mut cells = Vec::with_capacity(self.rows * self.columns);
        for (row, values) in field.iter().enumerate() {
            if values.len() != self.columns {
                bail!(
                    "field row {} has {} columns, board has {}",
                    row,
                    values.len(),
                    self.columns
                );
            }
            for (column, &value) in values.iter().enumerate() {
                let cell = match value {
                    NO_DISC => Cell::Empty,
                    id if id == me => Cell::Disc(Player::Me),
                    id if PLAYER_IDS.contains(&id) => Cell::Disc(Player::Opponent),
                    id => bail!("unknown player id {} at ({}, {})", id, row, column),
                };
                cells.push(cell);
            }
        }

        // a disc must never sit on top of an empty cell
        for column in 0..self.columns {
            let mut seen_disc = false;
            for row in 0..self.rows {
                match cells[row * self.columns + column] {
                    Cell::Empty if seen_disc => {
                        bail!("floating disc in column {} above row {}", column, row)
                    }
                    Cell::Empty => {}
                    Cell::Disc(_) => seen_disc = true,
                }
            }
        }

        self.cells = cells;
        Ok(())
    }

    /// Parses and applies a field in the `a,b,c;d,e,f` snapshot format
    pub fn update_from_field(&mut self, field: &str) -> Result<()> {
        let field = parse_field(field)?;
        self.update(&field)
    }

    /// Columns whose top cell is still empty, from left to right
    pub fn open_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.columns).filter(move |&column| self.is_empty(0, column))
    }

    pub fn is_full(&self) -> bool {
        self.open_columns().next().is_none()
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Row of the highest disc in `column`, or the row count when it is empty
    pub fn top_disc_row(&self, column: usize) -> usize {
        (0..self.rows)
            .find(|&row| !self.is_empty(row, column))
            .unwrap_or(self.rows)
    }

    /// Row the next disc dropped into `column` would land in
    pub fn lowest_empty_row(&self, column: usize) -> Option<usize> {
        self.top_disc_row(column).checked_sub(1)
    }

    /// Drops a disc for `player` into `column`, returning the row it landed in
    ///
    /// # Panics
    /// If the column is full. Only columns from [`open_columns`](Board::open_columns)
    /// may be played.
    pub fn drop_disc(&mut self, column: usize, player: Player) -> usize {
        let row = match self.lowest_empty_row(column) {
            Some(row) => row,
            None => panic!("invalid move, column {} is full", column),
        };
        let index = self.index(row, column);
        self.cells[index] = Cell::Disc(player);
        row
    }

    /// Checked version of [`drop_disc`](Board::drop_disc) for moves that come from outside the search
    pub fn try_drop_disc(&mut self, column: usize, player: Player) -> Result<usize> {
        if column >= self.columns {
            bail!(
                "invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                self.last_column()
            );
        }
        if !self.is_empty(0, column) {
            bail!("invalid move, column {} full", column);
        }
        Ok(self.drop_disc(column, player))
    }

    /// Removes the highest disc in `column`, returning the row it was taken from
    ///
    /// # Panics
    /// If the column is empty.
    pub fn remove_top_disc(&mut self, column: usize) -> usize {
        let row = self.top_disc_row(column);
        assert!(row < self.rows, "invalid undo, column {} is empty", column);
        let index = self.index(row, column);
        self.cells[index] = Cell::Empty;
        row
    }

    /// Walks from (row, column) towards `heading` over `player`'s discs and
    /// returns the last location reached
    ///
    /// The starting cell itself is not inspected, so this also answers how far a
    /// line would reach if `player` dropped a disc there.
    pub fn line_end(&self, player: Player, row: usize, column: usize, heading: Compass) -> Location {
        let mut end = Location::new(row, column);
        assert!(
            self.contains(end),
            "line end requested from ({}, {}) outside the board",
            row,
            column
        );
        loop {
            let next = end.step(heading);
            match self.cell_at(next) {
                Some(Cell::Disc(owner)) if owner == player => end = next,
                _ => return end,
            }
        }
    }

    /// Length of `player`'s line through (row, column) along one axis
    pub fn axis_length(&self, player: Player, row: usize, column: usize, axis: Axis) -> usize {
        let (near, far) = axis.headings();
        let start = self.line_end(player, row, column, near);
        let end = self.line_end(player, row, column, far);
        1 + start.distance(end)
    }

    /// The longest line `player` has, or would have, through (row, column) on any axis
    pub fn potential_length(&self, player: Player, row: usize, column: usize) -> usize {
        Axis::ALL
            .iter()
            .map(|&axis| self.axis_length(player, row, column, axis))
            .max()
            .unwrap_or(1)
    }

    /// Whether the disc at (row, column) belongs to `player` and completes four in a row
    ///
    /// Only the cell that was just played needs checking: a new disc can only
    /// complete lines that pass through it.
    pub fn has_four_in_a_row(&self, player: Player, row: usize, column: usize) -> bool {
        self.is_player(player, row, column)
            && Axis::ALL
                .iter()
                .any(|&axis| self.axis_length(player, row, column, axis) >= 4)
    }

    fn display_id(&self, cell: Cell) -> u8 {
        match cell {
            Cell::Empty => NO_DISC,
            Cell::Disc(player) => self
                .id_of(player)
                .unwrap_or(PLAYER_IDS[player.index()]),
        }
    }

    /// Draws the board with coloured discs, column numbers on top
    pub fn display<W: Write>(&self, out: &mut W) -> Result<()> {
        let columns: String = (0..self.columns).map(|x| (x % 10).to_string()).collect();
        out.queue(PrintStyledContent(style(columns + "\n")))?;

        for row in 0..self.rows {
            for column in 0..self.columns {
                out.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match self.cell(row, column) {
                            Cell::Disc(Player::Me) => Color::Red,
                            Cell::Disc(Player::Opponent) => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            out.queue(PrintStyledContent(style("\n")))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for column in 0..self.columns {
                write!(f, "{} ", self.display_id(self.cell(row, column)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses a field snapshot: rows top to bottom separated by `;`, cells by `,`
pub fn parse_field(field: &str) -> Result<Vec<Vec<u8>>> {
    field
        .split(';')
        .enumerate()
        .map(|(row, cells)| {
            cells
                .split(',')
                .map(|value| {
                    value
                        .trim()
                        .parse::<u8>()
                        .with_context(|| format!("could not parse '{}' in field row {}", value, row))
                })
                .collect()
        })
        .collect()
}
