//! Grid coordinates and the directions used to walk lines of discs

/// A cell position on the board, rows counted from the top and columns from the left
///
/// Coordinates are signed so that stepping off the edge of the board yields a
/// location that [`Board::contains`](crate::board::Board::contains) rejects,
/// rather than wrapping around.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub row: isize,
    pub column: isize,
}

impl Location {
    pub fn new(row: usize, column: usize) -> Self {
        Self {
            row: row as isize,
            column: column as isize,
        }
    }

    pub fn north(self) -> Self {
        Self {
            row: self.row - 1,
            ..self
        }
    }

    pub fn east(self) -> Self {
        Self {
            column: self.column + 1,
            ..self
        }
    }

    pub fn south(self) -> Self {
        Self {
            row: self.row + 1,
            ..self
        }
    }

    pub fn west(self) -> Self {
        Self {
            column: self.column - 1,
            ..self
        }
    }

    /// Returns the neighbouring location one step towards `heading`
    pub fn step(self, heading: Compass) -> Self {
        match heading {
            Compass::North => self.north(),
            Compass::NorthEast => self.north().east(),
            Compass::East => self.east(),
            Compass::SouthEast => self.south().east(),
            Compass::South => self.south(),
            Compass::SouthWest => self.south().west(),
            Compass::West => self.west(),
            Compass::NorthWest => self.north().west(),
        }
    }

    /// Number of steps between two locations on a common axis
    pub fn distance(self, other: Location) -> usize {
        let rows = (self.row - other.row).abs();
        let columns = (self.column - other.column).abs();
        rows.max(columns) as usize
    }
}

/// The eight directions a line of discs can extend in
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Compass {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// The four lines through a cell that can hold four in a row
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// top-left to bottom-right, `\`
    DownwardDiagonal,
    /// bottom-left to top-right, `/`
    UpwardDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DownwardDiagonal,
        Axis::UpwardDiagonal,
    ];

    /// The two opposite headings a line along this axis extends in
    pub fn headings(self) -> (Compass, Compass) {
        match self {
            Axis::Horizontal => (Compass::West, Compass::East),
            Axis::Vertical => (Compass::North, Compass::South),
            Axis::DownwardDiagonal => (Compass::NorthWest, Compass::SouthEast),
            Axis::UpwardDiagonal => (Compass::SouthWest, Compass::NorthEast),
        }
    }
}
