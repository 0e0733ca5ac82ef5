use std::fmt::Display;

/// A cell of the grid. Row `0` is the top of the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[allow(missing_docs)]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell one step away in `direction`, or `None` if that would leave the grid
    pub fn step(self, direction: Direction) -> Option<Self> {
        let Position { row, col } = self;

        Some(match direction {
            Direction::North => Position::new(row.checked_sub(1)?, col),
            Direction::South => Position::new(row + 1, col),
            Direction::East => Position::new(row, col + 1),
            Direction::West => Position::new(row, col.checked_sub(1)?),
            Direction::Stop => self,
        })
    }

    /// Manhattan distance
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The ways an agent can move. `Stop` stays in place, and is pacman's no-op action
#[allow(missing_docs)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction that actually moves
    pub const MOVES: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };

        write!(f, "{name}")
    }
}
