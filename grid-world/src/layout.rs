use std::str::FromStr;

use thiserror::Error;

use crate::Position;

/// Why a layout could not be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("the layout is empty")]
    #[allow(missing_docs)]
    Empty,
    #[error("row {row} is {found} cells wide, but the first row is {expected}")]
    #[allow(missing_docs)]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    #[allow(missing_docs)]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("the layout has no pacman")]
    #[allow(missing_docs)]
    NoPacman,
    #[error("the layout has more than one pacman, the second is at {0:?}")]
    #[allow(missing_docs)]
    MultiplePacmen(Position),
}

/// A parsed layout: the static walls plus where everything starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) walls: Vec<bool>,
    pub(crate) food: Vec<bool>,
    pub(crate) pacman: Position,
    pub(crate) ghosts: Vec<Position>,
}

impl Layout {
    #[allow(missing_docs)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of ghosts, the game has one more agent than this
    pub fn ghost_count(&self) -> usize {
        self.ghosts.len()
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .trim_end_matches(['\n', '\r'])
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();

        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LayoutError::Empty),
        };
        let height = rows.len();

        let mut walls = vec![false; width * height];
        let mut food = vec![false; width * height];
        let mut pacman = None;
        let mut ghosts = vec![];

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LayoutError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }

            for (col, glyph) in cells.iter().enumerate() {
                let index = row * width + col;
                let position = Position::new(row, col);

                match glyph {
                    '%' => walls[index] = true,
                    '.' => food[index] = true,
                    'P' => {
                        if pacman.replace(position).is_some() {
                            return Err(LayoutError::MultiplePacmen(position));
                        }
                    }
                    'G' => ghosts.push(position),
                    ' ' => {}
                    _ => {
                        return Err(LayoutError::UnknownGlyph {
                            glyph: *glyph,
                            row,
                            col,
                        })
                    }
                }
            }
        }

        Ok(Layout {
            width,
            height,
            walls,
            food,
            pacman: pacman.ok_or(LayoutError::NoPacman)?,
            ghosts,
        })
    }
}
