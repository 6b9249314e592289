//! The immutable [`Maze`] grid: cell kinds, parsing, neighbour queries.
//!
//! A maze is a rectangular grid of [`Cell`]s with exactly one start and one
//! goal. It never changes after construction; search and replay both treat it
//! as read-only shared input.

use std::fmt;

use crate::error::ConfigError;
use crate::position::Position;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// Kind of a single maze cell.
///
/// The character mapping (`X`/`.`/`A`/`B`) is shared by maze files and the
/// trace format's cell snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Wall,
    Open,
    Start,
    Goal,
}

impl Cell {
    /// The character this cell is written as.
    pub const fn to_char(self) -> char {
        match self {
            Cell::Wall => 'X',
            Cell::Open => '.',
            Cell::Start => 'A',
            Cell::Goal => 'B',
        }
    }

    /// Parse a cell character, or `None` if unrecognized.
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'X' => Some(Cell::Wall),
            '.' => Some(Cell::Open),
            'A' => Some(Cell::Start),
            'B' => Some(Cell::Goal),
            _ => None,
        }
    }

    /// Whether this cell blocks movement.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// ---------------------------------------------------------------------------
// Maze
// ---------------------------------------------------------------------------

/// An immutable rectangular maze with exactly one start and one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    start: Position,
    goal: Position,
}

impl Maze {
    /// Parse a maze from its text form, one character per cell.
    ///
    /// All rows must have the same length, and the grid must contain exactly
    /// one `A` and exactly one `B`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut cells = Vec::new();
        let mut rows = 0usize;
        let mut cols = 0usize;

        for (r, line) in text.lines().enumerate() {
            if r == 0 {
                cols = line.chars().count();
            }
            let mut len = 0usize;
            for (c, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(ConfigError::UnknownCell {
                    ch,
                    pos: Position::new(r as i32, c as i32),
                })?;
                cells.push(cell);
                len += 1;
            }
            if len != cols {
                return Err(ConfigError::Ragged {
                    row: r,
                    len,
                    expected: cols,
                });
            }
            rows += 1;
        }

        Self::from_cells(rows as i32, cols as i32, cells)
    }

    /// Build a maze from a row-major cell snapshot.
    pub fn from_cells(rows: i32, cols: i32, cells: Vec<Cell>) -> Result<Self, ConfigError> {
        if rows <= 0 || cols <= 0 || cells.len() != (rows * cols) as usize {
            return Err(ConfigError::Empty);
        }

        let mut start = None;
        let mut goal = None;
        for (i, &cell) in cells.iter().enumerate() {
            let pos = Position::new(i as i32 / cols, i as i32 % cols);
            match cell {
                Cell::Start => {
                    if start.is_some() {
                        return Err(ConfigError::DuplicateStart);
                    }
                    start = Some(pos);
                }
                Cell::Goal => {
                    if goal.is_some() {
                        return Err(ConfigError::DuplicateGoal);
                    }
                    goal = Some(pos);
                }
                _ => {}
            }
        }

        Ok(Self {
            rows,
            cols,
            cells,
            start: start.ok_or(ConfigError::MissingStart)?,
            goal: goal.ok_or(ConfigError::MissingGoal)?,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The unique start position.
    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    /// The unique goal position.
    #[inline]
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// The row-major cell snapshot.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Position) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn cell(&self, p: Position) -> Option<Cell> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[(p.row * self.cols + p.col) as usize])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_walkable(&self, p: Position) -> bool {
        matches!(self.cell(p), Some(c) if !c.is_wall())
    }

    /// Append the walkable cardinal neighbours of `p` into `buf`, in probe
    /// order. The caller clears `buf` before calling.
    pub fn walkable_neighbors(&self, p: Position, buf: &mut Vec<Position>) {
        for n in p.neighbors_4() {
            if self.is_walkable(n) {
                buf.push(n);
            }
        }
    }

    /// Count of non-wall cells.
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_wall()).count()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(f, "{}", self.cells[(r * self.cols + c) as usize])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_small_maze() {
        let maze = Maze::parse("A.X\n..B\n").unwrap();
        assert_eq!(maze.rows(), 2);
        assert_eq!(maze.cols(), 3);
        assert_eq!(maze.start(), Position::new(0, 0));
        assert_eq!(maze.goal(), Position::new(1, 2));
        assert_eq!(maze.cell(Position::new(0, 2)), Some(Cell::Wall));
        assert_eq!(maze.cell(Position::new(1, 0)), Some(Cell::Open));
    }

    #[test]
    fn parse_rejects_missing_endpoints() {
        assert_eq!(Maze::parse("..\n..\n"), Err(ConfigError::MissingStart));
        assert_eq!(Maze::parse("A.\n..\n"), Err(ConfigError::MissingGoal));
    }

    #[test]
    fn parse_rejects_duplicates() {
        assert_eq!(Maze::parse("AA\n.B\n"), Err(ConfigError::DuplicateStart));
        assert_eq!(Maze::parse("AB\nBB\n"), Err(ConfigError::DuplicateGoal));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert_eq!(
            Maze::parse("A..\n.B\n"),
            Err(ConfigError::Ragged {
                row: 1,
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn parse_rejects_unknown_character() {
        assert_eq!(
            Maze::parse("A?\n.B\n"),
            Err(ConfigError::UnknownCell {
                ch: '?',
                pos: Position::new(0, 1)
            })
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Maze::parse(""), Err(ConfigError::Empty));
    }

    #[test]
    fn walkable_neighbors_probe_order() {
        let maze = Maze::parse("A..\n.X.\n..B\n").unwrap();
        let mut buf = Vec::new();
        maze.walkable_neighbors(Position::new(1, 0), &mut buf);
        // Right is a wall; down and up remain, probed in that order.
        assert_eq!(buf, vec![Position::new(2, 0), Position::new(0, 0)]);
    }

    #[test]
    fn display_round_trips_text() {
        let text = "A.X\n..B\n";
        let maze = Maze::parse(text).unwrap();
        assert_eq!(maze.to_string(), text);
    }
}
