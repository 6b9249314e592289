//! Geometry primitive: [`Position`].

use std::fmt;

/// A grid coordinate as a (row, column) pair. Rows grow downward, columns
/// grow to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The four cardinal neighbours, in the fixed probe order right, down,
    /// left, up. Event streams recorded during search depend on this order,
    /// so it is part of the trace format's determinism contract.
    #[inline]
    pub fn neighbors_4(self) -> [Position; 4] {
        [
            Self::new(self.row, self.col + 1),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row - 1, self.col),
        ]
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_probe_order() {
        let p = Position::new(2, 3);
        assert_eq!(
            p.neighbors_4(),
            [
                Position::new(2, 4),
                Position::new(3, 3),
                Position::new(2, 2),
                Position::new(1, 3),
            ]
        );
    }

    #[test]
    fn ordering_is_row_major() {
        let mut ps = vec![
            Position::new(1, 0),
            Position::new(0, 5),
            Position::new(0, 1),
        ];
        ps.sort();
        assert_eq!(
            ps,
            vec![
                Position::new(0, 1),
                Position::new(0, 5),
                Position::new(1, 0),
            ]
        );
    }
}
