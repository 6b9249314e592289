//! Error types for maze construction and trace decoding.

use thiserror::Error;

use crate::position::Position;

/// A maze that cannot be used for search at all.
///
/// Surfaced at the grid boundary, before any algorithm runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze is empty")]
    Empty,

    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("unrecognized cell character {ch:?} at {pos}")]
    UnknownCell { ch: char, pos: Position },

    #[error("maze has no start cell ('A')")]
    MissingStart,

    #[error("maze has no goal cell ('B')")]
    MissingGoal,

    #[error("maze has more than one start cell ('A')")]
    DuplicateStart,

    #[error("maze has more than one goal cell ('B')")]
    DuplicateGoal,
}

/// A trace stream that cannot be decoded.
///
/// Fatal to [`codec::decode`](crate::codec::decode): the caller must not
/// proceed to replay. Malformed fields reject their whole record rather than
/// guessing a default.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("trace stream has no META record")]
    MissingMeta,

    #[error("trace header is missing the {0:?} column")]
    MissingColumn(&'static str),

    #[error("invalid maze dimensions {rows}x{cols}")]
    BadDimensions { rows: i32, cols: i32 },

    #[error("line {line}: required field {field:?} is absent")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid value {value:?} for field {field:?}")]
    BadField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: position ({row}, {col}) outside {rows}x{cols} grid")]
    OutOfBounds {
        line: usize,
        row: i32,
        col: i32,
        rows: i32,
        cols: i32,
    },

    #[error("trace cell snapshot is not a valid maze: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An algorithm name that is none of `BFS`, `DFS`, `A*`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown algorithm {0:?} (expected BFS, DFS, or A*)")]
pub struct ParseAlgorithmError(pub String);
