//! **mazetrace-core** — shared types for traced maze search.
//!
//! This crate provides the foundational pieces used across the *mazetrace*
//! workspace: the (row, col) [`Position`] value type, the immutable [`Maze`]
//! grid model, the [`Event`]/[`Trace`] data model recorded by a search run,
//! and the [`codec`] that persists a trace as a record-oriented text stream.

pub mod codec;
pub mod error;
pub mod maze;
pub mod position;
pub mod trace;

pub use error::{ConfigError, FormatError, ParseAlgorithmError};
pub use maze::{Cell, Maze};
pub use position::Position;
pub use trace::{Algorithm, Event, EventKind, Trace};
