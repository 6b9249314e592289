//! Trace data model: the ordered event stream recorded by a search run.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseAlgorithmError;
use crate::maze::Maze;
use crate::position::Position;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Search strategy selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    /// Wire name used in trace files.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::AStar => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BFS" => Ok(Algorithm::Bfs),
            "DFS" => Ok(Algorithm::Dfs),
            "A*" | "ASTAR" | "A_STAR" => Ok(Algorithm::AStar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// What the search decided at one step.
///
/// Marked non-exhaustive so downstream folds carry a wildcard arm: kinds
/// added by future trace revisions must replay as no-ops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum EventKind {
    /// A position entered the frontier for the first time.
    Discover,
    /// A position was popped from the frontier and its neighbours generated.
    Expand,
    /// A cheaper route to an already-discovered frontier position (A* only).
    Update,
}

impl EventKind {
    /// Wire name used in trace files.
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::Discover => "DISCOVER",
            EventKind::Expand => "EXPAND",
            EventKind::Update => "UPDATE",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded decision.
///
/// `step` indices are strictly increasing and contiguous from 0 within a
/// trace. `g` and `f` are populated for A* only (except the initial start
/// discovery, which always carries `g = 0`). `frontier_size` is the open-set
/// size immediately after this event's own push or pop was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub step: u32,
    pub kind: EventKind,
    pub pos: Position,
    pub parent: Option<Position>,
    pub g: Option<i32>,
    pub f: Option<i32>,
    pub frontier_size: usize,
}

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

/// The persisted record of one completed search run.
///
/// Built once by the driver, immutable afterwards. A trace is the only
/// channel between a search run and any later replay: replay never touches
/// the algorithm's live bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    pub algorithm: Algorithm,
    pub maze: Maze,
    /// Events in step order, append-only during search.
    pub events: Vec<Event>,
    /// Start-to-goal path, empty when the goal is unreachable.
    pub path: Vec<Position>,
}

impl Trace {
    /// Number of expansions performed — the "steps explored" figure, derived
    /// from the event stream rather than kept as ambient state.
    pub fn expanded_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == EventKind::Expand)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_round_trip() {
        for alg in [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar] {
            assert_eq!(alg.name().parse::<Algorithm>().unwrap(), alg);
        }
    }

    #[test]
    fn algorithm_accepts_spellings() {
        assert_eq!("bfs".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        assert_eq!("astar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("A_STAR".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn expanded_count_filters_events() {
        let maze = Maze::parse("AB\n").unwrap();
        let mk = |step, kind, pos| Event {
            step,
            kind,
            pos,
            parent: None,
            g: None,
            f: None,
            frontier_size: 0,
        };
        let trace = Trace {
            algorithm: Algorithm::Bfs,
            maze,
            events: vec![
                mk(0, EventKind::Discover, Position::new(0, 0)),
                mk(1, EventKind::Expand, Position::new(0, 0)),
                mk(2, EventKind::Discover, Position::new(0, 1)),
                mk(3, EventKind::Expand, Position::new(0, 1)),
            ],
            path: vec![Position::new(0, 0), Position::new(0, 1)],
        };
        assert_eq!(trace.expanded_count(), 2);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn event_round_trip() {
        let event = Event {
            step: 4,
            kind: EventKind::Update,
            pos: Position::new(1, 2),
            parent: Some(Position::new(1, 1)),
            g: Some(3),
            f: Some(7),
            frontier_size: 2,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
