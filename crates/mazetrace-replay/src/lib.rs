//! Trace-driven replay of a recorded search.
//!
//! [`Replay`] folds a trace's events in order to rebuild the frontier and
//! expanded overlays the search saw, without re-running the algorithm or
//! touching its live bookkeeping. Playback pacing is cooperative: the engine
//! hands out one [`Tick`] token at a time and a driving loop decides when to
//! deliver it back, so replay speed is independent of the original run.

mod replay;

pub use replay::{Overlay, Replay, Tick};
