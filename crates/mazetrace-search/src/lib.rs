//! Instrumented maze search.
//!
//! Three interchangeable frontier strategies drive a single search loop:
//!
//! - **BFS** ([`FifoOpen`]) — FIFO queue; the first expansion of the goal
//!   yields a shortest path by edge count.
//! - **DFS** ([`LifoOpen`]) — LIFO stack; contrast baseline, no optimality
//!   guarantee.
//! - **A\*** ([`BestFirstOpen`]) — min-priority queue on `f = g + h` with
//!   Manhattan `h`; optimal under unit-cost 4-directional movement.
//!
//! [`run`] executes the chosen strategy over a [`Maze`](mazetrace_core::Maze)
//! and records every discover/expand/update decision as an ordered event
//! stream inside the returned [`Trace`](mazetrace_core::Trace).

mod driver;
mod heuristic;
mod open;

pub use driver::run;
pub use heuristic::manhattan;
pub use open::{BestFirstOpen, FifoOpen, LifoOpen, OpenList};
