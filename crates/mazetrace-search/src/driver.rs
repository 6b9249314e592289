//! The instrumented search driver.
//!
//! [`run`] executes one strategy to completion over an immutable
//! [`Maze`], emitting a causally ordered [`Event`] for every frontier
//! decision. The driver's own bookkeeping (parent links, g-scores) is
//! discarded when the run ends; its information survives only through the
//! events and the reconstructed path in the returned [`Trace`].

use std::collections::{HashMap, HashSet};

use mazetrace_core::{Algorithm, Event, EventKind, Maze, Position, Trace};

use crate::heuristic::manhattan;
use crate::open::{BestFirstOpen, FifoOpen, LifoOpen, OpenList};

// ---------------------------------------------------------------------------
// SearchRecord
// ---------------------------------------------------------------------------

/// Per-run bookkeeping: parent links and, for A*, best-known path costs.
struct SearchRecord {
    parent: HashMap<Position, Option<Position>>,
    g: HashMap<Position, i32>,
}

impl SearchRecord {
    fn new() -> Self {
        Self {
            parent: HashMap::new(),
            g: HashMap::new(),
        }
    }

    fn discovered(&self, pos: Position) -> bool {
        self.parent.contains_key(&pos)
    }

    /// Walk parent links backward from `goal`. Empty if the goal was never
    /// discovered or the chain does not reach `start`.
    fn reconstruct_path(&self, start: Position, goal: Position) -> Vec<Position> {
        if !self.parent.contains_key(&goal) {
            return Vec::new();
        }
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(&Some(prev)) = self.parent.get(&current) {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        if path.first() != Some(&start) {
            return Vec::new();
        }
        path
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run `algorithm` over `maze`, returning the full instrumented trace.
///
/// The maze is read-only throughout and the driver keeps no state across
/// calls, so concurrent runs over different mazes are independent. An
/// unreachable goal is not an error: the trace is still valid and its path
/// is empty.
pub fn run(maze: &Maze, algorithm: Algorithm) -> Trace {
    match algorithm {
        Algorithm::Bfs => run_with(maze, algorithm, FifoOpen::new()),
        Algorithm::Dfs => run_with(maze, algorithm, LifoOpen::new()),
        Algorithm::AStar => run_with(maze, algorithm, BestFirstOpen::new()),
    }
}

fn record(
    events: &mut Vec<Event>,
    kind: EventKind,
    pos: Position,
    parent: Option<Position>,
    g: Option<i32>,
    f: Option<i32>,
    frontier_size: usize,
) {
    events.push(Event {
        step: events.len() as u32,
        kind,
        pos,
        parent,
        g,
        f,
        frontier_size,
    });
}

fn run_with<O: OpenList>(maze: &Maze, algorithm: Algorithm, mut open: O) -> Trace {
    let start = maze.start();
    let goal = maze.goal();
    let costed = algorithm == Algorithm::AStar;

    let mut rec = SearchRecord::new();
    let mut expanded: HashSet<Position> = HashSet::new();
    let mut events: Vec<Event> = Vec::new();
    let mut nbuf: Vec<Position> = Vec::with_capacity(4);

    rec.parent.insert(start, None);
    let h0 = manhattan(start, goal);
    if costed {
        rec.g.insert(start, 0);
    }
    open.push(start, if costed { h0 } else { 0 });
    record(
        &mut events,
        EventKind::Discover,
        start,
        None,
        Some(0),
        costed.then_some(h0),
        open.len(),
    );

    while let Some((current, popped_f)) = open.pop() {
        if costed && expanded.contains(&current) {
            // Stale duplicate left behind by an Update; drop it silently.
            continue;
        }
        expanded.insert(current);

        record(
            &mut events,
            EventKind::Expand,
            current,
            rec.parent.get(&current).copied().flatten(),
            costed.then(|| rec.g[&current]),
            costed.then_some(popped_f),
            open.len(),
        );

        if current == goal {
            break;
        }

        nbuf.clear();
        maze.walkable_neighbors(current, &mut nbuf);
        for &next in &nbuf {
            if !costed {
                if rec.discovered(next) {
                    continue;
                }
                rec.parent.insert(next, Some(current));
                open.push(next, 0);
                record(
                    &mut events,
                    EventKind::Discover,
                    next,
                    Some(current),
                    None,
                    None,
                    open.len(),
                );
                continue;
            }

            let tentative = rec.g[&current] + 1;
            match rec.g.get(&next).copied() {
                None => {
                    rec.parent.insert(next, Some(current));
                    rec.g.insert(next, tentative);
                    let f = tentative + manhattan(next, goal);
                    open.push(next, f);
                    record(
                        &mut events,
                        EventKind::Discover,
                        next,
                        Some(current),
                        Some(tentative),
                        Some(f),
                        open.len(),
                    );
                }
                Some(best) if tentative < best => {
                    // A strictly cheaper route to a frontier position.
                    rec.parent.insert(next, Some(current));
                    rec.g.insert(next, tentative);
                    let f = tentative + manhattan(next, goal);
                    open.push(next, f);
                    record(
                        &mut events,
                        EventKind::Update,
                        next,
                        Some(current),
                        Some(tentative),
                        Some(f),
                        open.len(),
                    );
                }
                Some(_) => {}
            }
        }
    }

    let path = rec.reconstruct_path(start, goal);
    Trace {
        algorithm,
        maze: maze.clone(),
        events,
        path,
    }
}
