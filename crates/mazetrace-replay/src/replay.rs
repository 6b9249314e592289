//! The replay engine: a state machine over `{cursor, frontier, expanded}`.

use std::collections::HashSet;
use std::io::Read;
use std::time::Duration;

use mazetrace_core::codec;
use mazetrace_core::{EventKind, FormatError, Position, Trace};

// ---------------------------------------------------------------------------
// Tick
// ---------------------------------------------------------------------------

/// A scheduled playback tick.
///
/// Only the most recently issued token is live; [`Replay::pause`] and
/// [`Replay::reset`] invalidate any outstanding one, so a tick delivered
/// late can never mutate state it was not scheduled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    seq: u64,
    delay: Duration,
}

impl Tick {
    /// How long the driving loop should wait before delivering this tick.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

/// Borrowed view of the replay's derived state, for a rendering collaborator.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    /// Discovered but not yet expanded positions.
    pub frontier: &'a HashSet<Position>,
    /// Positions expanded so far.
    pub expanded: &'a HashSet<Position>,
    /// Index of the next event to apply.
    pub step: usize,
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Replays a recorded search event by event.
///
/// All derived state is a pure fold over the trace's event sequence:
/// [`seek`](Replay::seek) always restarts from the beginning, so repeated
/// seeks cannot drift, and stepping manually or via [`play`](Replay::play)
/// ticks produces identical overlays.
pub struct Replay {
    trace: Trace,
    cursor: usize,
    frontier: HashSet<Position>,
    expanded: HashSet<Position>,
    playing: bool,
    tick_interval: Duration,
    tick_seq: u64,
}

impl Replay {
    /// Create a replay positioned before the first event.
    pub fn from_trace(trace: Trace) -> Self {
        Self {
            trace,
            cursor: 0,
            frontier: HashSet::new(),
            expanded: HashSet::new(),
            playing: false,
            tick_interval: Duration::ZERO,
            tick_seq: 0,
        }
    }

    /// Decode a persisted trace and wrap it in a replay.
    pub fn load<R: Read>(reader: R) -> Result<Self, FormatError> {
        Ok(Self::from_trace(codec::decode(reader)?))
    }

    /// The trace being replayed.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Index of the next event to apply.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every event has been applied.
    pub fn is_done(&self) -> bool {
        self.cursor == self.trace.events.len()
    }

    /// Whether a play loop is active.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Borrowed view of the current overlays.
    pub fn overlay(&self) -> Overlay<'_> {
        Overlay {
            frontier: &self.frontier,
            expanded: &self.expanded,
            step: self.cursor,
        }
    }

    /// Apply the next event. A no-op at the end of the trace.
    pub fn step(&mut self) {
        let Some(event) = self.trace.events.get(self.cursor) else {
            return;
        };
        match event.kind {
            EventKind::Discover | EventKind::Update => {
                if !self.expanded.contains(&event.pos) {
                    self.frontier.insert(event.pos);
                }
            }
            EventKind::Expand => {
                self.frontier.remove(&event.pos);
                self.expanded.insert(event.pos);
            }
            // Kinds added by future trace revisions replay as no-ops.
            _ => {}
        }
        self.cursor += 1;
    }

    /// Rewind to the beginning, clearing all derived state. Any pending
    /// tick is cancelled first.
    pub fn reset(&mut self) {
        self.cancel_tick();
        self.cursor = 0;
        self.frontier.clear();
        self.expanded.clear();
    }

    /// Position the replay after the first `n` events, by resetting and
    /// re-applying them from the start.
    pub fn seek(&mut self, n: usize) {
        self.reset();
        for _ in 0..n {
            if self.is_done() {
                break;
            }
            self.step();
        }
    }

    /// Start playback, returning the first tick token. A no-op (returning
    /// `None`) when the replay is already at its end.
    ///
    /// Issuing a new token invalidates any previously outstanding one, so at
    /// most one scheduled tick is ever pending.
    pub fn play(&mut self, tick_interval: Duration) -> Option<Tick> {
        if self.is_done() {
            return None;
        }
        self.playing = true;
        self.tick_interval = tick_interval;
        self.tick_seq = self.tick_seq.wrapping_add(1);
        Some(Tick {
            seq: self.tick_seq,
            delay: tick_interval,
        })
    }

    /// Deliver a tick: apply one step and hand back the next token, or
    /// `None` when playback finished, was paused, or `tick` is stale.
    pub fn tick(&mut self, tick: Tick) -> Option<Tick> {
        if !self.playing || tick.seq != self.tick_seq {
            return None;
        }
        self.step();
        if self.is_done() {
            self.playing = false;
            return None;
        }
        self.tick_seq = self.tick_seq.wrapping_add(1);
        Some(Tick {
            seq: self.tick_seq,
            delay: self.tick_interval,
        })
    }

    /// Stop playback and cancel the pending tick, leaving the cursor where
    /// it is. `step`, `seek`, or `play` may resume from this point.
    pub fn pause(&mut self) {
        self.cancel_tick();
    }

    fn cancel_tick(&mut self) {
        self.playing = false;
        self.tick_seq = self.tick_seq.wrapping_add(1);
    }
}
