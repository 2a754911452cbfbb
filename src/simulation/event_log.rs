//! Bounded history of notable events for reports and summaries.
//!
//! Only births, fights, infections, and deaths are kept; meals are too
//! frequent to be interesting and are only counted in the statistics.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Capacity of [`EventLog::default`].
const DEFAULT_CAPACITY: usize = 20;

/// One entry of the [`EventLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Simulated time of the event in seconds.
    pub time: f32,
    /// One-line summary naming the creatures involved.
    pub description: String,
    /// What kind of event this was.
    pub kind: EventKind,
}

/// Categories of logged events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A child was conceived.
    Reproduction,
    /// Two creatures fought.
    Combat,
    /// Sickness spread to a neighbor.
    Infection,
    /// A creature died.
    Death,
}

/// The most recent events, newest first.
///
/// Once full, recording an event evicts the oldest one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventLog {
    /// An empty log holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records an event at simulated `time`.
    pub fn log(&mut self, time: f32, description: String, kind: EventKind) {
        self.entries.push_front(LoggedEvent {
            time,
            description,
            kind,
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.entries
    }
}
