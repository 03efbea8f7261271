use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{EntryType, TimeEntry};
use crate::timer::SessionState;

/// Every state change in the system produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        entry_id: i64,
        entry_type: EntryType,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_secs: u64,
    },
    SessionResumed {
        elapsed_secs: u64,
    },
    /// A session was finalized and appended to the entry list.
    SessionStopped {
        entry: TimeEntry,
    },
    /// The current session (if any) was discarded.
    SessionReset,
    BreakStarted {
        entry_id: i64,
        at: DateTime<Utc>,
    },
    /// Elapsed time reached the configured target for the session type.
    SessionCompleted {
        entry_type: EntryType,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    NoteUpdated {
        entry_id: i64,
    },
    SettingsUpdated,
    StatsCleared {
        removed: usize,
    },
    StateSnapshot {
        state: SessionState,
        elapsed_secs: u64,
        current: Option<TimeEntry>,
        completed_entries: usize,
    },
}
