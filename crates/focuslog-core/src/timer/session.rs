//! Session state machine.
//!
//! Owns the current session and the list of finalized entries. Like the
//! rest of the core it has no internal thread: the caller supplies "now" to
//! each transition and calls [`SessionMachine::tick`] once per second while
//! the machine is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --start--> Running
//!   ^                |                  |
//!   +------stop------+-------stop-------+
//! reset: any -> Idle (current session discarded)
//! start_break: any -> stop -> Running (new break)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::{EntryType, TimeEntry};
use crate::events::Event;
use crate::settings::AppSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct SessionMachine {
    owner: String,
    state: SessionState,
    current: Option<TimeEntry>,
    /// Whole seconds accumulated by ticks for the current session.
    elapsed_secs: u64,
    entries: Vec<TimeEntry>,
    last_id: i64,
}

impl SessionMachine {
    pub fn new(owner: &str) -> Self {
        Self::with_entries(owner, Vec::new())
    }

    /// Start idle on top of previously persisted entries.
    pub fn with_entries(owner: &str, entries: Vec<TimeEntry>) -> Self {
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            owner: owner.to_string(),
            state: SessionState::Idle,
            current: None,
            elapsed_secs: 0,
            entries,
            last_id,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn current(&self) -> Option<&TimeEntry> {
        self.current.as_ref()
    }

    /// Finalized entries in append order.
    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            elapsed_secs: self.elapsed_secs,
            current: self.current.clone(),
            completed_entries: self.entries.len(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            SessionState::Idle => {
                let entry_id = self.begin(EntryType::Work, now);
                Some(Event::SessionStarted {
                    entry_id,
                    entry_type: EntryType::Work,
                    at: now,
                })
            }
            SessionState::Paused => {
                self.state = SessionState::Running;
                Some(Event::SessionResumed {
                    elapsed_secs: self.elapsed_secs,
                })
            }
            SessionState::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != SessionState::Running {
            return None;
        }
        self.state = SessionState::Paused;
        Some(Event::SessionPaused {
            elapsed_secs: self.elapsed_secs,
        })
    }

    /// Finalize the current session and append it. No-op when idle.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Event> {
        let mut entry = self.current.take()?;
        entry.end_time = Some(now);
        entry.duration = self.elapsed_secs;
        self.state = SessionState::Idle;
        self.elapsed_secs = 0;
        self.entries.push(entry.clone());
        tracing::debug!(id = entry.id, kind = %entry.entry_type, secs = entry.duration, "session stopped");
        Some(Event::SessionStopped { entry })
    }

    /// Discard the current session without recording it.
    pub fn reset(&mut self) -> Event {
        self.state = SessionState::Idle;
        self.current = None;
        self.elapsed_secs = 0;
        Event::SessionReset
    }

    /// Stop whatever is active, then start a break immediately.
    pub fn start_break(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events: Vec<Event> = self.stop(now).into_iter().collect();
        let entry_id = self.begin(EntryType::ShortBreak, now);
        events.push(Event::BreakStarted { entry_id, at: now });
        events
    }

    /// Overwrite the notes of the current session. No-op when idle.
    pub fn add_note(&mut self, text: &str) -> Option<Event> {
        let entry = self.current.as_mut()?;
        entry.notes = text.to_string();
        Some(Event::NoteUpdated { entry_id: entry.id })
    }

    /// Advance elapsed time by one second. Ignored unless running.
    pub fn tick(&mut self) -> Option<u64> {
        if self.state != SessionState::Running {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Some(self.elapsed_secs)
    }

    /// Type of the running session if it has reached its target.
    pub fn completion_due(&self, settings: &AppSettings) -> Option<EntryType> {
        if self.state != SessionState::Running {
            return None;
        }
        let entry_type = self.current.as_ref()?.entry_type;
        (self.elapsed_secs >= settings.target_for(entry_type)).then_some(entry_type)
    }

    /// Apply the auto-completion policy if the running session is due.
    ///
    /// The first transition is always `stop`, which leaves `Running`, so a
    /// second call for the same crossing finds nothing due.
    pub fn complete(&mut self, settings: &AppSettings, now: DateTime<Utc>) -> Vec<Event> {
        let Some(entry_type) = self.completion_due(settings) else {
            return Vec::new();
        };
        let mut events = vec![Event::SessionCompleted {
            entry_type,
            elapsed_secs: self.elapsed_secs,
            at: now,
        }];

        if entry_type == EntryType::Work && settings.auto_start_breaks {
            events.extend(self.start_break(now));
        } else if entry_type.is_break() && settings.auto_start_work {
            events.extend(self.stop(now));
            events.extend(self.start(now));
        } else {
            events.extend(self.stop(now));
        }
        events
    }

    /// Drop every finalized entry. Returns how many were removed.
    pub fn clear_entries(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin(&mut self, entry_type: EntryType, now: DateTime<Utc>) -> i64 {
        let id = self.next_id(now);
        self.current = Some(TimeEntry::new(id, entry_type, now, &self.owner));
        self.elapsed_secs = 0;
        self.state = SessionState::Running;
        id
    }

    /// Millisecond timestamp, bumped past the last issued id on collision.
    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
