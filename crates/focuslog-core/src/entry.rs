//! Time entries: the unit of tracked work or rest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a tracked session.
///
/// The session machine only ever produces `Work` and `ShortBreak`.
/// `LongBreak` is accepted on load and counted by the statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryType {
    Work,
    #[serde(alias = "break")]
    ShortBreak,
    LongBreak,
}

impl EntryType {
    pub fn is_break(self) -> bool {
        matches!(self, EntryType::ShortBreak | EntryType::LongBreak)
    }

    /// Wire tag, as written to storage and CSV.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Work => "work",
            EntryType::ShortBreak => "shortBreak",
            EntryType::LongBreak => "longBreak",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    /// `None` while the entry is the current session.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Elapsed seconds, fixed when the entry is stopped.
    #[serde(default)]
    pub duration: u64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub notes: String,
    pub user_id: String,
}

impl TimeEntry {
    pub fn new(id: i64, entry_type: EntryType, start_time: DateTime<Utc>, user_id: &str) -> Self {
        Self {
            id,
            start_time,
            end_time: None,
            duration: 0,
            entry_type,
            notes: String::new(),
            user_id: user_id.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_break(&self) -> bool {
        self.entry_type.is_break()
    }
}
