//! # focuslog Core Library
//!
//! Business logic for the focuslog work/break timer. The CLI is a thin
//! layer over this crate.
//!
//! ## Architecture
//!
//! - **Session machine**: Idle/Running/Paused state machine driven by an
//!   external one-second tick
//! - **Statistics**: pure aggregation of entries into totals, daily and
//!   weekly rows, and a productivity score
//! - **Storage**: owner-scoped JSON records in a key-value store (SQLite)
//!   plus a TOML process config
//!
//! ## Key Components
//!
//! - [`FocusApp`]: application controller owning all mutable state
//! - [`SessionMachine`]: session lifecycle and auto-completion policy
//! - [`stats::compute`]: statistics snapshot
//! - [`Persistence`]: entry and settings records for one owner

pub mod app;
pub mod clock;
pub mod entry;
pub mod error;
pub mod events;
pub mod export;
pub mod notify;
pub mod settings;
pub mod stats;
pub mod storage;
pub mod timer;

pub use app::{ClearOutcome, FocusApp};
pub use clock::{Clock, ManualClock, SystemClock, Ticker};
pub use entry::{EntryType, TimeEntry};
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{LogNotifier, NoopNotifier, Notifier, SessionNotice};
pub use settings::{detect_dark_mode, AppSettings, SettingsStore};
pub use stats::{DailyStats, StatsSnapshot, TimeRange, WeeklyStats};
pub use storage::{Config, KvStore, MemoryStore, Persistence, SqliteStore};
pub use timer::{SessionMachine, SessionState};
