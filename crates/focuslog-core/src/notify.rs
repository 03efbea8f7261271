//! "Session complete" notifications.
//!
//! Delivery is fire-and-forget: the controller logs a failed delivery and
//! carries on, so a [`Notifier`] can never disturb the session state.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::entry::EntryType;
use crate::error::NotifyError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionNotice {
    pub title: String,
    pub body: String,
    pub completed: EntryType,
}

impl SessionNotice {
    pub fn for_completed(entry_type: EntryType) -> Self {
        let (title, body) = if entry_type.is_break() {
            ("Break complete", "Ready to get back to work?")
        } else {
            ("Work session complete", "Time for a break!")
        };
        Self {
            title: title.into(),
            body: body.into(),
            completed: entry_type,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notice: &SessionNotice) -> Result<(), NotifyError>;
}

/// Drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notice: &SessionNotice) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Terminal delivery: bell plus a line on stderr, mirrored to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &SessionNotice) -> Result<(), NotifyError> {
        tracing::info!(title = %notice.title, "session notice");
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "\x07{}: {}", notice.title, notice.body)
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}
