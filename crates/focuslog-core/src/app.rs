//! Application controller.
//!
//! [`FocusApp`] is the single owner of all mutable state: the session
//! machine, the settings record, and the persistence adapter. Front-ends
//! call its operations and render the returned [`Event`]s; nothing is read
//! from ambient globals.
//!
//! Every operation commits its in-memory transition first and then writes
//! the entry list if it changed. A failed write is reported to the caller
//! but never leaves the machine half-transitioned.

use std::io::Write;

use chrono::{DateTime, TimeZone};

use crate::clock::Clock;
use crate::entry::TimeEntry;
use crate::error::Result;
use crate::events::Event;
use crate::export;
use crate::notify::{Notifier, SessionNotice};
use crate::settings::{AppSettings, SettingsStore};
use crate::stats::{self, StatsSnapshot, TimeRange};
use crate::storage::{KvStore, Persistence};
use crate::timer::{SessionMachine, SessionState};

/// Result of a destructive clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cancelled,
    Cleared { removed: usize },
}

pub struct FocusApp<S, C, N> {
    machine: SessionMachine,
    settings: SettingsStore,
    persistence: Persistence<S>,
    clock: C,
    notifier: N,
}

impl<S: KvStore, C: Clock, N: Notifier> FocusApp<S, C, N> {
    /// Resolve the owner and load its entries and settings.
    ///
    /// `prefers_dark` seeds the dark-mode default the first time settings
    /// are created for this owner; it is ignored afterwards.
    pub fn open(store: S, clock: C, notifier: N, prefers_dark: bool) -> Result<Self> {
        let persistence = Persistence::open(store)?;
        let settings = SettingsStore::load(&persistence, prefers_dark)?;
        let entries = persistence.load_entries();
        tracing::debug!(owner = persistence.owner(), entries = entries.len(), "opened focuslog");
        Ok(Self {
            machine: SessionMachine::with_entries(persistence.owner(), entries),
            settings,
            persistence,
            clock,
            notifier,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn owner(&self) -> &str {
        self.persistence.owner()
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    /// Whether the tick source should be armed.
    pub fn is_ticking(&self) -> bool {
        self.machine.is_running()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.machine.elapsed_secs()
    }

    pub fn current(&self) -> Option<&TimeEntry> {
        self.machine.current()
    }

    pub fn entries(&self) -> &[TimeEntry] {
        self.machine.entries()
    }

    pub fn settings(&self) -> &AppSettings {
        self.settings.get()
    }

    pub fn snapshot(&self) -> Event {
        self.machine.snapshot()
    }

    /// Seconds left before the running session reaches its target.
    pub fn remaining_secs(&self) -> Option<u64> {
        let current = self.machine.current()?;
        let target = self.settings.get().target_for(current.entry_type);
        Some(target.saturating_sub(self.machine.elapsed_secs()))
    }

    /// Statistics over the stored entries, with days taken in `now`'s zone.
    pub fn stats<Tz: TimeZone>(
        &self,
        range: TimeRange,
        include_breaks: bool,
        now: &DateTime<Tz>,
    ) -> StatsSnapshot {
        stats::compute(self.machine.entries(), range, include_breaks, now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Vec<Event>> {
        let now = self.clock.now();
        Ok(self.machine.start(now).into_iter().collect())
    }

    pub fn pause(&mut self) -> Result<Vec<Event>> {
        Ok(self.machine.pause().into_iter().collect())
    }

    pub fn stop(&mut self) -> Result<Vec<Event>> {
        let now = self.clock.now();
        let events: Vec<Event> = self.machine.stop(now).into_iter().collect();
        self.persist_if_recorded(&events)?;
        Ok(events)
    }

    pub fn reset(&mut self) -> Result<Vec<Event>> {
        Ok(vec![self.machine.reset()])
    }

    pub fn start_break(&mut self) -> Result<Vec<Event>> {
        let now = self.clock.now();
        let events = self.machine.start_break(now);
        self.persist_if_recorded(&events)?;
        Ok(events)
    }

    pub fn add_note(&mut self, text: &str) -> Result<Vec<Event>> {
        Ok(self.machine.add_note(text).into_iter().collect())
    }

    /// One tick of the clock: advance elapsed time, then apply the
    /// auto-completion policy if the target was reached.
    pub fn tick(&mut self) -> Result<Vec<Event>> {
        if self.machine.tick().is_none() {
            return Ok(Vec::new());
        }

        let settings = self.settings.get().clone();
        let Some(completed) = self.machine.completion_due(&settings) else {
            return Ok(Vec::new());
        };

        if settings.notifications {
            self.deliver(&SessionNotice::for_completed(completed));
        }

        let events = self.machine.complete(&settings, self.clock.now());
        self.persist_if_recorded(&events)?;
        Ok(events)
    }

    /// Replace the settings record and persist it. No validation here.
    pub fn update_settings(&mut self, settings: AppSettings) -> Result<Vec<Event>> {
        self.settings.update(settings, &self.persistence)?;
        Ok(vec![Event::SettingsUpdated])
    }

    /// Remove every stored entry for this owner. Settings are untouched.
    ///
    /// `confirm` is the caller's answer to "really delete everything?".
    pub fn clear_stats(&mut self, confirm: bool) -> Result<ClearOutcome> {
        if !confirm {
            return Ok(ClearOutcome::Cancelled);
        }
        self.persistence.clear_entries()?;
        let removed = self.machine.clear_entries();
        tracing::info!(owner = self.owner(), removed, "cleared statistics");
        Ok(ClearOutcome::Cleared { removed })
    }

    /// Write the displayed entries of a stats query as CSV.
    pub fn export_csv<Tz, W>(
        &self,
        range: TimeRange,
        include_breaks: bool,
        now: &DateTime<Tz>,
        out: W,
    ) -> Result<usize>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        W: Write,
    {
        let snapshot = self.stats(range, include_breaks, now);
        export::write_csv(&snapshot.entries, &now.timezone(), out)?;
        Ok(snapshot.entries.len())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_if_recorded(&self, events: &[Event]) -> Result<()> {
        if events.iter().any(|e| matches!(e, Event::SessionStopped { .. })) {
            self.persistence.save_entries(self.machine.entries())?;
        }
        Ok(())
    }

    fn deliver(&self, notice: &SessionNotice) {
        if let Err(e) = self.notifier.notify(notice) {
            tracing::warn!(error = %e, title = %notice.title, "notification not delivered");
        }
    }
}
