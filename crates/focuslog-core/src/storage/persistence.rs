//! Owner-scoped records on top of a [`KvStore`].
//!
//! Layout:
//! - `owner-identity` -> `focuslog-<uuid>`, created once
//! - `entries:<owner>` -> JSON array of [`TimeEntry`] in append order
//! - `settings:<owner>` -> JSON [`AppSettings`]
//!
//! Entry and settings reads never fail: a missing, unreadable or
//! unparseable value yields the default.

use uuid::Uuid;

use super::KvStore;
use crate::entry::TimeEntry;
use crate::error::StorageError;
use crate::settings::AppSettings;

pub const OWNER_KEY: &str = "owner-identity";
pub const OWNER_PREFIX: &str = "focuslog-";

pub struct Persistence<S> {
    store: S,
    owner: String,
}

impl<S: KvStore> Persistence<S> {
    /// Wrap `store`, resolving the owner identity (generated on first use).
    pub fn open(store: S) -> Result<Self, StorageError> {
        let owner = match store.get(OWNER_KEY)? {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => {
                let id = format!("{OWNER_PREFIX}{}", Uuid::new_v4());
                store.set(OWNER_KEY, &id)?;
                tracing::info!(owner = %id, "created owner identity");
                id
            }
        };
        Ok(Self { store, owner })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn entries_key(&self) -> String {
        format!("entries:{}", self.owner)
    }

    fn settings_key(&self) -> String {
        format!("settings:{}", self.owner)
    }

    pub fn load_entries(&self) -> Vec<TimeEntry> {
        let key = self.entries_key();
        match self.store.get(&key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(%key, error = %e, "discarding unparseable entry list");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(%key, error = %e, "entry list unreadable, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save_entries(&self, entries: &[TimeEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.store.set(&self.entries_key(), &json)
    }

    /// Remove the owner's entry list. Settings are left alone.
    pub fn clear_entries(&self) -> Result<(), StorageError> {
        self.store.remove(&self.entries_key())
    }

    /// Stored settings, or defaults seeded with `prefers_dark`.
    ///
    /// Defaults are written back only when the record is absent, so a
    /// transient read failure cannot overwrite real settings.
    pub fn load_settings(&self, prefers_dark: bool) -> Result<AppSettings, StorageError> {
        let key = self.settings_key();
        match self.store.get(&key) {
            Ok(Some(json)) => match serde_json::from_str::<AppSettings>(&json) {
                Ok(mut settings) => {
                    settings.user_id = self.owner.clone();
                    Ok(settings)
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "discarding unparseable settings");
                    Ok(AppSettings::with_defaults(&self.owner, prefers_dark))
                }
            },
            Ok(None) => {
                let settings = AppSettings::with_defaults(&self.owner, prefers_dark);
                self.save_settings(&settings)?;
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "settings unreadable, using defaults");
                Ok(AppSettings::with_defaults(&self.owner, prefers_dark))
            }
        }
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.store.set(&self.settings_key(), &json)
    }
}
