//! User-configurable timer settings.
//!
//! One record per owner, stored in the key-value store under
//! `settings:<owner>`. The store replaces the whole record on update and
//! never merges or validates; [`AppSettings::validate`] and the typed
//! [`AppSettings::set`] are for callers that take raw user input.

use serde::{Deserialize, Serialize};

use crate::entry::EntryType;
use crate::error::{Result, ValidationError};
use crate::storage::{KvStore, Persistence};

pub const DEFAULT_WORK_DURATION: u64 = 25 * 60;
pub const DEFAULT_BREAK_DURATION: u64 = 5 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Work session target in seconds.
    pub work_duration: u64,
    /// Break session target in seconds.
    pub break_duration: u64,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_work: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub user_id: String,
}

fn default_true() -> bool {
    true
}

impl AppSettings {
    pub fn with_defaults(user_id: &str, prefers_dark: bool) -> Self {
        Self {
            work_duration: DEFAULT_WORK_DURATION,
            break_duration: DEFAULT_BREAK_DURATION,
            auto_start_breaks: false,
            auto_start_work: false,
            notifications: true,
            dark_mode: prefers_dark,
            user_id: user_id.to_string(),
        }
    }

    /// Target duration in seconds for a session of the given type.
    pub fn target_for(&self, entry_type: EntryType) -> u64 {
        if entry_type.is_break() {
            self.break_duration
        } else {
            self.work_duration
        }
    }

    /// Both durations must be positive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("workDuration", self.work_duration),
            ("breakDuration", self.break_duration),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: "duration must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }

    /// Get a field as a string. Accepts `work_duration` or `workDuration`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = json.get(wire_key(key).as_str())?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a field from raw text, checking it against the field's type.
    /// On error `self` is unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let key = wire_key(key);
        if key == "userId" {
            return Err(ValidationError::InvalidValue {
                field: key,
                message: "owner identity is managed by the store".into(),
            });
        }

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(&key, e))?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ValidationError::UnknownKey(key.clone()))?;
        let existing = obj
            .get(key.as_str())
            .ok_or_else(|| ValidationError::UnknownKey(key.clone()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                serde_json::Value::Bool(value.trim().parse::<bool>().map_err(|e| invalid(&key, e))?)
            }
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value.trim().parse::<u64>().map_err(|e| invalid(&key, e))?.into(),
            ),
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(key.clone(), new_value);

        *self = serde_json::from_value(json).map_err(|e| invalid(&key, e))?;
        Ok(())
    }

    /// Field names accepted by [`get`](Self::get) and [`set`](Self::set).
    pub fn keys() -> &'static [&'static str] {
        &[
            "workDuration",
            "breakDuration",
            "autoStartBreaks",
            "autoStartWork",
            "notifications",
            "darkMode",
            "userId",
        ]
    }
}

fn invalid(field: &str, err: impl std::fmt::Display) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// `work_duration` -> `workDuration`; camelCase input passes through.
fn wire_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.trim().chars() {
        if c == '_' || c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Host colour-scheme preference, read once when settings are first created.
///
/// `FOCUSLOG_COLOR_SCHEME=dark|light` wins; otherwise the terminal's
/// `COLORFGBG` background index decides. Defaults to light.
pub fn detect_dark_mode() -> bool {
    if let Ok(scheme) = std::env::var("FOCUSLOG_COLOR_SCHEME") {
        return scheme.eq_ignore_ascii_case("dark");
    }
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(colorfgbg_is_dark)
        .unwrap_or(false)
}

fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let bg = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(bg <= 6 || bg == 8)
}

/// Holds the owner's settings record and writes it through on every change.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    current: AppSettings,
}

impl SettingsStore {
    /// Load the persisted record, or create and persist defaults.
    pub fn load<S: KvStore>(persistence: &Persistence<S>, prefers_dark: bool) -> Result<Self> {
        Ok(Self {
            current: persistence.load_settings(prefers_dark)?,
        })
    }

    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Replace the whole record, re-stamped with the owner, and persist it.
    /// The in-memory record only changes once the write has succeeded.
    pub fn update<S: KvStore>(
        &mut self,
        mut settings: AppSettings,
        persistence: &Persistence<S>,
    ) -> Result<&AppSettings> {
        settings.user_id = persistence.owner().to_string();
        persistence.save_settings(&settings)?;
        self.current = settings;
        tracing::debug!(owner = persistence.owner(), "settings updated");
        Ok(&self.current)
    }
}
