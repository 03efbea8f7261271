pub mod clear;
pub mod entries;
pub mod export;
pub mod run;
pub mod settings;
pub mod stats;

use focuslog_core::{
    detect_dark_mode, Config, FocusApp, LogNotifier, SqliteStore, SystemClock,
};

pub type CliApp = FocusApp<SqliteStore, SystemClock, LogNotifier>;

/// Open the controller on the configured database.
pub fn open_app(config: &Config) -> Result<CliApp, Box<dyn std::error::Error>> {
    let store = SqliteStore::open(config)?;
    Ok(FocusApp::open(store, SystemClock, LogNotifier, detect_dark_mode())?)
}

/// `mm:ss` below an hour, `h:mm:ss` above.
pub fn clock_face(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Human total such as `2h 05m` or `12m`.
pub fn hours_minutes(secs: u64) -> String {
    let minutes = (secs + 30) / 60;
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m:02}m")
    } else {
        format!("{m}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_face_formats() {
        assert_eq!(clock_face(0), "00:00");
        assert_eq!(clock_face(1500), "25:00");
        assert_eq!(clock_face(3725), "1:02:05");
    }

    #[test]
    fn hours_minutes_formats() {
        assert_eq!(hours_minutes(0), "0m");
        assert_eq!(hours_minutes(720), "12m");
        assert_eq!(hours_minutes(7500), "2h 05m");
    }
}
