use clap::Subcommand;
use focuslog_core::{AppSettings, Config, ValidationError};

use super::open_app;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "workDuration", "auto_start_breaks")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(config)?;
    match action {
        SettingsAction::Get { key } => match app.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(ValidationError::UnknownKey(key).into()),
        },
        SettingsAction::Set { key, value } => {
            let mut settings = app.settings().clone();
            settings.set(&key, &value)?;
            settings.validate()?;
            app.update_settings(settings)?;
            println!("ok");
        }
        SettingsAction::List => {
            let json = serde_json::to_string_pretty(app.settings())?;
            println!("{json}");
        }
        SettingsAction::Reset => {
            let defaults = AppSettings::with_defaults(app.owner(), app.settings().dark_mode);
            app.update_settings(defaults)?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
