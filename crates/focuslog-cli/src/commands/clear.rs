use dialoguer::{theme::ColorfulTheme, Confirm};
use focuslog_core::{ClearOutcome, Config};

use super::open_app;

pub fn run(yes: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(config)?;
    if app.entries().is_empty() {
        println!("no entries to clear");
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Delete all {} recorded entries? Settings are kept.",
                app.entries().len()
            ))
            .default(false)
            .interact()?;

    match app.clear_stats(confirmed)? {
        ClearOutcome::Cancelled => println!("cancelled"),
        ClearOutcome::Cleared { removed } => println!("{removed} entries removed"),
    }
    Ok(())
}
