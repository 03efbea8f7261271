use focuslog_core::Config;

use super::{clock_face, open_app};

pub fn run(json: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(app.entries())?);
        return Ok(());
    }

    if app.entries().is_empty() {
        println!("no entries recorded");
        return Ok(());
    }
    for entry in app.entries() {
        let start = entry.start_time.with_timezone(&chrono::Local);
        println!(
            "{}  {:<10} {:>8}  {}",
            start.format("%Y-%m-%d %H:%M"),
            entry.entry_type,
            clock_face(entry.duration),
            entry.notes
        );
    }
    Ok(())
}
