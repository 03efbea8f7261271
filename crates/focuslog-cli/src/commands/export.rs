use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use focuslog_core::{Config, TimeRange};

use super::open_app;

#[derive(Args)]
pub struct ExportArgs {
    /// today, week, month or all
    #[arg(long, default_value = "all")]
    range: TimeRange,
    /// Leave break entries out
    #[arg(long)]
    no_breaks: bool,
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ExportArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let now = chrono::Local::now();
    let include_breaks = !args.no_breaks;

    match args.output {
        Some(path) => {
            let file = BufWriter::new(File::create(&path)?);
            let rows = app.export_csv(args.range, include_breaks, &now, file)?;
            eprintln!("{rows} entries written to {}", path.display());
        }
        None => {
            app.export_csv(args.range, include_breaks, &now, std::io::stdout().lock())?;
        }
    }
    Ok(())
}
