use clap::{CommandFactory, Parser, Subcommand};
use focuslog_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "focuslog", version, about = "Work/break session timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer session
    Run(commands::run::RunArgs),
    /// Session statistics
    Stats(commands::stats::StatsArgs),
    /// Export entries as CSV
    Export(commands::export::ExportArgs),
    /// List recorded entries
    Entries {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Timer settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Delete all recorded entries (settings are kept)
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    logging::init(&config);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &config),
        Commands::Stats(args) => commands::stats::run(args, &config),
        Commands::Export(args) => commands::export::run(args, &config),
        Commands::Entries { json } => commands::entries::run(json, &config),
        Commands::Settings { action } => commands::settings::run(action, &config),
        Commands::Clear { yes } => commands::clear::run(yes, &config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "focuslog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
