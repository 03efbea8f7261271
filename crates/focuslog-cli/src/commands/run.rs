//! Interactive timer session.
//!
//! One task selects over stdin commands and the one-second ticker. The
//! ticker is re-synced with the controller after every command, so a
//! `pause`, `stop` or `reset` takes effect before another tick can land.

use std::error::Error;
use std::io::Write;

use clap::Args;
use focuslog_core::{Config, Event, SessionState, Ticker};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{clock_face, open_app, CliApp};

#[derive(Args)]
pub struct RunArgs {
    /// Wait for a command instead of starting a work session
    #[arg(long)]
    idle: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Start,
    Pause,
    Stop,
    Reset,
    Break,
    Note(String),
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let cmd = match word.to_ascii_lowercase().as_str() {
        "start" | "s" | "resume" => Command::Start,
        "pause" | "p" => Command::Pause,
        "stop" | "x" => Command::Stop,
        "reset" => Command::Reset,
        "break" | "b" => Command::Break,
        "note" | "n" => Command::Note(rest.trim().to_string()),
        "status" | "?" => Command::Status,
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(cmd))
}

const HELP: &str = "commands: start | pause | stop | reset | break | note <text> | status | quit";

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn Error>> {
    let mut app = open_app(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session_loop(&mut app, &args))
}

async fn session_loop(app: &mut CliApp, args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut ticker = Ticker::every_second();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !args.json {
        eprintln!("{HELP}");
    }
    if !args.idle {
        let events = app.start()?;
        render(app, &events, args.json)?;
    }
    ticker.sync(app.is_ticking());

    loop {
        tokio::select! {
            biased;
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(cmd)) => {
                        let events = apply(app, cmd, args.json)?;
                        render(app, &events, args.json)?;
                    }
                    Ok(None) => {}
                    Err(msg) => eprintln!("{msg}"),
                }
            }
            _ = ticker.tick() => {
                let events = app.tick()?;
                if events.is_empty() {
                    if !args.json {
                        status_line(app);
                    }
                } else {
                    render(app, &events, args.json)?;
                }
            }
        }
        ticker.sync(app.is_ticking());
    }

    if app.current().is_some() {
        tracing::warn!("exiting with an unfinished session");
        if !args.json {
            eprintln!("\nunfinished session discarded (use 'stop' to record it)");
        }
    }
    Ok(())
}

fn apply(app: &mut CliApp, cmd: Command, json: bool) -> Result<Vec<Event>, Box<dyn Error>> {
    let events = match cmd {
        Command::Start => app.start()?,
        Command::Pause => app.pause()?,
        Command::Stop => app.stop()?,
        Command::Reset => app.reset()?,
        Command::Break => app.start_break()?,
        Command::Note(text) => app.add_note(&text)?,
        Command::Status => vec![app.snapshot()],
        Command::Help => {
            if !json {
                eprintln!("{HELP}");
            }
            Vec::new()
        }
        Command::Quit => Vec::new(),
    };
    Ok(events)
}

fn render(app: &CliApp, events: &[Event], json: bool) -> Result<(), Box<dyn Error>> {
    let mut out = std::io::stdout().lock();
    for event in events {
        if json {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
        } else {
            writeln!(out, "\r{}", describe(event))?;
        }
    }
    if !json && events.iter().any(|e| matches!(e, Event::StateSnapshot { .. })) {
        if let Some(left) = app.remaining_secs() {
            writeln!(out, "{} left", clock_face(left))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::SessionStarted { entry_type, at, .. } => {
            format!("{entry_type} session started at {}", at.with_timezone(&chrono::Local).format("%H:%M:%S"))
        }
        Event::SessionPaused { elapsed_secs } => format!("paused at {}", clock_face(*elapsed_secs)),
        Event::SessionResumed { elapsed_secs } => format!("resumed at {}", clock_face(*elapsed_secs)),
        Event::SessionStopped { entry } => {
            format!("{} recorded: {}", entry.entry_type, clock_face(entry.duration))
        }
        Event::SessionReset => "session discarded".to_string(),
        Event::BreakStarted { .. } => "break started".to_string(),
        Event::SessionCompleted { entry_type, .. } => format!("{entry_type} target reached"),
        Event::NoteUpdated { .. } => "note saved".to_string(),
        Event::SettingsUpdated => "settings saved".to_string(),
        Event::StatsCleared { removed } => format!("{removed} entries removed"),
        Event::StateSnapshot {
            state,
            elapsed_secs,
            current,
            completed_entries,
        } => {
            let kind = current
                .as_ref()
                .map(|e| e.entry_type.to_string())
                .unwrap_or_else(|| "no".to_string());
            format!(
                "{} ({kind} session), elapsed {}, {completed_entries} recorded",
                state_label(*state),
                clock_face(*elapsed_secs)
            )
        }
    }
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "idle",
        SessionState::Running => "running",
        SessionState::Paused => "paused",
    }
}

fn status_line(app: &CliApp) {
    let kind = app
        .current()
        .map(|e| e.entry_type.to_string())
        .unwrap_or_default();
    let left = app.remaining_secs().unwrap_or(0);
    eprint!(
        "\r{kind} {} elapsed, {} left   ",
        clock_face(app.elapsed_secs()),
        clock_face(left)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse_command("start").unwrap(), Some(Command::Start));
        assert_eq!(parse_command("  P ").unwrap(), Some(Command::Pause));
        assert_eq!(parse_command("b").unwrap(), Some(Command::Break));
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("").unwrap(), None);
    }

    #[test]
    fn note_keeps_rest_of_line() {
        assert_eq!(
            parse_command("note fixed the parser, again").unwrap(),
            Some(Command::Note("fixed the parser, again".into()))
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse_command("launch").is_err());
    }
}
