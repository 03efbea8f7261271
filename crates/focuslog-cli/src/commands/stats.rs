use clap::Args;
use focuslog_core::{Config, StatsSnapshot, TimeRange};

use super::{hours_minutes, open_app};

#[derive(Args)]
pub struct StatsArgs {
    /// today, week, month or all
    #[arg(long, default_value = "all")]
    range: TimeRange,
    /// Leave breaks out of the daily rows
    #[arg(long)]
    no_breaks: bool,
    /// Print the full snapshot as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: StatsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let snapshot = app.stats(args.range, !args.no_breaks, &chrono::Local::now());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_summary(&snapshot);
    }
    Ok(())
}

fn print_summary(s: &StatsSnapshot) {
    println!("Range:         {}", s.range);
    println!("Work:          {} ({} sessions)", hours_minutes(s.total_work_time), s.work_sessions);
    println!(
        "Breaks:        {} ({} short, {} long)",
        hours_minutes(s.total_break_time),
        s.short_breaks,
        s.long_breaks
    );
    println!("Productivity:  {}/100", s.productivity_score);
    if let Some(best) = &s.most_productive_day {
        println!("Best day:      {} ({})", best.date, hours_minutes(best.total_work_time));
    }

    if !s.daily.is_empty() {
        println!();
        println!("{:<12} {:>9} {:>9} {:>9}", "Date", "Work", "Break", "Sessions");
        for day in &s.daily {
            println!(
                "{:<12} {:>9} {:>9} {:>9}",
                day.date.to_string(),
                hours_minutes(day.total_work_time),
                hours_minutes(day.total_break_time),
                day.sessions
            );
        }
    }

    if s.weekly.len() > 1 {
        println!();
        println!("{:<12} {:>9} {:>9} {:>9}", "Week of", "Work", "Break", "Days");
        for week in &s.weekly {
            println!(
                "{:<12} {:>9} {:>9} {:>9}",
                week.week_start.to_string(),
                hours_minutes(week.total_work_time),
                hours_minutes(week.total_break_time),
                week.active_days
            );
        }
    }
}
