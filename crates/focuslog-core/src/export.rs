//! CSV export of displayed entries.
//!
//! Columns: `Date, Start Time, End Time, Duration (minutes), Type, Notes`.
//! Commas in notes become semicolons and nothing is quoted, so every row
//! splits cleanly on `,`.

use std::io::Write;

use chrono::TimeZone;
use csv::{QuoteStyle, WriterBuilder};

use crate::entry::TimeEntry;
use crate::error::Result;

pub const CSV_HEADER: [&str; 6] = [
    "Date",
    "Start Time",
    "End Time",
    "Duration (minutes)",
    "Type",
    "Notes",
];

/// Write one row per entry, formatting dates and times in `tz`.
pub fn write_csv<W: Write, Tz: TimeZone>(entries: &[TimeEntry], tz: &Tz, out: W) -> Result<()>
where
    Tz::Offset: std::fmt::Display,
{
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(out);

    wtr.write_record(CSV_HEADER)?;
    for entry in entries {
        let start = entry.start_time.with_timezone(tz);
        let end = entry
            .end_time
            .map(|t| t.with_timezone(tz).format("%H:%M:%S").to_string())
            .unwrap_or_default();
        wtr.write_record(&[
            start.format("%Y-%m-%d").to_string(),
            start.format("%H:%M:%S").to_string(),
            end,
            duration_minutes(entry.duration).to_string(),
            entry.entry_type.to_string(),
            entry.notes.replace(',', ";"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Seconds to minutes, rounded half up.
fn duration_minutes(secs: u64) -> u64 {
    (secs + 30) / 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryType;
    use chrono::{Duration, Utc};

    #[test]
    fn rows_follow_header_layout() {
        let start = Utc.with_ymd_and_hms(2024, 6, 5, 9, 0, 0).unwrap();
        let mut work = TimeEntry::new(1, EntryType::Work, start, "me");
        work.duration = 1529;
        work.end_time = Some(start + Duration::seconds(1529));
        work.notes = "spec, tests, review".into();
        let active = TimeEntry::new(2, EntryType::ShortBreak, start + Duration::hours(1), "me");

        let mut out = Vec::new();
        write_csv(&[work, active], &Utc, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Date,Start Time,End Time,Duration (minutes),Type,Notes");
        assert_eq!(lines[1], "2024-06-05,09:00:00,09:25:29,25,work,spec; tests; review");
        assert_eq!(lines[2], "2024-06-05,10:00:00,,0,shortBreak,");
        assert!(lines.iter().all(|l| l.split(',').count() == 6));
    }

    #[test]
    fn minutes_round_to_nearest() {
        assert_eq!(duration_minutes(29), 0);
        assert_eq!(duration_minutes(30), 1);
        assert_eq!(duration_minutes(1500), 25);
        assert_eq!(duration_minutes(1529), 25);
        assert_eq!(duration_minutes(1530), 26);
    }
}
