//! Aggregation of time entries into totals, daily and weekly breakdowns.
//!
//! Totals are computed over every entry in the time range. The
//! `include_breaks` flag only narrows the display list, and with it the
//! daily and weekly rows.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::range::{week_start, TimeRange};
use super::score::productivity_score;
use crate::entry::{EntryType, TimeEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_work_time: u64,
    pub total_break_time: u64,
    /// Work sessions started on this date.
    pub sessions: u32,
}

impl DailyStats {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_work_time: 0,
            total_break_time: 0,
            sessions: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Sunday that opens the week.
    pub week_start: NaiveDate,
    pub total_work_time: u64,
    pub total_break_time: u64,
    pub sessions: u32,
    /// Days in the week with at least one displayed entry.
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub range: TimeRange,
    pub include_breaks: bool,
    pub total_work_time: u64,
    pub total_break_time: u64,
    pub work_sessions: u32,
    pub short_breaks: u32,
    pub long_breaks: u32,
    pub productivity_score: u8,
    /// Newest day first.
    pub daily: Vec<DailyStats>,
    /// Newest week first.
    pub weekly: Vec<WeeklyStats>,
    pub most_productive_day: Option<DailyStats>,
    /// Range-filtered entries, minus breaks unless `include_breaks`.
    pub entries: Vec<TimeEntry>,
}

/// Compute a statistics snapshot. Calendar days are taken in `now`'s zone.
pub fn compute<Tz: TimeZone>(
    entries: &[TimeEntry],
    range: TimeRange,
    include_breaks: bool,
    now: &DateTime<Tz>,
) -> StatsSnapshot {
    let in_range: Vec<&TimeEntry> = entries
        .iter()
        .filter(|e| range.contains(e.start_time, now))
        .collect();

    let mut total_work_time = 0u64;
    let mut total_break_time = 0u64;
    let (mut work_sessions, mut short_breaks, mut long_breaks) = (0u32, 0u32, 0u32);
    for entry in &in_range {
        match entry.entry_type {
            EntryType::Work => {
                total_work_time += entry.duration;
                work_sessions += 1;
            }
            EntryType::ShortBreak => {
                total_break_time += entry.duration;
                short_breaks += 1;
            }
            EntryType::LongBreak => {
                total_break_time += entry.duration;
                long_breaks += 1;
            }
        }
    }

    let displayed: Vec<TimeEntry> = in_range
        .into_iter()
        .filter(|e| include_breaks || !e.is_break())
        .cloned()
        .collect();

    let daily = daily_stats(&displayed, &now.timezone());
    let weekly = weekly_stats(&daily);
    let most_productive_day = most_productive_day(&daily).cloned();

    StatsSnapshot {
        range,
        include_breaks,
        total_work_time,
        total_break_time,
        work_sessions,
        short_breaks,
        long_breaks,
        productivity_score: productivity_score(total_work_time, total_break_time),
        daily,
        weekly,
        most_productive_day,
        entries: displayed,
    }
}

/// Group entries by local start date, newest day first.
pub fn daily_stats<Tz: TimeZone>(entries: &[TimeEntry], tz: &Tz) -> Vec<DailyStats> {
    let mut days: BTreeMap<NaiveDate, DailyStats> = BTreeMap::new();
    for entry in entries {
        let date = entry.start_time.with_timezone(tz).date_naive();
        let day = days.entry(date).or_insert_with(|| DailyStats::new(date));
        if entry.is_break() {
            day.total_break_time += entry.duration;
        } else {
            day.total_work_time += entry.duration;
            day.sessions += 1;
        }
    }
    days.into_values().rev().collect()
}

/// Roll daily rows up into Sunday-based weeks, newest week first.
pub fn weekly_stats(daily: &[DailyStats]) -> Vec<WeeklyStats> {
    let mut weeks: BTreeMap<NaiveDate, WeeklyStats> = BTreeMap::new();
    for day in daily {
        let start = week_start(day.date);
        let week = weeks.entry(start).or_insert_with(|| WeeklyStats {
            week_start: start,
            total_work_time: 0,
            total_break_time: 0,
            sessions: 0,
            active_days: 0,
        });
        week.total_work_time += day.total_work_time;
        week.total_break_time += day.total_break_time;
        week.sessions += day.sessions;
        week.active_days += 1;
    }
    weeks.into_values().rev().collect()
}

/// Day with the most work time; ties go to the earliest row in `daily`.
pub fn most_productive_day(daily: &[DailyStats]) -> Option<&DailyStats> {
    daily.iter().fold(None, |best: Option<&DailyStats>, day| match best {
        Some(b) if b.total_work_time >= day.total_work_time => Some(b),
        _ => Some(day),
    })
}
