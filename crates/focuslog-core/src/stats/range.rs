use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Window of entries considered by the statistics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    /// Since Sunday midnight of the current week.
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Inclusive lower bound on `start_time`, or `None` for [`TimeRange::All`].
    pub fn start<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let first_day = match self {
            TimeRange::Today => today,
            TimeRange::Week => week_start(today),
            TimeRange::Month => today.with_day(1)?,
            TimeRange::All => return None,
        };
        Some(local_midnight(&now.timezone(), first_day))
    }

    pub fn contains<Tz: TimeZone>(self, start_time: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        self.start(now).map_or(true, |bound| start_time >= bound)
    }
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// First instant of `date` in `tz`. When midnight falls in a DST gap the
/// day starts an hour later.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeRange::Today => "today",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::All => "all",
        })
    }
}

impl FromStr for TimeRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(TimeRange::Today),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "all" => Ok(TimeRange::All),
            other => Err(ValidationError::InvalidValue {
                field: "range".into(),
                message: format!("expected today, week, month or all, got '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn plus2() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    // Wednesday afternoon, UTC+2.
    fn now() -> DateTime<FixedOffset> {
        plus2().with_ymd_and_hms(2024, 6, 5, 15, 0, 0).unwrap()
    }

    #[test]
    fn today_starts_at_local_midnight() {
        let bound = TimeRange::Today.start(&now()).unwrap();
        assert_eq!(bound, Utc.with_ymd_and_hms(2024, 6, 4, 22, 0, 0).unwrap());
    }

    #[test]
    fn week_starts_on_sunday() {
        let bound = TimeRange::Week.start(&now()).unwrap();
        assert_eq!(bound, Utc.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap());
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn month_starts_on_the_first() {
        let bound = TimeRange::Month.start(&now()).unwrap();
        assert_eq!(bound, Utc.with_ymd_and_hms(2024, 5, 31, 22, 0, 0).unwrap());
    }

    #[test]
    fn boundary_instant_is_included() {
        let bound = TimeRange::Today.start(&now()).unwrap();
        assert!(TimeRange::Today.contains(bound, &now()));
        assert!(!TimeRange::Today.contains(bound - Duration::seconds(1), &now()));
        assert!(TimeRange::All.contains(bound - Duration::days(4000), &now()));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Week".parse::<TimeRange>().unwrap(), TimeRange::Week);
        assert!("year".parse::<TimeRange>().is_err());
    }
}
