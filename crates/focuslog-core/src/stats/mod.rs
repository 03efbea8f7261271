//! Statistics engine.
//!
//! Pure functions over a slice of entries: no storage access, no mutation.
//! Callers pass "now" in the zone that defines calendar days.

mod range;
mod score;
mod summary;

pub use range::{week_start, TimeRange};
pub use score::productivity_score;
pub use summary::{
    compute, daily_stats, most_productive_day, weekly_stats, DailyStats, StatsSnapshot,
    WeeklyStats,
};
