/// Timestamp helpers
///
/// All timestamps are stored as `YYYY-MM-DD HH:MM:SS` text. Expense and task
/// creation times carry a fixed +05:30 shift applied to the UTC clock; it is
/// part of the stored data format and is not configurable.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Storage format for every timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shift applied to creation timestamps (5 hours 30 minutes)
pub const CREATION_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// Formats a UTC instant in storage format
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Creation timestamp for expense and task entries
pub fn creation_timestamp(now: DateTime<Utc>) -> String {
    format_timestamp(now + Duration::minutes(CREATION_OFFSET_MINUTES))
}

/// Same day and hour one calendar month later
///
/// Minutes and seconds are dropped. A day that does not exist in the target
/// month rolls over into the following month (Jan 31 → Mar 2 or 3).
pub fn next_month_same_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if instant.month() == 12 {
        (instant.year() + 1, 1)
    } else {
        (instant.year(), instant.month() + 1)
    };

    // Day 1 exists in every month; the real day is added as an offset so
    // overflow rolls forward instead of failing.
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN);

    let shifted = first
        + Duration::days(i64::from(instant.day()) - 1)
        + Duration::hours(i64::from(instant.hour()));

    shifted.and_utc()
}

/// Named task time range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// The 24 hours up to now; the same window as `Recent`
    Today,
    Tomorrow,
    ThisWeek,
    ThisMonth,
    /// Any other value: from 24 hours ago up to now
    Recent,
}

impl TimeRange {
    /// Parses a `time_range` value (case-insensitive); unknown values map to `Recent`
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "today" => TimeRange::Today,
            "tomorrow" => TimeRange::Tomorrow,
            "this_week" => TimeRange::ThisWeek,
            "this_month" => TimeRange::ThisMonth,
            _ => TimeRange::Recent,
        }
    }

    /// Window for this range; every window starts 24 hours before `now`
    pub fn window(self, now: DateTime<Utc>) -> TimeWindow {
        let start = now - Duration::hours(24);
        let end = match self {
            TimeRange::Today => start + Duration::hours(24),
            TimeRange::Tomorrow => start + Duration::hours(48),
            TimeRange::ThisWeek => start + Duration::hours(24 * 7),
            TimeRange::ThisMonth => next_month_same_hour(start),
            TimeRange::Recent => now,
        };

        TimeWindow { start, end }
    }
}

/// Inclusive time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window bounds in storage format
    pub fn bounds(&self) -> (String, String) {
        (format_timestamp(self.start), format_timestamp(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_creation_timestamp_offset() {
        assert_eq!(
            creation_timestamp(at(2024, 3, 10, 20, 45, 12)),
            "2024-03-11 02:15:12"
        );
    }

    #[test]
    fn test_parse_time_range() {
        assert_eq!(TimeRange::parse("today"), TimeRange::Today);
        assert_eq!(TimeRange::parse("TOMORROW"), TimeRange::Tomorrow);
        assert_eq!(TimeRange::parse("This_Week"), TimeRange::ThisWeek);
        assert_eq!(TimeRange::parse("this_month"), TimeRange::ThisMonth);
        assert_eq!(TimeRange::parse("whenever"), TimeRange::Recent);
    }

    #[test]
    fn test_today_window_is_last_24_hours() {
        let now = at(2024, 5, 15, 12, 0, 0);
        let window = TimeRange::Today.window(now);

        assert_eq!(window.start, at(2024, 5, 14, 12, 0, 0));
        assert_eq!(window.end, now);
    }

    #[test]
    fn test_today_and_unknown_ranges_share_a_window() {
        let now = at(2024, 5, 15, 12, 0, 0);
        assert_eq!(TimeRange::Today.window(now), TimeRange::Recent.window(now));
        assert_ne!(TimeRange::Tomorrow.window(now), TimeRange::Recent.window(now));
    }

    #[test]
    fn test_week_window_spans_seven_days() {
        let now = at(2024, 5, 15, 12, 0, 0);
        let window = TimeRange::ThisWeek.window(now);

        assert_eq!(window.end - window.start, Duration::hours(168));
        assert_eq!(window.end, at(2024, 5, 21, 12, 0, 0));
    }

    #[test]
    fn test_tomorrow_window() {
        let now = at(2024, 5, 15, 12, 0, 0);
        let window = TimeRange::Tomorrow.window(now);
        assert_eq!(window.end, at(2024, 5, 16, 12, 0, 0));
    }

    #[test]
    fn test_month_window_keeps_day_and_hour() {
        let now = at(2024, 5, 15, 12, 34, 56);
        let window = TimeRange::ThisMonth.window(now);

        assert_eq!(window.start, at(2024, 5, 14, 12, 34, 56));
        assert_eq!(window.end, at(2024, 6, 14, 12, 0, 0));
    }

    #[test]
    fn test_next_month_rolls_over_short_months() {
        assert_eq!(
            next_month_same_hour(at(2023, 1, 31, 8, 0, 0)),
            at(2023, 3, 3, 8, 0, 0)
        );
        assert_eq!(
            next_month_same_hour(at(2024, 12, 20, 23, 59, 0)),
            at(2025, 1, 20, 23, 0, 0)
        );
    }

    #[test]
    fn test_window_bounds_format() {
        let window = TimeRange::Today.window(at(2024, 5, 15, 9, 5, 7));
        assert_eq!(
            window.bounds(),
            ("2024-05-14 09:05:07".to_string(), "2024-05-15 09:05:07".to_string())
        );
    }
}
