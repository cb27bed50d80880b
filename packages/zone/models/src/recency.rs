//! Relative "time ago" labels for zone reports.

use chrono::{DateTime, Utc};

/// Formats how long ago `at` was, relative to `now`.
///
/// Timestamps less than a minute old, or in the future, read `"just now"`.
/// Otherwise the largest whole unit of minutes, hours or days is used.
#[must_use]
pub fn format_recency(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    plural(elapsed.num_days(), "day")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone as _};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn under_a_minute_is_just_now() {
        assert_eq!(
            format_recency(now() - Duration::seconds(59), now()),
            "just now"
        );
    }

    #[test]
    fn future_timestamps_are_just_now() {
        assert_eq!(
            format_recency(now() + Duration::hours(3), now()),
            "just now"
        );
    }

    #[test]
    fn minutes_hours_and_days() {
        assert_eq!(
            format_recency(now() - Duration::minutes(30), now()),
            "30 minutes ago"
        );
        assert_eq!(
            format_recency(now() - Duration::minutes(1), now()),
            "1 minute ago"
        );
        assert_eq!(
            format_recency(now() - Duration::hours(2), now()),
            "2 hours ago"
        );
        assert_eq!(
            format_recency(now() - Duration::hours(25), now()),
            "1 day ago"
        );
        assert_eq!(
            format_recency(now() - Duration::days(9), now()),
            "9 days ago"
        );
    }
}
