// Utility functions for community-feed

pub mod clock;
pub mod ids;

use chrono::{DateTime, Utc};

pub use clock::{Clock, FixedClock, SystemClock};

/// Render a timestamp relative to `now` the way the post list shows it:
/// minutes below an hour, hours below a day, days otherwise.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes().max(0);
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", days)
    }
}

/// Fractional hours elapsed between `from` and `now`, never negative
pub fn hours_between(from: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - from).num_milliseconds().max(0);
    millis as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now, now), "0m ago");
        assert_eq!(format_relative_time(now - Duration::seconds(59), now), "0m ago");
        assert_eq!(format_relative_time(now - Duration::minutes(59), now), "59m ago");
        assert_eq!(format_relative_time(now - Duration::minutes(60), now), "1h ago");
        assert_eq!(format_relative_time(now - Duration::hours(23), now), "23h ago");
        assert_eq!(format_relative_time(now - Duration::hours(49), now), "2d ago");
    }

    #[test]
    fn test_format_relative_time_future_is_zero() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now + Duration::hours(3), now), "0m ago");
    }

    #[test]
    fn test_hours_between() {
        let now = Utc::now();
        assert!((hours_between(now - Duration::minutes(90), now) - 1.5).abs() < 1e-9);
        assert_eq!(hours_between(now + Duration::hours(1), now), 0.0);
    }
}
