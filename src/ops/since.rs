use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};

use super::store::ItemError;

/// Format accepted for explicit dates (local time)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Elapsed time as `HH:MM:SS`, prefixed with `Nd ` once it exceeds a day.
/// Negative durations (clock skew, future dates) show as zero.
pub fn format_since(elapsed: TimeDelta) -> String {
    let seconds = elapsed.num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let clock = format!("{:02}:{:02}:{:02}", hours % 24, minutes % 60, seconds % 60);
    if days > 0 {
        format!("{}d {}", days, clock)
    } else {
        clock
    }
}

/// Time elapsed from `since` to `now`, formatted for display
pub fn since_label(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_since(now.signed_duration_since(since))
}

/// Parse a `YYYY-MM-DD HH:MM:SS` local date
pub fn parse_local_date(text: &str) -> Result<DateTime<Utc>, ItemError> {
    let invalid = || ItemError::InvalidDate(text.to_string());
    let naive = NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| invalid())?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// Render a timestamp as a local `YYYY-MM-DD HH:MM:SS` string
pub fn format_local_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_a_day() {
        assert_eq!(format_since(TimeDelta::seconds(0)), "00:00:00");
        assert_eq!(format_since(TimeDelta::seconds(59)), "00:00:59");
        assert_eq!(format_since(TimeDelta::seconds(3_661)), "01:01:01");
        assert_eq!(format_since(TimeDelta::seconds(86_399)), "23:59:59");
    }

    #[test]
    fn days_prefix() {
        assert_eq!(format_since(TimeDelta::seconds(86_400)), "1d 00:00:00");
        assert_eq!(
            format_since(TimeDelta::days(12) + TimeDelta::seconds(3_725)),
            "12d 01:02:05"
        );
    }

    #[test]
    fn negative_is_zero() {
        assert_eq!(format_since(TimeDelta::seconds(-30)), "00:00:00");
    }

    #[test]
    fn local_date_round_trip() {
        let parsed = parse_local_date("2024-12-25 23:00:00").unwrap();
        assert_eq!(format_local_date(parsed), "2024-12-25 23:00:00");
    }

    #[test]
    fn bad_date_is_rejected() {
        assert_eq!(
            parse_local_date("dsfsd"),
            Err(ItemError::InvalidDate("dsfsd".into()))
        );
        assert!(parse_local_date("2024-12-25").is_err());
    }
}
