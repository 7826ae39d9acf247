use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Validate that `tz_name` is a recognised IANA timezone identifier.
pub fn validate_timezone(tz_name: &str) -> bool {
    tz_name.parse::<Tz>().is_ok()
}

/// Convert a UTC [`DateTime`] to a named timezone for display.
///
/// If the target timezone is invalid, falls back to UTC and logs a warning.
pub fn convert_to_timezone(dt: DateTime<Utc>, tz_name: &str) -> DateTime<Tz> {
    let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!("invalid timezone \"{}\", falling back to UTC", tz_name);
        Tz::UTC
    });
    dt.with_timezone(&tz)
}

// ── Week bucketing ────────────────────────────────────────────────────────────

/// The Monday that starts the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

// ── 12-hour clock ─────────────────────────────────────────────────────────────

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// Map a 24-hour clock hour to its 12-hour representation.
///
/// Hour 0 maps to 12 AM and hour 12 to 12 PM.
pub fn hour_12(hour24: u32) -> (u32, Meridiem) {
    let meridiem = if hour24 < 12 { Meridiem::Am } else { Meridiem::Pm };
    let hour = hour24 % 12;
    (if hour == 0 { 12 } else { hour }, meridiem)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone as _, Timelike};

    // ── validate_timezone ────────────────────────────────────────────────────

    #[test]
    fn test_validate_timezone_valid() {
        assert!(validate_timezone("America/New_York"));
        assert!(validate_timezone("UTC"));
        assert!(validate_timezone("Asia/Tokyo"));
    }

    #[test]
    fn test_validate_timezone_invalid() {
        assert!(!validate_timezone("Mars/Olympus"));
        assert!(!validate_timezone(""));
    }

    // ── convert_to_timezone ──────────────────────────────────────────────────

    #[test]
    fn test_convert_to_timezone() {
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let converted = convert_to_timezone(utc, "America/New_York");
        // New York is UTC-4 in summer (EDT)
        assert_eq!(converted.hour(), 8);
    }

    #[test]
    fn test_convert_to_invalid_timezone_uses_utc() {
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let converted = convert_to_timezone(utc, "Invalid/Zone");
        assert_eq!(converted.hour(), 12);
    }

    // ── week_start ───────────────────────────────────────────────────────────

    #[test]
    fn test_week_start_midweek() {
        // 2024-01-17 is a Wednesday; its week starts Monday 2024-01-15.
        let date = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        assert_eq!(week_start(date), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_week_start_monday_is_itself() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(week_start(monday), monday);
    }

    #[test]
    fn test_week_start_sunday_belongs_to_previous_monday() {
        // 2024-01-21 is a Sunday; the week began Monday 2024-01-15.
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_week_start_crosses_year_boundary() {
        // 2025-01-01 is a Wednesday; its week began Monday 2024-12-30.
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(week_start(date), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
    }

    // ── hour_12 ──────────────────────────────────────────────────────────────

    #[test]
    fn test_hour_12_midnight_is_twelve_am() {
        assert_eq!(hour_12(0), (12, Meridiem::Am));
    }

    #[test]
    fn test_hour_12_noon_is_twelve_pm() {
        assert_eq!(hour_12(12), (12, Meridiem::Pm));
    }

    #[test]
    fn test_hour_12_morning() {
        assert_eq!(hour_12(9), (9, Meridiem::Am));
    }

    #[test]
    fn test_hour_12_afternoon() {
        assert_eq!(hour_12(13), (1, Meridiem::Pm));
        assert_eq!(hour_12(23), (11, Meridiem::Pm));
    }

    // ── Meridiem ─────────────────────────────────────────────────────────────

    #[test]
    fn test_meridiem_display_and_order() {
        assert_eq!(Meridiem::Am.to_string(), "AM");
        assert_eq!(Meridiem::Pm.to_string(), "PM");
        assert!(Meridiem::Am < Meridiem::Pm);
    }

    // ── get_system_timezone ──────────────────────────────────────────────────

    #[test]
    fn test_get_system_timezone_returns_nonempty_string() {
        assert!(!get_system_timezone().is_empty());
    }
}
