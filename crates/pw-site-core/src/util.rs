//! Date and time display helpers.

use chrono::{DateTime, NaiveDate};

fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|dt| dt.date_naive()))
}

/// `2024-03-10` → `March 10, 2024`. Also accepts RFC 3339 timestamps.
pub fn format_date(input: &str) -> Option<String> {
    parse_date(input).map(|d| d.format("%B %-d, %Y").to_string())
}

/// US short date, `2024-03-10T09:30:00Z` → `3/10/2024`.
pub fn format_short_date(input: &str) -> Option<String> {
    parse_date(input).map(|d| d.format("%-m/%-d/%Y").to_string())
}

/// 24-hour `HH:MM` → 12-hour `H:MM AM/PM`. Minutes are copied verbatim.
pub fn format_time(input: &str) -> Option<String> {
    let (hours, minutes) = input.split_once(':')?;
    let hour: u32 = hours.trim().parse().ok()?;
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Some(format!("{display_hour}:{minutes} {meridiem}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates() {
        assert_eq!(format_date("2024-03-10").as_deref(), Some("March 10, 2024"));
        assert_eq!(
            format_date("2026-12-25T18:00:00-05:00").as_deref(),
            Some("December 25, 2026")
        );
        assert_eq!(format_date("next sunday"), None);
    }

    #[test]
    fn short_dates() {
        assert_eq!(
            format_short_date("2024-03-10T09:30:00.000Z").as_deref(),
            Some("3/10/2024")
        );
        assert_eq!(format_short_date(""), None);
    }

    #[test]
    fn twelve_hour_times() {
        assert_eq!(format_time("18:30").as_deref(), Some("6:30 PM"));
        assert_eq!(format_time("00:05").as_deref(), Some("12:05 AM"));
        assert_eq!(format_time("12:00").as_deref(), Some("12:00 PM"));
        assert_eq!(format_time("09:15").as_deref(), Some("9:15 AM"));
        assert_eq!(format_time("0930"), None);
        assert_eq!(format_time("ab:cd"), None);
    }
}
