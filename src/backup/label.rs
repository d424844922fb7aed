//! Backup labels
//!
//! Date and time strings that are safe to use as folder and file names
//! (no slashes or colons).

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};

/// Current local date as `{month}-{day}-{year}`
pub fn date_label() -> String {
    format_date(Local::now().date_naive())
}

/// Current local time as `{hour}.{minute}.{second}`, optionally in 12-hour form
pub fn time_label(use_12_hour: bool) -> String {
    format_time(Local::now().time(), use_12_hour)
}

/// Format a date as `{month}-{day}-{year}` with no zero padding
pub fn format_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.month(), date.day(), date.year())
}

/// Parse a `{month}-{day}-{year}` label back into a date
pub fn parse_date_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label, "%m-%d-%Y").ok()
}

/// Format a time of day as `{hour}.{mm}.{ss}`
///
/// In 12-hour mode the hour is folded and suffixed with ` AM` or ` PM`.
/// Midnight hours are shown as `0`, noon hours as `12`.
pub fn format_time(time: NaiveTime, use_12_hour: bool) -> String {
    let (hour, minute, second) = (time.hour(), time.minute(), time.second());

    if !use_12_hour {
        return format!("{}.{:02}.{:02}", hour, minute, second);
    }

    if hour < 12 {
        format!("{}.{:02}.{:02} AM", hour, minute, second)
    } else {
        let folded = if hour == 12 { 12 } else { hour - 12 };
        format!("{}.{:02}.{:02} PM", folded, minute, second)
    }
}
