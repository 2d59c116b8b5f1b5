//! Day-granularity date helpers.
//!
//! Event timestamps are kept as ISO-8601 strings; queries compare only the
//! `YYYY-MM-DD` prefix, so an event's day is the calendar day written in its
//! own timestamp regardless of offset.

use crate::model::settings::{DateFormat, TimeFormat};
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Returns the date part of an ISO-8601 timestamp (text before `T`).
pub fn day_key(timestamp: &str) -> &str {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _)| date)
        .trim()
}

/// Parses the date part of an ISO-8601 timestamp.
pub fn parse_day_key(timestamp: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(day_key(timestamp), DAY_KEY_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn to_day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Today's local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn is_today(date: NaiveDate) -> bool {
    date == today()
}

/// First and last day of `month` (1-based) in `year`.
///
/// Returns `None` for months outside `1..=12` or years chrono cannot
/// represent.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Absolute number of whole days between two dates.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u64 {
    (end - start).num_days().unsigned_abs()
}

/// Renders `date` in one of the user-selectable date patterns.
pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    let (day, month, year) = (date.day(), date.month(), date.year());
    match format {
        DateFormat::DayMonthYear => format!("{day:02}/{month:02}/{year:04}"),
        DateFormat::MonthDayYear => format!("{month:02}/{day:02}/{year:04}"),
        DateFormat::Iso => format!("{year:04}-{month:02}-{day:02}"),
    }
}

/// Renders `time` as `HH:MM` or `h:MM AM/PM`.
pub fn format_time(time: NaiveTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::H24 => format!("{:02}:{:02}", time.hour(), time.minute()),
        TimeFormat::H12 => {
            let (is_pm, hour) = time.hour12();
            let suffix = if is_pm { "PM" } else { "AM" };
            format!("{hour}:{:02} {suffix}", time.minute())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{day_key, days_between, format_date, format_time, month_bounds, parse_day_key};
    use crate::model::settings::{DateFormat, TimeFormat};
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_key_strips_time_part() {
        assert_eq!(day_key("2024-01-10T09:00:00.000Z"), "2024-01-10");
        assert_eq!(day_key("2024-01-10"), "2024-01-10");
        assert_eq!(parse_day_key("garbage"), None);
    }

    #[test]
    fn month_bounds_handle_leap_february_and_december() {
        assert_eq!(month_bounds(2024, 2), Some((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(month_bounds(2023, 12), Some((date(2023, 12, 1), date(2023, 12, 31))));
        assert_eq!(month_bounds(2024, 13), None);
        assert_eq!(month_bounds(2024, 0), None);
    }

    #[test]
    fn days_between_is_symmetric() {
        assert_eq!(days_between(date(2024, 1, 10), date(2024, 1, 13)), 3);
        assert_eq!(days_between(date(2024, 1, 13), date(2024, 1, 10)), 3);
    }

    #[test]
    fn formats_follow_settings_patterns() {
        let day = date(2024, 3, 7);
        assert_eq!(format_date(day, DateFormat::DayMonthYear), "07/03/2024");
        assert_eq!(format_date(day, DateFormat::MonthDayYear), "03/07/2024");
        assert_eq!(format_date(day, DateFormat::Iso), "2024-03-07");

        let time = NaiveTime::from_hms_opt(15, 5, 0).unwrap();
        assert_eq!(format_time(time, TimeFormat::H24), "15:05");
        assert_eq!(format_time(time, TimeFormat::H12), "3:05 PM");
    }
}
