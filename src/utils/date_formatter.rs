use chrono::{TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan 2024
    HourMin,    // 12 Jan 10:30
    HourMinSec, // 10:30:15
}

/// Picks the coarsest format that still separates values across the visible span (seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    let span = visible_range_sec.abs();
    if span > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if span > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if span > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if span > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats seconds since the unix epoch as UTC text.
pub fn format_timestamp(seconds: f64, format: SmartDateFormat) -> String {
    if !seconds.is_finite() {
        return format!("{seconds}");
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    let dt = match Utc.timestamp_opt(whole as i64, nanos) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return format!("{:.2}", seconds),
    };

    match format {
        SmartDateFormat::Year => dt.format("%Y").to_string(),
        SmartDateFormat::MonthYear => dt.format("%b %Y").to_string(),
        SmartDateFormat::DayMonth => dt.format("%d %b %Y").to_string(),
        SmartDateFormat::HourMin => dt.format("%d %b %H:%M").to_string(),
        SmartDateFormat::HourMinSec => dt.format("%H:%M:%S").to_string(),
    }
}

/// Text of a time-axis value: `value` seconds after `epoch`, granularity from `span`.
pub fn format_axis_time(value: f64, epoch: f64, span: f64) -> String {
    format_timestamp(epoch + value, determine_date_format(span))
}
