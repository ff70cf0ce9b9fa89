/// Utilities for date and time formatting
///
/// Dates are shown and compared in the browser's local time zone.
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Value format of `<input type="date">`
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// NaiveDate -> "2026-10-16"
pub fn to_input_value(date: NaiveDate) -> String {
    date.format(DATE_INPUT_FORMAT).to_string()
}

/// "2026-10-16" -> NaiveDate; None for empty or malformed input
pub fn from_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT).ok()
}

/// Clock time of a timestamp in `tz`, e.g. "09:05"
pub fn format_time_in<Tz: TimeZone>(time: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz).format("%H:%M").to_string()
}

pub fn format_time(time: DateTime<Utc>) -> String {
    format_time_in(time, &Local)
}

/// "₹" + amount, without a trailing ".0"
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!(
        "{}{}",
        symbol,
        contracts::domain::a001_delivery::aggregate::format_amount(amount)
    )
}
