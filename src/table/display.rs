//! Cell rendering for the on-screen table.

use crate::types::date_range::format_timestamp;
use crate::types::samples::{FieldValue, Record};

/// Minute precision, in UTC.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders one cell: timestamps as `YYYY-MM-DD HH:MM` (verbatim if they do not
/// parse), measurements with two decimals.
pub fn display_value(value: &FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(raw) => {
            format_timestamp(raw, DISPLAY_TIME_FORMAT).unwrap_or_else(|| raw.to_string())
        }
        FieldValue::Number(number) => format!("{:.2}", number),
    }
}

/// The cells of `record` in column order.
pub fn display_row<R: Record>(record: &R) -> Vec<String> {
    record.values().iter().map(display_value).collect()
}

/// Column labels for `R`.
pub fn headers<R: Record>() -> Vec<String> {
    R::HEADERS.iter().map(|h| h.to_string()).collect()
}
