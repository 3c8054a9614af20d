use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

pub mod health;
pub mod inbound;
pub mod validation;

const ISO_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const LONG_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day], [year]");
const SHORT_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day]");
const WEEKDAY_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday], [month repr:long] [day]");

fn format_with(value: PrimitiveDateTime, format: &[BorrowedFormatItem<'_>]) -> String {
    value
        .format(format)
        .unwrap_or_else(|_| "invalid-date".into())
}

/// `2025-03-03T00:00:00`, the layout used in the persisted document.
pub fn format_iso(value: PrimitiveDateTime) -> String {
    format_with(value, ISO_FORMAT)
}

/// `March 03, 2025`.
pub fn format_long_date(value: PrimitiveDateTime) -> String {
    format_with(value, LONG_DATE_FORMAT)
}

/// `Mar 03`.
pub fn format_short_date(value: PrimitiveDateTime) -> String {
    format_with(value, SHORT_DATE_FORMAT)
}

/// `Monday, March 03`.
pub fn format_weekday_date(value: PrimitiveDateTime) -> String {
    format_with(value, WEEKDAY_DATE_FORMAT)
}
