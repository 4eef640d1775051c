//! Tolerant timestamp parsing.
//!
//! Exports mix native workbook dates with several textual layouts. Anything
//! that cannot be read as a date/time becomes `None`; parsing never fails a run.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::pipeline::types::Month;
use crate::table::Cell;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Reads a cell as a timestamp. Text is trimmed first; numbers and booleans
/// are not treated as dates.
pub fn parse_timestamp(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_text(s.trim()),
        _ => None,
    }
}

fn parse_text(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }

    // The offset is dropped; the clock time stays as written.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Month and year a ticket occurred in, used by multi-file grouping.
pub fn period(occured: Option<NaiveDateTime>) -> (Option<Month>, Option<i32>) {
    match occured {
        Some(dt) => (Month::new(dt.month()), Some(dt.year())),
        None => (None, None),
    }
}
