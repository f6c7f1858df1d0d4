//! Due-date parsing and normalization.
//!
//! Clients send dates in a few loose shapes (`2021-1-21`, `2021/01/21`,
//! `01/21/2021`, full RFC 3339 timestamps). Everything is normalized to a
//! `NaiveDate` and stored and returned as `yyyy-MM-dd`.

use chrono::{DateTime, NaiveDate};

const INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Storage and wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a client-supplied date. Returns `None` for anything that is not a
/// real calendar date, including impossible days such as `2021-02-30`.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}
