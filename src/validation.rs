//! Raw text field parsing. Front-ends collect strings; these helpers turn them
//! into typed values or a recoverable error naming the offending field.

use chrono::NaiveDate;

use crate::error::{Error, Result, ValidationError};

/// Date format used for storage, input fields and report titles.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim a field and reject it when empty.
pub fn require<'a>(field: &'static str, raw: &'a str) -> Result<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field).into())
    } else {
        Ok(trimmed)
    }
}

/// Parse a required decimal amount. Zero and negative values are accepted;
/// non-finite values are not because SQLite cannot store them as REAL.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64> {
    let trimmed = require(field, raw)?;
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        }
        .into()),
    }
}

/// Parse a `YYYY-MM-DD` calendar date. Exactly four year digits: stored
/// dates compare as text, so signed or five-digit years would sort wrongly.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let invalid = || Error::InvalidDateFormat(trimmed.to_string());
    if !has_date_shape(trimmed) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Collapse an optional field to `None` when it is absent or only whitespace.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}
