//! Month and date key validation.
//!
//! Month records are keyed by `YYYY-MM` and the entries inside them by
//! `YYYY-MM-DD`, both zero-padded. Every date key in a month record must
//! carry that record's month prefix; the API boundary enforces this before
//! a mutation is applied.

use crate::error::CoreError;

/// Validate a `YYYY-MM` month key.
pub fn validate_month_key(month: &str) -> Result<(), CoreError> {
    let bytes = month.as_bytes();
    let ok = bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit);

    if !ok {
        return Err(CoreError::Validation(format!(
            "Invalid month key '{month}': expected YYYY-MM"
        )));
    }

    let mm = (bytes[5] - b'0') * 10 + (bytes[6] - b'0');
    if !(1..=12).contains(&mm) {
        return Err(CoreError::Validation(format!(
            "Invalid month key '{month}': month out of range"
        )));
    }
    Ok(())
}

/// Validate a `YYYY-MM-DD` date key and check that it belongs to `month`.
pub fn validate_date_key(date: &str, month: &str) -> Result<(), CoreError> {
    validate_month_key(month)?;

    let bytes = date.as_bytes();
    let ok = bytes.len() == 10
        && bytes[7] == b'-'
        && bytes[8].is_ascii_digit()
        && bytes[9].is_ascii_digit();

    if !ok || !date.starts_with(month) {
        return Err(CoreError::Validation(format!(
            "Invalid date key '{date}': expected YYYY-MM-DD within month {month}"
        )));
    }

    let dd = (bytes[8] - b'0') * 10 + (bytes[9] - b'0');
    if !(1..=31).contains(&dd) {
        return Err(CoreError::Validation(format!(
            "Invalid date key '{date}': day out of range"
        )));
    }
    Ok(())
}
