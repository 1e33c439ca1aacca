//! Parsing and validation of the `HH:MM` time-of-day format.
//!
//! Entry times are stored as zero-padded 24-hour `HH:MM` strings with no
//! date or timezone component. Fixed-width zero padding means lexicographic
//! ordering of the strings matches chronological ordering, which the
//! aggregator relies on when sorting a day's entries.

use crate::error::CoreError;

/// Minutes in one day; used for the overnight wraparound policy.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse a zero-padded `HH:MM` string into minutes since midnight.
///
/// Rejects anything that is not exactly five characters of the form
/// `[0-2][0-9]:[0-5][0-9]` with hours in `00..=23`. Malformed times are a
/// validation error rather than a silent zero so that a bad write is caught
/// at the boundary instead of corrupting the month total.
pub fn parse_hhmm(time: &str) -> Result<u32, CoreError> {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(malformed(time));
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return Err(malformed(time));
    }

    let hours = u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0');
    let minutes = u32::from(bytes[3] - b'0') * 10 + u32::from(bytes[4] - b'0');

    if hours > 23 || minutes > 59 {
        return Err(malformed(time));
    }

    Ok(hours * 60 + minutes)
}

/// True if `time` is a well-formed `HH:MM` string.
pub fn is_valid_hhmm(time: &str) -> bool {
    parse_hhmm(time).is_ok()
}

fn malformed(time: &str) -> CoreError {
    CoreError::Validation(format!("Invalid time '{time}': expected zero-padded HH:MM"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_hhmm("00:00").unwrap(), 0);
        assert_eq!(parse_hhmm("09:00").unwrap(), 540);
        assert_eq!(parse_hhmm("17:30").unwrap(), 1050);
        assert_eq!(parse_hhmm("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_reject_malformed() {
        for bad in ["", "9:00", "09:0", "0900", "24:00", "12:60", "ab:cd", "12-30", "12:30:00"] {
            assert!(parse_hhmm(bad).is_err(), "should reject '{bad}'");
        }
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        // The aggregator sorts the raw strings; zero padding makes that valid.
        let mut times = ["17:30", "09:00", "12:15"];
        times.sort();
        assert_eq!(times, ["09:00", "12:15", "17:30"]);
        assert!(parse_hhmm(times[0]).unwrap() < parse_hhmm(times[1]).unwrap());
        assert!(parse_hhmm(times[1]).unwrap() < parse_hhmm(times[2]).unwrap());
    }
}
