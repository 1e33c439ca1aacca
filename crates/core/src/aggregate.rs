//! Daily and monthly worked-hours aggregation.
//!
//! A day's worked hours come from pairing `check-in`/`check-out` entries
//! chronologically: each check-out closes the most recent open check-in and
//! contributes the elapsed minutes. A month total is the flat sum of every
//! day in the record. Totals are recomputed from scratch on every mutation;
//! there is no incremental update.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::event::{Event, EventType};
use crate::time::{parse_hhmm, MINUTES_PER_DAY};

/// Date key (`YYYY-MM-DD`) to that day's entry list.
///
/// `BTreeMap` keeps serialization order stable; the aggregator itself does
/// not care about key order.
pub type DayMap = BTreeMap<String, Vec<Event>>;

/// How to treat a day that looks like an overnight shift: a check-out
/// before the first check-in of the day, combined with a check-in that is
/// still open at end of day. The original system silently dropped both
/// sides and counted nothing; that ambiguity is replaced by an explicit
/// policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OvernightPolicy {
    /// Treat the pattern as invalid input and fail the mutation.
    #[default]
    Reject,
    /// Treat the trailing check-in as running past midnight into the
    /// leading check-out (add 24h to the check-out).
    NextDay,
}

impl OvernightPolicy {
    /// Parse from a config string (`reject` / `next-day`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "reject" => Ok(OvernightPolicy::Reject),
            "next-day" => Ok(OvernightPolicy::NextDay),
            other => Err(CoreError::Validation(format!(
                "Unknown overnight policy '{other}': expected 'reject' or 'next-day'"
            ))),
        }
    }
}

/// Compute the worked hours for one day's entries.
///
/// Entries are sorted by time internally, so the result is invariant under
/// any permutation of the input. An unmatched check-in (followed by another
/// check-in before any check-out) is discarded without contributing; a
/// check-out with no open check-in contributes nothing. All entry types
/// other than check-in/check-out are ignored for duration purposes.
///
/// The one exception to the silent-discard rule is the overnight pattern
/// described on [`OvernightPolicy`], which is either rejected or counted
/// as a midnight-crossing pair.
///
/// Returns unrounded decimal hours; rounding is a display concern.
pub fn compute_daily_hours(events: &[Event], policy: OvernightPolicy) -> Result<f64, CoreError> {
    if events.is_empty() {
        return Ok(0.0);
    }

    // Lexicographic sort is chronological for fixed-width HH:MM. Ties are
    // broken by kind and then id so the result never depends on input
    // order: a check-in at the same minute as a check-out sorts ahead of
    // it and pairs with it instead of tripping the overnight detection.
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| {
        a.time
            .cmp(&b.time)
            .then_with(|| pairing_rank(a.event_type).cmp(&pairing_rank(b.event_type)))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut total_minutes: i64 = 0;
    let mut open_check_in: Option<u32> = None;
    // Earliest check-out seen before any check-in of the day.
    let mut leading_check_out: Option<u32> = None;
    let mut seen_check_in = false;

    for event in sorted {
        match event.event_type {
            EventType::CheckIn => {
                // A still-open check-in is overwritten and never counted.
                open_check_in = Some(parse_hhmm(&event.time)?);
                seen_check_in = true;
            }
            EventType::CheckOut => {
                let end = parse_hhmm(&event.time)?;
                match open_check_in.take() {
                    Some(start) => {
                        // Sorted input guarantees end >= start here.
                        total_minutes += i64::from(end - start);
                    }
                    None => {
                        if !seen_check_in && leading_check_out.is_none() {
                            leading_check_out = Some(end);
                        }
                        // Otherwise: unmatched check-out, contributes nothing.
                    }
                }
            }
            _ => {}
        }
    }

    // A leading check-out together with a check-in still open at end of
    // day is the signature of a shift crossing midnight.
    if let (Some(end), Some(start)) = (leading_check_out, open_check_in) {
        match policy {
            OvernightPolicy::Reject => {
                return Err(CoreError::Validation(
                    "Day has a check-out before its first check-in and an unclosed \
                     check-in; overnight shifts are not accepted"
                        .to_string(),
                ));
            }
            OvernightPolicy::NextDay => {
                total_minutes += i64::from(end + MINUTES_PER_DAY - start);
            }
        }
    }

    Ok(total_minutes as f64 / 60.0)
}

/// Tie-break rank for entries sharing the same `HH:MM`: check-ins first,
/// check-outs last, everything else in between.
fn pairing_rank(event_type: EventType) -> u8 {
    match event_type {
        EventType::CheckIn => 0,
        EventType::CheckOut => 2,
        _ => 1,
    }
}

/// Compute the month total: the flat sum of [`compute_daily_hours`] over
/// every date key in the map. Days that contribute nothing still
/// participate with 0.
pub fn compute_month_total(day_map: &DayMap, policy: OvernightPolicy) -> Result<f64, CoreError> {
    let mut total = 0.0;
    for events in day_map.values() {
        total += compute_daily_hours(events, policy)?;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn entry(id: i64, event_type: EventType, time: &str) -> Event {
        Event {
            id,
            event_type,
            label: event_type.label().to_string(),
            time: time.to_string(),
            comment: None,
            location: None,
            recorded_at: None,
            is_edited: false,
        }
    }

    #[test]
    fn test_empty_day_is_zero() {
        assert_eq!(compute_daily_hours(&[], OvernightPolicy::Reject).unwrap(), 0.0);
    }

    #[test]
    fn test_simple_pair() {
        let day = vec![
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::CheckOut, "17:30"),
        ];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 8.5);
    }

    #[test]
    fn test_break_does_not_subtract() {
        let day = vec![
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::Break, "12:00"),
            entry(3, EventType::CheckOut, "17:00"),
        ];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 8.0);
    }

    #[test]
    fn test_permutation_invariance() {
        let day = vec![
            entry(3, EventType::CheckOut, "17:30"),
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::Break, "12:00"),
        ];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 8.5);
    }

    #[test]
    fn test_equal_time_pair_is_permutation_invariant() {
        // A zero-length pair must pair (and count nothing) in either input
        // order, not look like an overnight day.
        let day = vec![
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::CheckOut, "09:00"),
        ];
        let reversed: Vec<Event> = day.iter().rev().cloned().collect();

        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 0.0);
        assert_eq!(compute_daily_hours(&reversed, OvernightPolicy::Reject).unwrap(), 0.0);
    }

    #[test]
    fn test_equal_time_pair_inside_longer_day() {
        let day = vec![
            entry(4, EventType::CheckOut, "12:00"),
            entry(3, EventType::CheckIn, "12:00"),
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::CheckOut, "09:00"),
        ];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 0.0);
    }

    #[test]
    fn test_second_check_in_discards_first() {
        let day = vec![
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::CheckIn, "10:00"),
            entry(3, EventType::CheckOut, "15:00"),
        ];
        // Only the 10:00 check-in pairs; the 09:00 one is never counted.
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 5.0);
    }

    #[test]
    fn test_lone_check_out_is_ignored() {
        let day = vec![entry(1, EventType::CheckOut, "12:00")];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 0.0);
    }

    #[test]
    fn test_trailing_open_check_in_is_discarded() {
        let day = vec![
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::CheckOut, "12:00"),
            entry(3, EventType::CheckIn, "13:00"),
        ];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 3.0);
    }

    #[test]
    fn test_multiple_pairs_sum() {
        let day = vec![
            entry(1, EventType::CheckIn, "09:00"),
            entry(2, EventType::CheckOut, "12:00"),
            entry(3, EventType::CheckIn, "13:00"),
            entry(4, EventType::CheckOut, "17:15"),
        ];
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::Reject).unwrap(), 7.25);
    }

    #[test]
    fn test_overnight_pattern_rejected_by_default() {
        // A night shift entered on one day: checked out at 06:00, checked
        // back in at 22:00 with no closing check-out.
        let day = vec![
            entry(1, EventType::CheckOut, "06:00"),
            entry(2, EventType::CheckIn, "22:00"),
        ];
        let result = compute_daily_hours(&day, OvernightPolicy::Reject);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_overnight_pattern_wraps_under_next_day() {
        let day = vec![
            entry(1, EventType::CheckOut, "06:00"),
            entry(2, EventType::CheckIn, "22:00"),
        ];
        // 22:00 -> 06:00 next day is 8 hours.
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::NextDay).unwrap(), 8.0);
    }

    #[test]
    fn test_overnight_pattern_with_normal_pair_in_between() {
        let day = vec![
            entry(1, EventType::CheckOut, "07:00"),
            entry(2, EventType::CheckIn, "10:00"),
            entry(3, EventType::CheckOut, "14:00"),
            entry(4, EventType::CheckIn, "23:00"),
        ];
        // 4h day pair plus 23:00 -> 07:00 wrap = 12h.
        assert_eq!(compute_daily_hours(&day, OvernightPolicy::NextDay).unwrap(), 12.0);
    }

    #[test]
    fn test_malformed_time_fails_fast() {
        let day = vec![
            entry(1, EventType::CheckIn, "9am"),
            entry(2, EventType::CheckOut, "17:00"),
        ];
        let result = compute_daily_hours(&day, OvernightPolicy::Reject);
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_month_total_is_flat_sum() {
        let mut map = DayMap::new();
        map.insert(
            "2024-01-01".to_string(),
            vec![
                entry(1, EventType::CheckIn, "09:00"),
                entry(2, EventType::CheckOut, "17:30"),
            ],
        );
        map.insert(
            "2024-01-02".to_string(),
            vec![
                entry(3, EventType::CheckIn, "10:00"),
                entry(4, EventType::CheckOut, "14:00"),
            ],
        );
        // A day with no countable pair still participates, contributing 0.
        map.insert("2024-01-03".to_string(), vec![entry(5, EventType::Break, "12:00")]);

        assert_eq!(compute_month_total(&map, OvernightPolicy::Reject).unwrap(), 12.5);
    }

    #[test]
    fn test_month_total_recompute_is_idempotent() {
        let mut map = DayMap::new();
        map.insert(
            "2024-03-11".to_string(),
            vec![
                entry(1, EventType::CheckIn, "08:45"),
                entry(2, EventType::CheckOut, "16:15"),
            ],
        );
        let first = compute_month_total(&map, OvernightPolicy::Reject).unwrap();
        let second = compute_month_total(&map, OvernightPolicy::Reject).unwrap();
        assert_eq!(first, second);
    }
}
