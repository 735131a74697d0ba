//! Date-range rules for booking availability.
//!
//! Bookings are half-open intervals `[date_from, date_to)`: a stay ending on
//! day X and a stay starting on day X do not conflict. This module holds the
//! pure rules; the repository layer applies the same overlap predicate in SQL
//! against existing rows.

use crate::error::DomainError;
use crate::types::Day;

/// Validate a requested booking range against `today`.
///
/// Rejects ranges that start in the past and ranges where `date_from` is not
/// strictly before `date_to` (a zero-night booking is invalid).
pub fn validate_range(date_from: Day, date_to: Day, today: Day) -> Result<(), DomainError> {
    if date_from < today {
        return Err(DomainError::Validation(
            "date_from must not be in the past".into(),
        ));
    }
    if date_from >= date_to {
        return Err(DomainError::Validation(
            "date_from must be before date_to".into(),
        ));
    }
    Ok(())
}

/// Whether two half-open ranges `[a_from, a_to)` and `[b_from, b_to)` overlap.
pub fn ranges_overlap(a_from: Day, a_to: Day, b_from: Day, b_to: Day) -> bool {
    a_from < b_to && a_to > b_from
}

/// Number of nights in a `[date_from, date_to)` range.
///
/// Callers must have validated the range first; an inverted range yields a
/// negative count.
pub fn nights(date_from: Day, date_to: Day) -> i64 {
    (date_to - date_from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> Day {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_past_start() {
        let today = day(2026, 3, 10);
        let result = validate_range(day(2026, 3, 9), day(2026, 3, 12), today);
        assert!(result.is_err(), "start before today must be rejected");
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        let today = day(2026, 3, 10);
        assert!(validate_range(day(2026, 3, 12), day(2026, 3, 11), today).is_err());
        // Zero nights: from == to.
        assert!(validate_range(day(2026, 3, 12), day(2026, 3, 12), today).is_err());
    }

    #[test]
    fn accepts_booking_starting_today() {
        let today = day(2026, 3, 10);
        assert!(validate_range(today, day(2026, 3, 11), today).is_ok());
    }

    #[test]
    fn overlap_detection() {
        let (f, t) = (day(2026, 4, 10), day(2026, 4, 15));
        // Fully inside.
        assert!(ranges_overlap(f, t, day(2026, 4, 11), day(2026, 4, 12)));
        // Straddles the start.
        assert!(ranges_overlap(f, t, day(2026, 4, 8), day(2026, 4, 11)));
        // Straddles the end.
        assert!(ranges_overlap(f, t, day(2026, 4, 14), day(2026, 4, 20)));
        // Identical range.
        assert!(ranges_overlap(f, t, f, t));
    }

    #[test]
    fn back_to_back_stays_do_not_conflict() {
        let (f, t) = (day(2026, 4, 10), day(2026, 4, 15));
        // Checkout day == checkin day of the next guest.
        assert!(!ranges_overlap(f, t, t, day(2026, 4, 18)));
        assert!(!ranges_overlap(f, t, day(2026, 4, 5), f));
    }

    #[test]
    fn night_count() {
        assert_eq!(nights(day(2026, 4, 10), day(2026, 4, 15)), 5);
        assert_eq!(nights(day(2026, 4, 10), day(2026, 4, 11)), 1);
    }
}
