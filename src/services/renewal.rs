//! Loan renewal date rule.
//!
//! The one real domain rule in the catalog: a renewal date must fall within
//! a bounded future window. Kept pure and synchronous; `today` is always an
//! explicit parameter so the rule is reproducible in tests.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Upper bound of the renewal window, inclusive (4 weeks)
pub const MAX_AHEAD_DAYS: i64 = 28;

/// Offset of the default proposal offered to callers (3 weeks)
pub const DEFAULT_PROPOSAL_DAYS: i64 = 21;

/// Rejection reasons for a proposed renewal date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenewalError {
    #[error("Invalid date - renewal in past")]
    PastDate,
    #[error("Invalid date - renewal more than 4 weeks ahead")]
    TooFarAhead,
}

/// Decide whether a proposed renewal date is acceptable.
///
/// Accepts any date from `today` through `today + 28 days`, both inclusive.
/// The past check runs first, so a date that is both in the past and out of
/// window reports the past-date reason.
pub fn validate_renewal_date(proposed: NaiveDate, today: NaiveDate) -> Result<(), RenewalError> {
    if proposed < today {
        return Err(RenewalError::PastDate);
    }
    if proposed > today + Duration::days(MAX_AHEAD_DAYS) {
        return Err(RenewalError::TooFarAhead);
    }
    Ok(())
}

/// Default proposal offered to a caller who has not yet supplied a date.
/// A convenience value, not a validity boundary; it always validates.
pub fn default_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(DEFAULT_PROPOSAL_DAYS)
}

/// Resolve a submission to the date to persist: the submitted date when one
/// was given, otherwise the default proposal. The result is validated either
/// way.
pub fn check_submission(
    submitted: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, RenewalError> {
    let proposed = submitted.unwrap_or_else(|| default_renewal_date(today));
    validate_renewal_date(proposed, today)?;
    Ok(proposed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rejects_date_in_past() {
        let today = date(2024, 1, 10);
        assert_eq!(
            validate_renewal_date(date(2024, 1, 3), today),
            Err(RenewalError::PastDate)
        );
        assert_eq!(
            validate_renewal_date(today - Duration::days(1), today),
            Err(RenewalError::PastDate)
        );
    }

    #[test]
    fn accepts_today() {
        let today = date(2024, 1, 1);
        assert_eq!(validate_renewal_date(today, today), Ok(()));
    }

    #[test]
    fn accepts_dates_within_four_weeks() {
        let today = date(2024, 1, 1);
        assert_eq!(validate_renewal_date(date(2024, 1, 10), today), Ok(()));
        assert_eq!(
            validate_renewal_date(today + Duration::days(21), today),
            Ok(())
        );
    }

    #[test]
    fn four_week_boundary_is_inclusive() {
        let today = date(2024, 1, 1);
        assert_eq!(
            validate_renewal_date(today + Duration::days(28), today),
            Ok(())
        );
        assert_eq!(
            validate_renewal_date(today + Duration::days(29), today),
            Err(RenewalError::TooFarAhead)
        );
    }

    #[test]
    fn rejects_date_too_far_ahead() {
        // 36 days out
        let today = date(2024, 1, 1);
        assert_eq!(
            validate_renewal_date(date(2024, 2, 6), today),
            Err(RenewalError::TooFarAhead)
        );
    }

    #[test]
    fn boundary_holds_across_month_ends() {
        // Windows spanning February and a year boundary still count 28 days
        let today = date(2024, 2, 1);
        assert_eq!(
            validate_renewal_date(date(2024, 2, 29), today),
            Ok(())
        );
        assert_eq!(
            validate_renewal_date(date(2024, 3, 1), today),
            Err(RenewalError::TooFarAhead)
        );

        let today = date(2023, 12, 20);
        assert_eq!(validate_renewal_date(date(2024, 1, 17), today), Ok(()));
        assert_eq!(
            validate_renewal_date(date(2024, 1, 18), today),
            Err(RenewalError::TooFarAhead)
        );
    }

    #[test]
    fn default_proposal_is_three_weeks_out() {
        let today = date(2024, 1, 1);
        assert_eq!(default_renewal_date(today), date(2024, 1, 22));
    }

    #[test]
    fn default_proposal_always_validates() {
        let today = date(2024, 1, 1);
        assert_eq!(validate_renewal_date(default_renewal_date(today), today), Ok(()));
    }

    #[test]
    fn submission_falls_back_to_default() {
        let today = date(2024, 1, 1);
        assert_eq!(check_submission(None, today), Ok(date(2024, 1, 22)));
        assert_eq!(
            check_submission(Some(date(2024, 1, 10)), today),
            Ok(date(2024, 1, 10))
        );
        assert_eq!(
            check_submission(Some(date(2023, 12, 25)), today),
            Err(RenewalError::PastDate)
        );
    }

    #[test]
    fn error_messages_match_rejection_reasons() {
        assert_eq!(
            RenewalError::PastDate.to_string(),
            "Invalid date - renewal in past"
        );
        assert_eq!(
            RenewalError::TooFarAhead.to_string(),
            "Invalid date - renewal more than 4 weeks ahead"
        );
    }
}
