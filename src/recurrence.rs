// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expands a transaction template into dated occurrences.
//!
//! Monthly and yearly dates are measured from the first occurrence, not
//! chained from the previous one, and land on the last day of the month
//! when the anchor day does not exist: a series anchored on Jan 31 runs
//! Jan 31, Feb 29 (or 28), Mar 31, Apr 30, ...

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use rusqlite::Connection;
use tracing::info;
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger;
use crate::models::{Cadence, TransactionTemplate};
use crate::utils::open_ended_occurrences;

/// Upper bound for any single expansion, end date or not.
pub const MAX_OCCURRENCES: usize = 200;

impl Cadence {
    /// The `n`th date of a series anchored at `anchor` (`n == 0` is the
    /// anchor itself).
    pub fn nth_date(&self, anchor: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Cadence::None => (n == 0).then_some(anchor),
            Cadence::Weekly => anchor.checked_add_days(Days::new(7 * n as u64)),
            Cadence::Biweekly => anchor.checked_add_days(Days::new(14 * n as u64)),
            Cadence::Semimonthly => anchor.checked_add_days(Days::new(15 * n as u64)),
            Cadence::Monthly => anchor.checked_add_months(Months::new(n)),
            Cadence::Yearly => anchor.checked_add_months(Months::new(12 * n)),
        }
    }

    /// Fixed-length approximation of one step, in days.
    pub fn nominal_days(&self) -> Option<i64> {
        match self {
            Cadence::None => None,
            Cadence::Weekly => Some(7),
            Cadence::Biweekly => Some(14),
            Cadence::Semimonthly => Some(15),
            Cadence::Monthly => Some(30),
            Cadence::Yearly => Some(365),
        }
    }

    fn honours_weekday(&self) -> bool {
        matches!(self, Cadence::Weekly | Cadence::Biweekly)
    }
}

/// When and how often a template is stamped out.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrencePlan {
    pub cadence: Cadence,
    /// Date of a one-off transaction, and the fallback anchor when `start`
    /// is not given.
    pub date: NaiveDate,
    pub start: Option<NaiveDate>,
    /// Inclusive; `None` means open-ended.
    pub end: Option<NaiveDate>,
    /// Only consulted when `start` is `None`.
    pub preferred_weekday: Option<Weekday>,
}

impl RecurrencePlan {
    pub fn once(date: NaiveDate) -> Self {
        RecurrencePlan {
            cadence: Cadence::None,
            date,
            start: None,
            end: None,
            preferred_weekday: None,
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        if let Some(start) = self.start {
            return start;
        }
        match self.preferred_weekday {
            Some(wd) if self.cadence.honours_weekday() => next_weekday(self.date, wd),
            _ => self.date,
        }
    }
}

/// `from` itself when it already falls on `wd`, else the next such day.
pub fn next_weekday(from: NaiveDate, wd: Weekday) -> NaiveDate {
    let ahead = (7 + wd.num_days_from_monday() as i64
        - from.weekday().num_days_from_monday() as i64)
        % 7;
    from + chrono::Duration::days(ahead)
}

/// The dates `plan` expands to, in ascending order. `open_ended_cap`
/// bounds a plan without an end date.
pub fn occurrence_dates(
    plan: &RecurrencePlan,
    open_ended_cap: usize,
) -> LedgerResult<Vec<NaiveDate>> {
    if !plan.cadence.is_recurring() {
        return Ok(vec![plan.date]);
    }
    let anchor = plan.anchor();
    if let Some(end) = plan.end {
        if plan.start.is_none() && anchor != plan.date && end >= plan.date && end < anchor {
            return Err(LedgerError::invalid(format!(
                "preferred weekday moves the first occurrence to {}, after end date {}",
                anchor, end
            )));
        }
        if end < anchor {
            return Err(LedgerError::invalid(format!(
                "end date {} precedes start date {}",
                end, anchor
            )));
        }
    }
    let limit = match plan.end {
        Some(_) => MAX_OCCURRENCES,
        None => open_ended_cap.clamp(1, MAX_OCCURRENCES),
    };

    let mut dates = Vec::new();
    for n in 0..limit as u32 {
        let Some(date) = plan.cadence.nth_date(anchor, n) else {
            break;
        };
        if plan.end.is_some_and(|end| date > end) {
            break;
        }
        dates.push(date);
    }
    Ok(dates)
}

/// Materializes `plan` for `template` and returns the new ids in date
/// order.
///
/// Every occurrence is its own write: if one fails, the ones before it stay
/// committed and the error is returned. All occurrences of a recurring plan
/// share a freshly minted series id.
pub fn expand(
    conn: &Connection,
    template: &TransactionTemplate,
    plan: &RecurrencePlan,
) -> LedgerResult<Vec<i64>> {
    ledger::validate_template(template)?;
    let cap = open_ended_occurrences(conn)?;
    let dates = occurrence_dates(plan, cap)?;

    if !plan.cadence.is_recurring() {
        let one_off = template.instantiate(Cadence::None, plan.date, None);
        let id = ledger::add_transaction(conn, &one_off)?;
        return Ok(vec![id]);
    }

    let series_id = Uuid::new_v4().to_string();
    info!(
        series = %series_id,
        cadence = %plan.cadence,
        occurrences = dates.len(),
        "expanding recurring transaction"
    );
    let mut ids = Vec::with_capacity(dates.len());
    for date in dates {
        let occurrence = template.instantiate(plan.cadence, date, Some(series_id.clone()));
        ids.push(ledger::add_transaction(conn, &occurrence)?);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn plan(cadence: Cadence, start: NaiveDate, end: Option<NaiveDate>) -> RecurrencePlan {
        RecurrencePlan {
            cadence,
            date: start,
            start: Some(start),
            end,
            preferred_weekday: None,
        }
    }

    #[test]
    fn monthly_clamps_to_month_end_without_drift() {
        let dates = occurrence_dates(&plan(Cadence::Monthly, d(2024, 1, 31), None), 3).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)]);

        let dates = occurrence_dates(&plan(Cadence::Monthly, d(2023, 1, 31), None), 4).unwrap();
        assert_eq!(
            dates,
            vec![d(2023, 1, 31), d(2023, 2, 28), d(2023, 3, 31), d(2023, 4, 30)]
        );
    }

    #[test]
    fn yearly_from_leap_day() {
        let dates = occurrence_dates(&plan(Cadence::Yearly, d(2024, 2, 29), None), 5).unwrap();
        assert_eq!(
            dates,
            vec![
                d(2024, 2, 29),
                d(2025, 2, 28),
                d(2026, 2, 28),
                d(2027, 2, 28),
                d(2028, 2, 29)
            ]
        );
    }

    #[test]
    fn weekly_end_is_inclusive() {
        let p = plan(Cadence::Weekly, d(2024, 3, 4), Some(d(2024, 3, 25)));
        let dates = occurrence_dates(&p, 24).unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 3, 4), d(2024, 3, 11), d(2024, 3, 18), d(2024, 3, 25)]
        );
    }

    #[test]
    fn fixed_day_steps() {
        let p = plan(Cadence::Biweekly, d(2024, 1, 1), Some(d(2024, 2, 1)));
        let bi = occurrence_dates(&p, 24).unwrap();
        assert_eq!(bi, vec![d(2024, 1, 1), d(2024, 1, 15), d(2024, 1, 29)]);

        let p = plan(Cadence::Semimonthly, d(2024, 1, 1), Some(d(2024, 1, 31)));
        let semi = occurrence_dates(&p, 24).unwrap();
        assert_eq!(semi, vec![d(2024, 1, 1), d(2024, 1, 16), d(2024, 1, 31)]);
    }

    #[test]
    fn open_ended_uses_cap_and_end_uses_ceiling() {
        let open = occurrence_dates(&plan(Cadence::Weekly, d(2024, 1, 1), None), 24).unwrap();
        assert_eq!(open.len(), 24);

        let p = plan(Cadence::Weekly, d(2024, 1, 1), Some(d(2099, 1, 1)));
        let far = occurrence_dates(&p, 24).unwrap();
        assert_eq!(far.len(), MAX_OCCURRENCES);
    }

    #[test]
    fn none_cadence_is_single_date() {
        let p = RecurrencePlan::once(d(2024, 5, 5));
        assert_eq!(occurrence_dates(&p, 24).unwrap(), vec![d(2024, 5, 5)]);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let p = plan(Cadence::Monthly, d(2024, 5, 1), Some(d(2024, 4, 1)));
        let err = occurrence_dates(&p, 24).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn weekday_preference_only_without_start() {
        // 2024-03-06 is a Wednesday
        let mut p = RecurrencePlan {
            cadence: Cadence::Weekly,
            date: d(2024, 3, 6),
            start: None,
            end: None,
            preferred_weekday: Some(Weekday::Mon),
        };
        assert_eq!(p.anchor(), d(2024, 3, 11));

        p.start = Some(d(2024, 3, 6));
        assert_eq!(p.anchor(), d(2024, 3, 6));

        p.start = None;
        p.cadence = Cadence::Monthly;
        assert_eq!(p.anchor(), d(2024, 3, 6));
    }

    #[test]
    fn weekday_shift_past_end_names_the_weekday() {
        // Wednesday, with the series ending that Friday
        let p = RecurrencePlan {
            cadence: Cadence::Weekly,
            date: d(2024, 3, 6),
            start: None,
            end: Some(d(2024, 3, 8)),
            preferred_weekday: Some(Weekday::Mon),
        };
        match occurrence_dates(&p, 24).unwrap_err() {
            LedgerError::Validation(msg) => {
                assert!(msg.contains("preferred weekday"), "{msg}");
                assert!(msg.contains("2024-03-11"), "{msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn next_weekday_keeps_matching_day() {
        assert_eq!(next_weekday(d(2024, 3, 4), Weekday::Mon), d(2024, 3, 4));
        assert_eq!(next_weekday(d(2024, 3, 10), Weekday::Mon), d(2024, 3, 11));
    }
}
