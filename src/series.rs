// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring groups and the editor that re-dates them.
//!
//! Occurrences stamped out by [`crate::recurrence::expand`] share a series
//! id and are grouped by it, so editing one occurrence's description or
//! amount does not pull it out of its series. Recurring transactions
//! without a series id (imported, or entered before series ids existed)
//! fall back to grouping by (description, category, amount, cadence).

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger;
use crate::models::{Cadence, Transaction};
use crate::recurrence::MAX_OCCURRENCES;
use crate::store::transactions;

/// Occurrence cap when a group is rescheduled without an end date.
pub const OPEN_ENDED_RESCHEDULE_CAP: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "by", rename_all = "lowercase")]
pub enum GroupKey {
    Series {
        id: String,
    },
    Signature {
        description: String,
        category: String,
        amount: Decimal,
        cadence: Cadence,
    },
}

impl GroupKey {
    /// `None` for one-off transactions.
    pub fn of(tx: &Transaction) -> Option<GroupKey> {
        if !tx.cadence.is_recurring() {
            return None;
        }
        Some(match &tx.series_id {
            Some(id) => GroupKey::Series { id: id.clone() },
            None => GroupKey::Signature {
                description: tx.description.clone(),
                category: tx.category.clone(),
                amount: tx.amount.normalize(),
                cadence: tx.cadence,
            },
        })
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Series { id } => write!(f, "series:{}", id),
            GroupKey::Signature {
                description,
                category,
                amount,
                cadence,
            } => write!(f, "{}-{}-{}-{}", description, category, amount, cadence),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringGroup {
    pub key: GroupKey,
    /// Sorted by date, then id. Never empty.
    pub occurrences: Vec<Transaction>,
}

impl RecurringGroup {
    fn new(key: GroupKey, mut occurrences: Vec<Transaction>) -> Self {
        occurrences.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        RecurringGroup { key, occurrences }
    }

    /// The earliest occurrence; new occurrences are cloned from it.
    pub fn template(&self) -> &Transaction {
        &self.occurrences[0]
    }

    pub fn cadence(&self) -> Cadence {
        self.template().cadence
    }

    pub fn first_date(&self) -> NaiveDate {
        self.template().date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.occurrences[self.occurrences.len() - 1].date
    }

    pub fn total(&self) -> Decimal {
        self.occurrences.iter().map(|t| t.amount).sum()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.occurrences.iter().map(|t| t.id).collect()
    }

    /// Days between the first two occurrences, or the cadence's nominal
    /// length when there is only one (or the first two share a date).
    pub fn step_days(&self) -> LedgerResult<i64> {
        if let [first, second, ..] = self.occurrences.as_slice() {
            let gap = (second.date - first.date).num_days();
            if gap > 0 {
                return Ok(gap);
            }
        }
        self.cadence().nominal_days().ok_or_else(|| {
            LedgerError::invalid(format!("group {} has no recurring cadence", self.key))
        })
    }
}

fn group_all(txs: Vec<Transaction>) -> BTreeMap<GroupKey, Vec<Transaction>> {
    let mut grouped: BTreeMap<GroupKey, Vec<Transaction>> = BTreeMap::new();
    for tx in txs {
        if let Some(key) = GroupKey::of(&tx) {
            grouped.entry(key).or_default().push(tx);
        }
    }
    grouped
}

/// Every recurring group, earliest first.
pub fn list_groups(conn: &Connection) -> LedgerResult<Vec<RecurringGroup>> {
    let mut groups: Vec<RecurringGroup> = group_all(transactions::list_all(conn)?)
        .into_iter()
        .map(|(key, occ)| RecurringGroup::new(key, occ))
        .collect();
    groups.sort_by(|a, b| a.first_date().cmp(&b.first_date()).then(a.key.cmp(&b.key)));
    Ok(groups)
}

/// The group the given transaction belongs to.
pub fn group_of(conn: &Connection, tx_id: i64) -> LedgerResult<RecurringGroup> {
    let tx = transactions::get(conn, tx_id)?;
    let key = GroupKey::of(&tx).ok_or_else(|| {
        LedgerError::invalid(format!("transaction {} is not recurring", tx_id))
    })?;
    let members: Vec<Transaction> = transactions::list_all(conn)?
        .into_iter()
        .filter(|t| GroupKey::of(t).as_ref() == Some(&key))
        .collect();
    Ok(RecurringGroup::new(key, members))
}

/// Dates from `start` every `step_days` days up to `end` inclusive, or
/// `OPEN_ENDED_RESCHEDULE_CAP` dates when there is no end.
pub fn target_dates(start: NaiveDate, end: Option<NaiveDate>, step_days: i64) -> Vec<NaiveDate> {
    let limit = if end.is_some() {
        MAX_OCCURRENCES
    } else {
        OPEN_ENDED_RESCHEDULE_CAP
    };
    let mut dates = Vec::new();
    let mut current = start;
    while dates.len() < limit && end.is_none_or(|end| current <= end) {
        dates.push(current);
        current += Duration::days(step_days);
    }
    dates
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RescheduleOutcome {
    pub updated: Vec<i64>,
    pub deleted: Vec<i64>,
    pub created: Vec<i64>,
}

/// Re-dates `group` onto a new range.
///
/// Matching is by position: the i-th existing occurrence (in date order)
/// takes the i-th new date and keeps its id. Occurrences left over are
/// deleted, and missing ones are cloned from the group template. Gaps or
/// irregular spacing in the old series are not carried over.
///
/// Updates run first, then deletes, then creates, each in date order. A
/// failure stops there and leaves the earlier writes in place.
pub fn reschedule(
    conn: &Connection,
    group: &RecurringGroup,
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> LedgerResult<RescheduleOutcome> {
    if group.occurrences.is_empty() {
        return Err(LedgerError::invalid("cannot reschedule an empty group"));
    }
    if let Some(end) = end {
        if end < start {
            return Err(LedgerError::invalid(format!(
                "end date {} precedes start date {}",
                end, start
            )));
        }
    }
    let step = group.step_days()?;
    let dates = target_dates(start, end, step);
    let mut outcome = RescheduleOutcome::default();

    for (occurrence, date) in group.occurrences.iter().zip(&dates) {
        let mut moved = occurrence.clone();
        moved.date = *date;
        ledger::update_transaction(conn, &moved)?;
        outcome.updated.push(moved.id);
    }

    if group.occurrences.len() > dates.len() {
        let surplus: Vec<i64> = group.occurrences[dates.len()..]
            .iter()
            .map(|t| t.id)
            .collect();
        outcome.deleted = ledger::delete_transactions(conn, &surplus)?;
    }

    if dates.len() > group.occurrences.len() {
        let template = group.template();
        let stamp = template.template();
        for date in &dates[group.occurrences.len()..] {
            let new = stamp.instantiate(template.cadence, *date, template.series_id.clone());
            outcome.created.push(ledger::add_transaction(conn, &new)?);
        }
    }

    info!(
        group = %group.key,
        step,
        updated = outcome.updated.len(),
        deleted = outcome.deleted.len(),
        created = outcome.created.len(),
        "recurring group rescheduled"
    );
    Ok(outcome)
}

/// Removes every occurrence of the group, reversing each balance effect.
/// Confirmation is the caller's business.
pub fn delete_group(conn: &Connection, group: &RecurringGroup) -> LedgerResult<Vec<i64>> {
    let removed = ledger::delete_transactions(conn, &group.ids())?;
    info!(group = %group.key, removed = removed.len(), "recurring group deleted");
    Ok(removed)
}
