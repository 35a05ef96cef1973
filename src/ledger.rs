// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transaction writes paired with their balance effect. Each call runs in
//! its own SQLite transaction; nothing spans several calls.

use rusqlite::Connection;
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionTemplate};
use crate::reconcile;
use crate::store::transactions;

pub fn validate_template(t: &TransactionTemplate) -> LedgerResult<()> {
    validate_fields(&t.description, &t.amount)
}

/// The checks `add_transaction` runs, for callers that stage several
/// payloads and must reject the batch before writing any of them.
pub fn validate_new(new: &NewTransaction) -> LedgerResult<()> {
    validate_fields(&new.description, &new.amount)
}

fn validate_fields(description: &str, amount: &rust_decimal::Decimal) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::invalid("description must not be empty"));
    }
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(LedgerError::invalid(format!(
            "amount must be a positive magnitude, got {}",
            amount
        )));
    }
    Ok(())
}

pub fn add_transaction(conn: &Connection, new: &NewTransaction) -> LedgerResult<i64> {
    validate_new(new)?;
    let tx = conn.unchecked_transaction()?;
    let id = transactions::create(&tx, new)?;
    let stored = new.clone().with_id(id);
    reconcile::apply_create(&tx, &stored)?;
    tx.commit()?;
    debug!(id, date = %stored.date, "transaction added");
    Ok(id)
}

/// Writes `updated` over the stored record with the same id. Fails with
/// NotFound, touching no balance, when the record does not exist.
pub fn update_transaction(conn: &Connection, updated: &Transaction) -> LedgerResult<()> {
    validate_fields(&updated.description, &updated.amount)?;
    let tx = conn.unchecked_transaction()?;
    let old = transactions::find(&tx, updated.id)?;
    transactions::update(&tx, updated)?;
    reconcile::apply_edit(&tx, old.as_ref(), updated)?;
    tx.commit()?;
    debug!(id = updated.id, "transaction updated");
    Ok(())
}

/// Deletes and reverses. An id that is already gone is absorbed and
/// reported as `false`, so repeating a delete never adjusts twice.
pub fn delete_transaction(conn: &Connection, id: i64) -> LedgerResult<bool> {
    let tx = conn.unchecked_transaction()?;
    let Some(old) = transactions::find(&tx, id)? else {
        debug!(id, "delete of missing transaction ignored");
        return Ok(false);
    };
    reconcile::apply_delete(&tx, &old)?;
    transactions::delete(&tx, id)?;
    tx.commit()?;
    debug!(id, "transaction deleted");
    Ok(true)
}

/// Best-effort batch delete in ascending date order. Absent ids are
/// skipped; returns the ids actually removed. A storage failure stops the
/// batch with the earlier deletes already committed.
pub fn delete_transactions(conn: &Connection, ids: &[i64]) -> LedgerResult<Vec<i64>> {
    let mut present = Vec::with_capacity(ids.len());
    for &id in ids {
        if let Some(t) = transactions::find(conn, id)? {
            present.push(t);
        }
    }
    present.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut removed = Vec::with_capacity(present.len());
    for t in present {
        if delete_transaction(conn, t.id)? {
            removed.push(t.id);
        }
    }
    Ok(removed)
}
