// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keeps account balances equal to the signed sum of the transactions
//! linked to them.
//!
//! | kind    | effect   |
//! |---------|----------|
//! | income  | + amount |
//! | expense | - amount |
//! | savings | - amount |
//!
//! Balances are always read back from the store before being adjusted;
//! nothing here holds on to an account between calls. A linked account that
//! no longer exists is skipped silently.

use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::LedgerResult;
use crate::models::{Transaction, TxKind};
use crate::store::{accounts, transactions};

pub fn signed_effect(kind: TxKind, amount: Decimal) -> Decimal {
    match kind {
        TxKind::Income => amount,
        // savings leave the source account just like spending does
        TxKind::Expense | TxKind::Savings => -amount,
    }
}

/// Read-modify-write of one account balance. Returns `false` when the
/// account is gone.
fn adjust(conn: &Connection, account_id: i64, delta: Decimal) -> LedgerResult<bool> {
    let Some(account) = accounts::find(conn, account_id)? else {
        debug!(account_id, %delta, "linked account missing; balance adjustment skipped");
        return Ok(false);
    };
    let balance = account.balance + delta;
    accounts::set_balance(conn, account.id, balance)?;
    debug!(account_id, %delta, %balance, "balance adjusted");
    Ok(true)
}

pub fn apply_create(conn: &Connection, tx: &Transaction) -> LedgerResult<()> {
    if let Some(account_id) = tx.account_id {
        adjust(conn, account_id, signed_effect(tx.kind, tx.amount))?;
    }
    Ok(())
}

/// Reverses the effect of `tx` as it was stored.
pub fn apply_delete(conn: &Connection, tx: &Transaction) -> LedgerResult<()> {
    if let Some(account_id) = tx.account_id {
        adjust(conn, account_id, -signed_effect(tx.kind, tx.amount))?;
    }
    Ok(())
}

fn affects_balance(old: &Transaction, new: &Transaction) -> bool {
    old.account_id != new.account_id || old.amount != new.amount || old.kind != new.kind
}

/// Moves the balance effect from `old` to `new`; the two may point at
/// different accounts. With `old` absent only the new effect is applied.
pub fn apply_edit(
    conn: &Connection,
    old: Option<&Transaction>,
    new: &Transaction,
) -> LedgerResult<()> {
    if let Some(old) = old {
        if !affects_balance(old, new) {
            return Ok(());
        }
        apply_delete(conn, old)?;
    }
    apply_create(conn, new)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceDrift {
    pub account_id: i64,
    pub account: String,
    pub recorded: Decimal,
    pub expected: Decimal,
}

/// Recomputes every account from its linked transactions and reports the
/// ones whose stored balance disagrees. Manual balance corrections show up
/// here too; nothing is repaired.
pub fn verify_balances(conn: &Connection) -> LedgerResult<Vec<BalanceDrift>> {
    let all = transactions::list_all(conn)?;
    let mut drifts = Vec::new();
    for account in accounts::list(conn)? {
        let expected: Decimal = all
            .iter()
            .filter(|t| t.account_id == Some(account.id))
            .map(|t| signed_effect(t.kind, t.amount))
            .sum();
        if expected != account.balance {
            warn!(account = %account.name, recorded = %account.balance, %expected, "balance drift");
            drifts.push(BalanceDrift {
                account_id: account.id,
                account: account.name,
                recorded: account.balance,
                expected,
            });
        }
    }
    Ok(drifts)
}
