// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeSet, HashSet};

use crate::reconcile;
use crate::store::{accounts, transactions};
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

/// (issue, detail) pairs; empty when the ledger is consistent.
pub fn findings(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();

    // 1) Stored balances that disagree with linked transactions
    for d in reconcile::verify_balances(conn)? {
        rows.push((
            "balance_drift".to_string(),
            format!(
                "{}: recorded {}, expected {}",
                d.account,
                fmt_money(&d.recorded),
                fmt_money(&d.expected)
            ),
        ));
    }

    // 2) Links to accounts that no longer exist
    let known: HashSet<i64> = accounts::list(conn)?.into_iter().map(|a| a.id).collect();
    let all = transactions::list_all(conn)?;
    let orphaned: BTreeSet<i64> = all
        .iter()
        .filter_map(|t| t.account_id)
        .filter(|id| !known.contains(id))
        .collect();
    for id in orphaned {
        let n = all.iter().filter(|t| t.account_id == Some(id)).count();
        rows.push((
            "missing_account".to_string(),
            format!("account #{} linked from {} transactions", id, n),
        ));
    }

    // 3) Recurring rows grouped by signature only
    let legacy = all
        .iter()
        .filter(|t| t.cadence.is_recurring() && t.series_id.is_none())
        .count();
    if legacy > 0 {
        rows.push((
            "no_series_id".to_string(),
            format!("{} recurring transactions grouped by description", legacy),
        ));
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = findings(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        let rows = rows.into_iter().map(|(a, b)| vec![a, b]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
