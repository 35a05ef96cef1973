// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-database JSON bundles.
//!
//! Import replaces every collection in one SQLite transaction and keeps
//! the ids from the bundle. Balances are taken as they are in the bundle;
//! the reconciler is not replayed over the imported transactions.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::SCHEMA_VERSION;
use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Account, Category, Goal, Subcategory, Transaction};
use crate::store::{accounts, categories, goals, transactions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub transactions: usize,
    pub accounts: usize,
    pub categories: usize,
    pub subcategories: usize,
    pub goals: usize,
}

pub fn export_snapshot(conn: &Connection) -> LedgerResult<Snapshot> {
    let mut txs = transactions::list_all(conn)?;
    txs.reverse(); // insertion order
    Ok(Snapshot {
        version: SCHEMA_VERSION,
        exported_at: Utc::now(),
        transactions: txs,
        accounts: accounts::list(conn)?,
        categories: categories::list(conn, None)?,
        subcategories: categories::list_subcategories(conn, None)?,
        goals: goals::list(conn)?,
    })
}

pub fn write_snapshot(conn: &Connection, path: &Path) -> LedgerResult<Snapshot> {
    let snap = export_snapshot(conn)?;
    fs::write(path, serde_json::to_string_pretty(&snap)?)?;
    Ok(snap)
}

pub fn read_snapshot(path: &Path) -> LedgerResult<Snapshot> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn import_snapshot(conn: &mut Connection, snap: &Snapshot) -> LedgerResult<ImportSummary> {
    if snap.version > SCHEMA_VERSION {
        return Err(LedgerError::invalid(format!(
            "snapshot version {} is newer than supported version {}",
            snap.version, SCHEMA_VERSION
        )));
    }
    let tx = conn.transaction()?;
    transactions::clear(&tx)?;
    accounts::clear(&tx)?;
    categories::clear(&tx)?;
    goals::clear(&tx)?;

    for t in &snap.transactions {
        transactions::insert_with_id(&tx, t)?;
    }
    for a in &snap.accounts {
        accounts::insert_with_id(&tx, a)?;
    }
    for c in &snap.categories {
        categories::insert_with_id(&tx, c)?;
    }
    for s in &snap.subcategories {
        categories::insert_subcategory_with_id(&tx, s)?;
    }
    for g in &snap.goals {
        goals::insert_with_id(&tx, g)?;
    }
    tx.commit()?;

    let summary = ImportSummary {
        transactions: snap.transactions.len(),
        accounts: snap.accounts.len(),
        categories: snap.categories.len(),
        subcategories: snap.subcategories.len(),
        goals: snap.goals.len(),
    };
    info!(?summary, exported_at = %snap.exported_at, "snapshot imported");
    Ok(summary)
}
