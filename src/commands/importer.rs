// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{HashMap, hash_map::Entry};
use std::path::Path;

use crate::ledger;
use crate::models::{Cadence, NewTransaction, TxKind};
use crate::snapshot;
use crate::utils::{id_for_account, parse_date, parse_decimal};
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .context("missing --path")?
                .trim();
            let snap = snapshot::read_snapshot(Path::new(path))
                .with_context(|| format!("Read snapshot {}", path))?;
            let summary = snapshot::import_snapshot(conn, &snap)?;
            println!(
                "Imported {} transactions, {} accounts, {} categories, {} subcategories, {} goals",
                summary.transactions,
                summary.accounts,
                summary.categories,
                summary.subcategories,
                summary.goals
            );
            Ok(())
        }
        Some(("transactions", sub)) => {
            let path = sub
                .get_one::<String>("path")
                .context("missing --path")?
                .trim();
            let ids = import_transactions(conn, Path::new(path))?;
            println!("Imported {} transactions from {}", ids.len(), path);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Appends the rows of a CSV in the `export transactions` layout. Every
/// row is parsed and validated before anything is written; each insert
/// then goes through the ledger so linked balances move with it.
pub fn import_transactions(conn: &Connection, path: &Path) -> Result<Vec<i64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let mut account_cache: HashMap<String, i64> = HashMap::new();
    let mut pending = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let line = i + 2;
        let new = parse_row(conn, &rec?, &mut account_cache)
            .with_context(|| format!("line {}", line))?;
        ledger::validate_new(&new).with_context(|| format!("line {}", line))?;
        pending.push(new);
    }

    let mut ids = Vec::with_capacity(pending.len());
    for new in &pending {
        ids.push(ledger::add_transaction(conn, new)?);
    }
    Ok(ids)
}

fn parse_row(
    conn: &Connection,
    rec: &StringRecord,
    account_cache: &mut HashMap<String, i64>,
) -> Result<NewTransaction> {
    let col = |idx: usize, name: &str| -> Result<String> {
        rec.get(idx)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| anyhow!("missing column '{}'", name))
    };
    let optional = |idx: usize| rec.get(idx).map(str::trim).filter(|s| !s.is_empty());

    let account_id = match optional(7) {
        Some(name) => Some(match account_cache.entry(name.to_string()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => *e.insert(id_for_account(conn, name)?),
        }),
        None => None,
    };
    let cadence = match optional(6) {
        Some(c) => c.parse::<Cadence>()?,
        None => Cadence::None,
    };
    Ok(NewTransaction {
        date: parse_date(&col(0, "date")?)?,
        description: col(1, "description")?,
        kind: col(2, "kind")?.parse::<TxKind>()?,
        amount: parse_decimal(&col(3, "amount")?)?,
        category: col(4, "category")?,
        subcategory: optional(5).map(str::to_string),
        cadence,
        account_id,
        series_id: optional(8).map(str::to_string),
    })
}
