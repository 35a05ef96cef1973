// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::path::Path;

use crate::models::TransactionFilter;
use crate::snapshot;
use crate::store::accounts;
use crate::views;
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub const CSV_HEADER: [&str; 9] = [
    "date",
    "description",
    "kind",
    "amount",
    "category",
    "subcategory",
    "cadence",
    "account",
    "series_id",
];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => {
            let out = sub.get_one::<String>("out").context("missing --out")?;
            let snap = snapshot::write_snapshot(conn, Path::new(out))
                .with_context(|| format!("Write snapshot to {}", out))?;
            println!(
                "Exported {} transactions, {} accounts to {}",
                snap.transactions.len(),
                snap.accounts.len(),
                out
            );
            Ok(())
        }
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .context("missing --format")?
        .to_lowercase();
    let out = sub.get_one::<String>("out").context("missing --out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let names: HashMap<i64, String> = accounts::list(conn)?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let txs = views::filter_transactions(conn, &TransactionFilter::default())?;
    let account_of = |id: Option<i64>| -> String {
        id.and_then(|id| names.get(&id).cloned())
            .unwrap_or_default()
    };

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(CSV_HEADER)?;
        for t in &txs {
            wtr.write_record([
                t.date.to_string(),
                t.description.clone(),
                t.kind.to_string(),
                t.amount.to_string(),
                t.category.clone(),
                t.subcategory.clone().unwrap_or_default(),
                t.cadence.to_string(),
                account_of(t.account_id),
                t.series_id.clone().unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<serde_json::Value> = txs
            .iter()
            .map(|t| {
                json!({
                    "date": t.date.to_string(),
                    "description": t.description,
                    "kind": t.kind.as_str(),
                    "amount": t.amount.to_string(),
                    "category": t.category,
                    "subcategory": t.subcategory,
                    "cadence": t.cadence.as_str(),
                    "account": t.account_id.and_then(|id| names.get(&id).cloned()),
                    "series_id": t.series_id,
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
