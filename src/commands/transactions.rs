// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::ledger;
use crate::models::{Cadence, Transaction, TransactionFilter, TransactionTemplate, TxKind};
use crate::recurrence::{self, RecurrencePlan};
use crate::store::{accounts, transactions};
use crate::utils::{
    fmt_money, id_for_account, maybe_print_json, optional_date, parse_date, parse_decimal,
    parse_weekday, pretty_table,
};
use crate::views;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let ids = add(conn, sub)?;
            match ids.as_slice() {
                [id] => println!("Recorded transaction {}", id),
                _ => println!(
                    "Recorded {} occurrences (ids {}..={})",
                    ids.len(),
                    ids.first().copied().unwrap_or_default(),
                    ids.last().copied().unwrap_or_default()
                ),
            }
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            if ledger::delete_transaction(conn, id)? {
                println!("Deleted transaction {}", id);
            } else {
                println!("Transaction {} does not exist; nothing changed", id);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Records a one-off transaction or expands a recurring one. Returns the
/// new ids in date order.
pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<i64>> {
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(id_for_account(conn, name)?),
        None => None,
    };
    let template = TransactionTemplate {
        description: sub
            .get_one::<String>("description")
            .context("missing --description")?
            .trim()
            .to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").context("missing --amount")?)?,
        kind: sub
            .get_one::<String>("kind")
            .context("missing --kind")?
            .parse()?,
        category: sub
            .get_one::<String>("category")
            .context("missing --category")?
            .trim()
            .to_string(),
        subcategory: sub
            .get_one::<String>("subcategory")
            .map(|s| s.trim().to_string()),
        account_id,
    };

    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let cadence: Cadence = sub
        .get_one::<String>("cadence")
        .context("missing --cadence")?
        .parse()?;
    // --no-end only documents intent; a recurring plan without --end is open-ended.
    let end = if sub.get_flag("no_end") {
        None
    } else {
        optional_date(sub, "end")?
    };
    let plan = RecurrencePlan {
        cadence,
        date,
        start: optional_date(sub, "start")?,
        end,
        preferred_weekday: sub
            .get_one::<String>("weekday")
            .map(|w| parse_weekday(w))
            .transpose()?,
    };
    Ok(recurrence::expand(conn, &template, &plan)?)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("missing --id")?;
    let mut tx = transactions::get(conn, id)?;
    if let Some(v) = sub.get_one::<String>("description") {
        tx.description = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(v)?;
    }
    if let Some(v) = sub.get_one::<String>("kind") {
        tx.kind = v.parse()?;
    }
    if let Some(v) = sub.get_one::<String>("category") {
        tx.category = v.trim().to_string();
    }
    if let Some(v) = sub.get_one::<String>("subcategory") {
        tx.subcategory = Some(v.trim().to_string()).filter(|s| !s.is_empty());
    }
    if let Some(v) = sub.get_one::<String>("date") {
        tx.date = parse_date(v)?;
    }
    if let Some(v) = sub.get_one::<String>("account") {
        tx.account_id = Some(id_for_account(conn, v)?);
    }
    if sub.get_flag("no_account") {
        tx.account_id = None;
    }
    ledger::update_transaction(conn, &tx)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.subcategory.clone(),
                    r.cadence.clone(),
                    r.account.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Description",
                    "Kind",
                    "Amount",
                    "Category",
                    "Subcategory",
                    "Cadence",
                    "Account"
                ],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub subcategory: String,
    pub cadence: String,
    pub account: String,
    pub series_id: Option<String>,
}

/// Without filters: newest first by insertion. With any of
/// --from/--to/--kind/--category: matching rows by date.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let offset = sub.get_one::<usize>("offset").copied().unwrap_or(0);
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(100);

    let filter = TransactionFilter {
        from: optional_date(sub, "from")?,
        to: optional_date(sub, "to")?,
        kind: sub
            .get_one::<String>("kind")
            .map(|s| s.parse::<TxKind>())
            .transpose()?,
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string()),
        account_id: None,
    };
    let filtered = filter.from.is_some()
        || filter.to.is_some()
        || filter.kind.is_some()
        || filter.category.is_some();

    let txs: Vec<Transaction> = if filtered {
        views::filter_transactions(conn, &filter)?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect()
    } else {
        transactions::list(conn, offset, limit)?
    };

    let names: HashMap<i64, String> = accounts::list(conn)?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let account_name = |id: i64| match names.get(&id) {
        Some(name) => name.clone(),
        None => format!("#{} (removed)", id),
    };

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            account: t.account_id.map(account_name).unwrap_or_default(),
            description: t.description,
            kind: t.kind.to_string(),
            amount: fmt_money(&t.amount),
            category: t.category,
            subcategory: t.subcategory.unwrap_or_default(),
            cadence: t.cadence.to_string(),
            series_id: t.series_id,
        })
        .collect())
}
