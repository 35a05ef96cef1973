// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::series::{self, RecurringGroup};
use crate::utils::{fmt_money, maybe_print_json, optional_date, parse_date, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let data = summarize(&series::list_groups(conn)?);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|g| {
                        vec![
                            g.first_id.to_string(),
                            g.description.clone(),
                            g.category.clone(),
                            g.cadence.clone(),
                            g.amount.clone(),
                            g.occurrences.to_string(),
                            format!("{} .. {}", g.first_date, g.last_date),
                            g.total.clone(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &[
                            "Tx",
                            "Description",
                            "Category",
                            "Cadence",
                            "Amount",
                            "Count",
                            "Range",
                            "Total"
                        ],
                        rows,
                    )
                );
            }
        }
        Some(("show", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            let group = series::group_of(conn, id)?;
            let occurrences = &group.occurrences;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), occurrences)? {
                println!("{}", group.key);
                let rows: Vec<Vec<String>> = occurrences
                    .iter()
                    .map(|t| {
                        vec![
                            t.id.to_string(),
                            t.date.to_string(),
                            t.description.clone(),
                            fmt_money(&t.amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Date", "Description", "Amount"], rows)
                );
            }
        }
        Some(("reschedule", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            let start = parse_date(sub.get_one::<String>("start").context("missing --start")?)?;
            let end = optional_date(sub, "end")?;
            let group = series::group_of(conn, id)?;
            let outcome = series::reschedule(conn, &group, start, end)?;
            println!(
                "Rescheduled: {} moved, {} deleted, {} created",
                outcome.updated.len(),
                outcome.deleted.len(),
                outcome.created.len()
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            let group = series::group_of(conn, id)?;
            if !sub.get_flag("yes") {
                bail!(
                    "This removes all {} occurrences of {}; re-run with --yes to confirm",
                    group.occurrences.len(),
                    group.key
                );
            }
            let removed = series::delete_group(conn, &group)?;
            println!("Removed {} occurrences", removed.len());
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub first_id: i64,
    pub description: String,
    pub category: String,
    pub cadence: String,
    pub amount: String,
    pub occurrences: usize,
    pub first_date: String,
    pub last_date: String,
    pub total: String,
}

pub fn summarize(groups: &[RecurringGroup]) -> Vec<GroupSummary> {
    groups
        .iter()
        .map(|g| {
            let t = g.template();
            GroupSummary {
                key: g.key.to_string(),
                first_id: t.id,
                description: t.description.clone(),
                category: t.category.clone(),
                cadence: g.cadence().to_string(),
                amount: fmt_money(&t.amount),
                occurrences: g.occurrences.len(),
                first_date: g.first_date().to_string(),
                last_date: g.last_date().to_string(),
                total: fmt_money(&g.total()),
            }
        })
        .collect()
}
