// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Goal;
use crate::store::goals;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let goal = Goal {
                id: 0,
                name: sub
                    .get_one::<String>("name")
                    .context("missing --name")?
                    .clone(),
                r#type: sub
                    .get_one::<String>("type")
                    .context("missing --type")?
                    .clone(),
                target_amount: parse_decimal(
                    sub.get_one::<String>("target").context("missing --target")?,
                )?,
                current_amount: parse_decimal(
                    sub.get_one::<String>("current")
                        .context("missing --current")?,
                )?,
                target_date: parse_date(sub.get_one::<String>("date").context("missing --date")?)?,
                notes: sub.get_one::<String>("notes").cloned(),
            };
            let id = goals::create(conn, &goal)?;
            println!("Added goal '{}' (id {})", goal.name.trim(), id);
        }
        Some(("list", sub)) => {
            let data = goals::list(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|g| {
                        vec![
                            g.id.to_string(),
                            g.name.clone(),
                            g.r#type.clone(),
                            fmt_money(&g.current_amount),
                            fmt_money(&g.target_amount),
                            g.target_date.to_string(),
                            g.notes.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                let headers = ["ID", "Name", "Type", "Saved", "Target", "By", "Notes"];
                println!("{}", pretty_table(&headers, rows));
            }
        }
        Some(("update", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            let mut goal = goals::get(conn, id)?;
            if let Some(v) = sub.get_one::<String>("target") {
                goal.target_amount = parse_decimal(v)?;
            }
            if let Some(v) = sub.get_one::<String>("current") {
                goal.current_amount = parse_decimal(v)?;
            }
            if let Some(v) = sub.get_one::<String>("date") {
                goal.target_date = parse_date(v)?;
            }
            if let Some(v) = sub.get_one::<String>("notes") {
                goal.notes = Some(v.clone());
            }
            goals::update(conn, &goal)?;
            println!("Updated goal {}", id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            goals::delete(conn, id)?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}
