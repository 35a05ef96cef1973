// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountType;
use crate::store::accounts;
use crate::utils::{fmt_money, id_for_account, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("missing --name")?;
            let typ: AccountType = sub
                .get_one::<String>("type")
                .context("missing --type")?
                .parse()?;
            let balance = parse_decimal(
                sub.get_one::<String>("balance")
                    .context("missing --balance")?,
            )?;
            accounts::create(conn, name, typ, balance)?;
            println!(
                "Added account '{}' ({}, opening {})",
                name.trim(),
                typ,
                fmt_money(&balance)
            );
        }
        Some(("list", sub)) => {
            let data = accounts::list(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows: Vec<Vec<String>> = data
                    .iter()
                    .map(|a| {
                        let side = if a.r#type.is_liability() {
                            "liability"
                        } else {
                            "asset"
                        };
                        vec![
                            a.name.clone(),
                            a.r#type.to_string(),
                            side.to_string(),
                            fmt_money(&a.balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Type", "Side", "Balance"], rows)
                );
            }
        }
        Some(("set-balance", sub)) => {
            let name = sub.get_one::<String>("name").context("missing --name")?;
            let balance = parse_decimal(
                sub.get_one::<String>("balance")
                    .context("missing --balance")?,
            )?;
            let id = id_for_account(conn, name)?;
            accounts::set_balance(conn, id, balance)?;
            println!(
                "Balance of '{}' set to {}",
                name.trim(),
                fmt_money(&balance)
            );
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").context("missing --name")?;
            let id = id_for_account(conn, name)?;
            accounts::delete(conn, id)?;
            println!("Removed account '{}'", name.trim());
        }
        _ => {}
    }
    Ok(())
}
