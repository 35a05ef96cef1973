// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::store::categories;
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").context("missing --name")?;
            let kind: TxKind = sub
                .get_one::<String>("kind")
                .context("missing --kind")?
                .parse()?;
            let id = categories::create(conn, name, kind)?;
            println!("Added {} category '{}' (id {})", kind, name.trim(), id);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .map(|k| k.parse::<TxKind>())
                .transpose()?;
            let rows: Vec<Vec<String>> = categories::list(conn, kind)?
                .into_iter()
                .map(|c| vec![c.id.to_string(), c.name, c.kind.to_string()])
                .collect();
            println!("{}", pretty_table(&["ID", "Name", "Kind"], rows));
        }
        Some(("rename", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            let name = sub.get_one::<String>("name").context("missing --name")?;
            let moved = categories::rename(conn, id, name)?;
            println!(
                "Renamed category {} to '{}' ({} transactions relabelled)",
                id,
                name.trim(),
                moved
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            categories::delete(conn, id)?;
            println!("Removed category {}", id);
        }
        Some(("sub-add", sub)) => {
            let category = sub
                .get_one::<String>("category")
                .context("missing --category")?;
            let name = sub.get_one::<String>("name").context("missing --name")?;
            let id = categories::create_subcategory(conn, category, name)?;
            println!(
                "Added subcategory '{}' under '{}' (id {})",
                name.trim(),
                category.trim(),
                id
            );
        }
        Some(("sub-list", sub)) => {
            let category = sub.get_one::<String>("category").map(|s| s.as_str());
            let rows: Vec<Vec<String>> = categories::list_subcategories(conn, category)?
                .into_iter()
                .map(|s| vec![s.id.to_string(), s.category_name, s.name])
                .collect();
            println!("{}", pretty_table(&["ID", "Category", "Subcategory"], rows));
        }
        Some(("sub-rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("missing --id")?;
            categories::delete_subcategory(conn, id)?;
            println!("Removed subcategory {}", id);
        }
        _ => {}
    }
    Ok(())
}
