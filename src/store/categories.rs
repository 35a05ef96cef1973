// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, params};

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Category, Subcategory, TxKind};
use crate::store::transactions;

pub fn create(conn: &Connection, name: &str, kind: TxKind) -> LedgerResult<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::invalid("category name must not be empty"));
    }
    conn.execute(
        "INSERT INTO categories(name, kind) VALUES (?1, ?2)",
        params![name, kind.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_with_id(conn: &Connection, cat: &Category) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO categories(id, name, kind) VALUES (?1, ?2, ?3)",
        params![cat.id, cat.name, cat.kind.as_str()],
    )?;
    Ok(())
}

pub fn list(conn: &Connection, kind: Option<TxKind>) -> LedgerResult<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind FROM categories WHERE ?1 IS NULL OR kind=?1 ORDER BY kind, name",
    )?;
    let mut rows = stmt.query(params![kind.map(|k| k.as_str())])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(2)?;
        data.push(Category {
            id: r.get(0)?,
            name: r.get(1)?,
            kind: kind.parse()?,
        });
    }
    Ok(data)
}

/// Renames a category and carries the new label over to its subcategories
/// and to every transaction filed under the old name. Returns the number of
/// transactions relabelled.
pub fn rename(conn: &Connection, id: i64, new_name: &str) -> LedgerResult<usize> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(LedgerError::invalid("category name must not be empty"));
    }
    let old: String = conn
        .query_row("SELECT name FROM categories WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => LedgerError::not_found("Category", id),
            other => other.into(),
        })?;
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "UPDATE categories SET name=?1 WHERE id=?2",
        params![new_name, id],
    )?;
    tx.execute(
        "UPDATE subcategories SET category_name=?2 WHERE category_name=?1",
        params![old, new_name],
    )?;
    let moved = transactions::rename_category(&tx, &old, new_name)?;
    tx.commit()?;
    Ok(moved)
}

/// Removes the category and its subcategories. Transactions keep their
/// label; it is free-form text.
pub fn delete(conn: &Connection, id: i64) -> LedgerResult<()> {
    let name: String = conn
        .query_row("SELECT name FROM categories WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => LedgerError::not_found("Category", id),
            other => other.into(),
        })?;
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM categories WHERE id=?1", params![id])?;
    // Another kind may still use the same label.
    tx.execute(
        "DELETE FROM subcategories WHERE category_name=?1
           AND NOT EXISTS (SELECT 1 FROM categories WHERE name=?1)",
        params![name],
    )?;
    tx.commit()?;
    Ok(())
}

pub fn create_subcategory(conn: &Connection, category_name: &str, name: &str) -> LedgerResult<i64> {
    let (category_name, name) = (category_name.trim(), name.trim());
    if category_name.is_empty() || name.is_empty() {
        return Err(LedgerError::invalid(
            "subcategory and parent category names must not be empty",
        ));
    }
    conn.execute(
        "INSERT INTO subcategories(name, category_name) VALUES (?1, ?2)",
        params![name, category_name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_subcategory_with_id(conn: &Connection, sub: &Subcategory) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO subcategories(id, name, category_name) VALUES (?1, ?2, ?3)",
        params![sub.id, sub.name, sub.category_name],
    )?;
    Ok(())
}

pub fn list_subcategories(
    conn: &Connection,
    category_name: Option<&str>,
) -> LedgerResult<Vec<Subcategory>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category_name FROM subcategories
         WHERE ?1 IS NULL OR category_name=?1 ORDER BY category_name, name",
    )?;
    let rows = stmt.query_map(params![category_name], |r| {
        Ok(Subcategory {
            id: r.get(0)?,
            name: r.get(1)?,
            category_name: r.get(2)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}

pub fn delete_subcategory(conn: &Connection, id: i64) -> LedgerResult<()> {
    let changed = conn.execute("DELETE FROM subcategories WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::not_found("Subcategory", id));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> LedgerResult<()> {
    conn.execute_batch("DELETE FROM subcategories; DELETE FROM categories;")?;
    Ok(())
}
