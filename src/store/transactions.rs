// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, Row, params};

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionFilter};
use crate::utils::{date_col, decimal_col};

const COLUMNS: &str =
    "id, description, amount, kind, category, subcategory, cadence, date, account_id, series_id";

fn read_row(r: &Row<'_>) -> LedgerResult<Transaction> {
    let amount: String = r.get(2)?;
    let kind: String = r.get(3)?;
    let cadence: String = r.get(6)?;
    let date: String = r.get(7)?;
    Ok(Transaction {
        id: r.get(0)?,
        description: r.get(1)?,
        amount: decimal_col(&amount, "amount")?,
        kind: kind.parse()?,
        category: r.get(4)?,
        subcategory: r.get(5)?,
        cadence: cadence.parse()?,
        date: date_col(&date, "date")?,
        account_id: r.get(8)?,
        series_id: r.get(9)?,
    })
}

fn collect(
    conn: &Connection,
    sql: &str,
    values: &[&dyn rusqlite::ToSql],
) -> LedgerResult<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(values)?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(read_row(r)?);
    }
    Ok(data)
}

/// Inserts the payload and returns the freshly assigned id. AUTOINCREMENT
/// guarantees ids of deleted rows are never handed out again.
pub fn create(conn: &Connection, tx: &NewTransaction) -> LedgerResult<i64> {
    conn.execute(
        "INSERT INTO transactions(description, amount, kind, category, subcategory, cadence, date, account_id, series_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tx.description,
            tx.amount.to_string(),
            tx.kind.as_str(),
            tx.category,
            tx.subcategory,
            tx.cadence.as_str(),
            tx.date.to_string(),
            tx.account_id,
            tx.series_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Restores a record under its original id (snapshot import).
pub fn insert_with_id(conn: &Connection, tx: &Transaction) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO transactions(id, description, amount, kind, category, subcategory, cadence, date, account_id, series_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            tx.id,
            tx.description,
            tx.amount.to_string(),
            tx.kind.as_str(),
            tx.category,
            tx.subcategory,
            tx.cadence.as_str(),
            tx.date.to_string(),
            tx.account_id,
            tx.series_id,
        ],
    )?;
    Ok(())
}

pub fn find(conn: &Connection, id: i64) -> LedgerResult<Option<Transaction>> {
    let sql = format!("SELECT {} FROM transactions WHERE id=?1", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => Ok(Some(read_row(r)?)),
        None => Ok(None),
    }
}

pub fn get(conn: &Connection, id: i64) -> LedgerResult<Transaction> {
    find(conn, id)?.ok_or_else(|| LedgerError::not_found("Transaction", id))
}

pub fn update(conn: &Connection, tx: &Transaction) -> LedgerResult<()> {
    let changed = conn.execute(
        "UPDATE transactions SET description=?1, amount=?2, kind=?3, category=?4, subcategory=?5,
                cadence=?6, date=?7, account_id=?8, series_id=?9
         WHERE id=?10",
        params![
            tx.description,
            tx.amount.to_string(),
            tx.kind.as_str(),
            tx.category,
            tx.subcategory,
            tx.cadence.as_str(),
            tx.date.to_string(),
            tx.account_id,
            tx.series_id,
            tx.id,
        ],
    )?;
    if changed == 0 {
        return Err(LedgerError::not_found("Transaction", tx.id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> LedgerResult<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::not_found("Transaction", id));
    }
    Ok(())
}

/// Best-effort removal: absent ids are skipped. Returns the ids that were
/// actually deleted, in the order given.
pub fn delete_many(conn: &Connection, ids: &[i64]) -> LedgerResult<Vec<i64>> {
    let mut removed = Vec::with_capacity(ids.len());
    for &id in ids {
        match delete(conn, id) {
            Ok(()) => removed.push(id),
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(removed)
}

/// Most recently inserted first.
pub fn list(conn: &Connection, offset: usize, limit: usize) -> LedgerResult<Vec<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions ORDER BY id DESC LIMIT ?1 OFFSET ?2",
        COLUMNS
    );
    let (limit, offset) = (limit as i64, offset as i64);
    collect(conn, &sql, &[&limit as &dyn rusqlite::ToSql, &offset])
}

pub fn list_all(conn: &Connection) -> LedgerResult<Vec<Transaction>> {
    let sql = format!("SELECT {} FROM transactions ORDER BY id DESC", COLUMNS);
    collect(conn, &sql, &[])
}

/// Filtered selection ordered by date, then id.
pub fn query(conn: &Connection, filter: &TransactionFilter) -> LedgerResult<Vec<Transaction>> {
    let mut sql = format!("SELECT {} FROM transactions WHERE 1=1", COLUMNS);
    let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(from) = filter.from {
        sql.push_str(" AND date>=?");
        values.push(Box::new(from.to_string()));
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date<=?");
        values.push(Box::new(to.to_string()));
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind=?");
        values.push(Box::new(kind.as_str()));
    }
    if let Some(cat) = &filter.category {
        sql.push_str(" AND category=?");
        values.push(Box::new(cat.clone()));
    }
    if let Some(acct) = filter.account_id {
        sql.push_str(" AND account_id=?");
        values.push(Box::new(acct));
    }
    sql.push_str(" ORDER BY date, id");

    let refs: Vec<&dyn rusqlite::ToSql> = values.iter().map(|v| v.as_ref()).collect();
    collect(conn, &sql, &refs)
}

pub fn count(conn: &Connection) -> LedgerResult<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    Ok(n as usize)
}

/// Moves every transaction labelled `old` to `new`. Returns how many rows
/// changed.
pub fn rename_category(conn: &Connection, old: &str, new: &str) -> LedgerResult<usize> {
    let n = conn.execute(
        "UPDATE transactions SET category=?2 WHERE category=?1",
        params![old, new],
    )?;
    Ok(n)
}

pub fn clear(conn: &Connection) -> LedgerResult<()> {
    conn.execute("DELETE FROM transactions", [])?;
    Ok(())
}
