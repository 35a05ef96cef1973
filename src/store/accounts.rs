// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{Account, AccountType};
use crate::utils::decimal_col;

fn read_row(r: &Row<'_>) -> LedgerResult<Account> {
    let typ: String = r.get(2)?;
    let balance: String = r.get(3)?;
    Ok(Account {
        id: r.get(0)?,
        name: r.get(1)?,
        r#type: typ.parse()?,
        balance: decimal_col(&balance, "balance")?,
    })
}

pub fn create(
    conn: &Connection,
    name: &str,
    typ: AccountType,
    balance: Decimal,
) -> LedgerResult<i64> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::invalid("account name must not be empty"));
    }
    conn.execute(
        "INSERT INTO accounts(name, type, balance) VALUES (?1, ?2, ?3)",
        params![name, typ.as_str(), balance.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_with_id(conn: &Connection, account: &Account) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO accounts(id, name, type, balance) VALUES (?1, ?2, ?3, ?4)",
        params![
            account.id,
            account.name,
            account.r#type.as_str(),
            account.balance.to_string()
        ],
    )?;
    Ok(())
}

pub fn find(conn: &Connection, id: i64) -> LedgerResult<Option<Account>> {
    let mut stmt = conn.prepare("SELECT id, name, type, balance FROM accounts WHERE id=?1")?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => Ok(Some(read_row(r)?)),
        None => Ok(None),
    }
}

pub fn get(conn: &Connection, id: i64) -> LedgerResult<Account> {
    find(conn, id)?.ok_or_else(|| LedgerError::not_found("Account", id))
}

pub fn list(conn: &Connection) -> LedgerResult<Vec<Account>> {
    let mut stmt = conn.prepare("SELECT id, name, type, balance FROM accounts ORDER BY name")?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(read_row(r)?);
    }
    Ok(data)
}

/// Renames or retypes an account. The balance column is left alone; use
/// [`set_balance`] for that.
pub fn update(conn: &Connection, account: &Account) -> LedgerResult<()> {
    let changed = conn.execute(
        "UPDATE accounts SET name=?1, type=?2 WHERE id=?3",
        params![account.name.trim(), account.r#type.as_str(), account.id],
    )?;
    if changed == 0 {
        return Err(LedgerError::not_found("Account", account.id));
    }
    Ok(())
}

/// Overwrites the stored balance. Used by the reconciler and by manual
/// corrections.
pub fn set_balance(conn: &Connection, id: i64, balance: Decimal) -> LedgerResult<()> {
    let changed = conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2",
        params![balance.to_string(), id],
    )?;
    if changed == 0 {
        return Err(LedgerError::not_found("Account", id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> LedgerResult<()> {
    let changed = conn.execute("DELETE FROM accounts WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::not_found("Account", id));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> LedgerResult<()> {
    conn.execute("DELETE FROM accounts", [])?;
    Ok(())
}
