// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, Row, params};

use crate::errors::{LedgerError, LedgerResult};
use crate::models::Goal;
use crate::utils::{date_col, decimal_col};

fn read_row(r: &Row<'_>) -> LedgerResult<Goal> {
    let target: String = r.get(3)?;
    let current: String = r.get(4)?;
    let date: String = r.get(5)?;
    Ok(Goal {
        id: r.get(0)?,
        name: r.get(1)?,
        r#type: r.get(2)?,
        target_amount: decimal_col(&target, "target amount")?,
        current_amount: decimal_col(&current, "current amount")?,
        target_date: date_col(&date, "target date")?,
        notes: r.get(6)?,
    })
}

/// `goal.id` is ignored; the assigned id is returned.
pub fn create(conn: &Connection, goal: &Goal) -> LedgerResult<i64> {
    if goal.name.trim().is_empty() {
        return Err(LedgerError::invalid("goal name must not be empty"));
    }
    conn.execute(
        "INSERT INTO goals(name, type, target_amount, current_amount, target_date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            goal.name.trim(),
            goal.r#type,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.target_date.to_string(),
            goal.notes
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_with_id(conn: &Connection, goal: &Goal) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO goals(id, name, type, target_amount, current_amount, target_date, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            goal.id,
            goal.name,
            goal.r#type,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.target_date.to_string(),
            goal.notes
        ],
    )?;
    Ok(())
}

pub fn list(conn: &Connection) -> LedgerResult<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, target_amount, current_amount, target_date, notes
         FROM goals ORDER BY target_date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(read_row(r)?);
    }
    Ok(data)
}

pub fn get(conn: &Connection, id: i64) -> LedgerResult<Goal> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, target_amount, current_amount, target_date, notes
         FROM goals WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    match rows.next()? {
        Some(r) => read_row(r),
        None => Err(LedgerError::not_found("Goal", id)),
    }
}

pub fn update(conn: &Connection, goal: &Goal) -> LedgerResult<()> {
    let changed = conn.execute(
        "UPDATE goals SET name=?1, type=?2, target_amount=?3, current_amount=?4, target_date=?5, notes=?6
         WHERE id=?7",
        params![
            goal.name.trim(),
            goal.r#type,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.target_date.to_string(),
            goal.notes,
            goal.id
        ],
    )?;
    if changed == 0 {
        return Err(LedgerError::not_found("Goal", goal.id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> LedgerResult<()> {
    let changed = conn.execute("DELETE FROM goals WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::not_found("Goal", id));
    }
    Ok(())
}

pub fn clear(conn: &Connection) -> LedgerResult<()> {
    conn.execute("DELETE FROM goals", [])?;
    Ok(())
}
