// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};

pub const OPEN_ENDED_KEY: &str = "open_ended_occurrences";
pub const DEFAULT_OPEN_ENDED_OCCURRENCES: usize = 24;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parses the named date argument when it was given.
pub fn optional_date(sub: &clap::ArgMatches, key: &str) -> Result<Option<NaiveDate>> {
    match sub.get_one::<String>(key) {
        Some(s) => parse_date(s).map(Some),
        None => Ok(None),
    }
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| anyhow::anyhow!("Invalid weekday '{}', expected e.g. mon|tuesday", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_account(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name.trim()], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name.trim()))?;
    Ok(id)
}

// Stored column decoding; a bad value means the file was edited by hand.
pub(crate) fn decimal_col(raw: &str, what: &str) -> LedgerResult<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|_| LedgerError::Corrupt(format!("invalid {} '{}'", what, raw)))
}

pub(crate) fn date_col(raw: &str, what: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| LedgerError::Corrupt(format!("invalid {} '{}'", what, raw)))
}

// Settings
pub fn get_setting(conn: &Connection, key: &str) -> LedgerResult<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> LedgerResult<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// How many occurrences an expansion without an end date produces.
pub fn open_ended_occurrences(conn: &Connection) -> LedgerResult<usize> {
    match get_setting(conn, OPEN_ENDED_KEY)? {
        Some(v) => v.trim().parse::<usize>().map_err(|_| {
            LedgerError::Corrupt(format!("setting {} has invalid value '{}'", OPEN_ENDED_KEY, v))
        }),
        None => Ok(DEFAULT_OPEN_ENDED_OCCURRENCES),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
