// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use budgetclip::db;
use budgetclip::ledger;
use budgetclip::models::{AccountType, Cadence, NewTransaction, TransactionTemplate, TxKind};
use budgetclip::store::accounts;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn account(conn: &Connection, name: &str, opening: &str) -> i64 {
    accounts::create(conn, name, AccountType::Checking, dec(opening)).unwrap()
}

pub fn balance(conn: &Connection, id: i64) -> Decimal {
    accounts::get(conn, id).unwrap().balance
}

pub fn template(
    description: &str,
    amount: &str,
    kind: TxKind,
    account_id: Option<i64>,
) -> TransactionTemplate {
    TransactionTemplate {
        description: description.to_string(),
        amount: dec(amount),
        kind,
        category: "Housing".to_string(),
        subcategory: None,
        account_id,
    }
}

pub fn one_off(
    description: &str,
    amount: &str,
    kind: TxKind,
    date: NaiveDate,
    account_id: Option<i64>,
) -> NewTransaction {
    template(description, amount, kind, account_id).instantiate(Cadence::None, date, None)
}

/// Records `new` through the ledger and returns its id.
pub fn record(conn: &Connection, new: &NewTransaction) -> i64 {
    ledger::add_transaction(conn, new).unwrap()
}

/// A one-off expense linked to `account`.
pub fn spend(conn: &Connection, desc: &str, amount: &str, date: NaiveDate, account: i64) -> i64 {
    let new = one_off(desc, amount, TxKind::Expense, date, Some(account));
    record(conn, &new)
}

/// A one-off income linked to `account`.
pub fn earn(conn: &Connection, desc: &str, amount: &str, date: NaiveDate, account: i64) -> i64 {
    let new = one_off(desc, amount, TxKind::Income, date, Some(account));
    record(conn, &new)
}

/// Runs `args` through the real CLI definition and returns the matches of
/// the innermost subcommand.
pub fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["budgetclip"];
    argv.extend_from_slice(args);
    let mut m = budgetclip::cli::build_cli().get_matches_from(argv);
    while let Some((_, sub)) = m.subcommand() {
        m = sub.clone();
    }
    m
}
