// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetclip::commands;
use budgetclip::errors::LedgerError;
use budgetclip::models::{Cadence, TxKind};
use budgetclip::recurrence::{self, RecurrencePlan};
use budgetclip::store::transactions;
use budgetclip::utils::{OPEN_ENDED_KEY, set_setting};
use chrono::{NaiveDate, Weekday};
use common::{account, balance, conn, d, dec, matches, template};
use rusqlite::Connection;

fn plan(cadence: Cadence, start: NaiveDate, end: Option<NaiveDate>) -> RecurrencePlan {
    RecurrencePlan {
        cadence,
        date: start,
        start: Some(start),
        end,
        preferred_weekday: None,
    }
}

fn dates_of(conn: &Connection, ids: &[i64]) -> Vec<NaiveDate> {
    ids.iter()
        .map(|id| transactions::get(conn, *id).unwrap().date)
        .collect()
}

#[test]
fn monthly_from_month_end_clamps_with_configured_cap() {
    let conn = conn();
    set_setting(&conn, OPEN_ENDED_KEY, "3").unwrap();
    let ids = recurrence::expand(
        &conn,
        &template("Rent", "1200", TxKind::Expense, None),
        &plan(Cadence::Monthly, d(2024, 1, 31), None),
    )
    .unwrap();
    assert_eq!(
        dates_of(&conn, &ids),
        vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31)]
    );
}

#[test]
fn weekly_with_end_is_inclusive_and_shares_series() {
    let conn = conn();
    let acct = account(&conn, "Chequing", "0");
    let ids = recurrence::expand(
        &conn,
        &template("Groceries", "75.10", TxKind::Expense, Some(acct)),
        &plan(Cadence::Weekly, d(2024, 3, 4), Some(d(2024, 3, 25))),
    )
    .unwrap();
    assert_eq!(ids.len(), 4);

    let stored: Vec<_> = ids
        .iter()
        .map(|id| transactions::get(&conn, *id).unwrap())
        .collect();
    let series = stored[0].series_id.clone();
    assert!(series.is_some());
    for t in &stored {
        assert_eq!(t.series_id, series);
        assert_eq!(t.cadence, Cadence::Weekly);
    }
    assert_eq!(balance(&conn, acct), dec("-300.40"));
}

#[test]
fn open_ended_defaults_to_24() {
    let conn = conn();
    let ids = recurrence::expand(
        &conn,
        &template("Gym", "30", TxKind::Expense, None),
        &plan(Cadence::Biweekly, d(2024, 1, 5), None),
    )
    .unwrap();
    assert_eq!(ids.len(), 24);
}

#[test]
fn one_off_has_no_series() {
    let conn = conn();
    let ids = recurrence::expand(
        &conn,
        &template("Laptop", "1500", TxKind::Expense, None),
        &RecurrencePlan::once(d(2024, 6, 1)),
    )
    .unwrap();
    let t = transactions::get(&conn, ids[0]).unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(t.cadence, Cadence::None);
    assert_eq!(t.series_id, None);
    assert_eq!(t.date, d(2024, 6, 1));
}

#[test]
fn invalid_template_or_range_creates_nothing() {
    let conn = conn();
    let err = recurrence::expand(
        &conn,
        &template("", "10", TxKind::Expense, None),
        &plan(Cadence::Monthly, d(2024, 1, 1), None),
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = recurrence::expand(
        &conn,
        &template("Rent", "10", TxKind::Expense, None),
        &plan(Cadence::Monthly, d(2024, 5, 1), Some(d(2024, 1, 1))),
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(transactions::count(&conn).unwrap(), 0);
}

#[test]
fn failed_insert_keeps_earlier_occurrences() {
    let conn = conn();
    let acct = account(&conn, "Chequing", "0");
    conn.execute_batch(
        "CREATE TRIGGER fail_third BEFORE INSERT ON transactions
         WHEN NEW.date = '2024-01-15'
         BEGIN SELECT RAISE(ABORT, 'insert refused'); END;",
    )
    .unwrap();

    let result = recurrence::expand(
        &conn,
        &template("Swim", "20", TxKind::Expense, Some(acct)),
        &plan(Cadence::Weekly, d(2024, 1, 1), Some(d(2024, 1, 29))),
    );
    assert!(result.is_err());

    // occurrences before the failure stay, each with its balance effect
    let kept: Vec<NaiveDate> = transactions::list_all(&conn)
        .unwrap()
        .iter()
        .map(|t| t.date)
        .collect();
    assert_eq!(kept.len(), 2);
    assert!(kept.contains(&d(2024, 1, 1)));
    assert!(kept.contains(&d(2024, 1, 8)));
    assert_eq!(balance(&conn, acct), dec("-40"));
}

#[test]
fn preferred_weekday_moves_anchor_without_start() {
    let conn = conn();
    // 2024-03-06 is a Wednesday
    let p = RecurrencePlan {
        cadence: Cadence::Weekly,
        date: d(2024, 3, 6),
        start: None,
        end: Some(d(2024, 3, 20)),
        preferred_weekday: Some(Weekday::Fri),
    };
    let lunch = template("Lunch", "12", TxKind::Expense, None);
    let ids = recurrence::expand(&conn, &lunch, &p).unwrap();
    assert_eq!(dates_of(&conn, &ids), vec![d(2024, 3, 8), d(2024, 3, 15)]);
}

#[test]
fn cli_add_expands_recurring_transaction() {
    let conn = conn();
    account(&conn, "Chequing", "100");
    let m = matches(&[
        "tx",
        "add",
        "--description",
        "Phone",
        "--amount",
        "45",
        "--category",
        "Utilities",
        "--account",
        "Chequing",
        "--cadence",
        "monthly",
        "--start",
        "2024-01-15",
        "--end",
        "2024-06-15",
    ]);
    let ids = commands::transactions::add(&conn, &m).unwrap();
    assert_eq!(ids.len(), 6);
    let acct = budgetclip::utils::id_for_account(&conn, "Chequing").unwrap();
    assert_eq!(balance(&conn, acct), dec("-170"));
}
