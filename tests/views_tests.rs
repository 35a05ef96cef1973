// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetclip::ledger;
use budgetclip::models::{AccountType, TransactionFilter, TxKind};
use budgetclip::store::accounts;
use budgetclip::views;
use common::{conn, d, dec, one_off};
use rusqlite::Connection;

fn seed(conn: &Connection) {
    let rows = [
        ("Salary", "3000", TxKind::Income, d(2024, 1, 31), "Salary"),
        ("Rent", "1200", TxKind::Expense, d(2024, 1, 1), "Housing"),
        ("Groceries", "210.40", TxKind::Expense, d(2024, 1, 12), "Food"),
        ("Takeout", "39.60", TxKind::Expense, d(2024, 2, 3), "Food"),
        ("TFSA", "500", TxKind::Savings, d(2024, 2, 15), "Investments"),
        ("Misc", "15", TxKind::Expense, d(2024, 2, 20), " "),
    ];
    for (desc, amt, kind, date, cat) in rows {
        let mut new = one_off(desc, amt, kind, date, None);
        new.category = cat.to_string();
        ledger::add_transaction(conn, &new).unwrap();
    }
}

#[test]
fn filter_is_inclusive_and_date_ordered() {
    let conn = conn();
    seed(&conn);
    let txs = views::filter_transactions(
        &conn,
        &TransactionFilter {
            from: Some(d(2024, 1, 12)),
            to: Some(d(2024, 2, 3)),
            ..Default::default()
        },
    )
    .unwrap();
    let names: Vec<_> = txs.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(names, vec!["Groceries", "Salary", "Takeout"]);

    let food = views::filter_transactions(
        &conn,
        &TransactionFilter {
            kind: Some(TxKind::Expense),
            category: Some("Food".into()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(food.len(), 2);
}

#[test]
fn totals_keep_savings_out_of_net() {
    let conn = conn();
    seed(&conn);
    let all = views::filter_transactions(&conn, &TransactionFilter::default()).unwrap();
    let t = views::period_totals(&all);
    assert_eq!(t.income, dec("3000"));
    assert_eq!(t.expense, dec("1465"));
    assert_eq!(t.savings, dec("500"));
    assert_eq!(t.net, dec("1535"));
}

#[test]
fn rollup_sorts_by_total_and_names_blank_category() {
    let conn = conn();
    seed(&conn);
    let expenses = views::filter_transactions(
        &conn,
        &TransactionFilter {
            kind: Some(TxKind::Expense),
            ..Default::default()
        },
    )
    .unwrap();
    let rollup = views::category_rollup(&expenses);
    let summary: Vec<_> = rollup
        .iter()
        .map(|r| (r.category.as_str(), r.total, r.members.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Housing", dec("1200"), 1),
            ("Food", dec("250"), 2),
            (views::UNCATEGORIZED, dec("15"), 1),
        ]
    );
}

#[test]
fn monthly_trend_has_twelve_rows() {
    let conn = conn();
    seed(&conn);
    let all = views::filter_transactions(&conn, &TransactionFilter::default()).unwrap();
    let trend = views::monthly_trend(&all, 2024);
    assert_eq!(trend.len(), 12);
    assert_eq!(trend[0].month, "2024-01");
    assert_eq!(trend[0].income, dec("3000"));
    assert_eq!(trend[0].expense, dec("1410.40"));
    assert_eq!(trend[1].expense, dec("54.60"));
    let empty = |m: &views::MonthTotals| m.income.is_zero() && m.expense.is_zero();
    assert!(trend[2..].iter().all(empty));
    let earlier = views::monthly_trend(&all, 2023);
    assert!(earlier.iter().all(empty));
}

#[test]
fn net_worth_subtracts_liabilities() {
    let conn = conn();
    accounts::create(&conn, "Chequing", AccountType::Checking, dec("2500")).unwrap();
    accounts::create(&conn, "RRSP", AccountType::Rrsp, dec("10000")).unwrap();
    accounts::create(&conn, "Visa", AccountType::CreditCard, dec("800")).unwrap();
    accounts::create(&conn, "Mortgage", AccountType::Mortgage, dec("250000")).unwrap();
    let nw = views::net_worth(&accounts::list(&conn).unwrap());
    assert_eq!(nw.assets, dec("12500"));
    assert_eq!(nw.liabilities, dec("250800"));
    assert_eq!(nw.net, dec("-238300"));
}
