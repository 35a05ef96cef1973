// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetclip::models::TxKind;
use budgetclip::{cli, commands::transactions, store};
use common::{account, balance, conn, d, dec, one_off, record, spend};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = conn();
    for i in 1..=3 {
        let new = one_off("P", "10", TxKind::Expense, d(2025, 1, i), None);
        record(&conn, &new);
    }
    conn
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["budgetclip", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&conn, list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_pages_newest_insert_first() {
    let conn = setup();
    // inserted out of date order; paging follows insertion, not date
    let late = one_off("Late entry", "5", TxKind::Expense, d(2024, 12, 1), None);
    record(&conn, &late);
    let m = common::matches(&["tx", "list", "--offset", "1", "--limit", "2"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-03", "2025-01-02"]);
}

#[test]
fn list_with_filter_orders_by_date() {
    let conn = setup();
    let bonus = one_off("Bonus", "500", TxKind::Income, d(2025, 1, 2), None);
    record(&conn, &bonus);
    let m = common::matches(&["tx", "list", "--from", "2025-01-02", "--kind", "expense"]);
    let rows = transactions::query_rows(&conn, &m).unwrap();
    let dates: Vec<_> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-01-02", "2025-01-03"]);
    for r in &rows {
        assert_eq!((r.kind.as_str(), r.amount.as_str()), ("expense", "10.00"));
    }
}

#[test]
fn rows_name_linked_accounts() {
    let conn = conn();
    let acct = account(&conn, "Visa", "0");
    spend(&conn, "Fuel", "60", d(2025, 2, 1), acct);
    let rows = transactions::query_rows(&conn, &common::matches(&["tx", "list"])).unwrap();
    assert_eq!(rows[0].account, "Visa");
}

#[test]
fn edit_and_rm_go_through_the_ledger() {
    let conn = conn();
    let acct = account(&conn, "Chequing", "0");
    let id = spend(&conn, "Fuel", "60", d(2025, 2, 1), acct).to_string();

    let argv = ["budgetclip", "tx", "edit", "--id", &id, "--amount", "75"];
    let m = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = m.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();
    assert_eq!(balance(&conn, acct), dec("-75"));

    let m = cli::build_cli().get_matches_from(["budgetclip", "tx", "rm", "--id", &id]);
    let Some(("tx", tx_m)) = m.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&conn, tx_m).unwrap();
    // a second rm is a no-op
    transactions::handle(&conn, tx_m).unwrap();
    assert_eq!(balance(&conn, acct), dec("0"));
    assert_eq!(store::transactions::count(&conn).unwrap(), 0);
}

#[test]
fn delete_many_skips_missing_rows() {
    let conn = setup();
    let removed = store::transactions::delete_many(&conn, &[1, 99, 3]).unwrap();
    assert_eq!(removed, vec![1, 3]);
    assert_eq!(store::transactions::count(&conn).unwrap(), 1);
}
