// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetclip::db::SCHEMA_VERSION;
use budgetclip::ledger;
use budgetclip::models::{Cadence, Goal, TxKind};
use budgetclip::recurrence::{self, RecurrencePlan};
use budgetclip::snapshot;
use budgetclip::store::{accounts, categories, goals, transactions};
use common::{account, balance, conn, d, dec, earn, one_off, record, template};
use rusqlite::Connection;
use std::collections::BTreeSet;
use tempfile::tempdir;

#[test]
fn snapshot_round_trips_through_a_file() {
    let src = conn();
    let acct = account(&src, "Chequing", "100");
    categories::create(&src, "Housing", TxKind::Expense).unwrap();
    categories::create_subcategory(&src, "Housing", "Rent").unwrap();
    goals::create(
        &src,
        &Goal {
            id: 0,
            name: "Emergency fund".into(),
            r#type: "savings".into(),
            target_amount: dec("10000"),
            current_amount: dec("2500"),
            target_date: d(2025, 12, 31),
            notes: None,
        },
    )
    .unwrap();
    recurrence::expand(
        &src,
        &template("Rent", "900", TxKind::Expense, Some(acct)),
        &RecurrencePlan {
            cadence: Cadence::Monthly,
            date: d(2024, 1, 1),
            start: Some(d(2024, 1, 1)),
            end: Some(d(2024, 3, 1)),
            preferred_weekday: None,
        },
    )
    .unwrap();
    let oops = one_off("Oops", "1", TxKind::Expense, d(2024, 1, 2), None);
    let dropped = record(&src, &oops);
    ledger::delete_transaction(&src, dropped).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("bundle.json");
    let written = snapshot::write_snapshot(&src, &path).unwrap();
    assert_eq!(written.version, SCHEMA_VERSION);
    assert_eq!(written.transactions.len(), 3);

    let mut dst = conn();
    account(&dst, "Stale", "5");
    let read = snapshot::read_snapshot(&path).unwrap();
    let summary = snapshot::import_snapshot(&mut dst, &read).unwrap();
    assert_eq!(summary.transactions, 3);
    assert_eq!(summary.accounts, 1);
    assert_eq!(summary.goals, 1);

    // ids survive, including the gap left by the deleted row
    let ids = |c: &Connection| -> BTreeSet<i64> {
        transactions::list_all(c)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect()
    };
    assert_eq!(ids(&src), ids(&dst));
    assert_eq!(accounts::list(&dst).unwrap(), accounts::list(&src).unwrap());
    assert_eq!(balance(&dst, acct), dec("-2600"));
    let subs = categories::list_subcategories(&dst, Some("Housing")).unwrap();
    assert_eq!(subs.len(), 1);
}

#[test]
fn import_trusts_bundle_balances() {
    let src = conn();
    let acct = account(&src, "Chequing", "0");
    earn(&src, "Pay", "100", d(2024, 1, 1), acct);
    let mut snap = snapshot::export_snapshot(&src).unwrap();
    snap.accounts[0].balance = dec("42");

    let mut dst = conn();
    snapshot::import_snapshot(&mut dst, &snap).unwrap();
    assert_eq!(balance(&dst, acct), dec("42"));
}

#[test]
fn newer_version_is_rejected_and_leaves_data() {
    let mut c = conn();
    account(&c, "Keep me", "1");
    let mut snap = snapshot::export_snapshot(&c).unwrap();
    snap.version = SCHEMA_VERSION + 1;
    snap.accounts.clear();
    assert!(snapshot::import_snapshot(&mut c, &snap).is_err());
    assert_eq!(accounts::list(&c).unwrap().len(), 1);
}

#[test]
fn bundles_without_series_ids_still_load() {
    let raw = r#"{
        "version": 1,
        "exported_at": "2024-05-01T12:00:00Z",
        "transactions": [{
            "id": 7, "description": "Gym", "amount": "30", "kind": "expense",
            "category": "Health", "subcategory": null, "cadence": "monthly",
            "date": "2024-04-01", "account_id": null
        }]
    }"#;
    let snap: snapshot::Snapshot = serde_json::from_str(raw).unwrap();
    let mut c = conn();
    let summary = snapshot::import_snapshot(&mut c, &snap).unwrap();
    assert_eq!(summary.transactions, 1);
    assert_eq!(summary.accounts, 0);
    let t = transactions::get(&c, 7).unwrap();
    assert_eq!(t.series_id, None);
    assert_eq!(t.amount, dec("30"));
}
