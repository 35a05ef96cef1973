// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only projections over the store.

use std::collections::BTreeMap;

use chrono::Datelike;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::LedgerResult;
use crate::models::{Account, Transaction, TransactionFilter, TxKind};
use crate::store::transactions;

pub const UNCATEGORIZED: &str = "Other";

pub fn filter_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
) -> LedgerResult<Vec<Transaction>> {
    transactions::query(conn, filter)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
    /// income - expense
    pub net: Decimal,
}

pub fn period_totals(txs: &[Transaction]) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for t in txs {
        match t.kind {
            TxKind::Income => totals.income += t.amount,
            TxKind::Expense => totals.expense += t.amount,
            TxKind::Savings => totals.savings += t.amount,
        }
    }
    totals.net = totals.income - totals.expense;
    totals
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRollup {
    pub category: String,
    pub total: Decimal,
    pub members: Vec<Transaction>,
}

/// Largest total first; ties by name.
pub fn category_rollup(txs: &[Transaction]) -> Vec<CategoryRollup> {
    let mut by_cat: BTreeMap<String, (Decimal, Vec<Transaction>)> = BTreeMap::new();
    for t in txs {
        let key = match t.category.trim() {
            "" => UNCATEGORIZED.to_string(),
            c => c.to_string(),
        };
        let entry = by_cat.entry(key).or_insert((Decimal::ZERO, Vec::new()));
        entry.0 += t.amount;
        entry.1.push(t.clone());
    }
    let mut out: Vec<CategoryRollup> = by_cat
        .into_iter()
        .map(|(category, (total, members))| CategoryRollup {
            category,
            total,
            members,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
}

/// Twelve rows, January through December of `year`.
pub fn monthly_trend(txs: &[Transaction], year: i32) -> Vec<MonthTotals> {
    let mut months: Vec<MonthTotals> = (1..=12)
        .map(|m| MonthTotals {
            month: format!("{:04}-{:02}", year, m),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();
    for t in txs.iter().filter(|t| t.date.year() == year) {
        let row = &mut months[t.date.month0() as usize];
        match t.kind {
            TxKind::Income => row.income += t.amount,
            TxKind::Expense => row.expense += t.amount,
            TxKind::Savings => {}
        }
    }
    months
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetWorth {
    pub assets: Decimal,
    pub liabilities: Decimal,
    /// assets - liabilities
    pub net: Decimal,
}

pub fn net_worth(accounts: &[Account]) -> NetWorth {
    let mut nw = NetWorth::default();
    for a in accounts {
        if a.r#type.is_liability() {
            nw.liabilities += a.balance;
        } else {
            nw.assets += a.balance;
        }
    }
    nw.net = nw.assets - nw.liabilities;
    nw
}
