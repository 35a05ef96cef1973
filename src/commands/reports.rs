// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{TransactionFilter, TxKind};
use crate::store::accounts;
use crate::utils::{fmt_money, maybe_print_json, optional_date, pretty_table};
use crate::views;
use anyhow::{Context, Result};
use chrono::Datelike;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("networth", sub)) => networth(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn range_filter(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        from: optional_date(sub, "from")?,
        to: optional_date(sub, "to")?,
        ..TransactionFilter::default()
    })
}

fn totals(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let txs = views::filter_transactions(conn, &range_filter(sub)?)?;
    let t = views::period_totals(&txs);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        let rows = vec![
            vec!["Income".into(), fmt_money(&t.income)],
            vec!["Expense".into(), fmt_money(&t.expense)],
            vec!["Savings".into(), fmt_money(&t.savings)],
            vec!["Net (income - expense)".into(), fmt_money(&t.net)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryLine {
    category: String,
    total: String,
    count: usize,
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut filter = range_filter(sub)?;
    filter.kind = Some(
        sub.get_one::<String>("kind")
            .context("missing --kind")?
            .parse::<TxKind>()?,
    );
    let txs = views::filter_transactions(conn, &filter)?;
    let data: Vec<CategoryLine> = views::category_rollup(&txs)
        .into_iter()
        .map(|r| CategoryLine {
            count: r.members.len(),
            total: fmt_money(&r.total),
            category: r.category,
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|l| vec![l.category.clone(), l.total.clone(), l.count.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Count"], rows));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| chrono::Local::now().year());
    let txs = views::filter_transactions(conn, &TransactionFilter::default())?;
    let data = views::monthly_trend(&txs, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    fmt_money(&m.income),
                    fmt_money(&m.expense),
                    fmt_money(&(m.income - m.expense)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}

fn networth(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let nw = views::net_worth(&accounts::list(conn)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &nw)? {
        let rows = vec![
            vec!["Assets".into(), fmt_money(&nw.assets)],
            vec!["Liabilities".into(), fmt_money(&nw.liabilities)],
            vec!["Net worth".into(), fmt_money(&nw.net)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}
