// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

const ACCOUNT_TYPES: &str = "checking|savings|tfsa|fhsa|rrsp|labour_fund|investment|\
    credit_card|line_of_credit|home_equity_line|loan|mortgage|car_lease";

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .help("First date (YYYY-MM-DD), inclusive"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("Last date (YYYY-MM-DD), inclusive"),
    )
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("budgetclip")
        .about("Personal budget ledger with recurring series and reconciled balances")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database if it does not exist"))
        .subcommand(
            Command::new("config")
                .about("Runtime settings")
                .subcommand(Command::new("get").arg(Arg::new("key").long("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help(ACCOUNT_TYPES),
                        )
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set-balance")
                        .about("Manual correction; bypasses reconciliation")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("balance").long("balance").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories and subcategories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("kind").long("kind").required(true)),
                )
                .subcommand(Command::new("list").arg(Arg::new("kind").long("kind")))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg("Category to rename"))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg("Category to delete")))
                .subcommand(
                    Command::new("sub-add")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("sub-list").arg(Arg::new("category").long("category")))
                .subcommand(Command::new("sub-rm").arg(id_arg("Subcategory to delete"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("current").long("current").default_value("0"))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg("Goal to update"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("current").long("current"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(Command::new("rm").arg(id_arg("Goal to delete"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("kind").long("kind").default_value("expense"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .help("Linked account name"),
                        )
                        .arg(Arg::new("date").long("date").help("Defaults to today"))
                        .arg(Arg::new("cadence").long("cadence").default_value("none"))
                        .arg(Arg::new("start").long("start").help("First occurrence"))
                        .arg(
                            Arg::new("end")
                                .long("end")
                                .conflicts_with("no_end")
                                .help("Last possible occurrence, inclusive"),
                        )
                        .arg(
                            Arg::new("no_end")
                                .long("no-end")
                                .action(ArgAction::SetTrue)
                                .help("Open-ended series"),
                        )
                        .arg(
                            Arg::new("weekday")
                                .long("weekday")
                                .help("Preferred weekday when --start is not given"),
                        ),
                )
                .subcommand(json_flags(range_args(
                    Command::new("list")
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("offset")
                                .long("offset")
                                .default_value("0")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .default_value("100")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg("Transaction to edit"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("kind").long("kind"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("account").long("account"))
                        .arg(
                            Arg::new("no_account")
                                .long("no-account")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("account"),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg("Transaction to delete"))),
        )
        .subcommand(
            Command::new("series")
                .about("Inspect and edit recurring groups")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(
                    Command::new("show").arg(id_arg("Any occurrence of the group")),
                ))
                .subcommand(
                    Command::new("reschedule")
                        .arg(id_arg("Any occurrence of the group"))
                        .arg(Arg::new("start").long("start").required(true))
                        .arg(Arg::new("end").long("end")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(id_arg("Any occurrence of the group"))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .action(ArgAction::SetTrue)
                                .help("Confirm deleting every occurrence"),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregate views")
                .subcommand(json_flags(range_args(Command::new("totals"))))
                .subcommand(json_flags(range_args(
                    Command::new("categories")
                        .arg(Arg::new("kind").long("kind").default_value("expense")),
                )))
                .subcommand(json_flags(
                    Command::new("monthly")
                        .about("Income and expenses per month")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32)),
                        ),
                ))
                .subcommand(json_flags(Command::new("networth"))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("snapshot")
                        .about("Write every table to one JSON document")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Load data from files")
                .subcommand(
                    Command::new("snapshot")
                        .about("Replace all data with a JSON snapshot")
                        .arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .about("Append rows from a CSV in the export layout")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check balances against linked transactions"))
}
