// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use rusqlite::Connection;

use crate::utils::{DEFAULT_OPEN_ENDED_OCCURRENCES, OPEN_ENDED_KEY, get_setting, set_setting};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").context("missing --key")?;
            match get_setting(conn, key)? {
                Some(v) => println!("{} = {}", key, v),
                None if key == OPEN_ENDED_KEY => {
                    println!("{} = {} (default)", key, DEFAULT_OPEN_ENDED_OCCURRENCES)
                }
                None => println!("{} is not set", key),
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("missing --key")?;
            let value = sub.get_one::<String>("value").context("missing --value")?;
            if key == OPEN_ENDED_KEY {
                let n: usize = value
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a positive integer", OPEN_ENDED_KEY))?;
                if n == 0 {
                    bail!("{} must be at least 1", OPEN_ENDED_KEY);
                }
            }
            set_setting(conn, key, value.trim())?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
