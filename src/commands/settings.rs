// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{current_session, get_currency, set_currency};
use crate::db;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let user = current_session(conn)
                .map(|s| s.user_name)
                .unwrap_or_else(|_| "-".to_string());
            let rows = vec![
                vec!["database".to_string(), db::db_path()?.display().to_string()],
                vec!["currency".to_string(), get_currency(conn)?],
                vec!["user".to_string(), user],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set-currency", sub)) => {
            let code = set_currency(conn, sub.get_one::<String>("code").unwrap())?;
            println!("Currency set to {}", code);
        }
        _ => {}
    }
    Ok(())
}
