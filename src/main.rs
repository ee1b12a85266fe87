// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use dompet::store::Store;
use dompet::{cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("session", sub)) => commands::session::handle(&conn, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        Some((name, sub)) => {
            let mut store = Store::open(&conn)?;
            match name {
                "tx" => commands::transactions::handle(&mut store, sub)?,
                "budget" => commands::budgets::handle(&mut store, sub)?,
                "report" => commands::reports::handle(&mut store, sub)?,
                "savings" => commands::savings::handle(&mut store, sub)?,
                "bill" => commands::bills::handle(&mut store, sub)?,
                "note" => commands::notes::handle(&mut store, sub)?,
                "habit" => commands::habits::handle(&mut store, sub)?,
                "export" => commands::exporter::handle(&mut store, sub)?,
                "dashboard" => commands::dashboard::handle(&mut store, sub)?,
                _ => {}
            }
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
