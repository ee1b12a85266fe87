// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{current_session, login, logout};
use crate::error::Error;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => {
            let name = sub.get_one::<String>("user").unwrap();
            let session = login(conn, name)?;
            println!("Logged in as '{}' (#{})", session.user_name, session.user_id);
        }
        Some(("logout", _)) => {
            logout(conn)?;
            println!("Logged out");
        }
        Some(("whoami", _)) => match current_session(conn) {
            Ok(s) => println!("{} (#{})", s.user_name, s.user_id),
            Err(Error::Unauthorized) => println!("Not logged in"),
            Err(e) => return Err(e.into()),
        },
        _ => {}
    }
    Ok(())
}
