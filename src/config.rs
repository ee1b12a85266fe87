// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Settings kept in the `settings` table, and the session user.

use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

use crate::error::{Error, Result};

pub const DEFAULT_CURRENCY: &str = "IDR";

const KEY_CURRENT_USER: &str = "current_user";
const KEY_CURRENCY: &str = "currency";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, KEY_CURRENCY)?.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()))
}

pub fn set_currency(conn: &Connection, code: &str) -> Result<String> {
    let code = code.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::validation(format!(
            "currency must be a 3-letter code, got '{}'",
            code
        )));
    }
    set_setting(conn, KEY_CURRENCY, &code)?;
    Ok(code)
}

/// The user every store statement is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: i64,
    pub user_name: String,
}

/// Makes `name` the session user, creating the user on first login.
pub fn login(conn: &Connection, name: &str) -> Result<Session> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::validation("user name must not be empty"));
    }
    conn.execute(
        "INSERT INTO users(name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        params![name],
    )?;
    let user_id: i64 = conn.query_row(
        "SELECT id FROM users WHERE name=?1",
        params![name],
        |r| r.get(0),
    )?;
    set_setting(conn, KEY_CURRENT_USER, &user_id.to_string())?;
    tracing::info!(user_id, user = name, "logged in");
    Ok(Session {
        user_id,
        user_name: name.to_string(),
    })
}

pub fn logout(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![KEY_CURRENT_USER])?;
    Ok(())
}

/// The current session, or [`Error::Unauthorized`] when nobody is logged in.
pub fn current_session(conn: &Connection) -> Result<Session> {
    let raw = get_setting(conn, KEY_CURRENT_USER)?.ok_or(Error::Unauthorized)?;
    let user_id: i64 = raw
        .parse()
        .map_err(|_| Error::Corrupt(format!("current_user '{}' is not an id", raw)))?;
    let user_name: Option<String> = conn
        .query_row(
            "SELECT name FROM users WHERE id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .optional()?;
    match user_name {
        Some(user_name) => Ok(Session { user_id, user_name }),
        None => Err(Error::Unauthorized),
    }
}
