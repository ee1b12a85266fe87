// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

/// `YYYY-MM` to the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("Invalid month '{}', expected YYYY-MM", s)))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_| Error::validation(format!("Invalid decimal '{}'", s)))
}

/// Most decimal places a money amount may carry.
pub const MONEY_SCALE: u32 = 2;

pub fn require_money_scale(d: Decimal) -> Result<Decimal> {
    if d.normalize().scale() > MONEY_SCALE {
        return Err(Error::validation(format!(
            "Amount {} has more than {} decimal places",
            d, MONEY_SCALE
        )));
    }
    Ok(d)
}

/// A decimal that must be strictly positive, as every stored amount is.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = require_money_scale(parse_decimal(s)?)?;
    if d <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "Amount must be greater than zero, got {}",
            s.trim()
        )));
    }
    Ok(d)
}

pub fn month_label(first_of_month: NaiveDate) -> String {
    first_of_month.format("%Y-%m").to_string()
}

/// Evaluation date: `--today` when given, otherwise the local calendar date.
pub fn today(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.try_get_one::<String>("today").ok().flatten() {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    let rounded = d.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!(
        "{}{} {}.{}",
        if negative { "-" } else { "" },
        ccy,
        grouped,
        frac
    )
}

pub fn fmt_percent(p: Option<Decimal>) -> String {
    match p {
        Some(p) => format!("{:.1}%", p.round_dp(1)),
        None => "N/A".to_string(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Reads `--json`/`--jsonl` from a subcommand that may not define them.
pub fn json_flags(m: &clap::ArgMatches) -> (bool, bool) {
    let flag = |name: &str| m.try_get_one::<bool>(name).ok().flatten().copied().unwrap_or(false);
    (flag("json"), flag("jsonl"))
}
