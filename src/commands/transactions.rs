// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::Period;
use crate::config::get_currency;
use crate::models::{Category, TxType};
use crate::store::{NewTransaction, Store, TxFilter};
use crate::utils::{
    fmt_money, json_flags, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table,
    today,
};
use anyhow::Result;
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_transaction(id)?;
            println!("Removed transaction #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxType = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(sub)?,
    };
    let note = sub.get_one::<String>("note").map(|s| s.to_string());

    let id = store.add_transaction(&NewTransaction {
        date,
        kind,
        amount,
        category,
        note,
    })?;
    let ccy = get_currency(store.conn())?;
    println!(
        "Recorded {} #{}: {} ({}) on {}",
        kind,
        id,
        fmt_money(&amount, &ccy),
        category,
        date
    );
    Ok(())
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

pub fn filter_from_matches(sub: &clap::ArgMatches) -> Result<TxFilter> {
    let mut filter = TxFilter::default();
    if let Some(month) = sub.get_one::<String>("month") {
        filter.period = Some(Period::month_of(parse_month(month)?));
    }
    if let Some(year) = sub.get_one::<i32>("year") {
        filter.period = Some(Period::Year(*year));
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        filter.kind = Some(kind.parse()?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        filter.category = Some(cat.parse()?);
    }
    filter.limit = sub.get_one::<usize>("limit").copied();
    Ok(filter)
}

pub fn query_rows(store: &mut Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_matches(sub)?;
    let data = store
        .transactions(&filter)?
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            category: t.category.label().to_string(),
            amount: t.amount.to_string(),
            note: t.note.unwrap_or_default(),
        })
        .collect();
    Ok(data)
}
