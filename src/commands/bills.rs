// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::bills::days_until_due;
use crate::analytics::{BillState, bill_summary, classify_bill};
use crate::config::get_currency;
use crate::models::{Bill, BillCategory, BillFrequency};
use crate::store::{NewBill, Store};
use crate::utils::{fmt_money, json_flags, maybe_print_json, parse_amount, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("pay", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.mark_bill_paid(id, today(sub)?)?;
            println!("Bill #{} marked paid", id);
        }
        Some(("reset", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.reset_bill(id)?;
            println!("Bill #{} marked unpaid", id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_bill(id)?;
            println!("Removed bill #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let category: BillCategory = sub.get_one::<String>("category").unwrap().parse()?;
    let frequency: BillFrequency = sub.get_one::<String>("frequency").unwrap().parse()?;
    let bill = NewBill {
        name: sub.get_one::<String>("name").unwrap().to_string(),
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        due_day: *sub.get_one::<u32>("due-day").unwrap(),
        category,
        is_recurring: !sub.get_flag("once"),
        frequency,
        notes: sub.get_one::<String>("notes").cloned(),
    };
    let id = store.add_bill(&bill)?;
    println!(
        "Added bill #{} '{}' due on day {}",
        id,
        bill.name.trim(),
        bill.due_day
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BillRow {
    #[serde(flatten)]
    pub bill: Bill,
    pub state: BillState,
    pub days_until_due: i64,
}

pub fn bill_rows(store: &mut Store, today: NaiveDate) -> Result<Vec<BillRow>> {
    Ok(store
        .bills()?
        .into_iter()
        .map(|bill| BillRow {
            state: classify_bill(&bill, today),
            days_until_due: days_until_due(bill.due_day, today),
            bill,
        })
        .collect())
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let today = today(sub)?;
    let data = bill_rows(store, today)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.bill.id.to_string(),
                r.bill.name.clone(),
                r.bill.category.label().to_string(),
                fmt_money(&r.bill.amount, &ccy),
                r.bill.due_day.to_string(),
                if r.bill.is_recurring {
                    r.bill.frequency.label().to_string()
                } else {
                    "once".to_string()
                },
                r.state.label().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Bill", "Category", "Amount", "Due day", "Repeats", "Status"],
            rows
        )
    );
    let bills: Vec<Bill> = data.into_iter().map(|r| r.bill).collect();
    let s = bill_summary(&bills, today);
    println!(
        "Unpaid {} ({} overdue, {} due soon) | Paid {}",
        fmt_money(&s.total_unpaid, &ccy),
        s.overdue,
        s.due_soon,
        fmt_money(&s.total_paid, &ccy)
    );
    Ok(())
}
