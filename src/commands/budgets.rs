// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{BudgetEvaluation, BudgetStatus, Period, evaluate_budget};
use crate::config::get_currency;
use crate::models::Category;
use crate::store::{NewBudget, Store, TxFilter};
use crate::utils::{
    fmt_money, fmt_percent, json_flags, maybe_print_json, month_label, parse_decimal, parse_month,
    pretty_table, today,
};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_budget(id)?;
            println!("Removed budget #{}", id);
        }
        _ => {}
    }
    Ok(())
}

/// `--month` as the first of that month, or the current month.
pub fn selected_month(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("month") {
        Some(m) => Ok(parse_month(m)?),
        None => Ok(crate::analytics::period::first_of_month(today(sub)?)),
    }
}

fn new_budget(sub: &clap::ArgMatches) -> Result<NewBudget> {
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    Ok(NewBudget {
        category,
        amount,
        month: selected_month(sub)?,
    })
}

fn set(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let budget = new_budget(sub)?;
    let id = store.set_budget(&budget)?;
    let ccy = get_currency(store.conn())?;
    println!(
        "Budget #{} set for {} / {} = {}",
        id,
        month_label(budget.month),
        budget.category,
        fmt_money(&budget.amount, &ccy)
    );
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let budget = new_budget(sub)?;
    store.update_budget(id, &budget)?;
    println!("Updated budget #{}", id);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetRow {
    pub id: i64,
    pub month: String,
    #[serde(flatten)]
    pub evaluation: BudgetEvaluation,
}

/// Each budget of `month` evaluated against that month's transactions.
pub fn budget_rows(store: &mut Store, month: NaiveDate) -> Result<Vec<BudgetRow>> {
    let budgets = store.budgets(Some(month))?;
    let txs = store.transactions(&TxFilter::period(Period::month_of(month)))?;
    Ok(budgets
        .iter()
        .map(|b| BudgetRow {
            id: b.id,
            month: month_label(b.month),
            evaluation: evaluate_budget(b, &txs),
        })
        .collect())
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let month = selected_month(sub)?;
    let data = budget_rows(store, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows = data
        .iter()
        .map(|r| {
            let e = &r.evaluation;
            vec![
                r.id.to_string(),
                e.category.label().to_string(),
                fmt_money(&e.amount, &ccy),
                fmt_money(&e.spent, &ccy),
                fmt_money(&e.remaining, &ccy),
                fmt_percent(e.percent_used),
                e.status.label().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Category", "Budget", "Spent", "Remaining", "Used", "Status"],
            rows
        )
    );
    for r in &data {
        match r.evaluation.status {
            BudgetStatus::OverBudget => {
                println!("! {} budget exceeded", r.evaluation.category)
            }
            BudgetStatus::NearLimit => {
                println!("! {} budget almost used up", r.evaluation.category)
            }
            BudgetStatus::Normal => {}
        }
    }
    Ok(())
}
