// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{FundingChange, GoalProgress, goal_progress, savings_summary};
use crate::config::get_currency;
use crate::models::SavingsGoal;
use crate::store::{NewGoal, Store};
use crate::utils::{
    fmt_money, fmt_percent, json_flags, maybe_print_json, parse_amount, parse_date, pretty_table,
    today,
};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("deposit", sub)) => fund(store, sub, true)?,
        Some(("withdraw", sub)) => fund(store, sub, false)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_goal(id)?;
            println!("Removed savings goal #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let deadline = match sub.get_one::<String>("deadline") {
        Some(d) => Some(parse_date(d)?),
        None => None,
    };
    let goal = NewGoal {
        name: sub.get_one::<String>("name").unwrap().to_string(),
        target_amount: parse_amount(sub.get_one::<String>("target").unwrap())?,
        deadline,
        icon: sub.get_one::<String>("icon").cloned(),
        color: sub.get_one::<String>("color").cloned(),
    };
    let id = store.add_goal(&goal)?;
    println!("Added savings goal #{} '{}'", id, goal.name.trim());
    Ok(())
}

fn fund(store: &mut Store, sub: &clap::ArgMatches, deposit: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let change = if deposit {
        FundingChange::Deposit(amount)
    } else {
        FundingChange::Withdraw(amount)
    };
    let goal = store.fund_goal(id, change)?;
    let ccy = get_currency(store.conn())?;
    println!(
        "{} now at {} of {}{}",
        goal.name,
        fmt_money(&goal.current_amount, &ccy),
        fmt_money(&goal.target_amount, &ccy),
        if goal.is_completed { " (completed)" } else { "" }
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalRow {
    #[serde(flatten)]
    pub goal: SavingsGoal,
    pub progress: GoalProgress,
}

pub fn goal_rows(store: &mut Store, today: NaiveDate) -> Result<Vec<GoalRow>> {
    Ok(store
        .goals()?
        .into_iter()
        .map(|goal| {
            let progress = goal_progress(&goal, today);
            GoalRow { goal, progress }
        })
        .collect())
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = goal_rows(store, today(sub)?)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.goal.id.to_string(),
                format!("{} {}", r.goal.icon, r.goal.name),
                fmt_money(&r.goal.current_amount, &ccy),
                fmt_money(&r.goal.target_amount, &ccy),
                fmt_percent(Some(r.progress.display_percent)),
                r.goal.deadline.map(|d| d.to_string()).unwrap_or_default(),
                r.progress
                    .monthly_contribution
                    .map(|m| fmt_money(&m, &ccy))
                    .unwrap_or_default(),
                if r.goal.is_completed { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Saved", "Target", "Progress", "Deadline", "Per month", "Done"],
            rows
        )
    );
    let goals: Vec<SavingsGoal> = data.into_iter().map(|r| r.goal).collect();
    let s = savings_summary(&goals);
    println!(
        "Saved {} of {} across {} goals ({} completed)",
        fmt_money(&s.total_saved, &ccy),
        fmt_money(&s.total_target, &ccy),
        s.goals,
        s.completed
    );
    Ok(())
}
