// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::period::first_of_month;
use crate::analytics::{
    BillSummary, BudgetOverview, Period, SavingsSummary, Totals, bill_summary, budget_overview,
    savings_summary, totals,
};
use crate::config::get_currency;
use crate::models::Transaction;
use crate::store::{Store, TxFilter};
use crate::utils::{fmt_money, fmt_percent, json_flags, maybe_print_json, month_label, today};

const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: String,
    pub month: String,
    pub totals: Totals,
    pub budget: BudgetOverview,
    pub savings: SavingsSummary,
    pub bills: BillSummary,
    pub active_notes: usize,
    pub habits: usize,
    pub habits_done_today: usize,
    pub recent: Vec<Transaction>,
}

pub fn dashboard(store: &mut Store, today: NaiveDate) -> Result<Dashboard> {
    let month = first_of_month(today);
    let period = Period::month_of(month);
    let txs = store.transactions(&TxFilter::period(period))?;
    let budgets = store.budgets(Some(month))?;
    let goals = store.goals()?;
    let bills = store.bills()?;
    let active_notes = store.notes()?.iter().filter(|n| !n.is_archived).count();
    let habits = store.habits()?;
    let mut habits_done_today = 0;
    for h in &habits {
        let logs = store.habit_logs(h.id, Some(today))?;
        if logs.iter().any(|l| l.log_date == today && l.completed) {
            habits_done_today += 1;
        }
    }
    Ok(Dashboard {
        user: store.session().user_name.clone(),
        month: month_label(month),
        totals: totals(&txs),
        budget: budget_overview(&budgets, &txs, period),
        savings: savings_summary(&goals),
        bills: bill_summary(&bills, today),
        active_notes,
        habits: habits.len(),
        habits_done_today,
        recent: txs.into_iter().take(RECENT_TRANSACTIONS).collect(),
    })
}

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(m);
    let d = dashboard(store, today(m)?)?;
    if maybe_print_json(json_flag, jsonl_flag, &d)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    println!("{} | {}", d.user, d.month);
    println!(
        "Income {}  Expense {}  Balance {}",
        fmt_money(&d.totals.income, &ccy),
        fmt_money(&d.totals.expense, &ccy),
        fmt_money(&d.totals.balance, &ccy)
    );
    println!(
        "Budget {} used of {} ({})",
        fmt_percent(d.budget.percent_used),
        fmt_money(&d.budget.total_budget, &ccy),
        d.budget.status.label()
    );
    println!(
        "Savings {} of {} ({}/{} goals completed)",
        fmt_money(&d.savings.total_saved, &ccy),
        fmt_money(&d.savings.total_target, &ccy),
        d.savings.completed,
        d.savings.goals
    );
    println!(
        "Bills unpaid {} ({} overdue, {} due soon)",
        fmt_money(&d.bills.total_unpaid, &ccy),
        d.bills.overdue,
        d.bills.due_soon
    );
    println!(
        "Habits done today {}/{} | Active notes {}",
        d.habits_done_today, d.habits, d.active_notes
    );
    for t in &d.recent {
        println!(
            "  {}  {:<8} {:<16} {}",
            t.date,
            t.kind.label(),
            t.category.label(),
            fmt_money(&t.amount, &ccy)
        );
    }
    Ok(())
}
