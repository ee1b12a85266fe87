// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::series::{CumulativePoint, DayPoint, MonthPoint};
use crate::analytics::{
    BudgetOverview, CategoryTotal, Period, Totals, budget_overview, category_breakdown,
    cumulative_month_series, daily_series, top_categories, totals, yearly_series,
};
use crate::commands::budgets::selected_month;
use crate::config::get_currency;
use crate::store::{Store, TxFilter};
use crate::utils::{
    fmt_money, fmt_percent, json_flags, maybe_print_json, month_label, pretty_table, today,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("daily", sub)) => daily(store, sub)?,
        Some(("monthly", sub)) => monthly(store, sub)?,
        Some(("yearly", sub)) => yearly(store, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub month: String,
    pub totals: Totals,
    pub budget: BudgetOverview,
    pub top: Vec<CategoryTotal>,
    pub categories: Vec<CategoryTotal>,
    pub transactions: usize,
}

pub fn month_summary(store: &mut Store, month: NaiveDate, top: usize) -> Result<MonthSummary> {
    let period = Period::month_of(month);
    let txs = store.transactions(&TxFilter::period(period))?;
    let budgets = store.budgets(Some(month))?;
    let categories = category_breakdown(&txs);
    Ok(MonthSummary {
        month: month_label(month),
        totals: totals(&txs),
        budget: budget_overview(&budgets, &txs, period),
        top: top_categories(&txs, top),
        categories,
        transactions: txs.len(),
    })
}

fn summary(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let month = selected_month(sub)?;
    let top = *sub.get_one::<usize>("top").unwrap_or(&3);
    let s = month_summary(store, month, top)?;
    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    println!(
        "{}",
        pretty_table(
            &["Month", "Income", "Expense", "Balance", "Budget", "Budget used"],
            vec![vec![
                s.month.clone(),
                fmt_money(&s.totals.income, &ccy),
                fmt_money(&s.totals.expense, &ccy),
                fmt_money(&s.totals.balance, &ccy),
                fmt_money(&s.budget.total_budget, &ccy),
                fmt_percent(s.budget.percent_used),
            ]],
        )
    );
    let rows = s
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                (i + 1).to_string(),
                c.category.label().to_string(),
                fmt_money(&c.total, &ccy),
                fmt_percent(c.share),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["#", "Category", "Spent", "Share"], rows));
    Ok(())
}

pub fn daily_points(store: &mut Store, today: NaiveDate) -> Result<Vec<DayPoint>> {
    let txs = store.transactions(&TxFilter::period(Period::week_ending(today)))?;
    Ok(daily_series(&txs, today))
}

fn daily(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let points = daily_points(store, today(sub)?)?;
    if maybe_print_json(json_flag, jsonl_flag, &points)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows = points
        .iter()
        .map(|p| {
            vec![
                p.date.format("%a %d %b").to_string(),
                fmt_money(&p.income, &ccy),
                fmt_money(&p.expense, &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Income", "Expense"], rows));
    Ok(())
}

pub fn monthly_points(store: &mut Store, month: NaiveDate) -> Result<Vec<CumulativePoint>> {
    let txs = store.transactions(&TxFilter::period(Period::month_of(month)))?;
    Ok(cumulative_month_series(&txs, month.year(), month.month()))
}

fn monthly(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let points = monthly_points(store, selected_month(sub)?)?;
    if maybe_print_json(json_flag, jsonl_flag, &points)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let rows = points
        .iter()
        .map(|p| vec![p.date.to_string(), fmt_money(&p.cumulative, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Date", "Cumulative expense"], rows));
    Ok(())
}

pub fn yearly_points(store: &mut Store, year: i32) -> Result<Vec<MonthPoint>> {
    let txs = store.transactions(&TxFilter::period(Period::Year(year)))?;
    Ok(yearly_series(&txs, year))
}

fn yearly(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let year = match sub.get_one::<i32>("year") {
        Some(y) => *y,
        None => today(sub)?.year(),
    };
    let points = yearly_points(store, year)?;
    if maybe_print_json(json_flag, jsonl_flag, &points)? {
        return Ok(());
    }
    let ccy = get_currency(store.conn())?;
    let mut rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                format!("{}-{:02}", year, p.month),
                fmt_money(&p.income, &ccy),
                fmt_money(&p.expense, &ccy),
                fmt_money(&p.net, &ccy),
            ]
        })
        .collect();
    let income: Decimal = points.iter().map(|p| p.income).sum();
    let expense: Decimal = points.iter().map(|p| p.expense).sum();
    let net: Decimal = points.iter().map(|p| p.net).sum();
    rows.push(vec![
        "Total".to_string(),
        fmt_money(&income, &ccy),
        fmt_money(&expense, &ccy),
        fmt_money(&net, &ccy),
    ]);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Net"], rows)
    );
    Ok(())
}
