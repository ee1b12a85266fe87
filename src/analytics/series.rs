// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::period::{Period, filter_period};
use super::totals::totals;
use crate::models::{Transaction, TxType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense for each of the seven days ending at `today`.
pub fn daily_series(records: &[Transaction], today: NaiveDate) -> Vec<DayPoint> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let day = filter_period(records, &Period::Days { end: date, days: 1 });
            let t = totals(&day);
            DayPoint {
                date,
                income: t.income,
                expense: t.expense,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub cumulative: Decimal,
}

/// Running expense total for every day of the month. Empty for an invalid
/// month.
pub fn cumulative_month_series(records: &[Transaction], year: i32, month: u32) -> Vec<CumulativePoint> {
    let Some((first, last)) = (Period::Month { year, month }).bounds() else {
        return Vec::new();
    };
    let mut running = Decimal::ZERO;
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            running += records
                .iter()
                .filter(|r| r.kind == TxType::Expense && r.date == date)
                .map(|r| r.amount)
                .sum::<Decimal>();
            CumulativePoint {
                date,
                cumulative: running,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPoint {
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

/// Twelve months of `year`, January first.
pub fn yearly_series(records: &[Transaction], year: i32) -> Vec<MonthPoint> {
    let in_year = filter_period(records, &Period::Year(year));
    (1..=12)
        .map(|month| {
            let rows: Vec<Transaction> = in_year
                .iter()
                .filter(|r| r.date.month() == month)
                .cloned()
                .collect();
            let t = totals(&rows);
            MonthPoint {
                month,
                income: t.income,
                expense: t.expense,
                net: t.balance,
            }
        })
        .collect()
}
