// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{HabitLog, Transaction};

/// Records that belong to a calendar date.
///
/// Dates are local calendar dates as stored; no timezone shifting happens
/// anywhere in the filter.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Transaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for HabitLog {
    fn date(&self) -> NaiveDate {
        self.log_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Period {
    /// `days` calendar days ending at `end`, inclusive.
    Days { end: NaiveDate, days: u32 },
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Period {
    pub fn month_of(date: NaiveDate) -> Self {
        Period::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn week_ending(end: NaiveDate) -> Self {
        Period::Days { end, days: 7 }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::Days { end, days } => {
                if days == 0 {
                    return false;
                }
                date >= window_start(end, days) && date <= end
            }
            Period::Month { year, month } => date.year() == year && date.month() == month,
            Period::Year(year) => date.year() == year,
        }
    }

    /// First and last day covered, if the period is well formed.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Period::Days { end, days } if days > 0 => {
                Some((window_start(end, days), end))
            }
            Period::Days { .. } => None,
            Period::Month { year, month } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                Some((first, last_day_of_month(first)))
            }
            Period::Year(year) => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
        }
    }
}

/// First day of a `days`-long window ending at `end`. Windows reaching past
/// the earliest representable date start there.
fn window_start(end: NaiveDate, days: u32) -> NaiveDate {
    end.checked_sub_signed(Duration::days(i64::from(days) - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Records whose date falls inside `period`, in input order.
pub fn filter_period<T: Dated + Clone>(records: &[T], period: &Period) -> Vec<T> {
    records
        .iter()
        .filter(|r| period.contains(r.date()))
        .cloned()
        .collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.and_then(|n| n.pred_opt()).unwrap_or(first)
}
