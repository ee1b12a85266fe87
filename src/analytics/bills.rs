// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::period::last_day_of_month;
use crate::models::Bill;

/// Days ahead of the due date at which an unpaid bill is flagged.
pub const DUE_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillState {
    Paid,
    Overdue,
    DueSoon,
    Upcoming,
}

impl BillState {
    pub fn label(&self) -> &'static str {
        match self {
            BillState::Paid => "paid",
            BillState::Overdue => "overdue",
            BillState::DueSoon => "due soon",
            BillState::Upcoming => "upcoming",
        }
    }
}

/// Due date of the cycle that `today` falls in.
///
/// The paid flag tracks the current calendar month, so the due day is
/// placed in today's month, clamped to the month's last day.
pub fn due_date_in_cycle(due_day: u32, today: NaiveDate) -> NaiveDate {
    let last = last_day_of_month(today);
    let day = due_day.clamp(1, last.day());
    today.with_day(day).unwrap_or(last)
}

/// Calendar days from `today` to this cycle's due date; negative once it
/// has passed.
pub fn days_until_due(due_day: u32, today: NaiveDate) -> i64 {
    (due_date_in_cycle(due_day, today) - today).num_days()
}

pub fn classify(due_day: u32, is_paid: bool, today: NaiveDate) -> BillState {
    if is_paid {
        return BillState::Paid;
    }
    match days_until_due(due_day, today) {
        d if d < 0 => BillState::Overdue,
        d if d <= DUE_SOON_DAYS => BillState::DueSoon,
        _ => BillState::Upcoming,
    }
}

pub fn classify_bill(bill: &Bill, today: NaiveDate) -> BillState {
    classify(bill.due_day, bill.is_paid, today)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BillSummary {
    pub total_unpaid: Decimal,
    pub total_paid: Decimal,
    pub overdue: usize,
    pub due_soon: usize,
    pub upcoming: usize,
    pub paid: usize,
}

pub fn bill_summary(bills: &[Bill], today: NaiveDate) -> BillSummary {
    let mut summary = BillSummary::default();
    for bill in bills {
        let state = classify_bill(bill, today);
        if state == BillState::Paid {
            summary.total_paid += bill.amount;
        } else {
            summary.total_unpaid += bill.amount;
        }
        match state {
            BillState::Paid => summary.paid += 1,
            BillState::Overdue => summary.overdue += 1,
            BillState::DueSoon => summary.due_soon += 1,
            BillState::Upcoming => summary.upcoming += 1,
        }
    }
    summary
}
