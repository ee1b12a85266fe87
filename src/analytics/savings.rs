// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::SavingsGoal;
use crate::utils::require_money_scale;

/// Days per month in the contribution estimate. An approximation, not
/// calendar arithmetic.
pub const DAYS_PER_MONTH: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    /// Unclamped; above 100 when over-funded.
    pub percent: Decimal,
    /// `percent` clamped to 0..=100.
    pub display_percent: Decimal,
    pub remaining: Decimal,
    /// Needed per month to reach the target by the deadline.
    pub monthly_contribution: Option<Decimal>,
    pub months_left: Option<i64>,
}

pub fn goal_progress(goal: &SavingsGoal, today: NaiveDate) -> GoalProgress {
    let percent = if goal.target_amount > Decimal::ZERO {
        super::percent_of(goal.current_amount, goal.target_amount)
            .unwrap_or(Decimal::ONE_HUNDRED)
    } else {
        Decimal::ONE_HUNDRED
    };
    let display_percent = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let remaining = (goal.target_amount - goal.current_amount).max(Decimal::ZERO);

    let months_left = goal.deadline.map(|d| months_until(today, d));
    let monthly_contribution = months_left.map(|m| remaining / Decimal::from(m));

    GoalProgress {
        percent,
        display_percent,
        remaining,
        monthly_contribution,
        months_left,
    }
}

/// `ceil(days / 30)`, never less than one.
fn months_until(today: NaiveDate, deadline: NaiveDate) -> i64 {
    let days = (deadline - today).num_days();
    let months = if days <= 0 {
        0
    } else {
        (days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH
    };
    months.max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingChange {
    Deposit(Decimal),
    Withdraw(Decimal),
}

/// New `(current_amount, is_completed)` after a funding change.
///
/// Withdrawals stop at zero. Completion is recomputed every time rather
/// than kept sticky.
pub fn apply_funding(goal: &SavingsGoal, change: FundingChange) -> Result<(Decimal, bool)> {
    let current = match change {
        FundingChange::Deposit(amount) => {
            require_positive(amount)?;
            goal.current_amount
                .checked_add(amount)
                .ok_or_else(|| Error::validation("goal balance would overflow"))?
        }
        FundingChange::Withdraw(amount) => {
            require_positive(amount)?;
            (goal.current_amount - amount).max(Decimal::ZERO)
        }
    };
    Ok((current, current >= goal.target_amount))
}

fn require_positive(amount: Decimal) -> Result<()> {
    require_money_scale(amount)?;
    if amount <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "funding amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SavingsSummary {
    pub total_target: Decimal,
    pub total_saved: Decimal,
    pub completed: usize,
    pub goals: usize,
}

pub fn savings_summary(goals: &[SavingsGoal]) -> SavingsSummary {
    SavingsSummary {
        total_target: goals.iter().map(|g| g.target_amount).sum(),
        total_saved: goals.iter().map(|g| g.current_amount).sum(),
        completed: goals.iter().filter(|g| g.is_completed).count(),
        goals: goals.len(),
    }
}
