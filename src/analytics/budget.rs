// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::percent_of;
use super::period::Period;
use crate::models::{Budget, Category, Transaction, TxType};

/// Percent used at which a budget counts as exhausted.
pub const OVER_BUDGET_PERCENT: Decimal = Decimal::ONE_HUNDRED;
/// Percent used at which a budget starts warning.
pub const NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Normal,
    NearLimit,
    OverBudget,
}

impl BudgetStatus {
    /// Status for `spent` against `ceiling`.
    ///
    /// A zero ceiling has no percentage; it is over budget as soon as
    /// anything is spent.
    pub fn from_spend(spent: Decimal, ceiling: Decimal) -> Self {
        match percent_of(spent, ceiling) {
            Some(p) if p >= OVER_BUDGET_PERCENT => BudgetStatus::OverBudget,
            Some(p) if p >= NEAR_LIMIT_PERCENT => BudgetStatus::NearLimit,
            Some(_) => BudgetStatus::Normal,
            None if spent > Decimal::ZERO => BudgetStatus::OverBudget,
            None => BudgetStatus::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Normal => "ok",
            BudgetStatus::NearLimit => "near limit",
            BudgetStatus::OverBudget => "over budget",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetEvaluation {
    pub category: Category,
    pub amount: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: Option<Decimal>,
    pub status: BudgetStatus,
}

/// Spend of the budget's category within the budget's month.
pub fn evaluate_budget(budget: &Budget, records: &[Transaction]) -> BudgetEvaluation {
    let month = Period::month_of(budget.month);
    let spent: Decimal = records
        .iter()
        .filter(|r| {
            r.kind == TxType::Expense && r.category == budget.category && month.contains(r.date)
        })
        .map(|r| r.amount)
        .sum();
    BudgetEvaluation {
        category: budget.category,
        amount: budget.amount,
        spent,
        remaining: budget.amount - spent,
        percent_used: percent_of(spent, budget.amount),
        status: BudgetStatus::from_spend(spent, budget.amount),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetOverview {
    pub total_budget: Decimal,
    pub total_expense: Decimal,
    pub remaining: Decimal,
    pub percent_used: Option<Decimal>,
    pub status: BudgetStatus,
}

/// All budgets of `month` against all expense of that month, budgeted
/// category or not.
pub fn budget_overview(budgets: &[Budget], records: &[Transaction], month: Period) -> BudgetOverview {
    let total_budget: Decimal = budgets
        .iter()
        .filter(|b| month.contains(b.month))
        .map(|b| b.amount)
        .sum();
    let total_expense: Decimal = records
        .iter()
        .filter(|r| r.kind == TxType::Expense && month.contains(r.date))
        .map(|r| r.amount)
        .sum();
    BudgetOverview {
        total_budget,
        total_expense,
        remaining: total_budget - total_expense,
        percent_used: percent_of(total_expense, total_budget),
        status: BudgetStatus::from_spend(total_expense, total_budget),
    }
}
