// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure reductions over record lists.
//!
//! Every function here takes the rows a command already fetched and
//! returns plain values. Nothing touches the store, the clock or the cache:
//! "today" is always an argument.

pub mod bills;
pub mod budget;
pub mod habits;
pub mod period;
pub mod savings;
pub mod series;
pub mod totals;

pub use bills::{BillState, BillSummary, bill_summary, classify, classify_bill};
pub use budget::{BudgetEvaluation, BudgetOverview, BudgetStatus, budget_overview, evaluate_budget};
pub use habits::{HabitDay, completed_in_window, current_streak, weekly_grid};
pub use period::{Dated, Period, filter_period};
pub use savings::{
    FundingChange, GoalProgress, SavingsSummary, apply_funding, goal_progress, savings_summary,
};
pub use series::{cumulative_month_series, daily_series, yearly_series};
pub use totals::{CategoryTotal, Totals, category_breakdown, top_categories, totals};

use rust_decimal::Decimal;

/// `part / whole * 100`, or `None` when `whole` is zero or the ratio does
/// not fit in a `Decimal`.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}
