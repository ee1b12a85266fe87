// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::analytics::{
    BudgetStatus, Period, budget_overview, category_breakdown, cumulative_month_series,
    daily_series, evaluate_budget, filter_period, top_categories, totals, yearly_series,
};
use dompet::models::{Budget, Category, Transaction, TxType};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, date: &str, kind: TxType, amount: &str, category: Category) -> Transaction {
    Transaction {
        id,
        date: d(date),
        kind,
        amount: dec(amount),
        category,
        note: None,
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx(1, "2025-03-02", TxType::Expense, "50000", Category::Food),
        tx(2, "2025-03-01", TxType::Income, "200000", Category::Salary),
    ]
}

#[test]
fn month_totals_and_food_budget() {
    let records = sample();
    let t = totals(&records);
    assert_eq!(t.income, dec("200000"));
    assert_eq!(t.expense, dec("50000"));
    assert_eq!(t.balance, dec("150000"));

    let budget = Budget {
        id: 1,
        category: Category::Food,
        amount: dec("100000"),
        month: d("2025-03-01"),
    };
    let e = evaluate_budget(&budget, &records);
    assert_eq!(e.spent, dec("50000"));
    assert_eq!(e.remaining, dec("50000"));
    assert_eq!(e.percent_used, Some(dec("50")));
    assert_eq!(e.status, BudgetStatus::Normal);
}

#[test]
fn balance_is_income_minus_expense() {
    let records = vec![
        tx(1, "2025-01-05", TxType::Income, "10.10", Category::Bonus),
        tx(2, "2025-01-06", TxType::Expense, "3.05", Category::Transport),
        tx(3, "2025-01-07", TxType::Expense, "20", Category::Other),
    ];
    let t = totals(&records);
    assert_eq!(t.balance, t.income - t.expense);
    assert_eq!(t.balance, dec("-12.95"));
    assert_eq!(totals(&[]), Default::default());
}

#[test]
fn budget_status_thresholds() {
    let budget = |amount: &str| Budget {
        id: 1,
        category: Category::Shopping,
        amount: dec(amount),
        month: d("2025-04-01"),
    };
    let spend = vec![tx(1, "2025-04-10", TxType::Expense, "90", Category::Shopping)];
    assert_eq!(evaluate_budget(&budget("100"), &spend).status, BudgetStatus::NearLimit);
    assert_eq!(evaluate_budget(&budget("90"), &spend).status, BudgetStatus::OverBudget);
    assert_eq!(evaluate_budget(&budget("1000"), &spend).status, BudgetStatus::Normal);
}

#[test]
fn zero_budget_has_no_percentage() {
    let budget = Budget {
        id: 1,
        category: Category::Health,
        amount: Decimal::ZERO,
        month: d("2025-04-01"),
    };
    let none = evaluate_budget(&budget, &[]);
    assert_eq!(none.percent_used, None);
    assert_eq!(none.status, BudgetStatus::Normal);

    let spent = vec![tx(1, "2025-04-03", TxType::Expense, "1", Category::Health)];
    let some = evaluate_budget(&budget, &spent);
    assert_eq!(some.percent_used, None);
    assert_eq!(some.status, BudgetStatus::OverBudget);
}

#[test]
fn budget_ignores_other_months_and_income() {
    let budget = Budget {
        id: 1,
        category: Category::Other,
        amount: dec("100"),
        month: d("2025-05-01"),
    };
    let records = vec![
        tx(1, "2025-04-30", TxType::Expense, "70", Category::Other),
        tx(2, "2025-05-31", TxType::Expense, "10", Category::Other),
        tx(3, "2025-05-15", TxType::Income, "500", Category::Other),
    ];
    assert_eq!(evaluate_budget(&budget, &records).spent, dec("10"));
}

#[test]
fn overview_counts_unbudgeted_expense() {
    let budgets = vec![Budget {
        id: 1,
        category: Category::Food,
        amount: dec("100"),
        month: d("2025-06-01"),
    }];
    let records = vec![
        tx(1, "2025-06-02", TxType::Expense, "40", Category::Food),
        tx(2, "2025-06-03", TxType::Expense, "55", Category::Education),
    ];
    let o = budget_overview(&budgets, &records, Period::month_of(d("2025-06-01")));
    assert_eq!(o.total_expense, dec("95"));
    assert_eq!(o.percent_used, Some(dec("95")));
    assert_eq!(o.status, BudgetStatus::NearLimit);
}

#[test]
fn breakdown_sums_to_expense_and_is_sorted() {
    let records = vec![
        tx(1, "2025-02-01", TxType::Expense, "10", Category::Food),
        tx(2, "2025-02-02", TxType::Expense, "30", Category::Transport),
        tx(3, "2025-02-03", TxType::Expense, "25", Category::Food),
        tx(4, "2025-02-04", TxType::Income, "999", Category::Salary),
        tx(5, "2025-02-05", TxType::Expense, "5", Category::Shopping),
    ];
    let b = category_breakdown(&records);
    let sum: Decimal = b.iter().map(|c| c.total).sum();
    assert_eq!(sum, totals(&records).expense);
    assert!(b.windows(2).all(|w| w[0].total >= w[1].total));
    assert_eq!(b[0].category, Category::Food);
    assert_eq!(b[0].total, dec("35"));
    assert_eq!(b[0].share, Some(dec("50")));
    assert!(b.iter().all(|c| c.category != Category::Salary));
}

#[test]
fn equal_totals_keep_first_seen_order() {
    let records = vec![
        tx(1, "2025-02-01", TxType::Expense, "10", Category::Health),
        tx(2, "2025-02-02", TxType::Expense, "10", Category::Bills),
    ];
    let b = category_breakdown(&records);
    assert_eq!(b[0].category, Category::Health);
    assert_eq!(b[1].category, Category::Bills);
}

#[test]
fn top_n_is_prefix_of_breakdown() {
    let records = vec![
        tx(1, "2025-02-01", TxType::Expense, "1", Category::Food),
        tx(2, "2025-02-02", TxType::Expense, "2", Category::Transport),
        tx(3, "2025-02-03", TxType::Expense, "3", Category::Shopping),
        tx(4, "2025-02-04", TxType::Expense, "4", Category::Bills),
    ];
    let all = category_breakdown(&records);
    for n in 0..6 {
        let top = top_categories(&records, n);
        assert_eq!(top.len(), n.min(all.len()));
        assert_eq!(top[..], all[..top.len()]);
    }
}

#[test]
fn period_filter_is_inclusive() {
    let records = vec![
        tx(1, "2025-01-31", TxType::Expense, "1", Category::Food),
        tx(2, "2025-02-01", TxType::Expense, "1", Category::Food),
        tx(3, "2025-02-28", TxType::Expense, "1", Category::Food),
        tx(4, "2025-03-01", TxType::Expense, "1", Category::Food),
    ];
    let feb = filter_period(&records, &Period::Month { year: 2025, month: 2 });
    assert_eq!(feb.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);

    let week = filter_period(&records, &Period::week_ending(d("2025-03-01")));
    assert_eq!(week.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 4]);

    // Feb 1 is the first day of the week ending Feb 7.
    let first_week = filter_period(&records, &Period::week_ending(d("2025-02-07")));
    assert_eq!(first_week.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    let later = filter_period(&records, &Period::week_ending(d("2025-02-08")));
    assert!(later.is_empty());

    assert!(filter_period(&records, &Period::Month { year: 2025, month: 13 }).is_empty());
}

#[test]
fn huge_day_window_reaches_back_to_earliest_date() {
    let end = d("2025-03-01");
    let period = Period::Days { end, days: u32::MAX };
    assert!(period.contains(d("0001-01-01")));
    assert!(period.contains(end));
    assert!(!period.contains(d("2025-03-02")));
    assert_eq!(period.bounds(), Some((NaiveDate::MIN, end)));
}

#[test]
fn tiny_ceiling_does_not_overflow_percent() {
    let budget = Budget {
        id: 1,
        category: Category::Food,
        amount: dec("0.0000000000000000000001"),
        month: d("2025-04-01"),
    };
    let spent = vec![tx(1, "2025-04-03", TxType::Expense, "1000000", Category::Food)];
    let e = evaluate_budget(&budget, &spent);
    assert_eq!(e.percent_used, None);
    assert_eq!(e.status, BudgetStatus::OverBudget);
}

#[test]
fn daily_series_covers_seven_days() {
    let records = vec![
        tx(1, "2025-03-10", TxType::Expense, "5", Category::Food),
        tx(2, "2025-03-04", TxType::Income, "7", Category::Bonus),
        tx(3, "2025-03-03", TxType::Expense, "100", Category::Food),
    ];
    let s = daily_series(&records, d("2025-03-10"));
    assert_eq!(s.len(), 7);
    assert_eq!(s[0].date, d("2025-03-04"));
    assert_eq!(s[0].income, dec("7"));
    assert_eq!(s[6].expense, dec("5"));
    let expense: Decimal = s.iter().map(|p| p.expense).sum();
    assert_eq!(expense, dec("5"));
}

#[test]
fn cumulative_series_runs_through_month() {
    let records = vec![
        tx(1, "2024-02-03", TxType::Expense, "10", Category::Food),
        tx(2, "2024-02-20", TxType::Expense, "15", Category::Food),
        tx(3, "2024-02-21", TxType::Income, "99", Category::Salary),
    ];
    let s = cumulative_month_series(&records, 2024, 2);
    assert_eq!(s.len(), 29);
    assert_eq!(s[1].cumulative, Decimal::ZERO);
    assert_eq!(s[2].cumulative, dec("10"));
    assert_eq!(s[28].cumulative, dec("25"));
    assert!(cumulative_month_series(&records, 2024, 0).is_empty());
}

#[test]
fn yearly_series_has_twelve_months() {
    let records = vec![
        tx(1, "2025-01-15", TxType::Income, "100", Category::Salary),
        tx(2, "2025-12-01", TxType::Expense, "40", Category::Food),
        tx(3, "2024-12-01", TxType::Expense, "999", Category::Food),
    ];
    let s = yearly_series(&records, 2025);
    assert_eq!(s.len(), 12);
    assert_eq!(s[0].net, dec("100"));
    assert_eq!(s[11].expense, dec("40"));
    assert_eq!(s[11].net, dec("-40"));
}
