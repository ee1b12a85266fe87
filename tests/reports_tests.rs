// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::analytics::{BillState, BudgetStatus, FundingChange};
use dompet::commands::bills::bill_rows;
use dompet::commands::dashboard::dashboard;
use dompet::commands::reports::{month_summary, monthly_points, yearly_points};
use dompet::commands::savings::goal_rows;
use dompet::models::{BillCategory, BillFrequency, Category, TxType};
use dompet::store::{NewBill, NewBudget, NewGoal, NewHabit, NewNote, NewTransaction, Store};
use dompet::{config, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    config::login(&conn, "putri").unwrap();
    conn
}

fn add(store: &mut Store, date: &str, kind: TxType, amount: i64, category: Category) {
    store
        .add_transaction(&NewTransaction {
            date: d(date),
            kind,
            amount: Decimal::from(amount),
            category,
            note: None,
        })
        .unwrap();
}

fn seed(store: &mut Store) {
    add(store, "2025-03-01", TxType::Income, 200_000, Category::Salary);
    add(store, "2025-03-02", TxType::Expense, 50_000, Category::Food);
    add(store, "2025-03-05", TxType::Expense, 20_000, Category::Transport);
    add(store, "2025-03-06", TxType::Expense, 5_000, Category::Shopping);
    add(store, "2025-04-01", TxType::Expense, 1_000, Category::Food);
    store
        .set_budget(&NewBudget {
            category: Category::Food,
            amount: Decimal::from(100_000),
            month: d("2025-03-01"),
        })
        .unwrap();
}

#[test]
fn month_summary_matches_analytics() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    seed(&mut store);

    let s = month_summary(&mut store, d("2025-03-01"), 2).unwrap();
    assert_eq!(s.month, "2025-03");
    assert_eq!(s.transactions, 4);
    assert_eq!(s.totals.income, Decimal::from(200_000));
    assert_eq!(s.totals.expense, Decimal::from(75_000));
    assert_eq!(s.totals.balance, Decimal::from(125_000));
    assert_eq!(s.top.len(), 2);
    assert_eq!(s.top[0].category, Category::Food);
    assert_eq!(s.top[1].category, Category::Transport);
    assert_eq!(s.categories.len(), 3);
    assert_eq!(s.budget.total_budget, Decimal::from(100_000));
    assert_eq!(s.budget.status, BudgetStatus::Normal);
}

#[test]
fn chart_series_shapes() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    seed(&mut store);

    let cumulative = monthly_points(&mut store, d("2025-03-01")).unwrap();
    assert_eq!(cumulative.len(), 31);
    assert_eq!(cumulative[30].cumulative, Decimal::from(75_000));

    let year = yearly_points(&mut store, 2025).unwrap();
    assert_eq!(year.len(), 12);
    assert_eq!(year[2].net, Decimal::from(125_000));
    assert_eq!(year[3].expense, Decimal::from(1_000));
}

#[test]
fn dashboard_collects_every_area() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    seed(&mut store);
    let today = d("2025-03-20");

    let goal = store
        .add_goal(&NewGoal {
            name: "Bike".into(),
            target_amount: Decimal::from(1_000),
            deadline: None,
            icon: None,
            color: None,
        })
        .unwrap();
    store
        .fund_goal(goal, FundingChange::Deposit(Decimal::from(400)))
        .unwrap();
    store
        .add_bill(&NewBill {
            name: "Water".into(),
            amount: Decimal::from(80),
            due_day: 10,
            category: BillCategory::Water,
            is_recurring: true,
            frequency: BillFrequency::Monthly,
            notes: None,
        })
        .unwrap();
    store
        .add_note(&NewNote {
            title: "keep".into(),
            ..NewNote::default()
        })
        .unwrap();
    let archived = store
        .add_note(&NewNote {
            title: "old".into(),
            ..NewNote::default()
        })
        .unwrap();
    store.toggle_archive(archived).unwrap();
    let habit = store
        .add_habit(&NewHabit {
            name: "Run".into(),
            ..NewHabit::default()
        })
        .unwrap();
    store
        .add_habit(&NewHabit {
            name: "Read".into(),
            ..NewHabit::default()
        })
        .unwrap();
    store.toggle_habit_log(habit, today).unwrap();

    let dash = dashboard(&mut store, today).unwrap();
    assert_eq!(dash.user, "putri");
    assert_eq!(dash.month, "2025-03");
    assert_eq!(dash.totals.balance, Decimal::from(125_000));
    assert_eq!(dash.savings.total_saved, Decimal::from(400));
    assert_eq!(dash.bills.overdue, 1);
    assert_eq!(dash.bills.total_unpaid, Decimal::from(80));
    assert_eq!(dash.active_notes, 1);
    assert_eq!((dash.habits_done_today, dash.habits), (1, 2));
    assert_eq!(dash.recent.len(), 4);
    assert_eq!(dash.recent[0].date, d("2025-03-06"));

    let bills = bill_rows(&mut store, today).unwrap();
    assert_eq!(bills[0].state, BillState::Overdue);
    assert_eq!(bills[0].days_until_due, -10);

    let goals = goal_rows(&mut store, today).unwrap();
    assert_eq!(goals[0].progress.display_percent, Decimal::from(40));
}
