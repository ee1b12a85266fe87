// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::analytics::bills::{days_until_due, due_date_in_cycle};
use dompet::analytics::{BillState, bill_summary, classify};
use dompet::config;
use dompet::db::init_schema;
use dompet::error::Error;
use dompet::models::{Bill, BillCategory, BillFrequency};
use dompet::store::{NewBill, Store};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn bill(id: i64, amount: i64, due_day: u32, is_paid: bool) -> Bill {
    Bill {
        id,
        name: format!("bill {}", id),
        amount: Decimal::from(amount),
        due_day,
        category: BillCategory::Other,
        is_recurring: true,
        frequency: BillFrequency::Monthly,
        is_paid,
        last_paid_date: None,
        notes: None,
    }
}

#[test]
fn due_day_already_passed_is_overdue() {
    assert_eq!(classify(5, false, d("2025-06-28")), BillState::Overdue);
}

#[test]
fn classification_windows() {
    let today = d("2025-06-10");
    assert_eq!(classify(9, false, today), BillState::Overdue);
    assert_eq!(classify(10, false, today), BillState::DueSoon);
    assert_eq!(classify(13, false, today), BillState::DueSoon);
    assert_eq!(classify(14, false, today), BillState::Upcoming);
    for day in 1..=31 {
        assert_eq!(classify(day, true, today), BillState::Paid);
    }
}

#[test]
fn every_unpaid_bill_gets_exactly_one_state() {
    let today = d("2025-02-14");
    for day in 1..=31 {
        let state = classify(day, false, today);
        let days = days_until_due(day, today);
        let expected = if days < 0 {
            BillState::Overdue
        } else if days <= 3 {
            BillState::DueSoon
        } else {
            BillState::Upcoming
        };
        assert_eq!(state, expected, "due day {}", day);
    }
}

#[test]
fn due_day_clamps_to_short_months() {
    assert_eq!(due_date_in_cycle(31, d("2025-02-10")), d("2025-02-28"));
    assert_eq!(due_date_in_cycle(30, d("2024-02-01")), d("2024-02-29"));
    assert_eq!(due_date_in_cycle(15, d("2025-04-30")), d("2025-04-15"));
    // 31st in a 30-day month lands on the 30th, so it is due today.
    assert_eq!(classify(31, false, d("2025-04-30")), BillState::DueSoon);
}

#[test]
fn summary_splits_paid_and_unpaid() {
    let today = d("2025-06-10");
    let bills = vec![
        bill(1, 100, 1, false),
        bill(2, 50, 11, false),
        bill(3, 25, 25, false),
        bill(4, 10, 5, true),
    ];
    let s = bill_summary(&bills, today);
    assert_eq!(s.total_unpaid, Decimal::from(175));
    assert_eq!(s.total_paid, Decimal::from(10));
    assert_eq!((s.overdue, s.due_soon, s.upcoming, s.paid), (1, 1, 1, 1));
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    config::login(&conn, "ana").unwrap();
    conn
}

fn new_bill(name: &str, due_day: u32) -> NewBill {
    NewBill {
        name: name.to_string(),
        amount: Decimal::from(120_000),
        due_day,
        category: BillCategory::Internet,
        is_recurring: true,
        frequency: BillFrequency::Monthly,
        notes: None,
    }
}

#[test]
fn pay_and_reset_round_trip_through_store() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_bill(&new_bill("Fiber", 20)).unwrap();

    store.mark_bill_paid(id, d("2025-06-18")).unwrap();
    let paid = store.bills().unwrap().into_iter().find(|b| b.id == id).unwrap();
    assert!(paid.is_paid);
    assert_eq!(paid.last_paid_date, Some(d("2025-06-18")));

    store.reset_bill(id).unwrap();
    let reset = store.bills().unwrap().into_iter().find(|b| b.id == id).unwrap();
    assert!(!reset.is_paid);
}

#[test]
fn bills_are_ordered_by_due_day() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    store.add_bill(&new_bill("Late", 28)).unwrap();
    store.add_bill(&new_bill("Early", 2)).unwrap();
    let days: Vec<u32> = store.bills().unwrap().iter().map(|b| b.due_day).collect();
    assert_eq!(days, vec![2, 28]);
}

#[test]
fn invalid_bills_are_rejected() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    for day in [0, 32] {
        let err = store.add_bill(&new_bill("Bad", day)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
    let mut zero = new_bill("Zero", 5);
    zero.amount = Decimal::ZERO;
    assert!(matches!(store.add_bill(&zero), Err(Error::Validation(_))));
    assert!(store.bills().unwrap().is_empty());
}
