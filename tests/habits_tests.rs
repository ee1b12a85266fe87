// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::analytics::{completed_in_window, current_streak, weekly_grid};
use dompet::commands::habits::habit_rows;
use dompet::config;
use dompet::db::init_schema;
use dompet::error::Error;
use dompet::models::HabitLog;
use dompet::store::{NewHabit, Store};
use rusqlite::Connection;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn log(date: &str) -> HabitLog {
    HabitLog {
        habit_id: 1,
        log_date: d(date),
        completed: true,
    }
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    config::login(&conn, "citra").unwrap();
    conn
}

fn new_habit(name: &str) -> NewHabit {
    NewHabit {
        name: name.to_string(),
        ..NewHabit::default()
    }
}

#[test]
fn grid_is_seven_days_oldest_first() {
    let logs = vec![log("2025-03-10"), log("2025-03-04"), log("2025-03-03")];
    let grid = weekly_grid(&logs, d("2025-03-10"));
    assert_eq!(grid.len(), 7);
    assert_eq!(grid[0].date, d("2025-03-04"));
    assert_eq!(grid[6].date, d("2025-03-10"));
    assert!(grid[0].completed);
    assert!(grid[6].completed);
    assert_eq!(completed_in_window(&grid), 2);
}

#[test]
fn streak_counts_consecutive_days_only() {
    let today = d("2025-03-10");
    let logs = vec![
        log("2025-03-10"),
        log("2025-03-09"),
        log("2025-03-08"),
        log("2025-03-06"),
    ];
    assert_eq!(current_streak(&logs, today), 3);
    assert_eq!(completed_in_window(&weekly_grid(&logs, today)), 4);
}

#[test]
fn streak_is_zero_when_today_is_open() {
    let logs = vec![log("2025-03-09"), log("2025-03-08")];
    assert_eq!(current_streak(&logs, d("2025-03-10")), 0);
}

#[test]
fn incomplete_logs_do_not_count() {
    let mut l = log("2025-03-10");
    l.completed = false;
    assert_eq!(current_streak(&[l.clone()], d("2025-03-10")), 0);
    assert_eq!(completed_in_window(&weekly_grid(&[l], d("2025-03-10"))), 0);
}

#[test]
fn toggle_twice_restores_state() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_habit(&new_habit("Read")).unwrap();
    let day = d("2025-05-01");

    assert!(store.habit_logs(id, None).unwrap().is_empty());
    assert!(store.toggle_habit_log(id, day).unwrap());
    assert_eq!(store.habit_logs(id, None).unwrap().len(), 1);
    assert!(!store.toggle_habit_log(id, day).unwrap());
    assert!(store.habit_logs(id, None).unwrap().is_empty());
}

#[test]
fn logs_since_excludes_older_days() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_habit(&new_habit("Walk")).unwrap();
    for day in ["2025-05-01", "2025-05-03", "2025-05-05"] {
        store.toggle_habit_log(id, d(day)).unwrap();
    }
    let recent = store.habit_logs(id, Some(d("2025-05-03"))).unwrap();
    let dates: Vec<NaiveDate> = recent.iter().map(|l| l.log_date).collect();
    assert_eq!(dates, vec![d("2025-05-03"), d("2025-05-05")]);
}

#[test]
fn habit_rows_report_week_and_streak() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_habit(&new_habit("Stretch")).unwrap();
    for day in ["2025-04-20", "2025-05-08", "2025-05-09", "2025-05-10"] {
        store.toggle_habit_log(id, d(day)).unwrap();
    }
    let rows = habit_rows(&mut store, d("2025-05-10")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].habit.name, "Stretch");
    assert_eq!(rows[0].done_this_week, 3);
    assert_eq!(rows[0].streak, 3);
}

#[test]
fn deleting_habit_removes_its_logs() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_habit(&new_habit("Meditate")).unwrap();
    store.toggle_habit_log(id, d("2025-05-01")).unwrap();
    store.delete_habit(id).unwrap();

    let left: i64 = conn
        .query_row("SELECT COUNT(*) FROM habit_logs", [], |r| r.get(0))
        .unwrap();
    assert_eq!(left, 0);
    assert!(matches!(
        store.toggle_habit_log(id, d("2025-05-02")),
        Err(Error::NotFound { .. })
    ));
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |r| r.get(0)).unwrap()
}

#[test]
fn failed_habit_delete_keeps_its_logs() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_habit(&new_habit("Journal")).unwrap();
    store.toggle_habit_log(id, d("2025-05-01")).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER keep_habits BEFORE DELETE ON habits
         BEGIN SELECT RAISE(ABORT, 'habits are locked'); END;",
    )
    .unwrap();

    assert!(matches!(store.delete_habit(id), Err(Error::Store(_))));
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM habits"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM habit_logs"), 1);
}

#[test]
fn failed_toggle_keeps_the_days_log() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_habit(&new_habit("Swim")).unwrap();
    conn.execute(
        "INSERT INTO habit_logs(user_id, habit_id, log_date, completed)
         SELECT user_id, id, '2025-05-01', 0 FROM habits WHERE id=?1",
        [id],
    )
    .unwrap();
    conn.execute_batch(
        "CREATE TRIGGER no_new_logs BEFORE INSERT ON habit_logs
         BEGIN SELECT RAISE(ABORT, 'logs are locked'); END;",
    )
    .unwrap();

    assert!(store.toggle_habit_log(id, d("2025-05-01")).is_err());
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM habit_logs WHERE completed=0"),
        1
    );

    conn.execute_batch("DROP TRIGGER no_new_logs;").unwrap();
    assert!(store.toggle_habit_log(id, d("2025-05-01")).unwrap());
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM habit_logs"), 1);
}

#[test]
fn blank_habit_name_is_rejected() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    assert!(matches!(
        store.add_habit(&new_habit("   ")),
        Err(Error::Validation(_))
    ));
}
