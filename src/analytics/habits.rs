// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::HabitLog;

pub const GRID_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HabitDay {
    pub date: NaiveDate,
    pub completed: bool,
}

fn completed_on(logs: &[HabitLog], date: NaiveDate) -> bool {
    logs.iter().any(|l| l.log_date == date && l.completed)
}

/// The last seven days ending with `today`, oldest first.
///
/// `logs` should belong to a single habit.
pub fn weekly_grid(logs: &[HabitLog], today: NaiveDate) -> Vec<HabitDay> {
    (0..GRID_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            HabitDay {
                date,
                completed: completed_on(logs, date),
            }
        })
        .collect()
}

/// Completed days in the grid, gaps allowed.
pub fn completed_in_window(grid: &[HabitDay]) -> usize {
    grid.iter().filter(|d| d.completed).count()
}

/// Consecutive completed days walking back from `today`. Zero when today
/// itself has no completed log.
pub fn current_streak(logs: &[HabitLog], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while completed_on(logs, day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
