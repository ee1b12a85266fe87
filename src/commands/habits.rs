// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::habits::GRID_DAYS;
use crate::analytics::{HabitDay, completed_in_window, current_streak, weekly_grid};
use crate::models::Habit;
use crate::store::{NewHabit, Store};
use crate::utils::{json_flags, maybe_print_json, parse_date, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let habit = NewHabit {
                name: sub.get_one::<String>("name").unwrap().to_string(),
                description: sub.get_one::<String>("description").cloned(),
                color: sub.get_one::<String>("color").cloned(),
            };
            let id = store.add_habit(&habit)?;
            println!("Added habit #{}", id);
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let current = store.habit(id)?;
            let habit = NewHabit {
                name: sub
                    .get_one::<String>("name")
                    .cloned()
                    .unwrap_or(current.name),
                description: sub
                    .get_one::<String>("description")
                    .cloned()
                    .or(current.description),
                color: sub.get_one::<String>("color").cloned(),
            };
            store.update_habit(id, &habit)?;
            println!("Updated habit #{}", id);
        }
        Some(("list", sub)) => list(store, sub)?,
        Some(("toggle", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => today(sub)?,
            };
            let done = store.toggle_habit_log(id, date)?;
            println!(
                "Habit #{} {} on {}",
                id,
                if done { "done" } else { "not done" },
                date
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_habit(id)?;
            println!("Removed habit #{}", id);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct HabitRow {
    #[serde(flatten)]
    pub habit: Habit,
    pub week: Vec<HabitDay>,
    pub done_this_week: usize,
    pub streak: u32,
}

pub fn habit_rows(store: &mut Store, today: NaiveDate) -> Result<Vec<HabitRow>> {
    let habits = store.habits()?;
    let mut out = Vec::with_capacity(habits.len());
    for habit in habits {
        // Full history: the streak can run past the grid.
        let logs = store.habit_logs(habit.id, None)?;
        let week = weekly_grid(&logs, today);
        out.push(HabitRow {
            done_this_week: completed_in_window(&week),
            streak: current_streak(&logs, today),
            week,
            habit,
        });
    }
    Ok(out)
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let today = today(sub)?;
    let data = habit_rows(store, today)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let mut headers: Vec<String> = vec!["ID".into(), "Habit".into()];
    if let Some(first) = data.first() {
        headers.extend(first.week.iter().map(|d| d.date.format("%a").to_string()));
    }
    headers.push("Week".into());
    headers.push("Streak".into());
    let rows = data
        .iter()
        .map(|r| {
            let mut row = vec![r.habit.id.to_string(), r.habit.name.clone()];
            row.extend(
                r.week
                    .iter()
                    .map(|d| if d.completed { "✓" } else { "·" }.to_string()),
            );
            row.push(format!("{}/{}", r.done_this_week, GRID_DAYS));
            row.push(format!("{} days", r.streak));
            row
        })
        .collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    println!("{}", pretty_table(&header_refs, rows));
    Ok(())
}
