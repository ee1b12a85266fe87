// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user reads and writes against the SQLite database.
//!
//! Every statement carries the session's `user_id`; a row owned by someone
//! else behaves exactly like a missing row. Reads go through a
//! [`QueryCache`] and each successful write invalidates the tags it touched.

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::analytics::period::Period;
use crate::analytics::savings::{FundingChange, apply_funding};
use crate::cache::{QueryCache, QueryKey};
use crate::config::Session;
use crate::error::{Error, Result};
use crate::models::{
    Bill, BillCategory, BillFrequency, Budget, Category, Habit, HabitLog, Note, SavingsGoal,
    Transaction, TxType,
};
use crate::utils::require_money_scale;

const TAG_TRANSACTIONS: &str = "transactions";
const TAG_BUDGETS: &str = "budgets";
const TAG_GOALS: &str = "savings_goals";
const TAG_BILLS: &str = "bills";
const TAG_NOTES: &str = "notes";
const TAG_HABITS: &str = "habits";
const TAG_HABIT_LOGS: &str = "habit_logs";

pub const DEFAULT_GOAL_ICON: &str = "🎯";
pub const DEFAULT_COLOR: &str = "#3b82f6";

fn stored<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse::<T>()
        .map_err(|_| Error::Corrupt(format!("invalid {} '{}'", what, raw)))
}

fn require_text(value: &str, field: &str) -> Result<String> {
    let v = value.trim();
    if v.is_empty() {
        return Err(Error::validation(format!("{} must not be empty", field)));
    }
    Ok(v.to_string())
}

fn require_positive(amount: Decimal, field: &str) -> Result<()> {
    require_money_scale(amount)?;
    if amount <= Decimal::ZERO {
        return Err(Error::validation(format!(
            "{} must be greater than zero, got {}",
            field, amount
        )));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TxType,
    pub amount: Decimal,
    pub category: Category,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        require_positive(self.amount, "amount")?;
        if !self.category.allows(self.kind) {
            return Err(Error::validation(format!(
                "category '{}' cannot be used for {}",
                self.category, self.kind
            )));
        }
        Ok(())
    }
}

/// Optional constraints on a transaction read. Results are newest first.
#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub period: Option<Period>,
    pub kind: Option<TxType>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

impl TxFilter {
    pub fn period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }

    fn cache_key(&self) -> QueryKey {
        QueryKey::new(TAG_TRANSACTIONS)
            .with(format!("{:?}", self.period))
            .with(format!("{:?}", self.kind))
            .with(format!("{:?}", self.category))
            .with(format!("{:?}", self.limit))
    }
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: Category,
    pub amount: Decimal,
    /// Any day of the month; stored as the first.
    pub month: NaiveDate,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(Error::validation(format!(
                "budget amount must not be negative, got {}",
                self.amount
            )));
        }
        require_money_scale(self.amount)?;
        if !self.category.allows(TxType::Expense) {
            return Err(Error::validation(format!(
                "'{}' is an income category and cannot be budgeted",
                self.category
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBill {
    pub name: String,
    pub amount: Decimal,
    pub due_day: u32,
    pub category: BillCategory,
    pub is_recurring: bool,
    pub frequency: BillFrequency,
    pub notes: Option<String>,
}

impl NewBill {
    pub fn validate(&self) -> Result<()> {
        require_text(&self.name, "bill name")?;
        require_positive(self.amount, "amount")?;
        if !(1..=31).contains(&self.due_day) {
            return Err(Error::validation(format!(
                "due day must be between 1 and 31, got {}",
                self.due_day
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewNote {
    /// Trimmed tags, blanks and repeats removed, first spelling kept.
    pub fn clean_tags(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for tag in &self.tags {
            let t = tag.trim();
            if !t.is_empty() && !out.iter().any(|o| o == t) {
                out.push(t.to_string());
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

pub struct Store<'c> {
    conn: &'c Connection,
    session: Session,
    transactions: QueryCache<Vec<Transaction>>,
    budgets: QueryCache<Vec<Budget>>,
    goals: QueryCache<Vec<SavingsGoal>>,
    bills: QueryCache<Vec<Bill>>,
    notes: QueryCache<Vec<Note>>,
    habits: QueryCache<Vec<Habit>>,
    habit_logs: QueryCache<Vec<HabitLog>>,
}

impl<'c> Store<'c> {
    pub fn new(conn: &'c Connection, session: Session) -> Self {
        Self {
            conn,
            session,
            transactions: QueryCache::new(),
            budgets: QueryCache::new(),
            goals: QueryCache::new(),
            bills: QueryCache::new(),
            notes: QueryCache::new(),
            habits: QueryCache::new(),
            habit_logs: QueryCache::new(),
        }
    }

    /// Store for the logged-in user; [`Error::Unauthorized`] otherwise.
    pub fn open(conn: &'c Connection) -> Result<Self> {
        let session = crate::config::current_session(conn)?;
        Ok(Self::new(conn, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn conn(&self) -> &Connection {
        self.conn
    }

    fn user(&self) -> i64 {
        self.session.user_id
    }

    fn invalidate(&mut self, tag: &'static str) {
        match tag {
            TAG_TRANSACTIONS => self.transactions.invalidate(tag),
            TAG_BUDGETS => self.budgets.invalidate(tag),
            TAG_GOALS => self.goals.invalidate(tag),
            TAG_BILLS => self.bills.invalidate(tag),
            TAG_NOTES => self.notes.invalidate(tag),
            TAG_HABITS => self.habits.invalidate(tag),
            TAG_HABIT_LOGS => self.habit_logs.invalidate(tag),
            _ => 0,
        };
    }

    /// Maps "no row changed" to [`Error::NotFound`].
    fn expect_changed(changed: usize, entity: &'static str, id: i64) -> Result<()> {
        if changed == 0 {
            return Err(Error::NotFound { entity, id });
        }
        Ok(())
    }

    // ---- transactions ----

    pub fn add_transaction(&mut self, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;
        self.conn.execute(
            "INSERT INTO transactions(user_id, date, type, amount, category, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                self.user(),
                tx.date,
                tx.kind.as_str(),
                tx.amount.to_string(),
                tx.category.slug(),
                tx.note.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, kind = %tx.kind, amount = %tx.amount, "transaction added");
        self.invalidate(TAG_TRANSACTIONS);
        Ok(id)
    }

    pub fn transactions(&mut self, filter: &TxFilter) -> Result<Vec<Transaction>> {
        let conn = self.conn;
        let user = self.user();
        self.transactions
            .get_or_try_insert_with(filter.cache_key(), || load_transactions(conn, user, filter))
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, self.user()],
        )?;
        Self::expect_changed(changed, "transaction", id)?;
        tracing::info!(id, "transaction deleted");
        self.invalidate(TAG_TRANSACTIONS);
        Ok(())
    }

    // ---- budgets ----

    /// Creates or replaces the ceiling for (category, month).
    pub fn set_budget(&mut self, budget: &NewBudget) -> Result<i64> {
        budget.validate()?;
        let month = crate::analytics::period::first_of_month(budget.month);
        self.conn.execute(
            "INSERT INTO budgets(user_id, month, category, amount) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, month, category) DO UPDATE SET amount=excluded.amount",
            params![
                self.user(),
                month,
                budget.category.slug(),
                budget.amount.to_string()
            ],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM budgets WHERE user_id=?1 AND month=?2 AND category=?3",
            params![self.user(), month, budget.category.slug()],
            |r| r.get(0),
        )?;
        tracing::info!(id, category = budget.category.slug(), %month, "budget set");
        self.invalidate(TAG_BUDGETS);
        Ok(id)
    }

    pub fn update_budget(&mut self, id: i64, budget: &NewBudget) -> Result<()> {
        budget.validate()?;
        let month = crate::analytics::period::first_of_month(budget.month);
        let taken: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM budgets WHERE user_id=?1 AND month=?2 AND category=?3 AND id<>?4",
                params![self.user(), month, budget.category.slug(), id],
                |r| r.get(0),
            )
            .optional()?;
        if let Some(other) = taken {
            return Err(Error::validation(format!(
                "budget {} already covers '{}' for {}",
                other,
                budget.category,
                month.format("%Y-%m")
            )));
        }
        let changed = self.conn.execute(
            "UPDATE budgets SET category=?1, amount=?2, month=?3 WHERE id=?4 AND user_id=?5",
            params![
                budget.category.slug(),
                budget.amount.to_string(),
                month,
                id,
                self.user()
            ],
        )?;
        Self::expect_changed(changed, "budget", id)?;
        self.invalidate(TAG_BUDGETS);
        Ok(())
    }

    /// Budgets of one month, or all months when `month` is `None`.
    pub fn budgets(&mut self, month: Option<NaiveDate>) -> Result<Vec<Budget>> {
        let conn = self.conn;
        let user = self.user();
        let month = month.map(crate::analytics::period::first_of_month);
        let key = QueryKey::new(TAG_BUDGETS).with(format!("{:?}", month));
        self.budgets.get_or_try_insert_with(key, || {
            let mut sql = String::from(
                "SELECT id, category, amount, month FROM budgets WHERE user_id=?1",
            );
            let mut args = vec![Value::Integer(user)];
            if let Some(m) = month {
                sql.push_str(" AND month=?2");
                args.push(Value::Text(m.to_string()));
            }
            sql.push_str(" ORDER BY month DESC, category");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args), |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, NaiveDate>(3)?,
                ))
            })?;
            let mut out = Vec::new();
            for row in rows {
                let (id, category, amount, month) = row?;
                out.push(Budget {
                    id,
                    category: stored(&category, "category")?,
                    amount: stored(&amount, "budget amount")?,
                    month,
                });
            }
            Ok(out)
        })
    }

    pub fn delete_budget(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM budgets WHERE id=?1 AND user_id=?2",
            params![id, self.user()],
        )?;
        Self::expect_changed(changed, "budget", id)?;
        self.invalidate(TAG_BUDGETS);
        Ok(())
    }

    // ---- savings goals ----

    pub fn add_goal(&mut self, goal: &NewGoal) -> Result<i64> {
        let name = require_text(&goal.name, "goal name")?;
        require_positive(goal.target_amount, "target amount")?;
        self.conn.execute(
            "INSERT INTO savings_goals(user_id, name, target_amount, current_amount, deadline, icon, color, is_completed)
             VALUES (?1, ?2, ?3, '0', ?4, ?5, ?6, 0)",
            params![
                self.user(),
                name,
                goal.target_amount.to_string(),
                goal.deadline,
                goal.icon.as_deref().unwrap_or(DEFAULT_GOAL_ICON),
                goal.color.as_deref().unwrap_or(DEFAULT_COLOR),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, "savings goal added");
        self.invalidate(TAG_GOALS);
        Ok(id)
    }

    /// Newest first.
    pub fn goals(&mut self) -> Result<Vec<SavingsGoal>> {
        let conn = self.conn;
        let user = self.user();
        self.goals
            .get_or_try_insert_with(QueryKey::new(TAG_GOALS), || load_goals(conn, user))
    }

    pub fn goal(&mut self, id: i64) -> Result<SavingsGoal> {
        self.goals()?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or(Error::NotFound {
                entity: "savings goal",
                id,
            })
    }

    /// Applies a deposit or withdrawal and recomputes completion.
    pub fn fund_goal(&mut self, id: i64, change: FundingChange) -> Result<SavingsGoal> {
        let mut goal = self.goal(id)?;
        let (current, completed) = apply_funding(&goal, change)?;
        let changed = self.conn.execute(
            "UPDATE savings_goals SET current_amount=?1, is_completed=?2, updated_at=datetime('now')
             WHERE id=?3 AND user_id=?4",
            params![current.to_string(), completed, id, self.user()],
        )?;
        Self::expect_changed(changed, "savings goal", id)?;
        tracing::info!(id, current = %current, completed, "savings goal funded");
        self.invalidate(TAG_GOALS);
        goal.current_amount = current;
        goal.is_completed = completed;
        Ok(goal)
    }

    pub fn delete_goal(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM savings_goals WHERE id=?1 AND user_id=?2",
            params![id, self.user()],
        )?;
        Self::expect_changed(changed, "savings goal", id)?;
        self.invalidate(TAG_GOALS);
        Ok(())
    }

    // ---- bills ----

    pub fn add_bill(&mut self, bill: &NewBill) -> Result<i64> {
        bill.validate()?;
        self.conn.execute(
            "INSERT INTO bills(user_id, name, amount, due_day, category, is_recurring, frequency, is_paid, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
            params![
                self.user(),
                bill.name.trim(),
                bill.amount.to_string(),
                bill.due_day,
                bill.category.slug(),
                bill.is_recurring,
                bill.frequency.slug(),
                bill.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, due_day = bill.due_day, "bill added");
        self.invalidate(TAG_BILLS);
        Ok(id)
    }

    /// Ordered by due day.
    pub fn bills(&mut self) -> Result<Vec<Bill>> {
        let conn = self.conn;
        let user = self.user();
        self.bills
            .get_or_try_insert_with(QueryKey::new(TAG_BILLS), || load_bills(conn, user))
    }

    pub fn mark_bill_paid(&mut self, id: i64, paid_on: NaiveDate) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE bills SET is_paid=1, last_paid_date=?1 WHERE id=?2 AND user_id=?3",
            params![paid_on, id, self.user()],
        )?;
        Self::expect_changed(changed, "bill", id)?;
        tracing::info!(id, %paid_on, "bill paid");
        self.invalidate(TAG_BILLS);
        Ok(())
    }

    /// Back to unpaid; `last_paid_date` is kept.
    pub fn reset_bill(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE bills SET is_paid=0 WHERE id=?1 AND user_id=?2",
            params![id, self.user()],
        )?;
        Self::expect_changed(changed, "bill", id)?;
        self.invalidate(TAG_BILLS);
        Ok(())
    }

    pub fn delete_bill(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM bills WHERE id=?1 AND user_id=?2",
            params![id, self.user()],
        )?;
        Self::expect_changed(changed, "bill", id)?;
        self.invalidate(TAG_BILLS);
        Ok(())
    }

    // ---- notes ----

    pub fn add_note(&mut self, note: &NewNote) -> Result<i64> {
        let title = require_text(&note.title, "note title")?;
        let tags = serde_json::to_string(&note.clean_tags())
            .map_err(|e| Error::validation(format!("tags: {}", e)))?;
        self.conn.execute(
            "INSERT INTO notes(user_id, title, content, tags) VALUES (?1, ?2, ?3, ?4)",
            params![self.user(), title, note.content, tags],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, "note added");
        self.invalidate(TAG_NOTES);
        Ok(id)
    }

    pub fn update_note(&mut self, id: i64, note: &NewNote) -> Result<()> {
        let title = require_text(&note.title, "note title")?;
        let tags = serde_json::to_string(&note.clean_tags())
            .map_err(|e| Error::validation(format!("tags: {}", e)))?;
        let changed = self.conn.execute(
            "UPDATE notes SET title=?1, content=?2, tags=?3 WHERE id=?4 AND user_id=?5",
            params![title, note.content, tags, id, self.user()],
        )?;
        Self::expect_changed(changed, "note", id)?;
        self.invalidate(TAG_NOTES);
        Ok(())
    }

    /// Newest first, archived included.
    pub fn notes(&mut self) -> Result<Vec<Note>> {
        let conn = self.conn;
        let user = self.user();
        self.notes
            .get_or_try_insert_with(QueryKey::new(TAG_NOTES), || load_notes(conn, user))
    }

    pub fn note(&mut self, id: i64) -> Result<Note> {
        self.notes()?
            .into_iter()
            .find(|n| n.id == id)
            .ok_or(Error::NotFound { entity: "note", id })
    }

    /// Flips `is_archived`; returns the new value.
    pub fn toggle_archive(&mut self, id: i64) -> Result<bool> {
        let note = self.note(id)?;
        let archived = !note.is_archived;
        let changed = self.conn.execute(
            "UPDATE notes SET is_archived=?1 WHERE id=?2 AND user_id=?3",
            params![archived, id, self.user()],
        )?;
        Self::expect_changed(changed, "note", id)?;
        self.invalidate(TAG_NOTES);
        Ok(archived)
    }

    pub fn delete_note(&mut self, id: i64) -> Result<()> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id=?1 AND user_id=?2",
            params![id, self.user()],
        )?;
        Self::expect_changed(changed, "note", id)?;
        self.invalidate(TAG_NOTES);
        Ok(())
    }

    // ---- habits ----

    pub fn add_habit(&mut self, habit: &NewHabit) -> Result<i64> {
        let name = require_text(&habit.name, "habit name")?;
        self.conn.execute(
            "INSERT INTO habits(user_id, name, description, color) VALUES (?1, ?2, ?3, ?4)",
            params![
                self.user(),
                name,
                habit.description.as_deref().map(str::trim).filter(|d| !d.is_empty()),
                habit.color.as_deref().unwrap_or(DEFAULT_COLOR),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, "habit added");
        self.invalidate(TAG_HABITS);
        Ok(id)
    }

    pub fn update_habit(&mut self, id: i64, habit: &NewHabit) -> Result<()> {
        let name = require_text(&habit.name, "habit name")?;
        let current = self.habit(id)?;
        let changed = self.conn.execute(
            "UPDATE habits SET name=?1, description=?2, color=?3 WHERE id=?4 AND user_id=?5",
            params![
                name,
                habit.description.as_deref().map(str::trim).filter(|d| !d.is_empty()),
                habit.color.as_deref().unwrap_or(&current.color),
                id,
                self.user()
            ],
        )?;
        Self::expect_changed(changed, "habit", id)?;
        self.invalidate(TAG_HABITS);
        Ok(())
    }

    /// Oldest first.
    pub fn habits(&mut self) -> Result<Vec<Habit>> {
        let conn = self.conn;
        let user = self.user();
        self.habits
            .get_or_try_insert_with(QueryKey::new(TAG_HABITS), || load_habits(conn, user))
    }

    pub fn habit(&mut self, id: i64) -> Result<Habit> {
        self.habits()?
            .into_iter()
            .find(|h| h.id == id)
            .ok_or(Error::NotFound { entity: "habit", id })
    }

    /// Deletes the habit and its logs.
    pub fn delete_habit(&mut self, id: i64) -> Result<()> {
        self.habit(id)?;
        let user = self.user();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM habit_logs WHERE habit_id=?1 AND user_id=?2",
            params![id, user],
        )?;
        let changed = tx.execute(
            "DELETE FROM habits WHERE id=?1 AND user_id=?2",
            params![id, user],
        )?;
        Self::expect_changed(changed, "habit", id)?;
        tx.commit()?;
        self.invalidate(TAG_HABIT_LOGS);
        self.invalidate(TAG_HABITS);
        Ok(())
    }

    /// Logs of one habit, optionally only from `since` onward, oldest first.
    pub fn habit_logs(&mut self, habit_id: i64, since: Option<NaiveDate>) -> Result<Vec<HabitLog>> {
        let conn = self.conn;
        let user = self.user();
        let key = QueryKey::new(TAG_HABIT_LOGS)
            .with(habit_id)
            .with(format!("{:?}", since));
        self.habit_logs.get_or_try_insert_with(key, || {
            let mut stmt = conn.prepare(
                "SELECT habit_id, log_date, completed FROM habit_logs
                 WHERE habit_id=?1 AND user_id=?2 AND log_date>=?3
                 ORDER BY log_date, id",
            )?;
            let floor = since.map(|d| d.to_string()).unwrap_or_default();
            let rows = stmt.query_map(params![habit_id, user, floor], |r| {
                Ok(HabitLog {
                    habit_id: r.get(0)?,
                    log_date: r.get(1)?,
                    completed: r.get(2)?,
                })
            })?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    /// Marks `date` done, or undone if it already was. Returns the new
    /// state. Leaves at most one log for the day.
    pub fn toggle_habit_log(&mut self, habit_id: i64, date: NaiveDate) -> Result<bool> {
        self.habit(habit_id)?;
        let user = self.user();
        let tx = self.conn.unchecked_transaction()?;
        let done: Option<i64> = tx
            .query_row(
                "SELECT id FROM habit_logs WHERE habit_id=?1 AND user_id=?2 AND log_date=?3 AND completed=1 LIMIT 1",
                params![habit_id, user, date],
                |r| r.get(0),
            )
            .optional()?;
        tx.execute(
            "DELETE FROM habit_logs WHERE habit_id=?1 AND user_id=?2 AND log_date=?3",
            params![habit_id, user, date],
        )?;
        let now_done = done.is_none();
        if now_done {
            tx.execute(
                "INSERT INTO habit_logs(user_id, habit_id, log_date, completed) VALUES (?1, ?2, ?3, 1)",
                params![user, habit_id, date],
            )?;
        }
        tx.commit()?;
        tracing::info!(habit_id, %date, done = now_done, "habit toggled");
        self.invalidate(TAG_HABIT_LOGS);
        self.invalidate(TAG_HABITS);
        Ok(now_done)
    }
}

fn load_transactions(conn: &Connection, user: i64, filter: &TxFilter) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, date, type, amount, category, note FROM transactions WHERE user_id=?",
    );
    let mut args = vec![Value::Integer(user)];
    if let Some(period) = filter.period {
        match period.bounds() {
            Some((start, end)) => {
                sql.push_str(" AND date>=? AND date<=?");
                args.push(Value::Text(start.to_string()));
                args.push(Value::Text(end.to_string()));
            }
            None => return Ok(Vec::new()),
        }
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND type=?");
        args.push(Value::Text(kind.as_str().to_string()));
    }
    if let Some(category) = filter.category {
        sql.push_str(" AND category=?");
        args.push(Value::Text(category.slug().to_string()));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        args.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args), |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, NaiveDate>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, date, kind, amount, category, note) = row?;
        out.push(Transaction {
            id,
            date,
            kind: stored(&kind, "transaction type")?,
            amount: stored(&amount, "amount")?,
            category: stored(&category, "category")?,
            note,
        });
    }
    tracing::debug!(user, rows = out.len(), "transactions loaded");
    Ok(out)
}

fn load_goals(conn: &Connection, user: i64) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount, deadline, icon, color, is_completed
         FROM savings_goals WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<NaiveDate>>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, bool>(7)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, target, current, deadline, icon, color, is_completed) = row?;
        out.push(SavingsGoal {
            id,
            name,
            target_amount: stored(&target, "target amount")?,
            current_amount: stored(&current, "current amount")?,
            deadline,
            icon,
            color,
            is_completed,
        });
    }
    Ok(out)
}

fn load_bills(conn: &Connection, user: i64) -> Result<Vec<Bill>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, due_day, category, is_recurring, frequency, is_paid, last_paid_date, notes
         FROM bills WHERE user_id=?1 ORDER BY due_day, id",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, u32>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, bool>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, bool>(7)?,
            r.get::<_, Option<NaiveDate>>(8)?,
            r.get::<_, Option<String>>(9)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, amount, due_day, category, is_recurring, frequency, is_paid, last_paid, notes) =
            row?;
        out.push(Bill {
            id,
            name,
            amount: stored(&amount, "bill amount")?,
            due_day,
            category: stored(&category, "bill category")?,
            is_recurring,
            frequency: stored(&frequency, "bill frequency")?,
            is_paid,
            last_paid_date: last_paid,
            notes,
        });
    }
    Ok(out)
}

fn load_notes(conn: &Connection, user: i64) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, tags, is_archived FROM notes
         WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, bool>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, title, content, tags, is_archived) = row?;
        let tags: Vec<String> = serde_json::from_str(&tags)
            .map_err(|_| Error::Corrupt(format!("invalid tags '{}' on note {}", tags, id)))?;
        out.push(Note {
            id,
            title,
            content,
            tags,
            is_archived,
        });
    }
    Ok(out)
}

fn load_habits(conn: &Connection, user: i64) -> Result<Vec<Habit>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, color FROM habits WHERE user_id=?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok(Habit {
            id: r.get(0)?,
            name: r.get(1)?,
            description: r.get(2)?,
            color: r.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

