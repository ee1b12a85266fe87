// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    /// Human label used in exports and tables.
    pub fn label(&self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
        }
    }
}

impl FromStr for TxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(TxType::Income),
            "expense" | "out" => Ok(TxType::Expense),
            other => Err(Error::validation(format!(
                "unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($variant:ident => ($slug:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn slug(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|c| {
                        c.slug().eq_ignore_ascii_case(needle)
                            || c.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| {
                        let known: Vec<&str> = $name::ALL.iter().map(|c| c.slug()).collect();
                        Error::validation(format!(
                            "unknown {} '{}' (expected one of: {})",
                            $what,
                            needle,
                            known.join(", ")
                        ))
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

closed_enum! {
    /// Transaction and budget categories.
    Category, "category" {
        Food => ("food", "Food & Drinks"),
        Transport => ("transport", "Transport"),
        Shopping => ("shopping", "Shopping"),
        Bills => ("bills", "Bills"),
        Health => ("health", "Health"),
        Entertainment => ("entertainment", "Entertainment"),
        Education => ("education", "Education"),
        Salary => ("salary", "Salary"),
        Bonus => ("bonus", "Bonus"),
        Investment => ("investment", "Investment"),
        Freelance => ("freelance", "Freelance"),
        Business => ("business", "Business"),
        Other => ("other", "Other"),
    }
}

impl Category {
    /// Whether this category may be used for the given transaction type.
    /// `Other` is shared by both.
    pub fn allows(&self, kind: TxType) -> bool {
        use Category::*;
        match self {
            Other => true,
            Food | Transport | Shopping | Bills | Health | Entertainment | Education => {
                kind == TxType::Expense
            }
            Salary | Bonus | Investment | Freelance | Business => kind == TxType::Income,
        }
    }
}

closed_enum! {
    BillCategory, "bill category" {
        Electricity => ("electricity", "Electricity"),
        Water => ("water", "Water"),
        Internet => ("internet", "Internet"),
        Phone => ("phone", "Phone"),
        Streaming => ("streaming", "Streaming"),
        Insurance => ("insurance", "Insurance"),
        Installment => ("installment", "Installment"),
        Rent => ("rent", "Rent"),
        Subscription => ("subscription", "Subscription"),
        Other => ("other", "Other"),
    }
}

closed_enum! {
    BillFrequency, "bill frequency" {
        Monthly => ("monthly", "Monthly"),
        Yearly => ("yearly", "Yearly"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: TxType,
    pub amount: Decimal,
    pub category: Category,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: Category,
    pub amount: Decimal,
    /// First day of the budgeted month.
    pub month: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub icon: String,
    pub color: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    /// Day of month, 1..=31.
    pub due_day: u32,
    pub category: BillCategory,
    pub is_recurring: bool,
    pub frequency: BillFrequency,
    pub is_paid: bool,
    pub last_paid_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_archived: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitLog {
    pub habit_id: i64,
    pub log_date: NaiveDate,
    pub completed: bool,
}

impl Note {
    /// Case-insensitive substring match on title, content or any tag. An
    /// empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&q)
            || self.content.to_lowercase().contains(&q)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&q))
    }
}
