// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::percent_of;
use crate::models::{Category, Transaction, TxType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn totals(records: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for r in records {
        match r.kind {
            TxType::Income => income += r.amount,
            TxType::Expense => expense += r.amount,
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    /// Share of all expense in the input, `None` when that is zero.
    pub share: Option<Decimal>,
}

/// Expense totals per category, largest first.
///
/// Categories are collected in first-seen order and the sort is stable, so
/// equal totals keep that order.
pub fn category_breakdown(records: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: Vec<(Category, Decimal)> = Vec::new();
    for r in records.iter().filter(|r| r.kind == TxType::Expense) {
        match sums.iter_mut().find(|(c, _)| *c == r.category) {
            Some((_, total)) => *total += r.amount,
            None => sums.push((r.category, r.amount)),
        }
    }
    let all: Decimal = sums.iter().map(|(_, t)| *t).sum();
    sums.sort_by(|a, b| b.1.cmp(&a.1));
    sums.into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            share: percent_of(total, all),
        })
        .collect()
}

/// The first `n` entries of [`category_breakdown`].
pub fn top_categories(records: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut ranked = category_breakdown(records);
    ranked.truncate(n);
    ranked
}
