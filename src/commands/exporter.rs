// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::Period;
use crate::commands::budgets::selected_month;
use crate::models::Transaction;
use crate::store::{Store, TxFilter};
use crate::utils::month_label;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let month = selected_month(sub)?;
            let fmt = ExportFormat::parse(sub.get_one::<String>("format").unwrap())?;
            let out = match sub.get_one::<String>("out") {
                Some(p) => PathBuf::from(p),
                None => default_file_name(month, fmt),
            };
            let n = export_transactions(store, month, fmt, &out)?;
            println!("Exported {} transactions to {}", n, out.display());
            Ok(())
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => bail!("Unknown format: {} (use csv|json)", other),
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// `report-YYYY-MM.csv` (or `.json`) in the working directory.
pub fn default_file_name(month: NaiveDate, fmt: ExportFormat) -> PathBuf {
    PathBuf::from(format!("report-{}.{}", month_label(month), fmt.extension()))
}

#[derive(Debug, Serialize)]
pub struct ExportRow {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl From<&Transaction> for ExportRow {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t.date.to_string(),
            kind: t.kind.label().to_string(),
            category: t.category.label().to_string(),
            amount: t.amount.to_string(),
            note: t.note.clone().unwrap_or_default(),
        }
    }
}

/// The month's transactions, oldest first.
pub fn export_rows(store: &mut Store, month: NaiveDate) -> Result<Vec<ExportRow>> {
    let mut txs = store.transactions(&TxFilter::period(Period::month_of(month)))?;
    txs.reverse();
    Ok(txs.iter().map(ExportRow::from).collect())
}

pub fn write_csv<W: Write>(rows: &[ExportRow], w: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["date", "type", "category", "amount", "note"])?;
    for r in rows {
        wtr.write_record([&r.date, &r.kind, &r.category, &r.amount, &r.note])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the month to `out` and returns the number of rows.
pub fn export_transactions(
    store: &mut Store,
    month: NaiveDate,
    fmt: ExportFormat,
    out: &Path,
) -> Result<usize> {
    let rows = export_rows(store, month)?;
    match fmt {
        ExportFormat::Csv => {
            let file = std::fs::File::create(out)
                .with_context(|| format!("creating {}", out.display()))?;
            write_csv(&rows, file)?;
        }
        ExportFormat::Json => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("writing {}", out.display()))?;
        }
    }
    tracing::info!(rows = rows.len(), path = %out.display(), "transactions exported");
    Ok(rows.len())
}
