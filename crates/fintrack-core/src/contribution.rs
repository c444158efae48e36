//! Monthly contributions and the cumulative running total.
//!
//! One record per (year, month) pair. `cumulative` is a derived field — the
//! prefix sum over all records ordered by (year, month) ascending — and is
//! recomputed in full after any mutation of the collection. It is never
//! authoritative on its own.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyContribution {
  pub id:         i64,
  pub year:       i32,
  /// Calendar month, 1–12.
  pub month:      u32,
  /// Display label derived from (year, month), e.g. `"January 2024"`.
  pub month_name: String,
  pub amount:     Decimal,
  /// Running total across all months up to and including this one.
  pub cumulative: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl MonthlyContribution {
  /// Build a fresh month with a zero amount. The store supplies `id`.
  /// Rejects months outside 1–12.
  pub fn new(id: i64, year: i32, month: u32) -> Result<Self> {
    let now = Utc::now();
    Ok(Self {
      id,
      year,
      month,
      month_name: month_label(year, month)?,
      amount: Decimal::ZERO,
      cumulative: Decimal::ZERO,
      created_at: now,
      updated_at: now,
    })
  }
}

/// Display label for a (year, month) pair.
pub fn month_label(year: i32, month: u32) -> Result<String> {
  let first = NaiveDate::from_ymd_opt(year, month, 1)
    .ok_or(Error::MonthOutOfRange(month))?;
  Ok(first.format("%B %Y").to_string())
}

/// Recompute every row's `cumulative` as the prefix sum over (year, month)
/// ascending. Sorts `rows` in place. Must run after any create, update, or
/// delete of a contribution.
pub fn recalculate_cumulative(rows: &mut [MonthlyContribution]) {
  rows.sort_by_key(|r| (r.year, r.month));
  let mut running = Decimal::ZERO;
  for row in rows {
    running += row.amount;
    row.cumulative = running;
  }
}
