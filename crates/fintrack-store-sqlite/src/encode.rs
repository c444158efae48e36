//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, decimals as their canonical string form. Booleans use
//! SQLite's native 0/1 integers via rusqlite's own conversions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use fintrack_core::{
  contribution::MonthlyContribution,
  goal::Goal,
  history::{ChangeType, HistoryEntry},
  investment::Investment,
  loan::Loan,
};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("bad timestamp {s:?}: {e}")))
}

// ─── Calendar dates ──────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse()
    .map_err(|e| Error::Decode(format!("bad date {s:?}: {e}")))
}

// ─── Decimals ────────────────────────────────────────────────────────────────

pub fn encode_decimal(d: Decimal) -> String { d.to_string() }

pub fn decode_decimal(s: &str) -> Result<Decimal> {
  s.parse()
    .map_err(|e| Error::Decode(format!("bad decimal {s:?}: {e}")))
}

// ─── Change type ─────────────────────────────────────────────────────────────

pub fn decode_change_type(s: &str) -> Result<ChangeType> {
  Ok(ChangeType::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from an `investments` row.
pub struct RawInvestment {
  pub id:          i64,
  pub amount:      String,
  pub date:        String,
  pub description: String,
  pub category:    String,
  pub version:     i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawInvestment {
  pub fn into_investment(self) -> Result<Investment> {
    Ok(Investment {
      id:          self.id,
      amount:      decode_decimal(&self.amount)?,
      date:        decode_date(&self.date)?,
      description: self.description,
      category:    self.category,
      version:     self.version,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw column values read directly from an `investment_history` row.
pub struct RawHistoryEntry {
  pub id:                 i64,
  pub investment_id:      i64,
  pub amount:             String,
  pub date:               String,
  pub description:        String,
  pub category:           String,
  pub version:            i64,
  pub change_type:        String,
  pub change_description: String,
  pub changed_at:         String,
}

impl RawHistoryEntry {
  pub fn into_entry(self) -> Result<HistoryEntry> {
    Ok(HistoryEntry {
      id:                 self.id,
      investment_id:      self.investment_id,
      amount:             decode_decimal(&self.amount)?,
      date:               decode_date(&self.date)?,
      description:        self.description,
      category:           self.category,
      version:            self.version,
      change_type:        decode_change_type(&self.change_type)?,
      change_description: self.change_description,
      changed_at:         decode_dt(&self.changed_at)?,
    })
  }
}

/// Raw column values read directly from a `monthly_contributions` row.
pub struct RawContribution {
  pub id:         i64,
  pub year:       i32,
  pub month:      u32,
  pub month_name: String,
  pub amount:     String,
  pub cumulative: String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawContribution {
  pub fn into_contribution(self) -> Result<MonthlyContribution> {
    Ok(MonthlyContribution {
      id:         self.id,
      year:       self.year,
      month:      self.month,
      month_name: self.month_name,
      amount:     decode_decimal(&self.amount)?,
      cumulative: decode_decimal(&self.cumulative)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw column values read directly from a `loans` row.
pub struct RawLoan {
  pub id:               i64,
  pub principal_amount: String,
  pub current_balance:  String,
  pub interest_rate:    String,
  pub monthly_payment:  String,
  pub start_date:       String,
  pub description:      String,
  pub lender:           String,
  pub loan_type:        String,
  pub is_active:        bool,
}

impl RawLoan {
  pub fn into_loan(self) -> Result<Loan> {
    Ok(Loan {
      id:               self.id,
      principal_amount: decode_decimal(&self.principal_amount)?,
      current_balance:  decode_decimal(&self.current_balance)?,
      interest_rate:    decode_decimal(&self.interest_rate)?,
      monthly_payment:  decode_decimal(&self.monthly_payment)?,
      start_date:       decode_date(&self.start_date)?,
      description:      self.description,
      lender:           self.lender,
      loan_type:        self.loan_type,
      is_active:        self.is_active,
    })
  }
}

/// Raw column values read directly from a `goals` row.
pub struct RawGoal {
  pub id:             i64,
  pub goal_name:      String,
  pub target_amount:  String,
  pub current_amount: String,
  pub target_date:    Option<String>,
  pub goal_type:      String,
  pub description:    String,
  pub is_active:      bool,
}

impl RawGoal {
  pub fn into_goal(self) -> Result<Goal> {
    Ok(Goal {
      id:             self.id,
      goal_name:      self.goal_name,
      target_amount:  decode_decimal(&self.target_amount)?,
      current_amount: decode_decimal(&self.current_amount)?,
      target_date:    self.target_date.as_deref().map(decode_date).transpose()?,
      goal_type:      self.goal_type,
      description:    self.description,
      is_active:      self.is_active,
    })
  }
}
