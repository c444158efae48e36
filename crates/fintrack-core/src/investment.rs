//! Investment records — the individually tracked, versioned collection.
//!
//! Investments are the only mutable records with an audit trail: every
//! mutation appends a snapshot to the history log (see [`crate::history`])
//! and bumps `version` by exactly one. Versions start at 1 and are never
//! reused, even when a restore makes the field values match an older
//! version bit for bit.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

/// Category applied when the caller supplies none.
pub const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
  pub id:          i64,
  pub amount:      Decimal,
  pub date:        NaiveDate,
  pub description: String,
  pub category:    String,
  /// Starts at 1; incremented by every update and every restore.
  pub version:     i64,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input to [`crate::store::FinanceStore::add_investment`].
#[derive(Debug, Clone)]
pub struct NewInvestment {
  pub amount:      Decimal,
  pub date:        NaiveDate,
  pub description: Option<String>,
  pub category:    Option<String>,
}

impl NewInvestment {
  /// Build the version-1 record. The store supplies `id`; both timestamps
  /// are stamped here.
  pub fn into_investment(self, id: i64) -> Investment {
    let now = Utc::now();
    Investment {
      id,
      amount: self.amount,
      date: self.date,
      description: self.description.unwrap_or_default(),
      category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
      version: 1,
      created_at: now,
      updated_at: now,
    }
  }
}

/// A partial update; `None` fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct InvestmentPatch {
  pub amount:      Option<Decimal>,
  pub date:        Option<NaiveDate>,
  pub description: Option<String>,
  pub category:    Option<String>,
  /// Caller-supplied note recorded on the history entry, not a field of the
  /// investment itself.
  pub change_description: Option<String>,
}

impl Investment {
  /// Apply the field updates in `patch`, stamp `updated_at`, and bump the
  /// version. The caller must snapshot the prior state into the history
  /// *before* calling this.
  pub fn apply_patch(&mut self, patch: InvestmentPatch) {
    if let Some(amount) = patch.amount {
      self.amount = amount;
    }
    if let Some(date) = patch.date {
      self.date = date;
    }
    if let Some(description) = patch.description {
      self.description = description;
    }
    if let Some(category) = patch.category {
      self.category = category;
    }
    self.updated_at = Utc::now();
    self.version += 1;
  }

  /// Copy the field values captured in `entry` back onto the investment.
  /// The version still moves forward: a restore is a new change, not a
  /// rewind of the version counter.
  pub fn restore_from(&mut self, entry: &HistoryEntry) {
    self.amount = entry.amount;
    self.date = entry.date;
    self.description = entry.description.clone();
    self.category = entry.category.clone();
    self.updated_at = Utc::now();
    self.version += 1;
  }
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;
  use crate::history::ChangeType;

  fn investment() -> Investment {
    NewInvestment {
      amount:      dec!(100),
      date:        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
      description: None,
      category:    None,
    }
    .into_investment(1)
  }

  #[test]
  fn new_investment_defaults() {
    let inv = investment();
    assert_eq!(inv.version, 1);
    assert_eq!(inv.description, "");
    assert_eq!(inv.category, DEFAULT_CATEGORY);
    assert_eq!(inv.created_at, inv.updated_at);
  }

  #[test]
  fn patch_keeps_unset_fields_and_bumps_version() {
    let mut inv = investment();
    inv.apply_patch(InvestmentPatch {
      amount: Some(dec!(150)),
      ..InvestmentPatch::default()
    });
    assert_eq!(inv.amount, dec!(150));
    assert_eq!(inv.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(inv.category, DEFAULT_CATEGORY);
    assert_eq!(inv.version, 2);
  }

  #[test]
  fn restore_copies_fields_but_not_version() {
    let mut inv = investment();
    let snapshot =
      HistoryEntry::capture(1, &inv, ChangeType::Created, "investment created");

    inv.apply_patch(InvestmentPatch {
      amount: Some(dec!(999)),
      description: Some("typo".into()),
      ..InvestmentPatch::default()
    });
    assert_eq!(inv.version, 2);

    inv.restore_from(&snapshot);
    assert_eq!(inv.amount, dec!(100));
    assert_eq!(inv.description, "");
    assert_eq!(inv.version, 3);
  }
}
