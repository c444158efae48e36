//! The append-only audit log for investments.
//!
//! Entries are immutable snapshots of an investment's fields at the moment
//! a change happened. Once written, no entry is ever updated or deleted —
//! deleting an investment leaves its history queryable.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, investment::Investment};

/// What kind of change an entry records. The serialised name doubles as the
/// discriminant stored by persistent backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
  Created,
  Updated,
  Deleted,
  Restored,
  BackupBeforeRestore,
}

impl ChangeType {
  /// The discriminant string stored in the `change_type` column.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Created => "created",
      Self::Updated => "updated",
      Self::Deleted => "deleted",
      Self::Restored => "restored",
      Self::BackupBeforeRestore => "backup_before_restore",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "created" => Ok(Self::Created),
      "updated" => Ok(Self::Updated),
      "deleted" => Ok(Self::Deleted),
      "restored" => Ok(Self::Restored),
      "backup_before_restore" => Ok(Self::BackupBeforeRestore),
      other => Err(Error::UnknownChangeType(other.to_owned())),
    }
  }
}

/// Stock change descriptions recorded when the caller supplies none.
pub mod descriptions {
  pub const CREATED: &str = "investment created";
  pub const UPDATED: &str = "investment updated";
  pub const DELETED: &str = "investment deleted";

  pub fn backup_before_restore(version: i64) -> String {
    format!("backup before restore to version {version}")
  }

  pub fn restored_from(version: i64) -> String {
    format!("restored from version {version}")
  }
}

/// An immutable snapshot of one investment change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub id:                 i64,
  pub investment_id:      i64,
  pub amount:             Decimal,
  pub date:               NaiveDate,
  pub description:        String,
  pub category:           String,
  /// The investment's version at capture time: the pre-mutation version for
  /// `updated`, `deleted`, and `backup_before_restore` entries, the
  /// post-mutation version for `created` and `restored` entries.
  pub version:            i64,
  pub change_type:        ChangeType,
  pub change_description: String,
  pub changed_at:         DateTime<Utc>,
}

impl HistoryEntry {
  /// Snapshot `investment`'s current field values. The store supplies `id`;
  /// `changed_at` is stamped here.
  pub fn capture(
    id: i64,
    investment: &Investment,
    change_type: ChangeType,
    change_description: impl Into<String>,
  ) -> Self {
    Self {
      id,
      investment_id: investment.id,
      amount: investment.amount,
      date: investment.date,
      description: investment.description.clone(),
      category: investment.category.clone(),
      version: investment.version,
      change_type,
      change_description: change_description.into(),
      changed_at: Utc::now(),
    }
  }
}
