//! Savings goals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Goal type applied when the caller supplies none.
pub const DEFAULT_GOAL_TYPE: &str = "savings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
  pub id:             i64,
  pub goal_name:      String,
  pub target_amount:  Decimal,
  pub current_amount: Decimal,
  pub target_date:    Option<NaiveDate>,
  pub goal_type:      String,
  pub description:    String,
  pub is_active:      bool,
}

/// Input to [`crate::store::FinanceStore::add_goal`].
#[derive(Debug, Clone)]
pub struct NewGoal {
  pub goal_name:      String,
  pub target_amount:  Decimal,
  pub current_amount: Option<Decimal>,
  pub target_date:    Option<NaiveDate>,
  pub goal_type:      Option<String>,
  pub description:    Option<String>,
}

impl NewGoal {
  /// Build the active goal record. The store supplies `id`.
  pub fn into_goal(self, id: i64) -> Goal {
    Goal {
      id,
      goal_name: self.goal_name,
      target_amount: self.target_amount,
      current_amount: self.current_amount.unwrap_or(Decimal::ZERO),
      target_date: self.target_date,
      goal_type: self.goal_type.unwrap_or_else(|| DEFAULT_GOAL_TYPE.to_owned()),
      description: self.description.unwrap_or_default(),
      is_active: true,
    }
  }
}

impl Goal {
  /// Percentage of the target reached, clamped to [0, 100].
  /// Zero when the target is zero (no divide-by-zero).
  pub fn progress(&self) -> Decimal {
    if self.target_amount <= Decimal::ZERO {
      return Decimal::ZERO;
    }
    let percent = self.current_amount / self.target_amount * Decimal::from(100);
    percent.clamp(Decimal::ZERO, Decimal::from(100))
  }
}
