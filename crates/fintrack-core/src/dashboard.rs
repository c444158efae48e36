//! Derived dashboard metrics — never stored, always computed on read.

use num_traits::ToPrimitive as _;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{contribution::MonthlyContribution, goal::Goal, loan::Loan};

/// The aggregated metrics object served to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
  /// Sum of all monthly contribution amounts. Individual investments are
  /// tracked separately and do not feed this total.
  pub total_investments:   Decimal,
  /// Sum of current balances over active loans.
  pub total_debts:         Decimal,
  /// `total_investments - total_debts`; may be negative, never clamped.
  pub net_worth:           Decimal,
  pub goals:               GoalsSummary,
  /// Cumulative contribution series for charting, (year, month) ascending.
  pub monthly_investments: Vec<MonthlyPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummary {
  pub total_goals:     usize,
  pub total_saved:     Decimal,
  pub total_target:    Decimal,
  /// `round(100 * saved / target)` over active goals, half away from zero.
  /// Zero when there is no target; not clamped — overshooting goals push
  /// the aggregate past 100.
  pub completion_rate: i64,
}

/// One point of the cumulative chart series, keyed `"YYYY-MM"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPoint {
  pub month: String,
  pub total: Decimal,
}

/// Aggregate the dashboard from the three collections it reads.
pub fn compute(
  contributions: &[MonthlyContribution],
  loans: &[Loan],
  goals: &[Goal],
) -> Dashboard {
  let total_investments: Decimal =
    contributions.iter().map(|c| c.amount).sum();

  let total_debts: Decimal = loans
    .iter()
    .filter(|l| l.is_active)
    .map(|l| l.current_balance)
    .sum();

  let active: Vec<&Goal> = goals.iter().filter(|g| g.is_active).collect();
  let total_saved: Decimal = active.iter().map(|g| g.current_amount).sum();
  let total_target: Decimal = active.iter().map(|g| g.target_amount).sum();
  let completion_rate = if total_target > Decimal::ZERO {
    (total_saved / total_target * Decimal::from(100))
      .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
      .to_i64()
      .unwrap_or(0)
  } else {
    0
  };

  let mut sorted: Vec<&MonthlyContribution> = contributions.iter().collect();
  sorted.sort_by_key(|c| (c.year, c.month));
  let monthly_investments = sorted
    .into_iter()
    .map(|c| MonthlyPoint {
      month: format!("{}-{:02}", c.year, c.month),
      total: c.cumulative,
    })
    .collect();

  Dashboard {
    total_investments,
    total_debts,
    net_worth: total_investments - total_debts,
    goals: GoalsSummary {
      total_goals: active.len(),
      total_saved,
      total_target,
      completion_rate,
    },
    monthly_investments,
  }
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;
  use crate::{
    contribution::recalculate_cumulative,
    goal::NewGoal,
    loan::NewLoan,
  };

  fn contribution(id: i64, year: i32, month: u32, amount: Decimal) -> MonthlyContribution {
    let mut row = MonthlyContribution::new(id, year, month).unwrap();
    row.amount = amount;
    row
  }

  fn loan(id: i64, balance: Decimal, active: bool) -> Loan {
    let mut l = NewLoan {
      principal_amount: dec!(100000),
      current_balance:  balance,
      interest_rate:    None,
      monthly_payment:  None,
      start_date:       chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
      description:      None,
      lender:           None,
      loan_type:        None,
    }
    .into_loan(id);
    l.is_active = active;
    l
  }

  fn goal(id: i64, current: Decimal, target: Decimal, active: bool) -> Goal {
    let mut g = NewGoal {
      goal_name:      format!("goal {id}"),
      target_amount:  target,
      current_amount: Some(current),
      target_date:    None,
      goal_type:      None,
      description:    None,
    }
    .into_goal(id);
    g.is_active = active;
    g
  }

  #[test]
  fn empty_store_yields_all_zeroes() {
    let d = compute(&[], &[], &[]);
    assert_eq!(d.total_investments, Decimal::ZERO);
    assert_eq!(d.total_debts, Decimal::ZERO);
    assert_eq!(d.net_worth, Decimal::ZERO);
    assert_eq!(d.goals.completion_rate, 0);
    assert!(d.monthly_investments.is_empty());
  }

  #[test]
  fn net_worth_subtracts_active_loan_balances() {
    let contributions = vec![contribution(1, 2024, 1, dec!(5000))];
    let loans = vec![
      loan(1, dec!(3000), true),
      loan(2, dec!(99999), false), // inactive, ignored
    ];
    let d = compute(&contributions, &loans, &[]);
    assert_eq!(d.total_investments, dec!(5000));
    assert_eq!(d.total_debts, dec!(3000));
    assert_eq!(d.net_worth, dec!(2000));
  }

  #[test]
  fn net_worth_may_go_negative() {
    let loans = vec![loan(1, dec!(7000), true)];
    let d = compute(&[], &loans, &[]);
    assert_eq!(d.net_worth, dec!(-7000));
  }

  #[test]
  fn completion_rate_rounds_half_away_from_zero() {
    // 125 / 1000 => 12.5% => rounds to 13, not banker's 12.
    let goals = vec![goal(1, dec!(125), dec!(1000), true)];
    let d = compute(&[], &[], &goals);
    assert_eq!(d.goals.completion_rate, 13);
  }

  #[test]
  fn completion_rate_aggregate_is_not_clamped() {
    let goals = vec![goal(1, dec!(150), dec!(100), true)];
    let d = compute(&[], &[], &goals);
    assert_eq!(d.goals.completion_rate, 150);
  }

  #[test]
  fn inactive_goals_are_excluded() {
    let goals = vec![
      goal(1, dec!(50), dec!(100), true),
      goal(2, dec!(0), dec!(100000), false),
    ];
    let d = compute(&[], &[], &goals);
    assert_eq!(d.goals.total_goals, 1);
    assert_eq!(d.goals.total_target, dec!(100));
    assert_eq!(d.goals.completion_rate, 50);
  }

  #[test]
  fn monthly_series_uses_cumulative_totals_in_order() {
    let mut contributions = vec![
      contribution(2, 2024, 2, dec!(3000)),
      contribution(1, 2024, 1, dec!(5000)),
    ];
    recalculate_cumulative(&mut contributions);

    let d = compute(&contributions, &[], &[]);
    let series: Vec<(&str, Decimal)> = d
      .monthly_investments
      .iter()
      .map(|p| (p.month.as_str(), p.total))
      .collect();
    assert_eq!(series, vec![("2024-01", dec!(5000)), ("2024-02", dec!(8000))]);
  }
}
