//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fintrack_core::{
  Error as CoreError,
  history::ChangeType,
  investment::{InvestmentPatch, NewInvestment},
  loan::{NewLoan, NewPayment},
  goal::NewGoal,
  store::FinanceStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_investment(amount: Decimal) -> NewInvestment {
  NewInvestment {
    amount,
    date: date(2024, 1, 15),
    description: Some("index fund".into()),
    category: Some("funds".into()),
  }
}

fn expect_core(err: crate::Error) -> CoreError {
  match err {
    crate::Error::Core(e) => e,
    other => panic!("expected core error, got {other:?}"),
  }
}

// ─── Investments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_round_trips_all_fields() {
  let s = store().await;

  let created = s.add_investment(new_investment(dec!(5000.50))).await.unwrap();
  assert!(created.id > 0);
  assert_eq!(created.version, 1);

  let fetched = s.get_investment(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.amount, dec!(5000.50));
  assert_eq!(fetched.date, date(2024, 1, 15));
  assert_eq!(fetched.description, "index fund");
  assert_eq!(fetched.category, "funds");
  assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_investment(42).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_increase_monotonically() {
  let s = store().await;
  let a = s.add_investment(new_investment(dec!(1))).await.unwrap();
  let b = s.add_investment(new_investment(dec!(2))).await.unwrap();
  assert!(b.id > a.id);
}

#[tokio::test]
async fn list_sorts_by_date_descending() {
  let s = store().await;
  for (amount, day) in [(dec!(1), 10), (dec!(2), 25), (dec!(3), 5)] {
    s.add_investment(NewInvestment {
      amount,
      date: date(2024, 3, day),
      description: None,
      category: None,
    })
    .await
    .unwrap();
  }

  let amounts: Vec<Decimal> = s
    .list_investments()
    .await
    .unwrap()
    .iter()
    .map(|i| i.amount)
    .collect();
  assert_eq!(amounts, vec![dec!(2), dec!(1), dec!(3)]);
}

#[tokio::test]
async fn update_appends_pre_update_snapshot_and_bumps_version() {
  let s = store().await;
  let inv = s.add_investment(new_investment(dec!(100))).await.unwrap();

  let updated = s
    .update_investment(
      inv.id,
      InvestmentPatch {
        amount: Some(dec!(150)),
        change_description: Some("fix".into()),
        ..InvestmentPatch::default()
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.version, 2);
  assert_eq!(updated.amount, dec!(150));

  let history = s.investment_history(inv.id).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].change_type, ChangeType::Updated);
  assert_eq!(history[0].amount, dec!(100));
  assert_eq!(history[0].change_description, "fix");
  assert_eq!(history[1].change_type, ChangeType::Created);
}

#[tokio::test]
async fn update_missing_investment_errors() {
  let s = store().await;
  let err = s
    .update_investment(9, InvestmentPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(expect_core(err), CoreError::InvestmentNotFound(9)));
}

#[tokio::test]
async fn delete_keeps_history_queryable() {
  let s = store().await;
  let inv = s.add_investment(new_investment(dec!(100))).await.unwrap();

  s.delete_investment(inv.id).await.unwrap();
  assert!(s.get_investment(inv.id).await.unwrap().is_none());

  let history = s.investment_history(inv.id).await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].change_type, ChangeType::Deleted);
}

#[tokio::test]
async fn restore_applies_captured_values_and_logs_a_pair() {
  let s = store().await;
  let inv = s.add_investment(new_investment(dec!(100))).await.unwrap();
  s.update_investment(
    inv.id,
    InvestmentPatch {
      amount: Some(dec!(150)),
      ..InvestmentPatch::default()
    },
  )
  .await
  .unwrap();

  let restored = s.restore_investment(inv.id, 1).await.unwrap();
  assert_eq!(restored.amount, dec!(100));
  assert_eq!(restored.version, 3);

  let history = s.investment_history(inv.id).await.unwrap();
  assert_eq!(history.len(), 4);
  assert_eq!(history[0].change_type, ChangeType::Restored);
  assert_eq!(history[1].change_type, ChangeType::BackupBeforeRestore);
  assert_eq!(history[1].amount, dec!(150));

  // The stored row reflects the restore as well.
  let fetched = s.get_investment(inv.id).await.unwrap().unwrap();
  assert_eq!(fetched.amount, dec!(100));
  assert_eq!(fetched.version, 3);
}

#[tokio::test]
async fn restore_to_missing_version_errors_without_side_effects() {
  let s = store().await;
  let inv = s.add_investment(new_investment(dec!(100))).await.unwrap();

  let err = s.restore_investment(inv.id, 5).await.unwrap_err();
  assert!(matches!(
    expect_core(err),
    CoreError::VersionNotFound { version: 5, .. }
  ));
  assert_eq!(s.investment_history(inv.id).await.unwrap().len(), 1);
}

// ─── Monthly contributions ───────────────────────────────────────────────────

#[tokio::test]
async fn contributions_accumulate_in_calendar_order() {
  let s = store().await;
  let feb = s.add_contribution(2024, 2).await.unwrap();
  let jan = s.add_contribution(2024, 1).await.unwrap();

  s.set_contribution_amount(jan.id, dec!(5000)).await.unwrap();
  let feb_updated =
    s.set_contribution_amount(feb.id, dec!(3000)).await.unwrap();
  assert_eq!(feb_updated.cumulative, dec!(8000));

  let rows = s.list_contributions().await.unwrap();
  assert_eq!(rows[0].month, 1);
  assert_eq!(rows[0].month_name, "January 2024");
  assert_eq!(rows[1].cumulative, dec!(8000));
}

#[tokio::test]
async fn duplicate_month_is_rejected() {
  let s = store().await;
  s.add_contribution(2024, 7).await.unwrap();
  let err = s.add_contribution(2024, 7).await.unwrap_err();
  assert!(matches!(
    expect_core(err),
    CoreError::DuplicateMonth { year: 2024, month: 7 }
  ));
}

#[tokio::test]
async fn month_out_of_range_is_rejected() {
  let s = store().await;
  let err = s.add_contribution(2024, 0).await.unwrap_err();
  assert!(matches!(expect_core(err), CoreError::MonthOutOfRange(0)));
}

#[tokio::test]
async fn delete_contribution_recomputes_cumulatives() {
  let s = store().await;
  let jan = s.add_contribution(2024, 1).await.unwrap();
  let feb = s.add_contribution(2024, 2).await.unwrap();
  s.set_contribution_amount(jan.id, dec!(1000)).await.unwrap();
  s.set_contribution_amount(feb.id, dec!(500)).await.unwrap();

  s.delete_contribution(jan.id).await.unwrap();

  let rows = s.list_contributions().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].cumulative, dec!(500));
}

#[tokio::test]
async fn set_amount_on_missing_contribution_errors() {
  let s = store().await;
  let err = s.set_contribution_amount(9, dec!(1)).await.unwrap_err();
  assert!(matches!(expect_core(err), CoreError::ContributionNotFound(9)));
}

// ─── Loans ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn loan_payment_decrements_persisted_balance() {
  let s = store().await;
  let loan = s
    .add_loan(NewLoan {
      principal_amount: dec!(10000),
      current_balance:  dec!(1000),
      interest_rate:    Some(dec!(4.5)),
      monthly_payment:  None,
      start_date:       date(2023, 1, 1),
      description:      None,
      lender:           Some("credit union".into()),
      loan_type:        Some("mortgage".into()),
    })
    .await
    .unwrap();

  let (payment, updated) = s
    .record_loan_payment(
      loan.id,
      NewPayment {
        payment_amount:    dec!(1500),
        principal_payment: None,
        payment_date:      date(2024, 2, 1),
        description:       None,
      },
    )
    .await
    .unwrap();
  assert!(payment.id > 0);
  assert_eq!(updated.current_balance, Decimal::ZERO);

  // Re-read from the database, not just the returned struct.
  let listed = s.list_loans().await.unwrap();
  assert_eq!(listed[0].current_balance, Decimal::ZERO);
  assert_eq!(listed[0].interest_rate, dec!(4.5));
}

#[tokio::test]
async fn payment_against_missing_loan_errors() {
  let s = store().await;
  let err = s
    .record_loan_payment(
      9,
      NewPayment {
        payment_amount:    dec!(100),
        principal_payment: None,
        payment_date:      date(2024, 2, 1),
        description:       None,
      },
    )
    .await
    .unwrap_err();
  assert!(matches!(expect_core(err), CoreError::LoanNotFound(9)));
}

// ─── Goals ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn goal_round_trips_including_optional_target_date() {
  let s = store().await;
  let goal = s
    .add_goal(NewGoal {
      goal_name:      "house deposit".into(),
      target_amount:  dec!(400000),
      current_amount: Some(dec!(120000)),
      target_date:    Some(date(2026, 6, 1)),
      goal_type:      None,
      description:    None,
    })
    .await
    .unwrap();

  let listed = s.list_goals().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].goal_name, "house deposit");
  assert_eq!(listed[0].target_date, Some(date(2026, 6, 1)));
  assert_eq!(listed[0].goal_type, "savings");

  let updated = s.set_goal_amount(goal.id, dec!(150000)).await.unwrap();
  assert_eq!(updated.current_amount, dec!(150000));
}

#[tokio::test]
async fn set_amount_on_missing_goal_errors() {
  let s = store().await;
  let err = s.set_goal_amount(9, dec!(1)).await.unwrap_err();
  assert!(matches!(expect_core(err), CoreError::GoalNotFound(9)));
}
