//! The `FinanceStore` trait — the persistence boundary.
//!
//! The trait is implemented by storage backends (`fintrack-store-memory`,
//! `fintrack-store-sqlite`). Higher layers (`fintrack-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use rust_decimal::Decimal;

use crate::{
  contribution::MonthlyContribution,
  goal::{Goal, NewGoal},
  history::HistoryEntry,
  investment::{Investment, InvestmentPatch, NewInvestment},
  loan::{Loan, LoanPayment, NewLoan, NewPayment},
};

/// Abstraction over a fintrack storage backend.
///
/// Identifiers are `i64`, assigned by the store, unique and monotonically
/// increasing within each collection. Every mutation of an investment is
/// mirrored into an append-only history log; every mutation of the monthly
/// contribution collection triggers a full cumulative recompute.
///
/// Each method is one logical operation. There is no cross-method
/// transaction: a crash between the two writes of a versioned update can
/// leave the history and the live record inconsistent. That window is an
/// accepted limitation of the design, not something backends paper over.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait FinanceStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Investments ───────────────────────────────────────────────────────

  /// List all investments, newest date first.
  fn list_investments(
    &self,
  ) -> impl Future<Output = Result<Vec<Investment>, Self::Error>> + Send + '_;

  /// Retrieve one investment. Returns `None` if not found.
  fn get_investment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Investment>, Self::Error>> + Send + '_;

  /// Create an investment at version 1 and seed its history with a
  /// `created` entry.
  fn add_investment(
    &self,
    input: NewInvestment,
  ) -> impl Future<Output = Result<Investment, Self::Error>> + Send + '_;

  /// Snapshot the current state into the history, then apply `patch` and
  /// bump the version by exactly one.
  fn update_investment(
    &self,
    id: i64,
    patch: InvestmentPatch,
  ) -> impl Future<Output = Result<Investment, Self::Error>> + Send + '_;

  /// Append a `deleted` snapshot and remove the investment from the live
  /// set. Its history remains queryable afterwards.
  fn delete_investment(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All history entries for an investment, most recent change first.
  fn investment_history(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Vec<HistoryEntry>, Self::Error>> + Send + '_;

  /// Restore an investment to the field values captured at `version`.
  ///
  /// Fails with a not-found error if the investment is missing or its
  /// history has no entry for `version` (the earliest matching entry wins
  /// when the creation entry and a later snapshot share a version number).
  /// Otherwise appends a `backup_before_restore` snapshot of the current
  /// state, copies the captured values, bumps the version, and appends a
  /// `restored` snapshot — two new entries per restore. Restoring to the
  /// current version is permitted and still appends both entries.
  fn restore_investment(
    &self,
    id: i64,
    version: i64,
  ) -> impl Future<Output = Result<Investment, Self::Error>> + Send + '_;

  // ── Monthly contributions ─────────────────────────────────────────────

  /// List all contributions ordered by (year, month) ascending.
  fn list_contributions(
    &self,
  ) -> impl Future<Output = Result<Vec<MonthlyContribution>, Self::Error>> + Send + '_;

  /// Add a month with a zero amount, then recompute cumulatives.
  /// Rejects duplicate (year, month) pairs and months outside 1–12.
  fn add_contribution(
    &self,
    year: i32,
    month: u32,
  ) -> impl Future<Output = Result<MonthlyContribution, Self::Error>> + Send + '_;

  /// Set a month's amount, then recompute cumulatives. Returns the record
  /// with its post-recompute cumulative value.
  fn set_contribution_amount(
    &self,
    id: i64,
    amount: Decimal,
  ) -> impl Future<Output = Result<MonthlyContribution, Self::Error>> + Send + '_;

  /// Remove a month, then recompute cumulatives.
  fn delete_contribution(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Loans ─────────────────────────────────────────────────────────────

  /// List active loans.
  fn list_loans(
    &self,
  ) -> impl Future<Output = Result<Vec<Loan>, Self::Error>> + Send + '_;

  fn add_loan(
    &self,
    input: NewLoan,
  ) -> impl Future<Output = Result<Loan, Self::Error>> + Send + '_;

  /// Record a payment and decrement the loan balance by its principal
  /// portion, clamped at zero. Returns the payment and the updated loan.
  fn record_loan_payment(
    &self,
    loan_id: i64,
    input: NewPayment,
  ) -> impl Future<Output = Result<(LoanPayment, Loan), Self::Error>> + Send + '_;

  // ── Goals ─────────────────────────────────────────────────────────────

  /// List active goals.
  fn list_goals(
    &self,
  ) -> impl Future<Output = Result<Vec<Goal>, Self::Error>> + Send + '_;

  fn add_goal(
    &self,
    input: NewGoal,
  ) -> impl Future<Output = Result<Goal, Self::Error>> + Send + '_;

  /// Overwrite a goal's current saved amount.
  fn set_goal_amount(
    &self,
    id: i64,
    current_amount: Decimal,
  ) -> impl Future<Output = Result<Goal, Self::Error>> + Send + '_;
}
