//! [`MemoryStore`] — the in-memory implementation of [`FinanceStore`].

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::RwLock;

use fintrack_core::{
  Error, Result,
  contribution::{MonthlyContribution, recalculate_cumulative},
  goal::{Goal, NewGoal},
  history::{ChangeType, HistoryEntry, descriptions},
  investment::{Investment, InvestmentPatch, NewInvestment},
  loan::{Loan, LoanPayment, NewLoan, NewPayment},
  store::FinanceStore,
};

// ─── Sequences ───────────────────────────────────────────────────────────────

/// A store-scoped id sequence: unique and monotonically increasing within
/// one collection, starting at 1.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
  fn next(&mut self) -> i64 {
    self.0 += 1;
    self.0
  }
}

#[derive(Debug, Default)]
struct Sequences {
  investment:   Sequence,
  history:      Sequence,
  contribution: Sequence,
  loan:         Sequence,
  payment:      Sequence,
  goal:         Sequence,
}

// ─── Store ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Inner {
  investments:   Vec<Investment>,
  history:       Vec<HistoryEntry>,
  contributions: Vec<MonthlyContribution>,
  loans:         Vec<Loan>,
  payments:      Vec<LoanPayment>,
  goals:         Vec<Goal>,
  seq:           Sequences,
}

/// A fintrack store held entirely in process memory.
///
/// Cloning is cheap — the collections are reference-counted and shared.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
  /// Create an empty store.
  pub fn new() -> Self { Self::default() }
}

// ─── FinanceStore impl ───────────────────────────────────────────────────────

impl FinanceStore for MemoryStore {
  type Error = Error;

  // ── Investments ───────────────────────────────────────────────────────────

  async fn list_investments(&self) -> Result<Vec<Investment>> {
    let guard = self.inner.read().await;
    let mut investments = guard.investments.clone();
    investments.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Ok(investments)
  }

  async fn get_investment(&self, id: i64) -> Result<Option<Investment>> {
    let guard = self.inner.read().await;
    Ok(guard.investments.iter().find(|i| i.id == id).cloned())
  }

  async fn add_investment(&self, input: NewInvestment) -> Result<Investment> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let investment = input.into_investment(inner.seq.investment.next());
    let entry = HistoryEntry::capture(
      inner.seq.history.next(),
      &investment,
      ChangeType::Created,
      descriptions::CREATED,
    );

    inner.investments.push(investment.clone());
    inner.history.push(entry);
    Ok(investment)
  }

  async fn update_investment(
    &self,
    id: i64,
    patch: InvestmentPatch,
  ) -> Result<Investment> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let idx = inner
      .investments
      .iter()
      .position(|i| i.id == id)
      .ok_or(Error::InvestmentNotFound(id))?;

    let note = patch
      .change_description
      .clone()
      .unwrap_or_else(|| descriptions::UPDATED.to_owned());
    let entry_id = inner.seq.history.next();

    let investment = &mut inner.investments[idx];
    let entry =
      HistoryEntry::capture(entry_id, investment, ChangeType::Updated, note);
    investment.apply_patch(patch);
    let updated = investment.clone();

    inner.history.push(entry);
    Ok(updated)
  }

  async fn delete_investment(&self, id: i64) -> Result<()> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let idx = inner
      .investments
      .iter()
      .position(|i| i.id == id)
      .ok_or(Error::InvestmentNotFound(id))?;

    let entry_id = inner.seq.history.next();
    let investment = inner.investments.remove(idx);
    inner.history.push(HistoryEntry::capture(
      entry_id,
      &investment,
      ChangeType::Deleted,
      descriptions::DELETED,
    ));
    Ok(())
  }

  async fn investment_history(&self, id: i64) -> Result<Vec<HistoryEntry>> {
    let guard = self.inner.read().await;
    let mut entries: Vec<HistoryEntry> = guard
      .history
      .iter()
      .filter(|h| h.investment_id == id)
      .cloned()
      .collect();
    entries
      .sort_by(|a, b| b.changed_at.cmp(&a.changed_at).then(b.id.cmp(&a.id)));
    Ok(entries)
  }

  async fn restore_investment(
    &self,
    id: i64,
    version: i64,
  ) -> Result<Investment> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let idx = inner
      .investments
      .iter()
      .position(|i| i.id == id)
      .ok_or(Error::InvestmentNotFound(id))?;

    // Earliest entry with the requested version wins.
    let snapshot = inner
      .history
      .iter()
      .find(|h| h.investment_id == id && h.version == version)
      .cloned()
      .ok_or(Error::VersionNotFound { investment_id: id, version })?;

    let backup_id = inner.seq.history.next();
    let restored_id = inner.seq.history.next();

    let investment = &mut inner.investments[idx];
    let backup = HistoryEntry::capture(
      backup_id,
      investment,
      ChangeType::BackupBeforeRestore,
      descriptions::backup_before_restore(version),
    );
    investment.restore_from(&snapshot);
    let restored = HistoryEntry::capture(
      restored_id,
      investment,
      ChangeType::Restored,
      descriptions::restored_from(version),
    );
    let result = investment.clone();

    inner.history.push(backup);
    inner.history.push(restored);
    Ok(result)
  }

  // ── Monthly contributions ─────────────────────────────────────────────────

  async fn list_contributions(&self) -> Result<Vec<MonthlyContribution>> {
    let guard = self.inner.read().await;
    let mut contributions = guard.contributions.clone();
    contributions.sort_by_key(|c| (c.year, c.month));
    Ok(contributions)
  }

  async fn add_contribution(
    &self,
    year: i32,
    month: u32,
  ) -> Result<MonthlyContribution> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    if inner
      .contributions
      .iter()
      .any(|c| c.year == year && c.month == month)
    {
      return Err(Error::DuplicateMonth { year, month });
    }

    let id = inner.seq.contribution.next();
    let contribution = MonthlyContribution::new(id, year, month)?;
    inner.contributions.push(contribution);
    recalculate_cumulative(&mut inner.contributions);

    find_contribution(&inner.contributions, id)
  }

  async fn set_contribution_amount(
    &self,
    id: i64,
    amount: Decimal,
  ) -> Result<MonthlyContribution> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let contribution = inner
      .contributions
      .iter_mut()
      .find(|c| c.id == id)
      .ok_or(Error::ContributionNotFound(id))?;
    contribution.amount = amount;
    contribution.updated_at = chrono::Utc::now();
    recalculate_cumulative(&mut inner.contributions);

    find_contribution(&inner.contributions, id)
  }

  async fn delete_contribution(&self, id: i64) -> Result<()> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let idx = inner
      .contributions
      .iter()
      .position(|c| c.id == id)
      .ok_or(Error::ContributionNotFound(id))?;
    inner.contributions.remove(idx);
    recalculate_cumulative(&mut inner.contributions);
    Ok(())
  }

  // ── Loans ─────────────────────────────────────────────────────────────────

  async fn list_loans(&self) -> Result<Vec<Loan>> {
    let guard = self.inner.read().await;
    Ok(guard.loans.iter().filter(|l| l.is_active).cloned().collect())
  }

  async fn add_loan(&self, input: NewLoan) -> Result<Loan> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let loan = input.into_loan(inner.seq.loan.next());
    inner.loans.push(loan.clone());
    Ok(loan)
  }

  async fn record_loan_payment(
    &self,
    loan_id: i64,
    input: NewPayment,
  ) -> Result<(LoanPayment, Loan)> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let idx = inner
      .loans
      .iter()
      .position(|l| l.id == loan_id)
      .ok_or(Error::LoanNotFound(loan_id))?;
    let payment_id = inner.seq.payment.next();
    let loan = &mut inner.loans[idx];

    let payment = input.into_payment(payment_id, loan_id);
    loan.apply_payment(payment.principal_payment);
    let updated = loan.clone();

    inner.payments.push(payment.clone());
    Ok((payment, updated))
  }

  // ── Goals ─────────────────────────────────────────────────────────────────

  async fn list_goals(&self) -> Result<Vec<Goal>> {
    let guard = self.inner.read().await;
    Ok(guard.goals.iter().filter(|g| g.is_active).cloned().collect())
  }

  async fn add_goal(&self, input: NewGoal) -> Result<Goal> {
    let mut guard = self.inner.write().await;
    let inner = &mut *guard;

    let goal = input.into_goal(inner.seq.goal.next());
    inner.goals.push(goal.clone());
    Ok(goal)
  }

  async fn set_goal_amount(
    &self,
    id: i64,
    current_amount: Decimal,
  ) -> Result<Goal> {
    let mut guard = self.inner.write().await;
    let goal = guard
      .goals
      .iter_mut()
      .find(|g| g.id == id)
      .ok_or(Error::GoalNotFound(id))?;
    goal.current_amount = current_amount;
    Ok(goal.clone())
  }
}

/// Re-fetch a contribution after a recompute, post-recompute cumulative
/// included.
fn find_contribution(
  contributions: &[MonthlyContribution],
  id: i64,
) -> Result<MonthlyContribution> {
  contributions
    .iter()
    .find(|c| c.id == id)
    .cloned()
    .ok_or(Error::ContributionNotFound(id))
}
