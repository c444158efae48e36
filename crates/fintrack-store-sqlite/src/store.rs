//! [`SqliteStore`] — the SQLite implementation of [`FinanceStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use rust_decimal::Decimal;

use fintrack_core::{
  Error as CoreError,
  contribution::{MonthlyContribution, recalculate_cumulative},
  goal::{Goal, NewGoal},
  history::{ChangeType, HistoryEntry, descriptions},
  investment::{Investment, InvestmentPatch, NewInvestment},
  loan::{Loan, LoanPayment, NewLoan, NewPayment},
  store::FinanceStore,
};

use crate::{
  Result,
  encode::{
    RawContribution, RawGoal, RawHistoryEntry, RawInvestment, RawLoan,
    encode_date, encode_decimal, encode_dt,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fintrack store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Shared investment plumbing ────────────────────────────────────────────

  async fn fetch_investment(&self, id: i64) -> Result<Option<Investment>> {
    let raw: Option<RawInvestment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, amount, date, description, category, version,
                      created_at, updated_at
               FROM investments WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawInvestment {
                  id:          row.get(0)?,
                  amount:      row.get(1)?,
                  date:        row.get(2)?,
                  description: row.get(3)?,
                  category:    row.get(4)?,
                  version:     row.get(5)?,
                  created_at:  row.get(6)?,
                  updated_at:  row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawInvestment::into_investment).transpose()
  }

  /// Rewrite every mutable column of an investment row.
  async fn write_investment(&self, investment: &Investment) -> Result<()> {
    let id          = investment.id;
    let amount      = encode_decimal(investment.amount);
    let date        = encode_date(investment.date);
    let description = investment.description.clone();
    let category    = investment.category.clone();
    let version     = investment.version;
    let updated_at  = encode_dt(investment.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE investments
           SET amount = ?2, date = ?3, description = ?4, category = ?5,
               version = ?6, updated_at = ?7
           WHERE id = ?1",
          rusqlite::params![
            id, amount, date, description, category, version, updated_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Append one history entry. The `id` on `entry` is ignored — the column
  /// is assigned by SQLite.
  async fn insert_history(&self, entry: HistoryEntry) -> Result<()> {
    let investment_id      = entry.investment_id;
    let amount             = encode_decimal(entry.amount);
    let date               = encode_date(entry.date);
    let description        = entry.description;
    let category           = entry.category;
    let version            = entry.version;
    let change_type        = entry.change_type.as_str();
    let change_description = entry.change_description;
    let changed_at         = encode_dt(entry.changed_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO investment_history (
             investment_id, amount, date, description, category,
             version, change_type, change_description, changed_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            investment_id,
            amount,
            date,
            description,
            category,
            version,
            change_type,
            change_description,
            changed_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Shared contribution plumbing ──────────────────────────────────────────

  async fn fetch_contribution(
    &self,
    id: i64,
  ) -> Result<Option<MonthlyContribution>> {
    let raw: Option<RawContribution> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, year, month, month_name, amount, cumulative,
                      created_at, updated_at
               FROM monthly_contributions WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawContribution {
                  id:         row.get(0)?,
                  year:       row.get(1)?,
                  month:      row.get(2)?,
                  month_name: row.get(3)?,
                  amount:     row.get(4)?,
                  cumulative: row.get(5)?,
                  created_at: row.get(6)?,
                  updated_at: row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContribution::into_contribution).transpose()
  }

  /// Recompute every cumulative value and write the changed column back.
  /// One UPDATE per row; the sequence is not transactional (see crate docs).
  async fn recalculate_contributions(&self) -> Result<()> {
    let mut rows = self.list_contributions().await?;
    recalculate_cumulative(&mut rows);

    let updates: Vec<(i64, String)> = rows
      .iter()
      .map(|r| (r.id, encode_decimal(r.cumulative)))
      .collect();

    self
      .conn
      .call(move |conn| {
        for (id, cumulative) in updates {
          conn.execute(
            "UPDATE monthly_contributions SET cumulative = ?2 WHERE id = ?1",
            rusqlite::params![id, cumulative],
          )?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Shared loan / goal plumbing ───────────────────────────────────────────

  async fn fetch_loan(&self, id: i64) -> Result<Option<Loan>> {
    let raw: Option<RawLoan> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, principal_amount, current_balance, interest_rate,
                      monthly_payment, start_date, description, lender,
                      loan_type, is_active
               FROM loans WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawLoan {
                  id:               row.get(0)?,
                  principal_amount: row.get(1)?,
                  current_balance:  row.get(2)?,
                  interest_rate:    row.get(3)?,
                  monthly_payment:  row.get(4)?,
                  start_date:       row.get(5)?,
                  description:      row.get(6)?,
                  lender:           row.get(7)?,
                  loan_type:        row.get(8)?,
                  is_active:        row.get(9)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLoan::into_loan).transpose()
  }

  async fn fetch_goal(&self, id: i64) -> Result<Option<Goal>> {
    let raw: Option<RawGoal> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, goal_name, target_amount, current_amount,
                      target_date, goal_type, description, is_active
               FROM goals WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawGoal {
                  id:             row.get(0)?,
                  goal_name:      row.get(1)?,
                  target_amount:  row.get(2)?,
                  current_amount: row.get(3)?,
                  target_date:    row.get(4)?,
                  goal_type:      row.get(5)?,
                  description:    row.get(6)?,
                  is_active:      row.get(7)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawGoal::into_goal).transpose()
  }
}

// ─── FinanceStore impl ───────────────────────────────────────────────────────

impl FinanceStore for SqliteStore {
  type Error = crate::Error;

  // ── Investments ───────────────────────────────────────────────────────────

  async fn list_investments(&self) -> Result<Vec<Investment>> {
    let raws: Vec<RawInvestment> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, amount, date, description, category, version,
                  created_at, updated_at
           FROM investments
           ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawInvestment {
              id:          row.get(0)?,
              amount:      row.get(1)?,
              date:        row.get(2)?,
              description: row.get(3)?,
              category:    row.get(4)?,
              version:     row.get(5)?,
              created_at:  row.get(6)?,
              updated_at:  row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInvestment::into_investment).collect()
  }

  async fn get_investment(&self, id: i64) -> Result<Option<Investment>> {
    self.fetch_investment(id).await
  }

  async fn add_investment(&self, input: NewInvestment) -> Result<Investment> {
    // The id column is assigned by SQLite; 0 is a placeholder.
    let investment = input.into_investment(0);

    let amount      = encode_decimal(investment.amount);
    let date        = encode_date(investment.date);
    let description = investment.description.clone();
    let category    = investment.category.clone();
    let created_at  = encode_dt(investment.created_at);
    let updated_at  = encode_dt(investment.updated_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO investments (
             amount, date, description, category, version,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6)",
          rusqlite::params![
            amount, date, description, category, created_at, updated_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    let investment = Investment { id, ..investment };
    self
      .insert_history(HistoryEntry::capture(
        0,
        &investment,
        ChangeType::Created,
        descriptions::CREATED,
      ))
      .await?;

    Ok(investment)
  }

  async fn update_investment(
    &self,
    id: i64,
    patch: InvestmentPatch,
  ) -> Result<Investment> {
    let mut investment = self
      .fetch_investment(id)
      .await?
      .ok_or(CoreError::InvestmentNotFound(id))?;

    let note = patch
      .change_description
      .clone()
      .unwrap_or_else(|| descriptions::UPDATED.to_owned());
    self
      .insert_history(HistoryEntry::capture(
        0,
        &investment,
        ChangeType::Updated,
        note,
      ))
      .await?;

    investment.apply_patch(patch);
    self.write_investment(&investment).await?;
    Ok(investment)
  }

  async fn delete_investment(&self, id: i64) -> Result<()> {
    let investment = self
      .fetch_investment(id)
      .await?
      .ok_or(CoreError::InvestmentNotFound(id))?;

    self
      .insert_history(HistoryEntry::capture(
        0,
        &investment,
        ChangeType::Deleted,
        descriptions::DELETED,
      ))
      .await?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM investments WHERE id = ?1",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn investment_history(&self, id: i64) -> Result<Vec<HistoryEntry>> {
    let raws: Vec<RawHistoryEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, investment_id, amount, date, description, category,
                  version, change_type, change_description, changed_at
           FROM investment_history
           WHERE investment_id = ?1
           ORDER BY changed_at DESC, id DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(RawHistoryEntry {
              id:                 row.get(0)?,
              investment_id:      row.get(1)?,
              amount:             row.get(2)?,
              date:               row.get(3)?,
              description:        row.get(4)?,
              category:           row.get(5)?,
              version:            row.get(6)?,
              change_type:        row.get(7)?,
              change_description: row.get(8)?,
              changed_at:         row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistoryEntry::into_entry).collect()
  }

  async fn restore_investment(
    &self,
    id: i64,
    version: i64,
  ) -> Result<Investment> {
    let mut investment = self
      .fetch_investment(id)
      .await?
      .ok_or(CoreError::InvestmentNotFound(id))?;

    // Earliest entry with the requested version wins.
    let raw: Option<RawHistoryEntry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, investment_id, amount, date, description, category,
                      version, change_type, change_description, changed_at
               FROM investment_history
               WHERE investment_id = ?1 AND version = ?2
               ORDER BY id ASC
               LIMIT 1",
              rusqlite::params![id, version],
              |row| {
                Ok(RawHistoryEntry {
                  id:                 row.get(0)?,
                  investment_id:      row.get(1)?,
                  amount:             row.get(2)?,
                  date:               row.get(3)?,
                  description:        row.get(4)?,
                  category:           row.get(5)?,
                  version:            row.get(6)?,
                  change_type:        row.get(7)?,
                  change_description: row.get(8)?,
                  changed_at:         row.get(9)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    let snapshot = raw
      .map(RawHistoryEntry::into_entry)
      .transpose()?
      .ok_or(CoreError::VersionNotFound { investment_id: id, version })?;

    self
      .insert_history(HistoryEntry::capture(
        0,
        &investment,
        ChangeType::BackupBeforeRestore,
        descriptions::backup_before_restore(version),
      ))
      .await?;

    investment.restore_from(&snapshot);
    self.write_investment(&investment).await?;

    self
      .insert_history(HistoryEntry::capture(
        0,
        &investment,
        ChangeType::Restored,
        descriptions::restored_from(version),
      ))
      .await?;

    Ok(investment)
  }

  // ── Monthly contributions ─────────────────────────────────────────────────

  async fn list_contributions(&self) -> Result<Vec<MonthlyContribution>> {
    let raws: Vec<RawContribution> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, year, month, month_name, amount, cumulative,
                  created_at, updated_at
           FROM monthly_contributions
           ORDER BY year, month",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawContribution {
              id:         row.get(0)?,
              year:       row.get(1)?,
              month:      row.get(2)?,
              month_name: row.get(3)?,
              amount:     row.get(4)?,
              cumulative: row.get(5)?,
              created_at: row.get(6)?,
              updated_at: row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawContribution::into_contribution)
      .collect()
  }

  async fn add_contribution(
    &self,
    year: i32,
    month: u32,
  ) -> Result<MonthlyContribution> {
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM monthly_contributions
               WHERE year = ?1 AND month = ?2",
              rusqlite::params![year, month],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    if exists {
      return Err(CoreError::DuplicateMonth { year, month }.into());
    }

    // Validates the month range and derives the display label.
    let contribution = MonthlyContribution::new(0, year, month)
      .map_err(crate::Error::Core)?;

    let month_name = contribution.month_name.clone();
    let amount     = encode_decimal(contribution.amount);
    let cumulative = encode_decimal(contribution.cumulative);
    let created_at = encode_dt(contribution.created_at);
    let updated_at = encode_dt(contribution.updated_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO monthly_contributions (
             year, month, month_name, amount, cumulative,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            year, month, month_name, amount, cumulative, created_at,
            updated_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    self.recalculate_contributions().await?;
    self
      .fetch_contribution(id)
      .await?
      .ok_or_else(|| CoreError::ContributionNotFound(id).into())
  }

  async fn set_contribution_amount(
    &self,
    id: i64,
    amount: Decimal,
  ) -> Result<MonthlyContribution> {
    if self.fetch_contribution(id).await?.is_none() {
      return Err(CoreError::ContributionNotFound(id).into());
    }

    let amount_str = encode_decimal(amount);
    let updated_at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE monthly_contributions
           SET amount = ?2, updated_at = ?3
           WHERE id = ?1",
          rusqlite::params![id, amount_str, updated_at],
        )?;
        Ok(())
      })
      .await?;

    self.recalculate_contributions().await?;
    self
      .fetch_contribution(id)
      .await?
      .ok_or_else(|| CoreError::ContributionNotFound(id).into())
  }

  async fn delete_contribution(&self, id: i64) -> Result<()> {
    if self.fetch_contribution(id).await?.is_none() {
      return Err(CoreError::ContributionNotFound(id).into());
    }

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM monthly_contributions WHERE id = ?1",
          rusqlite::params![id],
        )?;
        Ok(())
      })
      .await?;

    self.recalculate_contributions().await
  }

  // ── Loans ─────────────────────────────────────────────────────────────────

  async fn list_loans(&self) -> Result<Vec<Loan>> {
    let raws: Vec<RawLoan> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, principal_amount, current_balance, interest_rate,
                  monthly_payment, start_date, description, lender,
                  loan_type, is_active
           FROM loans
           WHERE is_active = 1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawLoan {
              id:               row.get(0)?,
              principal_amount: row.get(1)?,
              current_balance:  row.get(2)?,
              interest_rate:    row.get(3)?,
              monthly_payment:  row.get(4)?,
              start_date:       row.get(5)?,
              description:      row.get(6)?,
              lender:           row.get(7)?,
              loan_type:        row.get(8)?,
              is_active:        row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLoan::into_loan).collect()
  }

  async fn add_loan(&self, input: NewLoan) -> Result<Loan> {
    let loan = input.into_loan(0);

    let principal_amount = encode_decimal(loan.principal_amount);
    let current_balance  = encode_decimal(loan.current_balance);
    let interest_rate    = encode_decimal(loan.interest_rate);
    let monthly_payment  = encode_decimal(loan.monthly_payment);
    let start_date       = encode_date(loan.start_date);
    let description      = loan.description.clone();
    let lender           = loan.lender.clone();
    let loan_type        = loan.loan_type.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO loans (
             principal_amount, current_balance, interest_rate,
             monthly_payment, start_date, description, lender, loan_type,
             is_active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)",
          rusqlite::params![
            principal_amount,
            current_balance,
            interest_rate,
            monthly_payment,
            start_date,
            description,
            lender,
            loan_type,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Loan { id, ..loan })
  }

  async fn record_loan_payment(
    &self,
    loan_id: i64,
    input: NewPayment,
  ) -> Result<(LoanPayment, Loan)> {
    let mut loan = self
      .fetch_loan(loan_id)
      .await?
      .ok_or(CoreError::LoanNotFound(loan_id))?;

    let payment = input.into_payment(0, loan_id);

    let payment_amount    = encode_decimal(payment.payment_amount);
    let principal_payment = encode_decimal(payment.principal_payment);
    let payment_date      = encode_date(payment.payment_date);
    let description       = payment.description.clone();
    let created_at        = encode_dt(payment.created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO loan_payments (
             loan_id, payment_amount, principal_payment, payment_date,
             description, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            loan_id,
            payment_amount,
            principal_payment,
            payment_date,
            description,
            created_at,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    let payment = LoanPayment { id, ..payment };

    loan.apply_payment(payment.principal_payment);
    let balance = encode_decimal(loan.current_balance);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE loans SET current_balance = ?2 WHERE id = ?1",
          rusqlite::params![loan_id, balance],
        )?;
        Ok(())
      })
      .await?;

    Ok((payment, loan))
  }

  // ── Goals ─────────────────────────────────────────────────────────────────

  async fn list_goals(&self) -> Result<Vec<Goal>> {
    let raws: Vec<RawGoal> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, goal_name, target_amount, current_amount, target_date,
                  goal_type, description, is_active
           FROM goals
           WHERE is_active = 1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawGoal {
              id:             row.get(0)?,
              goal_name:      row.get(1)?,
              target_amount:  row.get(2)?,
              current_amount: row.get(3)?,
              target_date:    row.get(4)?,
              goal_type:      row.get(5)?,
              description:    row.get(6)?,
              is_active:      row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGoal::into_goal).collect()
  }

  async fn add_goal(&self, input: NewGoal) -> Result<Goal> {
    let goal = input.into_goal(0);

    let goal_name      = goal.goal_name.clone();
    let target_amount  = encode_decimal(goal.target_amount);
    let current_amount = encode_decimal(goal.current_amount);
    let target_date    = goal.target_date.map(encode_date);
    let goal_type      = goal.goal_type.clone();
    let description    = goal.description.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO goals (
             goal_name, target_amount, current_amount, target_date,
             goal_type, description, is_active
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)",
          rusqlite::params![
            goal_name,
            target_amount,
            current_amount,
            target_date,
            goal_type,
            description,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Goal { id, ..goal })
  }

  async fn set_goal_amount(
    &self,
    id: i64,
    current_amount: Decimal,
  ) -> Result<Goal> {
    let mut goal = self
      .fetch_goal(id)
      .await?
      .ok_or(CoreError::GoalNotFound(id))?;

    let amount_str = encode_decimal(current_amount);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE goals SET current_amount = ?2 WHERE id = ?1",
          rusqlite::params![id, amount_str],
        )?;
        Ok(())
      })
      .await?;

    goal.current_amount = current_amount;
    Ok(goal)
  }
}
