//! Loans and loan payments.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loan type applied when the caller supplies none.
pub const DEFAULT_LOAN_TYPE: &str = "general";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
  pub id:               i64,
  pub principal_amount: Decimal,
  /// Decreases as payments are applied; clamped at zero, never negative.
  pub current_balance:  Decimal,
  /// Annual rate in percent, e.g. `4.5`.
  pub interest_rate:    Decimal,
  pub monthly_payment:  Decimal,
  pub start_date:       NaiveDate,
  pub description:      String,
  pub lender:           String,
  pub loan_type:        String,
  pub is_active:        bool,
}

/// Input to [`crate::store::FinanceStore::add_loan`].
#[derive(Debug, Clone)]
pub struct NewLoan {
  pub principal_amount: Decimal,
  pub current_balance:  Decimal,
  pub interest_rate:    Option<Decimal>,
  pub monthly_payment:  Option<Decimal>,
  pub start_date:       NaiveDate,
  pub description:      Option<String>,
  pub lender:           Option<String>,
  pub loan_type:        Option<String>,
}

impl NewLoan {
  /// Build the active loan record. The store supplies `id`.
  pub fn into_loan(self, id: i64) -> Loan {
    Loan {
      id,
      principal_amount: self.principal_amount,
      current_balance: self.current_balance,
      interest_rate: self.interest_rate.unwrap_or(Decimal::ZERO),
      monthly_payment: self.monthly_payment.unwrap_or(Decimal::ZERO),
      start_date: self.start_date,
      description: self.description.unwrap_or_default(),
      lender: self.lender.unwrap_or_default(),
      loan_type: self.loan_type.unwrap_or_else(|| DEFAULT_LOAN_TYPE.to_owned()),
      is_active: true,
    }
  }
}

impl Loan {
  /// Decrement the balance by the principal portion of a payment, clamping
  /// at zero.
  pub fn apply_payment(&mut self, principal: Decimal) {
    self.current_balance = (self.current_balance - principal).max(Decimal::ZERO);
  }
}

/// A recorded payment against a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanPayment {
  pub id:                i64,
  pub loan_id:           i64,
  pub payment_amount:    Decimal,
  /// The portion applied against the balance. Defaults to the full payment
  /// when the caller does not split out interest.
  pub principal_payment: Decimal,
  pub payment_date:      NaiveDate,
  pub description:       String,
  pub created_at:        DateTime<Utc>,
}

/// Input to [`crate::store::FinanceStore::record_loan_payment`].
#[derive(Debug, Clone)]
pub struct NewPayment {
  pub payment_amount:    Decimal,
  pub principal_payment: Option<Decimal>,
  pub payment_date:      NaiveDate,
  pub description:       Option<String>,
}

impl NewPayment {
  /// Build the payment record. The store supplies `id` and the owning loan.
  pub fn into_payment(self, id: i64, loan_id: i64) -> LoanPayment {
    LoanPayment {
      id,
      loan_id,
      principal_payment: self.principal_payment.unwrap_or(self.payment_amount),
      payment_amount: self.payment_amount,
      payment_date: self.payment_date,
      description: self.description.unwrap_or_default(),
      created_at: Utc::now(),
    }
  }
}
