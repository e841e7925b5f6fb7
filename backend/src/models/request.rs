//! Loan request model
//!
//! The parameters a borrower submits: requested amount and posted
//! collateral value. Both are i64 integer minor units.
//!
//! The reference workflow accepts these values without validating sign
//! or range; they are illustrative form fields and never influence the
//! simulated outcome, timing, or risk score. They do feed the derived
//! loan-to-value ratio that a substituted risk evaluator may consult.
//!
//! CRITICAL: All money values are i64 (minor units)

use serde::{Deserialize, Serialize};

/// Loan parameters captured from a submission.
///
/// # Example
/// ```
/// use lending_workflow_core_rs::LoanRequest;
///
/// let request = LoanRequest::new(50_000, 65_000);
/// assert_eq!(request.loan_amount(), 50_000);
/// assert_eq!(request.collateral(), 65_000);
/// // 50_000 / 65_000 ≈ 76.92% loan-to-value
/// assert_eq!(request.ltv_bps(), Some(7_692));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Requested loan amount (minor units)
    loan_amount: i64,

    /// Posted collateral value (minor units)
    collateral: i64,
}

impl LoanRequest {
    /// Create a new loan request
    ///
    /// No validation is performed: zero or negative values pass through
    /// unchanged, matching the reference behavior.
    pub fn new(loan_amount: i64, collateral: i64) -> Self {
        Self {
            loan_amount,
            collateral,
        }
    }

    /// Requested loan amount (minor units)
    pub fn loan_amount(&self) -> i64 {
        self.loan_amount
    }

    /// Posted collateral value (minor units)
    pub fn collateral(&self) -> i64 {
        self.collateral
    }

    /// Loan-to-value ratio in basis points (10_000 = 100%)
    ///
    /// Returns `None` when collateral is zero, where the ratio is
    /// undefined. Integer math: truncates toward zero.
    pub fn ltv_bps(&self) -> Option<i64> {
        if self.collateral == 0 {
            return None;
        }
        Some(self.loan_amount.saturating_mul(10_000) / self.collateral)
    }
}
