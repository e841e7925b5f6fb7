//! Verification receipt model
//!
//! The terminal artifact of a run: a transaction identifier and a
//! confirmation status, produced when the workflow reaches `Verified`.
//! The reference behavior issues a fixed placeholder identifier; the
//! value is not derived from any real ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confirmation status of an on-chain verification.
///
/// The reference workflow has exactly one outcome; the enum leaves room
/// for a real verifier to report something else without changing the
/// receipt's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    /// Proof accepted and recorded
    Confirmed,
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptStatus::Confirmed => f.write_str("CONFIRMED"),
        }
    }
}

/// Receipt issued when a run's proof is verified on chain.
///
/// # Example
/// ```
/// use lending_workflow_core_rs::{ReceiptStatus, VerificationReceipt};
///
/// let receipt = VerificationReceipt::confirmed("at1...z9y (Simulated)");
/// assert_eq!(receipt.transaction_id(), "at1...z9y (Simulated)");
/// assert_eq!(receipt.status(), ReceiptStatus::Confirmed);
/// assert_eq!(receipt.status().to_string(), "CONFIRMED");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReceipt {
    /// Ledger transaction identifier (a placeholder in this design)
    transaction_id: String,

    /// Confirmation status
    status: ReceiptStatus,
}

impl VerificationReceipt {
    /// Create a confirmed receipt for the given transaction id
    pub fn confirmed(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            status: ReceiptStatus::Confirmed,
        }
    }

    /// The ledger transaction identifier
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The confirmation status
    pub fn status(&self) -> ReceiptStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_receipt() {
        let receipt = VerificationReceipt::confirmed("tx_abc");
        assert_eq!(receipt.transaction_id(), "tx_abc");
        assert_eq!(receipt.status(), ReceiptStatus::Confirmed);
    }

    #[test]
    fn test_status_serializes_screaming() {
        let json = serde_json::to_string(&ReceiptStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
    }
}
