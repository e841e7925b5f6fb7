//! Default service implementations
//!
//! These are the simulated backends the timeline runs against: fixed
//! outcomes, no I/O, no failure path. `LtvThresholdEvaluator` is the one
//! exception to "ignore the inputs": it reproduces the loan-to-value
//! rule the demo's risk model applies, for callers who want the request
//! numbers to matter.

use crate::models::receipt::VerificationReceipt;
use crate::models::request::LoanRequest;
use crate::services::{
    ChainVerifier, ComplianceProof, ProofGenerator, RiskAssessment, RiskDecision, RiskEvaluator,
};
use sha2::{Digest, Sha256};

/// Risk score the reference behavior always reports
pub const DEFAULT_RISK_SCORE: u8 = 82;

/// Default loan-to-value approval threshold: 80.00%
pub const DEFAULT_MAX_LTV_BPS: i64 = 8_000;

/// Placeholder transaction id issued by the stub verifier
pub const SIMULATED_TRANSACTION_ID: &str = "at1...z9y (Simulated)";

/// Always approves with a fixed score, ignoring the request entirely.
///
/// This is the reference behavior: the loan amount and collateral are
/// illustrative form fields with no influence on the outcome.
#[derive(Debug, Clone)]
pub struct FixedRiskEvaluator {
    score: u8,
}

impl FixedRiskEvaluator {
    /// Create an evaluator reporting the given score
    pub fn new(score: u8) -> Self {
        Self { score }
    }
}

impl Default for FixedRiskEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_SCORE)
    }
}

impl RiskEvaluator for FixedRiskEvaluator {
    fn evaluate(&mut self, _request: &LoanRequest) -> RiskAssessment {
        RiskAssessment::new(self.score, RiskDecision::Approved)
    }
}

/// Approves iff the request's loan-to-value ratio stays under a
/// threshold; the score is the LTV expressed in percent.
///
/// A request with zero collateral has no defined ratio and is rejected
/// at maximum score.
///
/// # Example
/// ```
/// use lending_workflow_core_rs::services::{LtvThresholdEvaluator, RiskDecision, RiskEvaluator};
/// use lending_workflow_core_rs::LoanRequest;
///
/// let mut evaluator = LtvThresholdEvaluator::default();
/// let assessment = evaluator.evaluate(&LoanRequest::new(50_000, 65_000));
/// assert_eq!(assessment.decision, RiskDecision::Approved);
/// assert_eq!(assessment.score, 76); // 76.92% LTV, truncated
/// ```
#[derive(Debug, Clone)]
pub struct LtvThresholdEvaluator {
    max_ltv_bps: i64,
}

impl LtvThresholdEvaluator {
    /// Create an evaluator with the given approval threshold (basis
    /// points)
    pub fn new(max_ltv_bps: i64) -> Self {
        Self { max_ltv_bps }
    }
}

impl Default for LtvThresholdEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LTV_BPS)
    }
}

impl RiskEvaluator for LtvThresholdEvaluator {
    fn evaluate(&mut self, request: &LoanRequest) -> RiskAssessment {
        match request.ltv_bps() {
            Some(bps) => {
                let score = (bps / 100).clamp(0, u8::MAX as i64) as u8;
                let decision = if bps < self.max_ltv_bps {
                    RiskDecision::Approved
                } else {
                    RiskDecision::Rejected
                };
                RiskAssessment::new(score, decision)
            }
            None => RiskAssessment::new(u8::MAX, RiskDecision::Rejected),
        }
    }
}

/// Fabricates an opaque commitment digest in place of a real proof.
///
/// SHA-256 over (verdict bit, score, loan amount, collateral), enough
/// to look like a binding commitment in a console, derived from nothing
/// secret.
#[derive(Debug, Clone, Default)]
pub struct DigestProofGenerator;

impl ProofGenerator for DigestProofGenerator {
    fn prove(&mut self, request: &LoanRequest, assessment: &RiskAssessment) -> ComplianceProof {
        let verdict_bit = match assessment.decision {
            RiskDecision::Approved => 1u8,
            RiskDecision::Rejected => 0u8,
        };

        let mut hasher = Sha256::new();
        hasher.update([verdict_bit, assessment.score]);
        hasher.update(request.loan_amount().to_le_bytes());
        hasher.update(request.collateral().to_le_bytes());
        let result = hasher.finalize();

        ComplianceProof {
            digest: format!("{:x}", result),
        }
    }
}

/// Issues a confirmed receipt with a fixed placeholder transaction id,
/// accepting any proof.
#[derive(Debug, Clone)]
pub struct TestnetStubVerifier {
    transaction_id: String,
}

impl TestnetStubVerifier {
    /// Create a verifier issuing the given transaction id
    pub fn new(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
        }
    }
}

impl Default for TestnetStubVerifier {
    fn default() -> Self {
        Self::new(SIMULATED_TRANSACTION_ID)
    }
}

impl ChainVerifier for TestnetStubVerifier {
    fn verify(&mut self, _proof: &ComplianceProof) -> VerificationReceipt {
        VerificationReceipt::confirmed(self.transaction_id.clone())
    }
}
