//! Pluggable backend services
//!
//! The workflow's business outcomes (risk verdict, compliance proof,
//! on-chain receipt) live behind strategy traits so that a
//! real integration can replace a simulated one without touching the
//! timeline's sequencing. The defaults in [`fixed`] return hardcoded
//! outcomes on a fixed clock; that is the entire point of this system.
//!
//! All three services are infallible here: every scheduled step
//! unconditionally succeeds with its service's outcome. There is no
//! retry or error path because there is no real fallible operation.

use crate::models::receipt::VerificationReceipt;
use crate::models::request::LoanRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod fixed;

// Re-exports
pub use fixed::{
    DigestProofGenerator, FixedRiskEvaluator, LtvThresholdEvaluator, TestnetStubVerifier,
};

/// Verdict of a risk evaluation.
///
/// The timeline never branches on this: a rejection still flows through
/// the remaining stages. Surfacing rejection as a distinct terminal
/// state is a known gap of the reference behavior, deliberately not
/// papered over here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskDecision {
    Approved,
    Rejected,
}

impl fmt::Display for RiskDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskDecision::Approved => f.write_str("APPROVED"),
            RiskDecision::Rejected => f.write_str("REJECTED"),
        }
    }
}

/// Outcome of a risk evaluation: a 0-100 style score and a verdict.
///
/// Renders the way the run log reports it:
///
/// ```
/// use lending_workflow_core_rs::services::{RiskAssessment, RiskDecision};
///
/// let assessment = RiskAssessment::new(82, RiskDecision::Approved);
/// assert_eq!(assessment.to_string(), "APPROVED (Score: 82/100)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk score; the reference model reports it on a /100 scale
    pub score: u8,

    /// The verdict
    pub decision: RiskDecision,
}

impl RiskAssessment {
    /// Create an assessment
    pub fn new(score: u8, decision: RiskDecision) -> Self {
        Self { score, decision }
    }
}

impl fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Score: {}/100)", self.decision, self.score)
    }
}

/// An opaque compliance proof artifact.
///
/// Only the digest string travels onward; no statement, witness, or
/// circuit exists in this design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceProof {
    /// Hex-encoded commitment digest binding the assessment to the
    /// request
    pub digest: String,
}

/// Evaluates the risk of a loan request.
///
/// Implementations decide when (if ever) the request's numbers matter;
/// the default returns constants regardless of input.
pub trait RiskEvaluator {
    /// Produce an assessment for the given request
    fn evaluate(&mut self, request: &LoanRequest) -> RiskAssessment;
}

/// Produces a compliance proof over an assessment.
pub trait ProofGenerator {
    /// Produce a proof binding the assessment to the request
    fn prove(&mut self, request: &LoanRequest, assessment: &RiskAssessment) -> ComplianceProof;
}

/// Verifies a proof on chain and issues a receipt.
pub trait ChainVerifier {
    /// Verify the proof and return the resulting receipt
    fn verify(&mut self, proof: &ComplianceProof) -> VerificationReceipt;
}

/// Risk evaluator selection, resolved to a concrete evaluator by the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RiskPolicyConfig {
    /// Fixed outcome: the reference constants (approve, score 82)
    Fixed {
        /// Reported risk score
        score: u8,
    },

    /// Approve iff loan-to-value stays under a threshold; score is the
    /// LTV in percent
    LtvThreshold {
        /// Maximum acceptable LTV in basis points (10_000 = 100%)
        max_ltv_bps: i64,
    },
}

impl Default for RiskPolicyConfig {
    fn default() -> Self {
        RiskPolicyConfig::Fixed {
            score: fixed::DEFAULT_RISK_SCORE,
        }
    }
}
