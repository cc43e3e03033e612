//! Error surface for model construction and evaluation.
//!
//! Every variant is a structural or modeling validation failure detected
//! eagerly at construction, so invalid models never reach the
//! combinatorial searches. Nothing here is retryable: all computation is
//! pure and deterministic.

use crate::{Value, Variable};

/// Convenience alias used across the workspace.
pub type CausalResult<T> = Result<T, CausalError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CausalError {
    /// The structural-equation graph is not acyclic.
    #[error("cycle detected in causal network at {variable}")]
    CycleDetected { variable: Variable },

    /// A computed endogenous value fell outside its declared domain.
    #[error("value {value} for {variable} is outside its declared domain")]
    DomainViolation { variable: Variable, value: Value },

    /// Context keys do not match the exogenous set, or domain keys do not
    /// match the endogenous set.
    #[error("signature mismatch: expected {{{expected}}}, got {{{actual}}}")]
    SignatureMismatch { expected: String, actual: String },

    /// Epistemic-state context weights do not sum to 1 within tolerance.
    #[error("context weights sum to {total}, expected 1")]
    ProbabilityNormalization { total: f64 },

    /// An endogenous node has no bound structural equation. Unreachable
    /// through the public builder; kept as an evaluation-time guard.
    #[error("no structural equation bound for {variable}")]
    MissingEquation { variable: Variable },
}
