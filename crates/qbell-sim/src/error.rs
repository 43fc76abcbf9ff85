//! Error types for the simulation engine.

use thiserror::Error;

/// Errors produced by the statevector engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A caller-supplied argument is out of range (e.g. zero shots).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qbell_ir::IrError),

    /// The outcome distribution could not be sampled.
    #[error("Cannot sample outcome distribution: {0}")]
    Sampling(String),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
