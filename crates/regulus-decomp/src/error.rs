//! Error types for the decomposition engine.

use thiserror::Error;

use regulus_matrix::InvalidPivot;

/// Errors that can abort a decomposition run.
///
/// Irregularity of the input is *not* an error; it is reported through
/// the regularity outcome.
#[derive(Clone, Debug, Error)]
pub enum DecompError {
    /// The wall-clock time limit expired. The partial decomposition tree
    /// built so far remains valid for inspection.
    #[error("time limit exceeded")]
    Timeout,

    /// The input matrix is malformed (entries outside the declared
    /// domain, or a view too small for the requested search).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A GF(2) pivot was requested on a zero entry. This indicates a
    /// logic bug and must never escape a correct pipeline.
    #[error(transparent)]
    InvalidPivot(#[from] InvalidPivot),
}
