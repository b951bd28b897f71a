//! Error type returned by every view query.

use thiserror::Error;

/// Failure of a view query. No query ever returns partial results.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Loan batch inputs of different lengths.
    #[error("parameter mismatch: {assets} assets but {token_ids} token ids")]
    ParamsMismatch { assets: usize, token_ids: usize },

    /// A collaborator read failed; the upstream error is passed through as is.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// Result alias for view queries.
pub type Result<T, E = ViewError> = std::result::Result<T, E>;
