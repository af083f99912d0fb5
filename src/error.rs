//! Error taxonomy for the search pipeline.
//!
//! Tokenizing never fails, and "no match" is a successful empty response,
//! so only three things can go wrong between a request and its answer.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The request carried no usable text. Raised before any storage access.
    #[error("message must not be empty")]
    InvalidInput,

    /// The table store could not be read. Nothing collected so far is kept.
    #[error("storage failure: {0:#}")]
    Storage(#[source] anyhow::Error),

    #[error("search timed out after {0:?}")]
    Timeout(Duration),
}

impl SearchError {
    /// Machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidInput => "bad_request",
            SearchError::Storage(_) => "internal",
            SearchError::Timeout(_) => "timeout",
        }
    }
}
