//! Error types for the Casa favorites engine.

use crate::PropertyId;
use thiserror::Error;

/// All possible errors from the favorites engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Precondition errors
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("invalid property id: {0}")]
    InvalidPropertyId(String),

    // Concurrency errors
    #[error("operation already in flight for property {0}")]
    OperationInFlight(PropertyId),

    #[error("stale operation for property {0}: session changed while in flight")]
    StaleOperation(PropertyId),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
