//! The remote favorites store boundary.
//!
//! The server owns the (user, property) pairs and their conflict rules. The
//! client treats every call as a fallible, latency-bound RPC with no retry
//! and no bounded response time, and surfaces the server's error kinds
//! distinctly so the UI can tell a benign conflict from a transport failure
//! from an expired session.

use async_trait::async_trait;
use casa_engine::{FavoriteProperty, PropertyId, UserId};
use thiserror::Error;

/// Errors surfaced by the remote favorites store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The pair already exists; server-enforced uniqueness. Benign.
    #[error("property is already in favorites")]
    AlreadyFavorited,

    /// The pair does not exist. Benign.
    #[error("property is not in favorites")]
    NotFavorited,

    /// The property itself does not exist.
    #[error("property not found: {0}")]
    PropertyNotFound(PropertyId),

    /// The token is invalid or expired; the UI should prompt re-login.
    #[error("unauthorized")]
    Unauthorized,

    /// Transport-level failure. Transient; the user action may be retried.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered but the payload could not be decoded. Treated
    /// like a network failure for rollback purposes.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl RemoteError {
    /// Whether this error is a benign conflict rather than a failure.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::AlreadyFavorited | Self::NotFavorited)
    }
}

/// Result type for remote store calls.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// The three operations the reconciliation controller consumes.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// List the user's favorites as denormalized projections, in server
    /// order.
    async fn list(&self, user: UserId) -> RemoteResult<Vec<FavoriteProperty>>;

    /// Record a (user, property) pair. Fails with
    /// [`RemoteError::AlreadyFavorited`] if the pair exists and
    /// [`RemoteError::PropertyNotFound`] if the property does not.
    async fn add(&self, user: UserId, id: PropertyId) -> RemoteResult<()>;

    /// Delete a (user, property) pair. Fails with
    /// [`RemoteError::NotFavorited`] if the pair does not exist.
    async fn remove(&self, user: UserId, id: PropertyId) -> RemoteResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_classification() {
        assert!(RemoteError::AlreadyFavorited.is_benign());
        assert!(RemoteError::NotFavorited.is_benign());
        assert!(!RemoteError::Unauthorized.is_benign());
        assert!(!RemoteError::Network("timeout".into()).is_benign());
        assert!(!RemoteError::MalformedResponse("truncated".into()).is_benign());
    }

    #[test]
    fn error_display() {
        let id = PropertyId::new(4).unwrap();
        assert_eq!(
            RemoteError::PropertyNotFound(id).to_string(),
            "property not found: 4"
        );
        assert_eq!(
            RemoteError::Network("connection refused".into()).to_string(),
            "network error: connection refused"
        );
    }
}
