//! Session state driving the favorites lifecycle.
//!
//! Transitions are driven externally (login, logout, token expiry) and are
//! the sole trigger for cache lifecycle events: signing in triggers a load,
//! signing out clears everything synchronously.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// Authentication state as seen by the favorites store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SessionState {
    /// No valid session
    SignedOut,
    /// Authenticated as the given user
    SignedIn { user_id: UserId },
}

impl SessionState {
    /// Create a signed-in state for a user.
    pub fn signed_in(user_id: UserId) -> Self {
        Self::SignedIn { user_id }
    }

    /// Whether the session is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    /// The authenticated user, if any.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::SignedOut => None,
            Self::SignedIn { user_id } => Some(*user_id),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::SignedOut
    }
}
