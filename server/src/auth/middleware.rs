//! Authentication middleware.
//!
//! Bearer tokens are resolved to user IDs against the auth_tokens table,
//! with a process-local cache in front so repeated requests from the same
//! session skip the database.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use casa_engine::UserId;
use dashmap::DashMap;

use crate::error::AppError;
use crate::{db, AppState};

/// Process-local token-to-user cache.
pub type TokenCache = DashMap<String, UserId>;

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The resolved user ID
    pub user_id: UserId,
    /// The bearer token the request carried
    #[allow(dead_code)]
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = match auth_header {
            Some(header) if header.starts_with("Bearer ") => {
                let token = header.trim_start_matches("Bearer ").to_string();
                if token.is_empty() {
                    tracing::debug!("empty bearer token");
                    return Err(AppError::Unauthorized);
                }
                token
            }
            Some(_) => {
                tracing::debug!("malformed authorization header");
                return Err(AppError::Unauthorized);
            }
            None => return Err(AppError::Unauthorized),
        };

        if let Some(user_id) = state.token_cache.get(&token) {
            return Ok(AuthUser {
                user_id: *user_id,
                token,
            });
        }

        match db::find_user_by_token(&state.pool, &token).await? {
            Some(user_id) => {
                state.token_cache.insert(token.clone(), user_id);
                Ok(AuthUser { user_id, token })
            }
            None => {
                tracing::debug!("unknown bearer token");
                Err(AppError::Unauthorized)
            }
        }
    }
}
