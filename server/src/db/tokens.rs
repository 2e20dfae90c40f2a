//! Database operations for the auth_tokens table.

use casa_engine::UserId;
use sqlx::{PgPool, Row};

/// Resolve a bearer token to a user, if the token is known.
pub async fn find_user_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<UserId>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id
        FROM auth_tokens
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("user_id")?)),
        None => Ok(None),
    }
}
