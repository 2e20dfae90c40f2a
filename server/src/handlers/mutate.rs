//! Mutation handlers - create and delete (user, property) pairs.
//!
//! Failure classification is part of the wire contract: a duplicate add is
//! 409, an absent pair or unknown property is 404. Clients treat the first
//! two as benign agreement with server state.

use crate::db;
use crate::error::{AppError, Result};
use casa_engine::{PropertyId, UserId};
use serde::Serialize;
use sqlx::PgPool;

/// Response for add and remove.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    /// "added" or "removed"
    pub status: &'static str,
    /// The affected property
    pub property_id: PropertyId,
}

/// Create a favorite pair for the user.
pub async fn handle_add(
    pool: &PgPool,
    user: UserId,
    property: PropertyId,
) -> Result<MutationResponse> {
    match db::insert_favorite(pool, user, property).await {
        Ok(()) => Ok(MutationResponse {
            status: "added",
            property_id: property,
        }),
        Err(e) if db::is_unique_violation(&e) => Err(AppError::Conflict(format!(
            "property {property} is already a favorite"
        ))),
        Err(e) if db::is_foreign_key_violation(&e) => Err(AppError::NotFound(format!(
            "property {property} does not exist"
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Delete a favorite pair for the user.
pub async fn handle_remove(
    pool: &PgPool,
    user: UserId,
    property: PropertyId,
) -> Result<MutationResponse> {
    if db::delete_favorite(pool, user, property).await? {
        Ok(MutationResponse {
            status: "removed",
            property_id: property,
        })
    } else {
        Err(AppError::NotFound(format!(
            "property {property} is not a favorite"
        )))
    }
}
