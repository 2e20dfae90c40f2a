//! Favorites endpoint routes.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::auth::AuthUser;
use crate::error::Result;
use crate::handlers::{handle_add, handle_list, handle_remove, ListResponse, MutationResponse};
use crate::AppState;
use casa_engine::PropertyId;

/// Create favorites routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_handler))
        .route(
            "/favorites/{id}",
            post(add_handler).delete(remove_handler),
        )
}

/// GET /favorites - List the authenticated user's favorites.
async fn list_handler(State(state): State<AppState>, auth: AuthUser) -> Result<Json<ListResponse>> {
    let response = handle_list(&state.pool, auth.user_id).await?;
    Ok(Json(response))
}

/// POST /favorites/{id} - Add a property to favorites.
async fn add_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>> {
    let property: PropertyId = id.parse()?;
    let response = handle_add(&state.pool, auth.user_id, property).await?;
    Ok(Json(response))
}

/// DELETE /favorites/{id} - Remove a property from favorites.
async fn remove_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>> {
    let property: PropertyId = id.parse()?;
    let response = handle_remove(&state.pool, auth.user_id, property).await?;
    Ok(Json(response))
}
