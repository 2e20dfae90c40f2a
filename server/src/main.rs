//! Casa Server - Favorites API for real estate listings.
//!
//! This server exposes the favorites endpoints consumed by casa-client:
//! listing a user's favorited properties as denormalized card projections,
//! and creating or deleting (user, property) pairs.

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod routes;

use crate::auth::TokenCache;
use crate::config::Config;
use crate::db::Pool;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub config: Arc<Config>,
    pub token_cache: Arc<TokenCache>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casa_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Casa Server on {}:{}", config.host, config.port);

    // Connect to the database and apply pending migrations
    let pool = db::connect_and_migrate(&config).await?;

    // Build application state
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        token_cache: Arc::new(TokenCache::new()),
    };

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
