//! # Casa Client
//!
//! The favorites reconciliation client for Casa. Sits between a UI and the
//! remote favorites API, giving instantaneous optimistic feedback while
//! keeping local state in agreement with server truth.
//!
//! - [`FavoritesClient`] is the reconciliation controller: load, add,
//!   remove, refresh, with optimistic index updates and exact rollback on
//!   failure.
//! - [`RemoteStore`] is the boundary to the server; [`HttpRemoteStore`] is
//!   the reqwest implementation against casa-server.
//! - [`SessionEvents`] / [`SessionWatcher`] connect auth transitions to the
//!   favorites lifecycle: login loads, logout clears.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use casa_client::{FavoritesClient, HttpRemoteStore, SessionEvent, SessionEvents, SessionWatcher};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let remote = HttpRemoteStore::new("https://api.example.com");
//! remote.set_token(Some("token-from-auth-layer".to_string()));
//!
//! let client = Arc::new(FavoritesClient::new(remote));
//! let events = SessionEvents::default();
//! let _watcher = SessionWatcher::spawn(client.clone(), &events);
//!
//! // The auth layer announces a login; the watcher loads favorites.
//! events.emit(SessionEvent::signed_in(12));
//!
//! // A UI subscribes to snapshots for rendering.
//! let mut snapshots = client.subscribe();
//! snapshots.changed().await.ok();
//! # }
//! ```

pub mod controller;
pub mod http;
pub mod remote;
pub mod watcher;

// Re-export main types at crate root
pub use controller::{
    AddOutcome, ClientError, FavoritesClient, FavoritesSnapshot, RemoveOutcome,
};
pub use http::HttpRemoteStore;
pub use remote::{RemoteError, RemoteResult, RemoteStore};
pub use watcher::{SessionEvent, SessionEvents, SessionWatcher};
