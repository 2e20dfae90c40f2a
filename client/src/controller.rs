//! The reconciliation controller.
//!
//! Orchestrates load, add, remove, and session transitions against the
//! remote store, keeping the engine's membership index and cache in
//! agreement with server truth. Optimistic index updates happen before the
//! remote call suspends; commits and rollbacks happen after it resolves.
//! The store mutex is never held across an await.

use crate::remote::{RemoteError, RemoteStore};
use casa_engine::{
    Error as EngineError, FavoriteProperty, FavoritesStore, OpTicket, PropertyId, SessionState,
    Stage,
};
use std::collections::HashSet;
use std::sync::Mutex;
use tokio::sync::watch;

/// Errors surfaced to callers of the controller.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Result of an add operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The pair was created remotely.
    Added,
    /// The property was already a favorite; no remote call was made, or the
    /// server reported the pair as existing. Informational, not a failure.
    AlreadyFavorite,
}

/// Result of a remove operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The pair was deleted remotely.
    Removed,
    /// The property was not a favorite to begin with. Informational.
    NotFavorite,
}

/// A point-in-time view of favorites state, published to observers after
/// every settled change so a UI can render without polling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavoritesSnapshot {
    /// Whether a session is active
    pub authenticated: bool,
    /// Cached records, in server order
    pub favorites: Vec<FavoriteProperty>,
    /// Membership, including optimistic in-flight guesses
    pub favorite_ids: HashSet<PropertyId>,
}

/// The favorites client. Owns the engine store exclusively; the session
/// watcher and the UI only go through these methods.
pub struct FavoritesClient<R: RemoteStore> {
    store: Mutex<FavoritesStore>,
    remote: R,
    snapshot_tx: watch::Sender<FavoritesSnapshot>,
}

impl<R: RemoteStore> FavoritesClient<R> {
    /// Create a client around a remote store. State starts empty and
    /// signed out.
    pub fn new(remote: R) -> Self {
        let (snapshot_tx, _) = watch::channel(FavoritesSnapshot::default());
        Self {
            store: Mutex::new(FavoritesStore::new()),
            remote,
            snapshot_tx,
        }
    }

    /// Subscribe to state snapshots. The receiver always holds the latest
    /// published value.
    pub fn subscribe(&self) -> watch::Receiver<FavoritesSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Apply a session transition. Signing out clears cache and index
    /// synchronously; signing in leaves loading to the caller (the session
    /// watcher follows up with [`load_favorites`](Self::load_favorites)).
    /// Returns whether the state changed.
    pub fn set_session(&self, session: SessionState) -> bool {
        let mut store = self.store.lock().unwrap();
        let changed = store.set_session(session);
        if changed {
            self.publish(&store);
        }
        changed
    }

    /// O(1) membership check. Callable regardless of session state.
    pub fn is_favorite(&self, id: PropertyId) -> bool {
        self.store.lock().unwrap().is_favorite(id)
    }

    /// Snapshot of the cached records.
    pub fn favorites(&self) -> Vec<FavoriteProperty> {
        self.store.lock().unwrap().favorites().to_vec()
    }

    /// Load the full favorites list from the remote store.
    ///
    /// No-op while signed out. On failure the existing cache and index are
    /// left untouched (stale but consistent); on the very first load there
    /// is nothing to fall back to, so they simply stay empty.
    pub async fn load_favorites(&self) -> Result<(), ClientError> {
        let (user, epoch) = {
            let store = self.store.lock().unwrap();
            match store.session().user_id() {
                Some(user) => (user, store.epoch()),
                None => return Ok(()),
            }
        };

        match self.remote.list(user).await {
            Ok(properties) => {
                let mut store = self.store.lock().unwrap();
                if store.epoch() == epoch {
                    store.replace_all(properties);
                    self.publish(&store);
                } else {
                    tracing::debug!(user, "discarding favorites list from a previous session");
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(user, error = %err, "favorites load failed; keeping last known state");
                Err(err.into())
            }
        }
    }

    /// Reload from the server when authenticated; no-op otherwise.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        self.load_favorites().await
    }

    /// Add a property to favorites.
    ///
    /// The membership index is updated optimistically before the remote
    /// call and rolled back exactly if it fails. On success a full reload
    /// hydrates the cache, since the add response carries no property data.
    pub async fn add_to_favorites(&self, id: PropertyId) -> Result<AddOutcome, ClientError> {
        let (ticket, user) = {
            let mut store = self.store.lock().unwrap();
            let user = store
                .session()
                .user_id()
                .ok_or(EngineError::NotAuthenticated)?;
            match store.stage_add(id)? {
                Stage::Settled => return Ok(AddOutcome::AlreadyFavorite),
                Stage::Pending(ticket) => {
                    self.publish(&store);
                    (ticket, user)
                }
            }
        };

        match self.remote.add(user, id).await {
            Ok(()) => {
                self.settle_add(ticket)?;
                if let Err(err) = self.load_favorites().await {
                    // The index already reflects server truth; the cache
                    // catches up on the next successful reload.
                    tracing::warn!(%id, error = %err, "reload after add failed");
                }
                Ok(AddOutcome::Added)
            }
            Err(RemoteError::AlreadyFavorited) => {
                // Benign: the server agrees the pair exists. The cache does
                // not have the record yet, so hydrate it the same way.
                self.settle_add(ticket)?;
                if let Err(err) = self.load_favorites().await {
                    tracing::warn!(%id, error = %err, "reload after add failed");
                }
                Ok(AddOutcome::AlreadyFavorite)
            }
            Err(err) => {
                let mut store = self.store.lock().unwrap();
                match store.rollback_add(ticket) {
                    Ok(()) => self.publish(&store),
                    Err(EngineError::StaleOperation(_)) => {
                        tracing::debug!(%id, "discarding failed add from a previous session");
                    }
                    Err(other) => return Err(other.into()),
                }
                Err(err.into())
            }
        }
    }

    /// Remove a property from favorites. Mirror of
    /// [`add_to_favorites`](Self::add_to_favorites), except the cache is
    /// filtered directly on success; no reload is needed.
    pub async fn remove_from_favorites(
        &self,
        id: PropertyId,
    ) -> Result<RemoveOutcome, ClientError> {
        let (ticket, user) = {
            let mut store = self.store.lock().unwrap();
            let user = store
                .session()
                .user_id()
                .ok_or(EngineError::NotAuthenticated)?;
            match store.stage_remove(id)? {
                Stage::Settled => return Ok(RemoveOutcome::NotFavorite),
                Stage::Pending(ticket) => {
                    self.publish(&store);
                    (ticket, user)
                }
            }
        };

        match self.remote.remove(user, id).await {
            Ok(()) => {
                self.settle_remove(ticket)?;
                Ok(RemoveOutcome::Removed)
            }
            Err(RemoteError::NotFavorited) => {
                // Benign: the server agrees the pair is gone.
                self.settle_remove(ticket)?;
                Ok(RemoveOutcome::NotFavorite)
            }
            Err(err) => {
                let mut store = self.store.lock().unwrap();
                match store.rollback_remove(ticket) {
                    Ok(()) => self.publish(&store),
                    Err(EngineError::StaleOperation(_)) => {
                        tracing::debug!(%id, "discarding failed remove from a previous session");
                    }
                    Err(other) => return Err(other.into()),
                }
                Err(err.into())
            }
        }
    }

    fn settle_add(&self, ticket: OpTicket) -> Result<(), ClientError> {
        let mut store = self.store.lock().unwrap();
        match store.commit_add(ticket) {
            Ok(()) => {
                self.publish(&store);
                Ok(())
            }
            Err(err @ EngineError::StaleOperation(_)) => {
                tracing::debug!(id = %ticket.id, "discarding add result from a previous session");
                Err(err.into())
            }
            Err(other) => Err(other.into()),
        }
    }

    fn settle_remove(&self, ticket: OpTicket) -> Result<(), ClientError> {
        let mut store = self.store.lock().unwrap();
        match store.commit_remove(ticket) {
            Ok(()) => {
                self.publish(&store);
                Ok(())
            }
            Err(err @ EngineError::StaleOperation(_)) => {
                tracing::debug!(id = %ticket.id, "discarding remove result from a previous session");
                Err(err.into())
            }
            Err(other) => Err(other.into()),
        }
    }

    fn publish(&self, store: &FavoritesStore) {
        let snapshot = FavoritesSnapshot {
            authenticated: store.session().is_authenticated(),
            favorites: store.favorites().to_vec(),
            favorite_ids: store.favorite_ids().collect(),
        };
        self.snapshot_tx.send_replace(snapshot);
    }
}
