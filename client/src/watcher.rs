//! Session watcher.
//!
//! The auth layer announces session transitions on an in-process event bus;
//! the watcher subscribes, deduplicates repeated signals, and drives the
//! favorites lifecycle: a transition to authenticated triggers a full load,
//! a transition to signed-out clears cache and index synchronously.
//!
//! The original browser design listened on two channels (a same-tab custom
//! event and a cross-tab storage event); here that collapses into a single
//! broadcast bus, which any number of producers and watchers can share.

use crate::controller::FavoritesClient;
use crate::remote::RemoteStore;
use casa_engine::{SessionState, UserId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// An auth-state-changed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEvent {
    /// Whether a session is now active
    pub authenticated: bool,
    /// The authenticated user, when `authenticated` is true
    pub user: Option<UserId>,
}

impl SessionEvent {
    /// Signal a completed login.
    pub fn signed_in(user: UserId) -> Self {
        Self {
            authenticated: true,
            user: Some(user),
        }
    }

    /// Signal a logout or token expiry.
    pub fn signed_out() -> Self {
        Self {
            authenticated: false,
            user: None,
        }
    }
}

/// The session event bus. Clone-cheap handle around a broadcast channel.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a bus buffering up to `capacity` undelivered events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a session transition to all subscribers. Returns the number
    /// of subscribers that will observe it.
    pub fn emit(&self, event: SessionEvent) -> usize {
        // A send error only means nobody is listening yet
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Watches the session bus and drives a favorites client.
pub struct SessionWatcher;

impl SessionWatcher {
    /// Spawn the watcher task. It runs until the event bus is dropped.
    pub fn spawn<R>(client: Arc<FavoritesClient<R>>, events: &SessionEvents) -> JoinHandle<()>
    where
        R: RemoteStore + 'static,
    {
        let mut rx = events.subscribe();
        tokio::spawn(async move {
            loop {
                let event = match rx.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "session watcher lagged; events dropped");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };

                let session = match (event.authenticated, event.user) {
                    (true, Some(user)) => SessionState::signed_in(user),
                    (true, None) => {
                        tracing::warn!("authenticated signal without a user; treating as signed out");
                        SessionState::SignedOut
                    }
                    (false, _) => SessionState::SignedOut,
                };

                // Repeated signals for the current session are no-ops
                if !client.set_session(session) {
                    continue;
                }

                if session.is_authenticated() {
                    if let Err(err) = client.load_favorites().await {
                        tracing::warn!(error = %err, "initial favorites load failed");
                    }
                }
            }
        })
    }
}
