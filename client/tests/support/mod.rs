//! Shared test support: a scriptable in-process remote store.

use async_trait::async_trait;
use casa_client::{FavoritesSnapshot, RemoteError, RemoteResult, RemoteStore};
use casa_engine::{FavoriteProperty, PropertyId, UserId};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{watch, Notify};

/// Build a denormalized projection for tests.
pub fn property(id: i64, title: &str) -> FavoriteProperty {
    FavoriteProperty {
        id: PropertyId::new(id).unwrap(),
        title: title.to_string(),
        price: 625_000.0,
        bedrooms: 3,
        bathrooms: 2,
        living_area: 1950.0,
        thumbnail_url: Some(format!("https://cdn.example.com/{id}.jpg")),
        city: "San Diego".to_string(),
        state: "CA".to_string(),
    }
}

pub fn pid(id: i64) -> PropertyId {
    PropertyId::new(id).unwrap()
}

#[derive(Default)]
struct MockInner {
    list_results: Mutex<VecDeque<RemoteResult<Vec<FavoriteProperty>>>>,
    add_results: Mutex<VecDeque<RemoteResult<()>>>,
    remove_results: Mutex<VecDeque<RemoteResult<()>>>,
    list_calls: AtomicUsize,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    hold_add: AtomicBool,
    add_gate: Notify,
}

/// A scriptable remote store. Results are consumed from per-operation
/// queues; an empty queue means success (empty list for `list`). Cloning
/// shares the same script and counters.
#[derive(Clone, Default)]
pub struct MockRemote {
    inner: Arc<MockInner>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next list result.
    pub fn push_list(&self, result: RemoteResult<Vec<FavoriteProperty>>) {
        self.inner.list_results.lock().unwrap().push_back(result);
    }

    /// Queue the next add result.
    pub fn push_add(&self, result: RemoteResult<()>) {
        self.inner.add_results.lock().unwrap().push_back(result);
    }

    /// Queue the next remove result.
    pub fn push_remove(&self, result: RemoteResult<()>) {
        self.inner.remove_results.lock().unwrap().push_back(result);
    }

    /// Make subsequent add calls park until [`release_add`](Self::release_add).
    pub fn hold_add(&self) {
        self.inner.hold_add.store(true, Ordering::SeqCst);
    }

    /// Release one parked add call.
    pub fn release_add(&self) {
        self.inner.hold_add.store(false, Ordering::SeqCst);
        self.inner.add_gate.notify_one();
    }

    pub fn list_calls(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.inner.add_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.inner.remove_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn list(&self, _user: UserId) -> RemoteResult<Vec<FavoriteProperty>> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .list_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }

    async fn add(&self, _user: UserId, _id: PropertyId) -> RemoteResult<()> {
        self.inner.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.hold_add.load(Ordering::SeqCst) {
            self.inner.add_gate.notified().await;
        }
        self.inner
            .add_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn remove(&self, _user: UserId, _id: PropertyId) -> RemoteResult<()> {
        self.inner.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .remove_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Convenience error constructor for scripted failures.
pub fn network_err<T>() -> RemoteResult<T> {
    Err(RemoteError::Network("connection reset".to_string()))
}

/// Await a snapshot matching the predicate, or panic after two seconds.
pub async fn wait_for<F>(rx: &mut watch::Receiver<FavoritesSnapshot>, pred: F)
where
    F: Fn(&FavoritesSnapshot) -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if pred(&rx.borrow_and_update()) {
                return;
            }
            rx.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .expect("condition not reached in time");
}
