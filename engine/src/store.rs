//! FavoritesStore - the in-memory state container.
//!
//! The store holds the favorites cache (full denormalized records, for
//! rendering) and the membership index (a set of identifiers, for O(1)
//! membership tests). At rest the two always agree:
//!
//! `index == { p.id for p in cache }`
//!
//! During an in-flight add/remove the index reflects the optimistic guess
//! while the cache has not been touched yet. That window is bounded by the
//! round trip of a single remote call, and every mutation here is split
//! accordingly: `stage_*` runs synchronously before the caller suspends,
//! `commit_*`/`rollback_*` run after it resumes.

use crate::{error::Result, Epoch, Error, FavoriteProperty, PropertyId, SessionState};
use std::collections::HashSet;

/// A handle for one in-flight operation.
///
/// Carries the session epoch the operation was issued under, so results that
/// arrive after a logout or re-login are detected and discarded instead of
/// applied to the wrong session's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpTicket {
    /// Property the operation targets
    pub id: PropertyId,
    /// Session epoch at issue time
    pub epoch: Epoch,
}

/// Outcome of staging an optimistic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The index was mutated optimistically; the caller must settle the
    /// ticket with a commit or rollback once the remote call resolves.
    Pending(OpTicket),
    /// Local state already matches the request; no remote call is needed.
    Settled,
}

/// The favorites state container.
///
/// Owned exclusively by the reconciliation controller. All methods are
/// synchronous; the store never performs IO.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    /// Current session
    session: SessionState,
    /// Bumped on every session transition; stamps in-flight tickets
    epoch: Epoch,
    /// Full records, in server order
    cache: Vec<FavoriteProperty>,
    /// Membership index over cache plus optimistic guesses
    index: HashSet<PropertyId>,
    /// Identifiers with an unsettled operation
    in_flight: HashSet<PropertyId>,
}

impl FavoritesStore {
    /// Create an empty store with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session state.
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Current session epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Apply a session transition.
    ///
    /// Signing out clears cache, index and in-flight guards synchronously
    /// and unconditionally. Switching users clears as well, since the old
    /// user's favorites must not leak into the new session. Returns whether
    /// the state actually changed; repeated signals with the same session
    /// are no-ops and do not invalidate in-flight tickets.
    pub fn set_session(&mut self, session: SessionState) -> bool {
        if session == self.session {
            return false;
        }
        self.session = session;
        self.epoch += 1;
        self.clear();
        true
    }

    /// O(1) membership test. Pure; callable regardless of session state.
    pub fn is_favorite(&self, id: PropertyId) -> bool {
        self.index.contains(&id)
    }

    /// The cached records, in server order.
    pub fn favorites(&self) -> &[FavoriteProperty] {
        &self.cache
    }

    /// Iterate the membership index, including optimistic in-flight
    /// guesses not yet reflected in the cache.
    pub fn favorite_ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.index.iter().copied()
    }

    /// Count of cached records.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Whether an operation is in flight for the identifier.
    pub fn has_pending(&self, id: PropertyId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Count of unsettled operations.
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Replace the cache with a freshly loaded sequence and rebuild the
    /// index from it. Used after every successful list call.
    pub fn replace_all(&mut self, properties: Vec<FavoriteProperty>) {
        self.index = properties.iter().map(|p| p.id).collect();
        self.cache = properties;
    }

    /// Stage an optimistic add.
    ///
    /// Inserts the identifier into the index before any IO happens. If the
    /// identifier is already a member this settles immediately: no duplicate
    /// remote call is issued. A conflicting in-flight operation on the same
    /// identifier is rejected rather than raced.
    pub fn stage_add(&mut self, id: PropertyId) -> Result<Stage> {
        if !self.session.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        if self.index.contains(&id) {
            return Ok(Stage::Settled);
        }
        if self.in_flight.contains(&id) {
            return Err(Error::OperationInFlight(id));
        }
        self.index.insert(id);
        self.in_flight.insert(id);
        Ok(Stage::Pending(OpTicket {
            id,
            epoch: self.epoch,
        }))
    }

    /// Settle a staged add after remote success.
    ///
    /// The index keeps the identifier; the cache is hydrated separately by
    /// the follow-up reload, because the add response carries no property
    /// data.
    pub fn commit_add(&mut self, ticket: OpTicket) -> Result<()> {
        self.settle(ticket)?;
        Ok(())
    }

    /// Roll back a staged add after remote failure. Exact inverse of
    /// [`stage_add`](Self::stage_add).
    pub fn rollback_add(&mut self, ticket: OpTicket) -> Result<()> {
        self.settle(ticket)?;
        self.index.remove(&ticket.id);
        Ok(())
    }

    /// Stage an optimistic remove. Mirror of [`stage_add`](Self::stage_add).
    pub fn stage_remove(&mut self, id: PropertyId) -> Result<Stage> {
        if !self.session.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        if !self.index.contains(&id) {
            return Ok(Stage::Settled);
        }
        if self.in_flight.contains(&id) {
            return Err(Error::OperationInFlight(id));
        }
        self.index.remove(&id);
        self.in_flight.insert(id);
        Ok(Stage::Pending(OpTicket {
            id,
            epoch: self.epoch,
        }))
    }

    /// Settle a staged remove after remote success. Filters the identifier
    /// out of the cache directly; no reload is needed.
    pub fn commit_remove(&mut self, ticket: OpTicket) -> Result<()> {
        self.settle(ticket)?;
        self.cache.retain(|p| p.id != ticket.id);
        Ok(())
    }

    /// Roll back a staged remove after remote failure.
    pub fn rollback_remove(&mut self, ticket: OpTicket) -> Result<()> {
        self.settle(ticket)?;
        self.index.insert(ticket.id);
        Ok(())
    }

    /// Release the in-flight guard for a ticket, rejecting tickets issued
    /// under an earlier session epoch.
    fn settle(&mut self, ticket: OpTicket) -> Result<()> {
        if ticket.epoch != self.epoch {
            return Err(Error::StaleOperation(ticket.id));
        }
        self.in_flight.remove(&ticket.id);
        Ok(())
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.index.clear();
        self.in_flight.clear();
    }
}
