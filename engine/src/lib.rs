//! # Casa Engine
//!
//! The favorites state engine for Casa, a real-estate listings application.
//!
//! This crate holds the client-side state for a user's favorite properties:
//! a membership index (a set of identifiers answering "is X a favorite" in
//! constant time) and a favorites cache (the full denormalized records used
//! for rendering lists). The two agree at rest; during an in-flight add or
//! remove the index carries the optimistic guess, with a defined rollback
//! path if the remote call fails.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of HTTP, tokens, or platform
//! - **Split mutations**: optimistic changes happen synchronously via
//!   `stage_*` before the caller suspends; resolutions apply via
//!   `commit_*`/`rollback_*` after the remote call settles
//! - **Session-scoped**: every in-flight operation is stamped with the
//!   session epoch it was issued under, so late results landing after a
//!   logout are rejected instead of applied
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Membership Index and Cache
//!
//! [`FavoritesStore`] owns both structures. `replace_all` installs a fresh
//! server snapshot and rebuilds the index; `commit_remove` filters a single
//! record out of the cache without a reload.
//!
//! ### Optimistic operations
//!
//! [`FavoritesStore::stage_add`] / [`FavoritesStore::stage_remove`] mutate
//! the index immediately and hand back an [`OpTicket`]. Once the remote
//! call resolves, the caller settles the ticket:
//!
//! ```rust
//! use casa_engine::{FavoritesStore, PropertyId, SessionState, Stage};
//!
//! let mut store = FavoritesStore::new();
//! store.set_session(SessionState::signed_in(1));
//!
//! let id = PropertyId::new(42).unwrap();
//! let Stage::Pending(ticket) = store.stage_add(id).unwrap() else {
//!     unreachable!("42 is not yet a favorite");
//! };
//! assert!(store.is_favorite(id)); // instant feedback, before any IO
//!
//! // ... remote call fails ...
//! store.rollback_add(ticket).unwrap();
//! assert!(!store.is_favorite(id)); // exact rollback
//! ```
//!
//! ### Identifier normalization
//!
//! Identifiers reach the public boundary as integers or numeric strings.
//! [`PropertyId`] is the single normalization point: it parses or rejects,
//! and nothing downstream ever sees an unvalidated identifier.

pub mod error;
pub mod property;
pub mod session;
pub mod store;

// Re-export main types at crate root
pub use error::Error;
pub use property::{FavoriteProperty, PropertyId};
pub use session::SessionState;
pub use store::{FavoritesStore, OpTicket, Stage};

/// Type aliases for clarity
pub type UserId = i64;
pub type Epoch = u64;
