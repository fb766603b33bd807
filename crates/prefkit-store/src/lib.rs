//! # Prefkit Store
//!
//! Storage abstraction for prefkit. A store persists one immutable
//! [`Snapshot`](prefkit_core::Snapshot) of all preferences and exposes three
//! operations behind the [`Store`] trait:
//!
//! - [`Store::data`] - read the current snapshot
//! - [`Store::subscribe`] - a live stream of snapshots, current one first
//! - [`Store::edit`] - apply an atomic mutation and commit the result
//!
//! ## Implementations
//!
//! - [`SqliteStore`] - SQLite-backed persistent storage
//! - [`MemoryStore`] - In-memory storage for tests and ephemeral settings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use prefkit_core::int_key;
//! use prefkit_store::{SqliteStore, Store, StoreExt};
//!
//! async fn example() {
//!     let store = SqliteStore::open("settings.db").unwrap();
//!     let retries = int_key("retries").unwrap();
//!
//!     let key = retries.clone();
//!     store.update(move |prefs| prefs.set(&key, 3)).await.unwrap();
//!
//!     let snapshot = store.data().await.unwrap();
//!     assert_eq!(snapshot.get(&retries), Some(3));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic edits**: a mutation sees the latest committed snapshot and its
//!   result is committed as a whole or not at all.
//! - **Conflated subscriptions**: subscribers see the latest snapshot after
//!   each change; rapid consecutive edits may be observed as one.
//! - **I/O classification**: [`StoreError::is_io`] separates storage access
//!   faults from logic errors.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{Mutation, SnapshotStream, Store, StoreExt};
