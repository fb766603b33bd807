//! # Prefkit
//!
//! A typed preference store with one-shot and reactive reads.
//!
//! ## Overview
//!
//! [`Preferences`] wraps any [`Store`](prefkit_store::Store) and exposes, for
//! `bool`, `String`, `i32`, `i64`, `f32` and `f64`:
//!
//! - **Writes**: `set_*` commit one atomic edit and return once it is durable
//! - **One-shot reads**: `get_*` return the stored value or the given default
//! - **Reactive reads**: `*_flow` stream the value after every change
//!
//! ## Failure Handling
//!
//! One-shot reads and writes propagate every failure. Reactive reads replace
//! an I/O-class failure with the default and keep streaming; any other
//! failure is emitted once and ends the stream.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use prefkit::{Preferences, PreferencesConfig};
//!
//! async fn example() {
//!     let prefs = Preferences::open(&PreferencesConfig::default()).unwrap();
//!
//!     prefs.set_int("retries", 3).await.unwrap();
//!     assert_eq!(prefs.get_int("retries", -1).await.unwrap(), 3);
//!
//!     let mut names = prefs.string_flow("name", Some("anon".into())).unwrap();
//!     while let Some(name) = names.next().await {
//!         println!("name is now {}", name.unwrap());
//!     }
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `prefkit::core` - Keys, values, snapshots
//! - `prefkit::store` - Storage abstraction, memory and SQLite stores

pub mod config;
pub mod error;
pub mod flow;
pub mod preferences;

// Re-export component crates
pub use prefkit_core as core;
pub use prefkit_store as store;

// Re-export main types for convenience
pub use config::{PreferencesConfig, DEFAULT_STORE_NAME};
pub use error::{PrefsError, Result};
pub use flow::PrefStream;
pub use preferences::Preferences;

// Re-export commonly used core and store types
pub use prefkit_core::{
    bool_key, double_key, float_key, int_key, long_key, string_key, PrefKey, PrefType,
    PrefValue, PrefValueType, Snapshot,
};
pub use prefkit_store::{MemoryStore, SqliteStore, Store};
