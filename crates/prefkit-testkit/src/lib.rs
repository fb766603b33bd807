//! # Prefkit Testkit
//!
//! Testing utilities for prefkit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fault injection**: [`FaultyStore`] wraps any store and fails reads,
//!   edits, or live subscriptions on demand
//! - **Generators**: Proptest strategies for names, values, and snapshots
//! - **Fixtures**: A ready-made fault-injectable store plus facade
//!
//! ## Fault Injection
//!
//! ```rust
//! use futures::StreamExt;
//! use prefkit_testkit::{Fault, TestFixture};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let fixture = TestFixture::new();
//! let mut retries = fixture.prefs.int_flow("retries", -1).unwrap();
//! assert_eq!(retries.next().await.unwrap().unwrap(), -1);
//!
//! fixture.prefs.set_int("retries", 3).await.unwrap();
//! assert_eq!(retries.next().await.unwrap().unwrap(), 3);
//!
//! // An I/O fault is replaced by the default; the stream keeps going
//! fixture.store.inject_subscription_fault(Fault::Io);
//! assert_eq!(retries.next().await.unwrap().unwrap(), -1);
//! # });
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use prefkit_testkit::generators::pref_value;
//!
//! proptest! {
//!     #[test]
//!     fn value_type_is_stable(value in pref_value()) {
//!         prop_assert_eq!(value.clone().pref_type(), value.pref_type());
//!     }
//! }
//! ```

pub mod faulty;
pub mod fixtures;
pub mod generators;

pub use faulty::{Fault, FaultyStore};
pub use fixtures::{next_within, TestFixture};
pub use generators::{key_name, pref_type, pref_value, snapshot_entries};
