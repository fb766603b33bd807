//! # Prefkit Core
//!
//! Pure types for prefkit: preference values, typed keys, and snapshots.
//!
//! This crate contains no I/O and no async code. Storage backends live in
//! `prefkit-store`; the typed accessor facade lives in `prefkit`.
//!
//! ## Key Types
//!
//! - [`PrefKey`] - A named key whose value type is carried as a type parameter
//! - [`PrefValue`] - A tagged preference value, one variant per supported type
//! - [`PrefType`] - The type tag of a value
//! - [`Snapshot`] - An immutable, cheaply cloneable view of all preferences
//! - [`MutableSnapshot`] - The edit buffer handed to store mutations
//!
//! ## Typed Keys
//!
//! ```rust
//! use prefkit_core::{int_key, Snapshot};
//!
//! let retries = int_key("retries").unwrap();
//! let mut edit = Snapshot::empty().to_mutable();
//! edit.set(&retries, 3);
//! let snapshot = edit.freeze();
//! assert_eq!(snapshot.get(&retries), Some(3));
//! ```

pub mod error;
pub mod key;
pub mod snapshot;
pub mod value;

pub use error::{CoreError, Result};
pub use key::{bool_key, double_key, float_key, int_key, long_key, string_key, PrefKey};
pub use snapshot::{MutableSnapshot, Snapshot};
pub use value::{
    PrefType, PrefValue, PrefValueType, DEFAULT_BOOL, DEFAULT_DOUBLE, DEFAULT_FLOAT, DEFAULT_INT,
    DEFAULT_LONG,
};
