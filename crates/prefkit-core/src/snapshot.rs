//! Preference snapshots.
//!
//! A [`Snapshot`] is the immutable, point-in-time content of a store. Stores
//! never mutate a snapshot in place: an edit copies it into a
//! [`MutableSnapshot`], applies the mutation, and freezes the result into a
//! new snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CoreError, Result};
use crate::key::PrefKey;
use crate::value::{PrefValue, PrefValueType};

/// An immutable mapping from preference name to value.
///
/// Cloning is cheap: entries are shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Arc<BTreeMap<String, PrefValue>>,
}

impl Snapshot {
    /// The empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from `(name, value)` pairs. Later pairs win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, PrefValue)>,
    {
        Self {
            entries: Arc::new(entries.into_iter().collect()),
        }
    }

    /// Typed lookup. A stored value of another type reads as absent.
    pub fn get<T: PrefValueType>(&self, key: &PrefKey<T>) -> Option<T> {
        self.entries.get(key.name()).and_then(T::from_value)
    }

    /// Typed lookup that reports a stored value of another type as
    /// [`CoreError::TypeMismatch`].
    pub fn try_get<T: PrefValueType>(&self, key: &PrefKey<T>) -> Result<Option<T>> {
        match self.entries.get(key.name()) {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                CoreError::TypeMismatch {
                    name: key.name().to_string(),
                    expected: T::TYPE,
                    actual: value.pref_type(),
                }
            }),
        }
    }

    /// Untyped lookup by name.
    pub fn get_value(&self, name: &str) -> Option<&PrefValue> {
        self.entries.get(name)
    }

    /// Whether an entry exists under `name`, of any type.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrefValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy into an edit buffer.
    pub fn to_mutable(&self) -> MutableSnapshot {
        MutableSnapshot {
            entries: (*self.entries).clone(),
        }
    }
}

/// An edit buffer over a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutableSnapshot {
    entries: BTreeMap<String, PrefValue>,
}

impl MutableSnapshot {
    /// Insert or overwrite the entry for `key`.
    pub fn set<T: PrefValueType>(&mut self, key: &PrefKey<T>, value: T) {
        self.entries
            .insert(key.name().to_string(), value.into_value());
    }

    /// Insert or overwrite an untyped entry.
    pub fn set_value(&mut self, name: impl Into<String>, value: PrefValue) {
        self.entries.insert(name.into(), value);
    }

    /// Remove the entry under `name`, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<PrefValue> {
        self.entries.remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get<T: PrefValueType>(&self, key: &PrefKey<T>) -> Option<T> {
        self.entries.get(key.name()).and_then(T::from_value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze into an immutable snapshot.
    pub fn freeze(self) -> Snapshot {
        Snapshot {
            entries: Arc::new(self.entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{bool_key, float_key, int_key, string_key};
    use crate::value::PrefType;

    #[test]
    fn test_edit_leaves_source_untouched() {
        let retries = int_key("retries").unwrap();
        let original = Snapshot::empty();

        let mut edit = original.to_mutable();
        edit.set(&retries, 3);
        let next = edit.freeze();

        assert_eq!(original.get(&retries), None);
        assert_eq!(next.get(&retries), Some(3));
    }

    #[test]
    fn test_set_overwrites_only_target_entry() {
        let a = string_key("a").unwrap();
        let b = bool_key("b").unwrap();

        let mut edit = Snapshot::empty().to_mutable();
        edit.set(&a, "one".to_string());
        edit.set(&b, true);
        edit.set(&a, "two".to_string());
        let snap = edit.freeze();

        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get(&a).as_deref(), Some("two"));
        assert_eq!(snap.get(&b), Some(true));
    }

    #[test]
    fn test_try_get_reports_type_mismatch() {
        let as_int = int_key("volume").unwrap();
        let as_float = float_key("volume").unwrap();

        let mut edit = Snapshot::empty().to_mutable();
        edit.set(&as_float, 0.5);
        let snap = edit.freeze();

        assert_eq!(snap.get(&as_int), None);
        assert_eq!(
            snap.try_get(&as_int),
            Err(CoreError::TypeMismatch {
                name: "volume".into(),
                expected: PrefType::Int,
                actual: PrefType::Float,
            })
        );
        assert_eq!(snap.try_get(&as_float), Ok(Some(0.5)));
    }

    #[test]
    fn test_remove_and_clear() {
        let a = int_key("a").unwrap();
        let b = int_key("b").unwrap();

        let mut edit = Snapshot::empty().to_mutable();
        edit.set(&a, 1);
        edit.set(&b, 2);
        assert_eq!(edit.remove("a"), Some(PrefValue::Int(1)));
        assert_eq!(edit.remove("a"), None);
        assert!(edit.contains("b"));

        edit.clear();
        assert!(edit.freeze().is_empty());
    }

    #[test]
    fn test_names_are_sorted() {
        let snap = Snapshot::from_entries(vec![
            ("zeta".to_string(), PrefValue::Bool(true)),
            ("alpha".to_string(), PrefValue::Long(7)),
        ]);
        let names: Vec<&str> = snap.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    mod props {
        use super::*;
        use crate::key::long_key;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_then_get_returns_written_value(name in "[a-z][a-z0-9_]{0,15}", value in any::<i64>(), other in any::<i64>()) {
                let key = long_key(name.clone()).unwrap();
                let mut edit = Snapshot::empty().to_mutable();
                edit.set(&key, other);
                edit.set(&key, value);
                let snap = edit.freeze();
                prop_assert_eq!(snap.get(&key), Some(value));
                prop_assert_eq!(snap.len(), 1);
            }
        }
    }
}
