//! Reactive value streams derived from snapshot subscriptions.
//!
//! A snapshot stream becomes a value stream by looking up one key in every
//! snapshot. Failures are handled per item:
//!
//! - I/O-class store failure: emit the default and keep going
//! - any other failure: emit it once, then end the stream
//!
//! Items that resolve to no value (no entry and no default) are skipped.

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use prefkit_core::{PrefKey, PrefValueType};
use prefkit_store::SnapshotStream;

use crate::error::{PrefsError, Result};

/// A live stream of one preference's value.
///
/// Dropping the stream cancels the underlying subscription.
pub type PrefStream<T> = BoxStream<'static, Result<T>>;

/// Map every snapshot to the value under `key`, falling back to `default`.
pub(crate) fn value_stream<T: PrefValueType>(
    updates: SnapshotStream,
    key: PrefKey<T>,
    default: Option<T>,
) -> PrefStream<T> {
    resolved_stream(updates, key, default)
        .filter_map(|item| future::ready(item.transpose()))
        .boxed()
}

/// One item per snapshot, `Ok(None)` where neither entry nor default exist.
fn resolved_stream<T: PrefValueType>(
    updates: SnapshotStream,
    key: PrefKey<T>,
    default: Option<T>,
) -> BoxStream<'static, Result<Option<T>>> {
    stream::unfold(Some(updates), move |state| {
        let key = key.clone();
        let default = default.clone();
        async move {
            let mut updates = state?;
            let item = match updates.next().await? {
                Ok(snapshot) => snapshot
                    .try_get(&key)
                    .map(|value| value.or(default))
                    .map_err(PrefsError::from),
                Err(e) if e.is_io() => {
                    tracing::warn!(
                        key = key.name(),
                        error = %e,
                        "preference read failed, using default"
                    );
                    Ok(default)
                }
                Err(e) => Err(PrefsError::from(e)),
            };

            match item {
                Ok(value) => {
                    tracing::trace!(
                        key = key.name(),
                        present = value.is_some(),
                        "preference emitted"
                    );
                    Some((Ok(value), Some(updates)))
                }
                // Terminal: the stream ends after reporting the failure
                Err(e) => Some((Err(e), None)),
            }
        }
    })
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefkit_core::{int_key, string_key, PrefValue, Snapshot};
    use prefkit_store::StoreError;

    fn snapshot(entries: Vec<(&str, PrefValue)>) -> Snapshot {
        Snapshot::from_entries(entries.into_iter().map(|(k, v)| (k.to_string(), v)))
    }

    fn io_error() -> StoreError {
        StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk fault"))
    }

    fn updates(items: Vec<prefkit_store::Result<Snapshot>>) -> SnapshotStream {
        stream::iter(items).boxed()
    }

    #[tokio::test]
    async fn test_value_or_default_per_snapshot() {
        let items = updates(vec![
            Ok(Snapshot::empty()),
            Ok(snapshot(vec![("retries", PrefValue::Int(3))])),
        ]);
        let values: Vec<i32> = value_stream(items, int_key("retries").unwrap(), Some(-1))
            .map(|item| item.unwrap())
            .collect()
            .await;
        assert_eq!(values, vec![-1, 3]);
    }

    #[tokio::test]
    async fn test_io_failure_substitutes_default_and_continues() {
        let items = updates(vec![
            Ok(snapshot(vec![("retries", PrefValue::Int(1))])),
            Err(io_error()),
            Ok(snapshot(vec![("retries", PrefValue::Int(2))])),
        ]);
        let values: Vec<i32> = value_stream(items, int_key("retries").unwrap(), Some(-1))
            .map(|item| item.unwrap())
            .collect()
            .await;
        assert_eq!(values, vec![1, -1, 2]);
    }

    #[tokio::test]
    async fn test_other_failure_terminates() {
        let items = updates(vec![
            Ok(snapshot(vec![("retries", PrefValue::Int(1))])),
            Err(StoreError::InvalidData("bad row".into())),
            Ok(snapshot(vec![("retries", PrefValue::Int(2))])),
        ]);
        let results: Vec<Result<i32>> =
            value_stream(items, int_key("retries").unwrap(), Some(-1))
                .collect()
                .await;

        assert_eq!(results.len(), 2);
        assert_eq!(*results[0].as_ref().unwrap(), 1);
        assert!(matches!(results[1], Err(PrefsError::Store(StoreError::InvalidData(_)))));
    }

    #[tokio::test]
    async fn test_type_mismatch_terminates() {
        let items = updates(vec![
            Ok(snapshot(vec![("retries", PrefValue::String("three".into()))])),
            Ok(snapshot(vec![("retries", PrefValue::Int(3))])),
        ]);
        let results: Vec<Result<i32>> =
            value_stream(items, int_key("retries").unwrap(), Some(-1))
                .collect()
                .await;

        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(PrefsError::Core(_))));
    }

    #[tokio::test]
    async fn test_absent_values_are_skipped() {
        let items = updates(vec![
            Ok(Snapshot::empty()),
            Err(io_error()),
            Ok(snapshot(vec![("name", PrefValue::String("alice".into()))])),
        ]);
        let values: Vec<String> = value_stream(items, string_key("name").unwrap(), None)
            .map(|item| item.unwrap())
            .collect()
            .await;
        assert_eq!(values, vec!["alice".to_string()]);
    }
}
