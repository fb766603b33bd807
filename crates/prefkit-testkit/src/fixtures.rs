//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;
use std::time::Duration;

use futures::{Stream, StreamExt};
use prefkit::Preferences;
use prefkit_core::{PrefValue, Snapshot};
use prefkit_store::MemoryStore;

use crate::faulty::FaultyStore;

/// A fault-injectable memory store and a facade over it.
///
/// `store` and `prefs` share the same underlying store.
pub struct TestFixture {
    pub store: Arc<FaultyStore<MemoryStore>>,
    pub prefs: Preferences<FaultyStore<MemoryStore>>,
}

impl TestFixture {
    /// Create a fixture over an empty store.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::empty())
    }

    /// Create a fixture whose store starts with `entries`.
    pub fn with_entries(entries: Vec<(&str, PrefValue)>) -> Self {
        Self::with_snapshot(Snapshot::from_entries(
            entries.into_iter().map(|(name, value)| (name.to_string(), value)),
        ))
    }

    /// Create a fixture seeded with one entry of every supported type.
    pub fn seeded() -> Self {
        Self::with_entries(vec![
            ("flag", PrefValue::Bool(true)),
            ("name", PrefValue::String("alice".into())),
            ("retries", PrefValue::Int(3)),
            ("last_sync", PrefValue::Long(1_700_000_000_000)),
            ("volume", PrefValue::Float(0.5)),
            ("ratio", PrefValue::Double(0.25)),
        ])
    }

    fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Arc::new(FaultyStore::new(MemoryStore::with_snapshot(snapshot)));
        Self {
            prefs: Preferences::from_arc(store.clone()),
            store,
        }
    }

    /// Live subscriptions on the underlying memory store.
    pub fn subscriber_count(&self) -> usize {
        self.store.inner().subscriber_count()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Next stream item, or `None` if nothing arrives within `timeout`.
///
/// An ended stream also yields `None`.
pub async fn next_within<St>(stream: &mut St, timeout: Duration) -> Option<St::Item>
where
    St: Stream + Unpin,
{
    tokio::time::timeout(timeout, stream.next())
        .await
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_fixture_has_every_type() {
        let fixture = TestFixture::seeded();

        assert!(fixture.prefs.get_bool("flag", false).await.unwrap());
        assert_eq!(fixture.prefs.get_string("name", "anon").await.unwrap(), "alice");
        assert_eq!(fixture.prefs.get_int("retries", -1).await.unwrap(), 3);
        assert_eq!(
            fixture.prefs.get_long("last_sync", -1).await.unwrap(),
            1_700_000_000_000
        );
        assert_eq!(fixture.prefs.get_float("volume", -1.0).await.unwrap(), 0.5);
        assert_eq!(fixture.prefs.get_double("ratio", -1.0).await.unwrap(), 0.25);
    }

    #[tokio::test]
    async fn test_next_within_times_out() {
        let fixture = TestFixture::new();
        let mut names = fixture.prefs.string_flow("name", None).unwrap();

        assert!(next_within(&mut names, Duration::from_millis(20)).await.is_none());
        assert_eq!(fixture.subscriber_count(), 1);
    }
}
