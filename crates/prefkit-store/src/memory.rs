//! In-memory implementation of the Store trait.
//!
//! Same semantics as SQLite but nothing is persisted. The committed snapshot
//! lives in a `watch` channel, which doubles as the subscription source.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use prefkit_core::Snapshot;
use tokio::sync::watch;

use crate::error::Result;
use crate::traits::{Mutation, SnapshotStream, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Edits run under the channel's
/// write lock, so each one is atomic with respect to readers and other edits.
pub struct MemoryStore {
    current: watch::Sender<Snapshot>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::empty())
    }

    /// Create a store seeded with `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let (current, _) = watch::channel(snapshot);
        Self { current }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.current.receiver_count()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn data(&self) -> Result<Snapshot> {
        Ok(self.current.borrow().clone())
    }

    fn subscribe(&self) -> SnapshotStream {
        let rx = self.current.subscribe();

        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                // Store dropped
                return None;
            }
            let snapshot = rx.borrow_and_update().clone();
            Some((Ok(snapshot), (rx, false)))
        })
        .boxed()
    }

    async fn edit(&self, mutation: Mutation) -> Result<Snapshot> {
        let mut committed = Snapshot::empty();

        let changed = self.current.send_if_modified(|current| {
            let mut edit = current.to_mutable();
            mutation(&mut edit);
            let next = edit.freeze();

            let changed = next != *current;
            if changed {
                *current = next.clone();
            }
            committed = next;
            changed
        });

        tracing::trace!(changed, entries = committed.len(), "memory store edit");
        Ok(committed)
    }
}
