//! Store trait: the abstract interface for snapshot persistence.
//!
//! This trait allows the preference facade to be storage-agnostic.
//! Implementations include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use futures::stream::BoxStream;
use prefkit_core::{MutableSnapshot, Snapshot};

use crate::error::Result;

/// A mutation applied to the latest snapshot inside an atomic edit.
pub type Mutation = Box<dyn FnOnce(&mut MutableSnapshot) + Send>;

/// A live, unbounded stream of snapshots.
///
/// The first item is the snapshot current at subscription time; each later
/// item follows a committed change. An `Err` item reports a failed read and
/// does not end the stream. Dropping the stream releases the subscription.
pub type SnapshotStream = BoxStream<'static, Result<Snapshot>>;

/// The Store trait: async interface for snapshot persistence.
///
/// # Design Notes
///
/// - **Whole snapshots**: reads never observe a partially applied edit.
/// - **Serialized edits**: each edit observes the most recently committed
///   snapshot and produces the next one; the last committed edit wins.
/// - **Restartable subscriptions**: every call to `subscribe` starts a new,
///   independent stream.
#[async_trait]
pub trait Store: Send + Sync {
    /// Read the current snapshot.
    async fn data(&self) -> Result<Snapshot>;

    /// Subscribe to snapshot changes.
    fn subscribe(&self) -> SnapshotStream;

    /// Apply `mutation` to the latest snapshot and commit the result.
    ///
    /// Returns the committed snapshot once the edit is durable.
    async fn edit(&self, mutation: Mutation) -> Result<Snapshot>;
}

#[async_trait]
impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    async fn data(&self) -> Result<Snapshot> {
        (**self).data().await
    }

    fn subscribe(&self) -> SnapshotStream {
        (**self).subscribe()
    }

    async fn edit(&self, mutation: Mutation) -> Result<Snapshot> {
        (**self).edit(mutation).await
    }
}

/// Extension trait for common store patterns.
pub trait StoreExt: Store {
    /// Edit with a closure, boxing it into a [`Mutation`].
    fn update<F>(&self, f: F) -> impl std::future::Future<Output = Result<Snapshot>> + Send
    where
        F: FnOnce(&mut MutableSnapshot) + Send + 'static;
}

impl<S: Store + ?Sized> StoreExt for S {
    async fn update<F>(&self, f: F) -> Result<Snapshot>
    where
        F: FnOnce(&mut MutableSnapshot) + Send + 'static,
    {
        self.edit(Box::new(f)).await
    }
}
