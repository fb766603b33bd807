//! Fault-injecting store wrapper.
//!
//! Wraps any [`Store`] and fails operations on demand, so failure handling
//! can be exercised without a broken disk.

use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use prefkit_core::Snapshot;
use prefkit_store::{Mutation, Result, SnapshotStream, Store, StoreError};
use tokio::sync::broadcast;

/// The class of failure to inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// A storage access fault (`StoreError::is_io` is true).
    Io,
    /// A non-I/O failure, such as unreadable stored data.
    Logic,
}

impl Fault {
    /// Build the store error for an operation.
    pub fn to_error(self, operation: &str) -> StoreError {
        match self {
            Fault::Io => StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("injected {} fault", operation),
            )),
            Fault::Logic => StoreError::InvalidData(format!("injected {} fault", operation)),
        }
    }
}

/// A store that passes through to `inner` unless a fault is armed.
///
/// Read and edit faults are one-shot: armed with `fail_next_*`, consumed by
/// the next matching call. Subscription faults are delivered immediately to
/// every live subscription.
pub struct FaultyStore<S> {
    inner: S,
    read_fault: Mutex<Option<Fault>>,
    edit_fault: Mutex<Option<Fault>>,
    stream_faults: broadcast::Sender<Fault>,
}

impl<S: Store> FaultyStore<S> {
    pub fn new(inner: S) -> Self {
        let (stream_faults, _) = broadcast::channel(16);
        Self {
            inner,
            read_fault: Mutex::new(None),
            edit_fault: Mutex::new(None),
            stream_faults,
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Fail the next `data` call.
    pub fn fail_next_read(&self, fault: Fault) {
        *self.read_fault.lock().unwrap_or_else(|e| e.into_inner()) = Some(fault);
    }

    /// Fail the next `edit` call without applying it.
    pub fn fail_next_edit(&self, fault: Fault) {
        *self.edit_fault.lock().unwrap_or_else(|e| e.into_inner()) = Some(fault);
    }

    /// Emit `fault` as an error item on every live subscription.
    ///
    /// Returns the number of subscriptions reached.
    pub fn inject_subscription_fault(&self, fault: Fault) -> usize {
        self.stream_faults.send(fault).unwrap_or(0)
    }

    fn take(slot: &Mutex<Option<Fault>>) -> Option<Fault> {
        slot.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

#[async_trait]
impl<S: Store> Store for FaultyStore<S> {
    async fn data(&self) -> Result<Snapshot> {
        if let Some(fault) = Self::take(&self.read_fault) {
            return Err(fault.to_error("read"));
        }
        self.inner.data().await
    }

    fn subscribe(&self) -> SnapshotStream {
        let rx = self.stream_faults.subscribe();
        let injected = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(fault) => return Some((Err(fault.to_error("subscription")), rx)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });

        stream::select(self.inner.subscribe(), injected).boxed()
    }

    async fn edit(&self, mutation: Mutation) -> Result<Snapshot> {
        if let Some(fault) = Self::take(&self.edit_fault) {
            return Err(fault.to_error("edit"));
        }
        self.inner.edit(mutation).await
    }
}
