//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for prefkit. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use prefkit_core::{PrefType, PrefValue, Snapshot};
use rusqlite::{params, Connection};
use tokio::sync::watch;

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{Mutation, SnapshotStream, Store};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime. Subscriptions are driven by a
/// version counter bumped after every committed change; each emission
/// re-reads the snapshot from disk, so read faults surface as `Err` items.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
    /// Bumped after each commit that changed at least one row.
    version: Arc<watch::Sender<u64>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        tracing::debug!(path = %path.as_ref().display(), "opening preference store");
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        migration::migrate(&mut conn)?;
        let (version, _) = watch::channel(0);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            version: Arc::new(version),
        })
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.version.receiver_count()
    }

    /// Execute a blocking operation with exclusive access to the connection.
    async fn with_conn<F, T>(conn: Arc<Mutex<Connection>>, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let mut conn = lock(&conn)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                Some(format!("spawn_blocking failed: {}", e)),
            ))
        })?
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| {
        StoreError::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            Some(format!("mutex poisoned: {}", e)),
        ))
    })
}

// Helper to encode a value to CBOR
fn encode_value(value: &PrefValue) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

// Helper to decode a stored row, checking the CBOR payload against its tag
fn decode_value(name: &str, tag: i64, bytes: &[u8]) -> Result<PrefValue> {
    let pref_type = u8::try_from(tag)
        .ok()
        .and_then(PrefType::from_u8)
        .ok_or_else(|| {
            StoreError::InvalidData(format!("preference {} has unknown type tag {}", name, tag))
        })?;

    let value: PrefValue =
        ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;

    if value.pref_type() != pref_type {
        return Err(StoreError::InvalidData(format!(
            "preference {} tagged {} but holds a {} value",
            name,
            pref_type,
            value.pref_type()
        )));
    }
    Ok(value)
}

/// Read every row into a snapshot.
fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    let mut stmt = conn.prepare("SELECT name, value_type, value FROM preferences")?;

    let rows: Vec<(String, i64, Vec<u8>)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut entries = Vec::with_capacity(rows.len());
    for (name, tag, bytes) in rows {
        let value = decode_value(&name, tag, &bytes)?;
        entries.push((name, value));
    }
    Ok(Snapshot::from_entries(entries))
}

/// Write the rows that differ between `current` and `next`.
///
/// Returns the number of rows written or deleted.
fn write_changes(conn: &Connection, current: &Snapshot, next: &Snapshot) -> Result<usize> {
    let now = now_millis();
    let mut changed = 0;

    for (name, value) in next.iter() {
        if current.get_value(name) == Some(value) {
            continue;
        }
        conn.execute(
            "INSERT INTO preferences (name, value_type, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(name) DO UPDATE SET
                value_type = excluded.value_type,
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![
                name,
                value.pref_type().to_u8() as i64,
                encode_value(value)?,
                now
            ],
        )?;
        changed += 1;
    }

    for name in current.names() {
        if !next.contains(name) {
            conn.execute("DELETE FROM preferences WHERE name = ?1", params![name])?;
            changed += 1;
        }
    }

    Ok(changed)
}

#[async_trait]
impl Store for SqliteStore {
    async fn data(&self) -> Result<Snapshot> {
        Self::with_conn(self.conn.clone(), |conn| load_snapshot(conn)).await
    }

    fn subscribe(&self) -> SnapshotStream {
        let rx = self.version.subscribe();
        let conn = self.conn.clone();

        stream::unfold((rx, conn, true), |(mut rx, conn, first)| async move {
            if !first && rx.changed().await.is_err() {
                // Store dropped
                return None;
            }
            let version = *rx.borrow_and_update();
            let result = Self::with_conn(conn.clone(), |conn| load_snapshot(conn)).await;
            tracing::trace!(version, ok = result.is_ok(), "sqlite snapshot emitted");
            Some((result, (rx, conn, false)))
        })
        .boxed()
    }

    async fn edit(&self, mutation: Mutation) -> Result<Snapshot> {
        let version = self.version.clone();
        let (snapshot, changed) = Self::with_conn(self.conn.clone(), move |conn| {
            let tx = conn.transaction()?;

            let current = load_snapshot(&tx)?;
            let mut edit = current.to_mutable();
            mutation(&mut edit);
            let next = edit.freeze();

            let changed = write_changes(&tx, &current, &next)?;
            tx.commit()?;
            // Notify while still holding the connection, even if the caller
            // has stopped waiting for this edit
            if changed > 0 {
                version.send_modify(|v| *v += 1);
            }
            Ok((next, changed))
        })
        .await?;

        tracing::debug!(rows = changed, entries = snapshot.len(), "committed preference edit");
        Ok(snapshot)
    }
}
