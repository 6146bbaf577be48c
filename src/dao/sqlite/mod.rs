//! SQLite backend built on `rusqlite`.
//!
//! A [`SqliteDatabase`] owns one connection behind a mutex; every call hops
//! onto Tokio's blocking pool so the async handlers never block on disk I/O.

mod match_store;
mod overlay_store;
mod schedule_store;
pub mod schema;

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::{FutureExt, future::BoxFuture};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::debug;

use crate::dao::{
    storage::{StorageError, StorageResult},
    store::HealthCheck,
};

pub use self::{
    match_store::SqliteMatchStore, overlay_store::SqliteOverlayStore,
    schedule_store::SqliteScheduleStore,
};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to one panel's database file.
#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl SqliteDatabase {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| {
            StorageError::unavailable(format!("cannot open {}", path.display()), source)
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        debug!(path = %path.display(), "opened sqlite database");
        Ok(Self::from_connection(conn, path))
    }

    /// Private database that disappears with the handle.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn, PathBuf::from(":memory:")))
    }

    fn from_connection(conn: Connection, path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `work` against the connection on the blocking pool.
    pub async fn call<F, T>(&self, work: F) -> StorageResult<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StorageError::Poisoned)?;
            work(&mut guard).map_err(StorageError::from)
        })
        .await
        .map_err(|source| StorageError::unavailable("storage task failed", source))?
    }

    /// Run `work` inside an immediate (write-locking) transaction and commit it.
    pub async fn write<F, T>(&self, work: F) -> StorageResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let value = work(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
    }

    /// Run read-only `work` against a single snapshot.
    pub async fn read<F, T>(&self, work: F) -> StorageResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.call(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
            let value = work(&tx)?;
            tx.finish()?;
            Ok(value)
        })
        .await
    }

    pub async fn ping(&self) -> StorageResult<()> {
        self.call(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map(|_| ())
    }
}

impl HealthCheck for SqliteDatabase {
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let db = self.clone();
        async move { db.ping().await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_database_answers_ping() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        db.ping().await.unwrap();
        assert_eq!(db.path(), Path::new(":memory:"));
    }

    #[tokio::test]
    async fn failed_write_rolls_back() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        db.call(|conn| conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL)"))
            .await
            .unwrap();

        let outcome = db
            .write(|tx| {
                tx.execute("INSERT INTO t (v) VALUES (1)", [])?;
                tx.execute("INSERT INTO t (v) VALUES (NULL)", [])?;
                Ok(())
            })
            .await;
        assert!(outcome.is_err());

        let count: i64 = db
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn file_database_persists_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.db");

        let db = SqliteDatabase::open(&path).unwrap();
        db.call(|conn| conn.execute_batch("CREATE TABLE t (v INTEGER); INSERT INTO t VALUES (7);"))
            .await
            .unwrap();
        drop(db);

        let reopened = SqliteDatabase::open(&path).unwrap();
        let value: i64 = reopened
            .call(|conn| conn.query_row("SELECT v FROM t", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
}
