use futures::{FutureExt, future::BoxFuture};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::{SqliteDatabase, schema};
use crate::{
    dao::{
        storage::StorageResult,
        store::{HealthCheck, OverlayStore},
    },
    state::overlay::{OverlayEntry, OverlayEntryInput, OverlayEntryPatch},
};

const ENTRY_COLUMNS: &str = "id, titulo, subtitulo, estado, ativo, visivel";

/// Program overlay storage on top of a [`SqliteDatabase`].
#[derive(Clone)]
pub struct SqliteOverlayStore {
    db: SqliteDatabase,
}

impl SqliteOverlayStore {
    /// Wrap `db`, creating or upgrading the overlay schema first.
    pub async fn new(db: SqliteDatabase) -> StorageResult<Self> {
        db.call(schema::init_overlay).await?;
        Ok(Self { db })
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<OverlayEntry> {
    Ok(OverlayEntry {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        subtitle: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        location: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        active: row.get::<_, Option<i64>>(4)?.unwrap_or(0) != 0,
        visible: row.get::<_, Option<i64>>(5)?.unwrap_or(1) != 0,
    })
}

fn active_entry(conn: &Connection) -> rusqlite::Result<Option<OverlayEntry>> {
    conn.query_row(
        &format!("SELECT {ENTRY_COLUMNS} FROM programas WHERE ativo = 1 ORDER BY id LIMIT 1"),
        [],
        entry_from_row,
    )
    .optional()
}

impl HealthCheck for SqliteOverlayStore {
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.db.health_check()
    }
}

impl OverlayStore for SqliteOverlayStore {
    fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<OverlayEntry>>> {
        let db = self.db.clone();
        async move {
            db.read(|tx| {
                let mut stmt =
                    tx.prepare(&format!("SELECT {ENTRY_COLUMNS} FROM programas ORDER BY id DESC"))?;
                let entries = stmt
                    .query_map([], entry_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(entries)
            })
            .await
        }
        .boxed()
    }

    fn find_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<Option<OverlayEntry>>> {
        let db = self.db.clone();
        async move {
            db.read(move |tx| {
                tx.query_row(
                    &format!("SELECT {ENTRY_COLUMNS} FROM programas WHERE id = ?1"),
                    [id],
                    entry_from_row,
                )
                .optional()
            })
            .await
        }
        .boxed()
    }

    fn find_active(&self) -> BoxFuture<'static, StorageResult<Option<OverlayEntry>>> {
        let db = self.db.clone();
        async move { db.read(|tx| active_entry(tx)).await }.boxed()
    }

    fn insert_entry(&self, input: OverlayEntryInput) -> BoxFuture<'static, StorageResult<i64>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                tx.execute(
                    "INSERT INTO programas (titulo, subtitulo, estado, ativo, visivel)
                     VALUES (?1, ?2, ?3, 0, 1)",
                    params![input.title, input.subtitle, input.location],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .await
        }
        .boxed()
    }

    fn update_entry(
        &self,
        id: i64,
        patch: OverlayEntryPatch,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                let changed = tx.execute(
                    "UPDATE programas SET
                        titulo = COALESCE(?1, titulo),
                        subtitulo = COALESCE(?2, subtitulo),
                        estado = COALESCE(?3, estado)
                     WHERE id = ?4",
                    params![patch.title, patch.subtitle, patch.location, id],
                )?;
                Ok(changed > 0)
            })
            .await
        }
        .boxed()
    }

    fn delete_entry(&self, id: i64) -> BoxFuture<'static, StorageResult<bool>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| Ok(tx.execute("DELETE FROM programas WHERE id = ?1", [id])? > 0))
                .await
        }
        .boxed()
    }

    fn select_active(&self, id: i64) -> BoxFuture<'static, StorageResult<bool>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                // One statement flips every row, so readers never see two active entries.
                tx.execute(
                    "UPDATE programas SET ativo = CASE WHEN id = ?1 THEN 1 ELSE 0 END
                     WHERE ativo != 0 OR id = ?1 OR ativo IS NULL",
                    [id],
                )?;
                tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM programas WHERE id = ?1)",
                    [id],
                    |row| row.get(0),
                )
            })
            .await
        }
        .boxed()
    }

    fn toggle_visibility(&self) -> BoxFuture<'static, StorageResult<Option<bool>>> {
        let db = self.db.clone();
        async move {
            db.write(|tx| {
                let toggled = tx.execute(
                    "UPDATE programas SET visivel = 1 - COALESCE(visivel, 1) WHERE ativo = 1",
                    [],
                )?;
                if toggled == 0 {
                    return Ok(None);
                }
                Ok(active_entry(tx)?.map(|entry| entry.visible))
            })
            .await
        }
        .boxed()
    }
}
