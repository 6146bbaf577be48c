use futures::{FutureExt, future::BoxFuture};
use rusqlite::{Connection, Row, params};
use tracing::debug;

use super::{SqliteDatabase, schema};
use crate::{
    dao::{
        storage::StorageResult,
        store::{HealthCheck, ScheduleStore},
    },
    state::schedule::{ScheduleEntry, ScheduleEntryInput, Weekdays},
};

/// Weekly grid storage on top of a [`SqliteDatabase`].
#[derive(Clone)]
pub struct SqliteScheduleStore {
    db: SqliteDatabase,
}

impl SqliteScheduleStore {
    /// Wrap `db`, creating the schedule schema first.
    pub async fn new(db: SqliteDatabase) -> StorageResult<Self> {
        db.call(schema::init_schedule).await?;
        Ok(Self { db })
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<ScheduleEntry> {
    let weekdays: Option<String> = row.get(3)?;
    Ok(ScheduleEntry {
        id: row.get(0)?,
        time: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        weekdays: weekdays.as_deref().unwrap_or_default().split(',').collect::<Weekdays>(),
        category: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

fn insert(conn: &Connection, input: &ScheduleEntryInput) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO programas (horario, nome, dias, categoria) VALUES (?1, ?2, ?3, ?4)",
        params![
            input.time,
            input.name,
            input.weekdays.to_string(),
            input.category
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl HealthCheck for SqliteScheduleStore {
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.db.health_check()
    }
}

impl ScheduleStore for SqliteScheduleStore {
    fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<ScheduleEntry>>> {
        let db = self.db.clone();
        async move {
            db.read(|tx| {
                let mut stmt = tx.prepare(
                    "SELECT id, horario, nome, dias, categoria FROM programas ORDER BY id ASC",
                )?;
                let entries = stmt
                    .query_map([], entry_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(entries)
            })
            .await
        }
        .boxed()
    }

    fn insert_entry(&self, input: ScheduleEntryInput) -> BoxFuture<'static, StorageResult<i64>> {
        let db = self.db.clone();
        async move { db.write(move |tx| insert(tx, &input)).await }.boxed()
    }

    fn update_entry(
        &self,
        id: i64,
        input: ScheduleEntryInput,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                let changed = tx.execute(
                    "UPDATE programas SET horario = ?1, nome = ?2, dias = ?3, categoria = ?4
                     WHERE id = ?5",
                    params![
                        input.time,
                        input.name,
                        input.weekdays.to_string(),
                        input.category,
                        id
                    ],
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

    fn replace_all(
        &self,
        entries: Vec<ScheduleEntryInput>,
    ) -> BoxFuture<'static, StorageResult<usize>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                let removed = tx.execute("DELETE FROM programas", [])?;
                debug!(removed, "cleared schedule grid");
                for entry in &entries {
                    insert(tx, entry)?;
                }
                Ok(entries.len())
            })
            .await
        }
        .boxed()
    }
}
