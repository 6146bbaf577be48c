use futures::{FutureExt, future::BoxFuture};
use rusqlite::{Connection, Row, params};
use tracing::warn;

use super::{SqliteDatabase, schema};
use crate::{
    dao::{
        storage::StorageResult,
        store::{HealthCheck, MatchEdit, MatchStore},
    },
    state::{
        match_clock::MatchClock,
        match_state::{MatchState, NewPenalty, Penalty, PenaltyResult, Side},
    },
};

const MATCH_ID: i64 = 1;

const SELECT_MATCH: &str = "SELECT team_a_name, team_b_name, logo_a, logo_b, score_a, score_b,
        status, stoppage_time, start_timestamp, accumulated_seconds, is_running
    FROM match_state WHERE id = ?1";

/// Scoreboard storage on top of a [`SqliteDatabase`].
#[derive(Clone)]
pub struct SqliteMatchStore {
    db: SqliteDatabase,
}

impl SqliteMatchStore {
    /// Wrap `db`, creating or upgrading the scoreboard schema first.
    pub async fn new(db: SqliteDatabase) -> StorageResult<Self> {
        db.call(schema::init_scoreboard).await?;
        Ok(Self { db })
    }
}

fn text(row: &Row<'_>, index: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(index)?.unwrap_or_default())
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<MatchState> {
    let logo = |index: usize| -> rusqlite::Result<Option<String>> {
        Ok(row
            .get::<_, Option<String>>(index)?
            .filter(|value| !value.trim().is_empty()))
    };

    Ok(MatchState {
        team_a_name: text(row, 0)?,
        team_b_name: text(row, 1)?,
        logo_a: logo(2)?,
        logo_b: logo(3)?,
        score_a: row.get::<_, Option<i64>>(4)?.unwrap_or_default(),
        score_b: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
        status: text(row, 6)?,
        stoppage_minutes: row.get::<_, Option<i64>>(7)?.unwrap_or_default(),
        clock: MatchClock {
            start_timestamp: row.get::<_, Option<f64>>(8)?.unwrap_or_default(),
            accumulated_seconds: row.get::<_, Option<f64>>(9)?.unwrap_or_default(),
            is_running: row.get::<_, Option<i64>>(10)?.unwrap_or_default() != 0,
        },
    })
}

// Rows written by older panels may carry free-text labels; they are left out
// of the view instead of failing the whole read.
fn penalty_from_row(row: &Row<'_>) -> rusqlite::Result<Option<Penalty>> {
    let id: i64 = row.get(0)?;
    let team = text(row, 1)?;
    let result = text(row, 3)?;
    match (team.parse::<Side>(), result.parse::<PenaltyResult>()) {
        (Ok(side), Ok(outcome)) => Ok(Some(Penalty {
            id,
            team: side,
            player_name: text(row, 2)?,
            result: outcome,
        })),
        _ => {
            warn!(id, %team, %result, "skipping penalty with unknown label");
            Ok(None)
        }
    }
}

fn read_match(conn: &Connection) -> rusqlite::Result<MatchState> {
    conn.query_row(SELECT_MATCH, [MATCH_ID], match_from_row)
}

fn write_match(conn: &Connection, state: &MatchState) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE match_state SET
            team_a_name = ?1, team_b_name = ?2, logo_a = ?3, logo_b = ?4,
            score_a = ?5, score_b = ?6, status = ?7, stoppage_time = ?8,
            start_timestamp = ?9, accumulated_seconds = ?10, is_running = ?11
         WHERE id = ?12",
        params![
            state.team_a_name,
            state.team_b_name,
            state.logo_a.as_deref().unwrap_or_default(),
            state.logo_b.as_deref().unwrap_or_default(),
            state.score_a,
            state.score_b,
            state.status,
            state.stoppage_minutes,
            state.clock.start_timestamp,
            state.clock.accumulated_seconds,
            state.clock.is_running,
            MATCH_ID,
        ],
    )?;
    Ok(())
}

impl HealthCheck for SqliteMatchStore {
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.db.health_check()
    }
}

impl MatchStore for SqliteMatchStore {
    fn load_match(&self) -> BoxFuture<'static, StorageResult<(MatchState, Vec<Penalty>)>> {
        let db = self.db.clone();
        async move {
            db.read(|tx| {
                let state = read_match(tx)?;
                let mut stmt = tx.prepare(
                    "SELECT id, team, player_name, result FROM penalties ORDER BY id ASC",
                )?;
                let penalties: Vec<Penalty> = stmt
                    .query_map([], penalty_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
                    .into_iter()
                    .flatten()
                    .collect();
                Ok((state, penalties))
            })
            .await
        }
        .boxed()
    }

    fn modify_match(&self, edit: MatchEdit) -> BoxFuture<'static, StorageResult<MatchState>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                let mut state = read_match(tx)?;
                edit(&mut state);
                write_match(tx, &state)?;
                Ok(state)
            })
            .await
        }
        .boxed()
    }

    fn add_penalty(&self, penalty: NewPenalty) -> BoxFuture<'static, StorageResult<i64>> {
        let db = self.db.clone();
        async move {
            db.write(move |tx| {
                tx.execute(
                    "INSERT INTO penalties (team, player_name, result) VALUES (?1, ?2, ?3)",
                    params![
                        penalty.team.as_str(),
                        penalty.player_name,
                        penalty.result.as_str()
                    ],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .await
        }
        .boxed()
    }

    fn clear_penalties(&self) -> BoxFuture<'static, StorageResult<usize>> {
        let db = self.db.clone();
        async move { db.write(|tx| tx.execute("DELETE FROM penalties", [])).await }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::match_clock::TimerAction;

    async fn store() -> SqliteMatchStore {
        SqliteMatchStore::new(SqliteDatabase::open_in_memory().unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_boot_yields_default_match() {
        let store = store().await;
        let (state, penalties) = store.load_match().await.unwrap();
        assert_eq!(state, MatchState::default());
        assert!(penalties.is_empty());
    }

    #[tokio::test]
    async fn modified_clock_survives_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.db");

        let first = SqliteMatchStore::new(SqliteDatabase::open(&path).unwrap())
            .await
            .unwrap();
        first
            .modify_match(Box::new(|state: &mut MatchState| {
                state.clock.apply(TimerAction::Start, 1_000.0);
                state.score_a = 2;
            }))
            .await
            .unwrap();
        drop(first);

        let restarted = SqliteMatchStore::new(SqliteDatabase::open(&path).unwrap())
            .await
            .unwrap();
        let (state, _) = restarted.load_match().await.unwrap();
        assert!(state.clock.is_running);
        assert_eq!(state.clock.start_timestamp, 1_000.0);
        assert_eq!(state.score_a, 2);
    }

    #[tokio::test]
    async fn penalties_keep_insertion_order_until_cleared() {
        let store = store().await;
        for (team, player, result) in [
            (Side::A, "Zé", PenaltyResult::Goal),
            (Side::B, "Caio", PenaltyResult::Miss),
            (Side::A, "Bia", PenaltyResult::Goal),
        ] {
            store
                .add_penalty(NewPenalty {
                    team,
                    player_name: player.into(),
                    result,
                })
                .await
                .unwrap();
        }

        let (_, penalties) = store.load_match().await.unwrap();
        let names: Vec<_> = penalties.iter().map(|p| p.player_name.as_str()).collect();
        assert_eq!(names, ["Zé", "Caio", "Bia"]);
        assert_eq!(penalties[1].result, PenaltyResult::Miss);

        assert_eq!(store.clear_penalties().await.unwrap(), 3);
        let (_, penalties) = store.load_match().await.unwrap();
        assert!(penalties.is_empty());
    }

    #[tokio::test]
    async fn free_text_penalty_labels_are_skipped_on_read() {
        let store = store().await;
        store
            .add_penalty(NewPenalty {
                team: Side::B,
                player_name: "Caio".into(),
                result: PenaltyResult::Goal,
            })
            .await
            .unwrap();
        store
            .db
            .call(|conn| {
                conn.execute(
                    "INSERT INTO penalties (team, player_name, result) VALUES ('A', 'Zé', 'DEFENDIDO')",
                    [],
                )
            })
            .await
            .unwrap();

        let (state, penalties) = store.load_match().await.unwrap();
        assert_eq!(state, MatchState::default());
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].player_name, "Caio");
    }

    #[tokio::test]
    async fn legacy_null_columns_read_as_defaults() {
        let db = SqliteDatabase::open_in_memory().unwrap();
        db.call(|conn| {
            conn.execute_batch(
                "CREATE TABLE match_state (id INTEGER PRIMARY KEY, team_a_name TEXT, team_b_name TEXT);
                 INSERT INTO match_state (id, team_a_name, team_b_name) VALUES (1, 'Bahia', 'Vitória');",
            )
        })
        .await
        .unwrap();

        let store = SqliteMatchStore::new(db).await.unwrap();
        let (state, _) = store.load_match().await.unwrap();
        assert_eq!(state.team_a_name, "Bahia");
        assert_eq!(state.score_a, 0);
        assert!(!state.clock.is_running);
        assert_eq!(state.clock.accumulated_seconds, 0.0);
    }
}
