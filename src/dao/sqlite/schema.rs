//! Idempotent schema setup for each panel's database.
//!
//! Tables are created with `IF NOT EXISTS`, then any column missing from a
//! file written by an older build is added in place. Nothing is ever dropped
//! or rewritten, so running this against a live database is always safe.

use rusqlite::{Connection, Result, Transaction, params};
use tracing::{info, warn};

use crate::state::{match_state::MatchState, overlay::station_card};

/// Column name plus the declaration used when it has to be added later.
type ColumnSpec = (&'static str, &'static str);

const MATCH_STATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS match_state (
        id INTEGER PRIMARY KEY,
        team_a_name TEXT, team_b_name TEXT,
        logo_a TEXT, logo_b TEXT,
        score_a INTEGER, score_b INTEGER,
        status TEXT,
        stoppage_time INTEGER,
        start_timestamp REAL,
        accumulated_seconds REAL,
        is_running INTEGER
    );
    CREATE TABLE IF NOT EXISTS penalties (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        team TEXT,
        player_name TEXT,
        result TEXT
    );
"#;

const MATCH_STATE_COLUMNS: &[ColumnSpec] = &[
    ("team_a_name", "TEXT"),
    ("team_b_name", "TEXT"),
    ("logo_a", "TEXT"),
    ("logo_b", "TEXT"),
    ("score_a", "INTEGER DEFAULT 0"),
    ("score_b", "INTEGER DEFAULT 0"),
    ("status", "TEXT"),
    ("stoppage_time", "INTEGER DEFAULT 0"),
    ("start_timestamp", "REAL DEFAULT 0"),
    ("accumulated_seconds", "REAL DEFAULT 0"),
    ("is_running", "INTEGER DEFAULT 0"),
];

const PENALTY_COLUMNS: &[ColumnSpec] = &[
    ("team", "TEXT"),
    ("player_name", "TEXT"),
    ("result", "TEXT"),
];

const OVERLAY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS programas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        titulo TEXT, subtitulo TEXT, estado TEXT,
        ativo INTEGER DEFAULT 0,
        visivel INTEGER DEFAULT 1
    );
"#;

const OVERLAY_COLUMNS: &[ColumnSpec] = &[
    ("titulo", "TEXT"),
    ("subtitulo", "TEXT"),
    ("estado", "TEXT"),
    ("ativo", "INTEGER DEFAULT 0"),
    ("visivel", "INTEGER DEFAULT 1"),
];

const SCHEDULE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS programas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        horario TEXT NOT NULL,
        nome TEXT NOT NULL,
        dias TEXT NOT NULL,
        categoria TEXT
    );
"#;

const SCHEDULE_COLUMNS: &[ColumnSpec] = &[("categoria", "TEXT DEFAULT ''")];

/// Prepare the scoreboard tables and make sure the single match row exists.
pub fn init_scoreboard(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(MATCH_STATE_TABLE)?;
    ensure_columns(&tx, "match_state", MATCH_STATE_COLUMNS)?;
    ensure_columns(&tx, "penalties", PENALTY_COLUMNS)?;

    let defaults = MatchState::default();
    let seeded = tx.execute(
        "INSERT OR IGNORE INTO match_state (
            id, team_a_name, team_b_name, logo_a, logo_b, score_a, score_b,
            status, stoppage_time, start_timestamp, accumulated_seconds, is_running
        ) VALUES (1, ?1, ?2, '', '', ?3, ?4, ?5, ?6, 0, 0, 0)",
        params![
            defaults.team_a_name,
            defaults.team_b_name,
            defaults.score_a,
            defaults.score_b,
            defaults.status,
            defaults.stoppage_minutes,
        ],
    )?;
    if seeded > 0 {
        info!("seeded default match state");
    }
    tx.commit()
}

/// Prepare the overlay table, seeding the station card on an empty database.
pub fn init_overlay(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(OVERLAY_TABLE)?;
    ensure_columns(&tx, "programas", OVERLAY_COLUMNS)?;

    let count: i64 = tx.query_row("SELECT COUNT(*) FROM programas", [], |row| row.get(0))?;
    if count == 0 {
        let card = station_card();
        tx.execute(
            "INSERT INTO programas (titulo, subtitulo, estado, ativo, visivel)
             VALUES (?1, ?2, ?3, 1, 1)",
            params![card.title, card.subtitle, card.location],
        )?;
        info!(title = %card.title, "seeded default overlay entry");
    }
    tx.commit()
}

/// Prepare the schedule table.
pub fn init_schedule(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEDULE_TABLE)?;
    ensure_columns(&tx, "programas", SCHEDULE_COLUMNS)?;
    tx.commit()
}

/// Names of the columns currently present on `table`.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let columns = stmt.query_map([], |row| row.get::<_, String>(1))?;
    columns.collect()
}

fn ensure_columns(tx: &Transaction<'_>, table: &str, expected: &[ColumnSpec]) -> Result<()> {
    let present = table_columns(tx, table)?;
    for (name, declaration) in expected {
        if present.iter().any(|column| column == name) {
            continue;
        }
        warn!(table, column = name, "adding missing column");
        tx.execute_batch(&format!("ALTER TABLE {table} ADD COLUMN {name} {declaration}"))?;
    }
    Ok(())
}
