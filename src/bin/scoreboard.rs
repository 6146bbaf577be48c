//! Scoreboard panel: match clock, score and penalty shootout.

use std::sync::Arc;

use anyhow::Context;
use broadcast_panels::{
    config::{AppConfig, Panel},
    dao::sqlite::{SqliteDatabase, SqliteMatchStore},
    routes, server,
    state::{ScoreboardState, clock::SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let settings = AppConfig::load().panel(Panel::Scoreboard);
    let db = SqliteDatabase::open(&settings.database)
        .with_context(|| format!("opening {}", settings.database.display()))?;
    let store = SqliteMatchStore::new(db)
        .await
        .context("preparing scoreboard schema")?;

    let state = ScoreboardState::new(Arc::new(store), Arc::new(SystemClock));
    server::serve(Panel::Scoreboard, routes::scoreboard_router(state), settings.addr).await
}
