//! Weekly radio grid editor.

use std::sync::Arc;

use anyhow::Context;
use broadcast_panels::{
    config::{AppConfig, Panel},
    dao::sqlite::{SqliteDatabase, SqliteScheduleStore},
    routes, server,
    state::ScheduleState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let settings = AppConfig::load().panel(Panel::Schedule);
    let db = SqliteDatabase::open(&settings.database)
        .with_context(|| format!("opening {}", settings.database.display()))?;
    let store = SqliteScheduleStore::new(db)
        .await
        .context("preparing schedule schema")?;

    let state = ScheduleState::new(Arc::new(store));
    server::serve(Panel::Schedule, routes::schedule_router(state), settings.addr).await
}
