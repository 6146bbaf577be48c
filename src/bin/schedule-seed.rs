//! Reload the schedule database with the station's current weekly grid.

use std::sync::Arc;

use anyhow::Context;
use broadcast_panels::{
    config::{AppConfig, Panel},
    dao::sqlite::{SqliteDatabase, SqliteScheduleStore},
    server,
    services::schedule_service,
    state::ScheduleState,
};
use tracing::info;

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
    let written = schedule_service::reseed(&state)
        .await
        .context("reloading the weekly grid")?;

    info!(written, database = %settings.database.display(), "weekly grid loaded");
    Ok(())
}
