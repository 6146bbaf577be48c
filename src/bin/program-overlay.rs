//! Program overlay controller: which program is on air and whether it is shown.

use std::sync::Arc;

use anyhow::Context;
use broadcast_panels::{
    config::{AppConfig, Panel},
    dao::sqlite::{SqliteDatabase, SqliteOverlayStore},
    routes, server,
    state::OverlayState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();

    let settings = AppConfig::load().panel(Panel::Overlay);
    let db = SqliteDatabase::open(&settings.database)
        .with_context(|| format!("opening {}", settings.database.display()))?;
    let store = SqliteOverlayStore::new(db)
        .await
        .context("preparing overlay schema")?;

    let state = OverlayState::new(Arc::new(store));
    server::serve(Panel::Overlay, routes::overlay_router(state), settings.addr).await
}
