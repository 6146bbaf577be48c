use broadcast_panels::services::documentation::{OverlayApi, ScheduleApi, ScoreboardApi};
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let docs = serde_json::json!({
        "scoreboard": ScoreboardApi::openapi(),
        "program-overlay": OverlayApi::openapi(),
        "schedule": ScheduleApi::openapi(),
    });
    println!("{}", serde_json::to_string_pretty(&docs)?);
    Ok(())
}
