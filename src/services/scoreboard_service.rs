//! Business logic behind the scoreboard routes: the match view, field updates,
//! timer commands and the penalty shootout list.

use tracing::{debug, info};

use crate::{
    dto::scoreboard::{MatchUpdateRequest, MatchView, PenaltyRequest, StatusResponse},
    error::ServiceError,
    state::{
        ScoreboardState,
        match_state::{MatchPatch, MatchState, NewPenalty},
    },
};

/// Current match with penalties and the elapsed time evaluated now.
pub async fn get_state(state: &ScoreboardState) -> Result<MatchView, ServiceError> {
    let (current, penalties) = state.store().load_match().await?;
    Ok(MatchView::new(current, penalties, state.clock().now()))
}

/// Apply a timer command and/or display field changes in one transaction.
pub async fn apply_update(
    state: &ScoreboardState,
    request: MatchUpdateRequest,
) -> Result<StatusResponse, ServiceError> {
    let patch = MatchPatch::from(request);
    if patch.is_empty() {
        debug!("match update without known fields ignored");
        return Ok(StatusResponse::success());
    }

    let action = patch.action;
    let clock = state.clock();
    // "now" is read under the write lock so concurrent commands stamp in commit order.
    let updated = state
        .store()
        .modify_match(Box::new(move |current: &mut MatchState| {
            if current.apply_patch(patch, clock.now()) {
                debug!(running = current.clock.is_running, "match clock changed");
            }
        }))
        .await?;

    info!(
        ?action,
        score_a = updated.score_a,
        score_b = updated.score_b,
        running = updated.clock.is_running,
        "match updated"
    );
    Ok(StatusResponse::success())
}

/// Append one attempt to the shootout.
pub async fn add_penalty(
    state: &ScoreboardState,
    request: PenaltyRequest,
) -> Result<StatusResponse, ServiceError> {
    let penalty = NewPenalty::from(request);
    let team = penalty.team;
    let result = penalty.result;
    let id = state.store().add_penalty(penalty).await?;
    info!(id, %team, %result, "penalty recorded");
    Ok(StatusResponse::success())
}

/// Remove every penalty; the match itself is untouched.
pub async fn clear_penalties(state: &ScoreboardState) -> Result<StatusResponse, ServiceError> {
    let removed = state.store().clear_penalties().await?;
    info!(removed, "penalties cleared");
    Ok(StatusResponse::success())
}
