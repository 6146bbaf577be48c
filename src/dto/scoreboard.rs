//! DTOs exchanged with the scoreboard admin panel and the on-air displays.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::lenient,
    state::{
        match_clock::TimerAction,
        match_state::{MatchPatch, MatchState, NewPenalty, Penalty, PenaltyResult, Side},
    },
};

/// Timer command accepted by `/api/update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimerActionDto {
    Start,
    Pause,
    #[serde(rename = "reset_timer", alias = "reset")]
    Reset,
}

impl From<TimerActionDto> for TimerAction {
    fn from(value: TimerActionDto) -> Self {
        match value {
            TimerActionDto::Start => TimerAction::Start,
            TimerActionDto::Pause => TimerAction::Pause,
            TimerActionDto::Reset => TimerAction::Reset,
        }
    }
}

/// Partial match update: any subset of display fields plus an optional timer command.
///
/// Integer fields accept numbers or numeric strings; blank strings are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MatchUpdateRequest {
    #[serde(default)]
    pub action: Option<TimerActionDto>,
    #[serde(default)]
    pub team_a_name: Option<String>,
    #[serde(default)]
    pub team_b_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub score_a: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub score_b: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Added time in minutes.
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub stoppage_time: Option<i64>,
    #[serde(default)]
    pub logo_a: Option<String>,
    #[serde(default)]
    pub logo_b: Option<String>,
}

impl From<MatchUpdateRequest> for MatchPatch {
    fn from(value: MatchUpdateRequest) -> Self {
        Self {
            action: value.action.map(Into::into),
            team_a_name: value.team_a_name,
            team_b_name: value.team_b_name,
            score_a: value.score_a,
            score_b: value.score_b,
            status: value.status,
            stoppage_minutes: value.stoppage_time,
            logo_a: value.logo_a,
            logo_b: value.logo_b,
        }
    }
}

/// Team a penalty taker plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SideDto {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
}

impl From<SideDto> for Side {
    fn from(value: SideDto) -> Self {
        match value {
            SideDto::A => Side::A,
            SideDto::B => Side::B,
        }
    }
}

impl From<Side> for SideDto {
    fn from(value: Side) -> Self {
        match value {
            Side::A => SideDto::A,
            Side::B => SideDto::B,
        }
    }
}

/// Outcome of a penalty kick as shown on air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PenaltyResultDto {
    #[serde(rename = "GOL", alias = "goal", alias = "GOAL", alias = "gol")]
    Goal,
    #[serde(rename = "PERDIDO", alias = "miss", alias = "MISS", alias = "perdido")]
    Miss,
}

impl From<PenaltyResultDto> for PenaltyResult {
    fn from(value: PenaltyResultDto) -> Self {
        match value {
            PenaltyResultDto::Goal => PenaltyResult::Goal,
            PenaltyResultDto::Miss => PenaltyResult::Miss,
        }
    }
}

impl From<PenaltyResult> for PenaltyResultDto {
    fn from(value: PenaltyResult) -> Self {
        match value {
            PenaltyResult::Goal => PenaltyResultDto::Goal,
            PenaltyResult::Miss => PenaltyResultDto::Miss,
        }
    }
}

/// Payload appending one attempt to the shootout.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PenaltyRequest {
    pub team: SideDto,
    /// Name of the player taking the kick.
    pub player: String,
    pub result: PenaltyResultDto,
}

impl From<PenaltyRequest> for NewPenalty {
    fn from(value: PenaltyRequest) -> Self {
        Self {
            team: value.team.into(),
            player_name: value.player,
            result: value.result.into(),
        }
    }
}

/// One shootout attempt, in kick order.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PenaltyView {
    pub id: i64,
    pub team: SideDto,
    pub player_name: String,
    pub result: PenaltyResultDto,
}

impl From<Penalty> for PenaltyView {
    fn from(value: Penalty) -> Self {
        Self {
            id: value.id,
            team: value.team.into(),
            player_name: value.player_name,
            result: value.result.into(),
        }
    }
}

/// Full match view polled by the admin panel and the overlays.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchView {
    pub id: i64,
    pub team_a_name: String,
    pub team_b_name: String,
    /// Empty when no logo is set.
    pub logo_a: String,
    pub logo_b: String,
    pub score_a: i64,
    pub score_b: i64,
    pub status: String,
    pub stoppage_time: i64,
    pub start_timestamp: f64,
    pub accumulated_seconds: f64,
    pub is_running: bool,
    /// Elapsed playing time computed by the server at response time.
    pub calculated_time_seconds: f64,
    pub penalties: Vec<PenaltyView>,
}

impl MatchView {
    /// Project `state` and its penalties, with the clock evaluated at `now`.
    pub fn new(state: MatchState, penalties: Vec<Penalty>, now: f64) -> Self {
        Self {
            id: 1,
            calculated_time_seconds: state.clock.elapsed_at(now),
            start_timestamp: state.clock.start_timestamp,
            accumulated_seconds: state.clock.accumulated_seconds,
            is_running: state.clock.is_running,
            team_a_name: state.team_a_name,
            team_b_name: state.team_b_name,
            logo_a: state.logo_a.unwrap_or_default(),
            logo_b: state.logo_b.unwrap_or_default(),
            score_a: state.score_a,
            score_b: state.score_b,
            status: state.status,
            stoppage_time: state.stoppage_minutes,
            penalties: penalties.into_iter().map(Into::into).collect(),
        }
    }
}

/// Acknowledgement returned by every scoreboard mutation.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_accepts_form_strings_and_action_alias() {
        let request: MatchUpdateRequest = serde_json::from_str(
            r#"{"action": "reset", "score_a": "2", "score_b": 1, "stoppage_time": "", "status": "2º TEMPO"}"#,
        )
        .unwrap();
        let patch = MatchPatch::from(request);
        assert_eq!(patch.action, Some(TimerAction::Reset));
        assert_eq!(patch.score_a, Some(2));
        assert_eq!(patch.score_b, Some(1));
        assert_eq!(patch.stoppage_minutes, None);
        assert_eq!(patch.status.as_deref(), Some("2º TEMPO"));
        assert_eq!(patch.team_a_name, None);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let parsed = serde_json::from_str::<MatchUpdateRequest>(r#"{"action": "rewind"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn penalty_result_aliases_map_to_broadcast_labels() {
        let request: PenaltyRequest =
            serde_json::from_str(r#"{"team": "B", "player": "Zé", "result": "miss"}"#).unwrap();
        let penalty = NewPenalty::from(request);
        assert_eq!(penalty.team, Side::B);
        assert_eq!(penalty.result, PenaltyResult::Miss);

        let view = PenaltyView {
            id: 1,
            team: SideDto::B,
            player_name: "Zé".into(),
            result: PenaltyResultDto::Miss,
        };
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json["result"], "PERDIDO");
        assert_eq!(json["team"], "B");
    }

    #[test]
    fn view_reports_elapsed_time_and_blank_logos() {
        let mut state = MatchState::default();
        state.clock.start(100.0);
        let view = MatchView::new(state, Vec::new(), 112.5);
        assert_eq!(view.calculated_time_seconds, 12.5);
        assert!(view.is_running);
        assert_eq!(view.logo_a, "");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["team_a_name"], "Time A");
        assert!(json["penalties"].as_array().unwrap().is_empty());
    }
}
