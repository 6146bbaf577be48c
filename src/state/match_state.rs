//! The single "current match" aggregate and its penalty shootout list.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::state::match_clock::{MatchClock, TimerAction};

/// Display state of the one match the scoreboard tracks.
///
/// There is exactly one of these per scoreboard database; it is created on
/// first boot and only ever mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub team_a_name: String,
    pub team_b_name: String,
    /// Opaque logo references (paths or URLs).
    pub logo_a: Option<String>,
    pub logo_b: Option<String>,
    pub score_a: i64,
    pub score_b: i64,
    /// Free-text phase label such as "1º TEMPO".
    pub status: String,
    /// Added time shown next to the clock, in minutes.
    pub stoppage_minutes: i64,
    pub clock: MatchClock,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            team_a_name: "Time A".into(),
            team_b_name: "Time B".into(),
            logo_a: None,
            logo_b: None,
            score_a: 0,
            score_b: 0,
            status: "1º TEMPO".into(),
            stoppage_minutes: 0,
            clock: MatchClock::default(),
        }
    }
}

/// Partial update of the match: an optional timer command plus any subset of display fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchPatch {
    pub action: Option<TimerAction>,
    pub team_a_name: Option<String>,
    pub team_b_name: Option<String>,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub status: Option<String>,
    pub stoppage_minutes: Option<i64>,
    pub logo_a: Option<String>,
    pub logo_b: Option<String>,
}

impl MatchPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl MatchState {
    /// Apply `patch` with timer commands stamped at `now`.
    ///
    /// Fields absent from the patch are left untouched. Returns whether the timer changed.
    pub fn apply_patch(&mut self, patch: MatchPatch, now: f64) -> bool {
        let timer_changed = patch
            .action
            .is_some_and(|action| self.clock.apply(action, now));

        if let Some(name) = patch.team_a_name {
            self.team_a_name = name;
        }
        if let Some(name) = patch.team_b_name {
            self.team_b_name = name;
        }
        if let Some(score) = patch.score_a {
            self.score_a = score;
        }
        if let Some(score) = patch.score_b {
            self.score_b = score;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(minutes) = patch.stoppage_minutes {
            self.stoppage_minutes = minutes;
        }
        if let Some(logo) = patch.logo_a {
            self.logo_a = non_blank(logo);
        }
        if let Some(logo) = patch.logo_b {
            self.logo_b = non_blank(logo);
        }

        timer_changed
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Side of the pitch a penalty taker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Outcome of a single penalty kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyResult {
    Goal,
    Miss,
}

/// Error returned when a stored label does not name a known side or result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownLabel {
    kind: &'static str,
    value: String,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }
}

impl FromStr for Side {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "A" | "a" => Ok(Side::A),
            "B" | "b" => Ok(Side::B),
            other => Err(UnknownLabel {
                kind: "side",
                value: other.into(),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PenaltyResult {
    /// Label used on air and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            PenaltyResult::Goal => "GOL",
            PenaltyResult::Miss => "PERDIDO",
        }
    }
}

impl FromStr for PenaltyResult {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GOL" | "GOAL" => Ok(PenaltyResult::Goal),
            "PERDIDO" | "MISS" => Ok(PenaltyResult::Miss),
            _ => Err(UnknownLabel {
                kind: "penalty result",
                value: value.into(),
            }),
        }
    }
}

impl fmt::Display for PenaltyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded shootout attempt, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Penalty {
    pub id: i64,
    pub team: Side,
    pub player_name: String,
    pub result: PenaltyResult,
}

/// Attempt to append to the shootout list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPenalty {
    pub team: Side,
    pub player_name: String,
    pub result: PenaltyResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_touches_only_present_fields() {
        let mut state = MatchState::default();
        let changed = state.apply_patch(
            MatchPatch {
                score_b: Some(2),
                status: Some("2º TEMPO".into()),
                ..MatchPatch::default()
            },
            0.0,
        );

        assert!(!changed);
        assert_eq!(state.score_a, 0);
        assert_eq!(state.score_b, 2);
        assert_eq!(state.status, "2º TEMPO");
        assert_eq!(state.team_a_name, "Time A");
    }

    #[test]
    fn patch_runs_action_and_fields_together() {
        let mut state = MatchState::default();
        let changed = state.apply_patch(
            MatchPatch {
                action: Some(TimerAction::Start),
                team_a_name: Some("Barriguda FC".into()),
                ..MatchPatch::default()
            },
            50.0,
        );

        assert!(changed);
        assert!(state.clock.is_running);
        assert_eq!(state.clock.start_timestamp, 50.0);
        assert_eq!(state.team_a_name, "Barriguda FC");
    }

    #[test]
    fn negative_scores_are_accepted() {
        let mut state = MatchState::default();
        state.apply_patch(
            MatchPatch {
                score_a: Some(-1),
                ..MatchPatch::default()
            },
            0.0,
        );
        assert_eq!(state.score_a, -1);
    }

    #[test]
    fn blank_logo_clears_reference() {
        let mut state = MatchState {
            logo_a: Some("/static/a.png".into()),
            ..MatchState::default()
        };
        state.apply_patch(
            MatchPatch {
                logo_a: Some("  ".into()),
                ..MatchPatch::default()
            },
            0.0,
        );
        assert_eq!(state.logo_a, None);
    }

    #[test]
    fn penalty_labels_parse_both_vocabularies() {
        assert_eq!("GOL".parse::<PenaltyResult>(), Ok(PenaltyResult::Goal));
        assert_eq!("miss".parse::<PenaltyResult>(), Ok(PenaltyResult::Miss));
        assert_eq!("b".parse::<Side>(), Ok(Side::B));
        assert!("C".parse::<Side>().is_err());
        assert!("DEFENDIDO".parse::<PenaltyResult>().is_err());
    }
}
