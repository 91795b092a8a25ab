use serde::Serialize;

use super::error::ValidationError;

/// Balls in a full 20-over innings.
pub const INNINGS_BALLS: u32 = 120;
/// Wickets that end an innings.
pub const MAX_WICKETS: u8 = 10;

/// Snapshot of a run chase as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchState {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    /// Runs the batting side must reach
    pub target: u32,
    pub current_score: u32,
    /// Whole overs plus balls in the tenths place, e.g. 14.3
    pub overs: f64,
    pub wickets_lost: u8,
}

/// Numeric features derived from a [`MatchState`]. Computed per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedFeatures {
    pub runs_left: u32,
    pub balls_left: u32,
    pub wickets_remaining: u8,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
}

impl DerivedFeatures {
    pub fn derive(state: &MatchState) -> Self {
        let runs_left = state.target.saturating_sub(state.current_score);

        // floor(overs * 6) on the raw value: 14.3 -> 85 balls bowled.
        let bowled = (state.overs * 6.0).floor();
        let balls_left = (INNINGS_BALLS as f64 - bowled).max(0.0) as u32;

        let wickets_remaining = MAX_WICKETS.saturating_sub(state.wickets_lost);

        let current_run_rate = if state.overs > 0.0 {
            state.current_score as f64 / state.overs
        } else {
            0.0
        };
        let required_run_rate = if balls_left > 0 {
            (runs_left as f64 * 6.0) / balls_left as f64
        } else {
            0.0
        };

        DerivedFeatures {
            runs_left,
            balls_left,
            wickets_remaining,
            current_run_rate,
            required_run_rate,
        }
    }
}

/// Input row expected by the trained classifier.
///
/// Field names follow the columns the model was fitted on, so the serialized
/// form can be fed to the original training pipeline unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub runs_left: u32,
    pub balls_left: u32,
    /// Wickets remaining, not wickets lost
    pub wickets: u8,
    /// The target
    pub total_runs_x: u32,
    pub crr: f64,
    pub rrr: f64,
}

impl FeatureVector {
    pub fn new(state: &MatchState, features: &DerivedFeatures) -> Self {
        FeatureVector {
            batting_team: state.batting_team.clone(),
            bowling_team: state.bowling_team.clone(),
            city: state.city.clone(),
            runs_left: features.runs_left,
            balls_left: features.balls_left,
            wickets: features.wickets_remaining,
            total_runs_x: state.target,
            crr: features.current_run_rate,
            rrr: features.required_run_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWinner {
    Batting,
    Bowling,
    Draw,
}

impl MatchWinner {
    /// Name of the winning side, `None` for a draw.
    pub fn team<'a>(&self, state: &'a MatchState) -> Option<&'a str> {
        match self {
            MatchWinner::Batting => Some(state.batting_team.as_str()),
            MatchWinner::Bowling => Some(state.bowling_team.as_str()),
            MatchWinner::Draw => None,
        }
    }
}

/// Why a match was decided without consulting the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    AllOutScoresLevel,
    ChasedBeforeAllOut,
    AllOut,
    TargetChased,
    LastBallFinish,
    LevelAtOverLimit,
    OversExhausted,
}

impl DecisionReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DecisionReason::AllOutScoresLevel => "all wickets lost, scores are level",
            DecisionReason::ChasedBeforeAllOut => "target chased just before losing all wickets",
            DecisionReason::AllOut => "all 10 wickets lost, target not reached",
            DecisionReason::TargetChased => "target chased",
            DecisionReason::LastBallFinish => "target passed with the last ball",
            DecisionReason::LevelAtOverLimit => "scores level at the end of 20 overs",
            DecisionReason::OversExhausted => "no balls left, target not reached",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionResult {
    Decided {
        winner: MatchWinner,
        reason: DecisionReason,
    },
    Probabilistic {
        batting_win_prob: f64,
        bowling_win_prob: f64,
    },
    Rejected {
        #[serde(serialize_with = "serialize_display")]
        reason: ValidationError,
    },
}

fn serialize_display<S: serde::Serializer>(
    err: &ValidationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}

#[cfg(test)]
pub(crate) fn chase(target: u32, current_score: u32, overs: f64, wickets_lost: u8) -> MatchState {
    MatchState {
        batting_team: "Team Alpha".to_string(),
        bowling_team: "Team Beta".to_string(),
        city: "Springfield".to_string(),
        target,
        current_score,
        overs,
        wickets_lost,
    }
}
