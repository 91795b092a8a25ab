use serde::Serialize;

use crate::predictor::{
    DecisionReason, DerivedFeatures, FeatureVector, MatchState, MatchWinner, PredictionResult,
    ValidationError,
};

/// What the client renders for one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictionReport {
    Rejected {
        reason: String,
        message: String,
    },
    Decided {
        winner: MatchWinner,
        winner_team: Option<String>,
        reason: DecisionReason,
        message: String,
        situation: FeatureVector,
    },
    Probabilistic {
        batting_team: String,
        batting_win_pct: f64,
        bowling_team: String,
        bowling_win_pct: f64,
        situation: FeatureVector,
    },
}

impl PredictionReport {
    pub fn build(state: &MatchState, result: &PredictionResult) -> Self {
        let situation = || FeatureVector::new(state, &DerivedFeatures::derive(state));
        match result {
            PredictionResult::Rejected { reason } => PredictionReport::Rejected {
                reason: reason.to_string(),
                message: rejected_message(reason).to_string(),
            },
            PredictionResult::Decided { winner, reason } => PredictionReport::Decided {
                winner: *winner,
                winner_team: winner.team(state).map(str::to_string),
                reason: *reason,
                message: decided_message(*reason, state),
                situation: situation(),
            },
            PredictionResult::Probabilistic {
                batting_win_prob,
                bowling_win_prob,
            } => PredictionReport::Probabilistic {
                batting_team: state.batting_team.clone(),
                batting_win_pct: percent(*batting_win_prob),
                bowling_team: state.bowling_team.clone(),
                bowling_win_pct: percent(*bowling_win_prob),
                situation: situation(),
            },
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PredictionReport::Rejected { .. })
    }
}

/// Probability as a percentage rounded to two decimals.
fn percent(p: f64) -> f64 {
    (p * 10_000.0).round() / 100.0
}

fn rejected_message(reason: &ValidationError) -> &'static str {
    match reason {
        ValidationError::SameTeams => "Batting and Bowling teams cannot be the same.",
        ValidationError::ZeroOvers => "Overs cannot be zero to calculate CRR.",
    }
}

fn decided_message(reason: DecisionReason, state: &MatchState) -> String {
    let bat = &state.batting_team;
    let bowl = &state.bowling_team;
    match reason {
        DecisionReason::AllOutScoresLevel => {
            "Match Drawn! All wickets lost, scores are level.".to_string()
        }
        DecisionReason::ChasedBeforeAllOut => {
            format!("{} chased the target just before losing all wickets!", bat)
        }
        DecisionReason::AllOut => {
            format!("All 10 wickets are lost. Innings is over. {} has won the match.", bowl)
        }
        DecisionReason::TargetChased => format!("{} has chased the target! They win!", bat),
        DecisionReason::LastBallFinish => format!("{} wins with a thrilling finish!", bat),
        DecisionReason::LevelAtOverLimit => {
            "Match Drawn! Scores are level at the end of 20 overs.".to_string()
        }
        DecisionReason::OversExhausted => {
            format!("No balls left. Innings is over. {} has won the match.", bowl)
        }
    }
}
