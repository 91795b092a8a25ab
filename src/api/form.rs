use serde::Deserialize;
use thiserror::Error;

use crate::predictor::models::MAX_WICKETS;
use crate::predictor::MatchState;
use crate::roster::Roster;

/// Maximum overs in a T20 innings.
const MAX_OVERS: f64 = 20.0;

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub target: u32,
    pub current_score: u32,
    pub overs: f64,
    /// Wickets fallen
    pub wickets: u8,
}

/// Input outside the range the form widgets allow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("unknown team: {0}")]
    UnknownTeam(String),
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("target must be at least 1")]
    TargetTooLow,
    #[error("overs must be between 0.0 and 20.0, got {0}")]
    OversOutOfRange(f64),
    #[error("wickets must be between 0 and 10, got {0}")]
    WicketsOutOfRange(u8),
}

impl PredictRequest {
    pub fn into_match_state(self, roster: &Roster) -> Result<MatchState, FormError> {
        for team in [&self.batting_team, &self.bowling_team] {
            if !roster.has_team(team) {
                return Err(FormError::UnknownTeam(team.clone()));
            }
        }
        if !roster.has_city(&self.city) {
            return Err(FormError::UnknownCity(self.city));
        }
        if self.target < 1 {
            return Err(FormError::TargetTooLow);
        }
        if !self.overs.is_finite() || !(0.0..=MAX_OVERS).contains(&self.overs) {
            return Err(FormError::OversOutOfRange(self.overs));
        }
        if self.wickets > MAX_WICKETS {
            return Err(FormError::WicketsOutOfRange(self.wickets));
        }

        Ok(MatchState {
            batting_team: self.batting_team,
            bowling_team: self.bowling_team,
            city: self.city,
            target: self.target,
            current_score: self.current_score,
            overs: self.overs,
            wickets_lost: self.wickets,
        })
    }
}
