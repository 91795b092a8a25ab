use super::error::ValidationError;
use super::models::MatchState;

/// Reject match states the resolver cannot reason about. First failing rule wins.
pub fn validate(state: &MatchState) -> Result<(), ValidationError> {
    if state.batting_team == state.bowling_team {
        return Err(ValidationError::SameTeams);
    }
    // Current run rate is undefined before the first ball.
    if state.overs == 0.0 {
        return Err(ValidationError::ZeroOvers);
    }
    Ok(())
}
