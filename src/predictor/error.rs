use thiserror::Error;

/// Structurally invalid match state. Reported back to the user, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("teams must differ")]
    SameTeams,
    #[error("overs must be greater than zero")]
    ZeroOvers,
}

/// The classifier could not produce a prediction. Fatal to the request.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Model artifact missing, unreadable or malformed
    #[error("model artifact unavailable: {0}")]
    Artifact(String),
    /// Category not seen when the model was trained
    #[error("unknown {column} category: {value}")]
    UnknownCategory { column: &'static str, value: String },
    #[error("feature {0} is not finite")]
    NonFinite(&'static str),
    #[error("classifier produced an invalid probability: {0}")]
    InvalidOutput(f64),
}
