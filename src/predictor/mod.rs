pub mod error;
pub mod models;
pub mod resolver;
pub mod validator;

pub use error::{ClassifierError, ValidationError};
pub use models::{
    DecisionReason, DerivedFeatures, FeatureVector, MatchState, MatchWinner, PredictionResult,
};

use std::sync::Arc;

use tracing::info;

use crate::classifier::WinClassifier;

/// Validates a match state and resolves it, consulting the shared classifier
/// only for matches still in progress.
#[derive(Clone)]
pub struct WinPredictor {
    classifier: Arc<dyn WinClassifier>,
}

impl WinPredictor {
    pub fn new(classifier: Arc<dyn WinClassifier>) -> Self {
        WinPredictor { classifier }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn predict(&self, state: &MatchState) -> Result<PredictionResult, ClassifierError> {
        if let Err(reason) = validator::validate(state) {
            info!("Rejected match state: {}", reason);
            return Ok(PredictionResult::Rejected { reason });
        }
        resolver::resolve(state, self.classifier.as_ref())
    }
}
