pub mod logistic;

pub use logistic::LogisticClassifier;

use crate::predictor::{ClassifierError, FeatureVector};

/// Trait every trained win classifier must implement.
pub trait WinClassifier: Send + Sync {
    /// Return `[loss_probability, win_probability]` for the batting side.
    /// The two values must sum to 1.0.
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ClassifierError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
