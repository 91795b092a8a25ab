//! Logistic-regression win classifier loaded from a JSON artifact.
//!
//! The artifact mirrors a one-hot + logistic pipeline: every team and city
//! seen during training carries its own weight (the dropped baseline category
//! is listed with weight 0.0), and each numeric column has one coefficient.
//!
//! ```text
//! z   = intercept + w_bat[team] + w_bowl[team] + w_city[city] + Σ coef·x
//! win = σ(z),  loss = 1 − win
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use super::WinClassifier;
use crate::predictor::{ClassifierError, FeatureVector};
use crate::roster::Roster;

/// Coefficients for the numeric feature columns.
#[derive(Debug, Clone, Deserialize)]
pub struct NumericCoefficients {
    pub runs_left: f64,
    pub balls_left: f64,
    pub wickets: f64,
    pub total_runs_x: f64,
    pub crr: f64,
    pub rrr: f64,
}

/// On-disk model artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticArtifact {
    pub name: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    pub intercept: f64,
    pub batting_team: HashMap<String, f64>,
    pub bowling_team: HashMap<String, f64>,
    pub city: HashMap<String, f64>,
    pub coefficients: NumericCoefficients,
}

pub struct LogisticClassifier {
    artifact: LogisticArtifact,
}

impl LogisticClassifier {
    pub fn new(artifact: LogisticArtifact) -> Self {
        LogisticClassifier { artifact }
    }

    /// Parse an artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: LogisticArtifact = serde_json::from_str(raw)
            .map_err(|e| ClassifierError::Artifact(format!("invalid model JSON: {}", e)))?;
        Ok(Self::new(artifact))
    }

    /// Load the artifact once at startup.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact {}", path.display()))?;
        let model = Self::from_json(&raw)
            .with_context(|| format!("Failed to load model artifact {}", path.display()))?;
        info!(
            "Loaded classifier '{}' ({} teams, {} cities, trained {})",
            model.artifact.name,
            model.artifact.batting_team.len(),
            model.artifact.city.len(),
            model
                .artifact
                .trained_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "at unknown time".to_string())
        );
        Ok(model)
    }

    /// Roster entries the artifact has no weight for, as `column: value`.
    pub fn missing_categories(&self, roster: &Roster) -> Vec<String> {
        let a = &self.artifact;
        let mut missing = Vec::new();
        for team in roster.teams() {
            if !a.batting_team.contains_key(&team) {
                missing.push(format!("batting_team: {}", team));
            }
            if !a.bowling_team.contains_key(&team) {
                missing.push(format!("bowling_team: {}", team));
            }
        }
        for city in roster.cities() {
            if !a.city.contains_key(&city) {
                missing.push(format!("city: {}", city));
            }
        }
        missing
    }

    fn logit(&self, fv: &FeatureVector) -> Result<f64, ClassifierError> {
        let a = &self.artifact;
        let c = &a.coefficients;

        let numeric = [
            ("runs_left", fv.runs_left as f64, c.runs_left),
            ("balls_left", fv.balls_left as f64, c.balls_left),
            ("wickets", fv.wickets as f64, c.wickets),
            ("total_runs_x", fv.total_runs_x as f64, c.total_runs_x),
            ("crr", fv.crr, c.crr),
            ("rrr", fv.rrr, c.rrr),
        ];

        let mut z = a.intercept
            + category_weight(&a.batting_team, "batting_team", &fv.batting_team)?
            + category_weight(&a.bowling_team, "bowling_team", &fv.bowling_team)?
            + category_weight(&a.city, "city", &fv.city)?;
        for (column, x, coef) in numeric {
            if !x.is_finite() {
                return Err(ClassifierError::NonFinite(column));
            }
            z += coef * x;
        }
        Ok(z)
    }
}

fn category_weight(
    weights: &HashMap<String, f64>,
    column: &'static str,
    value: &str,
) -> Result<f64, ClassifierError> {
    weights
        .get(value)
        .copied()
        .ok_or_else(|| ClassifierError::UnknownCategory {
            column,
            value: value.to_string(),
        })
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

impl WinClassifier for LogisticClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        let z = self.logit(features)?;
        let win = sigmoid(z);
        if !win.is_finite() {
            return Err(ClassifierError::InvalidOutput(win));
        }
        Ok([1.0 - win, win])
    }

    fn name(&self) -> &str {
        &self.artifact.name
    }
}
