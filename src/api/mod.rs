pub mod form;
pub mod report;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::predictor::{ClassifierError, WinPredictor};
use crate::roster::Roster;
use form::PredictRequest;
use report::PredictionReport;

#[derive(Clone)]
pub struct AppState {
    pub predictor: WinPredictor,
    pub roster: Arc<Roster>,
}

#[derive(Debug, Serialize)]
pub struct Options {
    pub teams: Vec<String>,
    pub cities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub model: String,
}

/// Build the Axum router for the prediction API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/options", get(options_handler))
        .route("/api/predict", post(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(Health {
        status: "ok",
        model: state.predictor.classifier_name().to_string(),
    })
}

/// GET /api/options
async fn options_handler(State(state): State<Arc<AppState>>) -> Json<Options> {
    Json(Options {
        teams: state.roster.teams(),
        cities: state.roster.cities(),
    })
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<(StatusCode, Json<PredictionReport>), (StatusCode, String)> {
    let match_state = req.into_match_state(&state.roster).map_err(|e| {
        warn!("Invalid prediction request: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    let result = state.predictor.predict(&match_state).map_err(|e| {
        error!("Classifier failed for {:?}: {}", match_state, e);
        let status = match e {
            ClassifierError::Artifact(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, format!("prediction failed: {}", e))
    })?;

    let report = PredictionReport::build(&match_state, &result);
    let status = if report.is_rejected() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(report)))
}
