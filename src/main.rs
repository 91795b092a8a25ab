use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod api;
mod classifier;
mod config;
mod predictor;
mod roster;

use api::AppState;
use classifier::LogisticClassifier;
use config::Config;
use predictor::WinPredictor;
use roster::Roster;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let roster = match &config.roster_path {
        Some(path) => Roster::load(path)?,
        None => Roster::default(),
    };
    info!(
        "Roster: {} teams, {} cities",
        roster.teams().len(),
        roster.cities().len()
    );

    // Loaded once; shared read-only by every request.
    let classifier = LogisticClassifier::load(&config.model_path)?;
    let missing = classifier.missing_categories(&roster);
    if !missing.is_empty() {
        anyhow::bail!(
            "model artifact {} has no weights for roster entries: {}",
            config.model_path,
            missing.join(", ")
        );
    }
    let predictor = WinPredictor::new(Arc::new(classifier));

    let app = api::router(AppState {
        predictor,
        roster: Arc::new(roster),
    });
    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Win predictor listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
