use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;

/// In-play IPL chase win predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// API listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8501")]
    pub listen_addr: String,

    /// Path to the trained classifier artifact (JSON)
    #[arg(long, env = "MODEL_PATH", default_value = "models/ipl_logreg.json")]
    pub model_path: String,

    /// Optional JSON file listing selectable teams and cities
    #[arg(long, env = "ROSTER_PATH")]
    pub roster_path: Option<String>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr '{}' is not a valid socket address", self.listen_addr);
        }
        if self.model_path.trim().is_empty() {
            anyhow::bail!("model_path must not be empty");
        }
        if let Some(path) = &self.roster_path {
            if !Path::new(path).exists() {
                anyhow::bail!("roster_path '{}' does not exist", path);
            }
        }
        Ok(())
    }
}
