use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read pin header '{}': {source}", .path.display())]
    Header {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
