use quire_afm::MetricsError;
use quire_traits::{GenerationError, SourceError};
use thiserror::Error;

/// Top-level error for font loading and document output.
#[derive(Error, Debug)]
pub enum QuireError {
    #[error("Metrics source error: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to load metrics '{name}': {source}")]
    Metrics {
        name: String,
        #[source]
        source: MetricsError,
    },

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration is invalid: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
