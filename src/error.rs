use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Evolution error: {0}")]
    Evolution(String),

    #[error("Failed to write snapshot {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CircuitError>;
