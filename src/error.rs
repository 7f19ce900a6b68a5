use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("'{}' is not a valid directory", .0.display())]
    InvalidSourceRoot(PathBuf),

    #[error("Unable to reset destination '{}': {source}", .path.display())]
    DestinationReset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}
