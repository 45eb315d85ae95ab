//! Error types for the ib-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Topology(#[from] ib_topology::TopologyError),

    #[error(transparent)]
    Graph(#[from] ib_graph::GraphError),

    #[error(transparent)]
    Export(#[from] ib_export::ExportError),

    #[error("Failed to read options file: {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid options file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error(
        "Invalid log level: {0}\n\tLog level must be set to one of the following:\n\t   CRITICAL <- Least verbose\n\t   ERROR\n\t   WARNING\n\t   INFO\n\t   DEBUG    <- Most verbose"
    )]
    InvalidLogLevel(String),
}

/// Result type for ib-app operations.
pub type AppResult<T> = Result<T, AppError>;
