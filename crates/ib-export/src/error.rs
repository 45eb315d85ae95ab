//! Export error types.

use std::path::PathBuf;
use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GEXF serialization failed: {message}")]
    Gexf { message: String },

    #[error("Layout program '{program}' failed: {message}")]
    Render { program: String, message: String },
}
