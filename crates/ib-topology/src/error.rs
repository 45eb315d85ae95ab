//! Topology-specific error types.

use std::path::PathBuf;
use thiserror::Error;

pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised while reading a fabric dump.
///
/// Lines that match neither pattern are not errors; they are skipped.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The dump could not be opened or read.
    #[error("Cannot read topology file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A port line appeared before any node declaration (strict policy only).
    #[error("Port declaration on line {line} has no preceding node declaration")]
    NoCurrentNode { line: usize },
}
