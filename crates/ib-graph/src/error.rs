//! Graph-model error types.

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph-model construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A port points at a node that is never declared (strict policy only).
    #[error("Port {port} of node '{node}' refers to undeclared node '{remote}'")]
    DanglingPortReference {
        node: String,
        port: u32,
        remote: String,
    },
}
