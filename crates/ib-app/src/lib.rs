//! ib-app: application service layer.
//!
//! Ties the reader, the graph-model builder and the exporters into one
//! batch run and gives the CLI a single error type.

pub mod error;
pub mod options;
pub mod run_service;

pub use error::{AppError, AppResult};
pub use options::{RunOptions, load_options};
pub use run_service::{OutputPaths, RunReport, RunRequest, run};

/// Name reported in logs and in exported metadata.
pub const PROGRAM_NAME: &str = "InfiniBand-Graphviz-ualization";

/// Crate version, shared by the CLI's `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
