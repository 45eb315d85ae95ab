//! ib-core: shared foundation for the InfiniBand fabric visualizer.
//!
//! Contains:
//! - ids (stable compact IDs for graph-model objects)
//! - color (RGB colors shared by the palette and the exporters)

pub mod color;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use color::Rgb;
pub use ids::*;
