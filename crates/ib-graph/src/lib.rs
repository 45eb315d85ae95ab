//! ib-graph: styled graph model built from a fabric topology.
//!
//! Provides:
//! - The graph model handed to exporters (`GraphModel`, `GraphNode`, `GraphEdge`, `Cluster`)
//! - The fixed color palettes for both background modes
//! - `build_graph`, which deduplicates links, styles everything and groups
//!   HCAs into per-switch clusters
//!
//! # Example
//!
//! ```
//! use ib_graph::{build_graph, GraphConfig};
//! use ib_topology::{parse_str, BuildPolicy};
//!
//! let dump = "Switch 1 \"S1\"\n[1] \"H1\"[1]\nCa 1 \"H1\"\n[1] \"S1\"[1]\n";
//! let topology = parse_str(dump, BuildPolicy::Lenient).unwrap().topology;
//! let graph = build_graph(&topology, &GraphConfig::default()).unwrap();
//!
//! assert_eq!(graph.nodes().len(), 2);
//! assert_eq!(graph.edges().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod palette;

// Re-exports for ergonomics
pub use builder::{GraphConfig, build_graph};
pub use error::{GraphError, GraphResult};
pub use model::{Cluster, GraphEdge, GraphModel, GraphNode, GraphTally};
pub use palette::{BLACK, BLACK_BACKGROUND, CLUSTER_FILL, Palette, STANDARD};
