//! ib-topology: reads an InfiniBand fabric dump into a typed adjacency model.
//!
//! Provides:
//! - A pure line parser (`parse_line`) turning one dump line into a `LineEvent`
//! - A `TopologyBuilder` that folds events into an insertion-ordered `Topology`
//! - Post-read reference validation (dangling remote names, out-of-range ports)
//!
//! # Example
//!
//! ```
//! use ib_topology::{parse_str, BuildPolicy, NodeKind};
//!
//! let dump = "Switch 2 \"S1\"\n[1] \"H1\"[1]\nCa 1 \"H1\"\n[1] \"S1\"[1]\n";
//! let parsed = parse_str(dump, BuildPolicy::Lenient).unwrap();
//!
//! assert_eq!(parsed.stats.switches, 1);
//! assert_eq!(parsed.stats.hcas, 1);
//! assert_eq!(parsed.topology.get("H1").unwrap().kind, NodeKind::Hca);
//! ```

pub mod builder;
pub mod error;
pub mod line;
pub mod topology;
pub mod validate;

// Re-exports for ergonomics
pub use builder::{ParsedTopology, TopologyBuilder, TopologyStats, parse_str, read_topology_file};
pub use error::{TopologyError, TopologyResult};
pub use line::{LineEvent, parse_line};
pub use topology::{BuildPolicy, Link, Node, NodeKind, PortBinding, Topology};
pub use validate::{DanglingReference, dangling_references, ports_beyond_declared_count};
