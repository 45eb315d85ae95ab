//! Graph-model builder.
//!
//! Walks a finished topology once, in insertion order, and produces the
//! styled model: one node per topology entry, one edge per physical link,
//! and optionally one cluster per switch with HCA neighbors.

use ib_core::{ClusterId, EdgeId, NodeId};
use ib_topology::{BuildPolicy, NodeKind, Topology};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};
use crate::model::{Cluster, GraphEdge, GraphModel, GraphNode, GraphTally};
use crate::palette::{CLUSTER_FILL, Palette};

/// Options for `build_graph`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// Record-shaped nodes with one field per port; edges attach to fields.
    pub detailed: bool,
    /// Group HCAs into clusters by the switch they are cabled to.
    pub use_clusters: bool,
    /// Use the palette tuned for a black canvas.
    pub optimize_black_bg: bool,
    /// What to do with ports pointing at undeclared nodes.
    pub policy: BuildPolicy,
}

/// Canonical identity of a physical link: both `(node, port)` endpoints,
/// smaller first. Both directional observations map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey((NodeId, u32), (NodeId, u32));

impl EdgeKey {
    fn new(x: (NodeId, u32), y: (NodeId, u32)) -> Self {
        if x <= y { Self(x, y) } else { Self(y, x) }
    }
}

/// Cluster bookkeeping: which switch owns which cluster, which HCAs are taken.
#[derive(Debug, Default)]
struct Clustering {
    clusters: Vec<Cluster>,
    by_switch: HashMap<NodeId, usize>,
    assigned: HashSet<NodeId>,
}

impl Clustering {
    /// Put `hca` into the cluster of `switch`, creating that cluster on its
    /// first member. An HCA already in a cluster stays where it is.
    fn claim(&mut self, switch: NodeId, hca: NodeId) {
        if !self.assigned.insert(hca) {
            return;
        }
        let slot = match self.by_switch.get(&switch) {
            Some(&slot) => slot,
            None => {
                let slot = self.clusters.len();
                let id = ClusterId::from_index(slot as u32);
                debug!(cluster = %id, switch = %switch, "cluster opened");
                self.clusters.push(Cluster {
                    id,
                    owner: switch,
                    members: Vec::new(),
                    fill: CLUSTER_FILL,
                });
                self.by_switch.insert(switch, slot);
                slot
            }
        };
        self.clusters[slot].members.push(hca);
    }
}

/// Build the styled graph model for a topology.
///
/// Deterministic: the same topology and config always give the same model.
pub fn build_graph(topology: &Topology, config: &GraphConfig) -> GraphResult<GraphModel> {
    let palette = Palette::for_background(config.optimize_black_bg);

    let nodes = materialize_nodes(topology, palette, config.detailed);
    let by_name: HashMap<String, NodeId> = nodes.iter().map(|n| (n.name.clone(), n.id)).collect();

    let mut tally = GraphTally {
        nodes: nodes.len(),
        switches: nodes.iter().filter(|n| n.kind.is_switch()).count(),
        hcas: nodes.iter().filter(|n| n.kind.is_hca()).count(),
        ..GraphTally::default()
    };

    let mut edges: Vec<GraphEdge> = Vec::new();
    let mut seen: HashSet<EdgeKey> = HashSet::new();
    let mut clustering = Clustering::default();

    for (local, node) in nodes.iter().zip(topology.nodes()) {
        for (&port, binding) in &node.ports {
            if port > node.port_count {
                debug!(node = %node.name, port, port_count = node.port_count, "port above declared port count");
            }

            let Some(&remote_id) = by_name.get(&binding.remote_name) else {
                match config.policy {
                    BuildPolicy::Strict => {
                        return Err(GraphError::DanglingPortReference {
                            node: node.name.clone(),
                            port,
                            remote: binding.remote_name.clone(),
                        });
                    }
                    BuildPolicy::Lenient => {
                        debug!(
                            node = %node.name,
                            port,
                            remote = %binding.remote_name,
                            "port refers to undeclared node, edge skipped"
                        );
                        tally.skipped_dangling += 1;
                        continue;
                    }
                }
            };

            let key = EdgeKey::new((local.id, port), (remote_id, binding.remote_port));
            if !seen.insert(key) {
                tally.merged_observations += 1;
                continue;
            }

            let remote = &nodes[remote_id.slot()];
            let id = EdgeId::from_index(edges.len() as u32);
            debug!(
                edge = %id,
                tail = %local.name,
                tail_port = port,
                head = %remote.name,
                head_port = binding.remote_port,
                "edge created"
            );
            edges.push(GraphEdge {
                id,
                tail: local.id,
                tail_port: port,
                head: remote_id,
                head_port: binding.remote_port,
                color: palette.edge_color(local.kind, remote.kind),
            });

            if config.use_clusters {
                match (local.kind, remote.kind) {
                    (NodeKind::Switch, NodeKind::Hca) => clustering.claim(local.id, remote_id),
                    (NodeKind::Hca, NodeKind::Switch) => clustering.claim(remote_id, local.id),
                    _ => {}
                }
            }
        }
    }

    tally.edges = edges.len();
    tally.clusters = clustering.clusters.len();
    info!(
        nodes = tally.nodes,
        switches = tally.switches,
        hcas = tally.hcas,
        edges = tally.edges,
        clusters = tally.clusters,
        "graph model built"
    );

    Ok(GraphModel {
        nodes,
        edges,
        clusters: clustering.clusters,
        by_name,
        detailed: config.detailed,
        optimize_black_bg: config.optimize_black_bg,
        tally,
    })
}

/// One styled node per topology entry, ids in insertion order.
fn materialize_nodes(topology: &Topology, palette: &Palette, detailed: bool) -> Vec<GraphNode> {
    topology
        .nodes()
        .enumerate()
        .map(|(i, node)| {
            let base_label = node.display_label().to_string();
            let label = if detailed {
                record_label(&base_label, node.port_count)
            } else {
                base_label.clone()
            };
            let color = palette.node_fill(node.kind);
            GraphNode {
                id: NodeId::from_index(i as u32),
                name: node.name.clone(),
                kind: node.kind,
                base_label,
                label,
                port_count: node.port_count,
                fill: color,
                outline: color,
            }
        })
        .collect()
}

/// Record label with one `<n> n` field per declared port, cabled or not.
fn record_label(base: &str, port_count: u32) -> String {
    let mut label = escape_record_text(base);
    for port in 1..=port_count {
        let _ = write!(label, "|<{port}> {port}");
    }
    label
}

/// Backslash-escape the characters Graphviz treats as record syntax.
fn escape_record_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
