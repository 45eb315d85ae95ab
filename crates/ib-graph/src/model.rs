//! The finished, styled graph model.

use ib_core::{ClusterId, EdgeId, NodeId, Rgb};
use ib_topology::{Link, NodeKind};
use std::collections::{BTreeSet, HashMap};

/// A styled node, one per topology entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Declared label, or the name.
    pub base_label: String,
    /// Label to draw. Equals `base_label` unless the model is detailed, in
    /// which case it is a record label with one field per declared port.
    pub label: String,
    pub port_count: u32,
    pub fill: Rgb,
    pub outline: Rgb,
}

/// One deduplicated physical link.
///
/// `tail` is the endpoint whose port block produced the edge first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub tail: NodeId,
    pub tail_port: u32,
    pub head: NodeId,
    pub head_port: u32,
    pub color: Rgb,
}

/// HCAs grouped under the switch they hang off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: ClusterId,
    /// The switch the members share. Never a member itself.
    pub owner: NodeId,
    /// HCA members in discovery order.
    pub members: Vec<NodeId>,
    pub fill: Rgb,
}

/// Counts reported to the caller after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphTally {
    pub nodes: usize,
    pub switches: usize,
    pub hcas: usize,
    pub edges: usize,
    pub clusters: usize,
    /// Reverse observations of links that already had an edge.
    pub merged_observations: usize,
    /// Bindings skipped because their remote node was never declared.
    pub skipped_dangling: usize,
}

/// Nodes, edges and clusters ready for export.
///
/// Nodes keep topology insertion order; edges keep creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphModel {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) by_name: HashMap<String, NodeId>,
    pub(crate) detailed: bool,
    pub(crate) optimize_black_bg: bool,
    pub(crate) tally: GraphTally,
}

impl GraphModel {
    /// Return all nodes.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Return all edges.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Return all clusters (empty unless clustering was requested).
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.slot())
    }

    pub fn node_by_name(&self, name: &str) -> Option<&GraphNode> {
        self.by_name.get(name).and_then(|&id| self.node(id))
    }

    /// Both endpoint nodes of an edge, tail first.
    pub fn endpoints(&self, edge: &GraphEdge) -> Option<(&GraphNode, &GraphNode)> {
        Some((self.node(edge.tail)?, self.node(edge.head)?))
    }

    /// Cluster containing a node, if any.
    pub fn cluster_of(&self, node: NodeId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.members.contains(&node))
    }

    /// Whether nodes carry per-port record labels and edges attach to ports.
    pub fn is_detailed(&self) -> bool {
        self.detailed
    }

    pub fn optimized_for_black_bg(&self) -> bool {
        self.optimize_black_bg
    }

    pub fn tally(&self) -> &GraphTally {
        &self.tally
    }

    /// The link structure of the model, orientation-free.
    ///
    /// For a topology without dangling references this equals
    /// `Topology::links()`.
    pub fn links(&self) -> BTreeSet<Link> {
        self.edges
            .iter()
            .filter_map(|edge| {
                let (tail, head) = self.endpoints(edge)?;
                Some(Link::new(
                    (tail.name.clone(), edge.tail_port),
                    (head.name.clone(), edge.head_port),
                ))
            })
            .collect()
    }
}
