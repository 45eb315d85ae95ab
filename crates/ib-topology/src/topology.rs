//! Topology data structures.

use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};

/// What kind of fabric device a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// Relays traffic between other nodes.
    Switch,
    /// Host Channel Adapter, an endpoint.
    Hca,
}

impl NodeKind {
    /// Classify a header's type token: anything starting with "switch"
    /// (any case) is a switch, everything else is an HCA.
    pub fn from_type_token(token: &str) -> Self {
        let is_switch = token
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("switch"));
        if is_switch {
            NodeKind::Switch
        } else {
            NodeKind::Hca
        }
    }

    pub fn is_switch(self) -> bool {
        self == NodeKind::Switch
    }

    pub fn is_hca(self) -> bool {
        self == NodeKind::Hca
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Switch => "switch",
            NodeKind::Hca => "hca",
        }
    }
}

/// How the readers and builders react to inconsistent input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildPolicy {
    /// Drop the offending line or edge, log a warning, keep going.
    #[default]
    Lenient,
    /// Abort with a typed error.
    Strict,
}

/// One physical link endpoint as seen from the owning node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    pub local_port: u32,
    pub remote_name: String,
    pub remote_port: u32,
}

/// A switch or HCA together with its bound ports.
///
/// Only ports that appear in the dump are bound; gaps are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub port_count: u32,
    pub label: Option<String>,
    pub ports: BTreeMap<u32, PortBinding>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind, port_count: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            port_count,
            label: None,
            ports: BTreeMap::new(),
        }
    }

    /// The label if one was declared, else the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Binding at a local port, if that port is cabled.
    pub fn port(&self, local_port: u32) -> Option<&PortBinding> {
        self.ports.get(&local_port)
    }
}

/// One endpoint of a link: node name and port number.
pub type Endpoint = (String, u32);

/// An undirected physical link, endpoints stored in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link {
    pub a: Endpoint,
    pub b: Endpoint,
}

impl Link {
    pub fn new(x: Endpoint, y: Endpoint) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }
}

/// Insertion-ordered map from node name to node.
///
/// Order is first appearance in the dump. Re-declaring a name replaces the
/// node in place (last declaration wins, position kept).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub(crate) nodes: IndexMap<String, Node>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Position of a node in insertion order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn switch_count(&self) -> usize {
        self.nodes().filter(|n| n.kind.is_switch()).count()
    }

    pub fn hca_count(&self) -> usize {
        self.nodes().filter(|n| n.kind.is_hca()).count()
    }

    /// Every distinct link observed from either side.
    ///
    /// A link declared by both endpoints appears once. Links pointing at
    /// undeclared nodes are included; callers filter if they need to.
    pub fn links(&self) -> BTreeSet<Link> {
        self.nodes()
            .flat_map(|node| {
                node.ports.values().map(move |binding| {
                    Link::new(
                        (node.name.clone(), binding.local_port),
                        (binding.remote_name.clone(), binding.remote_port),
                    )
                })
            })
            .collect()
    }

    /// Insert or replace a node, returning the replaced one.
    pub(crate) fn insert(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.name.clone(), node)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_token() {
        assert_eq!(NodeKind::from_type_token("Switch"), NodeKind::Switch);
        assert_eq!(NodeKind::from_type_token("sWiTcH"), NodeKind::Switch);
        assert_eq!(NodeKind::from_type_token("Switches"), NodeKind::Switch);
        assert_eq!(NodeKind::from_type_token("Ca"), NodeKind::Hca);
        assert_eq!(NodeKind::from_type_token("Swit"), NodeKind::Hca);
        assert_eq!(NodeKind::from_type_token("Router"), NodeKind::Hca);
    }

    #[test]
    fn display_label_falls_back_to_name() {
        let mut node = Node::new("S1", NodeKind::Switch, 4);
        assert_eq!(node.display_label(), "S1");
        node.label = Some("spine-1".into());
        assert_eq!(node.display_label(), "spine-1");
    }

    #[test]
    fn link_is_orientation_free() {
        let forward = Link::new(("S1".into(), 3), ("H1".into(), 1));
        let backward = Link::new(("H1".into(), 1), ("S1".into(), 3));
        assert_eq!(forward, backward);
        assert_eq!(forward.a, ("H1".to_string(), 1));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut topo = Topology::new();
        topo.insert(Node::new("A", NodeKind::Switch, 1));
        topo.insert(Node::new("B", NodeKind::Hca, 1));
        let old = topo.insert(Node::new("A", NodeKind::Hca, 2));

        assert_eq!(old.map(|n| n.kind), Some(NodeKind::Switch));
        assert_eq!(topo.position("A"), Some(0));
        assert_eq!(topo.get("A").unwrap().port_count, 2);
        assert_eq!(topo.hca_count(), 2);
    }
}
