//! Incremental topology builder.
//!
//! The builder is the accumulator of a left fold over the dump's lines:
//! its state is the topology so far plus the name of the node whose port
//! block is currently open.

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{TopologyError, TopologyResult};
use crate::line::{LineEvent, parse_line};
use crate::topology::{BuildPolicy, Node, NodeKind, PortBinding, Topology};

/// Running counts kept while reading a dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopologyStats {
    /// Switches currently in the topology.
    pub switches: usize,
    /// HCAs currently in the topology.
    pub hcas: usize,
    /// Lines read, including ignored ones.
    pub lines: usize,
    /// Lines that matched neither pattern (blank lines included).
    pub ignored_lines: usize,
    /// Port lines attached to a node.
    pub port_lines: usize,
    /// Port lines dropped because no node was declared yet.
    pub orphan_ports: usize,
    /// Node declarations that replaced an earlier node of the same name.
    pub redeclared_nodes: usize,
}

impl TopologyStats {
    pub fn nodes(&self) -> usize {
        self.switches + self.hcas
    }
}

/// A finished topology together with the counts gathered while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopology {
    pub topology: Topology,
    pub stats: TopologyStats,
}

/// Builder for constructing a topology line by line.
///
/// Feed lines with `push_line` (or pre-parsed events with `apply`), then
/// call `finish()` to obtain the immutable result.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    topology: Topology,
    current: Option<String>,
    stats: TopologyStats,
    policy: BuildPolicy,
}

impl TopologyBuilder {
    /// Create a new empty builder.
    pub fn new(policy: BuildPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Name of the node whose port block is open, if any.
    pub fn current_node(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Parse and apply one raw line.
    pub fn push_line(&mut self, line: &str) -> TopologyResult<()> {
        self.stats.lines += 1;
        let event = parse_line(line);
        self.apply(event)
    }

    /// Apply one parsed event. Line numbers in errors refer to lines
    /// counted by `push_line`.
    pub fn apply(&mut self, event: LineEvent) -> TopologyResult<()> {
        match event {
            LineEvent::NodeDeclaration {
                kind,
                port_count,
                name,
                label,
            } => {
                self.declare_node(kind, port_count, name, label);
                Ok(())
            }
            LineEvent::PortDeclaration {
                local_port,
                remote_name,
                remote_port,
            } => self.bind_port(PortBinding {
                local_port,
                remote_name,
                remote_port,
            }),
            LineEvent::Ignorable => {
                self.stats.ignored_lines += 1;
                Ok(())
            }
        }
    }

    fn declare_node(&mut self, kind: NodeKind, port_count: u32, name: String, label: Option<String>) {
        debug!(node = %name, kind = kind.as_str(), port_count, "node declared");
        let mut node = Node::new(name.clone(), kind, port_count);
        node.label = label;

        if let Some(replaced) = self.topology.insert(node) {
            warn!(
                node = %name,
                line = self.stats.lines,
                "node declared again, replacing earlier declaration"
            );
            self.stats.redeclared_nodes += 1;
            self.uncount(replaced.kind);
        }
        self.count(kind);
        self.current = Some(name);
    }

    fn bind_port(&mut self, binding: PortBinding) -> TopologyResult<()> {
        let line = self.stats.lines;
        let Some(node) = self
            .current
            .as_deref()
            .and_then(|name| self.topology.get_mut(name))
        else {
            return match self.policy {
                BuildPolicy::Strict => Err(TopologyError::NoCurrentNode { line }),
                BuildPolicy::Lenient => {
                    debug!(line, remote = %binding.remote_name, "port line before any node declaration, dropped");
                    self.stats.orphan_ports += 1;
                    Ok(())
                }
            };
        };

        if node.ports.contains_key(&binding.local_port) {
            debug!(node = %node.name, port = binding.local_port, line, "port bound twice, keeping the later binding");
        }
        node.ports.insert(binding.local_port, binding);
        self.stats.port_lines += 1;
        Ok(())
    }

    fn count(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Switch => self.stats.switches += 1,
            NodeKind::Hca => self.stats.hcas += 1,
        }
    }

    fn uncount(&mut self, kind: NodeKind) {
        match kind {
            NodeKind::Switch => self.stats.switches -= 1,
            NodeKind::Hca => self.stats.hcas -= 1,
        }
    }

    /// Freeze the builder into its result.
    pub fn finish(self) -> ParsedTopology {
        ParsedTopology {
            topology: self.topology,
            stats: self.stats,
        }
    }
}

/// Read a whole dump held in memory.
pub fn parse_str(text: &str, policy: BuildPolicy) -> TopologyResult<ParsedTopology> {
    text.lines()
        .try_fold(TopologyBuilder::new(policy), |mut builder, line| {
            builder.push_line(line)?;
            Ok(builder)
        })
        .map(TopologyBuilder::finish)
}

/// Read a dump from disk.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// stray byte costs at most the line it sits on.
pub fn read_topology_file(path: &Path, policy: BuildPolicy) -> TopologyResult<ParsedTopology> {
    let bytes = std::fs::read(path).map_err(|source| TopologyError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    parse_str(&text, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_tracks_current_node() {
        let mut builder = TopologyBuilder::new(BuildPolicy::Lenient);
        assert_eq!(builder.current_node(), None);

        builder.push_line(r#"Switch 2 "S1""#).unwrap();
        assert_eq!(builder.current_node(), Some("S1"));
        builder.push_line(r#"[1] "H1"[1]"#).unwrap();

        builder.push_line(r#"Ca 1 "H1""#).unwrap();
        assert_eq!(builder.current_node(), Some("H1"));
        builder.push_line(r#"[1] "S1"[1]"#).unwrap();

        let parsed = builder.finish();
        let s1 = parsed.topology.get("S1").unwrap();
        assert_eq!(s1.ports.len(), 1);
        assert_eq!(s1.port(1).unwrap().remote_name, "H1");
        assert_eq!(parsed.topology.get("H1").unwrap().port(1).unwrap().remote_port, 1);
        assert_eq!(parsed.stats.port_lines, 2);
    }

    #[test]
    fn ignorable_lines_are_counted_not_fatal() {
        let parsed = parse_str("# header\n\nvendid=0x2c9\nSwitch 1 \"S1\"\n", BuildPolicy::Strict).unwrap();
        assert_eq!(parsed.stats.lines, 4);
        assert_eq!(parsed.stats.ignored_lines, 3);
        assert_eq!(parsed.topology.len(), 1);
    }

    #[test]
    fn orphan_port_is_dropped_when_lenient() {
        let parsed = parse_str("[1] \"H1\"[1]\nSwitch 1 \"S1\"\n", BuildPolicy::Lenient).unwrap();
        assert_eq!(parsed.stats.orphan_ports, 1);
        assert!(parsed.topology.get("S1").unwrap().ports.is_empty());
    }

    #[test]
    fn orphan_port_is_fatal_when_strict() {
        let err = parse_str("\n[1] \"H1\"[1]\nSwitch 1 \"S1\"\n", BuildPolicy::Strict).unwrap_err();
        assert!(matches!(err, TopologyError::NoCurrentNode { line: 2 }));
    }

    #[test]
    fn redeclaration_keeps_counts_consistent() {
        let dump = "Switch 1 \"X\"\n[1] \"H\"[1]\nCa 1 \"H\"\nCa 2 \"X\"\n";
        let parsed = parse_str(dump, BuildPolicy::Lenient).unwrap();

        assert_eq!(parsed.stats.redeclared_nodes, 1);
        assert_eq!(parsed.stats.switches, 0);
        assert_eq!(parsed.stats.hcas, 2);
        let x = parsed.topology.get("X").unwrap();
        assert_eq!(x.kind, NodeKind::Hca);
        assert!(x.ports.is_empty());
        assert_eq!(parsed.topology.position("X"), Some(0));
    }

    #[test]
    fn later_binding_of_same_port_wins() {
        let dump = "Switch 1 \"S\"\n[1] \"A\"[1]\n[1] \"B\"[2]\n";
        let parsed = parse_str(dump, BuildPolicy::Lenient).unwrap();
        let binding = parsed.topology.get("S").unwrap().port(1).unwrap();
        assert_eq!(binding.remote_name, "B");
        assert_eq!(binding.remote_port, 2);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let path = Path::new("/definitely/not/here.topo");
        let err = read_topology_file(path, BuildPolicy::Lenient).unwrap_err();
        assert!(matches!(err, TopologyError::Unreadable { .. }));
        assert!(err.to_string().contains("here.topo"));
    }
}
