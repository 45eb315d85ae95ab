//! Post-read reference checks.
//!
//! The dump does not declare nodes before they are referenced, so these
//! checks only make sense once the whole file has been read.

use crate::topology::Topology;

/// A port binding whose remote node is never declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub node: String,
    pub local_port: u32,
    pub remote_name: String,
}

/// All bindings pointing at undeclared nodes, in topology order.
pub fn dangling_references(topology: &Topology) -> Vec<DanglingReference> {
    topology
        .nodes()
        .flat_map(|node| {
            node.ports
                .values()
                .filter(|binding| !topology.contains(&binding.remote_name))
                .map(move |binding| DanglingReference {
                    node: node.name.clone(),
                    local_port: binding.local_port,
                    remote_name: binding.remote_name.clone(),
                })
        })
        .collect()
}

/// `(node name, local port)` for every binding above the declared port count.
pub fn ports_beyond_declared_count(topology: &Topology) -> Vec<(String, u32)> {
    topology
        .nodes()
        .flat_map(|node| {
            node.ports
                .range(node.port_count.saturating_add(1)..)
                .map(move |(&port, _)| (node.name.clone(), port))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildPolicy, parse_str};

    #[test]
    fn finds_undeclared_remote() {
        let dump = "Switch 2 \"S1\"\n[1] \"H1\"[1]\n[2] \"ghost\"[1]\nCa 1 \"H1\"\n[1] \"S1\"[1]\n";
        let topo = parse_str(dump, BuildPolicy::Lenient).unwrap().topology;

        let dangling = dangling_references(&topo);
        assert_eq!(
            dangling,
            vec![DanglingReference {
                node: "S1".into(),
                local_port: 2,
                remote_name: "ghost".into(),
            }]
        );
    }

    #[test]
    fn forward_references_are_not_dangling() {
        let dump = "Ca 1 \"H1\"\n[1] \"S1\"[4]\nSwitch 8 \"S1\"\n[4] \"H1\"[1]\n";
        let topo = parse_str(dump, BuildPolicy::Strict).unwrap().topology;
        assert!(dangling_references(&topo).is_empty());
    }

    #[test]
    fn flags_ports_above_port_count() {
        let dump = "Switch 2 \"S1\"\n[1] \"H1\"[1]\n[5] \"H2\"[1]\n";
        let topo = parse_str(dump, BuildPolicy::Lenient).unwrap().topology;
        assert_eq!(ports_beyond_declared_count(&topo), vec![("S1".to_string(), 5)]);
    }
}
