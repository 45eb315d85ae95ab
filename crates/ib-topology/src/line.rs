//! Line parser: one dump line in, one typed event out.
//!
//! The parser is pure and knows nothing about the surrounding file; the
//! "current node" bookkeeping lives in [`crate::builder`].

use regex::Regex;
use std::sync::LazyLock;

use crate::topology::NodeKind;

/// `<TypeToken> <PortCount> "<Name>"` with an optional `# "<Label>"` tail.
static NODE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\w+)\s+(\d+)\s+"(.+?)"(?:\s+#\s+"(.+?)")?"#)
        .expect("node header pattern is valid")
});

/// `[<LocalPort>] ... "<RemoteName>"[<RemotePort>]`, non-greedy in the middle.
static PORT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[(\d+)\].*?"(.+?)"\[(\d+)\]"#).expect("port link pattern is valid")
});

/// What a single dump line declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A switch or HCA header; starts a new port block.
    NodeDeclaration {
        kind: NodeKind,
        port_count: u32,
        name: String,
        label: Option<String>,
    },
    /// One link endpoint of the most recently declared node.
    PortDeclaration {
        local_port: u32,
        remote_name: String,
        remote_port: u32,
    },
    /// Blank line, comment, or anything else the patterns do not recognize.
    Ignorable,
}

/// Classify one line. Surrounding whitespace is trimmed first.
///
/// A node header wins over a port link if both patterns would match.
/// Numeric fields that do not fit a `u32` make the line [`LineEvent::Ignorable`].
pub fn parse_line(line: &str) -> LineEvent {
    let line = line.trim();
    if line.is_empty() {
        return LineEvent::Ignorable;
    }

    if let Some(event) = parse_node_header(line) {
        return event;
    }
    if let Some(event) = parse_port_link(line) {
        return event;
    }
    LineEvent::Ignorable
}

fn parse_node_header(line: &str) -> Option<LineEvent> {
    let caps = NODE_HEADER.captures(line)?;
    let port_count = caps[2].parse::<u32>().ok()?;
    Some(LineEvent::NodeDeclaration {
        kind: NodeKind::from_type_token(&caps[1]),
        port_count,
        name: caps[3].to_string(),
        label: caps.get(4).map(|m| m.as_str().to_string()),
    })
}

fn parse_port_link(line: &str) -> Option<LineEvent> {
    let caps = PORT_LINK.captures(line)?;
    Some(LineEvent::PortDeclaration {
        local_port: caps[1].parse().ok()?,
        remote_name: caps[2].to_string(),
        remote_port: caps[3].parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind, port_count: u32, name: &str, label: Option<&str>) -> LineEvent {
        LineEvent::NodeDeclaration {
            kind,
            port_count,
            name: name.into(),
            label: label.map(Into::into),
        }
    }

    #[test]
    fn switch_header_with_label() {
        let line = r#"Switch	36 "S-0002c902004a8a40"		# "MF0;switch1:IS5030/U1" enhanced port 0 lid 1 lmc 0"#;
        assert_eq!(
            parse_line(line),
            node(
                NodeKind::Switch,
                36,
                "S-0002c902004a8a40",
                Some("MF0;switch1:IS5030/U1")
            )
        );
    }

    #[test]
    fn hca_header_without_label() {
        assert_eq!(
            parse_line(r#"Ca 2 "H-0002c90300a1b2c3""#),
            node(NodeKind::Hca, 2, "H-0002c90300a1b2c3", None)
        );
    }

    #[test]
    fn type_token_is_case_insensitive() {
        let LineEvent::NodeDeclaration { kind, .. } = parse_line(r#"SWITCH 4 "s""#) else {
            panic!("expected a node declaration");
        };
        assert_eq!(kind, NodeKind::Switch);

        let LineEvent::NodeDeclaration { kind, .. } = parse_line(r#"switchx 4 "s""#) else {
            panic!("expected a node declaration");
        };
        assert_eq!(kind, NodeKind::Switch);
    }

    #[test]
    fn port_link_skips_intervening_text() {
        let line = r#"[1](2c90300a1b2c4) 	"S-0002c902004a8a40"[3]		# lid 4 lmc 0 "MF0;switch1" lid 1 4xQDR"#;
        assert_eq!(
            parse_line(line),
            LineEvent::PortDeclaration {
                local_port: 1,
                remote_name: "S-0002c902004a8a40".into(),
                remote_port: 3,
            }
        );
    }

    #[test]
    fn port_link_takes_first_bracketed_remote() {
        let line = r#"[7]	"H-1"[1](abc)	# "node "x"[9]""#;
        assert_eq!(
            parse_line(line),
            LineEvent::PortDeclaration {
                local_port: 7,
                remote_name: "H-1".into(),
                remote_port: 1,
            }
        );
    }

    #[test]
    fn blank_and_comment_lines_are_ignorable() {
        for line in ["", "   \t ", "# Topology file: generated on Mon", "vendid=0x2c9", "sysimgguid=0x2c9"] {
            assert_eq!(parse_line(line), LineEvent::Ignorable, "{line:?}");
        }
    }

    #[test]
    fn non_numeric_fields_are_ignorable() {
        assert_eq!(parse_line(r#"Switch many "S1""#), LineEvent::Ignorable);
        assert_eq!(parse_line(r#"[x] "S1"[1]"#), LineEvent::Ignorable);
        assert_eq!(parse_line(r#"[1] "S1"[y]"#), LineEvent::Ignorable);
    }

    #[test]
    fn overflowing_numbers_are_ignorable() {
        assert_eq!(parse_line(r#"Switch 99999999999 "S1""#), LineEvent::Ignorable);
        assert_eq!(parse_line(r#"[99999999999] "S1"[1]"#), LineEvent::Ignorable);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            parse_line("   Switch 1 \"S1\"   \n"),
            node(NodeKind::Switch, 1, "S1", None)
        );
    }
}
