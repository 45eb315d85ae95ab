//! Graphviz DOT output.
//!
//! The document is an undirected, non-strict graph. Clusters come first so
//! Graphviz places their members before the free-standing declarations.

use ib_graph::{BLACK, GraphModel};
use std::io::{self, Write};
use std::path::Path;

use crate::error::{ExportError, ExportResult};

/// Graph name written into the document.
pub const GRAPH_NAME: &str = "Fat-tree";

/// Page size in inches: 12 letter pages in each direction.
const PAGE_SIZE: &str = "93.0,123.0!";

static INDENT: &str = "\t";

/// Write the model as a DOT document.
pub fn write_dot<W: Write>(graph: &GraphModel, out: &mut W) -> io::Result<()> {
    writeln!(out, "graph {} {{", quote(GRAPH_NAME))?;

    let mut graph_attrs = vec![
        ("overlap", "scale".to_string()),
        ("rankdir", "TB".to_string()),
        ("ranksep", "1.0".to_string()),
        ("size", quote(PAGE_SIZE)),
        ("splines", "line".to_string()),
    ];
    if graph.optimized_for_black_bg() {
        graph_attrs.insert(0, ("bgcolor", quote(&BLACK.to_string())));
    }
    writeln!(out, "{INDENT}graph [{}];", attr_list(&graph_attrs))?;

    let shape = if graph.is_detailed() { "Mrecord" } else { "rectangle" };
    writeln!(
        out,
        "{INDENT}node [fontsize=24, margin=0.2, shape={shape}, style=filled];"
    )?;
    writeln!(out, "{INDENT}edge [penwidth=4];")?;

    for cluster in graph.clusters() {
        writeln!(out, "{INDENT}subgraph cluster{} {{", cluster.id)?;
        writeln!(
            out,
            "{INDENT}{INDENT}graph [fillcolor={}, style=filled];",
            quote(&cluster.fill.to_string())
        )?;
        for member in cluster.members.iter().filter_map(|&id| graph.node(id)) {
            writeln!(out, "{INDENT}{INDENT}{};", quote(&member.name))?;
        }
        writeln!(out, "{INDENT}}}")?;
    }

    for node in graph.nodes() {
        let attrs = [
            ("color", quote(&node.outline.to_string())),
            ("fillcolor", quote(&node.fill.to_string())),
            ("label", quote(&node.label)),
        ];
        writeln!(out, "{INDENT}{} [{}];", quote(&node.name), attr_list(&attrs))?;
    }

    for edge in graph.edges() {
        let Some((tail, head)) = graph.endpoints(edge) else {
            continue;
        };
        let mut attrs = vec![("color", quote(&edge.color.to_string()))];
        if graph.is_detailed() {
            attrs.push(("headport", edge.head_port.to_string()));
            attrs.push(("tailport", edge.tail_port.to_string()));
        }
        writeln!(
            out,
            "{INDENT}{} -- {} [{}];",
            quote(&tail.name),
            quote(&head.name),
            attr_list(&attrs)
        )?;
    }

    writeln!(out, "}}")
}

/// Render the model to an in-memory DOT string.
pub fn to_dot_string(graph: &GraphModel) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_dot(graph, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the DOT document to `path`.
pub fn save_dot(graph: &GraphModel, path: &Path) -> ExportResult<()> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(write_err)?;
    let mut out = io::BufWriter::new(file);
    write_dot(graph, &mut out).map_err(write_err)?;
    out.flush().map_err(write_err)
}

fn attr_list(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Double-quote a DOT ID. Backslashes pass through so record escapes survive.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_double_quotes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote(r"a\|b"), r#""a\|b""#);
    }

    #[test]
    fn attr_list_joins_pairs() {
        let attrs = [("a", "1".to_string()), ("b", "\"x\"".to_string())];
        assert_eq!(attr_list(&attrs), "a=1, b=\"x\"");
    }
}
