//! GEXF 1.3 output for Gephi.
//!
//! One `node` per graph node and one `edge` per graph edge, each with a
//! `viz:color`. Port detail and clusters have no GEXF counterpart and are
//! left out.

use ib_core::Rgb;
use ib_graph::GraphModel;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;
use std::path::Path;

use crate::error::{ExportError, ExportResult};

const GEXF_NS: &str = "http://www.gexf.net/1.3";
const VIZ_NS: &str = "http://www.gexf.net/1.3/viz";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://www.gexf.net/1.3 http://www.gexf.net/1.3/gexf.xsd";

/// Document metadata written to `<meta>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GexfMeta {
    /// `YYYY-MM-DD`.
    pub last_modified: String,
    pub creator: String,
    pub description: String,
}

impl GexfMeta {
    /// Metadata dated today (local time).
    pub fn today(creator: impl Into<String>, source: &Path) -> Self {
        Self {
            last_modified: chrono::Local::now().format("%Y-%m-%d").to_string(),
            creator: creator.into(),
            description: format!("Graph generated from file '{}'", source.display()),
        }
    }
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> ExportResult<()> {
    writer.write_event(event).map_err(|e| ExportError::Gexf {
        message: e.to_string(),
    })
}

fn open(writer: &mut XmlWriter, tag: BytesStart<'_>) -> ExportResult<()> {
    emit(writer, Event::Start(tag))
}

fn close(writer: &mut XmlWriter, name: &str) -> ExportResult<()> {
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> ExportResult<()> {
    open(writer, BytesStart::new(name))?;
    let escaped = partial_escape(text);
    emit(writer, Event::Text(BytesText::from_escaped(escaped)))?;
    close(writer, name)
}

fn viz_color(color: Rgb, alpha: Option<&str>) -> BytesStart<'static> {
    let (r, g, b) = color.channels();
    let mut tag = BytesStart::new("viz:color");
    tag.push_attribute(("r", r.to_string().as_str()));
    tag.push_attribute(("g", g.to_string().as_str()));
    tag.push_attribute(("b", b.to_string().as_str()));
    if let Some(a) = alpha {
        tag.push_attribute(("a", a));
    }
    tag
}

/// Serialize the model as an indented GEXF document.
pub fn to_gexf_string(graph: &GraphModel, meta: &GexfMeta) -> ExportResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("gexf");
    root.push_attribute(("xmlns", GEXF_NS));
    root.push_attribute(("version", "1.3"));
    root.push_attribute(("xmlns:viz", VIZ_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    open(&mut writer, root)?;

    let mut meta_tag = BytesStart::new("meta");
    meta_tag.push_attribute(("lastmodifieddate", meta.last_modified.as_str()));
    open(&mut writer, meta_tag)?;
    text_element(&mut writer, "creator", &meta.creator)?;
    text_element(&mut writer, "description", &meta.description)?;
    close(&mut writer, "meta")?;

    let mut graph_tag = BytesStart::new("graph");
    graph_tag.push_attribute(("defaultedgetype", "undirected"));
    graph_tag.push_attribute(("mode", "static"));
    open(&mut writer, graph_tag)?;

    open(&mut writer, BytesStart::new("nodes"))?;
    for node in graph.nodes() {
        let mut tag = BytesStart::new("node");
        tag.push_attribute(("id", node.name.as_str()));
        tag.push_attribute(("label", node.base_label.as_str()));
        open(&mut writer, tag)?;
        emit(&mut writer, Event::Empty(viz_color(node.outline, Some("0.0"))))?;
        close(&mut writer, "node")?;
    }
    close(&mut writer, "nodes")?;

    open(&mut writer, BytesStart::new("edges"))?;
    for (n, edge) in graph.edges().iter().enumerate() {
        let Some((tail, head)) = graph.endpoints(edge) else {
            continue;
        };
        let id = (n + 1).to_string();
        let label = format!("{} -- {}", tail.name, head.name);
        let mut tag = BytesStart::new("edge");
        tag.push_attribute(("id", id.as_str()));
        tag.push_attribute(("source", tail.name.as_str()));
        tag.push_attribute(("target", head.name.as_str()));
        tag.push_attribute(("label", label.as_str()));
        open(&mut writer, tag)?;
        emit(&mut writer, Event::Empty(viz_color(edge.color, None)))?;
        close(&mut writer, "edge")?;
    }
    close(&mut writer, "edges")?;

    close(&mut writer, "graph")?;
    close(&mut writer, "gexf")?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| ExportError::Gexf {
        message: e.to_string(),
    })
}

/// Write the GEXF document to `path`.
pub fn save_gexf(graph: &GraphModel, meta: &GexfMeta, path: &Path) -> ExportResult<()> {
    let xml = to_gexf_string(graph, meta)?;
    std::fs::write(path, xml).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viz_color_attributes() {
        let tag = viz_color(Rgb::new(255, 128, 0), Some("0.0"));
        let attrs: Vec<(String, String)> = tag
            .attributes()
            .filter_map(Result::ok)
            .map(|a| {
                (
                    String::from_utf8_lossy(a.key.as_ref()).into_owned(),
                    String::from_utf8_lossy(&a.value).into_owned(),
                )
            })
            .collect();
        assert_eq!(
            attrs,
            [
                ("r".to_string(), "255".to_string()),
                ("g".to_string(), "128".to_string()),
                ("b".to_string(), "0".to_string()),
                ("a".to_string(), "0.0".to_string()),
            ]
        );
    }

    #[test]
    fn meta_describes_source() {
        let meta = GexfMeta::today("tool", Path::new("/data/fabric.topo"));
        assert_eq!(meta.description, "Graph generated from file '/data/fabric.topo'");
        assert_eq!(meta.last_modified.len(), 10);
    }
}
