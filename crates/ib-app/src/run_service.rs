//! One batch run: read the dump, build the model, write the artifacts.

use ib_export::{GexfMeta, LayoutEngine, render_pdf, save_dot, save_gexf};
use ib_graph::{GraphTally, build_graph};
use ib_topology::{TopologyStats, dangling_references, ports_beyond_declared_count, read_topology_file};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::PROGRAM_NAME;
use crate::error::AppResult;
use crate::options::RunOptions;

/// Input for `run`.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest<'a> {
    pub topology_path: &'a Path,
    pub options: &'a RunOptions,
}

/// Where a run writes its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dot: PathBuf,
    pub pdf: PathBuf,
    pub gexf: PathBuf,
}

impl OutputPaths {
    /// `<dir>/<input file name>.{dot,pdf,gexf}`.
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Self {
        let base = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "topology".to_string());
        let dir = output_dir.unwrap_or_else(|| Path::new(""));
        Self {
            dot: dir.join(format!("{base}.dot")),
            pdf: dir.join(format!("{base}.pdf")),
            gexf: dir.join(format!("{base}.gexf")),
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub topology: TopologyStats,
    pub graph: GraphTally,
    pub dot_path: PathBuf,
    pub pdf_path: Option<PathBuf>,
    pub gexf_path: Option<PathBuf>,
}

/// Execute the full pipeline for one topology file.
pub fn run(request: &RunRequest<'_>) -> AppResult<RunReport> {
    let options = request.options;
    let input = request.topology_path;

    let parsed = read_topology_file(input, options.policy())?;
    info!(
        path = %input.display(),
        lines = parsed.stats.lines,
        ignored = parsed.stats.ignored_lines,
        "topology read"
    );
    if parsed.stats.orphan_ports > 0 {
        warn!(count = parsed.stats.orphan_ports, "port lines before the first node were dropped");
    }
    let dangling = dangling_references(&parsed.topology);
    if let Some(first) = dangling.first() {
        warn!(
            count = dangling.len(),
            first_node = %first.node,
            first_port = first.local_port,
            first_remote = %first.remote_name,
            "ports refer to undeclared nodes"
        );
    }
    let beyond = ports_beyond_declared_count(&parsed.topology);
    if !beyond.is_empty() {
        warn!(count = beyond.len(), "ports bound above their node's declared port count");
    }

    let graph = build_graph(&parsed.topology, &options.graph_config())?;
    let tally = *graph.tally();
    info!(
        "Total number of nodes: {}\nTotal number of Switches: {}\nTotal number of HCAs: {}\nTotal number of Edges: {}",
        tally.nodes, tally.switches, tally.hcas, tally.edges
    );

    let paths = OutputPaths::for_input(input, options.output_dir.as_deref());

    save_dot(&graph, &paths.dot)?;
    info!("The dot file has been saved in the file '{}'.", paths.dot.display());

    let pdf_path = if options.render_pdf {
        let engine = LayoutEngine::new(options.layout_program.clone());
        render_pdf(&engine, &paths.dot, &paths.pdf)?;
        info!("The rendered file has been saved in the file '{}'.", paths.pdf.display());
        Some(paths.pdf)
    } else {
        None
    };

    let gexf_path = if options.export_gexf {
        let source = std::fs::canonicalize(input).unwrap_or_else(|_| input.to_path_buf());
        let meta = GexfMeta::today(PROGRAM_NAME, &source);
        save_gexf(&graph, &meta, &paths.gexf)?;
        info!("The gexf file has been saved in the file '{}'.", paths.gexf.display());
        info!("{}", gephi_howto(&paths.gexf));
        Some(paths.gexf)
    } else {
        None
    };

    Ok(RunReport {
        topology: parsed.stats,
        graph: tally,
        dot_path: paths.dot,
        pdf_path,
        gexf_path,
    })
}

fn gephi_howto(gexf: &Path) -> String {
    format!(
        "If you want to generate a beautiful graph with Gephi, follow these steps:\n\
         \x20 1. Load the file '{}' in Gephi.\n\
         \x20 2. Go to the 'Overview' tab and choose a placement layout (ForceAtlas 2 works well).\n\
         \x20 3. Tune as needed and run the layout until you are satisfied with the placement, then press stop.\n\
         \x20 4. Go to the 'Preview' tab and press the 'Refresh' button.\n\
         \x20 5. Under the 'Edges' group, untick 'Curved' and change the edge 'Color' from 'mixed' to 'original'.\n\
         \x20 6. Choose a 'black' background if you used --optimized-for-black-bg (-o), and refresh again.\n\
         \x20 7. Press the 'Export SVG/PDF/PNG' button to save the layout.",
        gexf.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_use_input_file_name() {
        let paths = OutputPaths::for_input(Path::new("/data/fabrics/k18.topo"), None);
        assert_eq!(paths.dot, PathBuf::from("k18.topo.dot"));
        assert_eq!(paths.pdf, PathBuf::from("k18.topo.pdf"));
        assert_eq!(paths.gexf, PathBuf::from("k18.topo.gexf"));

        let paths = OutputPaths::for_input(Path::new("k18.topo"), Some(Path::new("/out")));
        assert_eq!(paths.dot, PathBuf::from("/out/k18.topo.dot"));
    }

    #[test]
    fn howto_names_the_file() {
        assert!(gephi_howto(Path::new("x.gexf")).contains("Load the file 'x.gexf'"));
    }
}
