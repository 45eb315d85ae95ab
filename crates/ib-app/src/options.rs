//! Run options and the optional YAML options file.

use ib_graph::GraphConfig;
use ib_topology::BuildPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Everything a run can be told to do. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOptions {
    /// Record-shaped nodes with one field per port.
    pub detailed: bool,
    /// Group HCAs by the switch they are cabled to.
    pub use_clusters: bool,
    /// Colors tuned for a black canvas.
    pub optimize_black_bg: bool,
    /// Fail on port lines without a node and on undeclared remote nodes.
    pub strict: bool,
    /// Lay out the DOT file and write a PDF.
    pub render_pdf: bool,
    /// Also write a GEXF document.
    pub export_gexf: bool,
    /// Directory for output files; the working directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Graphviz program used for the PDF layout.
    pub layout_program: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            detailed: false,
            use_clusters: false,
            optimize_black_bg: false,
            strict: false,
            render_pdf: false,
            export_gexf: false,
            output_dir: None,
            layout_program: "neato".to_string(),
        }
    }
}

impl RunOptions {
    pub fn policy(&self) -> BuildPolicy {
        if self.strict {
            BuildPolicy::Strict
        } else {
            BuildPolicy::Lenient
        }
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            detailed: self.detailed,
            use_clusters: self.use_clusters,
            optimize_black_bg: self.optimize_black_bg,
            policy: self.policy(),
        }
    }
}

/// Load options from a YAML file.
pub fn load_options(path: &Path) -> AppResult<RunOptions> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let options: RunOptions = serde_yaml::from_str("detailed: true\nexport_gexf: true\n").unwrap();
        assert!(options.detailed);
        assert!(options.export_gexf);
        assert!(!options.use_clusters);
        assert_eq!(options.layout_program, "neato");
        assert_eq!(options.output_dir, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<RunOptions, _> = serde_yaml::from_str("detialed: true\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn strict_maps_to_policy() {
        let options = RunOptions {
            strict: true,
            use_clusters: true,
            ..RunOptions::default()
        };
        let config = options.graph_config();
        assert_eq!(config.policy, BuildPolicy::Strict);
        assert!(config.use_clusters);
        assert!(!config.detailed);
        assert_eq!(RunOptions::default().policy(), BuildPolicy::Lenient);
    }

    #[test]
    fn missing_options_file() {
        let err = load_options(Path::new("/no/such/options.yaml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
