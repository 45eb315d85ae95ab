//! PDF rendering through a Graphviz layout program.

use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// A Graphviz layout program, invoked by name from `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEngine {
    pub program: String,
}

impl LayoutEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Force-directed spring layout.
    pub fn neato() -> Self {
        Self::new("neato")
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::neato()
    }
}

/// Lay out `dot_path` and write a PDF to `pdf_path`.
pub fn render_pdf(engine: &LayoutEngine, dot_path: &Path, pdf_path: &Path) -> ExportResult<()> {
    debug!(program = %engine.program, dot = %dot_path.display(), pdf = %pdf_path.display(), "rendering");
    let render_err = |message: String| ExportError::Render {
        program: engine.program.clone(),
        message,
    };

    let output = Command::new(&engine.program)
        .arg("-Tpdf")
        .arg("-o")
        .arg(pdf_path)
        .arg(dot_path)
        .output()
        .map_err(|e| render_err(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(render_err(format!("{}: {}", output.status, stderr.trim())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_is_neato() {
        assert_eq!(LayoutEngine::default().program, "neato");
    }

    #[test]
    fn missing_program_is_a_render_error() {
        let engine = LayoutEngine::new("ib-graphviz-no-such-layout-program");
        let err = render_pdf(&engine, Path::new("in.dot"), Path::new("out.pdf")).unwrap_err();
        match err {
            ExportError::Render { program, .. } => {
                assert_eq!(program, "ib-graphviz-no-such-layout-program")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
