//! ib-export: writes a built graph model to files.
//!
//! - `dot`: Graphviz drawing-language document
//! - `gexf`: GEXF 1.3 document for Gephi
//! - `render`: hands the DOT file to a Graphviz layout program for a PDF

pub mod dot;
pub mod error;
pub mod gexf;
pub mod render;

pub use dot::{save_dot, to_dot_string, write_dot};
pub use error::{ExportError, ExportResult};
pub use gexf::{GexfMeta, save_gexf, to_gexf_string};
pub use render::{LayoutEngine, render_pdf};
