//! # DOT export pipeline
//!
//! Renders one method's control-flow representation into a Graphviz DOT
//! document for visual debugging:
//!
//! - **escaping** of arbitrary diagnostic text for record labels
//! - **name allocation** for block nodes and region clusters
//! - **block and region rendering**, including blocks the region tree
//!   orphaned (drawn with a red outline as a signal to whoever maintains
//!   region reconstruction)
//! - **document assembly** and file placement, one `.dot` file per method
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use cfgviz::dot::{DotExporter, ExportOptions, PlainCodegen};
//! use cfgviz::model::parse_method;
//!
//! # fn main() -> Result<(), cfgviz::error::CfgVizError> {
//! let method = parse_method(
//!     r#"{
//!         "class_name": "com.example.Foo",
//!         "name": "bar",
//!         "short_id": "bar()V",
//!         "blocks": [
//!             {"id": 0, "successors": [1],
//!              "instructions": [{"text": "if (v0 == 0)", "alternate": 1}]},
//!             {"id": 1}
//!         ],
//!         "entry": 0
//!     }"#,
//!     Path::new("example.json"),
//! )?;
//!
//! let codegen = PlainCodegen;
//! let exporter = DotExporter::new(ExportOptions::new("graphs"), &codegen);
//! let document = exporter.render_document(&method)?.expect("method has code");
//!
//! assert!(document.starts_with("digraph"));
//! assert!(document.contains("Node_0 -> Node_1 [style=dotted];"));
//! # Ok(())
//! # }
//! ```

mod escape;
mod exporter;
mod names;
mod renderer;

pub use escape::{LINE_BREAK, escape, file_name};
pub use exporter::{DotExporter, ExportOptions};
pub use names::NameAllocator;
pub use renderer::{FallbackCodegen, PlainCodegen};
