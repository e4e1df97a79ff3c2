//! # cfgviz - Control-Flow Graph Export for Decompiler Debugging
//!
//! cfgviz renders a decompiler's internal control-flow representation -
//! basic blocks, control edges, and optionally the reconstructed
//! structured-region tree - into Graphviz DOT documents. It is a diagnostic
//! side-channel: engineers open the generated graphs to inspect how control
//! flow was reconstructed for one method. It never participates in
//! decompilation itself and never mutates its inputs.
//!
//! ## Main Components
//!
//! - **Model**: read-only method/block/region/instruction representation,
//!   plus a loader for JSON method dumps
//! - **Dot**: the export pipeline (escaping, name allocation, block and
//!   region rendering, document assembly and file placement)
//! - **Batch**: the CLI driver that exports every dump it finds, continuing
//!   past per-method failures
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cfgviz::dot::{DotExporter, ExportOptions, PlainCodegen};
//! use cfgviz::model::load_method;
//!
//! # fn main() -> miette::Result<()> {
//! let method = load_method(Path::new("dumps/com.example.Foo.bar.json"))?;
//!
//! // Region mode with raw instructions; writes
//! // graphs/com/example/Foo_graphs/bar_I_V.regions.raw.dot
//! let codegen = PlainCodegen;
//! let exporter = DotExporter::new(
//!     ExportOptions::new("graphs")
//!         .use_regions(true)
//!         .raw_instructions(true),
//!     &codegen,
//! );
//!
//! match exporter.export(&method)? {
//!     Some(path) => println!("wrote {}", path.display()),
//!     None => println!("skipped (no code or no region tree)"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod dot;
pub mod error;
pub mod model;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    batch::run_batch(&cli)
}
