//! # Method model
//!
//! Read-only representation of one decompiled method: basic blocks stored in
//! a petgraph `DiGraph`, an optional structured region tree, and exception
//! handlers. The exporter never mutates these entities; they exist for the
//! lifetime of one export call.
//!
//! The [`loader`] submodule decodes the JSON method dumps the CLI consumes.

mod loader;
mod types;

pub use loader::{load_method, parse_method};
pub use types::{
    Block, BlockId, ExceptionHandler, InsnKind, Instruction, Method, Region, RegionItem,
};
