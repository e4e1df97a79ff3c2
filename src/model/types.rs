//! Read-only method model
//!
//! These types mirror what a decompiler knows about one method: its basic
//! blocks, control edges and, when region reconstruction ran, a hierarchical
//! region tree. The exporter only reads them - minimal logic lives here,
//! focusing on data representation.

use std::collections::HashSet;

use petgraph::graph::{DiGraph, NodeIndex};

/// Numeric block id, unique within one method.
pub type BlockId = u32;

/// Kind tag of an instruction. Only conditional branches are significant to
/// the exporter: they carry the false-path successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsnKind {
    Plain,
    CondBranch { alternate: BlockId },
}

/// Atomic operation inside a basic block.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub text: String,
    pub kind: InsnKind,
    pub attributes: Vec<String>,
}

impl Instruction {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: InsnKind::Plain,
            attributes: Vec::new(),
        }
    }

    pub fn cond_branch(text: impl Into<String>, alternate: BlockId) -> Self {
        Self {
            text: text.into(),
            kind: InsnKind::CondBranch { alternate },
            attributes: Vec::new(),
        }
    }

    /// False-path successor id, if this is a conditional branch.
    pub fn alternate(&self) -> Option<BlockId> {
        match self.kind {
            InsnKind::CondBranch { alternate } => Some(alternate),
            InsnKind::Plain => None,
        }
    }
}

/// Maximal straight-line instruction sequence with single entry and exit.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: BlockId,
    pub start_offset: u32,
    pub instructions: Vec<Instruction>,
    pub attributes: Vec<String>,
}

/// One child of a region: either a nested region or a leaf block, resolved
/// once at model construction instead of a repeated type test.
#[derive(Debug, Clone)]
pub enum RegionItem {
    Region(Region),
    Block(NodeIndex),
}

/// Hierarchical grouping node depicting a reconstructed control structure.
#[derive(Debug, Clone)]
pub struct Region {
    pub description: String,
    pub attributes: Vec<String>,
    pub children: Vec<RegionItem>,
}

impl Region {
    /// Collect every block transitively contained in this region tree.
    pub fn collect_blocks(&self, out: &mut HashSet<NodeIndex>) {
        for child in &self.children {
            match child {
                RegionItem::Region(region) => region.collect_blocks(out),
                RegionItem::Block(idx) => {
                    out.insert(*idx);
                }
            }
        }
    }
}

/// Exception handler attached to a method; its region, when present,
/// contributes an additional top-level tree to render.
#[derive(Debug, Clone)]
pub struct ExceptionHandler {
    pub region: Option<Region>,
}

/// One method with its control-flow graph.
///
/// Node insertion order is the method's block order; the edges leaving a node
/// were inserted in successor order.
#[derive(Debug, Clone)]
pub struct Method {
    /// Dotted qualified class name, e.g. `com.example.Foo`.
    pub class_name: String,
    pub name: String,
    /// Name plus signature, e.g. `run(I)V`.
    pub short_id: String,
    pub return_type: String,
    pub args: Vec<String>,
    pub access_flags: String,
    pub attributes: Vec<String>,
    pub no_code: bool,
    pub cfg: DiGraph<Block, ()>,
    pub entry: Option<NodeIndex>,
    pub region: Option<Region>,
    pub handlers: Vec<ExceptionHandler>,
}

impl Method {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.name)
    }

    /// Slash-separated class path used for the output directory.
    pub fn class_path(&self) -> String {
        self.class_name.replace('.', "/")
    }
}
