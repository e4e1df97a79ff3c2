use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::dot::escape::{LINE_BREAK, escape};
use crate::dot::names::NameAllocator;
use crate::error::CfgVizError;
use crate::model::{Block, BlockId, Instruction, Method, Region, RegionItem};

/// Best-effort instruction-to-source renderer.
///
/// The contract is total: implementations always return some text, falling
/// back to a literal approximation when idiomatic output is not possible.
pub trait FallbackCodegen {
    fn render(&self, insns: &[Instruction]) -> String;
}

/// Default fallback: the literal textual form of each instruction, one per
/// line.
#[derive(Debug, Default)]
pub struct PlainCodegen;

impl FallbackCodegen for PlainCodegen {
    fn render(&self, insns: &[Instruction]) -> String {
        insns
            .iter()
            .map(|insn| insn.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders blocks and region clusters for one method document.
///
/// Node and cluster declarations accumulate separately from edge
/// declarations so the assembled document lists all nodes before all edges;
/// DOT does not require that, but it keeps clusters readable.
pub(crate) struct CfgRenderer<'a> {
    method: &'a Method,
    raw_insns: bool,
    codegen: &'a dyn FallbackCodegen,
    names: NameAllocator,
    block_ids: HashMap<BlockId, NodeIndex>,
    nodes: String,
    edges: String,
}

impl<'a> CfgRenderer<'a> {
    pub fn new(method: &'a Method, raw_insns: bool, codegen: &'a dyn FallbackCodegen) -> Self {
        let block_ids = method
            .cfg
            .node_indices()
            .map(|idx| (method.cfg[idx].id, idx))
            .collect();
        Self {
            method,
            raw_insns,
            codegen,
            names: NameAllocator::new(),
            block_ids,
            nodes: String::new(),
            edges: String::new(),
        }
    }

    /// Render every block in method order, without any cluster structure.
    pub fn render_flat(&mut self) -> Result<(), CfgVizError> {
        for idx in self.method.cfg.node_indices() {
            self.render_block(idx, false)?;
        }
        Ok(())
    }

    /// Render the region tree plus handler trees, then every block the trees
    /// do not reach. Those orphans signal a hole in the upstream region
    /// reconstruction and get an error outline, outside any cluster.
    pub fn render_regions(&mut self, root: &Region) -> Result<(), CfgVizError> {
        self.render_region(root)?;
        for handler in &self.method.handlers {
            if let Some(region) = &handler.region {
                self.render_region(region)?;
            }
        }

        let mut covered = HashSet::new();
        root.collect_blocks(&mut covered);
        for handler in &self.method.handlers {
            if let Some(region) = &handler.region {
                region.collect_blocks(&mut covered);
            }
        }
        for idx in self.method.cfg.node_indices() {
            if !covered.contains(&idx) {
                self.render_block(idx, true)?;
            }
        }
        Ok(())
    }

    fn render_region(&mut self, region: &Region) -> Result<(), CfgVizError> {
        let name = self.names.next_cluster();
        writeln!(self.nodes, "subgraph {name} {{")?;
        let mut label = escape(&region.description);
        let attrs = attributes_label(&region.attributes);
        if !attrs.is_empty() {
            label.push_str(" | ");
            label.push_str(&attrs);
        }
        writeln!(self.nodes, "label = \"{label}\";")?;
        writeln!(self.nodes, "node [shape=record,color=blue];")?;
        for child in &region.children {
            match child {
                RegionItem::Region(nested) => self.render_region(nested)?,
                RegionItem::Block(idx) => self.render_block(*idx, false)?,
            }
        }
        writeln!(self.nodes, "}}")?;
        Ok(())
    }

    pub fn render_block(&mut self, idx: NodeIndex, error: bool) -> Result<(), CfgVizError> {
        let method = self.method;
        let block = &method.cfg[idx];
        let name = self.names.block(block.id);

        write!(self.nodes, "{name} [shape=record,")?;
        if error {
            write!(self.nodes, "color=red,")?;
        }
        write!(
            self.nodes,
            "label=\"{{{}\\:\\ {}",
            block.id,
            format_offset(block.start_offset)
        )?;
        let attrs = attributes_label(&block.attributes);
        if !attrs.is_empty() {
            write!(self.nodes, "|{attrs}")?;
        }
        let insns = self.instructions_label(block)?;
        if !insns.is_empty() {
            write!(self.nodes, "|{insns}")?;
        }
        writeln!(self.nodes, "}}\"];")?;

        let false_path = block
            .instructions
            .first()
            .and_then(Instruction::alternate)
            .and_then(|id| self.block_ids.get(&id).copied());

        // Graph::edges walks outgoing edges most recently added first;
        // reverse to recover successor order.
        let mut successors: Vec<NodeIndex> = method.cfg.edges(idx).map(|e| e.target()).collect();
        successors.reverse();
        for next in successors {
            let target = self.names.block(method.cfg[next].id);
            write!(self.edges, "{name} -> {target}")?;
            if Some(next) == false_path {
                write!(self.edges, " [style=dotted]")?;
            }
            writeln!(self.edges, ";")?;
        }
        Ok(())
    }

    fn instructions_label(&self, block: &Block) -> Result<String, CfgVizError> {
        if block.instructions.is_empty() {
            return Ok(String::new());
        }
        if self.raw_insns {
            let mut out = String::new();
            for insn in &block.instructions {
                if insn.attributes.is_empty() {
                    out.push_str(&escape(&insn.text));
                } else {
                    out.push_str(&escape(&format!(
                        "{} {}",
                        insn.text,
                        insn.attributes.join(", ")
                    )));
                }
                out.push_str(LINE_BREAK);
            }
            Ok(out)
        } else {
            let code = self.codegen.render(&block.instructions);
            if code.is_empty() {
                return Ok(String::new());
            }
            let escaped = escape(&format!("{code}\n"));
            Ok(escaped
                .strip_prefix(LINE_BREAK)
                .map(str::to_string)
                .unwrap_or(escaped))
        }
    }

    pub fn into_parts(self) -> (String, String) {
        (self.nodes, self.edges)
    }
}

/// Join each escaped attribute string, terminated with the left-justified
/// line-break marker. Empty when there are no attributes.
pub(crate) fn attributes_label(attributes: &[String]) -> String {
    let mut out = String::new();
    for attr in attributes {
        out.push_str(&escape(attr));
        out.push_str(LINE_BREAK);
    }
    out
}

pub(crate) fn format_offset(offset: u32) -> String {
    format!("{offset:#06x}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_attributes_label_escapes_and_terminates() {
        let attrs = vec!["LOOP_START".to_string(), "reg: r0-r3".to_string()];
        assert_eq!(
            attributes_label(&attrs),
            "LOOP_START\\lreg: r0\\-r3\\l"
        );
        assert_eq!(attributes_label(&[]), "");
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0), "0x0000");
        assert_eq!(format_offset(0x1a), "0x001a");
        assert_eq!(format_offset(0x12345), "0x12345");
    }

    #[test]
    fn test_plain_codegen_joins_lines() {
        let insns = vec![
            Instruction::plain("const v0, 1"),
            Instruction::plain("return v0"),
        ];
        assert_eq!(PlainCodegen.render(&insns), "const v0, 1\nreturn v0");
        assert_eq!(PlainCodegen.render(&[]), "");
    }
}
