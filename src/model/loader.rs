//! JSON method dump loader
//!
//! Decompilers dump one method per JSON file for diagnosis; this module
//! decodes the dump and resolves block ids into graph indices, validating the
//! model invariants on the way (unique block ids, successors and alternates
//! referring to existing blocks, alternate being one of the successors).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Deserialize;

use crate::error::CfgVizError;
use crate::model::types::{
    Block, BlockId, ExceptionHandler, InsnKind, Instruction, Method, Region, RegionItem,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMethod {
    class_name: String,
    name: String,
    short_id: String,
    #[serde(default)]
    return_type: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    access_flags: String,
    #[serde(default)]
    attributes: Vec<String>,
    #[serde(default)]
    no_code: bool,
    #[serde(default)]
    blocks: Vec<RawBlock>,
    #[serde(default)]
    entry: Option<BlockId>,
    #[serde(default)]
    region: Option<RawRegion>,
    #[serde(default)]
    handlers: Vec<RawHandler>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBlock {
    id: BlockId,
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    instructions: Vec<RawInsn>,
    #[serde(default)]
    successors: Vec<BlockId>,
    #[serde(default)]
    attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInsn {
    text: String,
    #[serde(default)]
    alternate: Option<BlockId>,
    #[serde(default)]
    attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegion {
    description: String,
    #[serde(default)]
    attributes: Vec<String>,
    #[serde(default)]
    children: Vec<RawRegionItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawRegionItem {
    Region(RawRegion),
    Block(BlockId),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHandler {
    #[serde(default)]
    region: Option<RawRegion>,
}

/// Load one method dump from a file.
pub fn load_method(path: &Path) -> Result<Method, CfgVizError> {
    let text = fs::read_to_string(path).map_err(|source| CfgVizError::FileReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_method(&text, path)
}

/// Decode one method dump from JSON text. `origin` is only used in errors.
pub fn parse_method(json: &str, origin: &Path) -> Result<Method, CfgVizError> {
    let raw: RawMethod =
        serde_json::from_str(json).map_err(|source| CfgVizError::ModelParseError {
            path: origin.to_path_buf(),
            source,
        })?;
    build_method(raw)
}

fn build_method(raw: RawMethod) -> Result<Method, CfgVizError> {
    let mut cfg: DiGraph<Block, ()> = DiGraph::new();
    let mut ids: HashMap<BlockId, NodeIndex> = HashMap::with_capacity(raw.blocks.len());

    for block in &raw.blocks {
        let instructions = block
            .instructions
            .iter()
            .map(|insn| Instruction {
                text: insn.text.clone(),
                kind: match insn.alternate {
                    Some(alternate) => InsnKind::CondBranch { alternate },
                    None => InsnKind::Plain,
                },
                attributes: insn.attributes.clone(),
            })
            .collect();

        let idx = cfg.add_node(Block {
            id: block.id,
            start_offset: block.offset,
            instructions,
            attributes: block.attributes.clone(),
        });
        if ids.insert(block.id, idx).is_some() {
            return Err(model_error(format!("duplicate block id {}", block.id)));
        }
    }

    // Edge insertion order per source node is the successor order.
    for block in &raw.blocks {
        let from = ids[&block.id];
        for succ in &block.successors {
            let to = resolve(&ids, *succ, "successor")?;
            cfg.add_edge(from, to, ());
        }
        if let Some(insn) = block.instructions.first()
            && let Some(alternate) = insn.alternate
            && !block.successors.contains(&alternate)
        {
            return Err(model_error(format!(
                "block {} alternate target {} is not one of its successors",
                block.id, alternate
            )));
        }
    }

    let entry = match raw.entry {
        Some(id) => Some(resolve(&ids, id, "entry")?),
        None => cfg.node_indices().next(),
    };

    let region = raw.region.map(|r| build_region(r, &ids)).transpose()?;
    let handlers = raw
        .handlers
        .into_iter()
        .map(|h| {
            Ok(ExceptionHandler {
                region: h.region.map(|r| build_region(r, &ids)).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, CfgVizError>>()?;

    Ok(Method {
        class_name: raw.class_name,
        name: raw.name,
        short_id: raw.short_id,
        return_type: raw.return_type,
        args: raw.args,
        access_flags: raw.access_flags,
        attributes: raw.attributes,
        no_code: raw.no_code,
        cfg,
        entry,
        region,
        handlers,
    })
}

fn build_region(
    raw: RawRegion,
    ids: &HashMap<BlockId, NodeIndex>,
) -> Result<Region, CfgVizError> {
    let children = raw
        .children
        .into_iter()
        .map(|child| match child {
            RawRegionItem::Region(nested) => Ok(RegionItem::Region(build_region(nested, ids)?)),
            RawRegionItem::Block(id) => Ok(RegionItem::Block(resolve(ids, id, "region child")?)),
        })
        .collect::<Result<Vec<_>, CfgVizError>>()?;

    Ok(Region {
        description: raw.description,
        attributes: raw.attributes,
        children,
    })
}

fn resolve(
    ids: &HashMap<BlockId, NodeIndex>,
    id: BlockId,
    what: &str,
) -> Result<NodeIndex, CfgVizError> {
    ids.get(&id)
        .copied()
        .ok_or_else(|| model_error(format!("{what} refers to unknown block id {id}")))
}

fn model_error(message: String) -> CfgVizError {
    CfgVizError::ModelError { message }
}
