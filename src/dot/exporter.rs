use std::fmt::Write;
use std::fs;
use std::path::PathBuf;

use crate::dot::escape::{escape, file_name};
use crate::dot::names::NameAllocator;
use crate::dot::renderer::{CfgRenderer, FallbackCodegen, attributes_label};
use crate::error::CfgVizError;
use crate::model::Method;

/// Static configuration for one exporter instance.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub use_regions: bool,
    pub raw_insns: bool,
}

impl ExportOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            use_regions: false,
            raw_insns: false,
        }
    }

    /// Render the structured region tree instead of the flat block list.
    pub fn use_regions(mut self, use_regions: bool) -> Self {
        self.use_regions = use_regions;
        self
    }

    /// Emit raw instructions instead of delegating to the fallback codegen.
    pub fn raw_instructions(mut self, raw_insns: bool) -> Self {
        self.raw_insns = raw_insns;
        self
    }
}

/// Drives the export of one method into a `.dot` file.
pub struct DotExporter<'a> {
    options: ExportOptions,
    codegen: &'a dyn FallbackCodegen,
}

impl<'a> DotExporter<'a> {
    pub fn new(options: ExportOptions, codegen: &'a dyn FallbackCodegen) -> Self {
        Self { options, codegen }
    }

    /// Export one method. Returns the path of the written file, or `None`
    /// when the method was legitimately skipped: it has no code, or region
    /// mode was requested and no region tree exists.
    pub fn export(&self, method: &Method) -> Result<Option<PathBuf>, CfgVizError> {
        let Some(document) = self.render_document(method)? else {
            return Ok(None);
        };
        let path = self.output_path(method);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CfgVizError::GraphWriteError {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, document).map_err(|source| CfgVizError::GraphWriteError {
            path: path.clone(),
            source,
        })?;
        Ok(Some(path))
    }

    /// Render the DOT document without touching the filesystem.
    pub fn render_document(&self, method: &Method) -> Result<Option<String>, CfgVizError> {
        if method.no_code {
            return Ok(None);
        }

        let mut renderer = CfgRenderer::new(method, self.options.raw_insns, self.codegen);
        if self.options.use_regions {
            let Some(root) = method.region.as_ref() else {
                return Ok(None);
            };
            renderer.render_regions(root)?;
        } else {
            renderer.render_flat()?;
        }
        let (mut nodes, mut edges) = renderer.into_parts();

        write!(nodes, "MethodNode[shape=record,label=\"{{")?;
        write!(
            nodes,
            "{}",
            escape(&format!(
                "{} {} {}({})",
                method.access_flags,
                method.return_type,
                method.qualified_name(),
                method.args.join(", ")
            ))
        )?;
        let attrs = attributes_label(&method.attributes);
        if !attrs.is_empty() {
            write!(nodes, " | {attrs}")?;
        }
        writeln!(nodes, "}}\"];")?;

        if let Some(entry) = method.entry {
            let names = NameAllocator::new();
            writeln!(edges, "MethodNode -> {};", names.block(method.cfg[entry].id))?;
        }

        let title = escape(&format!("{}.{}", method.class_name, method.short_id));
        Ok(Some(format!(
            "digraph \"CFG for {title}\" {{\n{nodes}{edges}}}\n"
        )))
    }

    /// `<out_dir>/<class/path>_graphs/<short-id>[.regions][.raw].dot`
    pub fn output_path(&self, method: &Method) -> PathBuf {
        let mut name = file_name(&method.short_id);
        if self.options.use_regions {
            name.push_str(".regions");
        }
        if self.options.raw_insns {
            name.push_str(".raw");
        }
        name.push_str(".dot");
        self.options
            .out_dir
            .join(format!("{}_graphs", method.class_path()))
            .join(name)
    }
}
