//! Batch export driver
//!
//! Walks the requested paths for method dumps and exports each one. A
//! per-method failure (unreadable dump, unwritable graph file) aborts only
//! that method's export; the batch moves on to the next.

use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use miette::Result;
use walkdir::WalkDir;

use crate::cli::Cli;
use crate::dot::{DotExporter, ExportOptions, PlainCodegen};
use crate::model;

const PROGRESS_BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}";

pub fn run_batch(cli: &Cli) -> Result<()> {
    let files = collect_model_files(&cli.paths);
    if files.is_empty() {
        eprintln!("{} No method dumps found to export", style("ℹ").blue());
        return Ok(());
    }

    let options = ExportOptions::new(&cli.out_dir)
        .use_regions(cli.regions)
        .raw_instructions(cli.raw);
    let codegen = PlainCodegen;
    let exporter = DotExporter::new(options, &codegen);

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_BAR_TEMPLATE)
                .expect("Progress bar template should be valid")
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Exporting graphs");
        pb
    };

    let mut exported = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for file in &files {
        match model::load_method(file).and_then(|method| exporter.export(&method)) {
            Ok(Some(_)) => exported += 1,
            Ok(None) => skipped += 1,
            Err(err) => {
                failed += 1;
                progress.suspend(|| {
                    eprintln!("{} {}: {}", style("✗").red(), file.display(), err);
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if !cli.quiet {
        eprintln!(
            "{} Exported {} graph{} to {} ({} skipped, {} failed)",
            style("✓").green(),
            style(exported).yellow().bold(),
            if exported == 1 { "" } else { "s" },
            style(cli.out_dir.display()).cyan(),
            skipped,
            failed
        );
    }

    if exported == 0 && skipped == 0 && failed > 0 {
        return Err(miette::miette!("All {failed} method exports failed"));
    }
    Ok(())
}

fn collect_model_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
            {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "json")
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}
