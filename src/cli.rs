use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cfgviz",
    about = "Export decompiler control-flow graphs as Graphviz DOT documents",
    long_about = "cfgviz reads method dumps (one JSON file per method, as emitted by the \
                  decompiler's diagnostic hook) and writes one .dot file per method. It can \
                  render the flat basic-block list or the reconstructed structured-region tree, \
                  flagging blocks the region reconstruction lost.",
    version
)]
pub struct Cli {
    /// Method dump files, or directories scanned recursively for *.json
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory under which graph files are written
    #[arg(short, long, default_value = "graphs", env = "CFGVIZ_OUT_DIR")]
    pub out_dir: PathBuf,

    /// Render the structured region tree instead of the flat block list
    #[arg(long, env = "CFGVIZ_REGIONS")]
    pub regions: bool,

    /// Emit raw instructions instead of fallback pretty-printed code
    #[arg(long, env = "CFGVIZ_RAW")]
    pub raw: bool,

    /// Suppress progress output
    #[arg(short, long, env = "CFGVIZ_QUIET")]
    pub quiet: bool,
}
