use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CfgVizError {
    #[error("Failed to read model file '{path}'")]
    #[diagnostic(
        code(cfgviz::read_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid method model in '{path}'")]
    #[diagnostic(
        code(cfgviz::parse_error),
        help("The file must be a JSON method dump produced by the decompiler")
    )]
    ModelParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent method model: {message}")]
    #[diagnostic(
        code(cfgviz::model_error),
        help("The decompiler produced a dump that violates the model invariants")
    )]
    ModelError { message: String },

    #[error("Failed to write graph file '{path}'")]
    #[diagnostic(
        code(cfgviz::write_error),
        help("Check output directory permissions and disk space")
    )]
    GraphWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    #[diagnostic(code(cfgviz::io_error), help("Check file permissions and disk space"))]
    Io(#[from] std::io::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(cfgviz::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),
}
