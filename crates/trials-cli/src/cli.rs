//! CLI argument definitions for the trial index builder.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "trials-index",
    version,
    about = "Trial Index Builder - Build static query artifacts from registry exports",
    long_about = "Build static query artifacts from clinical-trial registry exports.\n\n\
                  Reads .json, .ndjson, and .jsonl files from the input directory and\n\
                  produces a sorted trial index, per-trial detail files in sharded\n\
                  directories, and an inverted intervention facet map."
)]
pub struct Cli {
    /// Directory scanned for registry export files.
    #[arg(value_name = "INPUT_DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// Directory receiving the generated artifacts.
    #[arg(value_name = "OUTPUT_DIR", default_value = "dist")]
    pub output_dir: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
