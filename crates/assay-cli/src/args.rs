//! Command-line argument definitions for the Assay CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document, output and
//! configuration paths, logging verbosity, snapshot persistence, and the
//! visibility operations to apply before rendering.

use clap::Parser;

/// Command-line arguments for the Assay diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input assurance-case document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file; the rendered graph is printed to stdout if omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Directory holding visibility snapshots, keyed by the input file name
    #[arg(long)]
    pub state_dir: Option<String>,

    /// Expand every node
    #[arg(long)]
    pub expand_all: bool,

    /// Collapse every node
    #[arg(long, conflicts_with = "expand_all")]
    pub collapse_all: bool,

    /// Collapse everything except these nodes (repeatable)
    #[arg(long, value_name = "ID")]
    pub focus: Vec<String>,

    /// Expand the path from the root to this node (repeatable)
    #[arg(long, value_name = "ID")]
    pub reveal: Vec<String>,

    /// Expand this node and all of its descendants (repeatable)
    #[arg(long, value_name = "ID")]
    pub reveal_subtree: Vec<String>,
}
