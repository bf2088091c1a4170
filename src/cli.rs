use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{CascadeError, Result};
use crate::types::OutputFormat;

/// cascade-select - cascading multi-level multi-select
#[derive(Parser, Debug)]
#[command(name = "cascade-select")]
#[command(about = "Pick items across linked levels with automatic cross-level selection")]
#[command(version)]
pub struct Cli {
    /// Write logs to this file (the terminal picker logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive terminal picker
    Tui {
        /// Catalog file (defaults to the built-in demo catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Apply selections and print manual and auto-selected items per level
    Resolve {
        /// Catalog file (defaults to the built-in demo catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Selection for one level as LEVEL=ID[,ID...] (repeatable)
        #[arg(short, long = "select", value_name = "LEVEL=IDS")]
        selections: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate a catalog file and report integrity warnings
    Validate {
        /// Path to catalog file to validate
        catalog: PathBuf,
    },
    /// Write the built-in demo catalog to a file
    Init {
        /// Destination path
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// One `--select` argument: a level name and the ids to set on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSelection {
    pub level: String,
    pub ids: Vec<String>,
}

/// Parse `LEVEL=ID[,ID...]`.
///
/// Ids are split on commas and whitespace; empty entries are dropped, so
/// `b=` clears the level.
pub fn parse_level_selection(arg: &str) -> Result<LevelSelection> {
    let (level, ids) = arg
        .split_once('=')
        .ok_or_else(|| CascadeError::config(format!("expected LEVEL=IDS, got '{}'", arg)))?;

    let level = level.trim();
    if level.is_empty() {
        return Err(CascadeError::config(format!("missing level name in '{}'", arg)));
    }

    let ids = ids
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(LevelSelection {
        level: level.to_string(),
        ids,
    })
}
