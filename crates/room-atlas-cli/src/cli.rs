use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "room-atlas",
    about = "Compile room notes into schema-conformant JSON records",
    version
)]
pub struct Cli {
    /// Project config file (default: ./atlas.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file with the default project layout
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Normalize room Markdown into one JSON record per room
    Normalize {
        /// Path to the room JSON Schema
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Directory containing room .md files
        #[arg(long = "in")]
        in_dir: Option<PathBuf>,

        /// Output directory for normalized JSON
        #[arg(long)]
        out: Option<PathBuf>,

        /// Glob selecting room documents under --in (default: **/*.md)
        #[arg(long)]
        glob: Option<String>,

        /// Stop on the first failing document
        #[arg(long)]
        fail_fast: bool,

        /// Rewrite the H1 and/or rename the file to match the canonical title
        #[arg(long)]
        fix_titles: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate normalized records against the full JSON Schema
    Validate {
        /// Path to the room JSON Schema
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Directory of normalized JSON records
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompile, diff against committed records and validate them
    Check {
        /// Path to the room JSON Schema
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Directory containing room .md files
        #[arg(long = "in")]
        in_dir: Option<PathBuf>,

        /// Directory of committed JSON records
        #[arg(long)]
        out: Option<PathBuf>,

        /// Glob selecting room documents under --in (default: **/*.md)
        #[arg(long)]
        glob: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
