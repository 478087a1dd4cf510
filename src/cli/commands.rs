//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stream paged listing APIs as JSON lines
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API configuration file (YAML)
    #[arg(short, long, global = true, default_value = "api.yaml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream every item of a resource, one JSON object per line
    List {
        /// Resource name from the config
        resource: String,

        /// Request parameter (repeatable), e.g. `-p playlistId=UU123`
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Identifier to look up (repeatable); long lists are batched
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,

        /// File with one identifier per line
        #[arg(long)]
        ids_file: Option<PathBuf>,

        /// Stop at the first item older than this (`2024-01-31`, RFC 3339, or `365d`)
        #[arg(long)]
        since: Option<String>,

        /// Dotted path of the item date used by `--since`
        #[arg(long, default_value = "snippet.publishedAt")]
        date_field: String,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,

        /// Log batch and page progress
        #[arg(long)]
        progress: bool,
    },

    /// List configured resources
    Resources,

    /// Validate the config and every resource contract
    Validate,
}
