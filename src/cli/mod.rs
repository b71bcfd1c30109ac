//! Command-line parsing for the e-Stat residence statistics sync.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline; `app` turns these args into explicit configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::OutputLayout;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "estat-sync",
    version,
    about = "Fetch e-Stat residence statistics and keep normalized JSON snapshots up to date"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch from the e-Stat API, normalize, and write changed snapshots.
    Sync(SyncArgs),
    /// Normalize a saved raw API response instead of calling the API.
    Clean(CleanArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SyncArgs {
    /// Statistics table id.
    #[arg(long, default_value = "0003449073")]
    pub stats_data_id: String,

    /// Category (cat01) codes to request, comma separated.
    #[arg(long, value_delimiter = ',', default_values = ["100000", "102000", "103000", "300000"])]
    pub cat01: Vec<String>,

    /// Fixed cat02 filter code.
    #[arg(long, default_value = "60")]
    pub cat02: String,

    /// Restrict the request to one branch (cat03). All branches when omitted.
    #[arg(long)]
    pub cat03: Option<String>,

    /// Response language.
    #[arg(long, default_value = "J")]
    pub lang: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CleanArgs {
    /// Raw `getStatsData` JSON response.
    #[arg(long, value_name = "JSON")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output options shared by all commands.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Output layout.
    #[arg(long, value_enum, default_value_t = OutputLayout::Branches)]
    pub layout: OutputLayout,

    /// Directory snapshots are written to.
    #[arg(long, default_value = "json")]
    pub output_dir: PathBuf,

    /// Snapshot file name for the whole-file layouts (defaults per layout).
    #[arg(long)]
    pub file_name: Option<String>,

    /// Extra branch code to leave out of per-branch output (repeatable).
    /// The nationwide total is always left out.
    #[arg(long = "exclude-branch", value_name = "CODE")]
    pub exclude_branches: Vec<String>,

    /// Report what would be written without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,
}
