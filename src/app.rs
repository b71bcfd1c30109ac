//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - turns them into explicit query/persistence configuration
//! - runs the pipeline

use clap::Parser;

use crate::cli::{CleanArgs, Command, OutputArgs, SyncArgs};
use crate::domain::{PersistConfig, StatsQuery};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `estat-sync` binary.
pub fn run() -> Result<(), AppError> {
    // A bare `estat-sync` (or one starting with flags) means `estat-sync sync ...`,
    // which is how the scheduled job invokes it.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Sync(args) => handle_sync(args),
        Command::Clean(args) => handle_clean(args),
    }
}

fn handle_sync(args: SyncArgs) -> Result<(), AppError> {
    let query = stats_query_from_args(&args);
    let persist = persist_config_from_args(&args.output);
    pipeline::run_sync(&query, &persist)?;
    Ok(())
}

fn handle_clean(args: CleanArgs) -> Result<(), AppError> {
    let persist = persist_config_from_args(&args.output);
    pipeline::run_from_file(&args.input, &persist)?;
    Ok(())
}

pub fn stats_query_from_args(args: &SyncArgs) -> StatsQuery {
    StatsQuery {
        stats_data_id: args.stats_data_id.clone(),
        cat01: args.cat01.clone(),
        cat02: args.cat02.clone(),
        cat03: args.cat03.clone(),
        lang: args.lang.clone(),
    }
}

pub fn persist_config_from_args(args: &OutputArgs) -> PersistConfig {
    PersistConfig {
        layout: args.layout,
        output_dir: args.output_dir.clone(),
        file_name: args
            .file_name
            .clone()
            .unwrap_or_else(|| args.layout.default_file_name().to_string()),
        excluded_branches: args.exclude_branches.clone(),
        dry_run: args.dry_run,
    }
}

/// Rewrite argv so `estat-sync` defaults to `estat-sync sync`.
///
/// Rules:
/// - `estat-sync`                       -> `estat-sync sync`
/// - `estat-sync --layout per-branch`   -> `estat-sync sync --layout per-branch`
/// - `estat-sync --help/--version/-h`   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("sync".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "sync".to_string());
    }

    argv
}
