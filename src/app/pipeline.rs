//! Shared sync pipeline used by both the `sync` and `clean` commands.
//!
//! API response -> status check -> normalize -> persist -> report
//!
//! The commands differ only in where the response comes from.

use std::path::Path;

use tracing::info;

use crate::data::{EstatClient, EstatResponse};
use crate::domain::{CleanedDataset, PersistConfig, StatsQuery};
use crate::error::AppError;
use crate::io::{WriteSummary, persist_dataset};
use crate::normalize::{NormalizeStats, normalize};

/// All outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: CleanedDataset,
    pub stats: NormalizeStats,
    pub summary: WriteSummary,
}

/// Fetch from the API and persist.
pub fn run_sync(query: &StatsQuery, persist: &PersistConfig) -> Result<RunOutput, AppError> {
    let client = EstatClient::from_env();
    let response = client.fetch(query)?;
    run_with_response(response, persist)
}

/// Persist a raw API response saved to disk.
pub fn run_from_file(path: &Path, persist: &PersistConfig) -> Result<RunOutput, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read response '{}': {e}", path.display())))?;
    let response = EstatResponse::from_json_str(&raw)?;
    run_with_response(response, persist)
}

/// Run the pipeline on an already obtained response.
///
/// A non-zero API status aborts before anything on disk is touched.
pub fn run_with_response(response: EstatResponse, persist: &PersistConfig) -> Result<RunOutput, AppError> {
    let (updated_at, data) = response.into_success()?;
    info!(date = %updated_at, "API status OK");

    let normalized = normalize(&updated_at, &data, persist.layout.grouping());
    info!(
        records = normalized.stats.records,
        skipped = normalized.stats.skipped,
        raw_time_keys = normalized.stats.raw_time_keys,
        "normalized response"
    );

    let summary = persist_dataset(&normalized.dataset, persist)?;
    crate::report::log_run_summary(&normalized.dataset, &summary);

    Ok(RunOutput {
        dataset: normalized.dataset,
        stats: normalized.stats,
        summary,
    })
}
