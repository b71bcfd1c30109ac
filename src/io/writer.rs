//! Persisting normalized datasets.
//!
//! Each output unit (the whole dataset, or one branch in the `per-branch`
//! layout) is written only when no prior snapshot exists or its content
//! differs. Writes replace the file atomically via a sibling temp file.

use std::fs::{self, Permissions};
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::domain::{BranchSnapshot, CleanedDataset, OutputLayout, PersistConfig, is_valid_branch_code};
use crate::error::AppError;
use crate::io::snapshot::{content_changed, read_snapshot};

/// Decision taken for one output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Skipped,
}

/// Counters accumulated over one persistence pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Branches left out by the exclusion list.
    pub excluded: usize,
    /// Branches whose code cannot be used as a file name.
    pub invalid: usize,
}

impl WriteSummary {
    fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created => self.created += 1,
            WriteOutcome::Updated => self.updated += 1,
            WriteOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn written(&self) -> usize {
        self.created + self.updated
    }
}

/// Persist `dataset` according to the configured layout.
pub fn persist_dataset(dataset: &CleanedDataset, config: &PersistConfig) -> Result<WriteSummary, AppError> {
    if !config.dry_run {
        fs::create_dir_all(&config.output_dir)
            .map_err(|e| AppError::io(format!("Failed to create output dir '{}': {e}", config.output_dir.display())))?;
    }

    let mut summary = WriteSummary::default();

    match config.layout {
        OutputLayout::Region | OutputLayout::Branches => {
            let outcome = persist_unit(&config.whole_file_path(), dataset, config.dry_run)?;
            summary.record(outcome);
        }
        OutputLayout::PerBranch => {
            let Some(branches) = dataset.branches() else {
                return Err(AppError::io("Per-branch output requires a dataset grouped by branch."));
            };
            for (code, branch) in branches {
                if config.is_excluded(code) {
                    debug!(branch = %code, "branch excluded from output");
                    summary.excluded += 1;
                    continue;
                }
                if !is_valid_branch_code(code) {
                    warn!(branch = %code, "branch code is not usable as a file name; skipped");
                    summary.invalid += 1;
                    continue;
                }
                let snapshot = BranchSnapshot::new(&dataset.updated_at, branch);
                let outcome = persist_unit(&config.branch_file_path(code), &snapshot, config.dry_run)?;
                summary.record(outcome);
            }
        }
    }

    Ok(summary)
}

/// Create, update or skip a single snapshot file.
pub fn persist_unit<T: Serialize>(path: &Path, unit: &T, dry_run: bool) -> Result<WriteOutcome, AppError> {
    let new = serde_json::to_value(unit)
        .map_err(|e| AppError::io(format!("Failed to serialize '{}': {e}", path.display())))?;

    let outcome = match read_snapshot(path)? {
        None => WriteOutcome::Created,
        Some(prior) if content_changed(&new, &prior) => WriteOutcome::Updated,
        Some(_) => WriteOutcome::Skipped,
    };

    match outcome {
        WriteOutcome::Skipped => info!(path = %path.display(), "content unchanged, skipping"),
        WriteOutcome::Created | WriteOutcome::Updated if dry_run => {
            info!(path = %path.display(), ?outcome, "dry run, not writing")
        }
        WriteOutcome::Created | WriteOutcome::Updated => {
            write_json_atomic(path, unit)?;
            info!(path = %path.display(), ?outcome, "snapshot written");
        }
    }

    Ok(outcome)
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| AppError::io(format!("Failed to create temp file in '{}': {e}", dir.display())))?;

    serde_json::to_writer_pretty(&mut tmp, value)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;

    let permissions = snapshot_permissions(path, &tmp)
        .map_err(|e| AppError::io(format!("Failed to read permissions of '{}': {e}", path.display())))?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| AppError::io(format!("Failed to set permissions on '{}': {e}", path.display())))?;

    tmp.persist(path)
        .map_err(|e| AppError::io(format!("Failed to replace '{}': {e}", path.display())))?;

    Ok(())
}

/// Permissions the replacement file should carry: those of the file being
/// replaced, or world-readable for a new snapshot. Temp files start as 0600.
fn snapshot_permissions(path: &Path, tmp: &NamedTempFile) -> std::io::Result<Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => new_snapshot_permissions(tmp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn new_snapshot_permissions(_tmp: &NamedTempFile) -> std::io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_snapshot_permissions(tmp: &NamedTempFile) -> std::io::Result<Permissions> {
    Ok(tmp.as_file().metadata()?.permissions())
}
