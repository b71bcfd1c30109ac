//! Run reporting: dataset overview and write summary log lines.

use tracing::info;

use crate::domain::{CleanedDataset, DatasetContent};
use crate::io::WriteSummary;

/// Shape of a normalized dataset, as logged at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetOverview {
    /// `None` for region datasets.
    pub branches: Option<usize>,
    /// Periods in the first branch (or in the region).
    pub periods: usize,
    /// Categories in the first of those periods.
    pub categories_per_period: usize,
}

pub fn dataset_overview(dataset: &CleanedDataset) -> DatasetOverview {
    let (branches, periods) = match &dataset.content {
        DatasetContent::Data(periods) => (None, Some(periods)),
        DatasetContent::Branches(branches) => (
            Some(branches.len()),
            branches.values().next().map(|branch| &branch.data),
        ),
    };

    let period_count = periods.map_or(0, |p| p.len());
    let categories_per_period = periods
        .and_then(|p| p.values().next())
        .map_or(0, |period| period.categories.len());

    DatasetOverview {
        branches,
        periods: period_count,
        categories_per_period,
    }
}

pub fn log_run_summary(dataset: &CleanedDataset, summary: &WriteSummary) {
    let overview = dataset_overview(dataset);
    info!(
        updated_at = %dataset.updated_at,
        branches = ?overview.branches,
        periods = overview.periods,
        categories_per_period = overview.categories_per_period,
        "dataset overview"
    );
    info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        excluded = summary.excluded,
        invalid = summary.invalid,
        "persistence finished"
    );
}
