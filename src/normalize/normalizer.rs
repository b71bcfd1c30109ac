//! Flat record list -> nested `CleanedDataset`.
//!
//! Containers (branches, periods) are created on first reference; category
//! leaves are last-write-wins in response order.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::data::{RawStatRecord, StatisticalData};
use crate::domain::{
    BranchMap, CategoryValue, CleanedDataset, DatasetContent, Grouping, NormalizedBranch, NormalizedPeriod,
    PeriodMap,
};
use crate::normalize::resolver::{Lookups, build_lookups};
use crate::normalize::time_key::normalize_time_key;

/// Counters describing one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub records: usize,
    /// Records dropped because branch grouping needs a `cat03` code they lack.
    pub skipped: usize,
    /// Records whose period code could not be sliced into `YYYY-MM`.
    pub raw_time_keys: usize,
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub dataset: CleanedDataset,
    pub stats: NormalizeStats,
}

/// Normalize the statistical section of a successful response.
pub fn normalize(updated_at: &str, data: &StatisticalData, grouping: Grouping) -> Normalized {
    let lookups = build_lookups(data.class_inf.class_obj.as_slice(), grouping);
    normalize_records(updated_at, data.data_inf.value.as_slice(), &lookups, grouping)
}

pub fn normalize_records(
    updated_at: &str,
    records: &[RawStatRecord],
    lookups: &Lookups,
    grouping: Grouping,
) -> Normalized {
    let mut stats = NormalizeStats::default();

    let content = match grouping {
        Grouping::Region => {
            let mut periods = PeriodMap::new();
            for record in records {
                stats.records += 1;
                insert_leaf(&mut periods, record, lookups, &mut stats);
            }
            DatasetContent::Data(periods)
        }
        Grouping::Branch => {
            let mut branches = BranchMap::new();
            for record in records {
                stats.records += 1;
                let Some(code) = record.cat03.as_deref() else {
                    warn!(time = %record.time, cat01 = %record.cat01, "record has no cat03 branch code; skipped");
                    stats.skipped += 1;
                    continue;
                };
                let branch = branches.entry(code.to_string()).or_insert_with(|| NormalizedBranch {
                    name: lookups.branch.name_of(code).to_string(),
                    code: code.to_string(),
                    data: PeriodMap::new(),
                });
                insert_leaf(&mut branch.data, record, lookups, &mut stats);
            }
            DatasetContent::Branches(branches)
        }
    };

    debug!(?stats, "normalized records");

    Normalized {
        dataset: CleanedDataset {
            updated_at: updated_at.to_string(),
            content,
        },
        stats,
    }
}

fn insert_leaf(periods: &mut PeriodMap, record: &RawStatRecord, lookups: &Lookups, stats: &mut NormalizeStats) {
    let key = normalize_time_key(&record.time).unwrap_or_else(|| {
        warn!(time = %record.time, "unrecognized period code; using it verbatim as key");
        stats.raw_time_keys += 1;
        record.time.clone()
    });

    let period = periods.entry(key).or_insert_with(|| NormalizedPeriod {
        time_name: lookups.time.name_of(&record.time).to_string(),
        categories: BTreeMap::new(),
    });

    period.categories.insert(
        record.cat01.clone(),
        CategoryValue {
            value: record.value.clone(),
            unit: record.unit.clone(),
            name: lookups.category.name_of(&record.cat01).to_string(),
        },
    );
}
