//! Shared domain types.
//!
//! These types are the serialized shape of the snapshot files, so field names
//! and nesting must stay stable across releases: downstream reporting reads
//! them directly and change detection compares against what earlier runs wrote.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Branch code of the nationwide aggregate. Never written as its own file, since
/// it double-counts its constituent branches.
pub const NATIONWIDE_BRANCH_CODE: &str = "100000";

/// How the normalized dataset is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputLayout {
    /// One file, periods keyed by time only (`{updatedAt, data}`).
    Region,
    /// One file, periods nested under branches (`{updatedAt, branches}`).
    Branches,
    /// One file per branch (`{updatedAt, branchCode, branchName, data}`).
    PerBranch,
}

impl OutputLayout {
    pub fn grouping(self) -> Grouping {
        match self {
            OutputLayout::Region => Grouping::Region,
            OutputLayout::Branches | OutputLayout::PerBranch => Grouping::Branch,
        }
    }

    /// File name used by the whole-file layouts when none is configured.
    pub fn default_file_name(self) -> &'static str {
        match self {
            OutputLayout::Region => "pr.json",
            OutputLayout::Branches | OutputLayout::PerBranch => "whole-jp.json",
        }
    }
}

/// Whether records are grouped under their `cat03` branch or merged into one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Region,
    Branch,
}

/// One category leaf inside a period.
///
/// `value` stays textual: the API uses markers such as `-` or `***` for
/// suppressed cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryValue {
    pub value: String,
    pub unit: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPeriod {
    pub time_name: String,
    pub categories: BTreeMap<String, CategoryValue>,
}

/// Periods keyed by normalized `YYYY-MM` time key.
pub type PeriodMap = BTreeMap<String, NormalizedPeriod>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedBranch {
    pub name: String,
    pub code: String,
    pub data: PeriodMap,
}

pub type BranchMap = BTreeMap<String, NormalizedBranch>;

/// Content-bearing part of a dataset; serializes as either `data` or `branches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DatasetContent {
    Data(PeriodMap),
    Branches(BranchMap),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedDataset {
    pub updated_at: String,
    #[serde(flatten)]
    pub content: DatasetContent,
}

impl CleanedDataset {
    pub fn branches(&self) -> Option<&BranchMap> {
        match &self.content {
            DatasetContent::Branches(branches) => Some(branches),
            DatasetContent::Data(_) => None,
        }
    }

    pub fn periods(&self) -> Option<&PeriodMap> {
        match &self.content {
            DatasetContent::Data(periods) => Some(periods),
            DatasetContent::Branches(_) => None,
        }
    }
}

/// Per-branch projection written in the `per-branch` layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSnapshot<'a> {
    pub updated_at: &'a str,
    pub branch_code: &'a str,
    pub branch_name: &'a str,
    pub data: &'a PeriodMap,
}

impl<'a> BranchSnapshot<'a> {
    pub fn new(updated_at: &'a str, branch: &'a NormalizedBranch) -> Self {
        Self {
            updated_at,
            branch_code: &branch.code,
            branch_name: &branch.name,
            data: &branch.data,
        }
    }
}

/// Filters sent with the `getStatsData` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    pub stats_data_id: String,
    pub cat01: Vec<String>,
    pub cat02: String,
    pub cat03: Option<String>,
    pub lang: String,
}

/// Where and how the normalized dataset is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistConfig {
    pub layout: OutputLayout,
    pub output_dir: PathBuf,
    pub file_name: String,
    /// Branch codes never written in the `per-branch` layout.
    pub excluded_branches: Vec<String>,
    /// Decide and report, but leave the filesystem untouched.
    pub dry_run: bool,
}

impl PersistConfig {
    pub fn whole_file_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// Callers must check [`is_valid_branch_code`] first; the code becomes a file name.
    pub fn branch_file_path(&self, branch_code: &str) -> PathBuf {
        self.output_dir.join(format!("{branch_code}.json"))
    }

    pub fn is_excluded(&self, branch_code: &str) -> bool {
        branch_code == NATIONWIDE_BRANCH_CODE || self.excluded_branches.iter().any(|c| c == branch_code)
    }
}

/// Branch codes are used as file names in the `per-branch` layout, so only
/// plain ASCII alphanumeric codes are accepted.
pub fn is_valid_branch_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(value: &str) -> NormalizedPeriod {
        let mut categories = BTreeMap::new();
        categories.insert(
            "100000".to_string(),
            CategoryValue {
                value: value.to_string(),
                unit: "人".to_string(),
                name: "受理_総数".to_string(),
            },
        );
        NormalizedPeriod {
            time_name: "2025年4月".to_string(),
            categories,
        }
    }

    #[test]
    fn dataset_serializes_with_camel_case_content_key() {
        let mut data = PeriodMap::new();
        data.insert("2025-04".to_string(), period("12"));
        let dataset = CleanedDataset {
            updated_at: "2025-05-30".to_string(),
            content: DatasetContent::Data(data),
        };

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["updatedAt"], "2025-05-30");
        assert_eq!(json["data"]["2025-04"]["timeName"], "2025年4月");
        assert_eq!(json["data"]["2025-04"]["categories"]["100000"]["value"], "12");
        assert!(json.get("branches").is_none());
    }

    #[test]
    fn branch_snapshot_uses_branch_fields() {
        let mut data = PeriodMap::new();
        data.insert("2025-04".to_string(), period("7"));
        let branch = NormalizedBranch {
            name: "札幌出張所".to_string(),
            code: "101170".to_string(),
            data,
        };

        let json = serde_json::to_value(BranchSnapshot::new("2025-05-30", &branch)).unwrap();
        assert_eq!(json["branchCode"], "101170");
        assert_eq!(json["branchName"], "札幌出張所");
        assert_eq!(json["data"]["2025-04"]["categories"]["100000"]["value"], "7");
    }

    #[test]
    fn nationwide_branch_is_always_excluded() {
        let config = PersistConfig {
            layout: OutputLayout::PerBranch,
            output_dir: PathBuf::from("json"),
            file_name: "whole-jp.json".to_string(),
            excluded_branches: vec!["101170".to_string()],
            dry_run: false,
        };
        assert!(config.is_excluded(NATIONWIDE_BRANCH_CODE));
        assert!(config.is_excluded("101170"));
        assert!(!config.is_excluded("101180"));
        assert_eq!(config.branch_file_path("101180"), PathBuf::from("json/101180.json"));
    }

    #[test]
    fn branch_codes_must_be_plain_alphanumeric() {
        assert!(is_valid_branch_code("101170"));
        assert!(is_valid_branch_code("A1"));
        assert!(!is_valid_branch_code(""));
        assert!(!is_valid_branch_code("../101170"));
        assert!(!is_valid_branch_code("10/1170"));
        assert!(!is_valid_branch_code(".."));
        assert!(!is_valid_branch_code("札幌"));
    }
}
