//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - output layout and grouping enums (`OutputLayout`, `Grouping`)
//! - the normalized snapshot shape (`CleanedDataset`, `NormalizedBranch`, `NormalizedPeriod`)
//! - run configuration (`StatsQuery`, `PersistConfig`)

pub mod types;

pub use types::*;
