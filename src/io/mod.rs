//! Input/output helpers.
//!
//! - snapshot loading + change detection (`snapshot`)
//! - create/update/skip persistence (`writer`)

pub mod snapshot;
pub mod writer;

pub use snapshot::*;
pub use writer::*;
