//! Normalization of the flat `VALUE` list into nested periods.
//!
//! Responsibilities:
//!
//! - build code -> display name lookups from `CLASS_INF`
//! - convert raw period codes into `YYYY-MM` keys
//! - group records by branch (optional), period and category

pub mod normalizer;
pub mod resolver;
pub mod time_key;

pub use normalizer::*;
pub use resolver::*;
pub use time_key::*;
