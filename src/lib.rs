//! `estat-sync` library crate.
//!
//! The binary (`estat-sync`) is a thin wrapper around this library so that:
//!
//! - the normalization and persistence logic is testable without spawning processes
//! - the pipeline can be driven from a saved API response as well as a live fetch

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;
