//! fishcast library
//!
//! Moon phase approximation, fishing score engine and forecast ingestion,
//! plus the CLI and background refresh plumbing used by the binary.

pub mod cli;
pub mod data;
pub mod forecast;
pub mod logging;
pub mod moon;
pub mod refresh;
pub mod scoring;
