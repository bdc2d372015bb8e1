//! Data ingestion layer for the ERP log tooling.
//!
//! Discovers the CSV exports in a directory, parses them in time-series or
//! summary mode, aggregates the accepted rows and runs the top-level
//! analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use erp_core as core;
