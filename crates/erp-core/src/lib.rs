//! Core types for the ERP coil-line log tooling.
//!
//! Holds the data model, the fixed-schema row parser, the summary
//! calculator, the diagnostics collector, errors and CLI settings shared by
//! the data, chart and binary crates.

pub mod chooser;
pub mod diagnostics;
pub mod error;
pub mod formatting;
pub mod models;
pub mod row_parser;
pub mod settings;
pub mod summary;

pub use error::{ErpError, Result};
