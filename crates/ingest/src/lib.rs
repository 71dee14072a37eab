//! Report ingestion: raw table reading, schema normalization, cell-level
//! type coercion, and a fingerprint-validated report cache.
//!
//! The pipeline is three passes. `RawTable` reads the delimited source as
//! strings, `normalize_schema` fixes the labels and validates the schema,
//! and `coerce_types` turns the rows into typed records. `ReportLoader`
//! wraps all three behind a cache keyed by source identity.

#![warn(clippy::unwrap_used)]

pub mod coerce;
pub mod loader;
pub mod normalize;
pub mod table;

pub use coerce::coerce_types;
pub use loader::{load_report, LoadedReport, ReportLoader};
pub use normalize::{normalize_schema, NormalizedTable, TableSchema};
pub use table::RawTable;
