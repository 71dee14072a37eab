//! Derived ad-performance metrics over ingested records: grouped summary
//! tables, daily trends, dataset KPIs, and allow-list filtering.
//!
//! Everything here is pure. Operations take a record slice and return
//! owned results, so callers decide what to cache and when to reload.

pub mod aggregate;
pub mod filter;
pub mod overview;
pub mod trend;

pub use aggregate::{aggregate_by, sort_by_cost_per_result};
pub use filter::RecordFilter;
pub use overview::{metric_stats, overview};
pub use trend::daily_trend;
