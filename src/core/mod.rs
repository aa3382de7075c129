//! Core domain: records, periods and the aggregations built on them

pub mod aggregation;
pub mod backend;
pub mod chart;
pub mod config;
pub mod entry;
pub mod log;
pub mod period;
pub mod totals;

// Re-export main types for cleaner imports
pub use aggregation::{AggregatedPeriod, EntrySummary, aggregate_by_period};
pub use backend::{BackendError, FinanceBackend, SaveOutcome, add_or_update, validate_record};
pub use chart::{ChartPoint, MAX_CHART_POINTS, format_chart_data};
pub use entry::{EntryPartition, EntryType, FinanceRecord, partition_by_type};
pub use period::Period;
pub use totals::TypeTotals;
