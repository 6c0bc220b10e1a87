//! Contributor statistics: the descriptive statistics engine and the
//! per-author aggregator that drives the pipeline.

pub mod aggregate;
pub mod statistics;

pub use aggregate::{AggregationError, ContributorStats, SearchOptions, StatsAggregator, summarise};
pub use statistics::{Statistics, calc_stats};
