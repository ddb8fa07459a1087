//! Data ingestion and validation for the weather preparation pipeline.
//!
//! This crate handles:
//! - CSV reading into an untyped table
//! - Schema checks and lenient date/number coercion
//! - Last-wins deduplication per day and ordering
//! - Summary statistics and diagnostics for a loaded station

pub mod cleaner;
pub mod reader;
pub mod station;
pub mod stats;

pub use cleaner::{CleaningStats, SeriesCleaner};
pub use reader::{read_csv, read_csv_path};
pub use station::WeatherStation;
pub use stats::temp_stats;
