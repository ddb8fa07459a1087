//! Feature computation for the weather preparation pipeline.
//!
//! This crate handles:
//! - Lag features
//! - Leakage-free rolling mean and standard deviation
//! - Calendar and cyclical seasonal encodings
//! - Date-ordered, single-pass day streaming

pub mod builder;
pub mod calendar;
pub mod rolling;
pub mod stream;

pub use builder::{build_features, FeatureBuilder};
pub use calendar::CalendarFeatures;
pub use rolling::RollingStats;
pub use stream::{stream_days, stream_series_days, DayStream, SeriesDays};
