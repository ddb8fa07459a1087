//! Core types and configuration for the weather preparation pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Raw tables and validated daily series
//! - Feature matrix container
//! - Date and number parsing with lenient/strict modes
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod parse;
pub mod table;
pub mod types;

pub use config::{Config, FeatureConfig, LoaderConfig, MIN_DAILY_ROWS, MIN_FEATURE_ROWS};
pub use error::{Error, Result};
pub use parse::{parse_date, parse_number, DateParseMode};
pub use table::{Record, Table};
pub use types::*;
