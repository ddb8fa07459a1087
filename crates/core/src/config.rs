//! Configuration structures for the weather preparation pipeline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Minimum number of daily rows a loaded series must keep after cleaning.
pub const MIN_DAILY_ROWS: usize = 50;

/// Minimum number of rows a feature matrix must keep after warm-up rows are dropped.
pub const MIN_FEATURE_ROWS: usize = 20;

/// Default date column name (NOAA LCD exports).
pub const DEFAULT_DATE_COL: &str = "DATE";

/// Default target column name (NOAA LCD daily average dry-bulb temperature).
pub const DEFAULT_TARGET_COL: &str = "DailyAverageDryBulbTemperature";

/// Default station label used in diagnostics.
pub const DEFAULT_STATION_NAME: &str = "Albany (Representative Northeast Station)";

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Loader/validator configuration.
    pub loader: LoaderConfig,
    /// Feature builder configuration.
    pub features: FeatureConfig,
}

impl Config {
    /// Parse a configuration from TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.features.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::not_found(path));
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Loader/validator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Human-readable station label.
    pub station_name: String,
    /// Name of the date column.
    pub date_col: String,
    /// Name of the numeric target column.
    pub target_col: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            station_name: DEFAULT_STATION_NAME.to_string(),
            date_col: DEFAULT_DATE_COL.to_string(),
            target_col: DEFAULT_TARGET_COL.to_string(),
        }
    }
}

/// Feature builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Name of the date column.
    pub date_col: String,
    /// Name of the numeric target column.
    pub target_col: String,
    /// Lags in days, in output column order.
    pub lags: Vec<usize>,
    /// Rolling window sizes in days, in output column order.
    pub windows: Vec<usize>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            date_col: DEFAULT_DATE_COL.to_string(),
            target_col: DEFAULT_TARGET_COL.to_string(),
            lags: vec![1, 2, 3, 7],
            windows: vec![3, 7, 14],
        }
    }
}

impl FeatureConfig {
    /// Replace the lag set.
    pub fn with_lags(mut self, lags: impl Into<Vec<usize>>) -> Self {
        self.lags = lags.into();
        self
    }

    /// Replace the window set.
    pub fn with_windows(mut self, windows: impl Into<Vec<usize>>) -> Self {
        self.windows = windows.into();
        self
    }

    /// Check that lags and windows are ordered sets of positive integers.
    pub fn validate(&self) -> Result<()> {
        check_positive_set("lags", &self.lags)?;
        check_positive_set("windows", &self.windows)
    }
}

fn check_positive_set(name: &str, values: &[usize]) -> Result<()> {
    if values.contains(&0) {
        return Err(Error::config(format!("{name} must be positive, got {values:?}")));
    }
    let mut seen = HashSet::with_capacity(values.len());
    if let Some(dup) = values.iter().find(|v| !seen.insert(**v)) {
        return Err(Error::config(format!("{name} contains {dup} more than once")));
    }
    Ok(())
}
