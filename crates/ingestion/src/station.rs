//! A single weather station and its validated daily history.

use crate::cleaner::SeriesCleaner;
use crate::reader::read_csv_path;
use crate::stats::temp_stats;
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;
use weather_core::{DailySeries, LoaderConfig, Result, Table, TempStats};

/// One station's daily series, loaded and validated once.
#[derive(Debug, Clone)]
pub struct WeatherStation {
    name: String,
    source: Option<PathBuf>,
    series: DailySeries,
}

impl WeatherStation {
    /// Load and validate a station CSV file.
    pub fn load(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let table = read_csv_path(path)?;
        let mut station = Self::from_table(&table, config)?;
        station.source = Some(path.to_path_buf());
        info!(
            station = %station.name,
            path = %path.display(),
            rows = station.series.len(),
            "loaded station"
        );
        Ok(station)
    }

    /// Load with the default column names and station label.
    pub fn load_default(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path, &LoaderConfig::default())
    }

    /// Validate an in-memory table.
    pub fn from_table(table: &Table, config: &LoaderConfig) -> Result<Self> {
        let series = SeriesCleaner::new(config).clean(table)?;
        Ok(Self {
            name: config.station_name.clone(),
            source: None,
            series,
        })
    }

    /// Station label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the station was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The validated daily series.
    pub fn series(&self) -> &DailySeries {
        &self.series
    }

    /// First and last day of the series.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate)> {
        self.series.date_range()
    }

    /// Summary statistics of the target column.
    pub fn temp_stats(&self) -> Result<TempStats> {
        temp_stats(&self.series)
    }
}

impl fmt::Display for WeatherStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.date_range(), self.temp_stats()) {
            (Ok((first, last)), Ok(stats)) => write!(
                f,
                "WeatherStation(name='{}', rows={}, range={}..{}, mean={:.2})",
                self.name,
                self.series.len(),
                first,
                last,
                stats.mean
            ),
            _ => write!(f, "WeatherStation(name='{}', rows=0)", self.name),
        }
    }
}
