//! Core data types for the weather preparation pipeline.

use crate::error::{Error, Result};
use crate::table::Table;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for dates written back to text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One validated day of a station log.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    /// Calendar day (time of day discarded).
    pub date: NaiveDate,
    /// Finite daily measurement.
    pub target: f64,
    /// Original row cells, passed through unvalidated.
    pub fields: Vec<String>,
}

/// Validated, deduplicated, date-ordered history of one station.
///
/// Dates are strictly increasing and every target is finite. There is no
/// mutating API; a series is built once and then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    date_col: String,
    target_col: String,
    headers: Vec<String>,
    observations: Vec<DailyObservation>,
}

impl DailySeries {
    /// Assemble a series from observations.
    ///
    /// Fails if dates are not strictly increasing or a target is not finite.
    pub fn new(
        date_col: impl Into<String>,
        target_col: impl Into<String>,
        headers: Vec<String>,
        observations: Vec<DailyObservation>,
    ) -> Result<Self> {
        if let Some(pair) = observations.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(Error::validation(format!(
                "dates not strictly increasing at {} -> {}",
                pair[0].date, pair[1].date
            )));
        }
        if let Some(obs) = observations.iter().find(|o| !o.target.is_finite()) {
            return Err(Error::validation(format!("non-finite target on {}", obs.date)));
        }
        Ok(Self {
            date_col: date_col.into(),
            target_col: target_col.into(),
            headers,
            observations,
        })
    }

    /// Name of the date column.
    pub fn date_col(&self) -> &str {
        &self.date_col
    }

    /// Name of the target column.
    pub fn target_col(&self) -> &str {
        &self.target_col
    }

    /// Original column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Observations in date order.
    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no days.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Dates in order.
    pub fn dates(&self) -> impl ExactSizeIterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|o| o.date)
    }

    /// Target values in date order.
    pub fn targets(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.target)
    }

    /// First and last day.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Ok((first.date, last.date)),
            _ => Err(Error::EmptySeries),
        }
    }

    /// Render back to a table with normalized date and target cells.
    ///
    /// Extra columns keep their original text.
    pub fn to_table(&self) -> Table {
        let date_idx = self.headers.iter().position(|h| *h == self.date_col);
        let target_idx = self.headers.iter().position(|h| *h == self.target_col);

        let rows = self
            .observations
            .iter()
            .map(|obs| {
                let mut row = obs.fields.clone();
                row.resize(self.headers.len(), String::new());
                if let Some(i) = date_idx {
                    row[i] = obs.date.format(DATE_FORMAT).to_string();
                }
                if let Some(i) = target_idx {
                    row[i] = obs.target.to_string();
                }
                row
            })
            .collect();

        Table::new(self.headers.clone(), rows)
    }
}

/// Summary statistics of a target column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempStats {
    /// Number of values.
    pub count: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); NaN for a single value.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// A named, dense feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    /// Column name.
    pub name: String,
    /// One value per matrix row.
    pub values: Vec<f64>,
}

/// Supervised-learning features on a chronological date axis.
///
/// Every column has exactly one finite value per row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    date_col: String,
    dates: Vec<NaiveDate>,
    columns: Vec<FeatureColumn>,
}

impl FeatureMatrix {
    /// Assemble a matrix; every column must match the date axis length.
    pub fn new(
        date_col: impl Into<String>,
        dates: Vec<NaiveDate>,
        columns: Vec<FeatureColumn>,
    ) -> Result<Self> {
        if let Some(col) = columns.iter().find(|c| c.values.len() != dates.len()) {
            return Err(Error::feature_build(format!(
                "column '{}' has {} values for {} dates",
                col.name,
                col.values.len(),
                dates.len()
            )));
        }
        Ok(Self {
            date_col: date_col.into(),
            dates,
            columns,
        })
    }

    /// Name used for the date column on export.
    pub fn date_col(&self) -> &str {
        &self.date_col
    }

    /// Row dates in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// All columns in output order.
    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Column names in output order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Values of a named column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Date and values of row `i` in column order.
    pub fn row(&self, i: usize) -> Option<(NaiveDate, Vec<f64>)> {
        let date = *self.dates.get(i)?;
        Some((date, self.columns.iter().map(|c| c.values[i]).collect()))
    }

    /// Write the matrix as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(self.date_col.as_str());
        header.extend(self.column_names());
        wtr.write_record(&header)?;

        for (i, date) in self.dates.iter().enumerate() {
            let mut record = Vec::with_capacity(self.columns.len() + 1);
            record.push(date.format(DATE_FORMAT).to_string());
            record.extend(self.columns.iter().map(|c| c.values[i].to_string()));
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
