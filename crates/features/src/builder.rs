//! Supervised-learning feature construction from a daily series.
//!
//! Every window-based column is computed from days strictly before the row's
//! own date: lag `k` reads `k` rows back, and rolling statistics read the
//! `w` targets preceding the row. Rows whose lags or windows are incomplete
//! (warm-up rows) are dropped.

use crate::calendar::CalendarFeatures;
use crate::rolling::RollingStats;
use chrono::NaiveDate;
use tracing::debug;
use weather_core::{
    parse_date, parse_number, DailySeries, DateParseMode, Error, FeatureColumn, FeatureConfig,
    FeatureMatrix, Result, Table, MIN_FEATURE_ROWS,
};

/// Builds a [`FeatureMatrix`] from a table or a validated series.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    config: FeatureConfig,
    min_rows: usize,
}

impl FeatureBuilder {
    /// Create a builder; lags and windows must be distinct positive integers.
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            min_rows: MIN_FEATURE_ROWS,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Output column names, in order (the date axis is not a column).
    pub fn column_names(&self) -> Vec<String> {
        let target = &self.config.target_col;
        let mut names = vec![target.clone()];
        names.extend(self.config.lags.iter().map(|k| format!("{target}_lag_{k}")));
        for w in &self.config.windows {
            names.push(format!("{target}_rollmean_{w}"));
            names.push(format!("{target}_rollstd_{w}"));
        }
        names.extend(
            ["month", "dayofyear", "weekday", "doy_sin", "doy_cos"]
                .iter()
                .map(|s| s.to_string()),
        );
        names
    }

    /// Build features from any table holding the date and target columns.
    ///
    /// Rows are re-sorted by date. Dates must all parse; targets that do not
    /// parse are treated as missing and their rows (and the windows that
    /// include them) fall out with the warm-up rows.
    pub fn build(&self, table: &Table) -> Result<FeatureMatrix> {
        let (date_idx, target_idx) = match (
            table.column_index(&self.config.date_col),
            table.column_index(&self.config.target_col),
        ) {
            (Some(d), Some(t)) => (d, t),
            _ => {
                let missing = table.missing_columns(&[
                    self.config.date_col.as_str(),
                    self.config.target_col.as_str(),
                ]);
                return Err(Error::feature_build(format!(
                    "table missing date/target columns: {missing:?}"
                )));
            }
        };

        let dates = table
            .column_values(date_idx)
            .map(|raw| -> Result<NaiveDate> {
                parse_date(raw, DateParseMode::StrictReject)?.ok_or_else(|| {
                    Error::feature_build(format!("bad date '{raw}' during feature build"))
                })
            })
            .collect::<Result<Vec<NaiveDate>>>()?;
        let targets: Vec<Option<f64>> = table.column_values(target_idx).map(parse_number).collect();

        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by_key(|&i| dates[i]);

        let sorted_dates = order.iter().map(|&i| dates[i]).collect();
        let sorted_targets = order.iter().map(|&i| targets[i]).collect();
        self.assemble(sorted_dates, sorted_targets)
    }

    /// Build features from a validated series (already ordered and complete).
    pub fn build_series(&self, series: &DailySeries) -> Result<FeatureMatrix> {
        if series.date_col() != self.config.date_col
            || series.target_col() != self.config.target_col
        {
            return self.build(&series.to_table());
        }
        self.assemble(series.dates().collect(), series.targets().map(Some).collect())
    }

    fn assemble(&self, dates: Vec<NaiveDate>, targets: Vec<Option<f64>>) -> Result<FeatureMatrix> {
        let n = dates.len();
        let lags = &self.config.lags;
        let windows = &self.config.windows;

        let lag_cols: Vec<Vec<Option<f64>>> = lags
            .iter()
            .map(|&k| (0..n).map(|i| i.checked_sub(k).and_then(|j| targets[j])).collect())
            .collect();

        let mut roll_cols: Vec<(Vec<Option<f64>>, Vec<Option<f64>>)> =
            Vec::with_capacity(windows.len());
        for &w in windows {
            let mut stats = RollingStats::new(w);
            let mut means = Vec::with_capacity(n);
            let mut stds = Vec::with_capacity(n);
            for target in &targets {
                // Read before pushing: the window holds only earlier days.
                means.push(stats.mean());
                stds.push(stats.std_dev());
                stats.push(*target);
            }
            roll_cols.push((means, stds));
        }

        let keep: Vec<usize> = (0..n)
            .filter(|&i| {
                targets[i].is_some()
                    && lag_cols.iter().all(|c| c[i].is_some())
                    && roll_cols.iter().all(|(m, s)| m[i].is_some() && s[i].is_some())
            })
            .collect();

        debug!(
            input_rows = n,
            kept_rows = keep.len(),
            dropped_rows = n - keep.len(),
            "dropped warm-up rows"
        );

        if keep.len() < self.min_rows {
            return Err(Error::feature_build(format!(
                "too few rows after features ({}); reduce lags/windows or check data",
                keep.len()
            )));
        }

        let mut names = self.column_names().into_iter();
        let mut next_column = |values: Vec<f64>| FeatureColumn {
            name: names.next().unwrap_or_default(),
            values,
        };

        let mut columns = Vec::with_capacity(self.column_names().len());
        columns.push(next_column(pick(&targets, &keep)));
        for col in &lag_cols {
            columns.push(next_column(pick(col, &keep)));
        }
        for (means, stds) in &roll_cols {
            columns.push(next_column(pick(means, &keep)));
            columns.push(next_column(pick(stds, &keep)));
        }

        let calendar: Vec<CalendarFeatures> =
            keep.iter().map(|&i| CalendarFeatures::of(dates[i])).collect();
        columns.push(next_column(calendar.iter().map(|c| c.month as f64).collect()));
        columns.push(next_column(calendar.iter().map(|c| c.dayofyear as f64).collect()));
        columns.push(next_column(calendar.iter().map(|c| c.weekday as f64).collect()));
        columns.push(next_column(calendar.iter().map(|c| c.doy_sin).collect()));
        columns.push(next_column(calendar.iter().map(|c| c.doy_cos).collect()));

        let kept_dates = keep.iter().map(|&i| dates[i]).collect();
        FeatureMatrix::new(self.config.date_col.clone(), kept_dates, columns)
    }
}

/// Values of `col` at the kept rows; kept rows hold no missing values.
///
/// A missing value would shorten the column, which `FeatureMatrix::new`
/// rejects as a length mismatch.
fn pick(col: &[Option<f64>], keep: &[usize]) -> Vec<f64> {
    debug_assert!(keep.iter().all(|&i| col[i].is_some()));
    keep.iter().filter_map(|&i| col[i]).collect()
}

/// Build features with the given configuration.
pub fn build_features(table: &Table, config: &FeatureConfig) -> Result<FeatureMatrix> {
    FeatureBuilder::new(config.clone())?.build(table)
}
