//! Validation and normalization of a raw station table into a daily series.
//!
//! Steps, in order: required columns, lenient date coercion, numeric
//! coercion, null-row drop, last-wins deduplication per day, minimum length.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;
use weather_core::{
    parse_date, parse_number, DailyObservation, DailySeries, DateParseMode, Error, LoaderConfig,
    Result, Table, MIN_DAILY_ROWS,
};

/// Counters describing what cleaning removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    /// Rows in the raw table.
    pub input_rows: usize,
    /// Rows whose date could not be parsed.
    pub bad_dates: usize,
    /// Rows whose target was missing or non-numeric.
    pub bad_targets: usize,
    /// Rows dropped for a null date or target.
    pub dropped_rows: usize,
    /// Earlier rows replaced by a later row for the same day.
    pub duplicate_days: usize,
    /// Rows in the cleaned series.
    pub output_rows: usize,
}

/// Turns a raw [`Table`] into a [`DailySeries`] or a precise validation error.
#[derive(Debug, Clone)]
pub struct SeriesCleaner {
    date_col: String,
    target_col: String,
    min_rows: usize,
}

impl SeriesCleaner {
    /// Create a cleaner for the configured columns.
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            date_col: config.date_col.clone(),
            target_col: config.target_col.clone(),
            min_rows: MIN_DAILY_ROWS,
        }
    }

    /// Clean a table.
    pub fn clean(&self, table: &Table) -> Result<DailySeries> {
        self.clean_with_stats(table).map(|(series, _)| series)
    }

    /// Clean a table and report what was removed.
    pub fn clean_with_stats(&self, table: &Table) -> Result<(DailySeries, CleaningStats)> {
        let mut stats = CleaningStats {
            input_rows: table.len(),
            ..CleaningStats::default()
        };

        let (date_idx, target_idx) = match (
            table.column_index(&self.date_col),
            table.column_index(&self.target_col),
        ) {
            (Some(d), Some(t)) => (d, t),
            _ => {
                let missing =
                    table.missing_columns(&[self.date_col.as_str(), self.target_col.as_str()]);
                return Err(Error::validation(format!("missing columns: {missing:?}")));
            }
        };

        let dates = table
            .column_values(date_idx)
            .map(|raw| parse_date(raw, DateParseMode::LenientCoerce))
            .collect::<Result<Vec<Option<NaiveDate>>>>()?;
        stats.bad_dates = dates.iter().filter(|d| d.is_none()).count();
        if stats.bad_dates == dates.len() {
            return Err(Error::validation(format!("bad dates in '{}'", self.date_col)));
        }

        let targets: Vec<Option<f64>> = table.column_values(target_idx).map(parse_number).collect();
        stats.bad_targets = targets.iter().filter(|t| t.is_none()).count();
        if stats.bad_targets == targets.len() {
            return Err(Error::validation(format!(
                "bad numeric values in '{}'",
                self.target_col
            )));
        }

        // Filled in file order: a later row for the same day replaces the earlier one.
        let mut by_day: BTreeMap<NaiveDate, DailyObservation> = BTreeMap::new();
        for ((date, target), record) in dates.into_iter().zip(targets).zip(table.records()) {
            let (Some(date), Some(target)) = (date, target) else {
                stats.dropped_rows += 1;
                continue;
            };
            let obs = DailyObservation {
                date,
                target,
                fields: record.values().to_vec(),
            };
            if by_day.insert(date, obs).is_some() {
                stats.duplicate_days += 1;
            }
        }

        let observations: Vec<DailyObservation> = by_day.into_values().collect();
        stats.output_rows = observations.len();
        debug!(
            input = stats.input_rows,
            dropped = stats.dropped_rows,
            duplicates = stats.duplicate_days,
            kept = stats.output_rows,
            "cleaned station table"
        );

        if observations.len() < self.min_rows {
            return Err(Error::validation(format!(
                "not enough daily rows after cleaning ({})",
                observations.len()
            )));
        }

        let series = DailySeries::new(
            self.date_col.clone(),
            self.target_col.clone(),
            table.headers().to_vec(),
            observations,
        )?;
        Ok((series, stats))
    }
}

impl Default for SeriesCleaner {
    fn default() -> Self {
        Self::new(&LoaderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const TARGET: &str = "DailyAverageDryBulbTemperature";

    fn day(i: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(i)
    }

    fn table(rows: Vec<(String, String)>) -> Table {
        Table::new(
            vec!["DATE".into(), TARGET.into()],
            rows.into_iter().map(|(d, t)| vec![d, t]).collect(),
        )
    }

    fn daily_rows(n: i64) -> Vec<(String, String)> {
        (0..n)
            .map(|i| (day(i).to_string(), format!("{}", (i % 50) as f64)))
            .collect()
    }

    #[test]
    fn test_clean_valid_table() {
        let (series, stats) = SeriesCleaner::default()
            .clean_with_stats(&table(daily_rows(80)))
            .unwrap();
        assert_eq!(series.len(), 80);
        assert_eq!(stats.dropped_rows, 0);
        assert_eq!(stats.duplicate_days, 0);
    }

    #[test]
    fn test_missing_target_column_named() {
        let t = Table::new(vec!["DATE".into()], vec![vec!["2020-01-01".into()]]);
        let err = SeriesCleaner::default().clean(&t).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains(TARGET));
        assert!(!err.to_string().contains("\"DATE\""));
    }

    #[test]
    fn test_both_columns_missing_named() {
        let t = Table::new(vec!["STATION".into()], vec![vec!["USW00014735".into()]]);
        let err = SeriesCleaner::default().clean(&t).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains(&format!("[\"DATE\", \"{TARGET}\"]")));
    }

    #[test]
    fn test_all_bad_dates() {
        let rows = (0..60).map(|i| ("garbage".to_string(), i.to_string())).collect();
        let err = SeriesCleaner::default().clean(&table(rows)).unwrap_err();
        assert!(err.to_string().contains("bad dates in 'DATE'"));
    }

    #[test]
    fn test_all_bad_targets() {
        let rows = (0..60).map(|i| (day(i).to_string(), "M".to_string())).collect();
        let err = SeriesCleaner::default().clean(&table(rows)).unwrap_err();
        assert!(err.to_string().contains(&format!("bad numeric values in '{TARGET}'")));
    }

    #[test]
    fn test_sentinel_rows_dropped() {
        let mut rows = daily_rows(60);
        rows[3].1 = "T".into();
        rows[10].1 = "45s".into();
        rows[20].0 = "not-a-day".into();
        let (series, stats) = SeriesCleaner::default().clean_with_stats(&table(rows)).unwrap();
        assert_eq!(series.len(), 57);
        assert_eq!(stats.dropped_rows, 3);
        assert_eq!(stats.bad_targets, 2);
        assert_eq!(stats.bad_dates, 1);
    }

    #[test]
    fn test_too_few_rows_reports_count() {
        let err = SeriesCleaner::default().clean(&table(daily_rows(49))).unwrap_err();
        assert!(err.to_string().contains("not enough daily rows after cleaning (49)"));
    }

    #[test]
    fn test_duplicate_day_keeps_last_in_file_order() {
        let mut rows = daily_rows(60);
        // Day 5 appears four times; the last occurrence in the file wins.
        rows.push((day(5).to_string(), "99".into()));
        rows.insert(0, (format!("{}T23:59:00", day(5)), "-7".into()));
        rows.push((day(5).to_string(), "12.5".into()));

        let (series, stats) = SeriesCleaner::default().clean_with_stats(&table(rows)).unwrap();
        assert_eq!(series.len(), 60);
        assert_eq!(stats.duplicate_days, 3);

        let kept: Vec<_> = series.observations().iter().filter(|o| o.date == day(5)).collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].target, 12.5);
    }

    #[test]
    fn test_time_of_day_collapses_to_one_day() {
        let mut rows = daily_rows(60);
        rows.push((format!("{} 23:59", day(59)), "1.0".into()));
        let series = SeriesCleaner::default().clean(&table(rows)).unwrap();
        assert_eq!(series.len(), 60);
        assert_eq!(series.observations().last().unwrap().target, 1.0);
    }
}
