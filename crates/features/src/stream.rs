//! Single-pass, date-ordered traversal of a table.
//!
//! The stream snapshots the sort order when it is created and then walks it
//! forward once. It is not restartable: call [`stream_days`] again for a
//! second pass. Rows are neither dropped nor deduplicated.

use chrono::NaiveDate;
use std::iter::FusedIterator;
use weather_core::{
    parse_date, DailyObservation, DailySeries, DateParseMode, Error, Record, Result, Table,
};

/// Ordered `(date, record)` pairs over a borrowed table.
#[derive(Debug)]
pub struct DayStream<'a> {
    table: &'a Table,
    order: std::vec::IntoIter<(NaiveDate, usize)>,
}

impl<'a> DayStream<'a> {
    /// Parse every row's date and fix the traversal order.
    pub fn new(table: &'a Table, date_col: &str) -> Result<Self> {
        let date_idx = table
            .column_index(date_col)
            .ok_or_else(|| Error::feature_build(format!("missing date column '{date_col}'")))?;

        let mut order = table
            .column_values(date_idx)
            .enumerate()
            .map(|(i, raw)| -> Result<(NaiveDate, usize)> {
                let date = parse_date(raw, DateParseMode::StrictReject)?
                    .ok_or_else(|| Error::feature_build(format!("bad date '{raw}'")))?;
                Ok((date, i))
            })
            .collect::<Result<Vec<(NaiveDate, usize)>>>()?;
        // Stable: rows sharing a date keep their table order.
        order.sort_by_key(|&(date, _)| date);

        Ok(Self {
            table,
            order: order.into_iter(),
        })
    }
}

impl<'a> Iterator for DayStream<'a> {
    type Item = (NaiveDate, Record<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (date, i) = self.order.next()?;
        let record = self.table.record(i)?;
        Some((date, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for DayStream<'_> {}

impl FusedIterator for DayStream<'_> {}

/// Stream the rows of `table` in ascending date order.
pub fn stream_days<'a>(table: &'a Table, date_col: &str) -> Result<DayStream<'a>> {
    DayStream::new(table, date_col)
}

/// Ordered `(date, observation)` pairs over a validated series.
#[derive(Debug)]
pub struct SeriesDays<'a> {
    inner: std::slice::Iter<'a, DailyObservation>,
}

impl<'a> Iterator for SeriesDays<'a> {
    type Item = (NaiveDate, &'a DailyObservation);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|obs| (obs.date, obs))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for SeriesDays<'_> {}

impl FusedIterator for SeriesDays<'_> {}

/// Stream a validated series' days; the series is already in date order.
pub fn stream_series_days(series: &DailySeries) -> SeriesDays<'_> {
    SeriesDays {
        inner: series.observations().iter(),
    }
}
