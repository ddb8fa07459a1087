//! Summary statistics over a loaded series.

use statrs::statistics::Statistics;
use weather_core::{DailySeries, Error, Result, TempStats};

/// Count, mean, sample standard deviation, min and max of the target.
pub fn temp_stats(series: &DailySeries) -> Result<TempStats> {
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }

    let values: Vec<f64> = series.targets().collect();
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    Ok(TempStats {
        count: values.len() as f64,
        mean: values.iter().mean(),
        std: values.iter().std_dev(),
        min,
        max,
    })
}
