//! Calendar and cyclical seasonal encodings of a day.

use chrono::{Datelike, NaiveDate};
use std::f64::consts::TAU;

/// Mean tropical year in days; keeps the yearly cycle continuous across leap years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Calendar fields of a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFeatures {
    /// Month, 1-12.
    pub month: u32,
    /// Day of year, 1-366.
    pub dayofyear: u32,
    /// Day of week, Monday = 0 through Sunday = 6.
    pub weekday: u32,
    /// `sin(2π · dayofyear / 365.25)`.
    pub doy_sin: f64,
    /// `cos(2π · dayofyear / 365.25)`.
    pub doy_cos: f64,
}

impl CalendarFeatures {
    /// Encode a date.
    pub fn of(date: NaiveDate) -> Self {
        let dayofyear = date.ordinal();
        let angle = seasonal_angle(dayofyear);
        Self {
            month: date.month(),
            dayofyear,
            weekday: date.weekday().num_days_from_monday(),
            doy_sin: angle.sin(),
            doy_cos: angle.cos(),
        }
    }
}

/// Angle of a day on the yearly cycle.
#[inline]
pub fn seasonal_angle(dayofyear: u32) -> f64 {
    TAU * (dayofyear as f64 / DAYS_PER_YEAR)
}
