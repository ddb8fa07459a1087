//! Trailing-window statistics over a daily series.
//!
//! The window holds the most recent `window` pushed values. Callers read the
//! statistics for a day *before* pushing that day's value, so a day's own
//! target never enters its own window.

use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Rolling mean and sample standard deviation with missing-value tracking.
#[derive(Debug, Clone)]
pub struct RollingStats {
    /// Window size in days.
    window: usize,
    /// Most recent values, oldest first.
    values: VecDeque<Option<f64>>,
    /// Missing values currently inside the window.
    missing: usize,
}

impl RollingStats {
    /// Create a new rolling window of `window` days.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::new(),
            missing: 0,
        }
    }

    /// Add an observation, evicting the oldest once the window is full.
    pub fn push(&mut self, value: Option<f64>) {
        if self.count() >= self.window {
            if let Some(None) = self.values.pop_front() {
                self.missing -= 1;
            }
        }
        if value.is_none() {
            self.missing += 1;
        }
        self.values.push_back(value);
    }

    /// Whether the window is full and holds no missing values.
    pub fn is_ready(&self) -> bool {
        self.window > 0 && self.count() == self.window && self.missing == 0
    }

    /// Mean of the window, if ready.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        Some(self.values.iter().flatten().mean())
    }

    /// Sample standard deviation (ddof = 1) of the window.
    ///
    /// Undefined for a single-value window, like any sample deviation.
    pub fn std_dev(&self) -> Option<f64> {
        if !self.is_ready() || self.window < 2 {
            return None;
        }
        Some(self.values.iter().flatten().std_dev())
    }

    /// Number of values currently held.
    pub fn count(&self) -> usize {
        self.values.len()
    }
}
