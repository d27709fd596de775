//! Descriptive statistics over already-rounded numeric columns.
//!
//! Every function works on its own sorted copy; caller slices are never
//! reordered. Empty input yields `None` rather than a zero or NaN.

use serde::Serialize;

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(f64::total_cmp)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(f64::total_cmp)
}

/// Middle value; the mean of the two central values for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(values);
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    if n.is_multiple_of(2) {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Nearest-rank percentile: `sorted[ceil(p/100 * n) - 1]`, index clamped
/// into range. Never interpolates.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    let sorted = sorted_copy(values);
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let rank = ((p / 100.0) * n as f64).ceil() - 1.0;
    let index = if rank.is_nan() || rank < 0.0 {
        0
    } else {
        (rank as usize).min(n - 1)
    };
    Some(sorted[index])
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Aggregate snapshot of one numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatBundle {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub sum: f64,
}

impl StatBundle {
    /// Summarize a column; `None` for an empty column
    pub fn from_values(values: &[f64]) -> Option<Self> {
        Some(Self {
            count: values.len(),
            mean: mean(values)?,
            median: median(values)?,
            min: min(values)?,
            max: max(values)?,
            p95: percentile(values, 95.0)?,
            sum: sum(values),
        })
    }
}
