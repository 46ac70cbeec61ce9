//! Percentile reduction over sorted counter series
//!
//! Percentiles use linear interpolation between the two nearest order
//! statistics (numpy's default), truncated toward zero to an integer.
//! This matches the established report row format, so e.g. the gap
//! series `[2, 3, 4, 6]` at points `[10, 50, 100]` reduces to
//! `[2, 3, 6]`.

use std::fmt;

/// Decade percentile points of the report's first group.
pub const DECILES: [f64; 10] = [
    10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
];

/// Fine-grained top-decile points of the report's second group.
///
/// The 100% point appears in both groups on purpose: downstream
/// consumers index report columns positionally, so the duplication is
/// part of the format.
pub const FINE: [f64; 10] = [
    91.0, 92.0, 93.0, 94.0, 95.0, 96.0, 97.0, 98.0, 99.0, 100.0,
];

/// Computes interpolated percentiles of an ascending-sorted series.
///
/// Each point is a percentage in `[0, 100]`. Returns `None` for an
/// empty series.
pub fn percentiles(sorted: &[i64], points: &[f64]) -> Option<Vec<i64>> {
    if sorted.is_empty() {
        return None;
    }
    let last = sorted.len() - 1;
    Some(
        points
            .iter()
            .map(|&p| {
                let rank = (p / 100.0 * last as f64).clamp(0.0, last as f64);
                let lo = rank.floor() as usize;
                let hi = rank.ceil() as usize;
                let frac = rank - lo as f64;
                let value = sorted[lo] as f64 + frac * (sorted[hi] - sorted[lo]) as f64;
                value as i64
            })
            .collect(),
    )
}

/// Console summary of one counter series, printed alongside the report.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub len: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub stddev: f64,
}

impl SeriesSummary {
    /// Summarizes a series; `None` if it is empty.
    pub fn from_series(series: &[i64]) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let len = series.len();
        let min = *series.iter().min().unwrap();
        let max = *series.iter().max().unwrap();
        let mean = series.iter().map(|&v| v as f64).sum::<f64>() / len as f64;
        let variance = series
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / len as f64;
        Some(Self {
            len,
            min,
            max,
            mean,
            stddev: variance.sqrt(),
        })
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={} min={} max={} mean={:.2} stddev={:.2}",
            self.len, self.min, self.max, self.mean, self.stddev
        )
    }
}
