//! Fixed-bin histogram shared by both distribution panels
//!
//! Both the linear and the log-log panel view the same data through the
//! same binning, so the histogram lives here rather than inside the
//! plot code.

/// Equal-width histogram over the value range of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Per-bin counts, `bins` entries.
    pub counts: Vec<u64>,
    /// Bin boundaries, `bins + 1` entries; the top edge is inclusive.
    pub edges: Vec<f64>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width buckets spanning
    /// `[min, max]`. A degenerate range (all values equal) is widened
    /// by 0.5 on each side so every value still lands in a bin.
    ///
    /// Returns `None` when `values` is empty or `bins` is zero.
    pub fn from_values(values: &[i64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = *values.iter().min()? as f64;
        let max = *values.iter().max()? as f64;
        let (lo, hi) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0u64; bins];
        for &value in values {
            let index = (((value as f64 - lo) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
        Some(Self { counts, edges })
    }

    /// (upper edge, count) pairs for bins with at least one value, the
    /// points the log-log panel plots.
    pub fn occupied_bins(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(i, &count)| (self.edges[i + 1], count))
    }
}
