//! Histogram Binning
//!
//! Equal-width 1D and 2D histograms with fixed or statistically-derived
//! ranges. Bins are half-open except the last, which is closed, so a
//! value exactly on the upper bound lands in the final bin.

/// How histogram counts are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyMode {
    /// Raw counts
    Absolute,
    /// Counts divided by the input sample count
    Relative,
}

/// Binning range for one axis
///
/// A positive `sigma` replaces the fixed bounds with `mean +/- sigma * std`
/// computed from the data being binned.
#[derive(Debug, Clone, Copy)]
pub struct BinRange {
    min: f64,
    max: f64,
    sigma: f64,
}

impl BinRange {
    /// Fixed bounds
    pub fn fixed(min: f64, max: f64) -> Self {
        Self { min, max, sigma: 0.0 }
    }

    /// Bounds derived from the data as `mean +/- sigma * std`
    pub fn dynamic(sigma: f64) -> Self {
        Self { min: 0.0, max: 0.0, sigma }
    }

    /// Resolve the effective bounds against the data being binned
    fn resolve(&self, data: &[f64]) -> (f64, f64) {
        if self.sigma > 0.0 {
            let mu = mean(data);
            let sd = std_dev(data);
            (mu - self.sigma * sd, mu + self.sigma * sd)
        } else {
            (self.min, self.max)
        }
    }
}

/// Arithmetic mean; 0 for empty input
fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Population standard deviation; 0 for empty input
fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mu = mean(data);
    let variance = data.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Bin index for a value, or None when it falls outside [min, max]
///
/// The last bin is closed: `value == max` maps to `bins - 1`. This also
/// covers the degenerate zero-width range of constant data, where every
/// in-range value equals the upper bound.
fn bin_index(value: f64, min: f64, max: f64, bins: usize) -> Option<usize> {
    if value < min || value > max {
        return None;
    }
    if value >= max {
        return Some(bins - 1);
    }
    let idx = ((value - min) / (max - min) * bins as f64) as usize;
    Some(idx.min(bins - 1))
}

/// 1D histogram over `bins` equal-width intervals
///
/// Values outside the resolved range are dropped. Relative mode divides
/// by the full input length, not the in-range count. Empty input yields
/// an all-zero vector of the requested length.
pub fn hist1d(data: &[f64], bins: usize, range: BinRange, mode: FrequencyMode) -> Vec<f64> {
    let mut hist = vec![0.0; bins];
    if data.is_empty() {
        return hist;
    }

    let (min, max) = range.resolve(data);
    for &value in data {
        if let Some(idx) = bin_index(value, min, max, bins) {
            hist[idx] += 1.0;
        }
    }

    if mode == FrequencyMode::Relative {
        let n = data.len() as f64;
        for count in &mut hist {
            *count /= n;
        }
    }
    hist
}

/// 2D histogram flattened x-major into `bins_x * bins_y` values
///
/// Paired inputs are truncated to the shorter series before the ranges
/// are resolved. A point counts only when both coordinates are in range.
/// Empty input yields an all-zero vector of the flattened length.
pub fn hist2d(
    x: &[f64],
    y: &[f64],
    bins_x: usize,
    bins_y: usize,
    x_range: BinRange,
    y_range: BinRange,
    mode: FrequencyMode,
) -> Vec<f64> {
    let mut hist = vec![0.0; bins_x * bins_y];
    let len = x.len().min(y.len());
    if len == 0 {
        return hist;
    }
    let x = &x[..len];
    let y = &y[..len];

    let (x_min, x_max) = x_range.resolve(x);
    let (y_min, y_max) = y_range.resolve(y);

    for (&xv, &yv) in x.iter().zip(y.iter()) {
        let xi = match bin_index(xv, x_min, x_max, bins_x) {
            Some(i) => i,
            None => continue,
        };
        let yi = match bin_index(yv, y_min, y_max, bins_y) {
            Some(i) => i,
            None => continue,
        };
        hist[xi * bins_y + yi] += 1.0;
    }

    if mode == FrequencyMode::Relative {
        let n = len as f64;
        for count in &mut hist {
            *count /= n;
        }
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absolute_counts_sum_to_in_range_len() {
        let data = [0.5, 1.5, 2.5, 3.5, 9.0];
        let hist = hist1d(&data, 4, BinRange::fixed(0.0, 4.0), FrequencyMode::Absolute);
        assert_eq!(hist, vec![1.0, 1.0, 1.0, 1.0]);
        // 9.0 is out of range and dropped
        assert_eq!(hist.iter().sum::<f64>(), 4.0);
    }

    #[test]
    fn test_relative_sums_to_one() {
        let data = [0.1, 0.2, 0.3, 0.9];
        let hist = hist1d(&data, 10, BinRange::fixed(0.0, 1.0), FrequencyMode::Relative);
        assert!((hist.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_upper_bound_lands_in_last_bin() {
        let hist = hist1d(&[4.0], 4, BinRange::fixed(0.0, 4.0), FrequencyMode::Absolute);
        assert_eq!(hist, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_input_yields_zeros() {
        let hist = hist1d(&[], 5, BinRange::fixed(0.0, 1.0), FrequencyMode::Relative);
        assert_eq!(hist, vec![0.0; 5]);

        let hist = hist2d(
            &[],
            &[],
            3,
            4,
            BinRange::fixed(0.0, 1.0),
            BinRange::fixed(0.0, 1.0),
            FrequencyMode::Absolute,
        );
        assert_eq!(hist, vec![0.0; 12]);
    }

    #[test]
    fn test_dynamic_range_follows_data() {
        // mean = 5, std = 2 over [3, 7, 3, 7]; sigma 1 gives range [3, 7]
        let data = [3.0, 7.0, 3.0, 7.0];
        let hist = hist1d(&data, 2, BinRange::dynamic(1.0), FrequencyMode::Absolute);
        assert_eq!(hist, vec![2.0, 2.0]);
    }

    #[test]
    fn test_constant_data_degenerate_range() {
        // sigma range collapses to [c, c]; every value equals the upper
        // bound and lands in the last bin
        let data = [4.2, 4.2, 4.2];
        let hist = hist1d(&data, 5, BinRange::dynamic(3.0), FrequencyMode::Absolute);
        assert_eq!(hist, vec![0.0, 0.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_2d_row_major_flattening() {
        // x in first of 2 bins, y in last of 3 bins -> index 0 * 3 + 2
        let hist = hist2d(
            &[0.25],
            &[0.9],
            2,
            3,
            BinRange::fixed(0.0, 1.0),
            BinRange::fixed(0.0, 1.0),
            FrequencyMode::Absolute,
        );
        let mut expected = vec![0.0; 6];
        expected[2] = 1.0;
        assert_eq!(hist, expected);
    }

    #[test]
    fn test_2d_truncates_to_shorter() {
        let hist = hist2d(
            &[0.5, 0.5, 0.5],
            &[0.5],
            2,
            2,
            BinRange::fixed(0.0, 1.0),
            BinRange::fixed(0.0, 1.0),
            FrequencyMode::Relative,
        );
        // One point after truncation; relative divides by truncated length
        assert_eq!(hist.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_2d_point_dropped_unless_both_in_range() {
        let hist = hist2d(
            &[0.5, 5.0],
            &[0.5, 0.5],
            2,
            2,
            BinRange::fixed(0.0, 1.0),
            BinRange::fixed(0.0, 1.0),
            FrequencyMode::Absolute,
        );
        assert_eq!(hist.iter().sum::<f64>(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_absolute_sum_never_exceeds_len(
            data in proptest::collection::vec(-100.0f64..100.0, 0..100),
            bins in 1usize..32,
        ) {
            let hist = hist1d(&data, bins, BinRange::dynamic(3.0), FrequencyMode::Absolute);
            prop_assert_eq!(hist.len(), bins);
            let total: f64 = hist.iter().sum();
            prop_assert!(total <= data.len() as f64 + 1e-9);
            prop_assert!(hist.iter().all(|&v| v >= 0.0));
        }

        #[test]
        fn prop_relative_sum_at_most_one(
            data in proptest::collection::vec(-100.0f64..100.0, 1..100),
            bins in 1usize..32,
        ) {
            let hist = hist1d(&data, bins, BinRange::fixed(-50.0, 50.0), FrequencyMode::Relative);
            let total: f64 = hist.iter().sum();
            prop_assert!(total <= 1.0 + 1e-9);
        }
    }
}
