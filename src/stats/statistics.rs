//! Descriptive statistics over a sample of measurements.

/// Mean, median and median absolute deviation of one sample.
///
/// The default value (all zeros) is what an empty sample produces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median; the average of the two middle values for even-length samples.
    pub median: f64,
    /// Median of the absolute deviations from the median (unscaled).
    pub median_absolute_deviation: f64,
}

/// Computes [`Statistics`] for `sample`.
///
/// The input is never reordered; sorting happens on an internal copy, so the
/// result does not depend on the order of the sample.
///
/// # Example
///
/// ```
/// use devstats::stats::calc_stats;
///
/// let stats = calc_stats(&[24.0, 48.0]);
/// assert_eq!(stats.mean, 36.0);
/// assert_eq!(stats.median, 36.0);
/// assert_eq!(stats.median_absolute_deviation, 12.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "deviations from the median are floating point differences"
)]
pub fn calc_stats(sample: &[f64]) -> Statistics {
    if sample.is_empty() {
        return Statistics::default();
    }

    let median = median_of(sample.to_vec());
    let deviations: Vec<f64> = sample.iter().map(|value| (value - median).abs()).collect();

    Statistics {
        mean: mean_of(sample),
        median,
        median_absolute_deviation: median_of(deviations),
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the mean of a sample is a floating point quantity by definition"
)]
fn mean_of(sample: &[f64]) -> f64 {
    let total: f64 = sample.iter().sum();
    total / sample.len() as f64
}

#[expect(
    clippy::float_arithmetic,
    reason = "the median of an even-length sample averages the middle pair"
)]
fn median_of(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let Some(last_index) = values.len().checked_sub(1) else {
        return 0.0;
    };

    // Halving by shift: `lower` is (n - 1) / 2 and `upper` is n / 2, which
    // coincide for odd lengths.
    let lower = values.get(last_index >> 1).copied().unwrap_or_default();
    let upper = values.get(values.len() >> 1).copied().unwrap_or_default();
    (lower + upper) / 2.0
}
