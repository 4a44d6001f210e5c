//! Median of a set of power readings.

/// Median of the given values.
///
/// Empty input yields 0. Even counts yield the average of the two middle
/// values. NaN readings are filtered upstream by the eligibility rules and
/// never reach this function through [`crate::analyze_string`].
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
