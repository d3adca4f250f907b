/// Computes the arithmetic mean of a slice of values. Returns NaN for empty
/// input so an empty quantile bucket stays visibly degenerate instead of
/// collapsing to zero.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
