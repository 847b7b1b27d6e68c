/// Min-max scale into `[0, 1]`.
///
/// Every value maps to 0 when the batch has no spread (`max == min`) or is a
/// single value. Results are clamped so rounding never leaves the unit range.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(values) else {
        return Vec::new();
    };
    let span = max - min;
    if span <= 0.0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|value| ((value - min) / span).clamp(0.0, 1.0))
        .collect()
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    })
}
