//! Small reduction helpers used throughout the solver and result integration.

/// Largest absolute value in `values`, i.e. the infinity norm. Returns `0.0` for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Arithmetic mean of `values`. Returns `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_abs_picks_largest_magnitude() {
        assert_eq!(max_abs(&[-3.0, 1.0, 2.0]), 3.0);
    }

    #[test]
    fn mean_of_empty_slice_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }
}
