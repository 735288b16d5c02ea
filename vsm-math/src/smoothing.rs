//! Artificial damping terms used to regularize the circulation update.

/// Jameson-style artificial damping term, combining a second-difference and a fourth-difference
/// smoothing operator along the spanwise index, each scaled by its own coefficient.
///
/// `values` is read-only; the damping contribution is written into `out` (same length), which the
/// caller adds to its own update with no further allocation.
pub fn jameson_damping(values: &[f64], k2: f64, k4: f64, out: &mut [f64]) {
    let n = values.len();
    assert_eq!(out.len(), n);

    for i in 0..n {
        let prev = values[i.saturating_sub(1)];
        let next = values[(i + 1).min(n - 1)];
        let second_diff = prev - 2.0 * values[i] + next;

        let prev2 = values[i.saturating_sub(2)];
        let next2 = values[(i + 2).min(n - 1)];
        let fourth_diff = prev2 - 4.0 * prev + 6.0 * values[i] - 4.0 * next + next2;

        out[i] = k2 * second_diff - k4 * fourth_diff;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_signal_has_zero_damping() {
        let values = vec![1.0; 8];
        let mut out = vec![0.0; 8];

        jameson_damping(&values, 0.5, 0.1, &mut out);

        for v in out {
            assert!(v.abs() < 1e-12);
        }
    }
}
