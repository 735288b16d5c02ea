use super::Matrix;

impl Matrix<f64> {
    /// Solves `A x = rhs` by Gaussian elimination with partial pivoting.
    ///
    /// Used for the dense Jacobian solve in the nonlinear circulation fallback, where matrices
    /// are small (one row/column per panel) and a dependency-free direct solver is preferable to
    /// pulling in a full linear algebra crate.
    ///
    /// Source: <https://en.wikipedia.org/wiki/Gaussian_elimination>
    pub fn solve_gaussian_elimination(&self, rhs: &[f64]) -> Option<Vec<f64>> {
        let n = self.nr_rows();

        if self.nr_cols() != n || rhs.len() != n {
            return None;
        }

        let mut aug = Matrix::new_default([n, n + 1]);

        for i in 0..n {
            for j in 0..n {
                aug[[i, j]] = self[[i, j]];
            }
            aug[[i, n]] = rhs[i];
        }

        for k in 0..n {
            let mut max_row = k;
            for i in (k + 1)..n {
                if aug[[i, k]].abs() > aug[[max_row, k]].abs() {
                    max_row = i;
                }
            }

            if max_row != k {
                for j in 0..=n {
                    let tmp = aug[[k, j]];
                    aug[[k, j]] = aug[[max_row, j]];
                    aug[[max_row, j]] = tmp;
                }
            }

            if aug[[k, k]].abs() < 1e-13 {
                return None;
            }

            for i in (k + 1)..n {
                let factor = aug[[i, k]] / aug[[k, k]];
                for j in k..=n {
                    aug[[i, j]] -= factor * aug[[k, j]];
                }
            }
        }

        let mut x = vec![0.0; n];
        for i in (0..n).rev() {
            let mut sum = 0.0;
            for j in (i + 1)..n {
                sum += aug[[i, j]] * x[j];
            }

            x[i] = (aug[[i, n]] - sum) / aug[[i, i]];
        }

        Some(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_small_system() {
        let a = Matrix {
            data: vec![3.0, 2.0, 0.0, 2.0, 3.0, 1.0, -1.0, 1.0, 2.0],
            shape: [3, 3],
        };

        let b = vec![1.0, 2.0, 3.0];

        let x = a.solve_gaussian_elimination(&b).unwrap();
        let expected = [0.6, -0.4, 2.0];

        for i in 0..3 {
            assert!((x[i] - expected[i]).abs() < 1e-12, "mismatch at {}: {} != {}", i, x[i], expected[i]);
        }
    }

    #[test]
    fn singular_matrix_returns_none() {
        let a = Matrix {
            data: vec![1.0, 1.0, 1.0, 1.0],
            shape: [2, 2],
        };

        assert!(a.solve_gaussian_elimination(&[1.0, 1.0]).is_none());
    }
}
