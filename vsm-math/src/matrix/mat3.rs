use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
/// A fixed 3x3 matrix, used to represent and validate panel-local orthonormal frames.
pub struct Mat3 {
    pub rows: [Vec3; 3],
}

impl Mat3 {
    /// Builds a matrix whose rows are the three given vectors, e.g. the panel-local
    /// chordwise/spanwise/normal axes.
    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self { rows: [r0, r1, r2] }
    }

    pub fn multiply_vec(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }

    pub fn transpose(&self) -> Self {
        let r0 = Vec3::new(self.rows[0].x, self.rows[1].x, self.rows[2].x);
        let r1 = Vec3::new(self.rows[0].y, self.rows[1].y, self.rows[2].y);
        let r2 = Vec3::new(self.rows[0].z, self.rows[1].z, self.rows[2].z);

        Self::from_rows(r0, r1, r2)
    }

    /// Largest absolute deviation of `self * self^T` from the identity matrix, used to check
    /// that a panel-local frame is (within tolerance) orthonormal.
    pub fn orthonormality_error(&self) -> f64 {
        let transposed = self.transpose();
        let mut max_error = 0.0_f64;

        for i in 0..3 {
            let row_i = self.rows[i];

            for j in 0..3 {
                let col_j = Vec3::new(transposed.rows[0][j], transposed.rows[1][j], transposed.rows[2][j]);
                let expected = if i == j { 1.0 } else { 0.0 };
                let error = (row_i.dot(col_j) - expected).abs();

                max_error = max_error.max(error);
            }
        }

        max_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_like_frame_has_zero_orthonormality_error() {
        let frame = Mat3::from_rows(Vec3::unit_x(), Vec3::unit_y(), Vec3::unit_z());

        assert!(frame.orthonormality_error() < 1e-12);
    }
}
