use super::Vec3;

impl Vec3 {
    #[inline]
    /// Cross product of two vectors.
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    /// Dot product of two vectors.
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    /// Returns a normalized copy, or the zero vector if `self` has zero length.
    pub fn normalize(self) -> Self {
        let length = self.length();

        if length > 0.0 {
            self / length
        } else {
            Self::default()
        }
    }

    #[inline]
    pub fn distance(self, rhs: Self) -> f64 {
        (self - rhs).length()
    }

    #[inline]
    /// Vector projection of `self` onto `rhs`, as described in
    /// <https://en.wikipedia.org/wiki/Vector_projection>.
    pub fn project(self, rhs: Self) -> Self {
        let rhs_normalized = rhs.normalize();

        rhs_normalized * self.dot(rhs_normalized)
    }

    #[inline]
    /// Projects the vector onto the plane with the given normal.
    pub fn project_on_plane(self, plane_normal: Self) -> Self {
        self - self.project(plane_normal)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}
