/// Closed axis-aligned region in double precision.
///
/// An inverted axis (`min > max`) yields a region that contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub fn from_bounds(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Inclusive on every face. Non-finite points are never contained.
    pub fn contains(&self, point: &[f64; 3]) -> bool {
        if !point.iter().all(|v| v.is_finite()) {
            return false;
        }

        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}
