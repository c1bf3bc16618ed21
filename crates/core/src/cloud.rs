/// Structure-of-arrays xyz point cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self { x, y, z }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        let mut cloud = Self::with_capacity(points.len());
        for p in points {
            cloud.push(*p);
        }
        cloud
    }

    pub fn push(&mut self, point: [f32; 3]) {
        self.x.push(point[0]);
        self.y.push(point[1]);
        self.z.push(point[2]);
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::PointCloud;
    use proptest::prelude::*;

    #[test]
    fn new_is_empty() {
        let cloud = PointCloud::new();
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
    }

    #[test]
    fn from_xyz_builds_cloud() {
        let cloud = PointCloud::from_xyz(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.point(0), [1.0, 3.0, 5.0]);
        assert_eq!(cloud.point(1), [2.0, 4.0, 6.0]);
    }

    #[test]
    fn from_points_keeps_order() {
        let cloud = PointCloud::from_points(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(cloud.x, vec![1.0, 4.0]);
        assert_eq!(cloud.y, vec![2.0, 5.0]);
        assert_eq!(cloud.z, vec![3.0, 6.0]);
    }

    #[test]
    #[should_panic]
    fn from_xyz_panics_on_mismatch() {
        let _ = PointCloud::from_xyz(vec![1.0], vec![2.0, 3.0], vec![4.0]);
    }

    proptest! {
        #[test]
        fn iter_points_matches_indexed_access(
            data in prop::collection::vec((-10.0f32..10.0f32, -10.0f32..10.0f32, -10.0f32..10.0f32), 0..200),
        ) {
            let points: Vec<[f32; 3]> = data.iter().map(|p| [p.0, p.1, p.2]).collect();
            let cloud = PointCloud::from_points(&points);
            prop_assert_eq!(cloud.len(), points.len());
            for (i, p) in cloud.iter_points().enumerate() {
                prop_assert_eq!(p, cloud.point(i));
                prop_assert_eq!(p, points[i]);
            }
        }
    }
}
