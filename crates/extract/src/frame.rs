use crate::scene::Normalization;
use boxcrop_core::PointCloud;

/// Sweep points as seen from the ego pose.
///
/// Normalization is evaluated in f64 on every access; coordinates are only
/// narrowed back to f32 by [`Frame::select`] and [`Frame::to_cloud`].
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    points: &'a PointCloud,
    translation: [f64; 3],
    normalization: Normalization,
}

impl<'a> Frame<'a> {
    pub fn new(points: &'a PointCloud, translation: [f64; 3], normalization: Normalization) -> Self {
        Self {
            points,
            translation,
            normalization,
        }
    }

    pub fn point(&self, i: usize) -> [f64; 3] {
        self.normalization.apply(self.points.point(i), self.translation)
    }

    pub fn iter(&self) -> impl Iterator<Item = [f64; 3]> + 'a {
        let points = self.points;
        let (translation, mode) = (self.translation, self.normalization);
        points.iter_points().map(move |p| mode.apply(p, translation))
    }

    /// Normalized points at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> PointCloud {
        let mut out = PointCloud::with_capacity(indices.len());
        for &i in indices {
            out.push(narrow(self.point(i)));
        }
        out
    }

    pub fn to_cloud(&self) -> PointCloud {
        let mut out = PointCloud::with_capacity(self.points.len());
        for p in self.iter() {
            out.push(narrow(p));
        }
        out
    }
}

/// A cloud that is already relative to the ego.
impl<'a> From<&'a PointCloud> for Frame<'a> {
    fn from(points: &'a PointCloud) -> Self {
        Frame::new(points, [0.0; 3], Normalization::Relative)
    }
}

fn narrow(p: [f64; 3]) -> [f32; 3] {
    [p[0] as f32, p[1] as f32, p[2] as f32]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_cloud_passes_through_unchanged() {
        let cloud = PointCloud::from_points(&[[1.5, -2.25, 0.1], [1e-7, 3e7, -0.0]]);
        assert_eq!(Frame::from(&cloud).to_cloud(), cloud);
    }

    #[test]
    fn points_are_normalized_in_double_precision() {
        let cloud = PointCloud::from_points(&[[-6.21, 0.0, 0.0]]);
        let frame = Frame::new(&cloud, [632.537, 0.0, 0.0], Normalization::Folded);
        assert_eq!(frame.point(0)[0], (-6.21f32 as f64 - 632.537).abs());
    }

    #[test]
    fn select_keeps_requested_order() {
        let cloud = PointCloud::from_points(&[[1.0, 1.0, 1.0], [5.0, 6.0, 7.0], [2.0, 2.0, 2.0]]);
        let frame = Frame::new(&cloud, [1.0, 1.0, 1.0], Normalization::Relative);
        let out = frame.select(&[2, 0]);
        assert_eq!(out.point(0), [1.0, 1.0, 1.0]);
        assert_eq!(out.point(1), [0.0, 0.0, 0.0]);
        assert!(Frame::from(&PointCloud::new()).to_cloud().is_empty());
    }
}
