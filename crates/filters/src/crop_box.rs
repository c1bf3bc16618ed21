use boxcrop_core::Aabb;

/// Positions of the points inside `region`, ascending.
pub fn crop_box_indices<I>(points: I, region: &Aabb) -> Vec<usize>
where
    I: IntoIterator<Item = [f64; 3]>,
{
    let mut keep = Vec::new();
    for (i, p) in points.into_iter().enumerate() {
        if region.contains(&p) {
            keep.push(i);
        }
    }
    keep
}
