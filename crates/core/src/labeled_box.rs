use crate::Aabb;

/// How a box's extents map onto per-axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainmentRule {
    /// Half-width on x, half-length on y, half-height on z, both sides.
    #[default]
    Symmetric,
    /// Same as `Symmetric` except the +y face sits at half-*width* from the
    /// center. Kept for comparison against outputs of the legacy extractor.
    LegacyWidthBound,
}

/// Axis-aligned labeled region. `wlh` is (width, length, height), mapped
/// onto (x, y, z).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledBox {
    pub label: String,
    pub center: [f64; 3],
    pub wlh: [f64; 3],
}

impl LabeledBox {
    pub fn new(label: impl Into<String>, center: [f64; 3], wlh: [f64; 3]) -> Self {
        Self {
            label: label.into(),
            center,
            wlh,
        }
    }

    pub fn half_extents(&self) -> [f64; 3] {
        [self.wlh[0] / 2.0, self.wlh[1] / 2.0, self.wlh[2] / 2.0]
    }

    pub fn region(&self, rule: ContainmentRule) -> Aabb {
        let [hw, hl, hh] = self.half_extents();
        let [cx, cy, cz] = self.center;
        let y_upper = match rule {
            ContainmentRule::Symmetric => cy + hl,
            ContainmentRule::LegacyWidthBound => cy + hw,
        };
        Aabb::from_bounds([cx - hw, cy - hl, cz - hh], [cx + hw, y_upper, cz + hh])
    }

    pub fn contains(&self, point: &[f64; 3], rule: ContainmentRule) -> bool {
        self.region(rule).contains(point)
    }
}
