use crate::error::ExtractError;
use crate::frame::Frame;
use crate::sink::ArtifactSink;
use boxcrop_core::{ContainmentRule, LabeledBox, PointCloud};
use boxcrop_filters::crop_box_indices;
use std::path::PathBuf;

/// Category of the boxes that get extracted.
pub const CAR_LABEL: &str = "vehicle.car";

/// Artifact name for the box at position `index` of the unfiltered list.
pub fn artifact_name(index: usize) -> String {
    format!("car_{}.ply", index)
}

/// Points of `points` inside `b`, in cloud order.
///
/// Containment is decided on the f64 normalized coordinates; the selected
/// points are narrowed to f32 afterwards.
pub fn select_box_points<'a>(
    points: impl Into<Frame<'a>>,
    b: &LabeledBox,
    rule: ContainmentRule,
) -> PointCloud {
    let frame = points.into();
    frame.select(&crop_box_indices(frame.iter(), &b.region(rule)))
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoxOutcome {
    Written {
        index: usize,
        artifact: String,
        path: PathBuf,
        points: usize,
    },
    Empty {
        index: usize,
    },
}

impl BoxOutcome {
    pub fn index(&self) -> usize {
        match self {
            BoxOutcome::Written { index, .. } | BoxOutcome::Empty { index } => *index,
        }
    }
}

/// Per-box outcomes of one extraction pass, for target boxes only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    pub outcomes: Vec<BoxOutcome>,
}

impl ExtractionReport {
    pub fn artifacts(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                BoxOutcome::Written { artifact, .. } => Some(artifact.as_str()),
                BoxOutcome::Empty { .. } => None,
            })
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.artifacts().len()
    }

    pub fn empty_count(&self) -> usize {
        self.outcomes.len() - self.file_count()
    }
}

/// Crop `points` with every box labeled `target_label` and hand each
/// non-empty subset to `sink` as `car_<index>.ply`.
///
/// Boxes with other labels are skipped without affecting the index used in
/// artifact names. Stops at the first sink failure; artifacts persisted
/// before it are left in place.
pub fn extract_boxes<'a, S: ArtifactSink + ?Sized>(
    boxes: &[LabeledBox],
    points: impl Into<Frame<'a>>,
    target_label: &str,
    rule: ContainmentRule,
    sink: &mut S,
) -> Result<ExtractionReport, ExtractError> {
    let frame = points.into();
    let mut report = ExtractionReport::default();

    for (index, b) in boxes.iter().enumerate() {
        if b.label != target_label {
            continue;
        }
        log::info!("Found target box type: {} at index {}", target_label, index);
        log::info!("Coordinates of the center of the box: {:?}", b.center);
        log::info!("Dimensions of the box (W, L, H): {:?}", b.wlh);

        let selected = select_box_points(frame, b, rule);
        if selected.is_empty() {
            log::warn!("Box {} contains no points", index);
            report.outcomes.push(BoxOutcome::Empty { index });
            continue;
        }

        let artifact = artifact_name(index);
        let path = sink
            .persist(&artifact, &selected)
            .map_err(|source| ExtractError::Persist {
                name: artifact.clone(),
                source,
            })?;
        log::info!("Wrote {} with {} points", path.display(), selected.len());

        report.outcomes.push(BoxOutcome::Written {
            index,
            artifact,
            path,
            points: selected.len(),
        });
    }

    Ok(report)
}
