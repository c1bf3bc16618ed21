use crate::error::ExtractError;
use crate::extractor::{extract_boxes, ExtractionReport, CAR_LABEL};
use crate::scene::{load_scene, Normalization};
use crate::sink::ArtifactSink;
use boxcrop_core::ContainmentRule;
use boxcrop_dataset::NuScenes;

/// Geometry choices for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub normalization: Normalization,
    pub rule: ContainmentRule,
}

impl ExtractOptions {
    /// Folded normalization and the width-bounded +y face, reproducing the
    /// legacy extractor's artifacts.
    pub fn legacy() -> Self {
        Self {
            normalization: Normalization::Folded,
            rule: ContainmentRule::LegacyWidthBound,
        }
    }
}

/// Load scene `scene_number` and extract its car boxes into `sink`.
pub fn extract_scene<S: ArtifactSink + ?Sized>(
    nusc: &NuScenes,
    scene_number: usize,
    options: ExtractOptions,
    sink: &mut S,
) -> Result<ExtractionReport, ExtractError> {
    let scene = load_scene(nusc, scene_number, options.normalization)?;
    let report = extract_boxes(&scene.boxes, scene.frame(), CAR_LABEL, options.rule, sink)?;

    log::info!(
        "Finished extracting clouds of points from scene {}. Total number of files: {}. List of files: {:?}",
        scene_number,
        report.file_count(),
        report.artifacts()
    );
    Ok(report)
}
