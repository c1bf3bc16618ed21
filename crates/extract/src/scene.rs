use crate::error::ExtractError;
use crate::frame::Frame;
use boxcrop_core::{LabeledBox, PointCloud};
use boxcrop_dataset::{NuScenes, LIDAR_TOP};
use boxcrop_io::{read_lidar_bin, NUSCENES_LIDAR_FIELDS};

/// How raw sensor coordinates are made relative to the ego position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// `p - t` per axis.
    #[default]
    Relative,
    /// `|p - t|` per axis, matching the legacy extractor's output. Loses the
    /// sign of every offset.
    Folded,
}

impl Normalization {
    pub fn apply(self, point: [f32; 3], translation: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for axis in 0..3 {
            let d = point[axis] as f64 - translation[axis];
            out[axis] = match self {
                Normalization::Relative => d,
                Normalization::Folded => d.abs(),
            };
        }
        out
    }
}

/// Everything the extractor needs from one scene.
#[derive(Debug, Clone)]
pub struct Scene {
    pub scene_token: String,
    pub lidar_token: String,
    pub translation: [f64; 3],
    pub normalization: Normalization,
    /// Sweep as stored on disk, in sensor-file precision.
    pub raw: PointCloud,
    /// All annotated boxes of the lidar keyframe, unfiltered.
    pub boxes: Vec<LabeledBox>,
}

impl Scene {
    pub fn frame(&self) -> Frame<'_> {
        Frame::new(&self.raw, self.translation, self.normalization)
    }

    /// Normalized sweep, narrowed to f32.
    pub fn points(&self) -> PointCloud {
        self.frame().to_cloud()
    }
}

/// Resolve scene `scene_number` down to its first `LIDAR_TOP` keyframe and
/// load the normalized sweep with its boxes.
pub fn load_scene(
    nusc: &NuScenes,
    scene_number: usize,
    normalization: Normalization,
) -> Result<Scene, ExtractError> {
    log::info!("Preparing to load the scene with ID: {}", scene_number);

    let scene = nusc.scene_at(scene_number)?;
    log::info!(
        "Loading scene data with scene token: {} ({})",
        scene.token,
        scene.name
    );
    let sample = nusc.sample(&scene.first_sample_token)?;

    let lidar = nusc.sample_channel(&sample.token, LIDAR_TOP)?;
    log::info!("Loading lidar data with lidar token: {}", lidar.token);

    let translation = nusc.ego_pose(&lidar.ego_pose_token)?.translation;
    log::info!("Loaded translation data: {:?}", translation);

    let path = nusc.data_path(lidar);
    log::info!("Loading lidar data from file: {}", path.display());
    let raw = read_lidar_bin(&path, NUSCENES_LIDAR_FIELDS)
        .map_err(|source| ExtractError::PointBuffer {
            path: path.clone(),
            source,
        })?;
    log::info!("Loaded points array with total number of points: {}", raw.len());

    let boxes = nusc.get_boxes(&lidar.token)?;
    log::info!("Loaded {} boxes", boxes.len());

    Ok(Scene {
        scene_token: scene.token.clone(),
        lidar_token: lidar.token.clone(),
        translation,
        normalization,
        raw,
        boxes,
    })
}
