//! Car point extraction for a single nuScenes scene.
//!
//! [`load_scene`] resolves a scene to its normalized lidar keyframe and
//! boxes; [`extract_boxes`] crops the cloud with every car box and hands the
//! non-empty subsets to an [`ArtifactSink`].

#![forbid(unsafe_code)]

pub mod error;
pub mod extractor;
pub mod frame;
pub mod pipeline;
pub mod scene;
pub mod sink;

pub use error::ExtractError;
pub use extractor::{
    artifact_name, extract_boxes, select_box_points, BoxOutcome, ExtractionReport, CAR_LABEL,
};
pub use frame::Frame;
pub use pipeline::{extract_scene, ExtractOptions};
pub use scene::{load_scene, Normalization, Scene};
pub use sink::{ArtifactSink, MemorySink, PlyDirSink};
