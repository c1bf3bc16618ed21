//! Token-indexed access to nuScenes-layout dataset metadata.
//!
//! Covers the lookups needed to go from a scene to its first lidar keyframe,
//! the ego pose at capture time, and the annotated boxes of that sample.

#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod tables;

pub use error::{DatasetError, Result};
pub use index::{NuScenes, Table};
pub use tables::Tables;

/// Sensor channel of the roof lidar.
pub const LIDAR_TOP: &str = "LIDAR_TOP";
