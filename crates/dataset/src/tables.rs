//! Records of the nuScenes metadata tables.
//!
//! Each table is a JSON array stored as `<dataroot>/<version>/<table>.json`.
//! Only the fields the extractor reads are modelled; everything else in the
//! files is ignored.

use serde::{Deserialize, Serialize};

/// A record addressable by its token.
pub trait Record {
    const TABLE: &'static str;

    fn token(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $table:literal) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;

            fn token(&self) -> &str {
                &self.token
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub token: String,
    #[serde(default)]
    pub name: String,
    pub first_sample_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub token: String,
    pub scene_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDataRecord {
    pub token: String,
    pub sample_token: String,
    pub ego_pose_token: String,
    pub calibrated_sensor_token: String,
    pub filename: String,
    pub is_key_frame: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgoPoseRecord {
    pub token: String,
    pub translation: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedSensorRecord {
    pub token: String,
    pub sensor_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub token: String,
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleAnnotationRecord {
    pub token: String,
    pub sample_token: String,
    pub instance_token: String,
    pub translation: [f64; 3],
    /// Width, length, height.
    pub size: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub token: String,
    pub category_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub token: String,
    pub name: String,
}

impl_record!(SceneRecord, "scene");
impl_record!(SampleRecord, "sample");
impl_record!(SampleDataRecord, "sample_data");
impl_record!(EgoPoseRecord, "ego_pose");
impl_record!(CalibratedSensorRecord, "calibrated_sensor");
impl_record!(SensorRecord, "sensor");
impl_record!(SampleAnnotationRecord, "sample_annotation");
impl_record!(InstanceRecord, "instance");
impl_record!(CategoryRecord, "category");

/// The raw table contents, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    pub scene: Vec<SceneRecord>,
    pub sample: Vec<SampleRecord>,
    pub sample_data: Vec<SampleDataRecord>,
    pub ego_pose: Vec<EgoPoseRecord>,
    pub calibrated_sensor: Vec<CalibratedSensorRecord>,
    pub sensor: Vec<SensorRecord>,
    pub sample_annotation: Vec<SampleAnnotationRecord>,
    pub instance: Vec<InstanceRecord>,
    pub category: Vec<CategoryRecord>,
}
