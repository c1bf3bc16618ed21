use crate::error::{DatasetError, Result};
use crate::tables::*;
use boxcrop_core::LabeledBox;
use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Records of one table plus a token → position map.
#[derive(Debug, Clone)]
pub struct Table<T> {
    records: Vec<T>,
    by_token: HashMap<String, usize>,
}

impl<T: Record> Table<T> {
    pub fn new(records: Vec<T>) -> Self {
        let by_token = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.token().to_string(), i))
            .collect();
        Self { records, by_token }
    }

    pub fn get(&self, token: &str) -> Result<&T> {
        self.by_token
            .get(token)
            .map(|&i| &self.records[i])
            .ok_or_else(|| DatasetError::UnknownToken {
                table: T::TABLE,
                token: token.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter()
    }
}

/// Token-indexed view over a nuScenes-layout dataset.
#[derive(Debug, Clone)]
pub struct NuScenes {
    dataroot: PathBuf,
    scene: Table<SceneRecord>,
    sample: Table<SampleRecord>,
    sample_data: Table<SampleDataRecord>,
    ego_pose: Table<EgoPoseRecord>,
    calibrated_sensor: Table<CalibratedSensorRecord>,
    sensor: Table<SensorRecord>,
    sample_annotation: Table<SampleAnnotationRecord>,
    instance: Table<InstanceRecord>,
    category: Table<CategoryRecord>,
    // sample token -> channel -> keyframe sample_data position
    keyframes: HashMap<String, HashMap<String, usize>>,
    annotations_by_sample: HashMap<String, Vec<usize>>,
}

fn read_table<T: Record + DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let path = dir.join(format!("{}.json", T::TABLE));
    let file = File::open(&path).map_err(|source| DatasetError::Io {
        path: path.clone(),
        source,
    })?;
    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| DatasetError::Parse {
            path: path.clone(),
            source,
        })?;
    log::debug!("{}: {} records", T::TABLE, records.len());
    Ok(records)
}

impl NuScenes {
    /// Load all tables from `<dataroot>/<version>/`.
    pub fn load(dataroot: impl AsRef<Path>, version: &str) -> Result<Self> {
        let dataroot = dataroot.as_ref();
        let dir = dataroot.join(version);
        log::info!("Loading {} tables from {}", version, dir.display());

        let tables = Tables {
            scene: read_table(&dir)?,
            sample: read_table(&dir)?,
            sample_data: read_table(&dir)?,
            ego_pose: read_table(&dir)?,
            calibrated_sensor: read_table(&dir)?,
            sensor: read_table(&dir)?,
            sample_annotation: read_table(&dir)?,
            instance: read_table(&dir)?,
            category: read_table(&dir)?,
        };
        Self::from_tables(dataroot, tables)
    }

    /// Build the index from already-parsed tables. Sample data files are
    /// resolved relative to `dataroot`.
    pub fn from_tables(dataroot: impl Into<PathBuf>, tables: Tables) -> Result<Self> {
        let mut index = Self {
            dataroot: dataroot.into(),
            scene: Table::new(tables.scene),
            sample: Table::new(tables.sample),
            sample_data: Table::new(tables.sample_data),
            ego_pose: Table::new(tables.ego_pose),
            calibrated_sensor: Table::new(tables.calibrated_sensor),
            sensor: Table::new(tables.sensor),
            sample_annotation: Table::new(tables.sample_annotation),
            instance: Table::new(tables.instance),
            category: Table::new(tables.category),
            keyframes: HashMap::new(),
            annotations_by_sample: HashMap::new(),
        };

        let mut keyframes: HashMap<String, HashMap<String, usize>> = HashMap::new();
        for (i, sd) in index.sample_data.iter().enumerate() {
            if !sd.is_key_frame {
                continue;
            }
            let calib = index.calibrated_sensor.get(&sd.calibrated_sensor_token)?;
            let channel = &index.sensor.get(&calib.sensor_token)?.channel;
            keyframes
                .entry(sd.sample_token.clone())
                .or_default()
                .insert(channel.clone(), i);
        }

        let mut annotations_by_sample: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, ann) in index.sample_annotation.iter().enumerate() {
            annotations_by_sample
                .entry(ann.sample_token.clone())
                .or_default()
                .push(i);
        }

        index.keyframes = keyframes;
        index.annotations_by_sample = annotations_by_sample;

        log::info!(
            "Indexed {} scenes, {} samples, {} sample_data, {} annotations",
            index.scene.len(),
            index.sample.len(),
            index.sample_data.len(),
            index.sample_annotation.len()
        );
        Ok(index)
    }

    pub fn scene_count(&self) -> usize {
        self.scene.len()
    }

    /// The `n`-th scene in table order.
    pub fn scene_at(&self, n: usize) -> Result<&SceneRecord> {
        self.scene
            .records
            .get(n)
            .ok_or(DatasetError::SceneIndexOutOfRange {
                index: n,
                count: self.scene.len(),
            })
    }

    pub fn scene(&self, token: &str) -> Result<&SceneRecord> {
        self.scene.get(token)
    }

    pub fn sample(&self, token: &str) -> Result<&SampleRecord> {
        self.sample.get(token)
    }

    pub fn sample_data(&self, token: &str) -> Result<&SampleDataRecord> {
        self.sample_data.get(token)
    }

    pub fn ego_pose(&self, token: &str) -> Result<&EgoPoseRecord> {
        self.ego_pose.get(token)
    }

    pub fn annotation(&self, token: &str) -> Result<&SampleAnnotationRecord> {
        self.sample_annotation.get(token)
    }

    pub fn category_name(&self, instance_token: &str) -> Result<&str> {
        let instance = self.instance.get(instance_token)?;
        Ok(&self.category.get(&instance.category_token)?.name)
    }

    /// Keyframe captured by `channel` (e.g. `LIDAR_TOP`) for a sample.
    pub fn sample_channel(&self, sample_token: &str, channel: &str) -> Result<&SampleDataRecord> {
        self.sample(sample_token)?;
        self.keyframes
            .get(sample_token)
            .and_then(|channels| channels.get(channel))
            .map(|&i| &self.sample_data.records[i])
            .ok_or_else(|| DatasetError::MissingChannel {
                sample: sample_token.to_string(),
                channel: channel.to_string(),
            })
    }

    pub fn data_path(&self, sample_data: &SampleDataRecord) -> PathBuf {
        self.dataroot.join(&sample_data.filename)
    }

    /// Annotated boxes of the sample a keyframe belongs to, in table order.
    pub fn get_boxes(&self, sample_data_token: &str) -> Result<Vec<LabeledBox>> {
        let sd = self.sample_data(sample_data_token)?;
        if !sd.is_key_frame {
            return Err(DatasetError::NotKeyFrame(sd.token.clone()));
        }

        let Some(positions) = self.annotations_by_sample.get(&sd.sample_token) else {
            return Ok(Vec::new());
        };

        positions
            .iter()
            .map(|&i| {
                let ann = &self.sample_annotation.records[i];
                let label = self.category_name(&ann.instance_token)?;
                Ok(LabeledBox::new(label, ann.translation, ann.size))
            })
            .collect()
    }
}
