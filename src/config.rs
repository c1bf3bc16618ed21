use boxcrop_extract::ExtractOptions;
use boxcrop_io::PlyEncoding;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Highest scene index accepted on the command line.
pub const MAX_SCENE_INDEX: i64 = 9;

#[derive(Debug, Parser)]
#[command(
    name = "boxcrop",
    version,
    about = "Extracts clouds of points inside of the car boxes of a nuScenes scene"
)]
pub struct Args {
    /// Scene to load, between 0 and 9
    #[arg(
        long = "scene_number",
        visible_alias = "scene-number",
        allow_negative_numbers = true
    )]
    pub scene_number: Option<i64>,

    /// Dataset root holding the version directory and the sample files
    #[arg(long, default_value = "NuScenes")]
    pub dataroot: PathBuf,

    /// Dataset version directory under the root
    #[arg(long, default_value = "v1.0-mini")]
    pub dataset_version: String,

    /// Where car_<index>.ply files are written
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log file, appended to on every run
    #[arg(long, default_value = "logs/main_log.txt")]
    pub log_file: PathBuf,

    /// Write ASCII PLY instead of binary
    #[arg(long)]
    pub ascii: bool,

    /// Reproduce the legacy geometry: |p - t| normalization and the
    /// half-width bound on the +y face of every box
    #[arg(long)]
    pub legacy_parity: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no scene number was entered, expected --scene_number between 0 and {max}")]
    MissingScene { max: i64 },

    #[error("the wrong scene number was entered: {value}, expected 0 to {max}")]
    SceneOutOfRange { value: i64, max: i64 },
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub scene_number: usize,
    pub dataroot: PathBuf,
    pub dataset_version: String,
    pub output_dir: PathBuf,
    pub encoding: PlyEncoding,
    pub options: ExtractOptions,
}

pub fn validate_scene(scene_number: Option<i64>) -> Result<usize, ConfigError> {
    let value = scene_number.ok_or(ConfigError::MissingScene {
        max: MAX_SCENE_INDEX,
    })?;
    if !(0..=MAX_SCENE_INDEX).contains(&value) {
        return Err(ConfigError::SceneOutOfRange {
            value,
            max: MAX_SCENE_INDEX,
        });
    }
    Ok(value as usize)
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        Ok(Self {
            scene_number: validate_scene(args.scene_number)?,
            dataroot: args.dataroot.clone(),
            dataset_version: args.dataset_version.clone(),
            output_dir: args.output_dir.clone(),
            encoding: if args.ascii {
                PlyEncoding::Ascii
            } else {
                PlyEncoding::BinaryLittleEndian
            },
            options: if args.legacy_parity {
                ExtractOptions::legacy()
            } else {
                ExtractOptions::default()
            },
        })
    }
}
