use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown token '{token}' in table '{table}'")]
    UnknownToken { table: &'static str, token: String },

    #[error("scene index {index} out of range, dataset has {count} scenes")]
    SceneIndexOutOfRange { index: usize, count: usize },

    #[error("sample '{sample}' has no keyframe for channel '{channel}'")]
    MissingChannel { sample: String, channel: String },

    #[error("sample_data '{0}' is not a keyframe")]
    NotKeyFrame(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
