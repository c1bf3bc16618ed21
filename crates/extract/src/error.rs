use boxcrop_dataset::DatasetError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("failed to read point buffer {path}")]
    PointBuffer {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write artifact {name}")]
    Persist {
        name: String,
        #[source]
        source: io::Error,
    },
}
