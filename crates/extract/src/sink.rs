use boxcrop_core::PointCloud;
use boxcrop_io::{write_ply_as, PlyEncoding};
use std::io;
use std::path::PathBuf;

/// Destination for extracted point subsets.
pub trait ArtifactSink {
    /// Store `cloud` under `name`, returning where it ended up.
    fn persist(&mut self, name: &str, cloud: &PointCloud) -> io::Result<PathBuf>;
}

/// Writes each artifact as a PLY file inside a directory.
#[derive(Debug, Clone)]
pub struct PlyDirSink {
    dir: PathBuf,
    encoding: PlyEncoding,
}

impl PlyDirSink {
    pub fn new(dir: impl Into<PathBuf>, encoding: PlyEncoding) -> Self {
        Self {
            dir: dir.into(),
            encoding,
        }
    }
}

impl ArtifactSink for PlyDirSink {
    fn persist(&mut self, name: &str, cloud: &PointCloud) -> io::Result<PathBuf> {
        let path = self.dir.join(name);
        write_ply_as(&path, cloud, self.encoding)?;
        Ok(path)
    }
}

/// Keeps artifacts in memory, in persist order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<(String, PointCloud)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PointCloud> {
        self.artifacts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }
}

impl ArtifactSink for MemorySink {
    fn persist(&mut self, name: &str, cloud: &PointCloud) -> io::Result<PathBuf> {
        self.artifacts.push((name.to_string(), cloud.clone()));
        Ok(PathBuf::from(name))
    }
}
