use boxcrop_core::PointCloud;
use std::fs;
use std::io;
use std::path::Path;

/// Fields per record in a nuScenes `.pcd.bin` sweep: x, y, z, intensity, ring.
pub const NUSCENES_LIDAR_FIELDS: usize = 5;

/// Read a raw lidar sweep of little-endian `f32` records, keeping the
/// first three fields of each record as xyz.
pub fn read_lidar_bin(path: impl AsRef<Path>, fields_per_point: usize) -> io::Result<PointCloud> {
    let raw = fs::read(path)?;
    decode_lidar_bin(&raw, fields_per_point)
}

pub fn decode_lidar_bin(raw: &[u8], fields_per_point: usize) -> io::Result<PointCloud> {
    if fields_per_point < 3 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "lidar records need at least 3 fields, got {}",
                fields_per_point
            ),
        ));
    }

    let stride = fields_per_point * 4;
    if raw.len() % stride != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "lidar buffer of {} bytes is not a whole number of {}-byte records",
                raw.len(),
                stride
            ),
        ));
    }

    let mut cloud = PointCloud::with_capacity(raw.len() / stride);
    for record in raw.chunks_exact(stride) {
        let f = |i: usize| {
            let b = &record[i * 4..i * 4 + 4];
            f32::from_le_bytes([b[0], b[1], b[2], b[3]])
        };
        cloud.push([f(0), f(1), f(2)]);
    }

    Ok(cloud)
}
