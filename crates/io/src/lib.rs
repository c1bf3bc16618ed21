#![forbid(unsafe_code)]

pub mod lidar_bin;
pub mod ply;

pub use lidar_bin::{decode_lidar_bin, read_lidar_bin, NUSCENES_LIDAR_FIELDS};
pub use ply::{read_ply, write_ply, write_ply_as, write_ply_binary, PlyEncoding};
