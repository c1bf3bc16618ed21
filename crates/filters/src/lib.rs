#![forbid(unsafe_code)]

pub mod crop_box;

pub use crop_box::crop_box_indices;
