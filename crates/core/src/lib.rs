#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod labeled_box;

pub use bbox::Aabb;
pub use cloud::PointCloud;
pub use labeled_box::{ContainmentRule, LabeledBox};
