//! nuScenes-layout dataset fixture shared by the integration tests:
//! metadata tables plus one raw lidar sweep per scene.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::Path;

pub const VERSION: &str = "v1.0-mini";

pub struct SceneFixture {
    pub translation: [f64; 3],
    pub points: Vec<[f32; 3]>,
    pub boxes: Vec<(&'static str, [f64; 3], [f64; 3])>,
}

fn write_table(dir: &Path, name: &str, rows: Vec<Value>) {
    fs::write(dir.join(format!("{name}.json")), Value::Array(rows).to_string()).unwrap();
}

fn encode_sweep(points: &[[f32; 3]]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(points.len() * 20);
    for p in points {
        for v in [p[0], p[1], p[2], 12.0, 3.0] {
            raw.extend_from_slice(&v.to_le_bytes());
        }
    }
    raw
}

pub fn write_dataset(root: &Path, scenes: &[SceneFixture]) {
    let dir = root.join(VERSION);
    fs::create_dir_all(&dir).unwrap();
    fs::create_dir_all(root.join("samples/LIDAR_TOP")).unwrap();

    let mut scene = Vec::new();
    let mut sample = Vec::new();
    let mut sample_data = Vec::new();
    let mut ego_pose = Vec::new();
    let mut annotation = Vec::new();
    let mut instance = Vec::new();
    let mut labels: Vec<&str> = Vec::new();

    for (i, fixture) in scenes.iter().enumerate() {
        let filename = format!("samples/LIDAR_TOP/scene{i}.pcd.bin");
        fs::write(root.join(&filename), encode_sweep(&fixture.points)).unwrap();

        scene.push(json!({
            "token": format!("scene-{i}"),
            "name": format!("scene-{:04}", 61 + i),
            "first_sample_token": format!("sample-{i}"),
            "last_sample_token": format!("sample-{i}"),
            "nbr_samples": 1,
        }));
        sample.push(json!({
            "token": format!("sample-{i}"),
            "scene_token": format!("scene-{i}"),
            "timestamp": 1532402927647951u64 + i as u64,
        }));
        sample_data.push(json!({
            "token": format!("lidar-{i}"),
            "sample_token": format!("sample-{i}"),
            "ego_pose_token": format!("pose-{i}"),
            "calibrated_sensor_token": "calib-lidar",
            "filename": filename,
            "fileformat": "pcd",
            "is_key_frame": true,
        }));
        ego_pose.push(json!({
            "token": format!("pose-{i}"),
            "translation": fixture.translation,
            "rotation": [1.0, 0.0, 0.0, 0.0],
        }));

        for (j, (label, center, size)) in fixture.boxes.iter().enumerate() {
            if !labels.contains(label) {
                labels.push(*label);
            }
            instance.push(json!({
                "token": format!("inst-{i}-{j}"),
                "category_token": format!("cat-{label}"),
            }));
            annotation.push(json!({
                "token": format!("ann-{i}-{j}"),
                "sample_token": format!("sample-{i}"),
                "instance_token": format!("inst-{i}-{j}"),
                "translation": center,
                "size": size,
                "rotation": [1.0, 0.0, 0.0, 0.0],
            }));
        }
    }

    let category = labels
        .iter()
        .map(|l| json!({ "token": format!("cat-{l}"), "name": l }))
        .collect();

    write_table(&dir, "scene", scene);
    write_table(&dir, "sample", sample);
    write_table(&dir, "sample_data", sample_data);
    write_table(&dir, "ego_pose", ego_pose);
    write_table(
        &dir,
        "calibrated_sensor",
        vec![json!({ "token": "calib-lidar", "sensor_token": "sensor-lidar" })],
    );
    write_table(
        &dir,
        "sensor",
        vec![json!({ "token": "sensor-lidar", "channel": "LIDAR_TOP", "modality": "lidar" })],
    );
    write_table(&dir, "sample_annotation", annotation);
    write_table(&dir, "instance", instance);
    write_table(&dir, "category", category);
}

/// Three boxes, only index 1 is a car; 2 of the 5 points fall inside it
/// once the ego translation (100, 200, 0) is removed.
pub fn single_car_scene() -> SceneFixture {
    let t = [100.0f32, 200.0, 0.0];
    let rel = [
        [0.0, 0.0, 0.0],
        [10.0, 10.0, 1.0],
        [-3.0, 4.0, 0.0],
        [10.5, 9.0, 0.5],
        [50.0, 50.0, 50.0],
    ];
    SceneFixture {
        translation: [100.0, 200.0, 0.0],
        points: rel
            .iter()
            .map(|p| [p[0] + t[0], p[1] + t[1], p[2] + t[2]])
            .collect(),
        boxes: vec![
            ("human.pedestrian.adult", [0.0, 0.0, 0.0], [1.0, 1.0, 2.0]),
            ("vehicle.car", [10.0, 10.0, 0.5], [2.0, 4.0, 2.0]),
            ("vehicle.truck", [50.0, 50.0, 50.0], [3.0, 8.0, 3.0]),
        ],
    }
}

pub fn ply_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".ply"))
        .collect();
    names.sort();
    names
}
