#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};

pub fn fm() -> Command {
    cargo_bin_cmd!("floormap")
}

/// Create a unique data directory inside the system temp dir and remove any
/// leftover from a previous run.
pub fn setup_data_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = std::env::temp_dir();
    path.push(format!("{}_floormap_data", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(path.join("events")).unwrap();
    fs::create_dir_all(path.join("assets")).unwrap();
    fs::create_dir_all(path.join("profile_pictures")).unwrap();
    path
}

pub fn setup_output_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = std::env::temp_dir();
    path.push(format!("{}_floormap_out", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).unwrap();
    path
}

pub fn write_json(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

/// Two employees: one in ACT, one in IDEAL; Anna has an extra middle name
/// relative to the placement feed.
pub fn seed_basic_inputs(data_dir: &Path) {
    write_json(
        &data_dir.join("employees.json"),
        r#"[
            {"person_id": "p1", "name": "Anna Maria Svensson", "units": ["ACT"]},
            {"person_id": "p2", "name": "Erik Lund", "units": ["IDEAL"]}
        ]"#,
    );
    write_json(
        &data_dir.join("positions.json"),
        r#"[
            {"name": "Anna Svensson", "place": "61302", "latitude": 5.0, "longitude": 5.0},
            {"name": "", "place": "66109", "latitude": 2.0, "longitude": 8.0}
        ]"#,
    );
}

/// Tiny floor plan so `generate` has a canvas source.
pub fn write_floor_plan(data_dir: &Path) {
    let img = image::RgbaImage::from_pixel(160, 160, image::Rgba([235, 235, 235, 255]));
    img.save(data_dir.join("assets/floor_plan.png")).unwrap();
}

pub fn write_event(data_dir: &Path, name: &str, config: &str) {
    let dir = data_dir.join("events").join(name);
    fs::create_dir_all(&dir).unwrap();
    write_json(&dir.join("config.json"), config);
}
