//! Loading of the fully materialized pipeline inputs from the data
//! directory. The core never fetches anything itself; collaborators drop
//! `employees.json` and `positions.json` here before a run.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::core::events::{DiscoveredEvent, discover_events};
use crate::errors::{AppError, AppResult};
use crate::models::employee::RawEmployee;
use crate::models::overrides::{DisplayOverrideEntry, LocationOverride};
use crate::models::position::RawPosition;
use crate::ui::messages::warning;

pub const EMPLOYEES_FILE: &str = "employees.json";
pub const POSITIONS_FILE: &str = "positions.json";
pub const LOCATION_OVERRIDES_FILE: &str = "location_overrides.json";
pub const DISPLAY_OVERRIDES_FILE: &str = "display_overrides.json";
pub const EVENTS_DIR: &str = "events";
pub const PICTURES_DIR: &str = "profile_pictures";
pub const FLOOR_PLAN_FILE: &str = "assets/floor_plan.png";

#[derive(Debug)]
pub struct Inputs {
    pub data_dir: PathBuf,
    pub employees: Vec<RawEmployee>,
    pub positions: Vec<RawPosition>,
    pub location_overrides: HashMap<String, LocationOverride>,
    pub display_overrides: BTreeMap<String, DisplayOverrideEntry>,
    pub events: Vec<DiscoveredEvent>,
    /// person_id -> picture path relative to the data directory.
    pub pictures: HashMap<String, String>,
}

impl Inputs {
    pub fn floor_plan(&self) -> PathBuf {
        self.data_dir.join(FLOOR_PLAN_FILE)
    }
}

pub fn load(data_dir: &Path) -> AppResult<Inputs> {
    let employees: Vec<RawEmployee> = read_required(&data_dir.join(EMPLOYEES_FILE))?;
    let positions: Vec<RawPosition> = read_required(&data_dir.join(POSITIONS_FILE))?;

    let location_overrides =
        read_override_map::<LocationOverride>(&data_dir.join(LOCATION_OVERRIDES_FILE))?
            .into_iter()
            .collect();

    let display_overrides = load_display_overrides(data_dir)?;

    let events = discover_events(&data_dir.join(EVENTS_DIR));
    let pictures = scan_pictures(&data_dir.join(PICTURES_DIR));

    Ok(Inputs {
        data_dir: data_dir.to_path_buf(),
        employees,
        positions,
        location_overrides,
        display_overrides,
        events,
        pictures,
    })
}

/// The display-override map alone, for the `check` command which must not
/// require the full input set.
pub fn load_display_overrides(
    data_dir: &Path,
) -> AppResult<BTreeMap<String, DisplayOverrideEntry>> {
    Ok(
        read_override_map::<DisplayOverrideEntry>(&data_dir.join(DISPLAY_OVERRIDES_FILE))?
            .into_iter()
            .collect(),
    )
}

fn read_required<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    if !path.exists() {
        return Err(AppError::MissingInput(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read a JSON object file into (key, value) pairs. Top-level keys starting
/// with `_` are reserved for comments and ignored by every reader; entries
/// that fail to deserialize are skipped with a diagnostic, never fatal.
/// A missing file is an empty map.
fn read_override_map<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<(String, T)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;

    let mut out = Vec::new();
    for (key, value) in map {
        if key.starts_with('_') {
            continue;
        }
        match serde_json::from_value::<T>(value) {
            Ok(entry) => out.push((key, entry)),
            Err(e) => warning(format!(
                "Skipping malformed entry '{}' in {}: {}",
                key,
                path.display(),
                e
            )),
        }
    }
    Ok(out)
}

/// Map person_id -> picture path for every `<person_id>.jpg`/`.png` found.
fn scan_pictures(dir: &Path) -> HashMap<String, String> {
    let mut pictures = HashMap::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return pictures;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let (Some(stem), Some(ext)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.extension().and_then(|e| e.to_str()),
        ) else {
            continue;
        };
        if matches!(ext, "jpg" | "jpeg" | "png") {
            pictures.insert(
                stem.to_string(),
                format!("{}/{}", PICTURES_DIR, entry.file_name().to_string_lossy()),
            );
        }
    }
    pictures
}
