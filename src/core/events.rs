//! Seasonal event discovery and date-based selection.
//!
//! Events live one per folder under `<data>/events/`, each with a
//! `config.json`. A folder with a missing or malformed config is reported
//! and skipped; the other events are unaffected.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::models::event::EventConfig;
use crate::models::overrides::DisplayOverrideEntry;
use crate::ui::messages::warning;
use crate::utils::date::{date_key, month_day};

#[derive(Debug, Clone)]
pub struct DiscoveredEvent {
    /// Folder name, also the event's identifier.
    pub name: String,
    pub dir: PathBuf,
    pub config: EventConfig,
}

/// Enumerate event folders, sorted by name so selection order is fixed.
pub fn discover_events(events_dir: &Path) -> Vec<DiscoveredEvent> {
    let mut events = Vec::new();

    let Ok(entries) = fs::read_dir(events_dir) else {
        return events;
    };

    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let config_path = dir.join("config.json");

        let config = match load_event_config(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warning(format!("Skipping event '{}': {}", name, e));
                continue;
            }
        };

        events.push(DiscoveredEvent { name, dir, config });
    }

    events.sort_by(|a, b| a.name.cmp(&b.name));
    events
}

fn load_event_config(path: &Path) -> Result<EventConfig, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("no config.json ({e})"))?;
    let mut value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| format!("invalid config.json ({e})"))?;

    // Underscore keys are comments, dropped before validation.
    if let Some(map) = value.as_object_mut() {
        map.retain(|k, _| !k.starts_with('_'));
    }

    serde_json::from_value(value).map_err(|e| format!("invalid config.json ({e})"))
}

/// The active event for `today`, if any. With overlapping active events the
/// lexicographically first folder name wins; rename folders to reprioritize.
pub fn select_event(today: NaiveDate, events: &[DiscoveredEvent]) -> Option<&DiscoveredEvent> {
    let (month, day) = month_day(today);
    events.iter().find(|e| e.config.contains(month, day))
}

/// Exact-date display override lookup. When present, normal map generation
/// is skipped entirely for the run.
pub fn select_display_override(
    today: NaiveDate,
    overrides: &BTreeMap<String, DisplayOverrideEntry>,
) -> Option<&DisplayOverrideEntry> {
    overrides.get(&date_key(today))
}
