//! Merge of matched placements with user-submitted corrections.
//!
//! Precedence per field, highest first:
//! 1. `LocationOverride.room` / `LocationOverride.unit` (independent),
//! 2. the matched placement's place label and coordinates,
//! 3. the employee feed's own units (unit only; there is no raw fallback
//!    position).
//!
//! An override room that is not a known place label stays positionless:
//! the resolver never fabricates a coordinate for a freeform room string.

use std::collections::HashMap;

use crate::core::coords;
use crate::models::employee::RawEmployee;
use crate::models::overrides::LocationOverride;
use crate::models::position::RawPosition;
use crate::models::resolved::{ResolveStats, ResolvedDirectory, ResolvedEmployee};

/// Lookup from a trimmed place label to its raw (latitude, longitude).
/// The first placement carrying a label wins, keeping the lookup stable
/// under input reordering of duplicates.
pub fn place_lookup(positions: &[RawPosition]) -> HashMap<String, (f64, f64)> {
    let mut lookup = HashMap::new();
    for pos in positions {
        let place = pos.place.trim();
        if place.is_empty() {
            continue;
        }
        lookup
            .entry(place.to_string())
            .or_insert((pos.latitude, pos.longitude));
    }
    lookup
}

/// Produce the resolved directory: exactly one record per employee, in the
/// employee feed's order. Pure; positionless records are a valid terminal
/// state, not an error.
pub fn resolve(
    employees: &[RawEmployee],
    positions: &[RawPosition],
    matches: &HashMap<String, &RawPosition>,
    overrides: &HashMap<String, LocationOverride>,
    pictures: &HashMap<String, String>,
) -> ResolvedDirectory {
    let lookup = place_lookup(positions);
    let mut resolved = Vec::with_capacity(employees.len());
    let mut stats = ResolveStats::default();

    for emp in employees {
        let matched = matches.get(emp.person_id.as_str());
        let override_entry = overrides.get(emp.person_id.as_str());

        let override_room = override_entry.and_then(|o| o.room.clone());
        let override_unit = override_entry.and_then(|o| o.unit.clone());

        let room = override_room
            .clone()
            .or_else(|| matched.map(|p| p.place.trim().to_string()));

        // An override room replaces the coordinate source entirely: either
        // it is a known place label or the record is positionless.
        let raw_coords = match &override_room {
            Some(room) => lookup.get(room.trim()).copied(),
            None => matched.map(|p| (p.latitude, p.longitude)),
        };
        let (x, y) = match raw_coords {
            Some((lat, lng)) => {
                let (px, py) = coords::map(lat, lng);
                (Some(px), Some(py))
            }
            None => (None, None),
        };

        let units = match override_unit {
            Some(unit) => vec![unit],
            None => emp.units.clone(),
        };

        if x.is_some() {
            stats.placed += 1;
        } else {
            stats.positionless += 1;
        }

        resolved.push(ResolvedEmployee {
            person_id: emp.person_id.clone(),
            display_name: emp.display_name(),
            units,
            room,
            x,
            y,
            picture: pictures.get(emp.person_id.as_str()).cloned(),
        });
    }

    ResolvedDirectory {
        employees: resolved,
        stats,
    }
}
