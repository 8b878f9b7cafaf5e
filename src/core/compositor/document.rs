//! Interactive map document: structured positional/metadata payload for a
//! client-side renderer. No event overlay is baked into it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::json;

use crate::core::coords::{FLOOR_PLAN_HEIGHT, FLOOR_PLAN_WIDTH};
use crate::errors::AppResult;
use crate::models::resolved::ResolvedDirectory;
use crate::utils::date::date_key;

pub fn build_document(directory: &ResolvedDirectory, today: NaiveDate) -> serde_json::Value {
    let mut units: BTreeMap<String, usize> = BTreeMap::new();
    for emp in &directory.employees {
        for unit in &emp.units {
            *units.entry(unit.clone()).or_default() += 1;
        }
    }

    json!({
        "generated_for": date_key(today),
        "canvas": { "width": FLOOR_PLAN_WIDTH, "height": FLOOR_PLAN_HEIGHT },
        "stats": directory.stats,
        "units": units,
        "employees": directory.employees,
    })
}

/// Write the document atomically: encode to a sibling temp file, then
/// rename over the destination so a failed run never leaves a truncated
/// artifact under the final name.
pub fn write_document(
    path: &Path,
    directory: &ResolvedDirectory,
    today: NaiveDate,
) -> AppResult<()> {
    let document = build_document(directory, today);

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(&document)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
