use serde::Serialize;

/// Fully reconciled directory record. Exactly one per unique `person_id`.
/// `x`/`y` are floor-plan pixel coordinates and stay `None` for
/// positionless records, never a default zero.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEmployee {
    pub person_id: String,
    pub display_name: String,
    pub units: Vec<String>,
    pub room: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// Picture reference relative to the data directory.
    pub picture: Option<String>,
}

impl ResolvedEmployee {
    pub fn is_plottable(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ResolveStats {
    pub placed: usize,
    pub positionless: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedDirectory {
    pub employees: Vec<ResolvedEmployee>,
    pub stats: ResolveStats,
}

impl ResolvedDirectory {
    /// All distinct units, sorted, for per-unit groupings.
    pub fn units(&self) -> Vec<String> {
        let mut units: Vec<String> = self
            .employees
            .iter()
            .flat_map(|e| e.units.iter().cloned())
            .collect();
        units.sort();
        units.dedup();
        units
    }
}
