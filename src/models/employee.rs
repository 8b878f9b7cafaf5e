use serde::Deserialize;

/// Directory record from the external employee feed. Source of truth for
/// identity (`person_id`) and organizational units.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEmployee {
    pub person_id: String,

    /// Full name as reported by the feed. May be empty for some rows;
    /// see [`RawEmployee::display_name`].
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub units: Vec<String>,

    /// Raw table row from the scraper. Index 2 holds the last name and
    /// index 3 the first name when `name` is missing.
    #[serde(default)]
    pub row_data: Vec<String>,
}

impl RawEmployee {
    /// Display name with the feed's missing-name quirk repaired: rows with
    /// an empty `name` carry the parts in `row_data` instead.
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        if self.row_data.len() >= 4 {
            return format!("{} {}", self.row_data[3], self.row_data[2]);
        }
        String::new()
    }
}
