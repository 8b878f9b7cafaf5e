use serde::Deserialize;

/// User-submitted correction for one employee, keyed by `person_id` in
/// `location_overrides.json`. Both fields are independently optional;
/// absence means "no override for this field".
///
/// Legacy entries are plain strings and mean a room-only override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationOverride {
    pub room: Option<String>,
    pub unit: Option<String>,
}

impl<'de> Deserialize<'de> for LocationOverride {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Room(String),
            Fields {
                #[serde(default)]
                room: Option<String>,
                #[serde(default)]
                unit: Option<String>,
            },
        }

        Ok(match Shape::deserialize(deserializer)? {
            Shape::Room(room) => LocationOverride {
                room: Some(room),
                unit: None,
            },
            Shape::Fields { room, unit } => LocationOverride { room, unit },
        })
    }
}

/// Full-image substitute for the generated output on one exact calendar
/// date, keyed by `YYYY-MM-DD` in `display_overrides.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayOverrideEntry {
    /// Image path relative to the data directory.
    pub image: String,

    #[serde(default = "default_slide_name")]
    pub name: String,
}

fn default_slide_name() -> String {
    "Override Slide".to_string()
}
