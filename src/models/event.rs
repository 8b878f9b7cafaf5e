use serde::Deserialize;

/// One seasonal event, loaded from `events/<name>/config.json`.
///
/// The date range is inclusive over (month, day) pairs and may wrap the
/// year boundary, e.g. Dec 15 → Jan 5.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,

    #[serde(default)]
    pub assets: Vec<AssetSpec>,

    /// Name of a registered profile processor applied to every profile
    /// picture while the event is active.
    #[serde(default)]
    pub profile_processor: Option<String>,

    #[serde(default)]
    pub profile_processor_config: serde_json::Map<String, serde_json::Value>,
}

impl EventConfig {
    /// Inclusive containment of a (month, day) pair, handling ranges that
    /// cross Dec 31 → Jan 1.
    pub fn contains(&self, month: u32, day: u32) -> bool {
        let current = (month, day);
        let start = (self.start_month, self.start_day);
        let end = (self.end_month, self.end_day);

        if start <= end {
            start <= current && current <= end
        } else {
            current >= start || current <= end
        }
    }
}

/// Corner a decorative asset is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Anchor corner plus padding/offsets; determines absolute placement
/// independent of canvas content.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetPlacement {
    pub position: Corner,
    #[serde(default)]
    pub padding: i64,
    #[serde(default)]
    pub offset_x: i64,
    #[serde(default)]
    pub offset_y: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Decorative asset of an event: a scaled image or a text message.
/// For messages one entry of `texts` is chosen uniformly at random at
/// render time.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssetSpec {
    Image {
        /// File path relative to the event folder.
        file: String,
        #[serde(default = "default_scale")]
        scale: f32,
        #[serde(flatten)]
        placement: AssetPlacement,
    },
    Message {
        texts: Vec<String>,
        #[serde(default = "default_color")]
        color: String,
        #[serde(default = "default_font_size")]
        font_size: f32,
        #[serde(default)]
        align: Align,
        #[serde(flatten)]
        placement: AssetPlacement,
    },
}

fn default_scale() -> f32 {
    1.0
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_font_size() -> f32 {
    48.0
}
