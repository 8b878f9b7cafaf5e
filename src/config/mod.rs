use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::ui::messages::warning;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Directory the input collaborators drop their files into.
    pub data_dir: String,

    /// Directory the generated artifacts are written to.
    pub output_dir: String,

    /// Font files probed in order; the first that parses is used for all
    /// text rendering.
    #[serde(default = "default_font_paths")]
    pub font_paths: Vec<String>,
}

fn default_font_paths() -> Vec<String> {
    vec![
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf".to_string(),
        "/usr/share/fonts/dejavu/DejaVuSans.ttf".to_string(),
        "/System/Library/Fonts/Supplemental/Arial.ttf".to_string(),
        "C:\\Windows\\Fonts\\arial.ttf".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            output_dir: "output".to_string(),
            font_paths: default_font_paths(),
        }
    }
}

impl Config {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".floormap")
    }

    /// Full path of the config file.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("floormap.conf")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A malformed file is reported and replaced by defaults for the run.
    pub fn load() -> Self {
        let path = Self::config_file();
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warning(format!("Malformed config file, using defaults: {e}"));
                    Self::default()
                }
            },
            Err(e) => {
                warning(format!("Could not read config file, using defaults: {e}"));
                Self::default()
            }
        }
    }

    /// Initialize the config file and the data directory skeleton.
    pub fn init_all() -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let config = Self::default();
        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| io::Error::other(format!("config serialization failed: {e}")))?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        println!("✅ Config file: {:?}", Self::config_file());

        let data_dir = PathBuf::from(&config.data_dir);
        fs::create_dir_all(data_dir.join("events"))?;
        fs::create_dir_all(data_dir.join("profile_pictures"))?;
        fs::create_dir_all(data_dir.join("assets"))?;
        fs::create_dir_all(PathBuf::from(&config.output_dir).join("tv"))?;

        // Seed the override files with their comment convention so editors
        // know keys starting with `_` are ignored.
        let location_overrides = data_dir.join("location_overrides.json");
        if !location_overrides.exists() {
            fs::write(
                &location_overrides,
                "{\n  \"_comment\": \"person_id -> {room?, unit?}; keys starting with _ are ignored\"\n}\n",
            )?;
        }
        let display_overrides = data_dir.join("display_overrides.json");
        if !display_overrides.exists() {
            fs::write(
                &display_overrides,
                "{\n  \"_comment\": \"YYYY-MM-DD -> {image, name}; keys starting with _ are ignored\"\n}\n",
            )?;
        }

        println!("✅ Data directory: {:?}", data_dir);
        Ok(())
    }
}
