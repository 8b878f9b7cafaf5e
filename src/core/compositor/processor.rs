//! Profile-picture post-processing for active events.
//!
//! Processors are a capability interface: anything that accepts an RGBA
//! image plus a configuration mapping and returns an RGBA image of
//! compositing-compatible dimensions can be registered. Event packages
//! name a processor in their config; the registry resolves it at
//! event-selection time. A failing processor is non-fatal per image, the
//! caller falls back to the untransformed picture.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::core::compositor::parse_hex_color;
use crate::errors::{AppError, AppResult};

pub type ProcessorConfig = serde_json::Map<String, serde_json::Value>;

pub trait ProfileProcessor {
    fn transform(&self, image: RgbaImage, config: &ProcessorConfig) -> AppResult<RgbaImage>;
}

pub struct ProcessorRegistry {
    processors: HashMap<String, Box<dyn ProfileProcessor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
        }
    }

    /// Registry with the built-in processors, bound to an event folder so
    /// overlay decorations resolve relative to it.
    pub fn builtin(event_dir: &Path) -> Self {
        let mut registry = Self::new();
        registry.register("overlay", Box::new(OverlayProcessor::new(event_dir)));
        registry.register("tint", Box::new(TintProcessor));
        registry
    }

    pub fn register(&mut self, name: &str, processor: Box<dyn ProfileProcessor>) {
        self.processors.insert(name.to_string(), processor);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ProfileProcessor> {
        self.processors.get(name).map(|p| p.as_ref())
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn config_f64(config: &ProcessorConfig, key: &str, default: f64) -> f64 {
    config.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
}

fn config_str<'a>(config: &'a ProcessorConfig, key: &str, default: &'a str) -> &'a str {
    config.get(key).and_then(|v| v.as_str()).unwrap_or(default)
}

/// Composite a decoration image (e.g. a Santa hat) onto the top of the
/// profile picture. Config: `file` (relative to the event folder),
/// `scale_factor` (width relative to the picture, default 0.9),
/// `horizontal_offset` / `vertical_offset` (fractions of the picture size).
pub struct OverlayProcessor {
    event_dir: PathBuf,
}

impl OverlayProcessor {
    pub fn new(event_dir: &Path) -> Self {
        Self {
            event_dir: event_dir.to_path_buf(),
        }
    }
}

impl ProfileProcessor for OverlayProcessor {
    fn transform(&self, image: RgbaImage, config: &ProcessorConfig) -> AppResult<RgbaImage> {
        let file = config_str(config, "file", "overlay.png");
        let path = self.event_dir.join(file);
        if !path.exists() {
            return Err(AppError::MissingInput(path.display().to_string()));
        }

        let decoration = image::open(&path)?.to_rgba8();
        let scale_factor = config_f64(config, "scale_factor", 0.9);
        let h_offset = config_f64(config, "horizontal_offset", 0.0);
        let v_offset = config_f64(config, "vertical_offset", 0.0);

        let (iw, ih) = (image.width() as f64, image.height() as f64);
        let target_w = (iw * scale_factor).round().max(1.0) as u32;
        let target_h = ((decoration.height() as f64 / decoration.width() as f64)
            * target_w as f64)
            .round()
            .max(1.0) as u32;
        let decoration = imageops::resize(&decoration, target_w, target_h, FilterType::Lanczos3);

        let x = ((iw - target_w as f64) / 2.0 + iw * h_offset).round() as i64;
        let y = (ih * v_offset).round() as i64;

        let mut out = image;
        imageops::overlay(&mut out, &decoration, x, y);
        Ok(out)
    }
}

/// Alpha-blend a solid color over the picture (e.g. a Valentine wash).
/// Config: `color` (`#RRGGBB`, default `#FF6B9D`), `alpha` (0..1,
/// default 0.25).
pub struct TintProcessor;

impl ProfileProcessor for TintProcessor {
    fn transform(&self, image: RgbaImage, config: &ProcessorConfig) -> AppResult<RgbaImage> {
        let color = config_str(config, "color", "#FF6B9D");
        let [tr, tg, tb] = parse_hex_color(color)
            .ok_or_else(|| AppError::Config(format!("invalid tint color '{color}'")))?;
        let alpha = config_f64(config, "alpha", 0.25).clamp(0.0, 1.0);

        let mut out = image;
        for pixel in out.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            pixel.0 = [
                blend(r, tr, alpha),
                blend(g, tg, alpha),
                blend(b, tb, alpha),
                a,
            ];
        }
        Ok(out)
    }
}

fn blend(base: u8, tint: u8, alpha: f64) -> u8 {
    (base as f64 * (1.0 - alpha) + tint as f64 * alpha).round() as u8
}
