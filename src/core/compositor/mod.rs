//! Rendering of the resolved directory: a structured interactive document
//! and flattened TV raster images sharing the same layout logic.

pub mod document;
pub mod layout;
pub mod processor;
pub mod raster;

use std::fs;

use ab_glyph::FontVec;

use crate::ui::messages::warning;

/// Parse a `#RRGGBB` color. `None` on anything else.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Probe the configured font paths and load the first that parses.
/// Text rendering is skipped (with a diagnostic) when no font is found;
/// a missing font never aborts a render.
pub fn load_font(paths: &[String]) -> Option<FontVec> {
    for path in paths {
        let Ok(data) = fs::read(crate::utils::path::expand_tilde(path)) else {
            continue;
        };
        match FontVec::try_from_vec(data) {
            Ok(font) => return Some(font),
            Err(_) => continue,
        }
    }
    warning("No usable font found; text labels will be skipped");
    None
}
