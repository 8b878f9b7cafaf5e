//! Pure layout helpers shared by the document and raster outputs.

use crate::models::event::{AssetPlacement, Corner};

/// A plottable marker in floor-plan pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub person_id: String,
    pub x: f64,
    pub y: f64,
}

const MIN_DISTANCE: f64 = 150.0;
const MAX_ITERATIONS: usize = 100;
const SPREAD_FACTOR: f64 = 0.3;
const MAP_MARGIN: f64 = 100.0;

/// Push markers closer than `MIN_DISTANCE` apart with a bounded
/// force-directed pass, clamped to the map with a margin so profile
/// pictures stay on-canvas. Deterministic: markers are visited in input
/// order every iteration.
pub fn spread_markers(markers: &mut [Marker], width: f64, height: f64) {
    let min_x = MAP_MARGIN;
    let max_x = width - MAP_MARGIN;
    let min_y = MAP_MARGIN;
    let max_y = height - MAP_MARGIN;

    for _ in 0..MAX_ITERATIONS {
        let mut moved = false;

        for i in 0..markers.len() {
            let (mut force_x, mut force_y) = (0.0_f64, 0.0_f64);
            let (x1, y1) = (markers[i].x, markers[i].y);

            for (j, other) in markers.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = x1 - other.x;
                let dy = y1 - other.y;
                let dist = (dx * dx + dy * dy).sqrt();

                if dist < MIN_DISTANCE && dist > 0.0 {
                    let overlap = (MIN_DISTANCE - dist) / MIN_DISTANCE;
                    force_x += (dx / dist) * overlap;
                    force_y += (dy / dist) * overlap;
                }
            }

            if force_x.abs() > 0.01 || force_y.abs() > 0.01 {
                markers[i].x = (x1 + force_x * SPREAD_FACTOR * MIN_DISTANCE).clamp(min_x, max_x);
                markers[i].y = (y1 + force_y * SPREAD_FACTOR * MIN_DISTANCE).clamp(min_y, max_y);
                moved = true;
            }
        }

        if !moved {
            break;
        }
    }
}

/// Absolute top-left position of an asset of size (w, h) anchored to a
/// canvas corner. Padding pushes inward from the corner; offsets shift the
/// result afterwards. Independent of canvas content.
pub fn anchor_position(
    placement: &AssetPlacement,
    asset_w: i64,
    asset_h: i64,
    canvas_w: i64,
    canvas_h: i64,
) -> (i64, i64) {
    let p = placement.padding;
    let (x, y) = match placement.position {
        Corner::TopLeft => (p, p),
        Corner::TopRight => (canvas_w - asset_w - p, p),
        Corner::BottomLeft => (p, canvas_h - asset_h - p),
        Corner::BottomRight => (canvas_w - asset_w - p, canvas_h - asset_h - p),
    };
    (x + placement.offset_x, y + placement.offset_y)
}
