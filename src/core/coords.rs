//! Conversion from the positioning service's normalized coordinate space
//! to floor-plan pixel space.
//!
//! The service uses a [0,10]×[0,10] space with a bottom-left origin; pixel
//! space is top-left origin, hence the vertical flip. Inputs outside [0,10]
//! are not clamped and map outside the canvas.

pub const FLOOR_PLAN_WIDTH: f64 = 3056.0;
pub const FLOOR_PLAN_HEIGHT: f64 = 3056.0;

const FOREIGN_MAX: f64 = 10.0;

/// Map a (latitude, longitude) pair to (x, y) floor-plan pixels.
pub fn map(latitude: f64, longitude: f64) -> (f64, f64) {
    let x = longitude * (FLOOR_PLAN_WIDTH / FOREIGN_MAX);
    let y = (FOREIGN_MAX - latitude) * (FLOOR_PLAN_HEIGHT / FOREIGN_MAX);
    (x, y)
}
