//! Heading math in compass degrees.
//!
//! All headings use the rover's compass convention:
//! - 0° points along +y (north), 90° along +x (east)
//! - Clockwise positive, normalized to [0, 360)

/// Full turn in degrees.
pub const FULL_TURN_DEG: f64 = 360.0;

/// Normalize a heading to [0, 360).
///
/// # Example
/// ```
/// use kshetra_map::core::math::normalize_heading;
///
/// assert_eq!(normalize_heading(370.0), 10.0);
/// assert_eq!(normalize_heading(-30.0), 330.0);
/// ```
#[inline]
pub fn normalize_heading(heading_deg: f64) -> f64 {
    let h = heading_deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if h >= FULL_TURN_DEG {
        0.0
    } else {
        h
    }
}

/// Compass bearing of the vector (dx, dy), in [0, 360).
///
/// Uses `atan2(dx, dy)` so that +y is 0° and +x is 90°.
#[inline]
pub fn bearing_deg(dx: f64, dy: f64) -> f64 {
    normalize_heading(dx.atan2(dy).to_degrees())
}

/// Signed heading error from `current` to `target`, wrapped to (-180, 180].
///
/// Negative means the target lies to the left (counter-clockwise).
#[inline]
pub fn heading_error_deg(target_deg: f64, current_deg: f64) -> f64 {
    let e = (target_deg - current_deg).rem_euclid(FULL_TURN_DEG);
    if e > 180.0 {
        e - FULL_TURN_DEG
    } else {
        e
    }
}
