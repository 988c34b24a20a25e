//! Rover pose in the map frame.

use serde::{Deserialize, Serialize};

use super::math::normalize_heading;
use super::point::WorldPoint;

/// Rover position (centimetres) and compass heading (degrees).
///
/// Heading 0° faces +y, 90° faces +x; always kept in [0, 360).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// X position in centimetres.
    pub x: f64,
    /// Y position in centimetres.
    pub y: f64,
    /// Heading in degrees [0, 360).
    pub heading: f64,
}

impl Pose {
    /// Create a new pose (heading is normalized).
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            x,
            y,
            heading: normalize_heading(heading),
        }
    }

    /// Get the position as a WorldPoint.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Point `distance` centimetres ahead, offset by `relative_deg` from the heading.
    #[inline]
    pub fn project(&self, relative_deg: f64, distance: f64) -> WorldPoint {
        self.position()
            .project(normalize_heading(self.heading + relative_deg), distance)
    }

    /// Compass direction glyph used when drawing the rover.
    pub fn direction_glyph(&self) -> char {
        match self.heading {
            h if (45.0..135.0).contains(&h) => '>',
            h if (135.0..225.0).contains(&h) => 'v',
            h if (225.0..315.0).contains(&h) => '<',
            _ => '^',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_normalizes_heading() {
        let pose = Pose::new(0.0, 0.0, -90.0);
        assert_eq!(pose.heading, 270.0);
    }

    #[test]
    fn test_project_with_offset() {
        let pose = Pose::new(0.0, 0.0, 60.0);
        let p = pose.project(30.0, 15.0);
        assert!((p.x - 15.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_direction_glyph() {
        assert_eq!(Pose::new(0.0, 0.0, 0.0).direction_glyph(), '^');
        assert_eq!(Pose::new(0.0, 0.0, 90.0).direction_glyph(), '>');
        assert_eq!(Pose::new(0.0, 0.0, 180.0).direction_glyph(), 'v');
        assert_eq!(Pose::new(0.0, 0.0, 270.0).direction_glyph(), '<');
        assert_eq!(Pose::new(0.0, 0.0, 330.0).direction_glyph(), '^');
    }
}
