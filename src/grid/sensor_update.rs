//! Range and proximity sensor integration.
//!
//! - Range (ultrasonic): free corridor from the rover to the echo, occupied tip
//! - Proximity (IR): single occupied cell at a fixed short range, no corridor

use log::trace;

use crate::core::{GridCoord, Pose};

use super::config::SensorConfig;
use super::storage::OccupancyGrid;

/// Confidence assumed for a range reading when the caller has none.
pub const DEFAULT_RANGE_CONFIDENCE: f64 = 0.8;

/// Which proximity sensors fired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProximityHits {
    /// Left-front sensor
    pub left: bool,
    /// Right-front sensor
    pub right: bool,
}

impl ProximityHits {
    /// Create from the two sensor flags
    pub fn new(left: bool, right: bool) -> Self {
        Self { left, right }
    }

    /// Any sensor triggered
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Integrate one range reading taken along the rover's heading.
///
/// Readings outside the sensor window are dropped and `None` is returned.
/// Otherwise every cell from the rover to the target is marked free, then
/// the target cell is marked occupied, and the target cell is returned.
pub fn update_from_range(
    grid: &mut OccupancyGrid,
    pose: &Pose,
    distance_cm: f64,
    confidence: f64,
    sensor: &SensorConfig,
) -> Option<GridCoord> {
    if !sensor.is_valid_range(distance_cm) {
        trace!("[Grid] Dropped range reading {:.1}cm", distance_cm);
        return None;
    }

    let rover = grid.world_to_grid(pose.position());
    let target = grid.world_to_grid(pose.project(0.0, distance_cm));

    grid.cast_ray(rover, target, sensor.ray_free_confidence);
    grid.mark_cell(target, true, confidence);

    Some(target)
}

/// Integrate proximity sensor flags.
///
/// Each triggered sensor marks one cell occupied at the sensor's offset
/// angle (left is counter-clockwise). Returns the cells marked.
pub fn update_from_proximity(
    grid: &mut OccupancyGrid,
    pose: &Pose,
    hits: ProximityHits,
    sensor: &SensorConfig,
) -> Vec<GridCoord> {
    let mut marked = Vec::with_capacity(2);

    let offsets = [
        (hits.left, -sensor.proximity_angle_deg),
        (hits.right, sensor.proximity_angle_deg),
    ];
    for (hit, offset) in offsets {
        if !hit {
            continue;
        }
        let cell = grid.world_to_grid(pose.project(offset, sensor.proximity_range_cm));
        if grid.mark_cell(cell, true, sensor.proximity_confidence) {
            marked.push(cell);
        }
    }

    marked
}
