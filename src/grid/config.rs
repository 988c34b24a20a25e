//! Grid and sensor configuration.

use serde::{Deserialize, Serialize};

use crate::exploration::NavigationConfig;
use crate::odometry::Calibration;
use crate::pathfinding::AStarConfig;

/// Grid dimensions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Side length of the square mapped area (meters)
    pub size_meters: f64,
    /// Cell side length (centimetres)
    pub cell_size_cm: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size_meters: 5.0, // 5m x 5m room
            cell_size_cm: 10, // 50 x 50 cells
        }
    }
}

impl GridConfig {
    /// Create a grid configuration
    pub fn new(size_meters: f64, cell_size_cm: u32) -> Self {
        Self {
            size_meters,
            cell_size_cm,
        }
    }

    /// Cells per meter of world distance
    #[inline]
    pub fn cells_per_meter(&self) -> f64 {
        100.0 / self.cell_size_cm.max(1) as f64
    }

    /// Cells along each side of the grid
    #[inline]
    pub fn grid_cells(&self) -> usize {
        (self.size_meters.max(0.0) * self.cells_per_meter()) as usize
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size_cm == 0 {
            return Err("cell_size_cm must be positive".to_string());
        }
        if !(self.size_meters.is_finite() && self.size_meters > 0.0) {
            return Err("size_meters must be positive".to_string());
        }
        if self.grid_cells() == 0 {
            return Err(format!(
                "grid of {}m with {}cm cells has no cells",
                self.size_meters, self.cell_size_cm
            ));
        }
        Ok(())
    }
}

/// On-board range and proximity sensor parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Shortest accepted range reading (cm)
    pub min_range_cm: f64,
    /// Longest accepted range reading (cm)
    pub max_range_cm: f64,
    /// Confidence used for every free cell along a range ray
    pub ray_free_confidence: f64,
    /// Distance at which a proximity sensor triggers (cm)
    pub proximity_range_cm: f64,
    /// Angular offset of each proximity sensor from the heading (degrees)
    pub proximity_angle_deg: f64,
    /// Confidence of a proximity hit
    pub proximity_confidence: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            min_range_cm: 2.0,
            max_range_cm: 400.0,
            ray_free_confidence: 0.3,
            proximity_range_cm: 15.0,
            proximity_angle_deg: 30.0,
            proximity_confidence: 0.9,
        }
    }
}

impl SensorConfig {
    /// Is this range reading inside the sensor's valid window?
    #[inline]
    pub fn is_valid_range(&self, distance_cm: f64) -> bool {
        distance_cm >= self.min_range_cm && distance_cm <= self.max_range_cm
    }
}

/// Combined configuration for a [`RoverMap`](crate::RoverMap)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapConfig {
    /// Grid dimensions
    pub grid: GridConfig,
    /// Sensor model
    pub sensor: SensorConfig,
    /// Odometry calibration
    pub calibration: Calibration,
    /// Path planner settings
    pub planner: AStarConfig,
    /// Navigation policy settings
    pub navigation: NavigationConfig,
}

impl MapConfig {
    /// Configuration with a custom grid and defaults elsewhere
    pub fn with_grid(size_meters: f64, cell_size_cm: u32) -> Self {
        Self {
            grid: GridConfig::new(size_meters, cell_size_cm),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let config = GridConfig::default();
        assert_eq!(config.cells_per_meter(), 10.0);
        assert_eq!(config.grid_cells(), 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_grid_cells_truncate() {
        assert_eq!(GridConfig::new(3.0, 10).grid_cells(), 30);
        assert_eq!(GridConfig::new(1.0, 7).grid_cells(), 14);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(GridConfig::new(5.0, 0).validate().is_err());
        assert!(GridConfig::new(0.0, 10).validate().is_err());
        assert!(GridConfig::new(0.05, 10).validate().is_err());
    }

    #[test]
    fn test_range_window() {
        let sensor = SensorConfig::default();
        assert!(!sensor.is_valid_range(1.9));
        assert!(sensor.is_valid_range(2.0));
        assert!(sensor.is_valid_range(400.0));
        assert!(!sensor.is_valid_range(400.1));
        assert!(!sensor.is_valid_range(f64::NAN));
    }
}
