//! Grid and sensor configuration sections.

use serde::{Deserialize, Serialize};

use crate::grid::{GridConfig, SensorConfig};

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Side length of the mapped square (meters)
    #[serde(default = "defaults::size_meters")]
    pub size_meters: f64,

    /// Cell side length (centimetres)
    #[serde(default = "defaults::cell_size_cm")]
    pub cell_size_cm: u32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            size_meters: defaults::size_meters(),
            cell_size_cm: defaults::cell_size_cm(),
        }
    }
}

impl GridSection {
    /// Convert to GridConfig
    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig::new(self.size_meters, self.cell_size_cm)
    }
}

/// Sensor configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorSection {
    /// Shortest accepted ultrasonic reading (cm)
    #[serde(default = "defaults::min_range_cm")]
    pub min_range_cm: f64,

    /// Longest accepted ultrasonic reading (cm)
    #[serde(default = "defaults::max_range_cm")]
    pub max_range_cm: f64,

    /// Confidence for cells cleared by a range ray
    #[serde(default = "defaults::ray_free_confidence")]
    pub ray_free_confidence: f64,

    /// IR trigger distance (cm)
    #[serde(default = "defaults::proximity_range_cm")]
    pub proximity_range_cm: f64,

    /// IR sensor offset from heading (degrees)
    #[serde(default = "defaults::proximity_angle_deg")]
    pub proximity_angle_deg: f64,

    /// Confidence of an IR hit
    #[serde(default = "defaults::proximity_confidence")]
    pub proximity_confidence: f64,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            min_range_cm: defaults::min_range_cm(),
            max_range_cm: defaults::max_range_cm(),
            ray_free_confidence: defaults::ray_free_confidence(),
            proximity_range_cm: defaults::proximity_range_cm(),
            proximity_angle_deg: defaults::proximity_angle_deg(),
            proximity_confidence: defaults::proximity_confidence(),
        }
    }
}

impl SensorSection {
    /// Convert to SensorConfig
    pub fn to_sensor_config(&self) -> SensorConfig {
        SensorConfig {
            min_range_cm: self.min_range_cm,
            max_range_cm: self.max_range_cm,
            ray_free_confidence: self.ray_free_confidence,
            proximity_range_cm: self.proximity_range_cm,
            proximity_angle_deg: self.proximity_angle_deg,
            proximity_confidence: self.proximity_confidence,
        }
    }
}
