//! Odometry, planning and navigation sections.

use serde::{Deserialize, Serialize};

use crate::exploration::NavigationConfig;
use crate::odometry::Calibration;
use crate::pathfinding::AStarConfig;

use super::defaults;

/// Odometry calibration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OdometrySection {
    /// Forward speed at motor speed 100 (cm/s)
    #[serde(default = "defaults::cm_per_sec_at_100")]
    pub cm_per_sec_at_100: f64,

    /// Turn rate at motor speed 100 (deg/s)
    #[serde(default = "defaults::deg_per_sec_at_100")]
    pub deg_per_sec_at_100: f64,
}

impl Default for OdometrySection {
    fn default() -> Self {
        Self {
            cm_per_sec_at_100: defaults::cm_per_sec_at_100(),
            deg_per_sec_at_100: defaults::deg_per_sec_at_100(),
        }
    }
}

impl OdometrySection {
    /// Convert to Calibration
    pub fn to_calibration(&self) -> Calibration {
        Calibration::new(self.cm_per_sec_at_100, self.deg_per_sec_at_100)
    }
}

/// Path planner section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Ring search bound for occupied goals (radii 1..max_search_radius)
    #[serde(default = "defaults::max_search_radius")]
    pub max_search_radius: u32,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            max_search_radius: defaults::max_search_radius(),
        }
    }
}

impl PlannerSection {
    /// Convert to AStarConfig
    pub fn to_astar_config(&self) -> AStarConfig {
        AStarConfig {
            max_search_radius: self.max_search_radius,
        }
    }
}

/// Navigation policy section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationSection {
    /// Path index to steer toward
    #[serde(default = "defaults::lookahead")]
    pub lookahead: usize,

    /// Heading error tolerated before turning (degrees)
    #[serde(default = "defaults::heading_deadband_deg")]
    pub heading_deadband_deg: f64,

    /// Waypoint distance treated as arrival (cm)
    #[serde(default = "defaults::arrival_distance_cm")]
    pub arrival_distance_cm: f64,
}

impl Default for NavigationSection {
    fn default() -> Self {
        Self {
            lookahead: defaults::lookahead(),
            heading_deadband_deg: defaults::heading_deadband_deg(),
            arrival_distance_cm: defaults::arrival_distance_cm(),
        }
    }
}

impl NavigationSection {
    /// Convert to NavigationConfig
    pub fn to_navigation_config(&self) -> NavigationConfig {
        NavigationConfig {
            lookahead: self.lookahead,
            heading_deadband_deg: self.heading_deadband_deg,
            arrival_distance_cm: self.arrival_distance_cm,
        }
    }
}
