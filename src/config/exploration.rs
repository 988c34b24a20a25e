//! Exploration and persistence sections.

use serde::{Deserialize, Serialize};

use crate::exploration::{ExplorationConfig, SafetyInterlock};

use super::defaults;

/// Exploration behaviour section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSection {
    /// Cap speeds at `safe_mode_max_speed`
    #[serde(default = "defaults::safe_mode")]
    pub safe_mode: bool,

    /// Speed cap in safe mode (0-100)
    #[serde(default = "defaults::safe_mode_max_speed")]
    pub safe_mode_max_speed: u8,

    /// Forward drive speed (0-100)
    #[serde(default = "defaults::forward_speed")]
    pub forward_speed: u8,

    /// Forward drive duration (s)
    #[serde(default = "defaults::forward_duration_sec")]
    pub forward_duration_sec: f64,

    /// Turn speed (0-100)
    #[serde(default = "defaults::turn_speed")]
    pub turn_speed: u8,

    /// Heading correction turn duration (s)
    #[serde(default = "defaults::turn_duration_sec")]
    pub turn_duration_sec: f64,

    /// Escape turn when no path exists (s)
    #[serde(default = "defaults::blocked_turn_duration_sec")]
    pub blocked_turn_duration_sec: f64,

    /// Escape turn after an interlock veto (s)
    #[serde(default = "defaults::obstacle_turn_duration_sec")]
    pub obstacle_turn_duration_sec: f64,

    /// Ultrasonic range that stops forward motion (cm)
    #[serde(default = "defaults::stop_distance_cm")]
    pub stop_distance_cm: f64,

    /// Confidence given to ultrasonic readings
    #[serde(default = "defaults::range_confidence")]
    pub range_confidence: f64,
}

impl Default for ExplorationSection {
    fn default() -> Self {
        Self {
            safe_mode: defaults::safe_mode(),
            safe_mode_max_speed: defaults::safe_mode_max_speed(),
            forward_speed: defaults::forward_speed(),
            forward_duration_sec: defaults::forward_duration_sec(),
            turn_speed: defaults::turn_speed(),
            turn_duration_sec: defaults::turn_duration_sec(),
            blocked_turn_duration_sec: defaults::blocked_turn_duration_sec(),
            obstacle_turn_duration_sec: defaults::obstacle_turn_duration_sec(),
            stop_distance_cm: defaults::stop_distance_cm(),
            range_confidence: defaults::range_confidence(),
        }
    }
}

impl ExplorationSection {
    /// Convert to ExplorationConfig
    pub fn to_exploration_config(&self) -> ExplorationConfig {
        ExplorationConfig {
            safe_mode: self.safe_mode,
            safe_mode_max_speed: self.safe_mode_max_speed,
            forward_speed: self.forward_speed,
            forward_duration_sec: self.forward_duration_sec,
            turn_speed: self.turn_speed,
            turn_duration_sec: self.turn_duration_sec,
            blocked_turn_duration_sec: self.blocked_turn_duration_sec,
            obstacle_turn_duration_sec: self.obstacle_turn_duration_sec,
            range_confidence: self.range_confidence,
            interlock: SafetyInterlock::new(self.stop_distance_cm),
        }
    }
}

/// Persistence section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistenceSection {
    /// Directory holding `rover_map_*.json` snapshots
    #[serde(default = "defaults::map_dir")]
    pub map_dir: String,
}

impl Default for PersistenceSection {
    fn default() -> Self {
        Self {
            map_dir: defaults::map_dir(),
        }
    }
}
