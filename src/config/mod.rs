//! Configuration loading for the rover map.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kshetra_map::config::KshetraConfig;
//!
//! // Load from default path (configs/kshetra.yaml)
//! let config = KshetraConfig::load_default()?;
//!
//! // Convert to runtime configs
//! let map = RoverMap::new(config.to_map_config());
//! let explorer = ExplorationPlanner::new(config.exploration_config());
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Mapped extent and cell size |
//! | [`SensorSection`] | Ultrasonic window, IR geometry, confidences |
//! | [`OdometrySection`] | Dead-reckoning calibration |
//! | [`PlannerSection`] | A* goal retarget bound |
//! | [`NavigationSection`] | Lookahead, heading deadband, arrival distance |
//! | [`ExplorationSection`] | Speeds, durations, safe mode, stop distance |
//! | [`PersistenceSection`] | Snapshot directory |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   size_meters: 5.0   # 5m x 5m room
//!   cell_size_cm: 10   # 50 x 50 cells
//!
//! odometry:
//!   cm_per_sec_at_100: 30.0
//!   deg_per_sec_at_100: 120.0
//!
//! exploration:
//!   safe_mode: true
//!   stop_distance_cm: 30.0
//! ```

mod defaults;
mod error;
mod exploration;
mod grid;
mod kshetra;
mod motion;

// Re-export main types
pub use error::ConfigLoadError;
pub use kshetra::{KshetraConfig, DEFAULT_CONFIG_PATH};

// Re-export section types
pub use exploration::{ExplorationSection, PersistenceSection};
pub use grid::{GridSection, SensorSection};
pub use motion::{NavigationSection, OdometrySection, PlannerSection};
