//! # Kshetra Map
//!
//! Local 2D occupancy mapping and frontier exploration for a small wheeled
//! rover with an ultrasonic range sensor, two IR proximity sensors and
//! dead-reckoned motion.
//!
//! ## Overview
//!
//! Every grid cell holds an integer confidence in [0, 100]:
//!
//! - **Unknown** (0) - Not yet observed
//! - **Free** (1-59) - Observed, free-leaning; never returns to 0
//! - **Occupied** (60-100) - Observed, obstacle-leaning
//!
//! ## Features
//!
//! - **Dead Reckoning**: Pose from motion command, duration and speed
//! - **Ray Casting**: Free corridor plus occupied tip per range reading
//! - **A* Planning**: 4-connected, optimistic through unknown space
//! - **Frontier Exploration**: Nearest unknown cell bordering explored space
//! - **Navigation Policy**: One discrete action per tick, re-planned every call
//! - **Persistence**: JSON snapshots and ASCII views
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kshetra_map::{MovementType, RoverMap};
//!
//! let mut map = RoverMap::with_defaults();
//!
//! // After each motor command and sensor read
//! map.advance_odometry(MovementType::Forward, 1.0, 40);
//! map.add_range_reading(85.0, 0.8);
//! map.add_proximity_reading(false, true);
//!
//! // Once per control tick
//! if let Some(frontier) = map.nearest_frontier() {
//!     let decision = map.navigate(frontier);
//!     println!("{}", decision.action);
//! }
//! ```
//!
//! ## Coordinate System
//!
//! - X: East, centimetres from the grid's south-west corner
//! - Y: North, centimetres from the grid's south-west corner
//! - Heading: Degrees clockwise from north, in [0, 360)

#![warn(missing_docs)]

// Core types
pub mod core;

// Dead reckoning
pub mod odometry;

// Grid storage, sensor updates and Wi-Fi layer
pub mod grid;

// A* path planning
pub mod pathfinding;

// Frontier selection, navigation policy and exploration
pub mod exploration;

// Unified configuration
pub mod config;

// Persistence and rendering
pub mod io;

mod error;
mod map;
mod shared;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::core::{GridCoord, Pose, WorldPoint};

pub use odometry::{Calibration, MovementType, OdometryIntegrator};

pub use grid::{GridConfig, MapConfig, OccupancyGrid, SensorConfig, SignalBand, WifiOverlay};

pub use pathfinding::{AStarConfig, AStarPlanner, PathFailure};

pub use exploration::{
    ExplorationConfig, ExplorationPlanner, ExplorationStep, MotionCommand, NavAction,
    NavigationConfig, NavigationResult, SafetyInterlock, SensorSnapshot, StopReason,
    TurnDirection,
};

pub use config::{ConfigLoadError, KshetraConfig};

pub use io::{MapSnapshot, RenderLayer};

pub use error::{MapError, Result};
pub use map::RoverMap;
pub use shared::SharedRoverMap;

/// Rover pose as reported in statistics (rounded to 0.1)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverPosition {
    /// East position (cm)
    pub x_cm: f64,
    /// North position (cm)
    pub y_cm: f64,
    /// Heading (degrees)
    pub heading_deg: f64,
}

/// Derived map statistics.
///
/// Computed on demand from the grid, pose and odometry; never the source
/// of truth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStatistics {
    /// Cells in the grid
    pub total_cells: usize,
    /// Cells observed at least once
    pub explored_cells: usize,
    /// Explored share of the grid, one decimal
    pub explored_percent: f64,
    /// Cells at or above the occupied threshold
    pub occupied_cells: usize,
    /// Rover pose
    pub rover_position: RoverPosition,
    /// Dead-reckoned distance (cm, one decimal)
    pub distance_traveled_cm: f64,
    /// Dead-reckoned distance (m, two decimals)
    pub distance_traveled_m: f64,
    /// Accepted range readings
    pub scan_count: u64,
}
