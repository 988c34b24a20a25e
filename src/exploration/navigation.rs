//! Navigation policy: one discrete action per control tick.
//!
//! Every call re-plans from scratch against the current grid and pose; no
//! planner state survives between calls. The decision is:
//!
//! ```text
//! plan path ──► none ─────────────────────────────► Blocked
//!     │
//!     ├──► empty (already on goal cell) ─────────► Arrived
//!     │
//!     ▼
//! waypoint = path[min(lookahead, len-1)]
//!     │
//!     ├──► |heading error| > deadband ───────────► Turning(left/right)
//!     ├──► distance to waypoint < arrival dist ──► Arrived
//!     └──► otherwise ────────────────────────────► Advancing
//! ```
//!
//! Because the result is side-effect free, a safety interlock can veto the
//! emitted action before any motor command is issued.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{bearing_deg, heading_error_deg, GridCoord, Pose, WorldPoint};
use crate::grid::OccupancyGrid;
use crate::odometry::MovementType;
use crate::pathfinding::{AStarConfig, AStarPlanner, PathFailure};

/// Navigation policy configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Path index steered toward (clamped to the path length)
    pub lookahead: usize,
    /// Heading error tolerated before turning in place (degrees)
    pub heading_deadband_deg: f64,
    /// Waypoint distance treated as arrival (cm)
    pub arrival_distance_cm: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            lookahead: 3,
            heading_deadband_deg: 15.0,
            arrival_distance_cm: 10.0,
        }
    }
}

/// Direction of an in-place turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    /// Counter-clockwise (heading decreases)
    Left,
    /// Clockwise (heading increases)
    Right,
}

impl TurnDirection {
    /// Odometry movement for this turn
    pub fn movement(self) -> MovementType {
        match self {
            TurnDirection::Left => MovementType::TurnLeft,
            TurnDirection::Right => MovementType::TurnRight,
        }
    }
}

/// Navigation decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavAction {
    /// Rotate in place toward the waypoint
    Turning(TurnDirection),
    /// Drive forward
    Advancing,
    /// At the goal (or within arrival distance of the waypoint)
    Arrived,
    /// No path to the goal
    Blocked,
}

impl NavAction {
    /// Action name for logging
    pub fn name(&self) -> &'static str {
        match self {
            NavAction::Turning(TurnDirection::Left) => "turn_left",
            NavAction::Turning(TurnDirection::Right) => "turn_right",
            NavAction::Advancing => "forward",
            NavAction::Arrived => "arrived",
            NavAction::Blocked => "blocked",
        }
    }

    /// Motor movement for this action, if it moves the rover
    pub fn movement(&self) -> Option<MovementType> {
        match self {
            NavAction::Turning(direction) => Some(direction.movement()),
            NavAction::Advancing => Some(MovementType::Forward),
            NavAction::Arrived | NavAction::Blocked => None,
        }
    }
}

impl std::fmt::Display for NavAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one navigation query
#[derive(Clone, Debug, PartialEq)]
pub struct NavigationResult {
    /// Decided action
    pub action: NavAction,
    /// Whether the planner found a path
    pub path_found: bool,
    /// Why planning failed
    pub failure: Option<PathFailure>,
    /// Distance from the rover to the steering waypoint (cm)
    pub distance_to_goal_cm: Option<f64>,
    /// Steering waypoint (cell corner, cm)
    pub waypoint: Option<WorldPoint>,
    /// Signed heading error to the waypoint, (-180, 180] degrees
    pub heading_error_deg: Option<f64>,
    /// Planned path length in cells
    pub path_length: usize,
}

impl NavigationResult {
    fn blocked(failure: PathFailure) -> Self {
        Self {
            action: NavAction::Blocked,
            path_found: false,
            failure: Some(failure),
            distance_to_goal_cm: None,
            waypoint: None,
            heading_error_deg: None,
            path_length: 0,
        }
    }

    fn on_goal() -> Self {
        Self {
            action: NavAction::Arrived,
            path_found: true,
            failure: None,
            distance_to_goal_cm: Some(0.0),
            waypoint: None,
            heading_error_deg: None,
            path_length: 0,
        }
    }
}

/// Steering waypoint for a path: the cell at `min(lookahead, len - 1)`.
pub fn next_waypoint(
    grid: &OccupancyGrid,
    path: &[GridCoord],
    lookahead: usize,
) -> Option<WorldPoint> {
    let last = path.len().checked_sub(1)?;
    Some(grid.grid_to_world(path[lookahead.min(last)]))
}

/// Stateless navigation policy over a borrowed grid.
pub struct NavigationPolicy<'a> {
    grid: &'a OccupancyGrid,
    planner: AStarConfig,
    config: NavigationConfig,
}

impl<'a> NavigationPolicy<'a> {
    /// Create a policy
    pub fn new(grid: &'a OccupancyGrid, planner: AStarConfig, config: NavigationConfig) -> Self {
        Self {
            grid,
            planner,
            config,
        }
    }

    /// Decide the next action for a rover at `pose` heading to `goal` (cm).
    pub fn navigate(&self, pose: &Pose, goal: WorldPoint) -> NavigationResult {
        let planner = AStarPlanner::new(self.grid, self.planner);
        let path = match planner.find_path_world(pose.position(), goal) {
            Ok(path) => path,
            Err(failure) => return NavigationResult::blocked(failure),
        };

        let Some(waypoint) = next_waypoint(self.grid, &path, self.config.lookahead) else {
            return NavigationResult::on_goal();
        };

        let offset = waypoint - pose.position();
        let distance = pose.position().distance(&waypoint);
        let heading_error = heading_error_deg(bearing_deg(offset.x, offset.y), pose.heading);

        let action = if heading_error.abs() > self.config.heading_deadband_deg {
            if heading_error < 0.0 {
                NavAction::Turning(TurnDirection::Left)
            } else {
                NavAction::Turning(TurnDirection::Right)
            }
        } else if distance < self.config.arrival_distance_cm {
            NavAction::Arrived
        } else {
            NavAction::Advancing
        };

        trace!(
            "[Nav] {} waypoint=({:.1},{:.1}) dist={:.1}cm err={:.1}° path={}",
            action,
            waypoint.x,
            waypoint.y,
            distance,
            heading_error,
            path.len()
        );

        NavigationResult {
            action,
            path_found: true,
            failure: None,
            distance_to_goal_cm: Some(distance),
            waypoint: Some(waypoint),
            heading_error_deg: Some(heading_error),
            path_length: path.len(),
        }
    }
}
