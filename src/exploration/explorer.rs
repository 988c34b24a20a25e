//! Frontier exploration, one tick at a time.
//!
//! Each call to [`ExplorationPlanner::step`]:
//!
//! 1. Folds the tick's sensor snapshot (range, IR, Wi-Fi) into the map
//! 2. Picks the nearest frontier (none left means exploration is complete)
//! 3. Asks the navigation policy for an action toward it
//! 4. Turns that action into a timed [`MotionCommand`], applying the
//!    safety interlock to forward motion
//!
//! The planner never moves the rover. The caller executes the command and
//! reports it back through [`RoverMap::advance_odometry`].

use log::{debug, info};

use crate::core::WorldPoint;
use crate::grid::sensor_update::DEFAULT_RANGE_CONFIDENCE;
use crate::odometry::MovementType;
use crate::RoverMap;

use super::navigation::{NavAction, NavigationResult};
use super::safety::{SafetyInterlock, SensorSnapshot, StopReason};

/// Exploration behaviour settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplorationConfig {
    /// Cap every speed at `safe_mode_max_speed`
    pub safe_mode: bool,
    /// Speed cap applied in safe mode
    pub safe_mode_max_speed: u8,
    /// Forward drive speed (0-100)
    pub forward_speed: u8,
    /// Forward drive duration (s)
    pub forward_duration_sec: f64,
    /// In-place turn speed (0-100)
    pub turn_speed: u8,
    /// Heading correction turn duration (s)
    pub turn_duration_sec: f64,
    /// Escape turn when no path exists (s)
    pub blocked_turn_duration_sec: f64,
    /// Escape turn when the interlock vetoes forward motion (s)
    pub obstacle_turn_duration_sec: f64,
    /// Confidence given to ultrasonic range readings
    pub range_confidence: f64,
    /// Forward motion veto
    pub interlock: SafetyInterlock,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            safe_mode: true,
            safe_mode_max_speed: 40,
            forward_speed: 40,
            forward_duration_sec: 1.0,
            turn_speed: 50,
            turn_duration_sec: 0.5,
            blocked_turn_duration_sec: 1.5,
            obstacle_turn_duration_sec: 1.0,
            range_confidence: DEFAULT_RANGE_CONFIDENCE,
            interlock: SafetyInterlock::default(),
        }
    }
}

/// A timed motor command for the caller to execute
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionCommand {
    /// Motion to perform
    pub movement: MovementType,
    /// How long to run the motors (s)
    pub duration_sec: f64,
    /// Motor speed (0-100)
    pub speed: u8,
}

impl MotionCommand {
    /// Create a motion command
    pub fn new(movement: MovementType, duration_sec: f64, speed: u8) -> Self {
        Self {
            movement,
            duration_sec,
            speed,
        }
    }
}

/// Outcome of one exploration tick
#[derive(Clone, Debug, PartialEq)]
pub enum ExplorationStep {
    /// Execute `command`, then report it through odometry
    Move {
        /// Frontier being pursued (cm)
        frontier: WorldPoint,
        /// Navigation decision behind the command
        navigation: NavigationResult,
        /// Motor command to execute
        command: MotionCommand,
        /// Set when the interlock replaced a forward command
        vetoed: Option<StopReason>,
    },
    /// Reached the frontier; the next tick picks a new one
    ReachedFrontier {
        /// Frontier reached (cm)
        frontier: WorldPoint,
    },
    /// No frontier cells remain.
    ///
    /// A grid with no explored cell has no frontier either, so a fresh map
    /// whose first readings were all dropped also reports `Complete`.
    Complete,
}

impl ExplorationStep {
    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ExplorationStep::Move { .. } => "Move",
            ExplorationStep::ReachedFrontier { .. } => "ReachedFrontier",
            ExplorationStep::Complete => "Complete",
        }
    }

    /// Motor command, if this step moves the rover
    pub fn command(&self) -> Option<MotionCommand> {
        match self {
            ExplorationStep::Move { command, .. } => Some(*command),
            _ => None,
        }
    }

    /// Is exploration finished?
    pub fn is_complete(&self) -> bool {
        matches!(self, ExplorationStep::Complete)
    }
}

/// Per-tick frontier exploration policy.
#[derive(Clone, Debug, Default)]
pub struct ExplorationPlanner {
    config: ExplorationConfig,
}

impl ExplorationPlanner {
    /// Create a planner
    pub fn new(config: ExplorationConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &ExplorationConfig {
        &self.config
    }

    /// Integrate `sensors` into `map` and decide the next motion.
    pub fn step(&self, map: &mut RoverMap, sensors: &SensorSnapshot) -> ExplorationStep {
        map.add_range_reading(sensors.ultrasonic_cm, self.config.range_confidence);
        map.add_proximity_reading(sensors.ir_left, sensors.ir_right);
        if let Some(dbm) = sensors.wifi_dbm {
            map.add_wifi_reading(dbm);
        }

        let Some(frontier) = map.nearest_frontier() else {
            info!("[Explore] No frontiers left, exploration complete");
            return ExplorationStep::Complete;
        };

        let navigation = map.navigate(frontier);
        debug!(
            "[Explore] frontier=({:.0},{:.0}) action={}",
            frontier.x, frontier.y, navigation.action
        );

        let mut vetoed = None;
        let command = match navigation.action {
            NavAction::Arrived => {
                info!(
                    "[Explore] Reached frontier ({:.0},{:.0})",
                    frontier.x, frontier.y
                );
                return ExplorationStep::ReachedFrontier { frontier };
            }
            NavAction::Advancing => match self.config.interlock.check(sensors) {
                Some(reason) => {
                    info!("[Explore] Forward vetoed: {}", reason);
                    vetoed = Some(reason);
                    self.turn(
                        MovementType::TurnRight,
                        self.config.obstacle_turn_duration_sec,
                    )
                }
                None => MotionCommand::new(
                    MovementType::Forward,
                    self.config.forward_duration_sec,
                    self.limit_speed(self.config.forward_speed),
                ),
            },
            NavAction::Turning(direction) => {
                self.turn(direction.movement(), self.config.turn_duration_sec)
            }
            NavAction::Blocked => {
                debug!("[Explore] No path to frontier, turning away");
                self.turn(
                    MovementType::TurnRight,
                    self.config.blocked_turn_duration_sec,
                )
            }
        };

        ExplorationStep::Move {
            frontier,
            navigation,
            command,
            vetoed,
        }
    }

    fn turn(&self, movement: MovementType, duration_sec: f64) -> MotionCommand {
        MotionCommand::new(
            movement,
            duration_sec,
            self.limit_speed(self.config.turn_speed),
        )
    }

    fn limit_speed(&self, speed: u8) -> u8 {
        if self.config.safe_mode {
            speed.min(self.config.safe_mode_max_speed)
        } else {
            speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCoord;
    use crate::grid::MapConfig;

    fn map_facing_open_corridor() -> RoverMap {
        // rover at the centre of a 5m map, heading north
        RoverMap::new(MapConfig::default())
    }

    #[test]
    fn test_first_step_scans_and_moves() {
        let mut map = map_facing_open_corridor();
        let planner = ExplorationPlanner::default();

        let step = planner.step(&mut map, &SensorSnapshot::new(100.0, false, false));
        assert_eq!(map.statistics().scan_count, 1);
        assert!(step.command().is_some());
        assert_eq!(step.name(), "Move");
    }

    #[test]
    fn test_complete_when_fully_explored() {
        let mut map = map_facing_open_corridor();
        let size = map.grid().grid_cells() as i32;
        for x in 0..size {
            for y in 0..size {
                map.grid_mut().mark_cell(GridCoord::new(x, y), false, 0.3);
            }
        }
        let step = ExplorationPlanner::default().step(&mut map, &SensorSnapshot::default());
        assert!(step.is_complete());
        assert_eq!(step.command(), None);
    }

    #[test]
    fn test_interlock_replaces_forward() {
        let mut map = map_facing_open_corridor();
        // everything south of row 30 explored, so the frontier lies straight ahead
        let size = map.grid().grid_cells() as i32;
        for x in 0..size {
            for y in 0..30 {
                map.grid_mut().mark_cell(GridCoord::new(x, y), false, 0.3);
            }
        }

        let planner = ExplorationPlanner::default();
        let step = planner.step(&mut map, &SensorSnapshot::new(0.0, true, false));
        match step {
            ExplorationStep::Move {
                navigation,
                command,
                vetoed,
                ..
            } => {
                assert_eq!(navigation.action, NavAction::Advancing);
                assert_eq!(command.movement, MovementType::TurnRight);
                assert_eq!(command.duration_sec, 1.0);
                assert!(matches!(vetoed, Some(StopReason::Proximity { .. })));
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_forward_when_clear() {
        let mut map = map_facing_open_corridor();
        let size = map.grid().grid_cells() as i32;
        for x in 0..size {
            for y in 0..30 {
                map.grid_mut().mark_cell(GridCoord::new(x, y), false, 0.3);
            }
        }

        let step = ExplorationPlanner::default().step(&mut map, &SensorSnapshot::default());
        assert_eq!(
            step.command(),
            Some(MotionCommand::new(MovementType::Forward, 1.0, 40))
        );
        if let ExplorationStep::Move { frontier, .. } = step {
            assert_eq!(frontier, WorldPoint::new(250.0, 300.0));
        }
    }

    #[test]
    fn test_safe_mode_caps_turn_speed() {
        let planner = ExplorationPlanner::default();
        assert_eq!(planner.turn(MovementType::TurnLeft, 0.5).speed, 40);

        let unsafe_planner = ExplorationPlanner::new(ExplorationConfig {
            safe_mode: false,
            ..Default::default()
        });
        assert_eq!(unsafe_planner.turn(MovementType::TurnLeft, 0.5).speed, 50);
    }

    #[test]
    fn test_wifi_recorded_each_tick() {
        let mut map = map_facing_open_corridor();
        let planner = ExplorationPlanner::default();

        let sensors = SensorSnapshot::new(100.0, false, false).with_wifi(-62);
        planner.step(&mut map, &sensors);
        assert_eq!(map.wifi().reading_count(), 1);
        assert_eq!(map.wifi().get(map.rover_cell()), Some(-62));

        // ticks without a sample leave the layer alone
        planner.step(&mut map, &SensorSnapshot::new(100.0, false, false));
        assert_eq!(map.wifi().reading_count(), 1);
        assert_eq!(map.best_wifi_location().map(|(_, dbm)| dbm), Some(-62));
    }

    #[test]
    fn test_unobserved_map_reports_complete() {
        let mut map = map_facing_open_corridor();
        // no echo, no IR: nothing observed, so no frontier either
        let sensors = SensorSnapshot::new(-1.0, false, false);
        let step = ExplorationPlanner::default().step(&mut map, &sensors);

        assert!(step.is_complete());
        assert_eq!(map.statistics().explored_cells, 0);
    }
}
