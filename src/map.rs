//! The rover's map instance: grid, Wi-Fi layer, pose and odometry.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use log::{debug, trace};

use crate::config::KshetraConfig;
use crate::core::{GridCoord, Pose, WorldPoint};
use crate::error::Result;
use crate::exploration::{next_waypoint, FrontierSelector, NavigationPolicy, NavigationResult};
use crate::grid::sensor_update::{update_from_proximity, update_from_range, ProximityHits};
use crate::grid::{MapConfig, OccupancyGrid, WifiOverlay};
use crate::io::ascii::{render, RenderLayer};
use crate::io::snapshot::{load_snapshot, save_snapshot, snapshot_file_name, MapSnapshot};
use crate::odometry::{MovementType, OdometryIntegrator};
use crate::pathfinding::{AStarPlanner, PathFailure};
use crate::{MapStatistics, RoverPosition};

/// Local occupancy map owned by one control loop.
///
/// The grid is allocated once at construction with every cell unknown and
/// is never resized. The pose starts at the centre of the mapped square,
/// heading north.
#[derive(Clone, Debug)]
pub struct RoverMap {
    config: MapConfig,
    grid: OccupancyGrid,
    wifi: WifiOverlay,
    pose: Pose,
    odometry: OdometryIntegrator,
    scan_count: u64,
    created: DateTime<Utc>,
}

impl RoverMap {
    /// Create an empty map
    pub fn new(config: MapConfig) -> Self {
        let grid = OccupancyGrid::new(config.grid);
        let wifi = WifiOverlay::new(grid.grid_cells());
        let center = (grid.grid_cells() / 2) as f64 * grid.cell_size_cm();

        debug!(
            "[Map] Created {}x{} grid ({}m, {}cm cells)",
            grid.grid_cells(),
            grid.grid_cells(),
            config.grid.size_meters,
            config.grid.cell_size_cm
        );

        Self {
            odometry: OdometryIntegrator::new(config.calibration),
            pose: Pose::new(center, center, 0.0),
            config,
            grid,
            wifi,
            scan_count: 0,
            created: Utc::now(),
        }
    }

    /// Create with default configuration (5m square, 10cm cells)
    pub fn with_defaults() -> Self {
        Self::new(MapConfig::default())
    }

    /// Create from a loaded configuration file
    pub fn from_config(config: &KshetraConfig) -> Self {
        Self::new(config.to_map_config())
    }

    /// Map configuration
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Occupancy grid
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Mutable occupancy grid
    pub fn grid_mut(&mut self) -> &mut OccupancyGrid {
        &mut self.grid
    }

    /// Wi-Fi layer
    pub fn wifi(&self) -> &WifiOverlay {
        &self.wifi
    }

    /// Current pose estimate
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Dead-reckoning state and movement log
    pub fn odometry(&self) -> &OdometryIntegrator {
        &self.odometry
    }

    /// Mutable dead-reckoning state (e.g. to recalibrate)
    pub fn odometry_mut(&mut self) -> &mut OdometryIntegrator {
        &mut self.odometry
    }

    /// Accepted range readings so far
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    /// When the map was first created
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Grid cell under the rover
    pub fn rover_cell(&self) -> GridCoord {
        self.grid.world_to_grid(self.pose.position())
    }

    /// Apply an executed motor command to the pose estimate.
    pub fn advance_odometry(&mut self, movement: MovementType, duration_sec: f64, speed: u8) -> Pose {
        self.pose = self
            .odometry
            .advance(self.pose, movement, duration_sec, speed);
        self.pose
    }

    /// Integrate an ultrasonic reading along the current heading.
    ///
    /// Returns false when the reading was outside the sensor window and
    /// dropped.
    pub fn add_range_reading(&mut self, distance_cm: f64, confidence: f64) -> bool {
        let accepted = update_from_range(
            &mut self.grid,
            &self.pose,
            distance_cm,
            confidence,
            &self.config.sensor,
        )
        .is_some();
        if accepted {
            self.scan_count += 1;
        }
        accepted
    }

    /// Integrate IR proximity flags. Returns the number of cells marked.
    pub fn add_proximity_reading(&mut self, left: bool, right: bool) -> usize {
        update_from_proximity(
            &mut self.grid,
            &self.pose,
            ProximityHits::new(left, right),
            &self.config.sensor,
        )
        .len()
    }

    /// Record Wi-Fi signal strength at the rover's cell.
    pub fn add_wifi_reading(&mut self, dbm: i32) -> Option<i32> {
        let cell = self.rover_cell();
        let value = self.wifi.add_reading(cell, dbm);
        trace!("[Map] Wi-Fi {}dBm at ({},{})", dbm, cell.x, cell.y);
        value
    }

    /// Plan from the rover's cell to `goal` (cm).
    ///
    /// The path excludes the rover's cell and is empty when the rover is
    /// already on the goal cell.
    pub fn find_path(&self, goal: WorldPoint) -> std::result::Result<Vec<GridCoord>, PathFailure> {
        AStarPlanner::new(&self.grid, self.config.planner).find_path_world(self.pose.position(), goal)
    }

    /// Steering waypoint for a path
    pub fn next_waypoint(&self, path: &[GridCoord], lookahead: usize) -> Option<WorldPoint> {
        next_waypoint(&self.grid, path, lookahead)
    }

    /// Decide the next action toward `goal` (cm). Reads the map only.
    pub fn navigate(&self, goal: WorldPoint) -> NavigationResult {
        NavigationPolicy::new(&self.grid, self.config.planner, self.config.navigation)
            .navigate(&self.pose, goal)
    }

    /// Nearest frontier cell (corner, cm), or `None` when fully explored
    pub fn nearest_frontier(&self) -> Option<WorldPoint> {
        FrontierSelector::new(&self.grid)
            .nearest(self.rover_cell())
            .map(|cell| self.grid.grid_to_world(cell))
    }

    /// Strongest recorded Wi-Fi signal and where it was measured
    pub fn best_wifi_location(&self) -> Option<(WorldPoint, i32)> {
        self.wifi
            .best_location()
            .map(|(cell, dbm)| (self.grid.grid_to_world(cell), dbm))
    }

    /// Derived map statistics
    pub fn statistics(&self) -> MapStatistics {
        let counts = self.grid.counts();
        let total = counts.total();
        let explored = counts.explored();
        let explored_percent = if total == 0 {
            0.0
        } else {
            round_to(explored as f64 / total as f64 * 100.0, 1)
        };
        let distance_cm = self.odometry.total_distance_cm();

        MapStatistics {
            total_cells: total,
            explored_cells: explored,
            explored_percent,
            occupied_cells: counts.occupied,
            rover_position: RoverPosition {
                x_cm: round_to(self.pose.x, 1),
                y_cm: round_to(self.pose.y, 1),
                heading_deg: round_to(self.pose.heading, 1),
            },
            distance_traveled_cm: round_to(distance_cm, 1),
            distance_traveled_m: round_to(distance_cm / 100.0, 2),
            scan_count: self.scan_count,
        }
    }

    /// Text view of one layer
    pub fn render_ascii(&self, width: usize, layer: RenderLayer) -> String {
        render(&self.grid, &self.wifi, &self.pose, width, layer)
    }

    /// Capture grid, pose and metadata
    pub fn to_snapshot(&self) -> MapSnapshot {
        MapSnapshot::new(
            &self.grid,
            self.pose,
            self.created.to_rfc3339(),
            Some(self.statistics()),
        )
    }

    /// Rebuild a map from a snapshot with default non-grid settings
    pub fn from_snapshot(snapshot: &MapSnapshot) -> Result<Self> {
        Self::from_snapshot_with(snapshot, MapConfig::default())
    }

    /// Rebuild a map from a snapshot.
    ///
    /// The grid dimensions come from the snapshot; everything else from
    /// `config`. Travelled distance and scan count are carried over from
    /// the saved statistics when present.
    pub fn from_snapshot_with(snapshot: &MapSnapshot, config: MapConfig) -> Result<Self> {
        let grid = snapshot.to_grid()?;
        let pose = snapshot.pose()?;

        let config = MapConfig {
            grid: *grid.config(),
            ..config
        };
        let mut map = Self::new(config);
        map.grid = grid;
        map.pose = pose;

        if let Ok(created) = DateTime::parse_from_rfc3339(&snapshot.metadata.created) {
            map.created = created.with_timezone(&Utc);
        }
        if let Some(stats) = &snapshot.statistics {
            map.odometry
                .set_total_distance_cm(stats.distance_traveled_cm);
            map.scan_count = stats.scan_count;
        }

        Ok(map)
    }

    /// Save a snapshot as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        save_snapshot(&self.to_snapshot(), path)
    }

    /// Save into `dir` under a name stamped with the local time.
    ///
    /// The directory is created if missing. Returns the written path.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(snapshot_file_name(Local::now().naive_local()));
        self.save(&path)?;
        Ok(path)
    }

    /// Load a map saved with [`RoverMap::save`]
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_snapshot(&load_snapshot(path)?)
    }
}

impl Default for RoverMap {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MAX_CONFIDENCE;

    #[test]
    fn test_initial_state() {
        let map = RoverMap::with_defaults();
        assert_eq!(map.grid().grid_cells(), 50);
        assert_eq!(map.pose(), Pose::new(250.0, 250.0, 0.0));
        assert_eq!(map.rover_cell(), GridCoord::new(25, 25));

        let stats = map.statistics();
        assert_eq!(stats.total_cells, 2500);
        assert_eq!(stats.explored_cells, 0);
        assert_eq!(stats.scan_count, 0);
    }

    #[test]
    fn test_odd_grid_centre() {
        let map = RoverMap::new(MapConfig::with_grid(2.5, 10));
        // 25 cells, centre index 12
        assert_eq!(map.pose().x, 120.0);
        assert_eq!(map.rover_cell(), GridCoord::new(12, 12));
    }

    #[test]
    fn test_scan_count_only_accepted() {
        let mut map = RoverMap::with_defaults();
        assert!(map.add_range_reading(100.0, 0.8));
        assert!(!map.add_range_reading(1.0, 0.8));
        assert!(!map.add_range_reading(500.0, 0.8));
        assert_eq!(map.scan_count(), 1);
    }

    #[test]
    fn test_statistics() {
        let mut map = RoverMap::new(MapConfig::with_grid(1.0, 10));
        map.grid_mut().set(GridCoord::new(0, 0), MAX_CONFIDENCE);
        map.grid_mut().set(GridCoord::new(1, 0), 60);
        map.grid_mut().set(GridCoord::new(2, 0), 10);
        map.advance_odometry(MovementType::Forward, 1.0, 50);

        let stats = map.statistics();
        assert_eq!(stats.explored_cells, 3);
        assert_eq!(stats.occupied_cells, 2);
        assert_eq!(stats.explored_percent, 3.0);
        assert_eq!(stats.distance_traveled_cm, 15.0);
        assert_eq!(stats.distance_traveled_m, 0.15);
        assert_eq!(stats.rover_position.y_cm, 65.0);
    }

    #[test]
    fn test_wifi_at_rover_cell() {
        let mut map = RoverMap::with_defaults();
        map.add_wifi_reading(-70);
        map.advance_odometry(MovementType::Forward, 1.0, 100);
        map.add_wifi_reading(-48);

        let (at, dbm) = map.best_wifi_location().unwrap();
        assert_eq!(dbm, -48);
        assert_eq!(at, WorldPoint::new(250.0, 280.0));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut map = RoverMap::with_defaults();
        map.add_range_reading(120.0, 0.8);
        map.advance_odometry(MovementType::TurnRight, 0.5, 60);
        map.advance_odometry(MovementType::Forward, 2.0, 40);

        let restored = RoverMap::from_snapshot(&map.to_snapshot()).unwrap();
        assert_eq!(restored.grid(), map.grid());
        assert_eq!(restored.pose(), map.pose());
        assert_eq!(restored.scan_count(), 1);
        assert_eq!(
            restored.statistics().distance_traveled_cm,
            map.statistics().distance_traveled_cm
        );
    }
}
