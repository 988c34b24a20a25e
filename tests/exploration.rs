//! Exploration Integration Tests
//!
//! Runs the exploration planner against a simulated walled room. The rover
//! executes each motion command through dead reckoning and the simulated
//! ultrasonic sensor marches along the true heading until it meets a wall.
//!
//! Checked properties:
//! - Explored cells never return to unknown
//! - Every selected frontier is unknown and borders explored space
//! - Forward commands are never issued with an obstacle inside the stop distance
//! - Wi-Fi samples taken along the way land in the overlay
//!
//! Run with: `cargo test --test exploration`

use kshetra_map::{
    ExplorationConfig, ExplorationPlanner, ExplorationStep, GridCoord, MapConfig, MovementType,
    OccupancyGrid, RoverMap, SensorSnapshot, SharedRoverMap, WorldPoint,
};

// ============================================================================
// Simulated room
// ============================================================================

/// Square room with walls `margin` cells in from the grid edge
struct Room {
    size: i32,
    margin: i32,
    cell_cm: f64,
}

impl Room {
    fn new(map: &RoverMap, margin: i32) -> Self {
        Self {
            size: map.grid().grid_cells() as i32,
            margin,
            cell_cm: map.grid().cell_size_cm(),
        }
    }

    fn is_wall(&self, x: f64, y: f64) -> bool {
        let cx = (x / self.cell_cm).floor() as i32;
        let cy = (y / self.cell_cm).floor() as i32;
        let lo = self.margin;
        let hi = self.size - 1 - self.margin;
        cx <= lo || cy <= lo || cx >= hi || cy >= hi
    }

    /// Distance to the first wall along `heading_deg`, capped at `max_cm`
    fn ultrasonic(&self, x: f64, y: f64, heading_deg: f64, max_cm: f64) -> f64 {
        let (sin, cos) = heading_deg.to_radians().sin_cos();
        let mut d = 0.0;
        while d < max_cm {
            if self.is_wall(x + d * sin, y + d * cos) {
                return d;
            }
            d += 1.0;
        }
        max_cm
    }

    fn sense(&self, map: &RoverMap) -> SensorSnapshot {
        let pose = map.pose();
        let distance = self.ultrasonic(pose.x, pose.y, pose.heading, 300.0);
        let ahead = |offset: f64| {
            let p = pose.project(offset, 15.0);
            self.is_wall(p.x, p.y)
        };
        SensorSnapshot::new(distance, ahead(-30.0), ahead(30.0))
            .with_wifi(self.signal(pose.x, pose.y))
    }

    /// Access point in the south-west corner, -1dBm per 10cm
    fn signal(&self, x: f64, y: f64) -> i32 {
        -30 - (x.hypot(y) / 10.0) as i32
    }
}

fn is_frontier(grid: &OccupancyGrid, cell: GridCoord) -> bool {
    grid.is_unknown(cell)
        && cell
            .neighbors_4()
            .iter()
            .any(|&n| grid.is_explored(n))
}

// ============================================================================
// Exploration loop
// ============================================================================

#[test]
fn test_exploration_loop_properties() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut map = RoverMap::with_defaults();
    let room = Room::new(&map, 5);
    let planner = ExplorationPlanner::new(ExplorationConfig::default());
    let stop_distance = planner.config().interlock.stop_distance_cm;

    let mut previous = map.grid().clone();
    let mut moves = 0;
    let mut first_explored = None;

    for _ in 0..200 {
        let sensors = room.sense(&map);
        let step = planner.step(&mut map, &sensors);

        // observed cells stay observed
        for (before, after) in previous.cells().iter().zip(map.grid().cells()) {
            assert!(*before == 0 || *after != 0);
        }
        previous = map.grid().clone();
        first_explored.get_or_insert(map.grid().counts().explored());

        match step {
            ExplorationStep::Complete => break,
            ExplorationStep::ReachedFrontier { frontier } => {
                let cell = map.grid().world_to_grid(frontier);
                assert!(map.grid().is_valid_coord(cell));
            }
            ExplorationStep::Move {
                frontier, command, ..
            } => {
                let cell = map.grid().world_to_grid(frontier);
                assert!(
                    is_frontier(map.grid(), cell),
                    "({},{}) is not a frontier",
                    cell.x,
                    cell.y
                );
                if command.movement == MovementType::Forward {
                    assert!(!sensors.ir_left && !sensors.ir_right);
                    assert!(
                        sensors.ultrasonic_cm <= 0.0 || sensors.ultrasonic_cm >= stop_distance
                    );
                }
                map.advance_odometry(command.movement, command.duration_sec, command.speed);
                moves += 1;
            }
        }
    }

    let stats = map.statistics();
    assert!(moves > 0);
    assert!(stats.scan_count > 0);
    assert!(stats.explored_cells > first_explored.unwrap_or(0));
    assert!(map.wifi().reading_count() > 0);
    assert!(map.best_wifi_location().is_some());
}

#[test]
fn test_first_scan_marks_corridor_and_wall() {
    let mut map = RoverMap::with_defaults();
    let room = Room::new(&map, 5);

    // wall row 44 starts at y=440, rover at y=250 heading north
    let sensors = room.sense(&map);
    assert_eq!(sensors.ultrasonic_cm, 190.0);

    ExplorationPlanner::default().step(&mut map, &sensors);
    // one hit is not yet enough to call the wall occupied
    let wall = map.grid().get(GridCoord::new(25, 44)).unwrap();
    let corridor = map.grid().get(GridCoord::new(25, 30)).unwrap();
    assert!(wall > corridor);
    assert!(!map.grid().is_occupied(GridCoord::new(25, 44)));
    assert!(map.grid().is_explored(GridCoord::new(25, 30)));
    assert!(map.grid().is_unknown(GridCoord::new(25, 46)));
}

#[test]
fn test_fully_explored_map_is_complete() {
    let mut map = RoverMap::new(MapConfig::with_grid(1.0, 10));
    for x in 0..10 {
        for y in 0..10 {
            map.grid_mut().set(GridCoord::new(x, y), 1);
        }
    }
    assert_eq!(map.nearest_frontier(), None);

    let step = ExplorationPlanner::default().step(&mut map, &SensorSnapshot::default());
    assert!(step.is_complete());
}

// ============================================================================
// Shared map across threads
// ============================================================================

#[test]
fn test_shared_map_sensor_and_planner_threads() {
    let shared = SharedRoverMap::new(RoverMap::with_defaults());

    let sensor = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            for i in 0..20 {
                shared.add_range_reading(50.0 + i as f64, 0.8);
                shared.add_wifi_reading(-60 + i);
            }
        })
    };
    let planner = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            (0..20)
                .map(|_| shared.navigate(WorldPoint::new(250.0, 400.0)))
                .count()
        })
    };

    sensor.join().unwrap();
    assert_eq!(planner.join().unwrap(), 20);

    let stats = shared.statistics();
    assert_eq!(stats.scan_count, 20);
    assert_eq!(shared.read().best_wifi_location().map(|(_, dbm)| dbm), Some(-42));
}
