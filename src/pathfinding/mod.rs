//! Path planning on the occupancy grid.
//!
//! - **A* Search**: shortest 4-connected path through cells that are not
//!   occupied. Unknown cells are optimistically traversable, so a path is
//!   advisory and must be re-planned against fresh sensor data every tick.
//! - **Goal retargeting**: when the goal cell is occupied, the nearest free
//!   cell on an expanding square ring becomes the goal.
//!
//! ```rust,ignore
//! use kshetra_map::pathfinding::{AStarConfig, AStarPlanner};
//!
//! let planner = AStarPlanner::new(map.grid(), AStarConfig::default());
//! match planner.find_path(start, goal) {
//!     Ok(path) => println!("{} steps", path.len()),
//!     Err(reason) => println!("blocked: {}", reason),
//! }
//! ```

mod astar;
mod nearest_free;

pub use astar::{AStarConfig, AStarPlanner, PathFailure};
pub use nearest_free::find_nearest_free_cell;
