//! A* planner over the occupancy grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use log::{debug, trace};

use crate::core::{GridCoord, WorldPoint};
use crate::grid::OccupancyGrid;

use super::nearest_free::find_nearest_free_cell;

/// A node in the A* search
#[derive(Clone, Copy, Debug)]
struct AStarNode {
    coord: GridCoord,
    g_cost: u32, // Cost from start
    h_cost: u32, // Manhattan distance to goal
}

impl AStarNode {
    #[inline]
    fn f_cost(&self) -> u32 {
        self.g_cost + self.h_cost
    }
}

impl Eq for AStarNode {}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior: lowest f, then lowest h,
        // then lowest (y, x) pops first
        other
            .f_cost()
            .cmp(&self.f_cost())
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            .then_with(|| other.coord.y.cmp(&self.coord.y))
            .then_with(|| other.coord.x.cmp(&self.coord.x))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* pathfinding configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AStarConfig {
    /// Ring search bound when the goal cell is occupied.
    /// Radii `1..max_search_radius` are tried.
    pub max_search_radius: u32,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            max_search_radius: 10,
        }
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// No path exists between start and goal
    NoPath,
    /// Goal is occupied and no free cell lies within the search bound
    NoFreeCellNearGoal,
}

impl std::fmt::Display for PathFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathFailure::NoPath => write!(f, "no path found"),
            PathFailure::NoFreeCellNearGoal => write!(f, "no free cell near goal"),
        }
    }
}

impl std::error::Error for PathFailure {}

/// A* pathfinder
///
/// 4-connected, uniform step cost, Manhattan heuristic. The start cell is
/// never checked for traversability (the rover is already there); every
/// other cell on the path satisfies [`OccupancyGrid::is_free`].
pub struct AStarPlanner<'a> {
    grid: &'a OccupancyGrid,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(grid: &'a OccupancyGrid, config: AStarConfig) -> Self {
        Self { grid, config }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a OccupancyGrid) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Find a path from start to goal (grid coordinates).
    ///
    /// The returned path excludes `start` and ends at the goal, or at the
    /// retargeted goal when the requested one is occupied. It is empty when
    /// start and goal coincide.
    pub fn find_path(&self, start: GridCoord, goal: GridCoord) -> Result<Vec<GridCoord>, PathFailure> {
        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{})",
            start.x,
            start.y,
            goal.x,
            goal.y
        );

        let goal = self.resolve_goal(goal)?;

        let mut open_set = BinaryHeap::new();
        let mut closed_set = HashSet::new();
        let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
        let mut g_scores: HashMap<GridCoord, u32> = HashMap::new();

        open_set.push(AStarNode {
            coord: start,
            g_cost: 0,
            h_cost: heuristic(start, goal),
        });
        g_scores.insert(start, 0);

        let mut nodes_expanded = 0usize;

        while let Some(current) = open_set.pop() {
            // Goal reached
            if current.coord == goal {
                let path = reconstruct_path(&came_from, goal);
                trace!(
                    "[AStar] SUCCESS: path length={} cells, nodes_expanded={}",
                    path.len(),
                    nodes_expanded
                );
                return Ok(path);
            }

            if !closed_set.insert(current.coord) {
                continue;
            }
            nodes_expanded += 1;

            for neighbor in current.coord.neighbors_4() {
                if closed_set.contains(&neighbor) || !self.grid.is_free(neighbor) {
                    continue;
                }

                let tentative_g = current.g_cost + 1;
                let known_g = g_scores.get(&neighbor).copied().unwrap_or(u32::MAX);
                if tentative_g < known_g {
                    came_from.insert(neighbor, current.coord);
                    g_scores.insert(neighbor, tentative_g);
                    open_set.push(AStarNode {
                        coord: neighbor,
                        g_cost: tentative_g,
                        h_cost: heuristic(neighbor, goal),
                    });
                }
            }
        }

        debug!(
            "[AStar] FAILED: NoPath after expanding {} nodes",
            nodes_expanded
        );
        Err(PathFailure::NoPath)
    }

    /// Find a path between world points (centimetres)
    pub fn find_path_world(
        &self,
        start: WorldPoint,
        goal: WorldPoint,
    ) -> Result<Vec<GridCoord>, PathFailure> {
        self.find_path(self.grid.world_to_grid(start), self.grid.world_to_grid(goal))
    }

    /// Keep a free goal; move an occupied one to the nearest free cell.
    fn resolve_goal(&self, goal: GridCoord) -> Result<GridCoord, PathFailure> {
        if self.grid.is_free(goal) {
            return Ok(goal);
        }

        match find_nearest_free_cell(self.grid, goal, self.config.max_search_radius) {
            Some(cell) => {
                debug!(
                    "[AStar] Goal ({},{}) blocked, retargeted to ({},{})",
                    goal.x, goal.y, cell.x, cell.y
                );
                Ok(cell)
            }
            None => {
                debug!(
                    "[AStar] FAILED: NoFreeCellNearGoal within radius {}",
                    self.config.max_search_radius
                );
                Err(PathFailure::NoFreeCellNearGoal)
            }
        }
    }
}

/// Manhattan distance
#[inline]
fn heuristic(from: GridCoord, to: GridCoord) -> u32 {
    from.manhattan_distance(&to).unsigned_abs()
}

/// Walk parents back from the goal; the start (which has no parent) is
/// left out.
fn reconstruct_path(came_from: &HashMap<GridCoord, GridCoord>, goal: GridCoord) -> Vec<GridCoord> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(current);
        current = prev;
    }
    path.reverse();
    path
}
