//! Frontier detection for exploration.
//!
//! A frontier cell is an unknown cell with at least one 4-adjacent explored
//! cell. The whole grid is scanned on every query, which is fine for the
//! few thousand cells a room-sized map holds.

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// Frontier queries over a borrowed grid.
pub struct FrontierSelector<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> FrontierSelector<'a> {
    /// Create a selector for a grid
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// Is this cell unknown with an explored 4-neighbour?
    pub fn is_frontier(&self, coord: GridCoord) -> bool {
        self.grid.is_unknown(coord)
            && coord
                .neighbors_4()
                .iter()
                .any(|&neighbor| self.grid.is_explored(neighbor))
    }

    /// All frontier cells in scan order (row by row, lowest row first).
    pub fn frontier_cells(&self) -> Vec<GridCoord> {
        self.scan().collect()
    }

    /// Frontier cell nearest to `from` by Manhattan distance.
    ///
    /// Ties go to the first cell in scan order. `None` means the grid is
    /// fully explored.
    pub fn nearest(&self, from: GridCoord) -> Option<GridCoord> {
        let mut best: Option<(i32, GridCoord)> = None;
        for cell in self.scan() {
            let distance = from.manhattan_distance(&cell);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, cell));
            }
        }
        best.map(|(_, cell)| cell)
    }

    fn scan(&self) -> impl Iterator<Item = GridCoord> + '_ {
        let size = self.grid.grid_cells() as i32;
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| GridCoord::new(x, y)))
            .filter(move |&coord| self.is_frontier(coord))
    }
}
