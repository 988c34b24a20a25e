//! Grid storage for confidence values.

use crate::core::{GridCoord, WorldPoint};

use super::config::GridConfig;
use super::raycaster::BresenhamLine;

/// Confidence of a cell that has never been observed.
pub const UNKNOWN: u8 = 0;

/// Lowest confidence an observed cell can fall to.
pub const FREE_FLOOR: u8 = 1;

/// Cells at or above this confidence are treated as obstacles.
pub const OCCUPIED_THRESHOLD: u8 = 60;

/// Upper bound on cell confidence.
pub const MAX_CONFIDENCE: u8 = 100;

/// Confidence gained per unit of occupied evidence.
const OCCUPIED_GAIN: f64 = 20.0;

/// Confidence lost per unit of free evidence.
const FREE_GAIN: f64 = 10.0;

/// Cell counts by classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Cells never observed
    pub unknown: usize,
    /// Observed cells below the occupied threshold
    pub free: usize,
    /// Observed cells at or above the occupied threshold
    pub occupied: usize,
}

impl CellCounts {
    /// Total observed cells
    pub fn explored(&self) -> usize {
        self.free + self.occupied
    }

    /// Total number of cells
    pub fn total(&self) -> usize {
        self.unknown + self.explored()
    }
}

/// Fixed-size square occupancy grid.
///
/// The grid uses a coordinate system where:
/// - (0, 0) is at the world origin
/// - Positive X is east, positive Y is north
/// - Cell (x, y) covers world [x*size, (x+1)*size) × [y*size, (y+1)*size) in cm
///
/// Cells live in one contiguous buffer indexed by `y * width + x`. The grid
/// is allocated once and never resized.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    cells: Vec<u8>,
    config: GridConfig,
    /// Cells along each side
    size: usize,
}

impl OccupancyGrid {
    /// Create a grid with every cell unknown.
    pub fn new(config: GridConfig) -> Self {
        let size = config.grid_cells();
        Self {
            cells: vec![UNKNOWN; size * size],
            config,
            size,
        }
    }

    /// Rebuild a grid from a row-major buffer.
    ///
    /// Fails if the buffer length does not match the configuration or a
    /// value lies above [`MAX_CONFIDENCE`].
    pub fn from_cells(config: GridConfig, cells: Vec<u8>) -> Result<Self, String> {
        let size = config.grid_cells();
        if cells.len() != size * size {
            return Err(format!(
                "expected {} cells for a {}x{} grid, found {}",
                size * size,
                size,
                size,
                cells.len()
            ));
        }
        if let Some(bad) = cells.iter().find(|&&v| v > MAX_CONFIDENCE) {
            return Err(format!("cell value {} exceeds {}", bad, MAX_CONFIDENCE));
        }
        Ok(Self {
            cells,
            config,
            size,
        })
    }

    /// Grid configuration
    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Cells along each side
    #[inline]
    pub fn grid_cells(&self) -> usize {
        self.size
    }

    /// Cell side length in centimetres
    #[inline]
    pub fn cell_size_cm(&self) -> f64 {
        self.config.cell_size_cm as f64
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Raw row-major cell buffer
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate rows, southmost (y = 0) first
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Convert world coordinates (cm) to grid coordinates.
    ///
    /// Points outside the mapped extent are clamped onto the boundary cell.
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        let max = self.size.saturating_sub(1) as f64;
        let cell = self.cell_size_cm();
        let x = (point.x / cell).floor().clamp(0.0, max);
        let y = (point.y / cell).floor().clamp(0.0, max);
        GridCoord::new(x as i32, y as i32)
    }

    /// Convert grid coordinates to world coordinates (cell corner, cm)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        let cell = self.cell_size_cm();
        WorldPoint::new(coord.x as f64 * cell, coord.y as f64 * cell)
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.size
            && (coord.y as usize) < self.size
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.size + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert flat array index to grid coordinates
    #[inline]
    pub fn index_to_coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.size) as i32, (index / self.size) as i32)
    }

    /// Confidence value at a cell
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<u8> {
        self.coord_to_index(coord).map(|i| self.cells[i])
    }

    /// Overwrite a cell's confidence (clamped to [0, 100]).
    ///
    /// Returns false if the coordinate is out of bounds.
    pub fn set(&mut self, coord: GridCoord, value: u8) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => {
                self.cells[i] = value.min(MAX_CONFIDENCE);
                true
            }
            None => false,
        }
    }

    /// Apply one observation to a cell.
    ///
    /// - occupied: `value = min(100, value + floor(confidence * 20))`
    /// - free: `value = max(1, value - floor(confidence * 10))`
    ///
    /// Out-of-bounds coordinates are ignored (returns false).
    pub fn mark_cell(&mut self, coord: GridCoord, occupied: bool, confidence: f64) -> bool {
        let Some(i) = self.coord_to_index(coord) else {
            return false;
        };
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let value = self.cells[i];
        self.cells[i] = if occupied {
            let delta = (confidence * OCCUPIED_GAIN).floor() as u8;
            value.saturating_add(delta).min(MAX_CONFIDENCE)
        } else {
            let delta = (confidence * FREE_GAIN).floor() as u8;
            value.saturating_sub(delta).max(FREE_FLOOR)
        };
        true
    }

    /// Mark every cell on the line `from` → `to` (both inclusive) as free.
    ///
    /// Returns the number of in-bounds cells marked.
    pub fn cast_ray(&mut self, from: GridCoord, to: GridCoord, confidence: f64) -> usize {
        BresenhamLine::new(from, to)
            .filter(|&coord| self.mark_cell(coord, false, confidence))
            .count()
    }

    /// Traversable for planning: in bounds and below the occupied threshold.
    ///
    /// Unknown cells count as free; out-of-bounds cells never do.
    #[inline]
    pub fn is_free(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some_and(|v| v < OCCUPIED_THRESHOLD)
    }

    /// At or above the occupied threshold
    #[inline]
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some_and(|v| v >= OCCUPIED_THRESHOLD)
    }

    /// Never observed
    #[inline]
    pub fn is_unknown(&self, coord: GridCoord) -> bool {
        self.get(coord) == Some(UNKNOWN)
    }

    /// Observed at least once
    #[inline]
    pub fn is_explored(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some_and(|v| v > UNKNOWN)
    }

    /// Count cells by classification
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &v in &self.cells {
            match v {
                UNKNOWN => counts.unknown += 1,
                v if v >= OCCUPIED_THRESHOLD => counts.occupied += 1,
                _ => counts.free += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_10x10() -> OccupancyGrid {
        // 1m at 10cm cells
        OccupancyGrid::new(GridConfig::new(1.0, 10))
    }

    #[test]
    fn test_new_grid_unknown() {
        let grid = grid_10x10();
        assert_eq!(grid.grid_cells(), 10);
        assert_eq!(grid.cell_count(), 100);
        assert!(grid.cells().iter().all(|&v| v == UNKNOWN));
        assert_eq!(grid.counts().unknown, 100);
    }

    #[test]
    fn test_world_to_grid_clamps() {
        let grid = grid_10x10();
        assert_eq!(grid.world_to_grid(WorldPoint::new(25.0, 99.9)), GridCoord::new(2, 9));
        assert_eq!(grid.world_to_grid(WorldPoint::new(-40.0, 5.0)), GridCoord::new(0, 0));
        assert_eq!(
            grid.world_to_grid(WorldPoint::new(1000.0, 150.0)),
            GridCoord::new(9, 9)
        );
    }

    #[test]
    fn test_round_trip_within_one_cell() {
        let grid = grid_10x10();
        for &(x, y) in &[(0.0, 0.0), (3.3, 97.2), (45.0, 45.0), (99.99, 10.01)] {
            let p = WorldPoint::new(x, y);
            let back = grid.grid_to_world(grid.world_to_grid(p));
            assert!((back.x - x).abs() < grid.cell_size_cm());
            assert!((back.y - y).abs() < grid.cell_size_cm());
        }
    }

    #[test]
    fn test_index_layout() {
        let grid = grid_10x10();
        assert_eq!(grid.coord_to_index(GridCoord::new(3, 2)), Some(23));
        assert_eq!(grid.index_to_coord(23), GridCoord::new(3, 2));
        assert_eq!(grid.coord_to_index(GridCoord::new(10, 0)), None);
        assert_eq!(grid.coord_to_index(GridCoord::new(0, -1)), None);
    }

    #[test]
    fn test_mark_occupied_saturates() {
        let mut grid = grid_10x10();
        let c = GridCoord::new(4, 4);

        grid.mark_cell(c, true, 0.8);
        assert_eq!(grid.get(c), Some(16));

        for _ in 0..20 {
            grid.mark_cell(c, true, 1.0);
        }
        assert_eq!(grid.get(c), Some(MAX_CONFIDENCE));
    }

    #[test]
    fn test_mark_free_floors_at_one() {
        let mut grid = grid_10x10();
        let c = GridCoord::new(4, 4);

        grid.mark_cell(c, false, 0.3);
        assert_eq!(grid.get(c), Some(FREE_FLOOR));

        grid.set(c, 50);
        grid.mark_cell(c, false, 0.7);
        assert_eq!(grid.get(c), Some(43));

        for _ in 0..20 {
            grid.mark_cell(c, false, 1.0);
        }
        assert_eq!(grid.get(c), Some(FREE_FLOOR));
    }

    #[test]
    fn test_zero_confidence_free_still_explores() {
        let mut grid = grid_10x10();
        let c = GridCoord::new(1, 1);
        grid.mark_cell(c, false, 0.0);
        assert!(grid.is_explored(c));
    }

    #[test]
    fn test_mark_out_of_bounds_ignored() {
        let mut grid = grid_10x10();
        assert!(!grid.mark_cell(GridCoord::new(-1, 3), true, 1.0));
        assert!(!grid.mark_cell(GridCoord::new(3, 10), true, 1.0));
        assert_eq!(grid.counts().explored(), 0);
    }

    #[test]
    fn test_cast_ray_gapless() {
        let mut grid = grid_10x10();
        let marked = grid.cast_ray(GridCoord::new(0, 0), GridCoord::new(5, 5), 0.3);
        assert_eq!(marked, 6);

        for i in 0..=5 {
            assert_eq!(grid.get(GridCoord::new(i, i)), Some(FREE_FLOOR));
        }
        assert_eq!(grid.counts().explored(), 6);
    }

    #[test]
    fn test_is_free_semantics() {
        let mut grid = grid_10x10();
        let c = GridCoord::new(2, 2);

        assert!(grid.is_free(c)); // unknown is optimistic
        grid.set(c, 59);
        assert!(grid.is_free(c));
        grid.set(c, 60);
        assert!(!grid.is_free(c));
        assert!(grid.is_occupied(c));

        assert!(!grid.is_free(GridCoord::new(-1, 0)));
        assert!(!grid.is_free(GridCoord::new(0, 10)));
    }

    #[test]
    fn test_from_cells_validation() {
        let config = GridConfig::new(1.0, 10);
        assert!(OccupancyGrid::from_cells(config, vec![0; 99]).is_err());
        assert!(OccupancyGrid::from_cells(config, vec![101; 100]).is_err());

        let grid = OccupancyGrid::from_cells(config, vec![42; 100]);
        assert!(grid.is_ok());
    }

    #[test]
    fn test_rows() {
        let mut grid = grid_10x10();
        grid.set(GridCoord::new(7, 3), 77);
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[3][7], 77);
    }
}
