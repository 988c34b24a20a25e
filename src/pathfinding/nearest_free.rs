//! Nearest traversable cell search.

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// Search square rings around `center` for a free cell.
///
/// Rings of radius `1..max_radius` (exclusive) are scanned in order; within
/// a ring, columns are visited left to right and each column bottom to top.
/// The first free cell found is returned.
pub fn find_nearest_free_cell(
    grid: &OccupancyGrid,
    center: GridCoord,
    max_radius: u32,
) -> Option<GridCoord> {
    let max_radius = max_radius.min(i32::MAX as u32) as i32;

    for radius in 1..max_radius {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx.abs() != radius && dy.abs() != radius {
                    continue;
                }
                let cell = GridCoord::new(center.x + dx, center.y + dy);
                if grid.is_free(cell) {
                    return Some(cell);
                }
            }
        }
    }
    None
}
