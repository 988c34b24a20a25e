//! Bresenham line tracing between grid cells.
//!
//! Range readings clear every cell between the rover and the echo:
//!
//! ```text
//! From (0,0) to (6,2):
//!
//!     2 │          ●●
//!     1 │     ●●●
//!     0 ●●
//!       └──────────────
//!        0 1 2 3 4 5 6
//! ```
//!
//! The traced line is 8-connected, contains both endpoints, and never
//! skips a cell along its major axis.

use crate::core::GridCoord;

/// Iterator over the cells of a line from `start` to `end` (inclusive).
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    x_step: i32,
    y_step: i32,
    error: i32,
    /// Major axis is Y; x/y are swapped internally
    steep: bool,
    end_x: i32,
    end_y: i32,
    finished: bool,
}

impl BresenhamLine {
    /// Trace a line between two cells.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let steep = (end.y - start.y).abs() > (end.x - start.x).abs();

        let (x, y, end_x, end_y) = if steep {
            (start.y, start.x, end.y, end.x)
        } else {
            (start.x, start.y, end.x, end.y)
        };
        let dx = (end_x - x).abs();
        let dy = (end_y - y).abs();

        Self {
            x,
            y,
            dx,
            dy,
            x_step: if end_x >= x { 1 } else { -1 },
            y_step: if end_y >= y { 1 } else { -1 },
            error: dx / 2,
            steep,
            end_x,
            end_y,
            finished: false,
        }
    }

    /// Cells remaining, including the current one
    fn remaining(&self) -> usize {
        if self.finished {
            0
        } else {
            (self.end_x - self.x).unsigned_abs() as usize + 1
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        if self.finished {
            return None;
        }

        let cell = if self.steep {
            GridCoord::new(self.y, self.x)
        } else {
            GridCoord::new(self.x, self.y)
        };

        if self.x == self.end_x {
            self.finished = true;
            return Some(cell);
        }

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_step;
            self.error += self.dx;
        }
        self.x += self.x_step;

        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for BresenhamLine {}

/// Collect the cells of a ray, both endpoints included.
pub fn cells_along_ray(start: GridCoord, end: GridCoord) -> Vec<GridCoord> {
    BresenhamLine::new(start, end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_8_connected(cells: &[GridCoord]) -> bool {
        cells
            .windows(2)
            .all(|w| (w[1].x - w[0].x).abs() <= 1 && (w[1].y - w[0].y).abs() <= 1)
    }

    #[test]
    fn test_line_horizontal() {
        let cells = cells_along_ray(GridCoord::new(1, 3), GridCoord::new(6, 3));
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| c.y == 3));
        assert_eq!(cells[5], GridCoord::new(6, 3));
    }

    #[test]
    fn test_line_vertical_down() {
        let cells = cells_along_ray(GridCoord::new(2, 7), GridCoord::new(2, 1));
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0], GridCoord::new(2, 7));
        assert_eq!(cells[6], GridCoord::new(2, 1));
    }

    #[test]
    fn test_line_diagonal() {
        let cells = cells_along_ray(GridCoord::new(0, 0), GridCoord::new(5, 5));
        let expected: Vec<_> = (0..=5).map(|i| GridCoord::new(i, i)).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_line_shallow_and_steep_are_gapless() {
        let pairs = [
            (GridCoord::new(0, 0), GridCoord::new(7, 3)),
            (GridCoord::new(0, 0), GridCoord::new(2, 9)),
            (GridCoord::new(8, 1), GridCoord::new(-3, 4)),
            (GridCoord::new(4, 9), GridCoord::new(1, -2)),
        ];
        for (start, end) in pairs {
            let cells = cells_along_ray(start, end);
            let major = (end.x - start.x).abs().max((end.y - start.y).abs()) as usize;
            assert_eq!(cells.len(), major + 1);
            assert_eq!(cells.first(), Some(&start));
            assert_eq!(cells.last(), Some(&end));
            assert!(is_8_connected(&cells));
        }
    }

    #[test]
    fn test_single_cell() {
        let c = GridCoord::new(4, 4);
        assert_eq!(cells_along_ray(c, c), vec![c]);
    }

    #[test]
    fn test_exact_size() {
        let line = BresenhamLine::new(GridCoord::new(0, 0), GridCoord::new(9, 4));
        assert_eq!(line.len(), 10);
    }
}
