//! Fixed-width text rendering of the map.
//!
//! The grid is downsampled by `max(1, grid_cells / width)` and drawn north
//! up (highest row first). The rover is drawn with a heading arrow.
//!
//! Occupancy layer:
//!
//! ```text
//! ?  unknown (0)
//! .  free (1-29)
//! ·  ambiguous (30-59)
//! #  occupied (60-100)
//! ```
//!
//! The Wi-Fi layer uses [`SignalBand`] glyphs; cells without a reading are `?`.

use crate::core::{GridCoord, Pose};
use crate::grid::{OccupancyGrid, SignalBand, WifiOverlay, OCCUPIED_THRESHOLD, UNKNOWN};

/// Confidence below which an observed cell is drawn as clearly free
const CLEAR_BELOW: u8 = 30;

/// Which layer to draw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderLayer {
    /// Occupancy confidence
    #[default]
    Occupancy,
    /// Wi-Fi signal heat map
    Wifi,
}

impl RenderLayer {
    /// One-line legend for the layer
    pub fn legend(self) -> &'static str {
        match self {
            RenderLayer::Occupancy => "^ = Rover  # = Obstacle  · = Unsure  . = Free  ? = Unknown",
            RenderLayer::Wifi => {
                "█ = Excellent  ▓ = Good  ▒ = Fair  ░ = Weak  · = Very weak  ? = No data"
            }
        }
    }
}

/// Glyph for an occupancy value
pub fn occupancy_glyph(value: u8) -> char {
    match value {
        UNKNOWN => '?',
        v if v < CLEAR_BELOW => '.',
        v if v < OCCUPIED_THRESHOLD => '·',
        _ => '#',
    }
}

/// Glyph for an optional Wi-Fi reading
pub fn wifi_glyph(dbm: Option<i32>) -> char {
    dbm.map_or('?', |d| SignalBand::from_dbm(d).glyph())
}

/// Render one layer as text, one line per sampled row.
pub fn render(
    grid: &OccupancyGrid,
    wifi: &WifiOverlay,
    pose: &Pose,
    width: usize,
    layer: RenderLayer,
) -> String {
    let size = grid.grid_cells();
    let scale = (size / width.max(1)).max(1);
    let rover = grid.world_to_grid(pose.position());
    let near_rover =
        |c: GridCoord| (c.x - rover.x).abs() < scale as i32 && (c.y - rover.y).abs() < scale as i32;

    let rows: Vec<usize> = (0..size).step_by(scale).collect();
    let mut lines = Vec::with_capacity(rows.len());

    for &y in rows.iter().rev() {
        let line: String = (0..size)
            .step_by(scale)
            .map(|x| {
                let coord = GridCoord::new(x as i32, y as i32);
                if near_rover(coord) {
                    pose.direction_glyph()
                } else {
                    match layer {
                        RenderLayer::Occupancy => {
                            occupancy_glyph(grid.get(coord).unwrap_or(UNKNOWN))
                        }
                        RenderLayer::Wifi => wifi_glyph(wifi.get(coord)),
                    }
                }
            })
            .collect();
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    fn setup() -> (OccupancyGrid, WifiOverlay) {
        let grid = OccupancyGrid::new(GridConfig::new(1.0, 10));
        let wifi = WifiOverlay::new(grid.grid_cells());
        (grid, wifi)
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(occupancy_glyph(0), '?');
        assert_eq!(occupancy_glyph(1), '.');
        assert_eq!(occupancy_glyph(29), '.');
        assert_eq!(occupancy_glyph(30), '·');
        assert_eq!(occupancy_glyph(59), '·');
        assert_eq!(occupancy_glyph(60), '#');
        assert_eq!(wifi_glyph(None), '?');
        assert_eq!(wifi_glyph(Some(-45)), '█');
        assert_eq!(wifi_glyph(Some(-90)), '·');
    }

    #[test]
    fn test_render_full_resolution() {
        let (mut grid, wifi) = setup();
        grid.set(GridCoord::new(0, 9), 100); // north-west corner
        grid.set(GridCoord::new(9, 0), 5); // south-east corner
        let pose = Pose::new(55.0, 55.0, 90.0);

        let text = render(&grid, &wifi, &pose, 40, RenderLayer::Occupancy);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
        assert!(lines[0].starts_with('#'));
        assert!(lines[9].ends_with('.'));
        // rover cell (5,5) is row index 9 - 5 = 4
        assert_eq!(lines[4].chars().nth(5), Some('>'));
    }

    #[test]
    fn test_render_downsampled() {
        let (grid, wifi) = setup();
        let pose = Pose::new(0.0, 0.0, 0.0);
        let text = render(&grid, &wifi, &pose, 5, RenderLayer::Occupancy);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 5));
    }

    #[test]
    fn test_render_wifi() {
        let (grid, mut wifi) = setup();
        wifi.add_reading(GridCoord::new(2, 9), -65);
        let pose = Pose::new(55.0, 55.0, 0.0);

        let text = render(&grid, &wifi, &pose, 10, RenderLayer::Wifi);
        let first: Vec<char> = text.lines().next().unwrap().chars().collect();
        assert_eq!(first[2], '▒');
        assert_eq!(first[0], '?');
    }
}
