//! Per-cell Wi-Fi signal strength layer.
//!
//! Independent of occupancy: a cell can carry a signal reading whether or
//! not it has been observed by the range sensors.

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;

/// Signal quality bands.
///
/// The dBm thresholds (-50 / -60 / -70 / -80) are shared with external
/// tools and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalBand {
    /// >= -50 dBm
    Excellent,
    /// >= -60 dBm
    Good,
    /// >= -70 dBm
    Fair,
    /// >= -80 dBm
    Weak,
    /// Below -80 dBm
    VeryWeak,
}

impl SignalBand {
    /// Classify a signal strength.
    pub fn from_dbm(dbm: i32) -> Self {
        match dbm {
            d if d >= -50 => SignalBand::Excellent,
            d if d >= -60 => SignalBand::Good,
            d if d >= -70 => SignalBand::Fair,
            d if d >= -80 => SignalBand::Weak,
            _ => SignalBand::VeryWeak,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            SignalBand::Excellent => "Excellent",
            SignalBand::Good => "Good",
            SignalBand::Fair => "Fair",
            SignalBand::Weak => "Weak",
            SignalBand::VeryWeak => "Very weak",
        }
    }

    /// Heat-map glyph
    pub fn glyph(self) -> char {
        match self {
            SignalBand::Excellent => '█',
            SignalBand::Good => '▓',
            SignalBand::Fair => '▒',
            SignalBand::Weak => '░',
            SignalBand::VeryWeak => '·',
        }
    }
}

impl std::fmt::Display for SignalBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional dBm value per grid cell, same dimensions as the occupancy grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WifiOverlay {
    cells: Vec<Option<i32>>,
    size: usize,
}

impl WifiOverlay {
    /// Create an empty overlay for a `size` x `size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![None; size * size],
            size,
        }
    }

    /// Cells along each side
    #[inline]
    pub fn grid_cells(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.size
            && (coord.y as usize) < self.size
        {
            Some(coord.y as usize * self.size + coord.x as usize)
        } else {
            None
        }
    }

    /// Stored reading at a cell
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<i32> {
        self.index(coord).and_then(|i| self.cells[i])
    }

    /// Record a reading at a cell.
    ///
    /// The first reading is stored as-is. Later readings average with the
    /// stored value, `floor((v + r) / 2)`, so older samples decay
    /// geometrically rather than forming a true mean.
    ///
    /// Returns the new stored value, or `None` if out of bounds.
    pub fn add_reading(&mut self, coord: GridCoord, dbm: i32) -> Option<i32> {
        let i = self.index(coord)?;
        let value = match self.cells[i] {
            None => dbm,
            Some(v) => (i64::from(v) + i64::from(dbm)).div_euclid(2) as i32,
        };
        self.cells[i] = Some(value);
        Some(value)
    }

    /// Cell with the strongest stored signal.
    ///
    /// Scans row-major; the first maximum wins.
    pub fn best_location(&self) -> Option<(GridCoord, i32)> {
        let mut best: Option<(usize, i32)> = None;
        for (i, value) in self.cells.iter().enumerate() {
            if let Some(v) = *value {
                if best.map_or(true, |(_, b)| v > b) {
                    best = Some((i, v));
                }
            }
        }
        best.map(|(i, v)| {
            (
                GridCoord::new((i % self.size) as i32, (i / self.size) as i32),
                v,
            )
        })
    }

    /// Number of cells with a reading
    pub fn reading_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate rows, southmost first
    pub fn rows(&self) -> impl Iterator<Item = &[Option<i32>]> {
        self.cells.chunks(self.size.max(1))
    }
}
