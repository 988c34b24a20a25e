//! JSON map snapshots.
//!
//! One document per snapshot:
//!
//! ```json
//! {
//!   "metadata": { "created": "...", "grid_size_meters": 5.0,
//!                 "cell_size_cm": 10, "grid_cells": 50 },
//!   "rover_pose": { "x": 250.0, "y": 250.0, "heading": 0.0 },
//!   "statistics": { ... },
//!   "grid": [[0, 0, ...], ...]
//! }
//! ```
//!
//! `grid[y][x]` holds the cell confidence; row 0 is the southmost row.
//! Statistics are informational and recomputed from the grid on load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::Pose;
use crate::error::{MapError, Result};
use crate::grid::{GridConfig, OccupancyGrid};
use crate::MapStatistics;

/// File name prefix of saved maps
pub const SNAPSHOT_PREFIX: &str = "rover_map_";

/// File name extension of saved maps
pub const SNAPSHOT_EXTENSION: &str = "json";

/// Snapshot metadata block
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Creation timestamp (RFC 3339 when written by this crate)
    #[serde(default)]
    pub created: String,
    /// Side length of the mapped square (meters)
    pub grid_size_meters: f64,
    /// Cell side length (cm)
    pub cell_size_cm: u32,
    /// Cells along each side
    pub grid_cells: usize,
}

/// Complete persisted map state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Grid dimensions and creation time
    pub metadata: SnapshotMetadata,
    /// Rover pose at save time
    pub rover_pose: Pose,
    /// Statistics at save time
    #[serde(default)]
    pub statistics: Option<MapStatistics>,
    /// Row-major nested confidence grid
    pub grid: Vec<Vec<u8>>,
}

impl MapSnapshot {
    /// Capture a grid and pose
    pub fn new(
        grid: &OccupancyGrid,
        pose: Pose,
        created: String,
        statistics: Option<MapStatistics>,
    ) -> Self {
        let config = grid.config();
        Self {
            metadata: SnapshotMetadata {
                created,
                grid_size_meters: config.size_meters,
                cell_size_cm: config.cell_size_cm,
                grid_cells: grid.grid_cells(),
            },
            rover_pose: pose,
            statistics,
            grid: grid.rows().map(|row| row.to_vec()).collect(),
        }
    }

    /// Grid configuration described by the metadata
    pub fn grid_config(&self) -> GridConfig {
        GridConfig::new(self.metadata.grid_size_meters, self.metadata.cell_size_cm)
    }

    /// Rebuild the occupancy grid, checking it against the metadata.
    pub fn to_grid(&self) -> Result<OccupancyGrid> {
        let config = self.grid_config();
        config.validate().map_err(MapError::InvalidSnapshot)?;

        let size = config.grid_cells();
        if self.metadata.grid_cells != size {
            return Err(MapError::InvalidSnapshot(format!(
                "metadata says {} cells per side, grid config gives {}",
                self.metadata.grid_cells, size
            )));
        }
        if self.grid.len() != size {
            return Err(MapError::InvalidSnapshot(format!(
                "expected {} rows, found {}",
                size,
                self.grid.len()
            )));
        }
        if let Some((y, row)) = self.grid.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(MapError::InvalidSnapshot(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                size
            )));
        }

        let cells: Vec<u8> = self.grid.iter().flatten().copied().collect();
        OccupancyGrid::from_cells(config, cells).map_err(MapError::InvalidSnapshot)
    }

    /// Rover pose, checked for finite values
    pub fn pose(&self) -> Result<Pose> {
        let p = self.rover_pose;
        if !(p.x.is_finite() && p.y.is_finite() && p.heading.is_finite()) {
            return Err(MapError::InvalidSnapshot(format!(
                "non-finite rover pose ({}, {}, {})",
                p.x, p.y, p.heading
            )));
        }
        Ok(Pose::new(p.x, p.y, p.heading))
    }
}

/// Save a snapshot to a JSON file
pub fn save_snapshot(snapshot: &MapSnapshot, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_snapshot(snapshot, &mut writer)?;
    writer.flush()?;
    info!("[Map] Saved snapshot to {}", path.display());
    Ok(())
}

/// Write a snapshot as pretty-printed JSON
pub fn write_snapshot<W: Write>(snapshot: &MapSnapshot, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(writer, snapshot)?;
    Ok(())
}

/// Load a snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<MapSnapshot> {
    let file = File::open(path)?;
    let snapshot = read_snapshot(BufReader::new(file))?;
    info!("[Map] Loaded snapshot from {}", path.display());
    Ok(snapshot)
}

/// Read a snapshot from JSON
pub fn read_snapshot<R: Read>(reader: R) -> Result<MapSnapshot> {
    Ok(serde_json::from_reader(reader)?)
}

/// File name for a snapshot taken at `timestamp`: `rover_map_%Y%m%d_%H%M%S.json`
pub fn snapshot_file_name(timestamp: NaiveDateTime) -> String {
    format!(
        "{}{}.{}",
        SNAPSHOT_PREFIX,
        timestamp.format("%Y%m%d_%H%M%S"),
        SNAPSHOT_EXTENSION
    )
}

/// One entry of a snapshot directory listing
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotSummary {
    /// Snapshot file
    pub path: PathBuf,
    /// Timestamp part of the file name
    pub timestamp: String,
    /// Saved statistics, if the file could be read
    pub statistics: Option<MapStatistics>,
    /// Why the file could not be read
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    #[serde(default)]
    statistics: Option<MapStatistics>,
}

fn snapshot_timestamp(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(SNAPSHOT_EXTENSION)?.strip_suffix('.')?;
    stem.strip_prefix(SNAPSHOT_PREFIX).map(str::to_string)
}

fn snapshot_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && snapshot_timestamp(&path).is_some() {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// List `rover_map_*.json` files in `dir`, newest name first.
///
/// A file that cannot be read or parsed is listed with its error rather
/// than failing the whole listing.
pub fn list_snapshots(dir: &Path) -> Result<Vec<SnapshotSummary>> {
    let mut paths = snapshot_paths(dir)?;
    paths.sort_by(|a, b| b.cmp(a));

    let summaries = paths
        .into_iter()
        .map(|path| {
            let timestamp = snapshot_timestamp(&path).unwrap_or_default();
            let parsed = File::open(&path)
                .map_err(|e| e.to_string())
                .and_then(|file| {
                    serde_json::from_reader::<_, SnapshotHeader>(BufReader::new(file))
                        .map_err(|e| e.to_string())
                });
            match parsed {
                Ok(header) => SnapshotSummary {
                    path,
                    timestamp,
                    statistics: header.statistics,
                    error: None,
                },
                Err(e) => {
                    warn!("[Map] Unreadable snapshot {}: {}", path.display(), e);
                    SnapshotSummary {
                        path,
                        timestamp,
                        statistics: None,
                        error: Some(e),
                    }
                }
            }
        })
        .collect();

    Ok(summaries)
}

/// Most recently modified snapshot in `dir`
pub fn latest_snapshot(dir: &Path) -> Result<Option<PathBuf>> {
    let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
    for path in snapshot_paths(dir)? {
        let modified = std::fs::metadata(&path)?.modified()?;
        if latest.as_ref().map_or(true, |(t, _)| modified > *t) {
            latest = Some((modified, path));
        }
    }
    Ok(latest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCoord;
    use chrono::NaiveDate;

    fn small_grid() -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(GridConfig::new(0.5, 10));
        grid.set(GridCoord::new(1, 0), 80);
        grid.set(GridCoord::new(4, 3), 1);
        grid
    }

    #[test]
    fn test_snapshot_layout() {
        let grid = small_grid();
        let snapshot = MapSnapshot::new(&grid, Pose::new(25.0, 25.0, 90.0), "now".into(), None);

        assert_eq!(snapshot.metadata.grid_cells, 5);
        assert_eq!(snapshot.grid.len(), 5);
        assert_eq!(snapshot.grid[0][1], 80);
        assert_eq!(snapshot.grid[3][4], 1);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["metadata"]["cell_size_cm"], 10);
        assert_eq!(json["rover_pose"]["heading"], 90.0);
        assert_eq!(json["grid"][0][1], 80);
    }

    #[test]
    fn test_write_read() {
        let grid = small_grid();
        let snapshot = MapSnapshot::new(&grid, Pose::new(12.5, 40.0, 270.0), "t".into(), None);

        let mut buffer = Vec::new();
        write_snapshot(&snapshot, &mut buffer).unwrap();
        let loaded = read_snapshot(buffer.as_slice()).unwrap();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.to_grid().unwrap(), grid);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let grid = small_grid();
        let mut snapshot = MapSnapshot::new(&grid, Pose::default(), String::new(), None);
        snapshot.grid.pop();
        assert!(matches!(snapshot.to_grid(), Err(MapError::InvalidSnapshot(_))));

        let mut snapshot = MapSnapshot::new(&grid, Pose::default(), String::new(), None);
        snapshot.grid[2].push(0);
        assert!(matches!(snapshot.to_grid(), Err(MapError::InvalidSnapshot(_))));

        let mut snapshot = MapSnapshot::new(&grid, Pose::default(), String::new(), None);
        snapshot.metadata.grid_cells = 7;
        assert!(matches!(snapshot.to_grid(), Err(MapError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let grid = small_grid();
        let mut snapshot = MapSnapshot::new(&grid, Pose::default(), String::new(), None);
        snapshot.grid[0][0] = 150;
        assert!(matches!(snapshot.to_grid(), Err(MapError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = read_snapshot("{\"metadata\": {}}".as_bytes());
        assert!(matches!(result, Err(MapError::Json(_))));
    }

    #[test]
    fn test_file_name() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 1))
            .unwrap();
        assert_eq!(snapshot_file_name(ts), "rover_map_20240307_090501.json");
        assert_eq!(
            snapshot_timestamp(Path::new("/tmp/rover_map_20240307_090501.json")).as_deref(),
            Some("20240307_090501")
        );
        assert_eq!(snapshot_timestamp(Path::new("/tmp/other.json")), None);
    }
}
