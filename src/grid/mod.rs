//! Occupancy grid with scalar confidence accumulation.
//!
//! Every cell holds an integer confidence in [0, 100]:
//!
//! ```text
//!   0        never observed (unknown)
//!   1 - 59   observed, free-leaning
//!  60 - 100  observed, occupied-leaning
//! ```
//!
//! A cell that has been observed never returns to 0, so "unknown" and
//! "explored and clear" stay distinguishable for frontier detection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                Sensor Inputs                 │
//! │  Ultrasonic range  │  IR proximity  │  Wi-Fi  │
//! └─────────┬──────────┴───────┬────────┴────┬───┘
//!           │                  │             │
//!           ▼                  ▼             ▼
//!   ┌───────────────┐  ┌───────────────┐ ┌──────────┐
//!   │ range update  │  │ proximity upd │ │  wifi    │
//!   │ (ray + tip)   │  │ (single cell) │ │ overlay  │
//!   └───────┬───────┘  └───────┬───────┘ └──────────┘
//!           └─────────┬────────┘
//!                     ▼
//!            ┌─────────────────┐
//!            │  OccupancyGrid  │
//!            │  (flat buffer)  │
//!            └─────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`OccupancyGrid`]: Flat `y * width + x` confidence buffer
//! - [`WifiOverlay`]: Optional per-cell signal strength layer
//! - [`sensor_update`]: Range and proximity integration
//! - [`raycaster`]: Bresenham line iterator
//! - [`GridConfig`], [`SensorConfig`], [`MapConfig`]: Construction parameters

mod config;
pub mod raycaster;
pub mod sensor_update;
mod storage;
mod wifi;

pub use config::{GridConfig, MapConfig, SensorConfig};
pub use storage::{
    CellCounts, OccupancyGrid, FREE_FLOOR, MAX_CONFIDENCE, OCCUPIED_THRESHOLD, UNKNOWN,
};
pub use wifi::{SignalBand, WifiOverlay};
