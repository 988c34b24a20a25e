//! Core types for the rover map.
//!
//! - [`GridCoord`] and [`WorldPoint`]: Coordinate types (cells and centimetres)
//! - [`Pose`]: Rover position and compass heading
//! - [`math`]: Heading normalization and compass bearings

pub mod math;
mod point;
mod pose;

pub use math::{bearing_deg, heading_error_deg, normalize_heading};
pub use point::{GridCoord, WorldPoint};
pub use pose::Pose;
