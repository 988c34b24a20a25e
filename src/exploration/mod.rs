//! Frontier selection, navigation and exploration policy.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              ExplorationPlanner              │
//! │  sensors ─► map ─► frontier ─► navigate ─►   │
//! │                                  │           │
//! │                   SafetyInterlock ─► command │
//! └──────────────────────────────────────────────┘
//!        │                    │
//!        ▼                    ▼
//! ┌──────────────────┐ ┌──────────────────┐
//! │ FrontierSelector │ │ NavigationPolicy │──► AStarPlanner
//! └──────────────────┘ └──────────────────┘
//! ```

mod explorer;
mod frontier;
mod navigation;
mod safety;

pub use explorer::{ExplorationConfig, ExplorationPlanner, ExplorationStep, MotionCommand};
pub use frontier::FrontierSelector;
pub use navigation::{
    next_waypoint, NavAction, NavigationConfig, NavigationPolicy, NavigationResult, TurnDirection,
};
pub use safety::{SafetyInterlock, SensorSnapshot, StopReason};
