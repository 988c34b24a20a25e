//! Thread-safe map handle.
//!
//! The map core is single-threaded. When a sensor loop and a planning loop
//! run on different threads they share the map through [`SharedRoverMap`]:
//!
//! - Sensor and odometry updates take the write lock
//! - A navigation decision (read pose, plan, decide) runs under a single
//!   read lock, so it never sees a grid mid-update

use std::path::Path;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::{Pose, WorldPoint};
use crate::error::Result;
use crate::exploration::NavigationResult;
use crate::odometry::MovementType;
use crate::{MapStatistics, RoverMap};

/// Shared, lock-protected [`RoverMap`].
#[derive(Clone, Debug, Default)]
pub struct SharedRoverMap {
    inner: Arc<RwLock<RoverMap>>,
}

impl SharedRoverMap {
    /// Wrap a map for sharing
    pub fn new(map: RoverMap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Read access for compound queries
    pub fn read(&self) -> RwLockReadGuard<'_, RoverMap> {
        self.inner.read()
    }

    /// Write access for compound updates
    pub fn write(&self) -> RwLockWriteGuard<'_, RoverMap> {
        self.inner.write()
    }

    /// Current pose
    pub fn pose(&self) -> Pose {
        self.inner.read().pose()
    }

    /// See [`RoverMap::advance_odometry`]
    pub fn advance_odometry(&self, movement: MovementType, duration_sec: f64, speed: u8) -> Pose {
        self.inner
            .write()
            .advance_odometry(movement, duration_sec, speed)
    }

    /// See [`RoverMap::add_range_reading`]
    pub fn add_range_reading(&self, distance_cm: f64, confidence: f64) -> bool {
        self.inner.write().add_range_reading(distance_cm, confidence)
    }

    /// See [`RoverMap::add_proximity_reading`]
    pub fn add_proximity_reading(&self, left: bool, right: bool) -> usize {
        self.inner.write().add_proximity_reading(left, right)
    }

    /// See [`RoverMap::add_wifi_reading`]
    pub fn add_wifi_reading(&self, dbm: i32) -> Option<i32> {
        self.inner.write().add_wifi_reading(dbm)
    }

    /// See [`RoverMap::navigate`]
    pub fn navigate(&self, goal: WorldPoint) -> NavigationResult {
        self.inner.read().navigate(goal)
    }

    /// Pick the nearest frontier and decide how to approach it, atomically.
    pub fn navigate_to_frontier(&self) -> Option<(WorldPoint, NavigationResult)> {
        let map = self.inner.read();
        let frontier = map.nearest_frontier()?;
        Some((frontier, map.navigate(frontier)))
    }

    /// See [`RoverMap::statistics`]
    pub fn statistics(&self) -> MapStatistics {
        self.inner.read().statistics()
    }

    /// See [`RoverMap::save`]
    pub fn save(&self, path: &Path) -> Result<()> {
        self.inner.read().save(path)
    }
}
