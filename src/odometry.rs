//! Open-loop dead reckoning from motion commands.
//!
//! The rover has no wheel encoders, so pose changes are estimated from the
//! commanded motion, its duration and its speed, scaled by calibration
//! constants measured at 100% speed.
//!
//! Nothing here corrects accumulated error; drift grows with distance
//! travelled.
//!
//! # Example
//!
//! ```rust
//! use kshetra_map::core::Pose;
//! use kshetra_map::odometry::{Calibration, MovementType, OdometryIntegrator};
//!
//! let mut odom = OdometryIntegrator::new(Calibration::default());
//! let pose = odom.advance(Pose::new(0.0, 0.0, 0.0), MovementType::Forward, 1.0, 100);
//! assert!((pose.y - 30.0).abs() < 1e-9);
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::core::{normalize_heading, Pose};

/// Capacity of the diagnostic movement log.
pub const MOVEMENT_LOG_CAPACITY: usize = 1000;

/// Maximum motor speed value.
pub const MAX_SPEED: u8 = 100;

/// Discrete motion command issued to the drive motors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Drive straight ahead
    Forward,
    /// Drive straight back
    Backward,
    /// Rotate in place counter-clockwise
    TurnLeft,
    /// Rotate in place clockwise
    TurnRight,
    /// Motors off (logged, no pose change)
    Stop,
}

impl MovementType {
    /// Wire name of the movement
    pub fn as_str(self) -> &'static str {
        match self {
            MovementType::Forward => "forward",
            MovementType::Backward => "backward",
            MovementType::TurnLeft => "turn_left",
            MovementType::TurnRight => "turn_right",
            MovementType::Stop => "stop",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drive calibration measured at 100% motor speed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Linear speed at 100% (cm/s)
    pub cm_per_sec_at_100: f64,
    /// Turn rate at 100% (deg/s)
    pub deg_per_sec_at_100: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            cm_per_sec_at_100: 30.0,
            deg_per_sec_at_100: 120.0,
        }
    }
}

impl Calibration {
    /// Create a calibration from explicit constants.
    pub fn new(cm_per_sec_at_100: f64, deg_per_sec_at_100: f64) -> Self {
        Self {
            cm_per_sec_at_100,
            deg_per_sec_at_100,
        }
    }

    /// Derive `cm_per_sec_at_100` from a measured straight-line trial.
    ///
    /// # Arguments
    /// * `distance_cm` - Measured distance travelled
    /// * `duration_sec` - How long the motors ran
    /// * `speed` - Motor speed used for the trial (1-100)
    ///
    /// Returns `None` when the trial cannot be scaled (zero duration or speed).
    pub fn forward_rate_from_trial(distance_cm: f64, duration_sec: f64, speed: u8) -> Option<f64> {
        scale_trial(distance_cm, duration_sec, speed)
    }

    /// Derive `deg_per_sec_at_100` from a measured in-place turn.
    pub fn turn_rate_from_trial(degrees: f64, duration_sec: f64, speed: u8) -> Option<f64> {
        scale_trial(degrees, duration_sec, speed)
    }

    /// Replace the linear rate with one measured in a trial.
    pub fn with_forward_trial(mut self, distance_cm: f64, duration_sec: f64, speed: u8) -> Self {
        if let Some(rate) = Self::forward_rate_from_trial(distance_cm, duration_sec, speed) {
            self.cm_per_sec_at_100 = rate;
        }
        self
    }

    /// Replace the turn rate with one measured in a trial.
    pub fn with_turn_trial(mut self, degrees: f64, duration_sec: f64, speed: u8) -> Self {
        if let Some(rate) = Self::turn_rate_from_trial(degrees, duration_sec, speed) {
            self.deg_per_sec_at_100 = rate;
        }
        self
    }
}

fn scale_trial(measured: f64, duration_sec: f64, speed: u8) -> Option<f64> {
    if duration_sec <= 0.0 || speed == 0 {
        return None;
    }
    let speed = speed.min(MAX_SPEED) as f64;
    Some(measured / duration_sec * (100.0 / speed))
}

/// One integrated motion command, kept for diagnostics only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementLogEntry {
    /// When the movement was integrated
    pub timestamp: DateTime<Utc>,
    /// Movement type
    pub movement_type: MovementType,
    /// Duration (seconds)
    pub duration_sec: f64,
    /// Motor speed (0-100)
    pub speed: u8,
    /// Pose after the movement
    pub pose: Pose,
}

/// Dead-reckoning integrator.
///
/// Owns the movement log and the cumulative distance counter; the pose
/// itself is owned by the map and passed in on each call.
#[derive(Clone, Debug)]
pub struct OdometryIntegrator {
    calibration: Calibration,
    log: VecDeque<MovementLogEntry>,
    total_distance_cm: f64,
}

impl OdometryIntegrator {
    /// Create a new integrator with the given calibration.
    pub fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            log: VecDeque::with_capacity(MOVEMENT_LOG_CAPACITY),
            total_distance_cm: 0.0,
        }
    }

    /// Current calibration
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Replace the calibration (e.g. after a calibration trial)
    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }

    /// Cumulative forward + backward distance (cm)
    pub fn total_distance_cm(&self) -> f64 {
        self.total_distance_cm
    }

    /// Restore the cumulative distance (used when reloading a snapshot)
    pub fn set_total_distance_cm(&mut self, distance_cm: f64) {
        self.total_distance_cm = distance_cm.max(0.0);
    }

    /// Movement log, oldest first
    pub fn log(&self) -> impl Iterator<Item = &MovementLogEntry> {
        self.log.iter()
    }

    /// Number of logged movements
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Integrate one motion command and return the resulting pose.
    ///
    /// # Arguments
    /// * `pose` - Pose before the movement
    /// * `movement` - Commanded movement
    /// * `duration_sec` - How long the motors ran; `<= 0` is a no-op
    /// * `speed` - Motor speed, clamped to 0-100
    pub fn advance(
        &mut self,
        pose: Pose,
        movement: MovementType,
        duration_sec: f64,
        speed: u8,
    ) -> Pose {
        if duration_sec <= 0.0 || !duration_sec.is_finite() {
            trace!(
                "[Odometry] ignoring {} with duration {:.3}s",
                movement,
                duration_sec
            );
            return pose;
        }

        let speed = if speed > MAX_SPEED {
            warn!("[Odometry] speed {} above {}, clamping", speed, MAX_SPEED);
            MAX_SPEED
        } else {
            speed
        };
        let fraction = speed as f64 / 100.0;

        let mut next = pose;
        match movement {
            MovementType::Forward | MovementType::Backward => {
                let distance = fraction * self.calibration.cm_per_sec_at_100 * duration_sec;
                let sign = if movement == MovementType::Forward {
                    1.0
                } else {
                    -1.0
                };
                let (sin, cos) = pose.heading.to_radians().sin_cos();
                next.x += sign * distance * sin;
                next.y += sign * distance * cos;
                self.total_distance_cm += distance;
            }
            MovementType::TurnLeft | MovementType::TurnRight => {
                let degrees = fraction * self.calibration.deg_per_sec_at_100 * duration_sec;
                let sign = if movement == MovementType::TurnRight {
                    1.0
                } else {
                    -1.0
                };
                next.heading = normalize_heading(pose.heading + sign * degrees);
            }
            MovementType::Stop => {}
        }

        trace!(
            "[Odometry] {} {:.2}s @{} -> ({:.1}, {:.1}, {:.1}°)",
            movement,
            duration_sec,
            speed,
            next.x,
            next.y,
            next.heading
        );

        if self.log.len() == MOVEMENT_LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(MovementLogEntry {
            timestamp: Utc::now(),
            movement_type: movement,
            duration_sec,
            speed,
            pose: next,
        });

        next
    }
}

impl Default for OdometryIntegrator {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}
