//! Immediate-range safety interlock.
//!
//! Checked right before a forward command is issued. It can only veto
//! forward motion; turns in place are always allowed.

use serde::{Deserialize, Serialize};

/// Raw sensor values for one control tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Ultrasonic range (cm); zero or negative means no echo
    pub ultrasonic_cm: f64,
    /// Left-front IR proximity sensor
    pub ir_left: bool,
    /// Right-front IR proximity sensor
    pub ir_right: bool,
    /// Wi-Fi signal strength (dBm), when the tick sampled one
    #[serde(default)]
    pub wifi_dbm: Option<i32>,
}

impl SensorSnapshot {
    /// Create a snapshot
    pub fn new(ultrasonic_cm: f64, ir_left: bool, ir_right: bool) -> Self {
        Self {
            ultrasonic_cm,
            ir_left,
            ir_right,
            wifi_dbm: None,
        }
    }

    /// Attach a Wi-Fi reading to the snapshot
    pub fn with_wifi(mut self, dbm: i32) -> Self {
        self.wifi_dbm = Some(dbm);
        self
    }
}

/// Why forward motion was vetoed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// An IR proximity sensor fired
    Proximity {
        /// Left sensor fired
        left: bool,
        /// Right sensor fired
        right: bool,
    },
    /// Ultrasonic echo closer than the stop distance
    ObstacleAhead {
        /// Measured range (cm)
        distance_cm: f64,
    },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Proximity { left, right } => {
                let side = match (left, right) {
                    (true, true) => "both sides",
                    (true, false) => "left",
                    _ => "right",
                };
                write!(f, "proximity sensor triggered ({})", side)
            }
            StopReason::ObstacleAhead { distance_cm } => {
                write!(f, "obstacle at {:.0}cm", distance_cm)
            }
        }
    }
}

/// Forward-motion veto based on the latest sensor snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SafetyInterlock {
    /// Ultrasonic range below which forward motion stops (cm)
    pub stop_distance_cm: f64,
}

impl Default for SafetyInterlock {
    fn default() -> Self {
        Self {
            stop_distance_cm: 30.0,
        }
    }
}

impl SafetyInterlock {
    /// Create an interlock with a stop distance
    pub fn new(stop_distance_cm: f64) -> Self {
        Self { stop_distance_cm }
    }

    /// Check whether forward motion must be vetoed.
    ///
    /// IR takes priority over ultrasonic. An ultrasonic reading of zero or
    /// below is "no echo" and never trips the interlock.
    pub fn check(&self, sensors: &SensorSnapshot) -> Option<StopReason> {
        if sensors.ir_left || sensors.ir_right {
            return Some(StopReason::Proximity {
                left: sensors.ir_left,
                right: sensors.ir_right,
            });
        }
        if sensors.ultrasonic_cm > 0.0 && sensors.ultrasonic_cm < self.stop_distance_cm {
            return Some(StopReason::ObstacleAhead {
                distance_cm: sensors.ultrasonic_cm,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear() {
        let interlock = SafetyInterlock::default();
        assert_eq!(interlock.check(&SensorSnapshot::new(120.0, false, false)), None);
        assert_eq!(interlock.check(&SensorSnapshot::new(30.0, false, false)), None);
    }

    #[test]
    fn test_no_echo_ignored() {
        let interlock = SafetyInterlock::default();
        assert_eq!(interlock.check(&SensorSnapshot::new(0.0, false, false)), None);
        assert_eq!(interlock.check(&SensorSnapshot::new(-1.0, false, false)), None);
    }

    #[test]
    fn test_obstacle_ahead() {
        let interlock = SafetyInterlock::default();
        assert_eq!(
            interlock.check(&SensorSnapshot::new(12.0, false, false)),
            Some(StopReason::ObstacleAhead { distance_cm: 12.0 })
        );
    }

    #[test]
    fn test_proximity_priority() {
        let interlock = SafetyInterlock::new(50.0);
        let reason = interlock.check(&SensorSnapshot::new(10.0, false, true));
        assert_eq!(
            reason,
            Some(StopReason::Proximity {
                left: false,
                right: true
            })
        );
        assert_eq!(reason.map(|r| r.to_string()).as_deref(), Some("proximity sensor triggered (right)"));
    }
}
