//! Default value functions for serde deserialization.

pub fn size_meters() -> f64 {
    5.0
}

pub fn cell_size_cm() -> u32 {
    10
}

pub fn min_range_cm() -> f64 {
    2.0
}

pub fn max_range_cm() -> f64 {
    400.0
}

pub fn ray_free_confidence() -> f64 {
    0.3
}

pub fn proximity_range_cm() -> f64 {
    15.0
}

pub fn proximity_angle_deg() -> f64 {
    30.0
}

pub fn proximity_confidence() -> f64 {
    0.9
}

pub fn range_confidence() -> f64 {
    0.8
}

pub fn cm_per_sec_at_100() -> f64 {
    30.0
}

pub fn deg_per_sec_at_100() -> f64 {
    120.0
}

pub fn lookahead() -> usize {
    3
}

pub fn heading_deadband_deg() -> f64 {
    15.0
}

pub fn arrival_distance_cm() -> f64 {
    10.0
}

pub fn max_search_radius() -> u32 {
    10
}

pub fn safe_mode() -> bool {
    true
}

pub fn safe_mode_max_speed() -> u8 {
    40
}

pub fn forward_speed() -> u8 {
    40
}

pub fn forward_duration_sec() -> f64 {
    1.0
}

pub fn turn_speed() -> u8 {
    50
}

pub fn turn_duration_sec() -> f64 {
    0.5
}

pub fn blocked_turn_duration_sec() -> f64 {
    1.5
}

pub fn obstacle_turn_duration_sec() -> f64 {
    1.0
}

pub fn stop_distance_cm() -> f64 {
    30.0
}

pub fn map_dir() -> String {
    "/tmp".to_string()
}
