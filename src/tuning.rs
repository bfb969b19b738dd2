//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance tweaks never touch sim code.
//! Values deserialize from JSON with per-field defaults; a `Tuning` is
//! validated once when a run is constructed and never re-checked on the hot
//! path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gameplay balance values.
///
/// Defaults are the shipped balance. All distances are viewport units,
/// all times are seconds, angles are degrees here (converted to radians
/// at the accessors).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Hero ===
    /// Vertical gravity (units/s^2, negative = down)
    pub gravity_y: f32,
    /// Upward velocity applied by a tap (replaces current fall velocity)
    pub flap_impulse: f32,
    /// Nose-up angular kick applied by a tap (rad/s)
    pub flap_angular_impulse: f32,
    /// Nose-down angular impulse while falling, scaled by dt each tick
    pub fall_angular_impulse: f32,
    /// Seconds after the last tap before falling rotation kicks in
    pub fall_rotation_delay: f32,
    /// Ceiling on upward velocity (units/s)
    pub max_rise_speed: f32,
    /// Rotation clamp (degrees); min is also the face-down death pose
    pub rotation_min_deg: f32,
    pub rotation_max_deg: f32,
    /// Angular velocity clamp (rad/s, symmetric)
    pub max_angular_speed: f32,
    /// Hero spawn position
    pub hero_start_x: f32,
    pub hero_start_y: f32,

    // === Scrolling ===
    /// Ground scroll speed at level 0 (units/s)
    pub base_scroll_speed: f32,
    /// Cloud parallax speed, independent of level (units/s)
    pub cloud_speed: f32,
    /// How far past the viewport's left edge a tile's right edge may go
    /// before it is recycled (units)
    pub recycle_margin: f32,
    pub ground_tile_width: f32,
    pub ground_tile_y: f32,
    pub cloud_tile_width: f32,
    pub cloud_tile_y: f32,

    // === Obstacles ===
    /// Seconds between obstacle spawns
    pub spawn_interval: f32,
    /// Viewport-space x where new obstacles appear (just off the right edge)
    pub spawn_x: f32,
    /// Uniform range for the spawned gap's vertical position
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    /// Viewport-space x behind which obstacles are destroyed
    pub despawn_x: f32,

    // === Scoring ===
    /// Points needed per level
    pub points_per_level: u32,
    /// Scroll speed increase on each level-up (units/s)
    pub level_speed_step: f32,

    // === Effects ===
    /// Lifetime of the score ripple before its one-shot removal (seconds)
    pub ripple_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            // 9.8 m/s^2 at 150 units per meter
            gravity_y: -1470.0,
            flap_impulse: 300.0,
            flap_angular_impulse: 1.0,
            fall_angular_impulse: -20000.0,
            fall_rotation_delay: 0.1,
            max_rise_speed: 400.0,
            rotation_min_deg: -90.0,
            rotation_max_deg: 30.0,
            max_angular_speed: 2.0,
            hero_start_x: 80.0,
            hero_start_y: 280.0,
            base_scroll_speed: 160.0,
            cloud_speed: 20.0,
            recycle_margin: 2.0,
            ground_tile_width: 352.0,
            ground_tile_y: 0.0,
            cloud_tile_width: 640.0,
            cloud_tile_y: 500.0,
            spawn_interval: 1.5,
            spawn_x: 447.5,
            spawn_y_min: -50.0,
            spawn_y_max: 160.0,
            despawn_x: -132.5,
            points_per_level: 5,
            level_speed_step: 100.0,
            ripple_duration: 3.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning override from JSON.
    ///
    /// Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(TuningError::Parse)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the configuration invariants.
    ///
    /// Called once at run construction; a failure here aborts setup rather
    /// than letting a nonsense configuration limp along.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive: [(&'static str, f32); 9] = [
            ("flap_impulse", self.flap_impulse),
            ("max_rise_speed", self.max_rise_speed),
            ("max_angular_speed", self.max_angular_speed),
            ("base_scroll_speed", self.base_scroll_speed),
            ("ground_tile_width", self.ground_tile_width),
            ("cloud_tile_width", self.cloud_tile_width),
            ("spawn_interval", self.spawn_interval),
            ("level_speed_step", self.level_speed_step),
            ("ripple_duration", self.ripple_duration),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive(field));
            }
        }
        if self.points_per_level == 0 {
            return Err(TuningError::NotPositive("points_per_level"));
        }
        if self.gravity_y >= 0.0 {
            return Err(TuningError::NotNegative("gravity_y"));
        }
        if self.recycle_margin < 0.0 {
            return Err(TuningError::NotNegative("recycle_margin"));
        }
        if self.spawn_y_min > self.spawn_y_max {
            return Err(TuningError::EmptyRange("spawn_y_min..spawn_y_max"));
        }
        if self.rotation_min_deg > self.rotation_max_deg {
            return Err(TuningError::EmptyRange(
                "rotation_min_deg..rotation_max_deg",
            ));
        }
        if self.fall_rotation_delay < 0.0 {
            return Err(TuningError::NotNegative("fall_rotation_delay"));
        }
        Ok(())
    }

    /// Lower rotation clamp in radians (also the death pose)
    pub fn rotation_min(&self) -> f32 {
        self.rotation_min_deg.to_radians()
    }

    /// Upper rotation clamp in radians
    pub fn rotation_max(&self) -> f32 {
        self.rotation_max_deg.to_radians()
    }
}

/// Setup-time configuration failures. Unrecoverable by design: the caller
/// reports the diagnostic and refuses to start the run.
#[derive(Debug)]
pub enum TuningError {
    /// JSON was malformed or had wrong types
    Parse(serde_json::Error),
    /// Field must be strictly positive
    NotPositive(&'static str),
    /// Field must not be negative (or must be, for gravity)
    NotNegative(&'static str),
    /// Range field has min above max
    EmptyRange(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::NotPositive(field) => {
                write!(f, "tuning field `{field}` must be positive")
            }
            TuningError::NotNegative(field) => {
                write!(f, "tuning field `{field}` has the wrong sign")
            }
            TuningError::EmptyRange(range) => {
                write!(f, "tuning range `{range}` is empty")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}
