//! Designer-tunable settings for locomotion and noise.
//!
//! Settings are read once when a scene loads and stay constant afterwards.
//! They can be authored as JSON; any omitted field takes its default.
//!
//! ```json
//! {
//!   "movement": { "walk_speed": 6.0, "max_slope_angle": 35.0 },
//!   "noise": { "loud_range": 20.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::MouseButton;
use bevy::prelude::Resource;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::capabilities::LayerMask;
use crate::error::ConfigError;

/// Tuning for [`crate::movement::MovementController`].
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    /// Target speed while walking.
    pub walk_speed: f32,
    /// Target speed while sprinting.
    pub sprint_speed: f32,
    /// Target speed while climbing.
    pub climb_speed: f32,
    /// Body drag applied while grounded.
    pub ground_drag: f32,
    /// Upward impulse applied by a jump.
    pub jump_force: f32,
    /// Seconds before another jump is allowed.
    pub jump_cooldown: f32,
    /// Fraction of the ground force available in the air.
    pub air_multiplier: f32,
    /// Steepest walkable slope, in degrees.
    pub max_slope_angle: f32,
    /// Half of the actor's height; the ground probes start at its centre.
    pub half_height: f32,
    /// Layers the ground check considers walkable.
    pub ground_layers: LayerMask,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 10.0,
            climb_speed: 3.0,
            ground_drag: 5.0,
            jump_force: 12.0,
            jump_cooldown: 0.25,
            air_multiplier: 0.4,
            max_slope_angle: 40.0,
            half_height: 1.0,
            ground_layers: LayerMask::GROUND,
        }
    }
}

/// Tuning for [`crate::noise::NoiseSignal`].
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Alert radius of quiet footsteps.
    pub quiet_range: f32,
    /// Alert radius of loud footsteps, landings, and calls.
    pub loud_range: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            quiet_range: 4.0,
            loud_range: 12.0,
        }
    }
}

/// Complete set of tunables for a scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkulkConfig {
    /// Locomotion tuning.
    pub movement: MovementSettings,
    /// Noise tuning.
    pub noise: NoiseSettings,
}

impl SkulkConfig {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|err| {
            warn!("rejected configuration: {err}");
            ConfigError::from(err)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`SkulkConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| {
            error!("cannot read configuration {}: {source}", file.display());
            ConfigError::Io {
                path: file.to_path_buf(),
                source,
            }
        })?;
        let config = Self::from_json_str(&text)?;
        debug!("loaded configuration from {}", file.display());
        Ok(config)
    }

    /// Checks every value against the ranges the controllers support.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_ranges().map_err(|err| {
            warn!("rejected configuration: {err}");
            err
        })
    }

    fn check_ranges(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        non_negative("movement.walk_speed", m.walk_speed)?;
        non_negative("movement.sprint_speed", m.sprint_speed)?;
        non_negative("movement.climb_speed", m.climb_speed)?;
        non_negative("movement.ground_drag", m.ground_drag)?;
        non_negative("movement.jump_force", m.jump_force)?;
        non_negative("movement.jump_cooldown", m.jump_cooldown)?;
        non_negative("movement.air_multiplier", m.air_multiplier)?;
        if !(m.max_slope_angle > 0.0 && m.max_slope_angle < 90.0) {
            return Err(ConfigError::invalid(
                "movement.max_slope_angle",
                format!("{} is not between 0 and 90 degrees", m.max_slope_angle),
            ));
        }
        if !(m.half_height.is_finite() && m.half_height > 0.0) {
            return Err(ConfigError::invalid(
                "movement.half_height",
                format!("{} must be positive", m.half_height),
            ));
        }

        let n = &self.noise;
        non_negative("noise.quiet_range", n.quiet_range)?;
        non_negative("noise.loud_range", n.loud_range)?;
        if n.quiet_range > n.loud_range {
            return Err(ConfigError::invalid(
                "noise.quiet_range",
                format!(
                    "{} exceeds loud_range {}",
                    n.quiet_range, n.loud_range
                ),
            ));
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} must be finite and non-negative"),
        ))
    }
}

/// Input bindings read by the plugin's input systems.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    /// Held to jump.
    pub jump: KeyCode,
    /// Held to sprint.
    pub sprint: KeyCode,
    /// Pressed to make a deliberate noise.
    pub call: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: KeyCode::Space,
            sprint: KeyCode::ShiftLeft,
            call: MouseButton::Left,
        }
    }
}
