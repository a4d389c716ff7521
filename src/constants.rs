//! Tuning constants shared by the locomotion and noise systems.
//!
//! Values that designers tweak per scene live in [`crate::config`]; the
//! numbers here are fixed properties of the controller itself.

/// Extra ray length beyond the actor's half height used by the ground check.
pub const GROUND_CHECK_SKIN: f32 = 0.2;
/// Extra ray length beyond the actor's half height used by the slope probe.
///
/// Slightly longer than [`GROUND_CHECK_SKIN`] so a slope is still detected
/// while the actor hovers over it after a small bump.
pub const SLOPE_CHECK_SKIN: f32 = 0.3;
/// Angles below this many degrees count as flat ground.
pub const FLAT_ANGLE_EPSILON: f32 = 1.0e-3;

/// Force multiplier applied to the move speed on flat ground and in the air.
pub const MOVE_FORCE_SCALE: f32 = 10.0;
/// Force multiplier applied to the move speed along a slope.
pub const SLOPE_FORCE_SCALE: f32 = 20.0;
/// Downward force keeping the actor glued to a slope while moving upwards.
pub const SLOPE_STICK_FORCE: f32 = 80.0;

/// Gravity applied by [`crate::physics::KinematicBody`] (metres per second²).
pub const GRAVITY_PULL: f32 = -9.81;
/// Mass assumed for bodies that do not specify one.
pub const DEFAULT_MASS: f32 = 1.0;

/// Name of the animator parameter carrying the locomotion blend speed.
pub const SPEED_PARAMETER: &str = "SpeedAnimations";
/// Animation speed at or above which a footstep is loud.
pub const LOUD_STEP_THRESHOLD: f32 = 0.6;
/// Animation speed above which a footstep is audible at all.
pub const QUIET_STEP_THRESHOLD: f32 = 0.1;
/// Audio event posted when the player deliberately makes a noise.
pub const CALL_AUDIO_EVENT: &str = "ribbit";

/// Sound gage amplitude shown before the actor first moves.
pub const GAGE_INITIAL_AMPLITUDE: f32 = 0.010;
/// Sound gage amplitude while moving on the ground.
pub const GAGE_MODERATE_AMPLITUDE: f32 = 0.060;
/// Sound gage frequency while moving on the ground.
pub const GAGE_MODERATE_FREQUENCY: f32 = 10.0;
/// Sound gage amplitude while idle or airborne.
pub const GAGE_MINIMAL_AMPLITUDE: f32 = 0.001;
/// Sound gage frequency while idle or airborne.
pub const GAGE_MINIMAL_FREQUENCY: f32 = 1.0;
