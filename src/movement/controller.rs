//! Player movement controller.
//!
//! The controller runs in two phases every engine tick:
//!
//! - [`MovementController::frame_step`] senses the ground, samples input,
//!   handles jumping, limits speed, classifies the [`MovementState`], and
//!   sets drag.
//! - [`MovementController::fixed_step`] applies the locomotion forces for the
//!   fixed physics step.
//!
//! All engine access goes through [`RaycastProvider`] and [`PhysicsBody`].

use bevy::prelude::{Component, Transform};
use glam::Vec3;
use log::debug;

use super::input::MovementInput;
use super::jump::JumpCooldown;
use super::slope::SlopeQuery;
use super::state::MovementState;
use crate::capabilities::{PhysicsBody, RaycastProvider};
use crate::config::MovementSettings;
use crate::physics::ForceMode;
use crate::sound_gage::{SoundGage, SoundIntensity};
use crate::vector_math::{clamp_magnitude, clamp_planar, safe_normalize};
use crate::{GROUND_CHECK_SKIN, MOVE_FORCE_SCALE, SLOPE_FORCE_SCALE, SLOPE_STICK_FORCE};

/// Where the actor is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPose {
    /// Centre of the actor.
    pub position: Vec3,
    /// Horizontal facing direction.
    pub forward: Vec3,
    /// Horizontal direction to the actor's right.
    pub right: Vec3,
    /// The actor's up axis; jumps push along it.
    pub up: Vec3,
}

impl ActorPose {
    /// Pose at `position` facing down -z, the engine's default forward.
    #[must_use]
    pub const fn upright(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }

    /// Pose derived from a transform, with the facing flattened onto the
    /// ground plane so looking up or down never changes walking speed.
    #[must_use]
    pub fn from_transform(transform: &Transform) -> Self {
        let flatten = |v: Vec3| safe_normalize(Vec3::new(v.x, 0.0, v.z));
        Self {
            position: transform.translation,
            forward: flatten(*transform.forward()),
            right: flatten(*transform.right()),
            up: *transform.up(),
        }
    }
}

/// Flags published by the climbing collaborator.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClimbState {
    /// The actor is attached to a wall.
    pub climbing: bool,
    /// The actor is being pushed off a wall; locomotion must not fight it.
    pub exiting_wall: bool,
}

/// Outcome of [`MovementController::frame_step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Ground check result.
    pub grounded: bool,
    /// State chosen for this frame.
    pub state: MovementState,
    /// Speed limit in force.
    pub move_speed: f32,
    /// A jump impulse was applied.
    pub jumped: bool,
}

/// Outcome of [`MovementController::fixed_step`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveReport {
    /// Force applied along the ground or through the air.
    pub drive: Vec3,
    /// Force applied along a slope, including the stick-down correction.
    pub slope_force: Vec3,
    /// The slope probe found a walkable slope.
    pub on_slope: bool,
    /// Locomotion was skipped because the actor is leaving a wall.
    pub suppressed: bool,
}

/// Slope-aware locomotion for the player.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct MovementController {
    settings: MovementSettings,
    state: MovementState,
    move_speed: f32,
    grounded: bool,
    exiting_slope: bool,
    cooldown: JumpCooldown,
    input: MovementInput,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(MovementSettings::default())
    }
}

impl MovementController {
    /// Creates a controller at rest, walking.
    #[must_use]
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            move_speed: settings.walk_speed,
            settings,
            state: MovementState::Walking,
            grounded: false,
            exiting_slope: false,
            cooldown: JumpCooldown::default(),
            input: MovementInput::default(),
        }
    }

    /// Replaces the tuning, keeping the runtime state.
    pub fn reconfigure(&mut self, settings: MovementSettings) {
        if let Some(speed) = self.state.target_speed(&settings) {
            self.move_speed = speed;
        }
        self.settings = settings;
    }

    /// Active tuning.
    #[must_use]
    pub const fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// State chosen by the last frame step.
    #[must_use]
    pub const fn state(&self) -> MovementState {
        self.state
    }

    /// Current speed limit.
    #[must_use]
    pub const fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Ground check result of the last frame step.
    #[must_use]
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Whether a jump may start.
    #[must_use]
    pub const fn is_ready_to_jump(&self) -> bool {
        self.cooldown.is_ready()
    }

    /// Whether the post-jump slope grace window is open.
    #[must_use]
    pub const fn is_exiting_slope(&self) -> bool {
        self.exiting_slope
    }

    /// Input sampled by the last frame step.
    #[must_use]
    pub const fn input(&self) -> MovementInput {
        self.input
    }

    /// Grounded and not trying to move.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.grounded && self.input.is_idle()
    }

    /// Casts the ground check from `position`.
    pub fn sense_ground(&self, world: &dyn RaycastProvider, position: Vec3) -> bool {
        world
            .raycast(
                position,
                Vec3::NEG_Y,
                self.settings.half_height + GROUND_CHECK_SKIN,
                self.settings.ground_layers,
            )
            .is_some()
    }

    /// Walkable slope under `position`, if any.
    pub fn slope_under(&self, world: &dyn RaycastProvider, position: Vec3) -> Option<SlopeQuery> {
        SlopeQuery::probe(world, position, self.settings.half_height)
            .filter(|query| query.is_slope(self.settings.max_slope_angle))
    }

    /// Per-frame phase.
    pub fn frame_step(
        &mut self,
        pose: &ActorPose,
        input: MovementInput,
        climbing: bool,
        dt: f32,
        world: &dyn RaycastProvider,
        body: &mut dyn PhysicsBody,
    ) -> FrameReport {
        self.grounded = self.sense_ground(world, pose.position);
        self.input = input;

        if self.cooldown.tick(dt) {
            self.exiting_slope = false;
            debug!("jump re-armed");
        }

        let jumped = input.jump && self.cooldown.is_ready() && self.grounded;
        if jumped {
            self.jump(pose, body);
        }

        let on_slope = self.slope_under(world, pose.position).is_some();
        self.limit_speed(on_slope, body);
        self.classify(climbing, input.sprint);

        body.set_drag(if self.grounded {
            self.settings.ground_drag
        } else {
            0.0
        });

        FrameReport {
            grounded: self.grounded,
            state: self.state,
            move_speed: self.move_speed,
            jumped,
        }
    }

    /// Fixed physics phase.
    ///
    /// The sound gage is optional; when present it receives an intensity
    /// hint for the HUD.
    pub fn fixed_step(
        &self,
        pose: &ActorPose,
        climb: ClimbState,
        world: &dyn RaycastProvider,
        body: &mut dyn PhysicsBody,
        gage: Option<&mut SoundGage>,
    ) -> MoveReport {
        if climb.exiting_wall {
            return MoveReport {
                suppressed: true,
                ..MoveReport::default()
            };
        }

        let direction = pose.forward * self.input.vertical + pose.right * self.input.horizontal;
        let slope = self.slope_under(world, pose.position);

        let mut slope_force = Vec3::ZERO;
        if let Some(query) = slope.filter(|_| !self.exiting_slope) {
            slope_force = query.move_direction(direction) * self.move_speed * SLOPE_FORCE_SCALE;
            if body.velocity().y > 0.0 {
                slope_force += Vec3::NEG_Y * SLOPE_STICK_FORCE;
            }
            if slope_force != Vec3::ZERO {
                body.add_force(slope_force, ForceMode::Force);
            }
        }

        let mut drive = safe_normalize(direction) * self.move_speed * MOVE_FORCE_SCALE;
        if !self.grounded {
            drive *= self.settings.air_multiplier;
        }
        if drive != Vec3::ZERO {
            body.add_force(drive, ForceMode::Force);
        }

        if let Some(gage) = gage {
            gage.show(if self.grounded && !self.input.is_idle() {
                SoundIntensity::Moderate
            } else {
                SoundIntensity::Minimal
            });
        }

        body.set_use_gravity(slope.is_none());

        MoveReport {
            drive,
            slope_force,
            on_slope: slope.is_some(),
            suppressed: false,
        }
    }

    fn jump(&mut self, pose: &ActorPose, body: &mut dyn PhysicsBody) {
        self.exiting_slope = true;
        let velocity = body.velocity();
        body.set_velocity(Vec3::new(velocity.x, 0.0, velocity.z));
        body.add_force(pose.up * self.settings.jump_force, ForceMode::Impulse);
        self.cooldown.start(self.settings.jump_cooldown);
        debug!("jump from {:?}", pose.position);
    }

    fn limit_speed(&self, on_slope: bool, body: &mut dyn PhysicsBody) {
        let velocity = body.velocity();
        let limited = if on_slope && !self.exiting_slope {
            clamp_magnitude(velocity, self.move_speed)
        } else {
            clamp_planar(velocity, self.move_speed)
        };
        if limited != velocity {
            body.set_velocity(limited);
        }
    }

    fn classify(&mut self, climbing: bool, sprint: bool) {
        let next = MovementState::classify(climbing, self.grounded, sprint);
        if let Some(speed) = next.target_speed(&self.settings) {
            self.move_speed = speed;
        }
        if next != self.state {
            debug!("movement state {:?} -> {next:?}", self.state);
        }
        self.state = next;
    }
}
