//! Physics helper functions and a minimal rigid body.
//!
//! The movement controller only ever talks to [`PhysicsBody`]. Hosts that
//! lack a physics engine can use [`KinematicBody`], which integrates forces,
//! gravity, and drag with a semi-implicit Euler step.

use bevy::prelude::Component;
use glam::Vec3;

use crate::capabilities::PhysicsBody;
use crate::{DEFAULT_MASS, GRAVITY_PULL};

/// Smallest acceptable mass to avoid numerically unstable accelerations.
const MIN_MASS: f32 = 1e-6;

/// How a force passed to [`PhysicsBody::add_force`] is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over the next physics step.
    Force,
    /// Instantaneous change of momentum.
    Impulse,
}

/// Computes the velocity change a force produces on a body of `mass`.
///
/// Returns `None` if `mass` is non-positive or effectively zero (see
/// [`MIN_MASS`]). Continuous forces are scaled by `dt`; impulses are not.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use skulk::physics::{velocity_change, ForceMode};
/// let dv = velocity_change(Vec3::new(7.0, -14.0, 21.0), ForceMode::Impulse, 7.0, 0.5).unwrap();
/// assert_eq!(dv, Vec3::new(1.0, -2.0, 3.0));
/// let dv = velocity_change(Vec3::new(7.0, 0.0, 0.0), ForceMode::Force, 7.0, 0.5).unwrap();
/// assert_eq!(dv, Vec3::new(0.5, 0.0, 0.0));
/// ```
#[must_use]
pub fn velocity_change(force: Vec3, mode: ForceMode, mass: f32, dt: f32) -> Option<Vec3> {
    if mass <= MIN_MASS {
        return None;
    }
    match mode {
        ForceMode::Force => Some(force / mass * dt),
        ForceMode::Impulse => Some(force / mass),
    }
}

/// Applies linear drag for one step of `dt` seconds.
///
/// The damping factor never goes negative, so a large drag simply stops the
/// body instead of reversing it.
#[must_use]
pub fn apply_drag(velocity: Vec3, drag: f32, dt: f32) -> Vec3 {
    velocity * (1.0 - drag * dt).max(0.0)
}

/// Simple rigid body with accumulated forces.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct KinematicBody {
    /// Linear velocity in metres per second.
    pub velocity: Vec3,
    /// Linear damping coefficient.
    pub drag: f32,
    /// Whether gravity is applied during integration.
    pub use_gravity: bool,
    /// Body mass in kilograms.
    pub mass: f32,
    /// Continuous force accumulated since the last integration.
    pub pending_force: Vec3,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            drag: 0.0,
            use_gravity: true,
            mass: DEFAULT_MASS,
            pending_force: Vec3::ZERO,
        }
    }
}

impl KinematicBody {
    /// Advances the body by `dt` seconds and returns its displacement.
    ///
    /// Accumulated forces are consumed. A body with an invalid mass ignores
    /// its forces but still falls and feels drag.
    pub fn integrate(&mut self, dt: f32) -> Vec3 {
        let force = std::mem::take(&mut self.pending_force);
        if let Some(dv) = velocity_change(force, ForceMode::Force, self.mass, dt) {
            self.velocity += dv;
        } else {
            log::warn!("ignoring force on body with invalid mass {}", self.mass);
        }
        if self.use_gravity {
            self.velocity.y += GRAVITY_PULL * dt;
        }
        self.velocity = apply_drag(self.velocity, self.drag, dt);
        self.velocity * dt
    }

    /// Removes the part of the velocity pointing into a surface with `normal`.
    pub fn cancel_into(&mut self, normal: Vec3) {
        let into = self.velocity.dot(normal);
        if into < 0.0 {
            self.velocity -= normal * into;
        }
    }
}

impl PhysicsBody for KinematicBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.pending_force += force,
            ForceMode::Impulse => {
                if let Some(dv) = velocity_change(force, mode, self.mass, 0.0) {
                    self.velocity += dv;
                }
            }
        }
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn set_use_gravity(&mut self, enabled: bool) {
        self.use_gravity = enabled;
    }
}
