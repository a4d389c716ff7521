//! Engine services the locomotion and noise logic depend on.
//!
//! The controllers never talk to a concrete physics, animation, or audio
//! backend. Each concern is a small trait so the host (the Bevy plugin in
//! [`crate::plugin`], or a test double) decides how it is fulfilled.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::ForceMode;

/// Bit set selecting which collision layers a ray query considers.
///
/// # Examples
///
/// ```
/// use skulk::LayerMask;
/// let mask = LayerMask::GROUND | LayerMask::from_layer(3);
/// assert!(mask.intersects(LayerMask::GROUND));
/// assert!(!mask.intersects(LayerMask::from_layer(4)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: Self = Self(0);
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Layer used for walkable ground by default.
    pub const GROUND: Self = Self(1);

    /// Mask containing only `layer` (0-31). Out of range layers yield
    /// [`LayerMask::NONE`].
    #[must_use]
    pub const fn from_layer(layer: u32) -> Self {
        match 1_u32.checked_shl(layer) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    /// Whether the two masks share at least one layer.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::GROUND
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Surface contact reported by a ray query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World-space contact point.
    pub point: Vec3,
    /// Unit surface normal at the contact.
    pub normal: Vec3,
    /// Distance travelled along the ray.
    pub distance: f32,
}

/// Ray casting against level geometry.
#[cfg_attr(test, mockall::automock)]
pub trait RaycastProvider {
    /// Casts a ray and returns the closest hit on any of `layers` within
    /// `max_distance`, or `None` when nothing is struck.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit>;
}

/// Rigid body the movement controller steers.
#[cfg_attr(test, mockall::automock)]
pub trait PhysicsBody {
    /// Current linear velocity.
    fn velocity(&self) -> Vec3;
    /// Overwrites the linear velocity.
    fn set_velocity(&mut self, velocity: Vec3);
    /// Applies `force` using the given mode.
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
    /// Sets the linear damping coefficient.
    fn set_drag(&mut self, drag: f32);
    /// Enables or disables gravity for the body.
    fn set_use_gravity(&mut self, enabled: bool);
}

/// Read access to the animation state evaluator.
#[cfg_attr(test, mockall::automock)]
pub trait AnimationSampler {
    /// Value of the named float parameter, `0.0` when unknown.
    fn float_parameter(&self, name: &str) -> f32;
}

/// A ripple particle effect that can be started and stopped.
#[cfg_attr(test, mockall::automock)]
pub trait RippleEffect {
    /// Starts (or restarts) the effect.
    fn play(&mut self);
    /// Stops the effect.
    fn stop(&mut self);
    /// Whether the effect is currently running.
    fn is_playing(&self) -> bool;
}

/// Sink for audio middleware events.
#[cfg_attr(test, mockall::automock)]
pub trait AudioEmitter {
    /// Posts the named audio event from the actor.
    fn post(&mut self, event: &str);
}

/// Opaque handle to an alert-capable listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Registry of entities that react to noise.
///
/// The registry is owned by the host; noise logic only queries it and
/// forwards alerts.
#[cfg_attr(test, mockall::automock)]
pub trait ListenerRegistry {
    /// Listeners whose position lies within `radius` of `centre`.
    fn listeners_within(&self, centre: Vec3, radius: f32) -> Vec<ListenerId>;
    /// Notifies `listener` of a noise heard at `source`.
    fn alert(&mut self, listener: ListenerId, source: Vec3);
}
