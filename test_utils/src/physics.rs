//! Physics fakes and level layouts used in tests.

use glam::{Vec2, Vec3};
use skulk::{ForceMode, GroundPatch, PhysicsBody, StaticGround};

/// Body that records every force instead of simulating it.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordingBody {
    pub velocity: Vec3,
    pub drag: f32,
    pub use_gravity: bool,
    pub forces: Vec<(Vec3, ForceMode)>,
}

impl Default for RecordingBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            drag: 0.0,
            use_gravity: true,
            forces: Vec::new(),
        }
    }
}

impl RecordingBody {
    /// Body already moving with `velocity`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use test_utils::RecordingBody;
    /// let body = RecordingBody::moving(Vec3::X);
    /// assert_eq!(body.velocity, Vec3::X);
    /// ```
    pub fn moving(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// Sum of the recorded forces applied with `mode`.
    pub fn total(&self, mode: ForceMode) -> Vec3 {
        self.forces
            .iter()
            .filter(|(_, m)| *m == mode)
            .map(|(force, _)| *force)
            .sum()
    }

    /// Number of recorded impulses.
    pub fn impulses(&self) -> usize {
        self.forces
            .iter()
            .filter(|(_, m)| *m == ForceMode::Impulse)
            .count()
    }

    /// Forgets the recorded forces, keeping velocity and flags.
    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }
}

impl PhysicsBody for RecordingBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.forces.push((force, mode));
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn set_use_gravity(&mut self, enabled: bool) {
        self.use_gravity = enabled;
    }
}

/// An endless floor at height zero.
pub fn flat_world() -> StaticGround {
    StaticGround::flat(0.0)
}

/// A single ramp through the origin, rising along +x by `angle_degrees`.
pub fn ramp_world(angle_degrees: f32) -> StaticGround {
    StaticGround::new(vec![GroundPatch::ramp(
        Vec3::ZERO,
        angle_degrees,
        Vec2::splat(50.0),
    )])
}

/// No geometry at all; every probe misses.
pub fn airborne_world() -> StaticGround {
    StaticGround::default()
}
