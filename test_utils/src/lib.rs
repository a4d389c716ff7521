//! Utility helpers for tests.
//!
//! Recording fakes of the engine services used by `skulk`, plus a few level
//! layouts. Each fake stores what was asked of it so tests can assert on the
//! calls afterwards.

pub mod noise;
pub mod physics;

pub use noise::{FakeRipple, FixedAnimation, ListenerSet, NoiseRig, RecordingAudio};
pub use physics::{airborne_world, flat_world, ramp_world, RecordingBody};
