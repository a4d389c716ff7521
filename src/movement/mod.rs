//! Player locomotion.
//!
//! This module re-exports the controller together with the small value
//! types it works with: the input sample, the state classification, the
//! jump cooldown, and the slope probe.

mod controller;
mod input;
mod jump;
mod slope;
mod state;

pub use controller::{ActorPose, ClimbState, FrameReport, MoveReport, MovementController};
pub use input::{axis, MovementInput};
pub use jump::JumpCooldown;
pub use slope::{is_slope_angle, SlopeQuery};
pub use state::MovementState;
