//! Per-frame input sample.

use bevy::prelude::Component;

/// Raw locomotion input for one frame.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementInput {
    /// Strafe axis in `[-1, 1]`, positive to the right.
    pub horizontal: f32,
    /// Forward axis in `[-1, 1]`, positive forwards.
    pub vertical: f32,
    /// Whether the jump key is held.
    pub jump: bool,
    /// Whether the sprint key is held.
    pub sprint: bool,
}

impl MovementInput {
    /// Whether neither movement axis is deflected.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.horizontal == 0.0 && self.vertical == 0.0
    }
}

/// Maps a negative/positive key pair to a raw axis value.
///
/// # Examples
///
/// ```
/// use skulk::movement::axis;
/// assert_eq!(axis(true, false), -1.0);
/// assert_eq!(axis(true, true), 0.0);
/// ```
#[must_use]
pub const fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}
