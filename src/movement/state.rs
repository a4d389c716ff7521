//! Locomotion state classification.

use crate::config::MovementSettings;

/// The locomotion mode active for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MovementState {
    /// On the ground at walking pace.
    #[default]
    Walking,
    /// On the ground holding the sprint key.
    Sprinting,
    /// Attached to a climbable wall.
    Climbing,
    /// Without ground support.
    Air,
}

impl MovementState {
    /// Picks the state for a frame.
    ///
    /// Climbing beats sprinting, sprinting beats walking, and anything
    /// unsupported is airborne.
    ///
    /// # Examples
    ///
    /// ```
    /// use skulk::MovementState;
    /// assert_eq!(MovementState::classify(true, true, true), MovementState::Climbing);
    /// assert_eq!(MovementState::classify(false, true, true), MovementState::Sprinting);
    /// assert_eq!(MovementState::classify(false, true, false), MovementState::Walking);
    /// assert_eq!(MovementState::classify(false, false, true), MovementState::Air);
    /// ```
    #[must_use]
    pub const fn classify(climbing: bool, grounded: bool, sprint_held: bool) -> Self {
        match (climbing, grounded, sprint_held) {
            (true, _, _) => Self::Climbing,
            (false, true, true) => Self::Sprinting,
            (false, true, false) => Self::Walking,
            (false, false, _) => Self::Air,
        }
    }

    /// Speed bound to this state, or `None` for [`MovementState::Air`],
    /// which keeps whatever speed the actor had when it left the ground.
    #[must_use]
    pub const fn target_speed(self, settings: &MovementSettings) -> Option<f32> {
        match self {
            Self::Walking => Some(settings.walk_speed),
            Self::Sprinting => Some(settings.sprint_speed),
            Self::Climbing => Some(settings.climb_speed),
            Self::Air => None,
        }
    }
}
