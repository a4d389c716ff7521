//! Slope detection beneath the actor.

use glam::Vec3;

use crate::capabilities::{LayerMask, RaycastProvider};
use crate::vector_math::{angle_from_up, project_on_plane, safe_normalize};
use crate::{FLAT_ANGLE_EPSILON, SLOPE_CHECK_SKIN};

/// Surface found by the downward slope probe. Valid for one frame only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopeQuery {
    /// Contact point under the actor.
    pub point: Vec3,
    /// Surface normal at the contact.
    pub normal: Vec3,
    /// Angle between the normal and world up, in degrees.
    pub angle: f32,
}

impl SlopeQuery {
    /// Casts the slope probe straight down from `origin`.
    ///
    /// The probe reaches `half_height + SLOPE_CHECK_SKIN` and considers every
    /// layer, so it also sees surfaces the ground check ignores.
    pub fn probe(world: &dyn RaycastProvider, origin: Vec3, half_height: f32) -> Option<Self> {
        world
            .raycast(
                origin,
                Vec3::NEG_Y,
                half_height + SLOPE_CHECK_SKIN,
                LayerMask::ALL,
            )
            .map(|hit| Self {
                point: hit.point,
                normal: hit.normal,
                angle: angle_from_up(hit.normal),
            })
    }

    /// Whether the surface counts as a walkable slope.
    #[must_use]
    pub fn is_slope(&self, max_slope_angle: f32) -> bool {
        is_slope_angle(self.angle, max_slope_angle)
    }

    /// Unit direction of travel along the surface for `move_direction`.
    #[must_use]
    pub fn move_direction(&self, move_direction: Vec3) -> Vec3 {
        safe_normalize(project_on_plane(move_direction, self.normal))
    }
}

/// Whether `angle` lies strictly between flat and `max_slope_angle`.
///
/// # Examples
///
/// ```
/// use skulk::movement::is_slope_angle;
/// assert!(is_slope_angle(20.0, 40.0));
/// assert!(!is_slope_angle(0.0, 40.0));
/// assert!(!is_slope_angle(40.0, 40.0));
/// ```
#[must_use]
pub fn is_slope_angle(angle: f32, max_slope_angle: f32) -> bool {
    angle > FLAT_ANGLE_EPSILON && angle < max_slope_angle
}
