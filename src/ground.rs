//! Static level geometry answering ray queries.
//!
//! Levels are described as a set of planar patches with a rectangular
//! footprint on the x/z plane. This is enough to author floors, ramps, and
//! ledges for headless runs and tests; hosts with a real physics engine
//! implement [`RaycastProvider`] themselves.

use bevy::prelude::Resource;
use glam::{Vec2, Vec3};

use crate::capabilities::{LayerMask, RayHit, RaycastProvider};
use crate::vector_math::safe_normalize;

/// Denominators below this are treated as rays parallel to the surface.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A planar surface patch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPatch {
    /// A point on the plane; also the centre of the footprint.
    pub centre: Vec3,
    /// Unit normal of the plane.
    pub normal: Vec3,
    /// Half extents of the footprint along world x and z.
    pub half_extents: Vec2,
    /// Layers this patch belongs to.
    pub layers: LayerMask,
}

impl GroundPatch {
    /// An unbounded horizontal floor at `height` on the ground layer.
    #[must_use]
    pub fn floor(height: f32) -> Self {
        Self {
            centre: Vec3::new(0.0, height, 0.0),
            normal: Vec3::Y,
            half_extents: Vec2::splat(f32::INFINITY),
            layers: LayerMask::GROUND,
        }
    }

    /// A ramp rising along +x by `angle_degrees`, passing through `centre`.
    #[must_use]
    pub fn ramp(centre: Vec3, angle_degrees: f32, half_extents: Vec2) -> Self {
        let radians = angle_degrees.to_radians();
        Self {
            centre,
            normal: Vec3::new(-radians.sin(), radians.cos(), 0.0),
            half_extents,
            layers: LayerMask::GROUND,
        }
    }

    /// Moves the patch onto `layers`.
    #[must_use]
    pub const fn on_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    fn contains_footprint(&self, point: Vec3) -> bool {
        (point.x - self.centre.x).abs() <= self.half_extents.x
            && (point.z - self.centre.z).abs() <= self.half_extents.y
    }

    /// Intersects a ray with this patch.
    #[must_use]
    pub fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = safe_normalize(direction);
        let normal = safe_normalize(self.normal);
        let denom = dir.dot(normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = (self.centre - origin).dot(normal) / denom;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        let point = origin + dir * distance;
        self.contains_footprint(point).then_some(RayHit {
            point,
            normal,
            distance,
        })
    }
}

/// All walkable geometry of a level.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct StaticGround {
    /// Patches making up the level.
    pub patches: Vec<GroundPatch>,
}

impl StaticGround {
    /// Builds a level from the supplied patches.
    #[must_use]
    pub const fn new(patches: Vec<GroundPatch>) -> Self {
        Self { patches }
    }

    /// A level consisting of a single flat floor at `height`.
    #[must_use]
    pub fn flat(height: f32) -> Self {
        Self::new(vec![GroundPatch::floor(height)])
    }
}

impl RaycastProvider for StaticGround {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        self.patches
            .iter()
            .filter(|patch| patch.layers.intersects(layers))
            .filter_map(|patch| patch.intersect(origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
