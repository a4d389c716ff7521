//! Vector helpers for angles, plane projection, and speed limiting.
use glam::Vec3;

/// Returns the unit vector in the direction of `vector`.
///
/// The function checks that all components are finite and the vector is
/// non-zero before normalising. If the input is invalid or the zero vector,
/// it returns [`Vec3::ZERO`].
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use skulk::vector_math::safe_normalize;
/// let n = safe_normalize(Vec3::new(3.0, 0.0, 4.0));
/// assert!((n.x - 0.6).abs() < 1e-6);
/// assert!((n.z - 0.8).abs() < 1e-6);
///
/// assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
/// ```
#[must_use]
pub fn safe_normalize(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Angle in degrees between world up and `normal`.
///
/// Degenerate normals report `0.0`, matching a flat floor.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use skulk::vector_math::angle_from_up;
/// assert_eq!(angle_from_up(Vec3::Y), 0.0);
/// assert!((angle_from_up(Vec3::new(1.0, 1.0, 0.0)) - 45.0).abs() < 1e-3);
/// ```
#[must_use]
pub fn angle_from_up(normal: Vec3) -> f32 {
    let unit = safe_normalize(normal);
    if unit == Vec3::ZERO {
        return 0.0;
    }
    unit.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Projects `vector` onto the plane defined by `normal`.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use skulk::vector_math::project_on_plane;
/// let flat = project_on_plane(Vec3::new(1.0, 5.0, 0.0), Vec3::Y);
/// assert_eq!(flat, Vec3::new(1.0, 0.0, 0.0));
/// ```
#[must_use]
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let unit = safe_normalize(normal);
    vector - unit * vector.dot(unit)
}

/// Scales `vector` down so its length does not exceed `max_length`.
#[must_use]
pub fn clamp_magnitude(vector: Vec3, max_length: f32) -> Vec3 {
    if vector.length() > max_length {
        safe_normalize(vector) * max_length
    } else {
        vector
    }
}

/// Limits the horizontal (x/z) speed of `velocity`, keeping `y` untouched.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use skulk::vector_math::clamp_planar;
/// let v = clamp_planar(Vec3::new(6.0, -3.0, 8.0), 5.0);
/// assert!((v.x - 3.0).abs() < 1e-5);
/// assert_eq!(v.y, -3.0);
/// assert!((v.z - 4.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn clamp_planar(velocity: Vec3, max_speed: f32) -> Vec3 {
    let flat = Vec3::new(velocity.x, 0.0, velocity.z);
    if flat.length() > max_speed {
        let limited = safe_normalize(flat) * max_speed;
        Vec3::new(limited.x, velocity.y, limited.z)
    } else {
        velocity
    }
}
