//! Alert fan-out to nearby listeners.

use glam::Vec3;
use log::debug;

use crate::capabilities::ListenerRegistry;

/// Outcome of one broadcast. Never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseEvent {
    /// Where the noise was made.
    pub origin: Vec3,
    /// How far it carried.
    pub radius: f32,
    /// Number of distinct listeners alerted.
    pub alerted: usize,
}

/// Alerts every listener within `radius` of `origin`.
///
/// Each listener is notified once, with `origin` as the source, even if the
/// registry reports it more than once.
pub fn broadcast(listeners: &mut dyn ListenerRegistry, origin: Vec3, radius: f32) -> NoiseEvent {
    let mut heard = listeners.listeners_within(origin, radius);
    heard.sort_unstable();
    heard.dedup();
    for &listener in &heard {
        listeners.alert(listener, origin);
    }
    debug!(
        "noise at {origin:?} with radius {radius} alerted {} listener(s)",
        heard.len()
    );
    NoiseEvent {
        origin,
        radius,
        alerted: heard.len(),
    }
}
