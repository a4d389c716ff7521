//! Noise collaborators that record what they were asked to do.

use glam::Vec3;
use skulk::{
    AnimationSampler, AudioEmitter, ListenerId, ListenerRegistry, NoiseContext, RippleEffect,
    SPEED_PARAMETER,
};

/// Ripple effect counting plays and stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FakeRipple {
    pub playing: bool,
    pub plays: usize,
    pub stops: usize,
}

impl RippleEffect for FakeRipple {
    fn play(&mut self) {
        self.playing = true;
        self.plays += 1;
    }

    fn stop(&mut self) {
        self.playing = false;
        self.stops += 1;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Audio sink keeping every posted event name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingAudio(pub Vec<String>);

impl AudioEmitter for RecordingAudio {
    fn post(&mut self, event: &str) {
        self.0.push(event.to_owned());
    }
}

/// Animator reporting a fixed locomotion speed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedAnimation(pub f32);

impl AnimationSampler for FixedAnimation {
    fn float_parameter(&self, name: &str) -> f32 {
        if name == SPEED_PARAMETER {
            self.0
        } else {
            0.0
        }
    }
}

/// Listeners at fixed positions. The id of a listener is its index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListenerSet {
    pub positions: Vec<Vec3>,
    pub alerts: Vec<(ListenerId, Vec3)>,
}

impl ListenerSet {
    /// Registry holding listeners at `positions`.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use skulk::ListenerRegistry;
    /// use test_utils::ListenerSet;
    /// let set = ListenerSet::at([Vec3::ZERO, Vec3::X * 10.0]);
    /// assert_eq!(set.listeners_within(Vec3::ZERO, 5.0).len(), 1);
    /// ```
    pub fn at(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
            alerts: Vec::new(),
        }
    }

    /// How many times the listener at `index` was alerted.
    pub fn alert_count(&self, index: u64) -> usize {
        self.alerts
            .iter()
            .filter(|(id, _)| *id == ListenerId(index))
            .count()
    }
}

impl ListenerRegistry for ListenerSet {
    fn listeners_within(&self, centre: Vec3, radius: f32) -> Vec<ListenerId> {
        (0_u64..)
            .zip(&self.positions)
            .filter(|(_, position)| position.distance(centre) <= radius)
            .map(|(id, _)| ListenerId(id))
            .collect()
    }

    fn alert(&mut self, listener: ListenerId, source: Vec3) {
        self.alerts.push((listener, source));
    }
}

/// Every collaborator a noise call needs, owned in one place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoiseRig {
    pub quiet: FakeRipple,
    pub loud: FakeRipple,
    pub audio: RecordingAudio,
    pub listeners: ListenerSet,
}

impl NoiseRig {
    /// Rig whose listeners stand at `positions`.
    pub fn with_listeners(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            listeners: ListenerSet::at(positions),
            ..Self::default()
        }
    }

    /// Borrows the rig as a context for a noise made at `origin`.
    pub fn context(&mut self, origin: Vec3) -> NoiseContext<'_> {
        NoiseContext {
            origin,
            quiet_ripple: &mut self.quiet,
            loud_ripple: &mut self.loud,
            audio: &mut self.audio,
            listeners: &mut self.listeners,
        }
    }
}
