//! Noise made by the player and the alerts it raises.
//!
//! Footsteps, landings, and the manual call each play a ripple effect and
//! set the alert radius. Every listener inside that radius is then alerted
//! with the player's position. How a listener reacts is up to the host.

mod broadcast;

use bevy::prelude::Component;
use glam::Vec3;
use log::debug;

use crate::capabilities::{AnimationSampler, AudioEmitter, ListenerRegistry, RippleEffect};
use crate::config::NoiseSettings;
use crate::{CALL_AUDIO_EVENT, LOUD_STEP_THRESHOLD, QUIET_STEP_THRESHOLD, SPEED_PARAMETER};

pub use broadcast::{broadcast, NoiseEvent};

/// Which of the two ripple effects to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RippleKind {
    /// Small ripple for sneaking steps.
    Quiet,
    /// Large ripple for running steps, landings, and calls.
    Loud,
}

/// Animation callbacks that can make noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepCue {
    /// A foot touched down in a walk or run cycle.
    Step,
    /// A foot touched down in a sneak cycle.
    QuietStep,
    /// The actor landed from a fall or jump.
    Land,
}

/// Collaborators a noise operation acts on.
pub struct NoiseContext<'a> {
    /// Actor position; the origin of every alert.
    pub origin: Vec3,
    /// Ripple shown for quiet steps.
    pub quiet_ripple: &'a mut dyn RippleEffect,
    /// Ripple shown for loud noises.
    pub loud_ripple: &'a mut dyn RippleEffect,
    /// Audio sink for the manual call.
    pub audio: &'a mut dyn AudioEmitter,
    /// Listeners that may hear the noise.
    pub listeners: &'a mut dyn ListenerRegistry,
}

impl<'a> NoiseContext<'a> {
    fn ripple(&mut self, kind: RippleKind) -> &mut (dyn RippleEffect + 'a) {
        match kind {
            RippleKind::Quiet => &mut *self.quiet_ripple,
            RippleKind::Loud => &mut *self.loud_ripple,
        }
    }
}

/// Noise state of one actor.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct NoiseSignal {
    settings: NoiseSettings,
    alert_radius: f32,
}

impl NoiseSignal {
    /// Creates a silent signal using `settings`.
    #[must_use]
    pub const fn new(settings: NoiseSettings) -> Self {
        Self {
            settings,
            alert_radius: 0.0,
        }
    }

    /// Replaces the tuning. The current radius is kept.
    pub fn reconfigure(&mut self, settings: NoiseSettings) {
        self.settings = settings;
    }

    /// Active tuning.
    #[must_use]
    pub const fn settings(&self) -> &NoiseSettings {
        &self.settings
    }

    /// Radius of the most recent noise; `0.0` once ripples stop.
    #[must_use]
    pub const fn alert_radius(&self) -> f32 {
        self.alert_radius
    }

    /// The player's deliberate call: loud ripple, call audio, and an alert
    /// at loud range.
    pub fn trigger_manual(&mut self, ctx: &mut NoiseContext<'_>) -> NoiseEvent {
        ctx.loud_ripple.play();
        ctx.audio.post(CALL_AUDIO_EVENT);
        self.emit(RippleKind::Loud, ctx)
    }

    /// Walk or run footstep. Loud when `anim_speed` reaches the loud
    /// threshold; otherwise an idle actor stops its ripples.
    pub fn step(
        &mut self,
        anim_speed: f32,
        idle: bool,
        ctx: &mut NoiseContext<'_>,
    ) -> Option<NoiseEvent> {
        if anim_speed >= LOUD_STEP_THRESHOLD {
            ctx.loud_ripple.play();
            return Some(self.emit(RippleKind::Loud, ctx));
        }
        if idle {
            self.ripple_stop(ctx);
        }
        None
    }

    /// Sneaking footstep, audible only strictly between the quiet and loud
    /// thresholds.
    pub fn quiet_step(
        &mut self,
        anim_speed: f32,
        idle: bool,
        ctx: &mut NoiseContext<'_>,
    ) -> Option<NoiseEvent> {
        if anim_speed > QUIET_STEP_THRESHOLD && anim_speed < LOUD_STEP_THRESHOLD {
            ctx.quiet_ripple.play();
            return Some(self.emit(RippleKind::Quiet, ctx));
        }
        if idle {
            self.ripple_stop(ctx);
        }
        None
    }

    /// Landing always makes a loud noise.
    pub fn land(&mut self, ctx: &mut NoiseContext<'_>) -> NoiseEvent {
        ctx.loud_ripple.play();
        self.emit(RippleKind::Loud, ctx)
    }

    /// Silences the actor: radius drops to zero and any playing ripple stops.
    pub fn ripple_stop(&mut self, ctx: &mut NoiseContext<'_>) {
        self.alert_radius = 0.0;
        for kind in [RippleKind::Quiet, RippleKind::Loud] {
            let ripple = ctx.ripple(kind);
            if ripple.is_playing() {
                ripple.stop();
            }
        }
    }

    /// Alerts listeners around `ctx.origin` using the current radius.
    pub fn broadcast(&self, ctx: &mut NoiseContext<'_>) -> NoiseEvent {
        broadcast(ctx.listeners, ctx.origin, self.alert_radius)
    }

    /// Dispatches an animation callback, reading the locomotion speed from
    /// `sampler`.
    pub fn handle_cue(
        &mut self,
        cue: StepCue,
        sampler: &dyn AnimationSampler,
        idle: bool,
        ctx: &mut NoiseContext<'_>,
    ) -> Option<NoiseEvent> {
        let speed = sampler.float_parameter(SPEED_PARAMETER);
        debug!("{cue:?} cue at animation speed {speed}");
        match cue {
            StepCue::Step => self.step(speed, idle, ctx),
            StepCue::QuietStep => self.quiet_step(speed, idle, ctx),
            StepCue::Land => Some(self.land(ctx)),
        }
    }

    fn emit(&mut self, kind: RippleKind, ctx: &mut NoiseContext<'_>) -> NoiseEvent {
        self.alert_radius = match kind {
            RippleKind::Quiet => self.settings.quiet_range,
            RippleKind::Loud => self.settings.loud_range,
        };
        self.broadcast(ctx)
    }
}
