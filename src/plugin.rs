//! Bevy plugin hosting the player controller and its noise.
//!
//! Per-frame work (input, ground sensing, jumping, noise cues) runs in
//! `Update`; locomotion forces and body integration run in `FixedUpdate`.
//! Rendering, animation, and audio playback stay with the host: it feeds
//! [`AnimationSpeed`] and [`NoiseCue`] in and reads [`Ripples`],
//! [`SoundGage`], [`NoiseAlert`], and [`AudioEventPosted`] back out.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;
use log::debug;

use crate::capabilities::{
    AnimationSampler, AudioEmitter, LayerMask, ListenerId, ListenerRegistry, RaycastProvider,
    RippleEffect,
};
use crate::config::{KeyBindings, MovementSettings, NoiseSettings};
use crate::ground::StaticGround;
use crate::movement::{axis, ActorPose, ClimbState, MovementController, MovementInput};
use crate::noise::{NoiseContext, NoiseSignal, StepCue};
use crate::physics::KinematicBody;
use crate::sound_gage::SoundGage;
use crate::SPEED_PARAMETER;

/// Marks the player-controlled actor.
///
/// Spawning it pulls in every component the controller needs.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
#[require(
    Transform,
    MovementController,
    MovementInput,
    KinematicBody,
    ClimbState,
    SoundGage,
    NoiseSignal,
    AnimationSpeed,
    Ripples
)]
pub struct Player;

/// Locomotion speed published by the host's animator.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationSpeed(pub f32);

impl AnimationSampler for AnimationSpeed {
    fn float_parameter(&self, name: &str) -> f32 {
        if name == SPEED_PARAMETER {
            self.0
        } else {
            0.0
        }
    }
}

/// Run state of one ripple particle effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RippleState {
    /// Whether the effect is running.
    pub playing: bool,
    /// How many times it has been (re)started.
    pub plays: u32,
}

impl RippleEffect for RippleState {
    fn play(&mut self) {
        self.playing = true;
        self.plays = self.plays.saturating_add(1);
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// The actor's two ripple effects, mirrored by the renderer.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ripples {
    /// Ripple for sneaking steps.
    pub quiet: RippleState,
    /// Ripple for loud noises.
    pub loud: RippleState,
}

/// An entity that can hear the player.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseListener {
    /// Origin of the last noise this listener was alerted to.
    pub last_heard: Option<Vec3>,
}

/// What made a [`NoiseCue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseTrigger {
    /// The player's deliberate call.
    Call,
    /// An animation callback.
    Animation(StepCue),
}

/// Request for an actor to make noise.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseCue {
    /// Actor making the noise.
    pub actor: Entity,
    /// Cause of the noise.
    pub trigger: NoiseTrigger,
}

/// A listener heard a noise.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct NoiseAlert {
    /// Listener that heard it.
    pub listener: Entity,
    /// Where the noise came from.
    pub source: Vec3,
}

/// An audio event the host should play.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct AudioEventPosted {
    /// Actor emitting the sound.
    pub emitter: Entity,
    /// Audio middleware event name.
    pub event: String,
}

/// Installs the controller systems and their resources.
#[derive(Debug, Default)]
pub struct SkulkPlugin;

impl Plugin for SkulkPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Player>();
        app.init_resource::<MovementSettings>();
        app.init_resource::<NoiseSettings>();
        app.init_resource::<KeyBindings>();
        app.init_resource::<StaticGround>();
        app.add_message::<NoiseCue>();
        app.add_message::<NoiseAlert>();
        app.add_message::<AudioEventPosted>();
        app.add_systems(
            Update,
            (
                apply_settings_system,
                sample_input_system,
                sample_call_system,
                movement_frame_system,
                noise_system,
                record_alerts_system,
            )
                .chain(),
        );
        app.add_systems(
            FixedUpdate,
            (movement_fixed_system, integrate_bodies_system).chain(),
        );
    }
}

/// Pushes the settings resources into new actors, and into every actor when
/// the settings change.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn apply_settings_system(
    movement: Res<MovementSettings>,
    noise: Res<NoiseSettings>,
    mut actors: Query<(Ref<Player>, &mut MovementController, &mut NoiseSignal)>,
) {
    let changed = movement.is_changed() || noise.is_changed();
    for (player, mut controller, mut signal) in &mut actors {
        if changed || player.is_added() {
            controller.reconfigure(movement.clone());
            signal.reconfigure(noise.clone());
        }
    }
}

/// Samples the keyboard into each player's [`MovementInput`].
///
/// Does nothing when no keyboard input is installed, so a host can script
/// the input directly.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sample_input_system(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    bindings: Res<KeyBindings>,
    mut inputs: Query<&mut MovementInput, With<Player>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };
    let any = |keys: [KeyCode; 2]| keyboard.any_pressed(keys);
    let sample = MovementInput {
        horizontal: axis(
            any([KeyCode::KeyA, KeyCode::ArrowLeft]),
            any([KeyCode::KeyD, KeyCode::ArrowRight]),
        ),
        vertical: axis(
            any([KeyCode::KeyS, KeyCode::ArrowDown]),
            any([KeyCode::KeyW, KeyCode::ArrowUp]),
        ),
        jump: keyboard.pressed(bindings.jump),
        sprint: keyboard.pressed(bindings.sprint),
    };
    for mut input in &mut inputs {
        *input = sample;
    }
}

/// Turns a press of the call button into a [`NoiseCue`] for each player.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn sample_call_system(
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    bindings: Res<KeyBindings>,
    players: Query<Entity, With<Player>>,
    mut cues: MessageWriter<NoiseCue>,
) {
    if !mouse.is_some_and(|buttons| buttons.just_pressed(bindings.call)) {
        return;
    }
    for actor in &players {
        cues.write(NoiseCue {
            actor,
            trigger: NoiseTrigger::Call,
        });
    }
}

/// Runs the per-frame controller phase.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn movement_frame_system(
    time: Res<Time>,
    ground: Res<StaticGround>,
    mut actors: Query<
        (
            &Transform,
            &MovementInput,
            &ClimbState,
            &mut MovementController,
            &mut KinematicBody,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (transform, input, climb, mut controller, mut body) in &mut actors {
        let pose = ActorPose::from_transform(transform);
        controller.frame_step(&pose, *input, climb.climbing, dt, &*ground, &mut *body);
    }
}

/// Runs the fixed-step controller phase.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn movement_fixed_system(
    ground: Res<StaticGround>,
    mut actors: Query<
        (
            &Transform,
            &ClimbState,
            &MovementController,
            &mut KinematicBody,
            &mut SoundGage,
        ),
        With<Player>,
    >,
) {
    for (transform, climb, controller, mut body, mut gage) in &mut actors {
        let pose = ActorPose::from_transform(transform);
        controller.fixed_step(&pose, *climb, &*ground, &mut *body, Some(&mut *gage));
    }
}

/// Moves bodies and keeps them from sinking through the ground.
///
/// After integrating, a ray is cast from where the body would have been
/// before its downward motion. If the surface under it lies above the
/// body's feet the body is lifted onto it and stops moving into it.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn integrate_bodies_system(
    time: Res<Time>,
    ground: Res<StaticGround>,
    mut bodies: Query<(
        &mut Transform,
        &mut KinematicBody,
        Option<&MovementController>,
    )>,
) {
    let dt = time.delta_secs();
    for (mut transform, mut body, controller) in &mut bodies {
        let displacement = body.integrate(dt);
        transform.translation += displacement;

        let half_height = controller.map_or_else(
            || MovementSettings::default().half_height,
            |c| c.settings().half_height,
        );
        let drop = (-displacement.y).max(0.0);
        let Some(hit) = ground.raycast(
            transform.translation + Vec3::Y * drop,
            Vec3::NEG_Y,
            half_height + drop,
            LayerMask::ALL,
        ) else {
            continue;
        };
        let floor = hit.point.y + half_height;
        if floor > transform.translation.y {
            transform.translation.y = floor;
            body.cancel_into(hit.normal);
        }
    }
}

/// Listener positions captured for one frame. Alerts are collected and
/// published as messages once the noise call returns.
struct ListenerSnapshot<'a> {
    positions: &'a [(Entity, Vec3)],
    alerts: Vec<(Entity, Vec3)>,
}

impl ListenerRegistry for ListenerSnapshot<'_> {
    fn listeners_within(&self, centre: Vec3, radius: f32) -> Vec<ListenerId> {
        (0_u64..)
            .zip(self.positions)
            .filter(|(_, (_, position))| position.distance(centre) <= radius)
            .map(|(id, _)| ListenerId(id))
            .collect()
    }

    fn alert(&mut self, listener: ListenerId, source: Vec3) {
        let entry = usize::try_from(listener.0)
            .ok()
            .and_then(|index| self.positions.get(index));
        if let Some(&(entity, _)) = entry {
            self.alerts.push((entity, source));
        }
    }
}

#[derive(Default)]
struct PostedAudio(Vec<String>);

impl AudioEmitter for PostedAudio {
    fn post(&mut self, event: &str) {
        self.0.push(event.to_owned());
    }
}

/// Resolves [`NoiseCue`]s into ripples, audio events, and alerts.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn noise_system(
    mut cues: MessageReader<NoiseCue>,
    mut actors: Query<
        (
            &Transform,
            &MovementController,
            &AnimationSpeed,
            &mut NoiseSignal,
            &mut Ripples,
        ),
        With<Player>,
    >,
    listeners: Query<(Entity, &Transform), With<NoiseListener>>,
    mut alerts: MessageWriter<NoiseAlert>,
    mut audio: MessageWriter<AudioEventPosted>,
) {
    let positions: Vec<(Entity, Vec3)> = listeners
        .iter()
        .map(|(entity, transform)| (entity, transform.translation))
        .collect();

    for cue in cues.read() {
        let Ok((transform, controller, speed, mut signal, mut ripples)) = actors.get_mut(cue.actor)
        else {
            debug!("noise cue for unknown actor {:?}", cue.actor);
            continue;
        };
        let mut registry = ListenerSnapshot {
            positions: &positions,
            alerts: Vec::new(),
        };
        let mut posted = PostedAudio::default();
        let Ripples { quiet, loud } = &mut *ripples;
        let mut ctx = NoiseContext {
            origin: transform.translation,
            quiet_ripple: quiet,
            loud_ripple: loud,
            audio: &mut posted,
            listeners: &mut registry,
        };
        match cue.trigger {
            NoiseTrigger::Call => {
                signal.trigger_manual(&mut ctx);
            }
            NoiseTrigger::Animation(step) => {
                signal.handle_cue(step, speed, controller.is_idle(), &mut ctx);
            }
        }

        for (listener, source) in registry.alerts {
            alerts.write(NoiseAlert { listener, source });
        }
        for event in posted.0 {
            audio.write(AudioEventPosted {
                emitter: cue.actor,
                event,
            });
        }
    }
}

/// Stores each alert on the listener that heard it.
pub fn record_alerts_system(
    mut alerts: MessageReader<NoiseAlert>,
    mut listeners: Query<&mut NoiseListener>,
) {
    for alert in alerts.read() {
        if let Ok(mut listener) = listeners.get_mut(alert.listener) {
            listener.last_heard = Some(alert.source);
        }
    }
}
