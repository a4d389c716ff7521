#![cfg_attr(docsrs, feature(doc_cfg))]
//! Stealth player locomotion and noise signalling.
//!
//! [`MovementController`] drives walking, sprinting, climbing, slope handling,
//! and jumping through small engine traits. [`NoiseSignal`] turns footsteps,
//! landings, and the player's call into ripples and alerts for nearby
//! listeners. [`SkulkPlugin`] hosts both inside a Bevy app.
pub mod capabilities;
pub mod config;
pub mod constants;
pub mod error;
pub mod ground;
pub mod logging;
pub mod movement;
pub mod noise;
pub mod physics;
pub mod plugin;
pub mod sound_gage;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use capabilities::{
    AnimationSampler, AudioEmitter, LayerMask, ListenerId, ListenerRegistry, PhysicsBody, RayHit,
    RaycastProvider, RippleEffect,
};
pub use config::{KeyBindings, MovementSettings, NoiseSettings, SkulkConfig};
pub use error::ConfigError;
pub use ground::{GroundPatch, StaticGround};
pub use logging::init as init_logging;
pub use movement::{
    ActorPose, ClimbState, FrameReport, MoveReport, MovementController, MovementInput, MovementState,
};
pub use noise::{NoiseContext, NoiseEvent, NoiseSignal, StepCue};
pub use physics::{ForceMode, KinematicBody};
pub use plugin::{NoiseAlert, NoiseCue, NoiseListener, NoiseTrigger, Player, SkulkPlugin};
pub use sound_gage::{SoundGage, SoundIntensity};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use skulk::prelude::*;
    //! ```

    pub use crate::ActorPose;
    pub use crate::ForceMode;
    pub use crate::MovementController;
    pub use crate::MovementInput;
    pub use crate::MovementSettings;
    pub use crate::MovementState;
    pub use crate::NoiseSettings;
    pub use crate::NoiseSignal;
    pub use crate::Player;
    pub use crate::SkulkPlugin;
    pub use crate::StaticGround;
    pub use glam::Vec3;
}
