//! Sound gage hint fed by the movement controller.
//!
//! The gage is a HUD waveform whose amplitude and frequency hint at how loud
//! the player currently is. It is advisory only: enemies never read it.

use bevy::prelude::Component;

use crate::{
    GAGE_INITIAL_AMPLITUDE, GAGE_MINIMAL_AMPLITUDE, GAGE_MINIMAL_FREQUENCY,
    GAGE_MODERATE_AMPLITUDE, GAGE_MODERATE_FREQUENCY,
};

/// Intensity bands the movement controller reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundIntensity {
    /// Idle or airborne.
    Minimal,
    /// Moving on the ground.
    Moderate,
}

impl SoundIntensity {
    /// Amplitude and frequency shown for this band.
    #[must_use]
    pub const fn waveform(self) -> (f32, f32) {
        match self {
            Self::Minimal => (GAGE_MINIMAL_AMPLITUDE, GAGE_MINIMAL_FREQUENCY),
            Self::Moderate => (GAGE_MODERATE_AMPLITUDE, GAGE_MODERATE_FREQUENCY),
        }
    }
}

/// Waveform parameters displayed by the HUD.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SoundGage {
    /// Wave amplitude.
    pub amplitude: f32,
    /// Wave frequency.
    pub frequency: f32,
}

impl Default for SoundGage {
    fn default() -> Self {
        Self {
            amplitude: GAGE_INITIAL_AMPLITUDE,
            frequency: GAGE_MINIMAL_FREQUENCY,
        }
    }
}

impl SoundGage {
    /// Shows the waveform for `intensity`.
    pub fn show(&mut self, intensity: SoundIntensity) {
        let (amplitude, frequency) = intensity.waveform();
        self.amplitude = amplitude;
        self.frequency = frequency;
    }
}
