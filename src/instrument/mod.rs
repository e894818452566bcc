// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Instrument capability consumed by the playback controller.
//!
//! The controller only ever talks to a sound source through the
//! `Instrument` trait, so synthesis backends can be swapped freely.

pub mod midi;

pub use midi::{messages, LogOutput, MidiInstrument, MidiOutput};

use crate::music::Pitch;

/// A sound source the controller can play notes on.
pub trait Instrument {
    /// Whether the instrument can accept notes.
    ///
    /// Reports `false` while a sound source is (re)loading; playback will
    /// not start until it flips back to `true`.
    fn ready(&self) -> bool;

    /// Start a note.
    ///
    /// # Arguments
    /// * `pitch` - MIDI note number
    /// * `velocity` - Loudness, 0.0 - 1.0
    /// * `duration_secs` - How long the note should sound
    fn trigger_note(&mut self, pitch: Pitch, velocity: f32, duration_secs: f64);

    /// Release a note. Fire-and-forget backends can ignore this.
    fn release_note(&mut self, _pitch: Pitch) {}

    /// Silence everything still sounding.
    fn release_all(&mut self) {}
}

impl<T: Instrument + ?Sized> Instrument for Box<T> {
    fn ready(&self) -> bool {
        (**self).ready()
    }

    fn trigger_note(&mut self, pitch: Pitch, velocity: f32, duration_secs: f64) {
        (**self).trigger_note(pitch, velocity, duration_secs)
    }

    fn release_note(&mut self, pitch: Pitch) {
        (**self).release_note(pitch)
    }

    fn release_all(&mut self) {
        (**self).release_all()
    }
}
