// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI-speaking instrument.
//!
//! `MidiInstrument` turns note triggers into raw channel voice messages
//! and hands them to any `MidiOutput`.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::{debug, warn};

use super::Instrument;
use crate::music::Pitch;

/// Trait for MIDI output implementations.
pub trait MidiOutput {
    /// Send a MIDI message immediately.
    ///
    /// # Arguments
    /// * `message` - Raw MIDI bytes (e.g., `[0x90, 60, 127]` for Note On)
    fn send(&mut self, message: &[u8]) -> Result<()>;
}

/// MIDI message constants
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const CONTROL_CHANGE: u8 = 0xB0;

    // Channel Mode Messages (control numbers)
    pub const ALL_NOTES_OFF: u8 = 123;
}

/// Output that writes every message to the log
#[derive(Debug, Default)]
pub struct LogOutput {
    sent: usize,
}

impl LogOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages sent so far
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl MidiOutput for LogOutput {
    fn send(&mut self, message: &[u8]) -> Result<()> {
        self.sent += 1;
        debug!(bytes = ?message, "midi out");
        Ok(())
    }
}

/// Instrument driving a MIDI output on one channel
pub struct MidiInstrument<O: MidiOutput> {
    output: O,
    /// MIDI channel (0-15)
    channel: u8,
    /// Whether the sound source has finished loading
    loaded: bool,
    /// Notes currently held
    held: BTreeSet<Pitch>,
}

impl<O: MidiOutput> MidiInstrument<O> {
    /// Create a ready instrument on channel 0
    pub fn new(output: O) -> Self {
        Self {
            output,
            channel: 0,
            loaded: true,
            held: BTreeSet::new(),
        }
    }

    /// Set the MIDI channel (0-15)
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel & 0x0F;
        self
    }

    /// Mark the sound source as loading; the instrument reports not ready
    pub fn begin_loading(&mut self) {
        self.release_all();
        self.loaded = false;
    }

    /// Loading completed; the instrument reports ready again
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Notes currently held
    pub fn held(&self) -> &BTreeSet<Pitch> {
        &self.held
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    fn send(&mut self, message: [u8; 3]) {
        if let Err(e) = self.output.send(&message) {
            warn!(error = %e, "failed to send MIDI message");
        }
    }
}

/// Map 0.0 - 1.0 to MIDI velocity 1 - 127
fn midi_velocity(velocity: f32) -> u8 {
    ((velocity.clamp(0.0, 1.0) * 127.0).round() as u8).max(1)
}

impl<O: MidiOutput> Instrument for MidiInstrument<O> {
    fn ready(&self) -> bool {
        self.loaded
    }

    fn trigger_note(&mut self, pitch: Pitch, velocity: f32, _duration_secs: f64) {
        // Retriggering a held note restarts it
        if self.held.contains(&pitch) {
            self.release_note(pitch);
        }
        self.send([messages::NOTE_ON | self.channel, pitch, midi_velocity(velocity)]);
        self.held.insert(pitch);
    }

    fn release_note(&mut self, pitch: Pitch) {
        if self.held.remove(&pitch) {
            self.send([messages::NOTE_OFF | self.channel, pitch, 0]);
        }
    }

    fn release_all(&mut self) {
        let held: Vec<Pitch> = self.held.iter().copied().collect();
        for pitch in held {
            self.release_note(pitch);
        }
        self.send([messages::CONTROL_CHANGE | self.channel, messages::ALL_NOTES_OFF, 0]);
    }
}
