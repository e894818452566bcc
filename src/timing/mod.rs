// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing and clock module.
//!
//! This module provides the clock abstraction the playback controller
//! arms its triggers against, and tempo-to-duration conversion.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};

use crate::error::{ConfigurationError, Result};

/// Milliseconds per minute
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// A validated tempo in beats per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tempo(f64);

impl Tempo {
    /// Create a tempo, rejecting non-positive or non-finite values
    pub fn new(bpm: f64) -> Result<Self> {
        if bpm.is_finite() && bpm > 0.0 {
            Ok(Self(bpm))
        } else {
            Err(ConfigurationError::InvalidTempo(bpm))
        }
    }

    /// Tempo in BPM
    pub fn bpm(&self) -> f64 {
        self.0
    }

    /// Length of one beat (rhythm multiplier 1.0) in milliseconds
    pub fn beat_millis(&self) -> f64 {
        MILLIS_PER_MINUTE / self.0
    }

    /// Convert a duration in beats to milliseconds
    pub fn beats_to_millis(&self, beats: f64) -> f64 {
        beats * self.beat_millis()
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self(120.0)
    }
}
