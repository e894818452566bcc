// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for the warmup engine.
//!
//! This module provides pitch naming and parsing plus the fixed chord
//! shapes used for chord intros.

pub mod chord;
pub mod pitch;

pub use chord::ChordQuality;
pub use pitch::{parse_pitch, pitch_name, Note, Pitch, Semitones};
