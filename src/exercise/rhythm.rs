// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named rhythm transforms.
//!
//! A preset maps an exercise's base rhythm to a custom rhythm of the same
//! length. The result is applied exercise-wide, to every transposed
//! instance alike.

use std::fmt;

use crate::error::{ConfigurationError, Result};

/// A named, pure rhythm transform
#[derive(Clone, Copy)]
pub struct RhythmPreset {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Base rhythm to custom rhythm
    pub transform: fn(&[f64]) -> Vec<f64>,
}

impl RhythmPreset {
    /// Apply the preset to a base rhythm
    pub fn apply(&self, base: &[f64]) -> Vec<f64> {
        (self.transform)(base)
    }
}

impl fmt::Debug for RhythmPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RhythmPreset")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

fn original(base: &[f64]) -> Vec<f64> {
    base.to_vec()
}

fn even(base: &[f64]) -> Vec<f64> {
    vec![1.0; base.len()]
}

fn double_time(base: &[f64]) -> Vec<f64> {
    base.iter().map(|v| v * 0.5).collect()
}

fn half_time(base: &[f64]) -> Vec<f64> {
    base.iter().map(|v| v * 2.0).collect()
}

fn long_final(base: &[f64]) -> Vec<f64> {
    let mut rhythm = base.to_vec();
    if let Some(last) = rhythm.last_mut() {
        *last *= 2.0;
    }
    rhythm
}

/// Long-short pairs; an unpaired trailing note keeps its value
fn swing(base: &[f64]) -> Vec<f64> {
    let paired = base.len() - base.len() % 2;
    base.iter()
        .enumerate()
        .map(|(i, v)| {
            if i >= paired {
                *v
            } else if i % 2 == 0 {
                v * 1.5
            } else {
                v * 0.5
            }
        })
        .collect()
}

static PRESETS: [RhythmPreset; 6] = [
    RhythmPreset { id: "original", name: "Original", transform: original },
    RhythmPreset { id: "even", name: "Even Beats", transform: even },
    RhythmPreset { id: "doubleTime", name: "Double Time", transform: double_time },
    RhythmPreset { id: "halfTime", name: "Half Time", transform: half_time },
    RhythmPreset { id: "longFinal", name: "Long Final Note", transform: long_final },
    RhythmPreset { id: "swing", name: "Swing", transform: swing },
];

/// All presets in display order
pub fn list_rhythm_presets() -> &'static [RhythmPreset] {
    &PRESETS
}

/// Look up a preset by identifier
pub fn rhythm_preset(id: &str) -> Result<&'static RhythmPreset> {
    PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ConfigurationError::UnknownRhythmPreset(id.to_string()))
}

/// Check a rhythm against the pattern it will drive
pub fn validate_rhythm(rhythm: &[f64], pattern_len: usize) -> Result<()> {
    if rhythm.len() != pattern_len {
        return Err(ConfigurationError::RhythmLengthMismatch {
            expected: pattern_len,
            actual: rhythm.len(),
        });
    }
    if let Some((index, &value)) = rhythm
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v <= 0.0)
    {
        return Err(ConfigurationError::InvalidRhythmValue { index, value });
    }
    Ok(())
}
