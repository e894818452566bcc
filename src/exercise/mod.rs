// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exercise catalog data.
//!
//! This module provides the immutable exercise definitions, the vocal
//! range profiles for each voice part, and the rhythm presets a user can
//! apply on top of an exercise's default rhythm.

pub mod catalog;
pub mod rhythm;

pub use catalog::{Catalog, ExerciseSummary};
pub use rhythm::{list_rhythm_presets, rhythm_preset, validate_rhythm, RhythmPreset};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::music::pitch::{deserialize_pitch, Pitch, Semitones};
use crate::music::ChordQuality;

/// Iteration policy of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Played once at the root
    Static,
    /// Shifted up by `step` semitones per iteration
    Ascending { step: Semitones, iterations: u32 },
    /// Shifted down by `step` semitones per iteration
    Descending { step: Semitones, iterations: u32 },
    /// Descends, then retraces back up to the root
    Roundtrip { step: Semitones, iterations: u32 },
}

impl ExerciseKind {
    /// Step size and iteration count, absent for static exercises
    pub fn transposition(&self) -> Option<(Semitones, u32)> {
        match *self {
            ExerciseKind::Static => None,
            ExerciseKind::Ascending { step, iterations }
            | ExerciseKind::Descending { step, iterations }
            | ExerciseKind::Roundtrip { step, iterations } => Some((step, iterations)),
        }
    }

    /// Lowercase kind tag as written in the catalog
    pub fn tag(&self) -> &'static str {
        match self {
            ExerciseKind::Static => "static",
            ExerciseKind::Ascending { .. } => "ascending",
            ExerciseKind::Descending { .. } => "descending",
            ExerciseKind::Roundtrip { .. } => "roundtrip",
        }
    }
}

/// A named melodic pattern with its default rhythm, syllables and
/// iteration policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Stable identifier (e.g., "fifthsRoundTrip")
    pub id: String,
    /// Display name
    pub name: String,
    /// Iteration policy
    #[serde(flatten)]
    pub kind: ExerciseKind,
    /// Semitone offsets from the vocal part's root
    pub pattern: Vec<Semitones>,
    /// Duration multipliers in beats, one per pattern note
    pub rhythm: Vec<f64>,
    /// Solfege syllables, one per pattern note
    pub syllables: Vec<String>,
    /// Chord sounded for the optional chord intro
    #[serde(default)]
    pub chord: ChordQuality,
}

impl ExerciseDefinition {
    /// Check the internal consistency of the definition
    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_empty() {
            return Err(ConfigurationError::EmptyPattern {
                exercise: self.id.clone(),
            });
        }
        if self.rhythm.len() != self.pattern.len() || self.syllables.len() != self.pattern.len() {
            return Err(ConfigurationError::PatternLengthMismatch {
                exercise: self.id.clone(),
                pattern: self.pattern.len(),
                rhythm: self.rhythm.len(),
                syllables: self.syllables.len(),
            });
        }

        validate_rhythm(&self.rhythm, self.pattern.len())?;

        if let Some((step, iterations)) = self.kind.transposition() {
            if iterations < 1 {
                return Err(ConfigurationError::InvalidIterations {
                    exercise: self.id.clone(),
                    iterations,
                });
            }
            if step < 1 {
                return Err(ConfigurationError::InvalidStepSize {
                    exercise: self.id.clone(),
                    step,
                });
            }
        }

        Ok(())
    }

    /// Sum of the default rhythm in beats
    pub fn total_beats(&self) -> f64 {
        self.rhythm.iter().sum()
    }
}

/// Voice parts with a range profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocalPart {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl VocalPart {
    /// All parts, high to low
    pub const ALL: [VocalPart; 4] = [
        VocalPart::Soprano,
        VocalPart::Alto,
        VocalPart::Tenor,
        VocalPart::Bass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VocalPart::Soprano => "soprano",
            VocalPart::Alto => "alto",
            VocalPart::Tenor => "tenor",
            VocalPart::Bass => "bass",
        }
    }
}

impl fmt::Display for VocalPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VocalPart {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "soprano" | "s" => Ok(VocalPart::Soprano),
            "alto" | "a" => Ok(VocalPart::Alto),
            "tenor" | "t" => Ok(VocalPart::Tenor),
            "bass" | "b" => Ok(VocalPart::Bass),
            _ => Err(ConfigurationError::UnknownVocalPart(s.to_string())),
        }
    }
}

/// Inclusive pitch window shown on the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRange {
    #[serde(deserialize_with = "deserialize_pitch")]
    pub first: Pitch,
    #[serde(deserialize_with = "deserialize_pitch")]
    pub last: Pitch,
}

impl DisplayRange {
    /// Create a range, rejecting `first > last`
    pub fn new(first: Pitch, last: Pitch) -> Result<Self> {
        if first > last {
            return Err(ConfigurationError::InvalidDisplayRange { first, last });
        }
        Ok(Self { first, last })
    }

    /// Widen the range so it includes `pitch`
    pub fn include(&mut self, pitch: Pitch) {
        self.first = self.first.min(pitch);
        self.last = self.last.max(pitch);
    }

    /// Whether `other` lies entirely inside this range
    pub fn covers(&self, other: &DisplayRange) -> bool {
        self.first <= other.first && other.last <= self.last
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        (self.first..=self.last).contains(&pitch)
    }

    /// Number of keys in the range
    pub fn key_count(&self) -> usize {
        (self.last - self.first) as usize + 1
    }
}

/// Root pitch and base display window for one vocal part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocalRange {
    pub part: VocalPart,
    #[serde(deserialize_with = "deserialize_pitch")]
    pub root: Pitch,
    pub display: DisplayRange,
}
