// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for exercise expansion and playback setup.

use thiserror::Error;

/// Caller-side configuration mistakes.
///
/// These are surfaced synchronously from `play`, expansion and scheduling
/// and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown exercise: {0}")]
    UnknownExercise(String),
    #[error("no range profile for vocal part: {0}")]
    UnknownVocalPart(String),
    #[error("unknown rhythm preset: {0}")]
    UnknownRhythmPreset(String),
    #[error("rhythm has {actual} values but the pattern has {expected} notes")]
    RhythmLengthMismatch { expected: usize, actual: usize },
    #[error("rhythm value {value} at position {index} must be positive and finite")]
    InvalidRhythmValue { index: usize, value: f64 },
    #[error(
        "exercise {exercise} has {pattern} pattern notes, {rhythm} rhythm values \
         and {syllables} syllables"
    )]
    PatternLengthMismatch {
        exercise: String,
        pattern: usize,
        rhythm: usize,
        syllables: usize,
    },
    #[error("exercise {exercise} has no notes")]
    EmptyPattern { exercise: String },
    #[error("exercise {exercise} needs at least one iteration, got {iterations}")]
    InvalidIterations { exercise: String, iterations: u32 },
    #[error("exercise {exercise} needs a positive step size, got {step}")]
    InvalidStepSize { exercise: String, step: i32 },
    #[error("tempo must be a positive number of BPM, got {0}")]
    InvalidTempo(f64),
    #[error("timing.{field} is out of range: {value}")]
    InvalidTiming { field: &'static str, value: f64 },
    #[error("exercise {exercise} cannot loop: the session has no length")]
    EmptyLoop { exercise: String },
    #[error("pitch {0} is outside the MIDI range 0-127")]
    PitchOutOfRange(i32),
    #[error("invalid pitch name: {0}")]
    InvalidPitchName(String),
    #[error("display range {first}..{last} is inverted")]
    InvalidDisplayRange { first: u8, last: u8 },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
