// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard window projection.

use super::expander::transposition_offsets;
use crate::error::Result;
use crate::exercise::{DisplayRange, ExerciseDefinition, ExerciseKind};
use crate::music::pitch::{to_pitch, Pitch, Semitones};

/// Smallest window covering `base` and every pitch the exercise will
/// sound from `root`.
///
/// The result only ever widens `base`. Static exercises return `base`
/// unchanged.
pub fn project(
    exercise: &ExerciseDefinition,
    root: Pitch,
    base: DisplayRange,
) -> Result<DisplayRange> {
    if exercise.kind == ExerciseKind::Static {
        return Ok(base);
    }

    let Some((&low, &high)) = exercise
        .pattern
        .iter()
        .min()
        .zip(exercise.pattern.iter().max())
    else {
        return Ok(base);
    };

    let mut range = base;
    for offset in transposition_offsets(exercise)? {
        let shifted: Semitones = root as Semitones + offset;
        range.include(to_pitch(shifted + low)?);
        range.include(to_pitch(shifted + high)?);
    }
    Ok(range)
}
