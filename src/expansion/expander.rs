// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequence expansion.
//!
//! Each exercise kind maps to a list of transposition offsets; every
//! offset yields one `SequenceInstance` with concrete pitches.

use crate::error::{ConfigurationError, Result};
use crate::exercise::{validate_rhythm, ExerciseDefinition, ExerciseKind};
use crate::music::pitch::{to_pitch, Pitch, Semitones};

/// One concrete, transposed rendering of an exercise pattern
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceInstance {
    /// Transposition applied to the whole pattern
    pub offset: Semitones,
    /// Vocal root shifted by `offset`; the chord intro is built on it
    pub root: Pitch,
    /// Absolute pitches, one per pattern note
    pub pitches: Vec<Pitch>,
    /// Duration multipliers in beats, parallel to `pitches`
    pub rhythm: Vec<f64>,
    /// Syllables, parallel to `pitches`
    pub syllables: Vec<String>,
    /// Transposition tag such as "(+2)"; absent when untransposed
    pub label: Option<String>,
}

impl SequenceInstance {
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// Total length of the instance in beats
    pub fn beats(&self) -> f64 {
        self.rhythm.iter().sum()
    }

    /// Iterate `(pitch, beats, syllable)` triples in order
    pub fn notes(&self) -> impl Iterator<Item = (Pitch, f64, &str)> + '_ {
        self.pitches
            .iter()
            .zip(&self.rhythm)
            .zip(&self.syllables)
            .map(|((&p, &r), s)| (p, r, s.as_str()))
    }
}

/// Transposition offsets, in play order, for an exercise.
///
/// A roundtrip descends for `iterations` steps and then retraces the
/// descent without repeating its lowest instance, so it yields
/// `2 * iterations - 1` offsets.
pub fn transposition_offsets(exercise: &ExerciseDefinition) -> Result<Vec<Semitones>> {
    let Some((step, iterations)) = exercise.kind.transposition() else {
        return Ok(vec![0]);
    };

    if iterations < 1 {
        return Err(ConfigurationError::InvalidIterations {
            exercise: exercise.id.clone(),
            iterations,
        });
    }
    if step < 1 {
        return Err(ConfigurationError::InvalidStepSize {
            exercise: exercise.id.clone(),
            step,
        });
    }

    let n = iterations as Semitones;
    let offsets = match exercise.kind {
        ExerciseKind::Static => vec![0],
        ExerciseKind::Ascending { .. } => (0..n).map(|i| step * i).collect(),
        ExerciseKind::Descending { .. } => (0..n).map(|i| -step * i).collect(),
        ExerciseKind::Roundtrip { .. } => (0..n)
            .chain((0..n - 1).rev())
            .map(|i| -step * i)
            .collect(),
    };
    Ok(offsets)
}

fn transposition_label(offset: Semitones) -> Option<String> {
    match offset {
        0 => None,
        o if o > 0 => Some(format!("(+{})", o)),
        o => Some(format!("({})", o)),
    }
}

/// Expand an exercise into its ordered sequence instances.
///
/// `override_rhythm`, when given, replaces the base rhythm for every
/// instance.
pub fn expand(
    exercise: &ExerciseDefinition,
    root: Pitch,
    override_rhythm: Option<&[f64]>,
) -> Result<Vec<SequenceInstance>> {
    exercise.validate()?;

    let rhythm = match override_rhythm {
        Some(custom) => {
            validate_rhythm(custom, exercise.pattern.len())?;
            custom.to_vec()
        }
        None => exercise.rhythm.clone(),
    };

    transposition_offsets(exercise)?
        .into_iter()
        .map(|offset| {
            let shifted_root = root as Semitones + offset;
            let pitches = exercise
                .pattern
                .iter()
                .map(|&p| to_pitch(shifted_root + p))
                .collect::<Result<Vec<_>>>()?;

            Ok(SequenceInstance {
                offset,
                root: to_pitch(shifted_root)?,
                pitches,
                rhythm: rhythm.clone(),
                syllables: exercise.syllables.clone(),
                label: transposition_label(offset),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::ChordQuality;

    fn exercise(kind: ExerciseKind, pattern: Vec<Semitones>) -> ExerciseDefinition {
        let len = pattern.len();
        ExerciseDefinition {
            id: "test".to_string(),
            name: "Test".to_string(),
            kind,
            pattern,
            rhythm: vec![1.0; len],
            syllables: vec!["la".to_string(); len],
            chord: ChordQuality::Major,
        }
    }

    fn offsets(instances: &[SequenceInstance]) -> Vec<Semitones> {
        instances.iter().map(|i| i.offset).collect()
    }

    #[test]
    fn test_static_single_instance() {
        let ex = exercise(ExerciseKind::Static, vec![0, 4, 7]);
        let instances = expand(&ex, 60, None).unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].offset, 0);
        assert_eq!(instances[0].pitches, vec![60, 64, 67]);
        assert_eq!(instances[0].label, None);
    }

    #[test]
    fn test_ascending_offsets() {
        let ex = exercise(ExerciseKind::Ascending { step: 1, iterations: 4 }, vec![0, 2]);
        let instances = expand(&ex, 48, None).unwrap();
        assert_eq!(offsets(&instances), vec![0, 1, 2, 3]);
        assert_eq!(instances[3].pitches, vec![51, 53]);
        assert_eq!(instances[3].root, 51);
        assert_eq!(instances[0].label, None);
        assert_eq!(instances[2].label.as_deref(), Some("(+2)"));
    }

    #[test]
    fn test_descending_offsets() {
        let ex = exercise(ExerciseKind::Descending { step: 3, iterations: 3 }, vec![0]);
        let instances = expand(&ex, 60, None).unwrap();
        assert_eq!(offsets(&instances), vec![0, -3, -6]);
        assert_eq!(instances[1].label.as_deref(), Some("(-3)"));
        assert_eq!(instances[2].pitches, vec![54]);
    }

    #[test]
    fn test_roundtrip_palindrome() {
        for n in 1..=7u32 {
            let ex = exercise(ExerciseKind::Roundtrip { step: 1, iterations: n }, vec![0, 7]);
            let got = offsets(&expand(&ex, 60, None).unwrap());
            assert_eq!(got.len(), 2 * n as usize - 1);

            let mut reversed = got.clone();
            reversed.reverse();
            assert_eq!(got, reversed);

            let centre = got.len() / 2;
            let min = *got.iter().min().unwrap();
            assert_eq!(got[centre], min);
            assert_eq!(got.iter().filter(|&&o| o == min).count(), 1);
        }
    }

    #[test]
    fn test_roundtrip_single_iteration() {
        let ex = exercise(ExerciseKind::Roundtrip { step: 2, iterations: 1 }, vec![0, 7, 0]);
        let instances = expand(&ex, 60, None).unwrap();
        assert_eq!(offsets(&instances), vec![0]);
    }

    #[test]
    fn test_fifths_round_trip_offsets() {
        let ex = exercise(ExerciseKind::Roundtrip { step: 2, iterations: 6 }, vec![0, 7, 0]);
        let instances = expand(&ex, 60, None).unwrap();
        assert_eq!(instances.len(), 11);
        assert_eq!(
            offsets(&instances),
            vec![0, -2, -4, -6, -8, -10, -8, -6, -4, -2, 0]
        );
        assert_eq!(instances[5].pitches, vec![50, 57, 50]);
        assert_eq!(instances[10].label, None);
    }

    #[test]
    fn test_override_rhythm_applies_to_every_instance() {
        let ex = exercise(ExerciseKind::Ascending { step: 2, iterations: 3 }, vec![0, 2, 4]);
        let custom = [0.5, 0.5, 2.0];
        let instances = expand(&ex, 60, Some(&custom)).unwrap();
        assert!(instances.iter().all(|i| i.rhythm == custom.to_vec()));
        assert_eq!(instances[0].beats(), 3.0);
    }

    #[test]
    fn test_override_rhythm_length_mismatch() {
        let ex = exercise(ExerciseKind::Static, vec![0, 2, 4]);
        assert_eq!(
            expand(&ex, 60, Some(&[1.0, 1.0])),
            Err(ConfigurationError::RhythmLengthMismatch { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_invalid_iterations() {
        let ex = exercise(ExerciseKind::Ascending { step: 1, iterations: 0 }, vec![0]);
        assert!(matches!(
            transposition_offsets(&ex),
            Err(ConfigurationError::InvalidIterations { iterations: 0, .. })
        ));
        assert!(expand(&ex, 60, None).is_err());
    }

    #[test]
    fn test_pitch_out_of_range() {
        let ex = exercise(ExerciseKind::Descending { step: 12, iterations: 3 }, vec![0]);
        assert_eq!(
            expand(&ex, 10, None),
            Err(ConfigurationError::PitchOutOfRange(-2))
        );
    }

    #[test]
    fn test_notes_iterator() {
        let mut ex = exercise(ExerciseKind::Static, vec![0, 7]);
        ex.syllables = vec!["do".into(), "sol".into()];
        let instance = &expand(&ex, 60, None).unwrap()[0];
        let notes: Vec<_> = instance.notes().collect();
        assert_eq!(notes, vec![(60, 1.0, "do"), (67, 1.0, "sol")]);
    }
}
