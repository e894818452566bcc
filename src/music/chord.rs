// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Fixed chord shapes for pitch-orientation intros.

use serde::{Deserialize, Serialize};

use super::pitch::{Pitch, MAX_PITCH};

/// Chord family sounded before each sequence instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    /// Root, major third, fifth
    #[default]
    Major,
    /// Root, minor third, fifth
    Minor,
    /// Root, fifth, octave
    Power,
    /// Root and octave
    Octave,
}

impl ChordQuality {
    /// Intervals in semitones above the chord root
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Power => &[0, 7, 12],
            ChordQuality::Octave => &[0, 12],
        }
    }

    /// Absolute chord pitches built on `root`.
    ///
    /// Tones that would fall above the MIDI range are dropped.
    pub fn pitches(self, root: Pitch) -> Vec<Pitch> {
        self.intervals()
            .iter()
            .filter_map(|&i| root.checked_add(i))
            .filter(|&p| p <= MAX_PITCH)
            .collect()
    }
}
