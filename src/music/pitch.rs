// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Absolute pitch numbers and their note names.
//!
//! Pitches are MIDI note numbers; `60` is middle C and renders as `C4`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigurationError, Result};

/// Absolute pitch number (MIDI note, 0-127)
pub type Pitch = u8;

/// Semitone offset type
pub type Semitones = i32;

/// Highest valid pitch number
pub const MAX_PITCH: Pitch = 127;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse a pitch class name (e.g., "C", "C#", "Db", "F#")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" | "B#" => Some(Note::C),
            "C#" | "DB" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" | "EB" => Some(Note::Ds),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" => Some(Note::F),
            "F#" | "GB" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" | "AB" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" | "BB" => Some(Note::As),
            "B" | "CB" => Some(Note::B),
            _ => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        };
        f.write_str(name)
    }
}

/// Render a pitch in scientific notation (`60` -> `C4`)
pub fn pitch_name(pitch: Pitch) -> String {
    let octave = pitch as i32 / 12 - 1;
    format!("{}{}", Note::from_pitch_class(pitch), octave)
}

/// Parse a pitch in scientific notation (`"C4"`, `"Bb2"`, `"F#-1"`)
pub fn parse_pitch(s: &str) -> Result<Pitch> {
    let trimmed = s.trim();
    let split = trimmed
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .ok_or_else(|| ConfigurationError::InvalidPitchName(s.to_string()))?;
    let (name, octave) = trimmed.split_at(split);

    let note =
        Note::parse(name).ok_or_else(|| ConfigurationError::InvalidPitchName(s.to_string()))?;
    let octave: i32 = octave
        .parse()
        .map_err(|_| ConfigurationError::InvalidPitchName(s.to_string()))?;

    // Cb and B# cross the octave boundary
    let adjust = match name.to_uppercase().as_str() {
        "CB" => -12,
        "B#" => 12,
        _ => 0,
    };
    to_pitch((octave + 1) * 12 + note.pitch_class() as i32 + adjust)
}

/// Convert a computed pitch number into a valid `Pitch`
pub fn to_pitch(value: i32) -> Result<Pitch> {
    if (0..=MAX_PITCH as i32).contains(&value) {
        Ok(value as Pitch)
    } else {
        Err(ConfigurationError::PitchOutOfRange(value))
    }
}

/// Serde helper accepting either a MIDI number or a note name
pub fn deserialize_pitch<'de, D>(deserializer: D) -> std::result::Result<Pitch, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PitchRepr {
        Number(i64),
        Name(String),
    }

    match PitchRepr::deserialize(deserializer)? {
        PitchRepr::Number(n) => {
            let n = i32::try_from(n).map_err(serde::de::Error::custom)?;
            to_pitch(n).map_err(serde::de::Error::custom)
        }
        PitchRepr::Name(name) => parse_pitch(&name).map_err(serde::de::Error::custom),
    }
}
