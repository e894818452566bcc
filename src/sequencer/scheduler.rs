// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Event scheduler.
//!
//! Lays expanded sequence instances out on an absolute millisecond
//! timeline. The output is a pure function of the inputs: the same
//! instances, tempo and chord settings always give the same events.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::expansion::SequenceInstance;
use crate::music::{ChordQuality, Pitch};
use crate::timing::Tempo;

/// Kind of side effect a scheduled event performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Start a melody note
    NoteOn,
    /// Release a melody note
    NoteOff,
    /// Start the chord intro
    ChordOn,
    /// Release the chord intro
    ChordOff,
    /// Replace the syllable/label text
    SyllableUpdate,
    /// Playback reached its end
    SessionEnd,
}

/// A single timestamped side effect
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    /// Offset from playback start in milliseconds
    pub at_millis: u64,
    /// What the event does
    pub kind: EventKind,
    /// Pitches affected; empty for syllable updates and session end
    pub pitches: Vec<Pitch>,
    /// Display text carried by the event
    pub text: Option<String>,
    /// Audible length for NoteOn/ChordOn, zero otherwise
    pub duration_millis: u64,
}

impl ScheduledEvent {
    fn new(at: f64, kind: EventKind) -> Self {
        Self {
            at_millis: to_millis(at),
            kind,
            pitches: Vec::new(),
            text: None,
            duration_millis: 0,
        }
    }

    fn with_pitches(mut self, pitches: Vec<Pitch>) -> Self {
        self.pitches = pitches;
        self
    }

    fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text;
        self
    }

    fn with_duration(mut self, millis: f64) -> Self {
        self.duration_millis = to_millis(millis);
        self
    }
}

fn to_millis(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

/// Chord intro settings for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordIntro {
    /// Whether the intro is played
    pub enabled: bool,
    /// Chord family built on each instance root
    pub quality: ChordQuality,
}

impl ChordIntro {
    pub fn new(quality: ChordQuality) -> Self {
        Self {
            enabled: true,
            quality,
        }
    }
}

/// Fixed timing constants of the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTiming {
    /// Silence before the first event, for audio backends still resuming
    pub lead_in_ms: u64,
    /// Fraction of each note's slot that actually sounds (0.0 - 1.0)
    pub note_gate: f64,
    /// Chord intro length in beats
    pub chord_beats: f64,
    /// How long before its nominal end the chord is released
    pub chord_release_ms: u64,
    /// Gap after the chord intro in beats
    pub chord_gap_beats: f64,
    /// Pause after every instance in beats
    pub pause_beats: f64,
}

impl Default for ScheduleTiming {
    fn default() -> Self {
        Self {
            lead_in_ms: 100,
            note_gate: 0.8,
            chord_beats: 2.0,
            chord_release_ms: 50,
            chord_gap_beats: 0.5,
            pause_beats: 0.5,
        }
    }
}

impl ScheduleTiming {
    /// Reject values that would move the timeline backwards
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.note_gate) {
            return Err(ConfigurationError::InvalidTiming {
                field: "note_gate",
                value: self.note_gate,
            });
        }
        let beats = [
            ("chord_beats", self.chord_beats),
            ("chord_gap_beats", self.chord_gap_beats),
            ("pause_beats", self.pause_beats),
        ];
        for (field, value) in beats {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidTiming { field, value });
            }
        }
        Ok(())
    }
}

/// Scheduled events plus the total session length
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Events in non-decreasing `at_millis` order
    pub events: Vec<ScheduledEvent>,
    /// Time of the `SessionEnd` event
    pub total_duration_millis: u64,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one kind, in order
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &ScheduledEvent> + '_ {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

/// Text shown while a note sounds: the syllable, tagged with the
/// transposition label when there is one
fn note_text(syllable: &str, label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{} {}", syllable, label),
        None => syllable.to_string(),
    }
}

/// Schedule instances with the default timing constants
pub fn schedule(
    instances: &[SequenceInstance],
    tempo_bpm: f64,
    chord_intro: Option<ChordIntro>,
) -> Result<Schedule> {
    schedule_with(&ScheduleTiming::default(), instances, tempo_bpm, chord_intro)
}

/// Schedule instances on an absolute timeline
pub fn schedule_with(
    timing: &ScheduleTiming,
    instances: &[SequenceInstance],
    tempo_bpm: f64,
    chord_intro: Option<ChordIntro>,
) -> Result<Schedule> {
    timing.validate()?;
    let tempo = Tempo::new(tempo_bpm)?;
    let beat = tempo.beat_millis();
    let gate = timing.note_gate;
    let chord_intro = chord_intro.filter(|c| c.enabled);

    let note_count: usize = instances.iter().map(SequenceInstance::len).sum();
    let mut events = Vec::with_capacity(note_count * 2 + instances.len() * 3 + 1);
    let mut cursor = timing.lead_in_ms as f64;

    for instance in instances {
        let label = instance.label.clone();
        events.push(ScheduledEvent::new(cursor, EventKind::SyllableUpdate).with_text(label));

        if let Some(chord) = chord_intro {
            let pitches = chord.quality.pitches(instance.root);
            let length = timing.chord_beats * beat;
            let sounding = (length - timing.chord_release_ms as f64).max(0.0);

            events.push(
                ScheduledEvent::new(cursor, EventKind::ChordOn)
                    .with_pitches(pitches.clone())
                    .with_duration(sounding),
            );
            events.push(
                ScheduledEvent::new(cursor + sounding, EventKind::ChordOff).with_pitches(pitches),
            );
            cursor += length + timing.chord_gap_beats * beat;
        }

        let label = instance.label.as_deref();
        for (pitch, beats, syllable) in instance.notes() {
            let slot = beats * beat;
            let sounding = slot * gate;

            events.push(
                ScheduledEvent::new(cursor, EventKind::NoteOn)
                    .with_pitches(vec![pitch])
                    .with_text(Some(note_text(syllable, label)))
                    .with_duration(sounding),
            );
            events.push(
                ScheduledEvent::new(cursor + sounding, EventKind::NoteOff)
                    .with_pitches(vec![pitch]),
            );
            cursor += slot;
        }

        cursor += timing.pause_beats * beat;
    }

    events.push(ScheduledEvent::new(cursor, EventKind::SessionEnd));

    // Stable: ties keep generation order
    events.sort_by_key(|e| e.at_millis);

    Ok(Schedule {
        events,
        total_duration_millis: to_millis(cursor),
    })
}
