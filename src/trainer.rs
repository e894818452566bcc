// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Host-facing facade tying the catalog to a playback controller.

use std::time::Instant;

use tracing::info;

use crate::display::KeyboardView;
use crate::error::Result;
use crate::exercise::{
    list_rhythm_presets, rhythm_preset, Catalog, DisplayRange, ExerciseSummary, RhythmPreset,
    VocalPart,
};
use crate::expansion::project;
use crate::instrument::Instrument;
use crate::sequencer::{
    run_until_idle, PlaybackController, PlaybackRequest, ScheduleTiming, StartOutcome,
};
use crate::timing::{Clock, SystemClock, Tempo};

/// Per-call playback options
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOptions {
    pub tempo_bpm: f64,
    /// Replaces the exercise's default rhythm
    pub rhythm: Option<Vec<f64>>,
    pub chord_intro: bool,
    pub looping: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            tempo_bpm: 120.0,
            rhythm: None,
            chord_intro: false,
            looping: false,
        }
    }
}

/// Vocal warmup trainer
pub struct VocalTrainer<I, V, C = SystemClock> {
    catalog: Catalog,
    controller: PlaybackController<I, V, C>,
}

impl<I: Instrument, V: KeyboardView, C: Clock> VocalTrainer<I, V, C> {
    pub fn new(catalog: Catalog, instrument: I, view: V, clock: C) -> Self {
        Self {
            catalog,
            controller: PlaybackController::new(instrument, view, clock),
        }
    }

    pub fn with_timing(mut self, timing: ScheduleTiming) -> Self {
        self.controller = self.controller.with_timing(timing);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Exercise ids and names in catalog order
    pub fn list_exercises(&self) -> Vec<ExerciseSummary> {
        self.catalog.list_exercises()
    }

    pub fn list_rhythm_presets(&self) -> &'static [RhythmPreset] {
        list_rhythm_presets()
    }

    /// Apply a preset to an exercise's default rhythm
    pub fn preset_rhythm(&self, exercise_id: &str, preset_id: &str) -> Result<Vec<f64>> {
        let exercise = self.catalog.exercise(exercise_id)?;
        Ok(rhythm_preset(preset_id)?.apply(&exercise.rhythm))
    }

    /// Request playback of an exercise for a voice part.
    ///
    /// Configuration problems are reported before anything changes. While a
    /// session is playing the new parameters are stored and take effect at
    /// the next loop boundary; the call then returns `AlreadyPlaying`.
    pub fn play(
        &mut self,
        exercise_id: &str,
        part: VocalPart,
        options: PlayOptions,
    ) -> Result<StartOutcome> {
        let exercise = self.catalog.exercise(exercise_id)?.clone();
        let vocal_range = *self.catalog.vocal_range(part)?;
        let tempo = Tempo::new(options.tempo_bpm)?;

        self.controller.set_request(PlaybackRequest {
            exercise,
            vocal_range,
            tempo,
            override_rhythm: options.rhythm,
            chord_intro: options.chord_intro,
            looping: options.looping,
        })?;

        let outcome = self.controller.start()?;
        info!(exercise = exercise_id, part = %part, ?outcome, "play requested");
        Ok(outcome)
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Keyboard window an exercise needs for a voice part
    pub fn current_display_range(
        &self,
        exercise_id: &str,
        part: VocalPart,
    ) -> Result<DisplayRange> {
        let exercise = self.catalog.exercise(exercise_id)?;
        let range = self.catalog.vocal_range(part)?;
        project(exercise, range.root, range.display)
    }

    pub fn poll(&mut self) -> usize {
        self.controller.poll()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn controller(&self) -> &PlaybackController<I, V, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<I, V, C> {
        &mut self.controller
    }

    /// Drive playback on the tokio timer until idle
    pub async fn run_until_idle(&mut self) -> usize {
        run_until_idle(&mut self.controller).await
    }
}
