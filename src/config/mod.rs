// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for the warmup trainer.
//!
//! Settings are optional YAML: every field has a default, so an empty file
//! is a valid configuration. Only defaults live here; playback sessions
//! are never persisted.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::exercise::Catalog;
use crate::sequencer::{ScheduleTiming, DEFAULT_VELOCITY};
use crate::timing::Tempo;
use crate::trainer::PlayOptions;

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    /// Defaults applied to every play request
    #[serde(default)]
    pub playback: PlaybackDefaults,
    /// Scheduler timing constants
    #[serde(default)]
    pub timing: ScheduleTiming,
    /// Exercise catalog file replacing the built-in one
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml reads an empty document as null
        let settings: Settings = if yaml.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<()> {
        Tempo::new(self.playback.tempo).context("Invalid playback.tempo")?;
        if !(0.0..=1.0).contains(&self.playback.velocity) {
            bail!(
                "playback.velocity must be between 0.0 and 1.0, got {}",
                self.playback.velocity
            );
        }
        self.timing.validate().context("Invalid timing")?;
        Ok(())
    }

    /// The configured catalog, or the built-in one
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        }
    }

    /// Play options seeded from the playback defaults
    pub fn play_options(&self) -> PlayOptions {
        PlayOptions {
            tempo_bpm: self.playback.tempo,
            rhythm: None,
            chord_intro: self.playback.chord_intro,
            looping: self.playback.looping,
        }
    }
}

/// Defaults for play requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackDefaults {
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    /// Play a chord before each instance
    #[serde(default)]
    pub chord_intro: bool,
    /// Restart at the end of each session
    #[serde(default)]
    pub looping: bool,
    /// Note velocity (0.0 - 1.0)
    #[serde(default = "default_velocity")]
    pub velocity: f32,
}

fn default_tempo() -> f64 {
    120.0
}
fn default_velocity() -> f32 {
    DEFAULT_VELOCITY
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            tempo: default_tempo(),
            chord_intro: false,
            looping: false,
            velocity: default_velocity(),
        }
    }
}
