// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Vocal warmup sequencer.
//!
//! Expands exercise patterns across a singer's range, lays them out on a
//! millisecond timeline, and plays them through an instrument while a
//! keyboard view follows along.

pub mod config;
pub mod display;
pub mod error;
pub mod exercise;
pub mod expansion;
pub mod instrument;
pub mod music;
pub mod sequencer;
pub mod timing;
pub mod trainer;

pub use error::{ConfigurationError, Result};
pub use exercise::{Catalog, DisplayRange, ExerciseDefinition, ExerciseKind, VocalPart, VocalRange};
pub use expansion::{expand, project, SequenceInstance};
pub use sequencer::{schedule, PlaybackController, PlaybackState, Schedule, StartOutcome};
pub use trainer::{PlayOptions, VocalTrainer};
