// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequencer core for scheduling and playing exercise sessions.
//!
//! This module provides the playback pipeline:
//! - Event scheduler laying instances out in absolute milliseconds
//! - Timer queue holding armed triggers in deadline order
//! - Playback controller owning the single live session
//! - Tokio driver sleeping until each trigger is due

pub mod controller;
pub mod driver;
pub mod scheduler;
pub mod timer;

pub use controller::{
    PlaybackController, PlaybackRequest, PlaybackState, Session, StartOutcome, DEFAULT_VELOCITY,
};
pub use driver::run_until_idle;
pub use scheduler::{
    schedule, schedule_with, ChordIntro, EventKind, Schedule, ScheduleTiming, ScheduledEvent,
};
pub use timer::{ArmedTrigger, TimerId, TimerQueue};
