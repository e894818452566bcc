// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard display sink.
//!
//! Each fired event hands the view a full `DisplayFrame`; views keep no
//! state of their own and never feed back into scheduling.

use std::collections::BTreeSet;

use crate::exercise::DisplayRange;
use crate::music::{pitch_name, Pitch};

/// Everything the keyboard shows at one moment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    /// Highlighted pitches
    pub active: BTreeSet<Pitch>,
    /// Current syllable or transposition label
    pub text: Option<String>,
    /// Keyboard window; absent before anything has been played
    pub range: Option<DisplayRange>,
}

impl DisplayFrame {
    /// Highlighted pitches as note names, low to high
    pub fn active_names(&self) -> Vec<String> {
        self.active.iter().map(|&p| pitch_name(p)).collect()
    }
}

/// Consumer of display frames
pub trait KeyboardView {
    fn render(&mut self, frame: &DisplayFrame);
}

/// View that discards every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl KeyboardView for NullView {
    fn render(&mut self, _frame: &DisplayFrame) {}
}

/// View that keeps the most recent frame
#[derive(Debug, Clone, Default)]
pub struct LatestFrame {
    frame: DisplayFrame,
    renders: usize,
}

impl LatestFrame {
    pub fn frame(&self) -> &DisplayFrame {
        &self.frame
    }

    /// Number of frames received
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl KeyboardView for LatestFrame {
    fn render(&mut self, frame: &DisplayFrame) {
        self.frame = frame.clone();
        self.renders += 1;
    }
}
