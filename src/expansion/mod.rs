// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exercise expansion.
//!
//! Turns a declarative exercise into concrete transposed sequences and
//! computes the keyboard window those sequences need.

pub mod expander;
pub mod range;

pub use expander::{expand, transposition_offsets, SequenceInstance};
pub use range::project;
