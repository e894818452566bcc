// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exercise table and vocal range profiles.
//!
//! The catalog is parsed once and never mutated afterwards. The built-in
//! table is embedded at compile time; hosts may load their own from YAML.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::{ExerciseDefinition, VocalPart, VocalRange};
use crate::error::ConfigurationError;

const BUILTIN_CATALOG: &str = include_str!("catalog.yaml");

/// Identifier and display name of one exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSummary {
    pub id: String,
    pub name: String,
}

/// Immutable table of exercises and vocal range profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Range profile per vocal part
    vocal_parts: Vec<VocalRange>,
    /// Exercises in display order
    exercises: Vec<ExerciseDefinition>,
}

impl Catalog {
    /// The catalog shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG).context("Built-in exercise catalog is invalid")
    }

    /// Load a catalog from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: Catalog =
            serde_yaml::from_str(yaml).context("Failed to parse exercise catalog YAML")?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for exercise in &self.exercises {
            if !ids.insert(exercise.id.as_str()) {
                bail!("Duplicate exercise id: {}", exercise.id);
            }
            exercise
                .validate()
                .with_context(|| format!("Invalid exercise: {}", exercise.id))?;
        }

        let mut parts = HashSet::new();
        for range in &self.vocal_parts {
            if !parts.insert(range.part) {
                bail!("Duplicate range profile for vocal part: {}", range.part);
            }
            if range.display.first > range.display.last {
                return Err(ConfigurationError::InvalidDisplayRange {
                    first: range.display.first,
                    last: range.display.last,
                })
                .with_context(|| format!("Invalid display range for {}", range.part));
            }
        }

        Ok(())
    }

    /// Exercise identifiers and names in catalog order
    pub fn list_exercises(&self) -> Vec<ExerciseSummary> {
        self.exercises
            .iter()
            .map(|e| ExerciseSummary {
                id: e.id.clone(),
                name: e.name.clone(),
            })
            .collect()
    }

    /// All exercise definitions in catalog order
    pub fn exercises(&self) -> &[ExerciseDefinition] {
        &self.exercises
    }

    /// Look up an exercise by identifier
    pub fn exercise(&self, id: &str) -> crate::error::Result<&ExerciseDefinition> {
        self.exercises
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ConfigurationError::UnknownExercise(id.to_string()))
    }

    /// Range profile for a vocal part
    pub fn vocal_range(&self, part: VocalPart) -> crate::error::Result<&VocalRange> {
        self.vocal_parts
            .iter()
            .find(|r| r.part == part)
            .ok_or_else(|| ConfigurationError::UnknownVocalPart(part.to_string()))
    }

    /// All range profiles
    pub fn vocal_ranges(&self) -> &[VocalRange] {
        &self.vocal_parts
    }
}
