// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale definitions for musical operations.
//!
//! A scale is an ordered set of pitch-class offsets within an octave,
//! with a weight per member for random sampling. Degree lookup extends
//! the pattern across octaves in both directions.

use std::fmt;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::registry::Named;
use crate::error::{TheoryError, TheoryResult};

/// Semitones per octave in twelve-tone equal temperament
pub const DEFAULT_OCTAVE_SIZE: i32 = 12;

/// Built-in scale types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Phrygian,     // Minor with lowered 2nd
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian
    Locrian,      // Diminished

    // Other minor scales
    HarmonicMinor,
    MelodicMinor, // Ascending form

    // Pentatonic scales
    MajorPentatonic,
    MinorPentatonic,

    // Blues
    Blues,
    MajorBlues,

    // Other common scales
    WholeTone,
    Diminished,   // Half-whole
    DiminishedWH, // Whole-half
    Chromatic,
}

impl ScaleType {
    /// Every built-in scale type
    pub const ALL: [ScaleType; 17] = [
        ScaleType::Major,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::NaturalMinor,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::MajorBlues,
        ScaleType::WholeTone,
        ScaleType::Diminished,
        ScaleType::DiminishedWH,
        ScaleType::Chromatic,
    ];

    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> Vec<i32> {
        match self {
            ScaleType::Major => vec![0, 2, 4, 5, 7, 9, 11],
            ScaleType::Dorian => vec![0, 2, 3, 5, 7, 9, 10],
            ScaleType::Phrygian => vec![0, 1, 3, 5, 7, 8, 10],
            ScaleType::Lydian => vec![0, 2, 4, 6, 7, 9, 11],
            ScaleType::Mixolydian => vec![0, 2, 4, 5, 7, 9, 10],
            ScaleType::NaturalMinor => vec![0, 2, 3, 5, 7, 8, 10],
            ScaleType::Locrian => vec![0, 1, 3, 5, 6, 8, 10],

            ScaleType::HarmonicMinor => vec![0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => vec![0, 2, 3, 5, 7, 9, 11],

            ScaleType::MajorPentatonic => vec![0, 2, 4, 7, 9],
            ScaleType::MinorPentatonic => vec![0, 3, 5, 7, 10],

            ScaleType::Blues => vec![0, 3, 5, 6, 7, 10],
            ScaleType::MajorBlues => vec![0, 2, 3, 4, 7, 9],

            ScaleType::WholeTone => vec![0, 2, 4, 6, 8, 10],
            ScaleType::Diminished => vec![0, 1, 3, 4, 6, 7, 9, 10],
            ScaleType::DiminishedWH => vec![0, 2, 3, 5, 6, 8, 9, 11],
            ScaleType::Chromatic => (0..12).collect(),
        }
    }

    /// Parse scale type from string, accepting common aliases
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "dorian" => Some(ScaleType::Dorian),
            "phrygian" => Some(ScaleType::Phrygian),
            "lydian" => Some(ScaleType::Lydian),
            "mixolydian" => Some(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "locrian" => Some(ScaleType::Locrian),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Some(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(ScaleType::MinorPentatonic),
            "blues" | "minorblues" => Some(ScaleType::Blues),
            "majorblues" => Some(ScaleType::MajorBlues),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "octatonic" | "halfwhole" => Some(ScaleType::Diminished),
            "diminishedwh" | "wholehalf" => Some(ScaleType::DiminishedWH),
            "chromatic" => Some(ScaleType::Chromatic),
            _ => None,
        }
    }

    /// Registry name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::NaturalMinor => "minor",
            ScaleType::Locrian => "locrian",
            ScaleType::HarmonicMinor => "harmonic_minor",
            ScaleType::MelodicMinor => "melodic_minor",
            ScaleType::MajorPentatonic => "major_pentatonic",
            ScaleType::MinorPentatonic => "minor_pentatonic",
            ScaleType::Blues => "blues",
            ScaleType::MajorBlues => "major_blues",
            ScaleType::WholeTone => "whole_tone",
            ScaleType::Diminished => "diminished",
            ScaleType::DiminishedWH => "diminished_wh",
            ScaleType::Chromatic => "chromatic",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of pitch-class offsets with sampling weights
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    name: String,
    semitones: Vec<i32>,
    weights: Vec<f64>,
    octave_size: i32,
}

impl Scale {
    /// Create a scale with uniform weights.
    ///
    /// Members are expected to lie in `[0, octave_size)`. An octave size
    /// below 1 is raised to 1.
    pub fn new(semitones: Vec<i32>, name: impl Into<String>, octave_size: i32) -> Self {
        let weights = uniform_weights(semitones.len());
        Self {
            name: name.into(),
            semitones,
            weights,
            octave_size: octave_size.max(1),
        }
    }

    /// Create a scale with explicit sampling weights, normalized to sum to 1
    pub fn with_weights(
        semitones: Vec<i32>,
        weights: Vec<f64>,
        name: impl Into<String>,
        octave_size: i32,
    ) -> TheoryResult<Self> {
        if weights.len() != semitones.len() {
            return Err(TheoryError::invalid_arg(format!(
                "expected {} weights, got {}",
                semitones.len(),
                weights.len()
            )));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(TheoryError::invalid_arg(format!("invalid weight: {}", bad)));
        }

        let mut scale = Self::new(semitones, name, octave_size);
        scale.weights = normalize(weights);
        Ok(scale)
    }

    /// Create a scale from a list ordered by importance.
    ///
    /// Each note is reduced into the octave and the weights fall linearly
    /// from the first note to the last.
    pub fn from_order(notes: &[i32], name: impl Into<String>, octave_size: i32) -> Self {
        let octave_size = octave_size.max(1);
        let semitones = notes.iter().map(|n| n.rem_euclid(octave_size)).collect();
        let n = notes.len();
        let weights = normalize((0..n).map(|i| (n - i) as f64).collect());

        Self {
            name: name.into(),
            semitones,
            weights,
            octave_size,
        }
    }

    /// Create one of the built-in scales
    pub fn from_type(scale_type: ScaleType) -> Self {
        Self::new(scale_type.intervals(), scale_type.name(), DEFAULT_OCTAVE_SIZE)
    }

    /// The major scale, used when no scale is given
    pub fn major() -> Self {
        Self::from_type(ScaleType::Major)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn semitones(&self) -> &[i32] {
        &self.semitones
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn octave_size(&self) -> i32 {
        self.octave_size
    }

    /// Number of members per octave
    pub fn len(&self) -> usize {
        self.semitones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semitones.is_empty()
    }

    /// Map a scale degree to a pitch offset from the tonic.
    ///
    /// Degrees wrap into octaves in both directions: with seven members,
    /// degree 7 is the root an octave up and degree -1 is the top member
    /// an octave down. An empty scale maps every degree to 0. Results
    /// beyond the `i32` range saturate.
    pub fn get(&self, degree: i32) -> i32 {
        if self.semitones.is_empty() {
            return 0;
        }
        let len = self.semitones.len() as i32;
        let octave = degree.div_euclid(len);
        let index = degree.rem_euclid(len) as usize;
        self.octave_size
            .saturating_mul(octave)
            .saturating_add(self.semitones[index])
    }

    /// Check if a semitone's pitch class is a member
    pub fn contains(&self, semitone: i32) -> bool {
        self.semitones.contains(&semitone.rem_euclid(self.octave_size))
    }

    /// Find the degree position of a note: the insertion point of its pitch
    /// class after any equal member, plus whole octaves of degrees.
    ///
    /// Assumes the semitones are in ascending order.
    pub fn index_of(&self, note: i32) -> i32 {
        let octave = note.div_euclid(self.octave_size);
        let pitch_class = note.rem_euclid(self.octave_size);
        let position = self.semitones.partition_point(|&s| s <= pitch_class) as i32;
        octave.saturating_mul(self.len() as i32).saturating_add(position)
    }

    /// Draw a member according to the weights
    pub fn random_note<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<i32> {
        let dist = WeightedIndex::new(&self.weights).ok()?;
        Some(self.semitones[dist.sample(rng)])
    }

    /// Swap two randomly chosen members; weights move with their members
    pub fn change<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let len = self.semitones.len();
        if len < 2 {
            return;
        }
        let i = rng.gen_range(0..len);
        let j = rng.gen_range(0..len);
        if i != j {
            self.semitones.swap(i, j);
            self.weights.swap(i, j);
        }
    }

    /// Randomly reorder all members; weights move with their members
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order: Vec<usize> = (0..self.semitones.len()).collect();
        order.shuffle(rng);
        self.semitones = order.iter().map(|&i| self.semitones[i]).collect();
        self.weights = order.iter().map(|&i| self.weights[i]).collect();
    }
}

impl Named for Scale {
    const KIND: &'static str = "scale";

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [ ", self.name)?;
        for (semitone, weight) in self.semitones.iter().zip(&self.weights) {
            write!(f, "{}({:.3}) ", semitone, weight)?;
        }
        write!(f, "]")
    }
}

fn uniform_weights(len: usize) -> Vec<f64> {
    vec![1.0 / len as f64; len]
}

/// Scale weights to sum to 1; an all-zero list is left as is
fn normalize(weights: Vec<f64>) -> Vec<f64> {
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        weights.into_iter().map(|w| w / sum).collect()
    } else {
        weights
    }
}
