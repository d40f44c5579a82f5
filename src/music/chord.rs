// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords built from stacked intervals.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::registry::{ChordRegistry, Named};
use crate::error::TheoryResult;

/// Interval pool for arbitrary chords; thirds and fourths are doubled
const ARBITRARY_INTERVALS: [i32; 7] = [2, 3, 3, 4, 4, 5, 6];

/// A chord: a root plus successive intervals between chord tones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    name: String,
    intervals: Vec<i32>,
    root: i32,
}

impl Chord {
    pub fn new(intervals: Vec<i32>, root: i32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            intervals,
            root,
        }
    }

    /// Common chords in root position
    pub fn builtins() -> Vec<Chord> {
        vec![
            Chord::new(vec![4, 3, 5], 0, "major"),
            Chord::new(vec![3, 4, 5], 0, "minor"),
            Chord::new(vec![3, 3, 6], 0, "diminished"),
            Chord::new(vec![4, 4, 4], 0, "augmented"),
            Chord::new(vec![2, 5, 5], 0, "sus2"),
            Chord::new(vec![5, 2, 5], 0, "sus4"),
        ]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intervals(&self) -> &[i32] {
        &self.intervals
    }

    pub fn root(&self) -> i32 {
        self.root
    }

    /// The same chord shape on another root
    pub fn with_root(&self, root: i32) -> Chord {
        Chord {
            root,
            ..self.clone()
        }
    }

    /// Absolute chord tones: the root followed by each running interval sum
    pub fn semitones(&self) -> Vec<i32> {
        std::iter::once(self.root)
            .chain(self.intervals.iter().scan(self.root, |acc, &interval| {
                *acc += interval;
                Some(*acc)
            }))
            .collect()
    }

    /// A registered chord shape on a random root in `0..=12`
    pub fn random<R: Rng + ?Sized>(registry: &ChordRegistry, rng: &mut R) -> TheoryResult<Chord> {
        let shape = registry.random(rng)?;
        Ok(shape.with_root(rng.gen_range(0..=12)))
    }

    /// Stack random intervals on 0 until the next one would pass a
    /// randomly chosen top between 12 and 18 semitones
    pub fn arbitrary<R: Rng + ?Sized>(name: impl Into<String>, rng: &mut R) -> Chord {
        let top = rng.gen_range(12..=18);
        let mut intervals = Vec::new();
        let mut height = 0;
        loop {
            let interval = *ARBITRARY_INTERVALS.choose(rng).unwrap_or(&3);
            height += interval;
            if height > top {
                break;
            }
            intervals.push(interval);
        }
        Chord::new(intervals, 0, name)
    }
}

impl Named for Chord {
    const KIND: &'static str = "chord";

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tones: Vec<String> = self.semitones().iter().map(|s| s.to_string()).collect();
        write!(f, "{} [{}]", self.name, tones.join(","))
    }
}
