// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Turns a stream of scale degrees into pitches.

use super::Pattern;
use crate::music::key::{Key, REST};

/// Maps each value of an inner pattern, rounded to a whole degree, through
/// a key. Rests pass through untouched, as do values that are not finite.
pub struct Degree {
    pattern: Box<dyn Pattern>,
    key: Key,
}

impl Degree {
    pub fn new(pattern: Box<dyn Pattern>, key: Key) -> Self {
        Self { pattern, key }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Switch to another key; following values use it
    pub fn set_key(&mut self, key: Key) {
        self.key = key;
    }
}

impl Pattern for Degree {
    fn next(&mut self) -> Option<f64> {
        let value = self.pattern.next()?;
        if !value.is_finite() {
            return Some(REST as f64);
        }
        let degree = value.round() as i32;
        if degree == REST {
            return Some(REST as f64);
        }
        Some(self.key.get(degree) as f64)
    }

    fn reset(&mut self) {
        self.pattern.reset();
    }

    fn name(&self) -> &'static str {
        "degree"
    }
}
