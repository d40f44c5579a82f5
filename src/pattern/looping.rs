// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Replays the output of another pattern.

use super::Pattern;

/// Records an inner pattern's values on the first pass and replays them.
///
/// The inner pattern is only drawn once, so random or stateful patterns
/// repeat exactly. An inner pattern that never ends is passed through.
pub struct Loop {
    pattern: Box<dyn Pattern>,
    count: Option<usize>,
    values: Vec<f64>,
    recorded: bool,
    pass: usize,
    position: usize,
}

impl Loop {
    /// Loop forever
    pub fn new(pattern: Box<dyn Pattern>) -> Self {
        Self {
            pattern,
            count: None,
            values: Vec::new(),
            recorded: false,
            pass: 0,
            position: 0,
        }
    }

    /// Stop after `count` passes in total, including the recording pass
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    fn passes_left(&self) -> bool {
        self.count.map_or(true, |c| self.pass < c)
    }
}

impl Pattern for Loop {
    fn next(&mut self) -> Option<f64> {
        if !self.passes_left() {
            return None;
        }

        if !self.recorded {
            if let Some(value) = self.pattern.next() {
                self.values.push(value);
                return Some(value);
            }
            self.recorded = true;
            self.pass += 1;
            self.position = 0;
        }

        if self.values.is_empty() {
            return None;
        }
        if self.position >= self.values.len() {
            self.pass += 1;
            self.position = 0;
        }
        if !self.passes_left() {
            return None;
        }

        let value = self.values[self.position];
        self.position += 1;
        Some(value)
    }

    fn reset(&mut self) {
        self.pattern.reset();
        self.values.clear();
        self.recorded = false;
        self.pass = 0;
        self.position = 0;
    }

    fn name(&self) -> &'static str {
        "loop"
    }
}
