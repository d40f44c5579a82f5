// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Elementary patterns: fixed sequences, arithmetic and geometric series,
//! bounded ranges and periodic impulses.

use super::Pattern;
use crate::error::{TheoryError, TheoryResult};

/// Cycles through a fixed list of values
#[derive(Debug, Clone)]
pub struct Sequence {
    values: Vec<f64>,
    repeats: Option<usize>,
    position: usize,
    completed: usize,
}

impl Sequence {
    /// Repeat `values` forever
    pub fn new(values: Vec<f64>) -> TheoryResult<Self> {
        if values.is_empty() {
            return Err(TheoryError::invalid_arg("sequence must not be empty"));
        }
        Ok(Self {
            values,
            repeats: None,
            position: 0,
            completed: 0,
        })
    }

    /// Stop after `repeats` passes through the values
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = Some(repeats);
        self
    }
}

impl Pattern for Sequence {
    fn next(&mut self) -> Option<f64> {
        if self.repeats.is_some_and(|r| self.completed >= r) {
            return None;
        }
        let value = self.values[self.position];
        self.position += 1;
        if self.position >= self.values.len() {
            self.position = 0;
            self.completed += 1;
        }
        Some(value)
    }

    fn reset(&mut self) {
        self.position = 0;
        self.completed = 0;
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}

/// Arithmetic series: start, start + step, start + 2*step, ...
#[derive(Debug, Clone)]
pub struct Series {
    start: f64,
    step: f64,
    length: Option<usize>,
    value: f64,
    count: usize,
}

impl Series {
    pub fn new(start: f64, step: f64) -> Self {
        Self {
            start,
            step,
            length: None,
            value: start,
            count: 0,
        }
    }

    /// Stop after `length` values
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

impl Pattern for Series {
    fn next(&mut self) -> Option<f64> {
        if self.length.is_some_and(|l| self.count >= l) {
            return None;
        }
        let current = self.value;
        self.value += self.step;
        self.count += 1;
        Some(current)
    }

    fn reset(&mut self) {
        self.value = self.start;
        self.count = 0;
    }

    fn name(&self) -> &'static str {
        "series"
    }
}

/// Values from `start` toward `end` (exclusive) in increments of `step`
#[derive(Debug, Clone)]
pub struct Range {
    start: f64,
    end: f64,
    step: f64,
    value: f64,
}

impl Range {
    pub fn new(start: f64, end: f64, step: f64) -> TheoryResult<Self> {
        if step == 0.0 || !step.is_finite() {
            return Err(TheoryError::invalid_arg(format!(
                "range step must be non-zero, got {}",
                step
            )));
        }
        Ok(Self {
            start,
            end,
            step,
            value: start,
        })
    }
}

impl Pattern for Range {
    fn next(&mut self) -> Option<f64> {
        let done = if self.step > 0.0 {
            self.value >= self.end
        } else {
            self.value <= self.end
        };
        if done {
            return None;
        }
        let current = self.value;
        self.value += self.step;
        Some(current)
    }

    fn reset(&mut self) {
        self.value = self.start;
    }

    fn name(&self) -> &'static str {
        "range"
    }
}

/// Geometric series: start, start * multiply, start * multiply^2, ...
#[derive(Debug, Clone)]
pub struct Geom {
    start: f64,
    multiply: f64,
    length: Option<usize>,
    value: f64,
    count: usize,
}

impl Geom {
    pub fn new(start: f64, multiply: f64) -> Self {
        Self {
            start,
            multiply,
            length: None,
            value: start,
            count: 0,
        }
    }

    /// Stop after `length` values
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }
}

impl Pattern for Geom {
    fn next(&mut self) -> Option<f64> {
        if self.length.is_some_and(|l| self.count >= l) {
            return None;
        }
        let current = self.value;
        self.value *= self.multiply;
        self.count += 1;
        Some(current)
    }

    fn reset(&mut self) {
        self.value = self.start;
        self.count = 0;
    }

    fn name(&self) -> &'static str {
        "geom"
    }
}

/// 1 on the first step of every period, 0 otherwise
#[derive(Debug, Clone)]
pub struct Impulse {
    period: usize,
    position: usize,
}

impl Impulse {
    pub fn new(period: usize) -> TheoryResult<Self> {
        if period == 0 {
            return Err(TheoryError::invalid_arg("impulse period must be at least 1"));
        }
        Ok(Self { period, position: 0 })
    }
}

impl Pattern for Impulse {
    fn next(&mut self) -> Option<f64> {
        let current = if self.position == 0 { 1.0 } else { 0.0 };
        self.position = (self.position + 1) % self.period;
        Some(current)
    }

    fn reset(&mut self) {
        self.position = 0;
    }

    fn name(&self) -> &'static str {
        "impulse"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_repeats() {
        assert!(Sequence::new(vec![]).is_err());

        let mut seq = Sequence::new(vec![1.0, 2.0]).unwrap().with_repeats(2);
        assert_eq!(seq.take_values(10), vec![1.0, 2.0, 1.0, 2.0]);
        assert_eq!(seq.next(), None);

        seq.reset();
        assert_eq!(seq.next(), Some(1.0));

        let mut forever = Sequence::new(vec![5.0]).unwrap();
        assert_eq!(forever.take_values(3), vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_series() {
        let mut series = Series::new(60.0, 2.0).with_length(4);
        assert_eq!(series.take_values(10), vec![60.0, 62.0, 64.0, 66.0]);
        series.reset();
        assert_eq!(series.next(), Some(60.0));
    }

    #[test]
    fn test_range() {
        let mut range = Range::new(60.0, 64.0, 1.0).unwrap();
        assert_eq!(range.take_values(10), vec![60.0, 61.0, 62.0, 63.0]);

        let mut down = Range::new(4.0, 0.0, -2.0).unwrap();
        assert_eq!(down.take_values(10), vec![4.0, 2.0]);

        let mut empty = Range::new(5.0, 5.0, 1.0).unwrap();
        assert_eq!(empty.next(), None);
    }

    #[test]
    fn test_range_rejects_zero_step() {
        assert!(matches!(
            Range::new(0.0, 10.0, 0.0),
            Err(TheoryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_geom() {
        let mut geom = Geom::new(1.0, 2.0).with_length(5);
        assert_eq!(geom.take_values(10), vec![1.0, 2.0, 4.0, 8.0, 16.0]);
    }

    #[test]
    fn test_impulse() {
        assert!(Impulse::new(0).is_err());

        let mut impulse = Impulse::new(3).unwrap();
        assert_eq!(impulse.take_values(7), vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        impulse.reset();
        assert_eq!(impulse.next(), Some(1.0));
    }
}
