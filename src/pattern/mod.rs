// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Numeric pattern generators.
//!
//! Patterns produce streams of values (degrees, pitches, durations) one at
//! a time. Finite patterns signal exhaustion by returning `None`; `reset`
//! rewinds them to their first value.

pub mod degree;
pub mod looping;
pub mod sequence;

pub use degree::Degree;
pub use looping::Loop;
pub use sequence::{Geom, Impulse, Range, Sequence, Series};

/// Trait for all pattern implementations
pub trait Pattern: Send {
    /// Produce the next value, or `None` once the pattern is exhausted
    fn next(&mut self) -> Option<f64>;

    /// Rewind to the first value
    fn reset(&mut self);

    /// Get the pattern type name
    fn name(&self) -> &'static str;

    /// Collect up to `n` values, stopping early if the pattern runs out
    fn take_values(&mut self, n: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(n);
        while values.len() < n {
            match self.next() {
                Some(value) => values.push(value),
                None => break,
            }
        }
        values
    }
}
