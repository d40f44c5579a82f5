// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tonal - scales, keys, chords and pattern generators for algorithmic
//! composition.

pub mod config;
pub mod error;
pub mod music;
pub mod pattern;

pub use error::{TheoryError, TheoryResult};
pub use music::{Chord, ChordRegistry, Key, Note, Scale, ScaleRegistry, ScaleType, REST};
pub use pattern::Pattern;
