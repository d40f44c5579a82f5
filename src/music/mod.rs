// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory primitives.
//!
//! This module provides scales, keys, chords, note-name conversion and the
//! registries that hand out shared scales and chords by name.

pub mod chord;
pub mod key;
pub mod note;
pub mod registry;
pub mod scale;

pub use chord::Chord;
pub use key::{Key, REST};
pub use note::{midi_to_name, name_to_midi, Note};
pub use registry::{ChordRegistry, Named, Registry, ScaleRegistry};
pub use scale::{Scale, ScaleType, DEFAULT_OCTAVE_SIZE};
