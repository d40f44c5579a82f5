// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note names and their MIDI pitch numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};

/// Semitones per octave in MIDI note numbering
const MIDI_OCTAVE: i32 = 12;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> i32 {
        self as i32
    }

    /// Get note from pitch class; any integer wraps into the octave
    pub fn from_pitch_class(pc: i32) -> Self {
        Note::ALL[pc.rem_euclid(MIDI_OCTAVE) as usize]
    }

    /// Parse a note letter with optional accidental (e.g., "C", "C#", "Db", "Fs")
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim().to_uppercase();
        match s.as_str() {
            "C" | "B#" => Some(Note::C),
            "C#" | "CS" | "DB" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" | "DS" | "EB" => Some(Note::Ds),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" | "ES" => Some(Note::F),
            "F#" | "FS" | "GB" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" | "GS" | "AB" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" | "AS" | "BB" => Some(Note::As),
            "B" | "CB" => Some(Note::B),
            _ => None,
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        };
        f.write_str(name)
    }
}

/// Convert a note name such as "C", "F#3" or "Bb-1" to a MIDI pitch number.
///
/// The octave is optional and defaults to 0, so "C" is 12 and "C4" is 60.
pub fn name_to_midi(name: &str) -> TheoryResult<i32> {
    let name = name.trim();
    let split = name
        .find(|c: char| c.is_ascii_digit() || c == '-')
        .unwrap_or(name.len());
    let (note_part, octave_part) = name.split_at(split);

    let note = Note::from_name(note_part)
        .ok_or_else(|| TheoryError::InvalidNoteName(name.to_string()))?;

    let octave = if octave_part.is_empty() {
        0
    } else {
        octave_part
            .parse::<i32>()
            .map_err(|e| TheoryError::parse(name, format!("bad octave '{}': {}", octave_part, e)))?
    };

    // B# and Cb cross into the neighbouring octave
    let carry = match note_part.trim().to_uppercase().as_str() {
        "B#" => 1,
        "CB" => -1,
        _ => 0,
    };

    octave
        .checked_add(1 + carry)
        .and_then(|o| o.checked_mul(MIDI_OCTAVE))
        .and_then(|base| base.checked_add(note.pitch_class()))
        .ok_or_else(|| TheoryError::parse(name, "octave out of range"))
}

/// Convert a MIDI pitch number (0-127) to a note name such as "C4".
pub fn midi_to_name(midi: i32) -> TheoryResult<String> {
    if !(0..=127).contains(&midi) {
        return Err(TheoryError::invalid_arg(format!(
            "MIDI number out of valid range: {}",
            midi
        )));
    }
    let octave = midi / MIDI_OCTAVE - 1;
    Ok(format!("{}{}", Note::from_pitch_class(midi), octave))
}
