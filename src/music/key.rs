// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Musical keys and voice leading between them.
//!
//! A key binds a tonic pitch to a shared scale. Besides degree lookup and
//! membership it snaps pitches into the key, pairs pitch classes between
//! two keys, and blends one key's pitch set into another's.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use super::note::{midi_to_name, name_to_midi};
use super::registry::ScaleRegistry;
use super::scale::Scale;
use crate::error::TheoryResult;

/// Degree or pitch value meaning "no note"
pub const REST: i32 = -1;

/// A tonic paired with a scale
#[derive(Debug, Clone)]
pub struct Key {
    tonic: i32,
    scale: Arc<Scale>,
}

impl Key {
    pub fn new(tonic: i32, scale: Arc<Scale>) -> Self {
        Self { tonic, scale }
    }

    /// Key on a numeric tonic with a registered scale
    pub fn with_scale_name(
        tonic: i32,
        scale_name: &str,
        registry: &ScaleRegistry,
    ) -> TheoryResult<Self> {
        Ok(Self::new(tonic, registry.by_name(scale_name)?))
    }

    /// Key on a named tonic such as "C" or "F#3"
    pub fn from_note_name(tonic_name: &str, scale: Arc<Scale>) -> TheoryResult<Self> {
        Ok(Self::new(name_to_midi(tonic_name)?, scale))
    }

    /// Parse a key from a tonic name and a registered scale name
    pub fn parse(
        tonic_name: &str,
        scale_name: &str,
        registry: &ScaleRegistry,
    ) -> TheoryResult<Self> {
        let tonic = name_to_midi(tonic_name)?;
        Self::with_scale_name(tonic, scale_name, registry)
    }

    /// A key with a tonic in `0..=11` and a scale drawn from the registry
    pub fn random<R: Rng + ?Sized>(registry: &ScaleRegistry, rng: &mut R) -> TheoryResult<Self> {
        let tonic = rng.gen_range(0..=11);
        let scale = registry.random(rng)?;
        trace!(tonic, scale = scale.name(), "random key");
        Ok(Self::new(tonic, scale))
    }

    pub fn tonic(&self) -> i32 {
        self.tonic
    }

    pub fn scale(&self) -> &Arc<Scale> {
        &self.scale
    }

    fn octave_size(&self) -> i32 {
        self.scale.octave_size()
    }

    /// The same scale on a tonic shifted by `semitones`
    pub fn transpose(&self, semitones: i32) -> Key {
        Key::new(self.tonic.saturating_add(semitones), Arc::clone(&self.scale))
    }

    /// Pitch of a scale degree; `REST` passes through unchanged and
    /// out-of-range pitches saturate
    pub fn get(&self, degree: i32) -> i32 {
        if degree == REST {
            return REST;
        }
        self.scale.get(degree).saturating_add(self.tonic)
    }

    /// The key's pitch classes in ascending order
    pub fn pitch_classes(&self) -> Vec<i32> {
        let size = self.octave_size();
        let tonic = self.tonic.rem_euclid(size);
        let mut classes: Vec<i32> = self
            .scale
            .semitones()
            .iter()
            .map(|s| (s.rem_euclid(size) + tonic).rem_euclid(size))
            .collect();
        classes.sort_unstable();
        classes
    }

    /// Check if a pitch belongs to the key. A rest fits every key.
    pub fn contains(&self, pitch: i32) -> bool {
        if pitch == REST {
            return true;
        }
        in_classes(pitch, &self.pitch_classes(), self.octave_size())
    }

    /// Snap a pitch to the closest pitch in the key.
    ///
    /// Closeness is measured around the octave, so a pitch just below an
    /// octave boundary can snap upward into the next octave. On a tie the
    /// lower pitch class wins.
    pub fn nearest_note(&self, pitch: i32) -> i32 {
        let size = self.octave_size();
        let classes = self.pitch_classes();
        if pitch == REST || in_classes(pitch, &classes, size) {
            return pitch;
        }

        let pitch_class = pitch.rem_euclid(size);
        let Some(nearest) = nearest_class(pitch_class, &classes, size) else {
            return pitch;
        };

        let mut snapped = i64::from(pitch - pitch_class) + i64::from(nearest);
        if nearest - pitch_class > size - (nearest - pitch_class) {
            snapped -= i64::from(size);
        } else if pitch_class - nearest > size - (pitch_class - nearest) {
            snapped += i64::from(size);
        }
        snapped.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Pair each of this key's pitch classes with the nearest pitch class
    /// of `other`, in ascending order of this key's classes
    pub fn voiceleading(&self, other: &Key) -> Vec<(i32, i32)> {
        let size = self.octave_size();
        let targets = other.pitch_classes();
        self.pitch_classes()
            .into_iter()
            .filter_map(|from| nearest_class(from, &targets, size).map(|to| (from, to)))
            .collect()
    }

    /// Total movement of the voice leading into `other`.
    ///
    /// Pairs are chosen by distance around the octave but summed as plain
    /// differences between pitch classes.
    pub fn distance(&self, other: &Key) -> i32 {
        self.voiceleading(other)
            .iter()
            .map(|(a, b)| (a - b).abs())
            .sum()
    }

    /// Blend this key's pitch set toward `other`'s.
    ///
    /// The result always starts with the shared pitch classes. Below 0.5
    /// some of this key's own classes follow, all of them at 0.0 and none
    /// at 0.5. From 0.5 up, `other`'s own classes follow instead, reaching
    /// all of them at 1.0. `level` is clamped to `[0, 1]`.
    pub fn fade_to(&self, other: &Key, level: f64) -> Vec<i32> {
        let level = level.clamp(0.0, 1.0);
        let ours = self.pitch_classes();
        let theirs = other.pitch_classes();

        let (mut blended, ours_only): (Vec<i32>, Vec<i32>) =
            ours.iter().copied().partition(|pc| theirs.contains(pc));
        let theirs_only: Vec<i32> = theirs.into_iter().filter(|pc| !ours.contains(pc)).collect();

        let (extra, fraction) = if level < 0.5 {
            (ours_only, 1.0 - 2.0 * level)
        } else {
            (theirs_only, 2.0 * (level - 0.5))
        };
        let count = ((fraction * extra.len() as f64).round() as usize).min(extra.len());
        blended.extend_from_slice(&extra[..count]);
        blended
    }
}

fn in_classes(pitch: i32, classes: &[i32], size: i32) -> bool {
    classes.binary_search(&pitch.rem_euclid(size)).is_ok()
}

/// Closest candidate to `pitch_class` around an octave of `size`; the first
/// candidate wins ties
fn nearest_class(pitch_class: i32, candidates: &[i32], size: i32) -> Option<i32> {
    let mut best: Option<(i32, i32)> = None;
    for &candidate in candidates {
        let distance = circular_distance(pitch_class, candidate, size);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }
    best.map(|(candidate, _)| candidate)
}

fn circular_distance(a: i32, b: i32, size: i32) -> i32 {
    let d = (a - b).abs();
    d.min(size - d)
}

impl Default for Key {
    fn default() -> Self {
        Self::new(0, Arc::new(Scale::major()))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.tonic == other.tonic
            && (Arc::ptr_eq(&self.scale, &other.scale) || self.scale == other.scale)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match midi_to_name(self.tonic) {
            Ok(name) => write!(f, "Key: {} {}", name, self.scale.name()),
            Err(_) => write!(f, "Key: {} {}", self.tonic, self.scale.name()),
        }
    }
}
