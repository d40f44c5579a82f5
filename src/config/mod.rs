// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Theory configuration.
//!
//! A configuration file adds custom scales and chords to the registries
//! and may name a starting key. YAML and TOML are both accepted; the
//! format is chosen by file extension.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::music::{Chord, ChordRegistry, Key, Scale, ScaleRegistry, DEFAULT_OCTAVE_SIZE};

/// Root of a theory configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Custom scale definitions
    #[serde(default)]
    pub scales: Vec<ScaleDefinition>,
    /// Custom chord definitions
    #[serde(default)]
    pub chords: Vec<ChordDefinition>,
    /// Starting key
    #[serde(default)]
    pub key: Option<KeyConfig>,
}

impl TheoryConfig {
    /// Load a configuration file; `.toml` files are read as TOML, anything
    /// else as YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Register every scale and chord definition. Returns how many entries
    /// were added; names that are already taken keep their first definition.
    pub fn apply(&self, scales: &ScaleRegistry, chords: &ChordRegistry) -> Result<usize> {
        let mut added = 0;
        for def in &self.scales {
            let scale = def.to_scale()?;
            if scales.register_shared(scale.into()) {
                added += 1;
            } else {
                warn!(name = %def.name, "scale name already registered, definition ignored");
            }
        }
        for def in &self.chords {
            if chords.register_shared(def.to_chord().into()) {
                added += 1;
            } else {
                warn!(name = %def.name, "chord name already registered, definition ignored");
            }
        }
        info!(added, "applied theory configuration");
        Ok(added)
    }

    /// Resolve the configured starting key, if any
    pub fn key(&self, scales: &ScaleRegistry) -> Result<Option<Key>> {
        self.key.as_ref().map(|k| k.resolve(scales)).transpose()
    }
}

/// A custom scale, given either as ascending semitones or as notes ordered
/// by importance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleDefinition {
    /// Name of the scale
    pub name: String,
    /// Members as semitones from the tonic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semitones: Option<Vec<i32>>,
    /// Members listed from most to least important
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<i32>>,
    /// Sampling weights, one per semitone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    /// Semitones per octave
    #[serde(default = "default_octave_size")]
    pub octave_size: i32,
}

fn default_octave_size() -> i32 {
    DEFAULT_OCTAVE_SIZE
}

impl ScaleDefinition {
    /// Build the scale this definition describes
    pub fn to_scale(&self) -> Result<Scale> {
        match (&self.semitones, &self.order) {
            (Some(semitones), None) => match &self.weights {
                Some(weights) => Scale::with_weights(
                    semitones.clone(),
                    weights.clone(),
                    self.name.clone(),
                    self.octave_size,
                )
                .with_context(|| format!("Invalid weights for scale '{}'", self.name)),
                None => Ok(Scale::new(semitones.clone(), self.name.clone(), self.octave_size)),
            },
            (None, Some(order)) => {
                if self.weights.is_some() {
                    bail!("Scale '{}': weights cannot be combined with order", self.name);
                }
                Ok(Scale::from_order(order, self.name.clone(), self.octave_size))
            }
            _ => bail!(
                "Scale '{}' must define exactly one of semitones or order",
                self.name
            ),
        }
    }
}

/// A custom chord shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordDefinition {
    /// Name of the chord
    pub name: String,
    /// Successive intervals between chord tones
    pub intervals: Vec<i32>,
}

impl ChordDefinition {
    pub fn to_chord(&self) -> Chord {
        Chord::new(self.intervals.clone(), 0, self.name.clone())
    }
}

/// Starting key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyConfig {
    /// Tonic note name (e.g., "C", "F#3")
    pub tonic: String,
    /// Registered scale name
    #[serde(default = "default_scale")]
    pub scale: String,
}

fn default_scale() -> String {
    "major".to_string()
}

impl KeyConfig {
    pub fn resolve(&self, scales: &ScaleRegistry) -> Result<Key> {
        Key::parse(&self.tonic, &self.scale, scales)
            .with_context(|| format!("Invalid key: {} {}", self.tonic, self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const YAML: &str = r#"
scales:
  - name: hirajoshi
    semitones: [0, 2, 3, 7, 8]
  - name: fifths_first
    order: [0, 7, 4, 11]
  - name: weighted_triad
    semitones: [0, 4, 7]
    weights: [2, 1, 1]
chords:
  - name: minor7
    intervals: [3, 4, 3]
key:
  tonic: "D4"
  scale: "hirajoshi"
"#;

    #[test]
    fn test_parse_yaml() {
        let config = TheoryConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.scales.len(), 3);
        assert_eq!(config.scales[0].octave_size, 12);
        assert_eq!(config.chords[0].intervals, vec![3, 4, 3]);
        assert_eq!(config.key.as_ref().unwrap().tonic, "D4");
    }

    #[test]
    fn test_apply_and_resolve_key() {
        let config = TheoryConfig::from_yaml(YAML).unwrap();
        let scales = ScaleRegistry::with_builtins();
        let chords = ChordRegistry::with_builtins();

        assert_eq!(config.apply(&scales, &chords).unwrap(), 4);
        assert_eq!(scales.by_name("fifths_first").unwrap().semitones(), &[0, 7, 4, 11]);
        assert_eq!(scales.by_name("weighted_triad").unwrap().weights(), &[0.5, 0.25, 0.25]);
        assert_eq!(chords.by_name("minor7").unwrap().semitones(), vec![0, 3, 7, 10]);

        let key = config.key(&scales).unwrap().unwrap();
        assert_eq!(key.tonic(), 62);
        assert_eq!(key.get(1), 64);

        // applying again adds nothing
        assert_eq!(config.apply(&scales, &chords).unwrap(), 0);
    }

    #[test]
    fn test_builtin_names_are_not_replaced() {
        let config = TheoryConfig::from_yaml("scales:\n  - name: major\n    semitones: [0, 1]\n")
            .unwrap();
        let scales = ScaleRegistry::with_builtins();
        assert_eq!(config.apply(&scales, &ChordRegistry::new()).unwrap(), 0);
        assert_eq!(scales.by_name("major").unwrap().len(), 7);
    }

    #[test]
    fn test_invalid_definitions() {
        let both = ScaleDefinition {
            name: "both".to_string(),
            semitones: Some(vec![0]),
            order: Some(vec![0]),
            weights: None,
            octave_size: 12,
        };
        assert!(both.to_scale().is_err());

        let neither = ScaleDefinition {
            semitones: None,
            order: None,
            ..both.clone()
        };
        assert!(neither.to_scale().is_err());

        let bad_weights = ScaleDefinition {
            order: None,
            weights: Some(vec![1.0, 1.0]),
            ..both
        };
        assert!(bad_weights.to_scale().is_err());
    }

    #[test]
    fn test_unknown_key_scale() {
        let config = TheoryConfig::from_yaml("key:\n  tonic: C\n  scale: mundo\n").unwrap();
        assert!(config.key(&ScaleRegistry::with_builtins()).is_err());

        let config = TheoryConfig::from_yaml("key:\n  tonic: G\n").unwrap();
        let key = config.key(&ScaleRegistry::with_builtins()).unwrap().unwrap();
        assert_eq!(key.scale().name(), "major");
    }

    #[test]
    fn test_load_yaml_and_toml_files() {
        let dir = tempdir().unwrap();

        let yaml_path = dir.path().join("theory.yaml");
        fs::write(&yaml_path, YAML).unwrap();
        assert_eq!(TheoryConfig::load(&yaml_path).unwrap().scales.len(), 3);

        let toml_path = dir.path().join("theory.toml");
        let toml_text = r#"
[[scales]]
name = "pelog"
semitones = [0, 1, 3, 7, 8]

[key]
tonic = "E"
"#;
        fs::write(&toml_path, toml_text).unwrap();
        let config = TheoryConfig::load(&toml_path).unwrap();
        assert_eq!(config.scales[0].name, "pelog");
        assert_eq!(config.key.unwrap().scale, "major");
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.yaml");
        fs::write(&path, "this is not valid yaml: [").unwrap();
        assert!(TheoryConfig::load(&path).is_err());
        assert!(TheoryConfig::load(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_round_trip() {
        let config = TheoryConfig::from_yaml(YAML).unwrap();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(TheoryConfig::from_yaml(&yaml).unwrap(), config);
    }
}
