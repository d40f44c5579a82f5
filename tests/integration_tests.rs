// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for TONAL
//!
//! These tests verify that registries, keys and patterns work together
//! through the public API.

use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tonal::config::TheoryConfig;
use tonal::pattern::{Degree, Loop, Pattern, Range, Sequence};
use tonal::{Key, Scale, ScaleRegistry, TheoryError, REST};

fn builtins() -> ScaleRegistry {
    ScaleRegistry::with_builtins()
}

/// Test the C major membership scenario end to end
#[test]
fn test_c_major_membership() {
    let key = Key::parse("C", "major", &builtins()).unwrap();
    assert_eq!(key.pitch_classes(), vec![0, 2, 4, 5, 7, 9, 11]);
    assert!(key.contains(0));
    assert!(!key.contains(1));
    assert!(!key.contains(13));
    assert!(key.contains(-1));
}

/// Test that minor-to-major voice leading moves three semitones
#[test]
fn test_minor_to_major_distance() {
    let registry = builtins();
    let minor = Key::parse("C", "minor", &registry).unwrap();
    let major = Key::parse("C", "major", &registry).unwrap();
    assert_eq!(minor.pitch_classes(), vec![0, 2, 3, 5, 7, 8, 10]);
    assert_eq!(minor.distance(&major), 3);
    assert_eq!(minor.distance(&minor), 0);
}

/// Test snapping across the octave boundary
#[test]
fn test_nearest_note_wraps_to_next_root() {
    let scale = Arc::new(Scale::new(vec![0, 2, 3, 5, 7, 9], "gapped", 12));
    let key = Key::new(0, scale);
    assert_eq!(key.nearest_note(11), 12);
    assert_eq!(key.nearest_note(10), 9);
}

/// Test the periodicity and idempotence properties over every built-in key
#[test]
fn test_key_properties_for_all_builtins() {
    let registry = builtins();
    for scale in registry.all() {
        let size = scale.len() as i32;
        for degree in -15..15 {
            assert_eq!(scale.get(degree + size), scale.get(degree) + 12);
        }

        for tonic in 0..12 {
            let key = Key::new(tonic, Arc::clone(&scale));
            assert_eq!(key.distance(&key), 0);
            assert!(key.contains(REST));
            for pitch in 0..36 {
                assert_eq!(key.contains(pitch), key.contains(pitch + 12));
                let snapped = key.nearest_note(pitch);
                assert_eq!(key.nearest_note(snapped), snapped);
                if key.contains(pitch) {
                    assert_eq!(snapped, pitch);
                }
            }
        }
    }
}

/// Test the endpoints of a fade between two keys
#[test]
fn test_fade_endpoints() {
    let registry = builtins();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..25 {
        let a = Key::random(&registry, &mut rng).unwrap();
        let b = Key::random(&registry, &mut rng).unwrap();

        let mut start = a.fade_to(&b, 0.0);
        start.sort_unstable();
        assert_eq!(start, a.pitch_classes());

        let middle = a.fade_to(&b, 0.5);
        assert!(middle.iter().all(|pc| b.pitch_classes().contains(pc)));
        assert!(middle.iter().all(|pc| a.pitch_classes().contains(pc)));

        let mut end = a.fade_to(&b, 1.0);
        end.sort_unstable();
        assert_eq!(end, b.pitch_classes());
    }
}

/// Test that registry errors surface through key construction
#[test]
fn test_registry_errors() {
    let registry = ScaleRegistry::new();
    registry.register(Scale::new(vec![0, 4, 7], "triad", 12));
    registry.register(Scale::new(vec![0, 3, 7], "triad", 12));
    assert_eq!(registry.by_name("triad").unwrap().semitones(), &[0, 4, 7]);

    assert!(matches!(
        Key::with_scale_name(0, "major", &registry),
        Err(TheoryError::NotFound { .. })
    ));

    registry.clear();
    let mut rng = StdRng::seed_from_u64(5);
    assert!(matches!(
        Key::random(&registry, &mut rng),
        Err(TheoryError::EmptyRegistry { .. })
    ));
}

/// Test that keys built on different threads share one registry entry
#[test]
fn test_shared_registry_across_threads() {
    let registry = Arc::new(builtins());
    let handles: Vec<_> = (0..4)
        .map(|tonic| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let key = Key::with_scale_name(tonic, "dorian", &registry).unwrap();
                key.nearest_note(61)
            })
        })
        .collect();

    for handle in handles {
        let pitch = handle.join().unwrap();
        assert!((55..=67).contains(&pitch));
    }
}

/// Test a config-defined scale driving a degree pattern
#[test]
fn test_config_to_pattern_flow() {
    let yaml = r#"
scales:
  - name: hirajoshi
    semitones: [0, 2, 3, 7, 8]
key:
  tonic: "A3"
  scale: "hirajoshi"
"#;
    let config = TheoryConfig::from_yaml(yaml).unwrap();
    let scales = builtins();
    config.apply(&scales, &tonal::ChordRegistry::new()).unwrap();
    let key = config.key(&scales).unwrap().unwrap();
    assert_eq!(key.tonic(), 57);

    let degrees = Sequence::new(vec![0.0, 1.0, -1.0, 5.0]).unwrap().with_repeats(1);
    let mut pitches = Degree::new(Box::new(Loop::new(Box::new(degrees)).with_count(2)), key);
    assert_eq!(
        pitches.take_values(10),
        vec![57.0, 59.0, -1.0, 69.0, 57.0, 59.0, -1.0, 69.0]
    );
}

/// Test that a snapped ascending line stays in key and never moves down
#[test]
fn test_snapped_range_is_monotonic() {
    let key = Key::parse("F#", "major_pentatonic", &builtins()).unwrap();
    let mut range = Range::new(48.0, 72.0, 1.0).unwrap();
    let snapped: Vec<i32> = range
        .take_values(100)
        .into_iter()
        .map(|p| key.nearest_note(p as i32))
        .collect();

    assert_eq!(snapped.len(), 24);
    assert!(snapped.iter().all(|&p| key.contains(p)));
    assert!(snapped.windows(2).all(|w| w[0] <= w[1]));
}
