// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named lookup of shared scales and chords.
//!
//! A registry is an ordinary value owned by whoever sets up the
//! composition context. Entries are handed out as `Arc`s so a key keeps
//! its scale alive even after the registry drops or removes it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use rand::Rng;
use tracing::{debug, trace};

use super::chord::Chord;
use super::scale::{Scale, ScaleType};
use crate::error::{TheoryError, TheoryResult};

/// Items that can be stored in a [`Registry`]
pub trait Named {
    /// What the registry holds, used in error messages
    const KIND: &'static str;

    /// Unique lookup name
    fn name(&self) -> &str;
}

/// Registry of scales by name
pub type ScaleRegistry = Registry<Scale>;

/// Registry of chords by name
pub type ChordRegistry = Registry<Chord>;

struct Entries<T> {
    order: Vec<Arc<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// Thread-safe name registry where the first registration of a name wins
pub struct Registry<T> {
    entries: RwLock<Entries<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
        }
    }
}

impl<T: Named> Registry<T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item and return a shared handle to it.
    ///
    /// If the name is already taken the registry keeps the existing entry;
    /// the returned handle still refers to the item passed in.
    pub fn register(&self, item: T) -> Arc<T> {
        let item = Arc::new(item);
        self.register_shared(Arc::clone(&item));
        item
    }

    /// Register a shared item. Returns false if the name was already taken.
    pub fn register_shared(&self, item: Arc<T>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.index.contains_key(item.name()) {
            debug!(kind = T::KIND, name = item.name(), "name already registered, keeping first");
            return false;
        }
        debug!(kind = T::KIND, name = item.name(), "registered");
        let position = entries.order.len();
        entries.index.insert(item.name().to_string(), position);
        entries.order.push(item);
        true
    }

    /// Look up an item by name
    pub fn by_name(&self, name: &str) -> TheoryResult<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .index
            .get(name)
            .map(|&i| Arc::clone(&entries.order[i]))
            .ok_or_else(|| TheoryError::NotFound {
                kind: T::KIND,
                name: name.to_string(),
            })
    }

    /// Pick a registered item uniformly at random
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> TheoryResult<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        if entries.order.is_empty() {
            return Err(TheoryError::EmptyRegistry { kind: T::KIND });
        }
        let item = Arc::clone(&entries.order[rng.gen_range(0..entries.order.len())]);
        trace!(kind = T::KIND, name = item.name(), "random pick");
        Ok(item)
    }

    /// All registered items, in registration order
    pub fn all(&self) -> Vec<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.order.clone()
    }

    /// All registered names, in registration order
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.order.iter().map(|item| item.name().to_string()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove an entry, freeing its name for a later registration
    pub fn remove(&self, name: &str) -> Option<Arc<T>> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let position = entries.index.remove(name)?;
        let item = entries.order.remove(position);
        for slot in entries.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        debug!(kind = T::KIND, name, "removed");
        Some(item)
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.order.clear();
        entries.index.clear();
        debug!(kind = T::KIND, "registry cleared");
    }
}

impl Registry<Scale> {
    /// Create a registry with all built-in scales registered
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for scale_type in ScaleType::ALL {
            registry.register(Scale::from_type(scale_type));
        }
        registry
    }
}

impl Registry<Chord> {
    /// Create a registry with the common triads registered
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for chord in Chord::builtins() {
            registry.register(chord);
        }
        registry
    }
}

impl<T: Named> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &T::KIND)
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::thread;

    #[test]
    fn test_first_registration_wins() {
        let registry = ScaleRegistry::new();
        registry.register(Scale::new(vec![0, 4, 7], "triad", 12));
        let second = registry.register(Scale::new(vec![0, 3, 7], "triad", 12));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.by_name("triad").unwrap().semitones(), &[0, 4, 7]);
        // the caller still owns its own scale
        assert_eq!(second.semitones(), &[0, 3, 7]);
    }

    #[test]
    fn test_register_shared_reports_insertion() {
        let registry = ScaleRegistry::new();
        assert!(registry.register_shared(Arc::new(Scale::major())));
        assert!(!registry.register_shared(Arc::new(Scale::major())));
    }

    #[test]
    fn test_by_name_not_found() {
        let registry = ScaleRegistry::with_builtins();
        assert!(registry.by_name("major").is_ok());

        let err = registry.by_name("mundo").unwrap_err();
        assert_eq!(
            err,
            TheoryError::NotFound {
                kind: "scale",
                name: "mundo".to_string()
            }
        );
    }

    #[test]
    fn test_random_from_empty_registry() {
        let mut rng = StdRng::seed_from_u64(1);
        let registry = ChordRegistry::new();
        assert_eq!(
            registry.random(&mut rng).unwrap_err(),
            TheoryError::EmptyRegistry { kind: "chord" }
        );
    }

    #[test]
    fn test_random_picks_registered() {
        let mut rng = StdRng::seed_from_u64(1);
        let registry = ScaleRegistry::with_builtins();
        for _ in 0..20 {
            let scale = registry.random(&mut rng).unwrap();
            assert!(registry.contains(scale.name()));
        }
    }

    #[test]
    fn test_all_in_registration_order() {
        let registry = ScaleRegistry::with_builtins();
        let names = registry.names();
        assert_eq!(names.len(), ScaleType::ALL.len());
        assert_eq!(names[0], "major");
        assert_eq!(registry.all()[5].name(), "minor");
    }

    #[test]
    fn test_remove_and_clear() {
        let registry = ScaleRegistry::with_builtins();
        let dorian = registry.remove("dorian").unwrap();
        assert_eq!(dorian.name(), "dorian");
        assert!(!registry.contains("dorian"));
        assert!(registry.remove("dorian").is_none());

        // indices after the removed entry still resolve
        assert_eq!(registry.by_name("chromatic").unwrap().len(), 12);

        registry.clear();
        assert!(registry.is_empty());
        // handles outlive the registry contents
        assert_eq!(dorian.len(), 7);
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(ScaleRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.register(Scale::new(vec![0, i], "shared", 12));
                    registry.register(Scale::new(vec![0], format!("own_{}", i), 12));
                    registry.by_name("shared").unwrap()
                })
            })
            .collect();

        let seen: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(registry.len(), 9);
        // every thread resolved the same winner
        for scale in &seen {
            assert!(Arc::ptr_eq(scale, &seen[0]));
        }
    }
}
