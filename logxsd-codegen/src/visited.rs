//! Traversal-scoped visited set.

use logxsd_registry::{TypeCatalog, TypeKey, WellKnown};
use std::collections::HashSet;

/// Framework types that never receive a definition of their own.
const NEVER_EMITTED: [WellKnown; 3] = [WellKnown::Root, WellKnown::Component, WellKnown::Layout];

/// Types already examined during one generation run.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    keys: HashSet<TypeKey>,
}

impl VisitedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set pre-seeded with the universal root, the base component
    /// type and the base layout type of `catalog`.
    #[must_use]
    pub fn seeded<C: TypeCatalog + ?Sized>(catalog: &C) -> Self {
        let mut set = Self::new();
        for tag in NEVER_EMITTED {
            if let Some(key) = catalog.well_known(tag) {
                set.keys.insert(key);
            }
        }
        set
    }

    /// Marks `key` visited. Returns false if it already was.
    pub fn insert(&mut self, key: TypeKey) -> bool {
        self.keys.insert(key)
    }

    /// Returns the number of visited types.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}
