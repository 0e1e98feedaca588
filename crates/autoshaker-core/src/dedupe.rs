//! Identities of bushes already harvested in the current window.
//!
//! A blooming bush stays "in bloom" on the host side even after it has
//! been harvested, so without this set the engine would harvest it again
//! on every rescan. Keyed by [`EntityId`], not by tile, because the same
//! bush may be reached through different lookup paths.

use std::collections::BTreeSet;

use autoshaker_types::EntityId;

/// Set of entities acted upon since the last rollover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupeTracker {
    seen: BTreeSet<EntityId>,
}

impl DedupeTracker {
    /// Create an empty tracker.
    pub const fn new() -> Self {
        Self {
            seen: BTreeSet::new(),
        }
    }

    /// Whether `id` was already acted upon.
    pub fn contains(&self, id: EntityId) -> bool {
        self.seen.contains(&id)
    }

    /// Record `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: EntityId) -> bool {
        self.seen.insert(id)
    }

    /// Forget everything. Called by the active rollover only.
    pub(crate) fn clear(&mut self) {
        self.seen.clear();
    }

    /// Number of distinct entities recorded.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsertion_is_a_no_op() {
        let mut tracker = DedupeTracker::new();
        let id = EntityId::new();
        assert!(tracker.insert(id));
        assert!(!tracker.insert(id));
        assert_eq!(tracker.len(), 1);
        assert!(tracker.contains(id));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut tracker = DedupeTracker::new();
        tracker.insert(EntityId::new());
        tracker.insert(EntityId::new());
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
