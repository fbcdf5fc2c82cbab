//! Priority frontier (OPEN list) of inconsistent states.
//!
//! A binary heap with lazy invalidation: the map holds the authoritative key
//! of every member, and heap entries whose key no longer matches are dropped
//! when they surface. Removing a state is therefore O(1) and re-keying the
//! whole frontier is a single heap rebuild.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use crate::core::GridCoord;

use super::key::Key;

/// Heap entry.
#[derive(Clone, Copy, Debug)]
struct FrontierNode {
    key: Key,
    coord: GridCoord,
}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.coord == other.coord
    }
}

impl Eq for FrontierNode {}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; coordinates break exact ties
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered set of states keyed by [`Key`], at most one entry per state.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierNode>,
    keys: HashMap<GridCoord, Key>,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a state or replace its key.
    pub fn upsert(&mut self, coord: GridCoord, key: Key) {
        match self.keys.entry(coord) {
            Entry::Occupied(mut e) => {
                if *e.get() == key {
                    return;
                }
                e.insert(key);
            }
            Entry::Vacant(e) => {
                e.insert(key);
            }
        }
        self.heap.push(FrontierNode { key, coord });
        self.maybe_compact();
    }

    /// Remove a state. Returns its key if it was present.
    pub fn remove(&mut self, coord: GridCoord) -> Option<Key> {
        self.keys.remove(&coord)
    }

    /// Check membership.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.keys.contains_key(&coord)
    }

    /// Current key of a member.
    #[inline]
    pub fn key_of(&self, coord: GridCoord) -> Option<Key> {
        self.keys.get(&coord).copied()
    }

    /// Remove and return the state with the smallest key.
    pub fn pop_min(&mut self) -> Option<(GridCoord, Key)> {
        while let Some(node) = self.heap.pop() {
            if self.keys.get(&node.coord) == Some(&node.key) {
                self.keys.remove(&node.coord);
                return Some((node.coord, node.key));
            }
        }
        None
    }

    /// Smallest key without removing it.
    pub fn top_key(&mut self) -> Option<Key> {
        self.discard_stale_top();
        self.heap.peek().map(|node| node.key)
    }

    /// State with the smallest key without removing it.
    pub fn peek(&mut self) -> Option<(GridCoord, Key)> {
        self.discard_stale_top();
        self.heap.peek().map(|node| (node.coord, node.key))
    }

    /// True if no state is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of queued states.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Iterate over queued states (unordered).
    pub fn states(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.keys.keys().copied()
    }

    /// Bulk-insert states with freshly computed keys.
    pub fn merge<I, F>(&mut self, states: I, mut key_fn: F)
    where
        I: IntoIterator<Item = GridCoord>,
        F: FnMut(GridCoord) -> Key,
    {
        for coord in states {
            let key = key_fn(coord);
            self.upsert(coord, key);
        }
    }

    /// Recompute the key of every member and rebuild the heap.
    pub fn rekey<F>(&mut self, mut key_fn: F)
    where
        F: FnMut(GridCoord) -> Key,
    {
        for (coord, key) in self.keys.iter_mut() {
            *key = key_fn(*coord);
        }
        self.rebuild();
    }

    fn discard_stale_top(&mut self) {
        while let Some(node) = self.heap.peek() {
            if self.keys.get(&node.coord) == Some(&node.key) {
                return;
            }
            self.heap.pop();
        }
    }

    fn maybe_compact(&mut self) {
        if self.heap.len() > 4 * self.keys.len() + 64 {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.heap = self
            .keys
            .iter()
            .map(|(&coord, &key)| FrontierNode { key, coord })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> GridCoord {
        GridCoord::new(x, y)
    }

    #[test]
    fn test_pop_in_key_order() {
        let mut f = Frontier::new();
        f.upsert(c(0, 0), Key::new(3.0, 1.0));
        f.upsert(c(1, 0), Key::new(1.0, 1.0));
        f.upsert(c(2, 0), Key::new(3.0, 0.5));

        assert_eq!(f.pop_min(), Some((c(1, 0), Key::new(1.0, 1.0))));
        assert_eq!(f.pop_min(), Some((c(2, 0), Key::new(3.0, 0.5))));
        assert_eq!(f.pop_min(), Some((c(0, 0), Key::new(3.0, 1.0))));
        assert_eq!(f.pop_min(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn test_upsert_replaces_key() {
        let mut f = Frontier::new();
        f.upsert(c(0, 0), Key::new(5.0, 5.0));
        f.upsert(c(1, 1), Key::new(2.0, 2.0));
        f.upsert(c(0, 0), Key::new(1.0, 1.0));

        assert_eq!(f.len(), 2);
        assert_eq!(f.top_key(), Some(Key::new(1.0, 1.0)));
        assert_eq!(f.pop_min().map(|(s, _)| s), Some(c(0, 0)));
        assert_eq!(f.pop_min().map(|(s, _)| s), Some(c(1, 1)));
        assert_eq!(f.pop_min(), None);
    }

    #[test]
    fn test_remove_skips_stale_entries() {
        let mut f = Frontier::new();
        f.upsert(c(0, 0), Key::new(1.0, 1.0));
        f.upsert(c(1, 0), Key::new(2.0, 2.0));

        assert_eq!(f.remove(c(0, 0)), Some(Key::new(1.0, 1.0)));
        assert!(!f.contains(c(0, 0)));
        assert_eq!(f.top_key(), Some(Key::new(2.0, 2.0)));
        assert_eq!(f.pop_min().map(|(s, _)| s), Some(c(1, 0)));
    }

    #[test]
    fn test_rekey_and_merge() {
        let mut f = Frontier::new();
        f.upsert(c(0, 0), Key::new(1.0, 0.0));
        f.upsert(c(5, 0), Key::new(2.0, 0.0));

        // Reverse the order by keying on -x
        f.rekey(|s| Key::new(10.0 - s.x as f32, 0.0));
        assert_eq!(f.peek().map(|(s, _)| s), Some(c(5, 0)));

        f.merge([c(9, 0), c(0, 0)], |s| Key::new(10.0 - s.x as f32, 0.0));
        assert_eq!(f.len(), 3);
        assert_eq!(f.pop_min().map(|(s, _)| s), Some(c(9, 0)));
    }

    #[test]
    fn test_ties_broken_by_coordinate() {
        let mut f = Frontier::new();
        f.upsert(c(3, 1), Key::new(1.0, 1.0));
        f.upsert(c(1, 2), Key::new(1.0, 1.0));
        assert_eq!(f.pop_min().map(|(s, _)| s), Some(c(1, 2)));
    }

    #[test]
    fn test_heap_compacts_under_churn() {
        let mut f = Frontier::new();
        for i in 0..1000 {
            f.upsert(c(0, 0), Key::new(i as f32, 0.0));
        }
        assert_eq!(f.len(), 1);
        assert!(f.heap.len() <= 4 * f.len() + 65);
        assert_eq!(f.pop_min(), Some((c(0, 0), Key::new(999.0, 0.0))));
    }
}
