//! Deduplicated, ordered container with a pluggable key.
//!
//! A [`SortedSet`] stores each value under the key produced by its
//! comparator. Two values with the same key are the same element, so a
//! comparator that projects a field (e.g. a name) gives structural rather
//! than whole-value deduplication. Iteration is always ascending by key.
//!
//! ```
//! use sibyl::SortedSet;
//!
//! let mut set = SortedSet::new();
//! set.add(3);
//! set.add(1);
//! set.add(3);
//! assert_eq!(set.to_vec(), vec![1, 3]);
//! ```

use crate::utils::error::{Result, SibylError};
use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;
use std::ops::ControlFlow;

/// Ordered set keyed by `comparator(value)`.
///
/// The comparator is a plain function pointer fixed at construction, so the
/// set stays `Clone` and results of set algebra can inherit it.
#[derive(Clone)]
pub struct SortedSet<T, K = T> {
    entries: BTreeMap<K, T>,
    comparator: fn(&T) -> K,
}

impl<T: Ord + Clone> SortedSet<T> {
    /// Empty set using the value itself as key.
    pub fn new() -> Self {
        Self::with_comparator(T::clone)
    }
}

impl<T: Ord + Clone> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: Ord> SortedSet<T, K> {
    pub fn with_comparator(comparator: fn(&T) -> K) -> Self {
        Self {
            entries: BTreeMap::new(),
            comparator,
        }
    }

    /// Key under which `value` would be stored.
    pub fn comparator(&self, value: &T) -> K {
        (self.comparator)(value)
    }

    /// Inserts `value` unless an element with the same key exists.
    /// Returns whether the set changed; the first value stored for a key wins.
    pub fn add(&mut self, value: T) -> bool {
        let key = self.comparator(&value);
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Removes the element sharing `value`'s key. Returns whether one was removed.
    pub fn delete(&mut self, value: &T) -> bool {
        self.entries.remove(&self.comparator(value)).is_some()
    }

    pub fn has(&self, value: &T) -> bool {
        self.entries.contains_key(&self.comparator(value))
    }

    /// Stored element sharing `value`'s key, which may differ from `value`
    /// outside the key.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.entries.get(&self.comparator(value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.values().next()
    }

    pub fn iter(&self) -> btree_map::Values<'_, K, T> {
        self.entries.values()
    }

    /// Visits elements in ascending key order until `f` breaks.
    /// Returns the break value, or `None` if every element was visited.
    pub fn for_each<B, F>(&self, f: F) -> Option<B>
    where
        F: FnMut(&T) -> ControlFlow<B>,
    {
        match self.iter().try_for_each(f) {
            ControlFlow::Break(value) => Some(value),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Snapshot of the elements in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Elements present in every input set, each once.
    ///
    /// Membership is checked with each input's own comparator; the result
    /// uses the first input's. Fails if `sets` is empty.
    pub fn intersection(sets: &[&Self]) -> Result<Self>
    where
        T: Clone,
    {
        let first = *sets.first().ok_or_else(|| empty_operands("intersection"))?;
        let mut result = Self::with_comparator(first.comparator);

        // Scan from the smallest set
        let smallest = sets
            .iter()
            .min_by_key(|set| set.len())
            .copied()
            .unwrap_or(first);

        for value in smallest.iter() {
            if sets.iter().all(|set| set.has(value)) {
                result.add(value.clone());
            }
        }

        Ok(result)
    }

    /// Every element of every input set, each once.
    ///
    /// All inputs participate, including the first. The result uses the
    /// first input's comparator. Fails if `sets` is empty.
    pub fn union(sets: &[&Self]) -> Result<Self>
    where
        T: Clone,
    {
        let first = *sets.first().ok_or_else(|| empty_operands("union"))?;
        let mut result = Self::with_comparator(first.comparator);

        for set in sets {
            result.extend(set.iter().cloned());
        }

        Ok(result)
    }
}

fn empty_operands(operation: &str) -> SibylError {
    SibylError::InvalidArgument {
        field: "sets".to_string(),
        value: "[]".to_string(),
        reason: format!("{} requires at least one set", operation),
    }
}

impl<T, K: Ord> Extend<T> for SortedSet<T, K> {
    fn extend<It: IntoIterator<Item = T>>(&mut self, iter: It) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for SortedSet<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord + Clone> From<Vec<T>> for SortedSet<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T, K: Ord> IntoIterator for &'a SortedSet<T, K> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, K> fmt::Debug for SortedSet<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.values()).finish()
    }
}
