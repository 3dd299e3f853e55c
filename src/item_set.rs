use crate::item::{Item, TimeInterval};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

/// An ordered, deduplicated set of items carrying a support value.
///
/// Items are kept sorted by their total order at all times, which is what
/// makes [`ItemSet::fingerprint`] independent of insertion order: two sets
/// built from the same elements in different orders end up byte-identical
/// internally, so hashing them always agrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSet<I: Item> {
    items: Vec<I>,
    pub support: f64,
    /// Intersection of the validity intervals of every transaction that
    /// witnessed this set, when the Finder was given witness tracking to
    /// do (spec.md §4.3's temporal propagation). `None` for non-temporal
    /// mining runs.
    interval: Option<TimeInterval>,
}

impl<I: Item> ItemSet<I> {
    /// Builds a set from arbitrary items, sorting and deduplicating them.
    pub fn new(mut items: Vec<I>, support: f64) -> Self {
        items.sort();
        items.dedup();
        ItemSet {
            items,
            support,
            interval: None,
        }
    }

    /// Builds a set that the caller has already sorted and deduplicated.
    /// Used on hot paths (candidate joining) where that's already true.
    pub(crate) fn from_sorted(items: Vec<I>, support: f64) -> Self {
        debug_assert!(items.windows(2).all(|w| w[0] < w[1]));
        ItemSet {
            items,
            support,
            interval: None,
        }
    }

    pub(crate) fn with_interval(mut self, interval: Option<TimeInterval>) -> Self {
        self.interval = interval;
        self
    }

    /// The validity interval witness tracking computed for this set, if any.
    pub fn interval(&self) -> Option<TimeInterval> {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[I] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.items.iter()
    }

    pub fn contains(&self, item: &I) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// `true` if every item of `self` is also in `other`.
    pub fn is_subset_of(&self, other: &ItemSet<I>) -> bool {
        self.items.iter().all(|item| other.contains(item))
    }

    /// Items in `self` but not in `other`, in sorted order.
    pub fn difference(&self, other: &ItemSet<I>) -> Vec<I> {
        self.items
            .iter()
            .filter(|item| !other.contains(item))
            .cloned()
            .collect()
    }

    /// Whether `self` and `other` share no items.
    pub fn is_disjoint_from(&self, other: &ItemSet<I>) -> bool {
        self.items.iter().all(|item| !other.contains(item))
    }

    /// A stable, order-independent hash of this set's elements, used as
    /// the public key of the frequent-item-set map. Per spec.md §3,
    /// lookup correctness never relies on this being collision-free —
    /// internal algorithms key by the item vector itself and only project
    /// to this fingerprint at the public boundary.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for item in &self.items {
            item.hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl<I: Item> PartialEq for ItemSet<I> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<I: Item> Eq for ItemSet<I> {}
