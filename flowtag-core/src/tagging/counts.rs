use crate::tagging::index::KeyTuple;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Reserved bucket for records that match no lookup rule.
pub const UNTAGGED: &str = "Untagged";

pub type TagCounts = FrequencyTable<String>;
pub type KeyCounts = FrequencyTable<KeyTuple>;

/// Counter that remembers the order in which keys were first seen.
///
/// Reports are written in that order, which keeps output deterministic for
/// identical inputs.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, u64)>,
    positions: HashMap<K, usize, ahash::RandomState>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::default(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` at zero unless it is already present.
    pub fn seed<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.slot(key);
    }

    pub fn increment<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.add(key, 1);
    }

    pub fn add<Q>(&mut self, key: &Q, count: u64)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        let slot = self.slot(key);
        self.entries[slot].1 += count;
    }

    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.get(key).map(|&slot| self.entries[slot].1)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.positions.contains_key(key)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds every count of `other` into `self`. Keys unknown to `self` are
    /// appended in `other`'s order.
    pub fn merge(&mut self, other: &FrequencyTable<K>) {
        for (key, count) in other.iter() {
            self.add(key, count);
        }
    }

    fn slot<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&slot) = self.positions.get(key) {
            return slot;
        }

        let owned = key.to_owned();
        let slot = self.entries.len();
        self.entries.push((owned.clone(), 0));
        self.positions.insert(owned, slot);
        slot
    }
}

impl FrequencyTable<String> {
    /// A tag table holding only the `Untagged` bucket.
    pub fn with_untagged() -> Self {
        let mut table = Self::new();
        table.seed(UNTAGGED);
        table
    }
}

impl<K: Hash + Eq> PartialEq for FrequencyTable<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Hash + Eq> Eq for FrequencyTable<K> {}
