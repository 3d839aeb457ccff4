use core::cmp::Ordering;

use crate::Bentwood;

struct MapEntry<K: Ord, V> {
    key: K,
    value: V,
}

impl<K: Ord, V> PartialEq for MapEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Ord, V> Eq for MapEntry<K, V> {}

impl<K: Ord, V> PartialOrd for MapEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for MapEntry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// An associative array, storing key-value pairs.
///
/// Entries are ordered by key alone over a [`Bentwood`] splay tree, so the
/// keys touched most recently sit near the root. Lookups splay and
/// therefore take `&mut self`, like on the underlying set.
pub struct BentwoodMap<K: Ord, V> {
    tree: Bentwood<MapEntry<K, V>>,
}

impl<K: Ord, V> BentwoodMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: Bentwood::new(),
        }
    }

    /// Inserts the pair, returning whether the key was newly added. An
    /// already present key keeps its existing value.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.tree.insert(MapEntry { key, value })
    }

    /// Checks whether `key` is stored, splaying its entry to the root.
    pub fn contains_key(&mut self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Value stored under `key`, with its entry splayed to the root.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.tree.splay_root_by(&|entry| key.cmp(&entry.key));

        match self.tree.root_element() {
            Some(entry) if entry.key == *key => Some(&entry.value),
            _ => None,
        }
    }

    /// Mutable access to the value stored under `key`. Only the value is
    /// reachable; keys stay immutable once placed.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.splay_root_by(&|entry| key.cmp(&entry.key));

        match self.tree.root_element_mut() {
            Some(entry) if entry.key == *key => Some(&mut entry.value),
            _ => None,
        }
    }

    /// Removes the entry stored under `key`, returning whether it existed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove_by(&|entry| key.cmp(&entry.key))
    }

    /// Visits the entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.tree.iter().map(|entry| (&entry.key, &entry.value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord, V> Default for BentwoodMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for BentwoodMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BentwoodMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
