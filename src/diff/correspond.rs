//! Keyed correspondence between two ordered collections.
//!
//! Both sides are indexed by key once, then partitioned into keys present on
//! both sides and keys unique to either side. Nothing is removed from a map
//! while it is being iterated.

use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Normalize a title or name before it is used as a correspondence key.
///
/// Authoring tools occasionally leave leading or trailing whitespace in
/// titles; it does not make two dashboards or panels distinct.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_string()
}

/// Three-way partition of two keyed collections.
///
/// Within one side, a repeated key overwrites the earlier item (last write
/// wins). Each repeated key is listed once in the matching `duplicates_*`
/// field so callers can report the collapse.
#[derive(Debug, Clone)]
pub struct Correspondence<K, T> {
    /// Keys present on both sides, in left-side order
    pub common: IndexMap<K, (T, T)>,
    /// Keys present only on the left, in left-side order
    pub only_left: IndexSet<K>,
    /// Keys present only on the right, in right-side order
    pub only_right: IndexSet<K>,
    /// Keys that occurred more than once on the left
    pub duplicates_left: IndexSet<K>,
    /// Keys that occurred more than once on the right
    pub duplicates_right: IndexSet<K>,
}

impl<K, T> Correspondence<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    /// Build the partition of `left` and `right` using `key_of`.
    pub fn build<I, J, F>(left: I, right: J, key_of: F) -> Self
    where
        I: IntoIterator<Item = T>,
        J: IntoIterator<Item = T>,
        F: Fn(&T) -> K,
    {
        let (left_map, duplicates_left) = index_by_key(left, &key_of);
        let (mut right_map, duplicates_right) = index_by_key(right, &key_of);

        let mut common = IndexMap::new();
        let mut only_left = IndexSet::new();
        for (key, left_item) in left_map {
            match right_map.get(&key) {
                Some(right_item) => {
                    let right_item = right_item.clone();
                    common.insert(key, (left_item, right_item));
                }
                None => {
                    only_left.insert(key);
                }
            }
        }
        right_map.retain(|key, _| !common.contains_key(key));
        let only_right = right_map.into_keys().collect();

        Self {
            common,
            only_left,
            only_right,
            duplicates_left,
            duplicates_right,
        }
    }

    /// Whether both sides have exactly the same key set.
    #[must_use]
    pub fn keys_match(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }
}

/// Index items by key; later items replace earlier ones in place.
fn index_by_key<K, T, I, F>(items: I, key_of: &F) -> (IndexMap<K, T>, IndexSet<K>)
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> K,
{
    let mut map = IndexMap::new();
    let mut duplicates = IndexSet::new();
    for item in items {
        let key = key_of(&item);
        if map.insert(key.clone(), item).is_some() {
            duplicates.insert(key);
        }
    }
    (map, duplicates)
}
