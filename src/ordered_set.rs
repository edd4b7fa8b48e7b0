use std::hash::Hash;

use derive_more::derive::Deref;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A collection that keeps the first-seen order of its items and ignores
/// repeated insertions.
///
/// Unlike [`IndexSet`]'s own `PartialEq`, two `OrderedSet`s are only equal
/// if they hold the same items *in the same order*.
#[derive(Clone, Debug, Deref, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize + Hash + Eq",
    deserialize = "T: Deserialize<'de> + Hash + Eq"
))]
pub struct OrderedSet<T: Hash + Eq>(IndexSet<T>);

impl<T: Hash + Eq> OrderedSet<T> {
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Appends `item` unless it is already present.
    /// Returns `true` if the item was new.
    pub fn insert(&mut self, item: T) -> bool {
        self.0.insert(item)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0.into_iter().collect()
    }
}

impl<T: Hash + Eq> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl<T: Hash + Eq> Eq for OrderedSet<T> {}

impl<T: Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<T: Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Hash + Eq> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Hash + Eq + AsRef<str>> OrderedSet<T> {
    /// Space-joined form used by the term and kanji bank rows.
    pub fn join(&self, sep: &str) -> String {
        let parts: Vec<&str> = self.0.iter().map(AsRef::as_ref).collect();
        parts.join(sep)
    }
}
