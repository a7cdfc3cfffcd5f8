//! An insertion-ordered sequence of key-value pairs, used for tnetstring dictionaries.
//!
//! A `}` frame is just a run of key frames and value frames, so a decoded dictionary
//! keeps every pair in the order it appeared, duplicate keys included. Lookups return the
//! last pair for a key, which matches what a hash map would hold after inserting the pairs
//! in order.
//!
//! # Example
//!
//! ```
//! use std::collections::{BTreeMap, HashMap};
//! use tnetstring::prelude::*;
//!
//! // from a vector of pairs, order kept as given
//! let vm = VecMap::from(vec![("b", 1), ("a", 2)]);
//! assert_eq!(vm.iter().next(), Some(&("b", 1)));
//!
//! // from a `BTreeMap`, in key order
//! let mut btmap = BTreeMap::new();
//! btmap.insert("a", 1);
//! let bt_vm = VecMap::from(btmap);
//!
//! // into a `HashMap`, last duplicate wins
//! let dup = VecMap::from(vec![("k", 1), ("k", 2)]);
//! let hm: HashMap<&str, i32> = dup.into_hashmap();
//! assert_eq!(hm["k"], 2);
//! ```

use std::{
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` pairs.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Appends a pair. An existing pair with the same key is kept.
    pub fn push(&mut self, key: K, value: V) { self.0.push((key, value)) }

    /// Returns length, counting duplicate keys separately.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", "bar"), ("foo", "baz")]);
    ///
    /// assert_eq!(vmap.len(), 2);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// The pairs as a slice.
    pub fn as_slice(&self) -> &[(K, V)] { &self.0 }
}

impl<K: PartialEq, V> VecMap<K, V> {
    /// Looks up the value of the last pair whose key equals `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![(1, "foo"), (2, "bar"), (1, "baz")]);
    ///
    /// assert_eq!(vmap.get(&1), Some(&"baz"));
    /// assert_eq!(vmap.get(&3), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.0.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Indicates whether some pair has key `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.get(key).is_some()
    }

    /// Drops every pair whose key reappears later, keeping the original position of
    /// the surviving pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use tnetstring::prelude::*;
    ///
    /// let mut vmap = VecMap::from(vec![("a", 1), ("b", 2), ("a", 3)]);
    /// vmap.dedup_keys();
    ///
    /// assert_eq!(vmap.into_iter().collect::<Vec<_>>(), vec![("b", 2), ("a", 3)]);
    /// ```
    pub fn dedup_keys(&mut self) {
        let mut keep = Vec::with_capacity(self.0.len());
        for (i, (k, _)) in self.0.iter().enumerate() {
            keep.push(!self.0[i + 1..].iter().any(|(later, _)| later == k));
        }
        let mut flags = keep.into_iter();
        self.0.retain(|_| flags.next().unwrap_or(true));
    }
}

impl<K: Eq + Hash, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`HashMap`] from the entries. Later duplicates
    /// overwrite earlier ones.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.into_iter().collect()
    }
}

impl<K: Ord, V> VecMap<K, V> {
    /// Consumes a [`VecMap`], producing a [`BTreeMap`]. Later duplicates overwrite earlier
    /// ones.
    pub fn into_btreemap(self) -> BTreeMap<K, V> { self.into_iter().collect() }
}

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap::new() }
}

impl<K, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { VecMap(v) }
}

impl<K, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self { hm.into_iter().collect() }
}

impl<K, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { bt.into_iter().collect() }
}

impl<K, V> From<VecMap<K, V>> for Vec<(K, V)> {
    fn from(vm: VecMap<K, V>) -> Self { vm.0 }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        VecMap(Vec::from_iter(iter))
    }
}

impl<K, V> Extend<(K, V)> for VecMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) { self.0.extend(iter) }
}
