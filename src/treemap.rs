//! Implementation of an ordered map, backed by an unbalanced binary search tree
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{cmp::Ordering, fmt, mem};

use crate::bst::{natural, Less};
use crate::util::{
    order_by, InOrder, LevelOrder, Placement, PostOrder, PreOrder, Traversal, Tree,
};

//-----------------------------------------------------------------------------------------------//

/// An ordered map between keys and values, held in an unbalanced binary search tree.
///
/// This is the key/value counterpart of `Bst`: the comparator `F` is applied to keys only and
/// every node carries its value alongside the key. Unlike `Bst::insert`, `put` on an existing key
/// overwrites the stored value in place.
#[derive(Clone)]
pub struct TreeMap<K, V, F = Less<K>> {
    tree: Tree,
    key_value: Vec<(K, V)>,
    less: F,
}

impl<K, V> TreeMap<K, V>
where
    K: Ord,
{
    /// Constructor
    pub fn new() -> Self {
        Self::new_by(natural)
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_by(capacity, natural)
    }
}

impl<K, V, F> TreeMap<K, V, F> {
    /// Get the number of key/value pairs in the `TreeMap`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any key/value pairs in the `TreeMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all key/value pairs from the `TreeMap`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_value.truncate(0);
    }

    /// Reserves capacity for at least `additional` more key/value pairs
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_value.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_value.reserve(required);
        }
    }

    /// Get the pair with the smallest key
    pub fn min(&self) -> Option<(&K, &V)> {
        self.at(self.tree.first())
    }

    /// Get the pair with the largest key
    pub fn max(&self) -> Option<(&K, &V)> {
        self.at(self.tree.last())
    }

    /// Get the pair at a zero-based position in key order
    pub fn select(&self, rank: usize) -> Option<(&K, &V)> {
        self.at(self.tree.select(rank))
    }

    /// Check if any key maps to `value`
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Get the height of the tree: -1 when empty, 0 for a single pair
    pub fn height(&self) -> isize {
        self.tree.height()
    }

    /// Check whether every node's subtrees differ in height by at most one
    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    /// Iterate over the key/value pairs in ascending key order
    pub fn iter(&self) -> Traversal<'_, (K, V), InOrder<'_>> {
        self.in_order()
    }

    /// Iterate over the keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values in ascending key order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Iterate over the key/value pairs in ascending key order (left, node, right)
    pub fn in_order(&self) -> Traversal<'_, (K, V), InOrder<'_>> {
        Traversal::new(self.tree.in_order(), &self.key_value)
    }

    /// Iterate over the key/value pairs in pre-order (node, left, right)
    pub fn pre_order(&self) -> Traversal<'_, (K, V), PreOrder<'_>> {
        Traversal::new(self.tree.pre_order(), &self.key_value)
    }

    /// Iterate over the key/value pairs in post-order (left, right, node)
    pub fn post_order(&self) -> Traversal<'_, (K, V), PostOrder<'_>> {
        Traversal::new(self.tree.post_order(), &self.key_value)
    }

    /// Iterate over the key/value pairs breadth first, level by level
    pub fn level_order(&self) -> Traversal<'_, (K, V), LevelOrder<'_>> {
        Traversal::new(self.tree.level_order(), &self.key_value)
    }

    #[inline]
    fn at(&self, leaf: usize) -> Option<(&K, &V)> {
        if !leaf == 0 {
            None
        } else {
            let key_value = &self.key_value[leaf];
            Some((&key_value.0, &key_value.1))
        }
    }
}

impl<K, V, F> TreeMap<K, V, F>
where
    F: Fn(&K, &K) -> bool,
{
    /// Constructor, ordering keys with a strict less-than comparator
    pub fn new_by(less: F) -> Self {
        TreeMap {
            tree: Tree::new(),
            key_value: Vec::new(),
            less,
        }
    }

    /// Constructor, ordering keys with a strict less-than comparator
    pub fn with_capacity_by(capacity: usize, less: F) -> Self {
        TreeMap {
            tree: Tree::with_capacity(capacity),
            key_value: Vec::with_capacity(capacity),
            less,
        }
    }

    /// Build a `TreeMap` from key/value pairs, ordering keys with `less`
    pub fn from_iter_by<I>(iter: I, less: F) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new_by(less);
        map.extend(iter);
        map
    }

    /// Put a value by key.
    ///
    /// If the key is already present its value is overwritten in place and the previous value is
    /// returned; the shape of the tree does not change.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let placement = self
            .tree
            .insert(|x| order_by(&self.less, &key, &self.key_value[x].0));

        match placement {
            Placement::Found(leaf) => Some(mem::replace(&mut self.key_value[leaf].1, value)),
            Placement::Created(leaf) => {
                if leaf == self.key_value.len() {
                    self.key_value.push((key, value));
                } else {
                    self.key_value[leaf] = (key, value);
                }
                None
            }
        }
    }

    /// Get a value by key.
    ///
    /// If the key is not in the tree then `None` is returned.
    pub fn get(&self, key: &K) -> Option<&V> {
        let leaf = self.tree.get(|x| self.probe(key, x));
        if !leaf == 0 {
            return None;
        }
        Some(&self.key_value[leaf].1)
    }

    /// Get a mutable reference by key.
    ///
    /// If the key is not in the tree then `None` is returned - this function will not create a key
    /// if it does not exist. In this case use `put` instead.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let leaf = self.tree.get(|x| self.probe(key, x));
        if !leaf == 0 {
            return None;
        }
        Some(&mut self.key_value[leaf].1)
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &K) -> bool {
        !self.tree.get(|x| self.probe(key, x)) != 0
    }

    /// Remove a key and its value.
    ///
    /// Returns `false` if the key was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        let leaf = self
            .tree
            .remove(|x| order_by(&self.less, key, &self.key_value[x].0));
        !leaf != 0
    }

    /// Get the pair with the largest key less than or equal to `key`
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.at(self.tree.floor(|x| self.probe(key, x)))
    }

    /// Get the pair with the smallest key greater than or equal to `key`
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.at(self.tree.ceiling(|x| self.probe(key, x)))
    }

    /// Get the pair with the largest key strictly less than `key`
    pub fn lower(&self, key: &K) -> Option<(&K, &V)> {
        self.at(self.tree.lower(|x| self.probe(key, x)))
    }

    /// Get the pair with the smallest key strictly greater than `key`
    pub fn higher(&self, key: &K) -> Option<(&K, &V)> {
        self.at(self.tree.higher(|x| self.probe(key, x)))
    }

    /// Count the keys strictly less than `key`
    pub fn rank(&self, key: &K) -> usize {
        self.tree.rank(|x| self.probe(key, x))
    }

    /// Collect, in ascending key order, every pair whose key `k` satisfies `min <= k <= max`
    pub fn range(&self, min: &K, max: &K) -> Vec<(&K, &V)> {
        self.tree
            .range(|x| self.probe(min, x), |x| self.probe(max, x))
            .into_iter()
            .map(|leaf| {
                let key_value = &self.key_value[leaf];
                (&key_value.0, &key_value.1)
            })
            .collect()
    }

    /// Build a new `TreeMap` holding the pairs that satisfy `predicate`
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        K: Clone,
        V: Clone,
        F: Clone,
        P: FnMut(&K, &V) -> bool,
    {
        let mut result = Self::new_by(self.less.clone());
        for (key, value) in self.iter() {
            if predicate(key, value) {
                result.put(key.clone(), value.clone());
            }
        }
        result
    }

    #[inline]
    fn probe(&self, key: &K, leaf: usize) -> Ordering {
        order_by(&self.less, key, &self.key_value[leaf].0)
    }
}

impl<K, V> Default for TreeMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, F> fmt::Debug for TreeMap<K, V, F>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TreeMap")?;
        f.debug_map()
            .entries(self.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<K, V, F, G> PartialEq<TreeMap<K, V, G>> for TreeMap<K, V, F>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &TreeMap<K, V, G>) -> bool {
        self.count() == other.count() && self.iter().eq(other.iter())
    }
}

impl<K, V, F> Eq for TreeMap<K, V, F>
where
    K: Eq,
    V: Eq,
{
}

impl<'a, K, V, F> IntoIterator for &'a TreeMap<K, V, F> {
    type Item = &'a (K, V);
    type IntoIter = Traversal<'a, (K, V), InOrder<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, F> Extend<(K, V)> for TreeMap<K, V, F>
where
    F: Fn(&K, &K) -> bool,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TreeMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of putting into a map
fn test_treemap_0() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut map = TreeMap::new();

    assert_eq!(map.put(5, "Five".to_string()), None);
    assert_eq!(map.put(1, "One".to_string()), None);
    assert_eq!(map.put(9, "Nine".to_string()), None);

    assert_eq!(map.get(&5), Some(&"Five".to_string()));
    assert_eq!(map.get(&4), None);

    let v: Vec<(i32, String)> = map.iter().cloned().collect();
    assert_eq!(
        v,
        vec![
            (1, "One".to_string()),
            (5, "Five".to_string()),
            (9, "Nine".to_string())
        ]
    );
}

#[test]
// Putting an existing key overwrites the value without changing the shape
fn test_treemap_1() {
    let mut map: TreeMap<i32, &str> = [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    let before: Vec<i32> = map.pre_order().map(|(k, _)| *k).collect();

    assert_eq!(map.put(1, "A"), Some("a"));
    assert_eq!(map.count(), 3);
    assert_eq!(map.get(&1), Some(&"A"));

    let after: Vec<i32> = map.pre_order().map(|(k, _)| *k).collect();
    assert_eq!(before, after);

    if let Some(value) = map.get_mut(&3) {
        *value = "C";
    }
    assert!(map.contains_value(&"C"));
    assert!(!map.contains_value(&"c"));
}

#[test]
// Navigation: floor, ceiling, lower and higher
fn test_treemap_2() {
    let map: TreeMap<i32, i32> = [(10, 100), (20, 200), (30, 300), (40, 400)]
        .into_iter()
        .collect();

    assert_eq!(map.floor(&25), Some((&20, &200)));
    assert_eq!(map.floor(&20), Some((&20, &200)));
    assert_eq!(map.lower(&20), Some((&10, &100)));
    assert_eq!(map.lower(&10), None);
    assert_eq!(map.ceiling(&25), Some((&30, &300)));
    assert_eq!(map.ceiling(&30), Some((&30, &300)));
    assert_eq!(map.higher(&30), Some((&40, &400)));
    assert_eq!(map.higher(&40), None);
    assert_eq!(map.min(), Some((&10, &100)));
    assert_eq!(map.max(), Some((&40, &400)));
}

#[test]
// Rank, select, range and removal
fn test_treemap_3() {
    let mut map: TreeMap<i32, char> = [(4, 'd'), (2, 'b'), (6, 'f'), (1, 'a'), (3, 'c'), (5, 'e')]
        .into_iter()
        .collect();

    assert_eq!(map.rank(&4), 3);
    assert_eq!(map.select(3), Some((&4, &'d')));
    assert_eq!(map.range(&2, &4), [(&2, &'b'), (&3, &'c'), (&4, &'d')]);

    assert!(map.remove(&4));
    assert!(!map.remove(&4));
    assert!(!map.contains_key(&4));
    assert_eq!(map.select(3), Some((&5, &'e')));

    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, [1, 2, 3, 5, 6]);
    let values: Vec<char> = map.values().copied().collect();
    assert_eq!(values, ['a', 'b', 'c', 'e', 'f']);
}

#[test]
// Filter, clone and equality compare keys and values in order
fn test_treemap_4() {
    let map: TreeMap<i32, i32> = (0..10).map(|k| (k, k * k)).collect();
    let even = map.filter(|k, _| k % 2 == 0);
    assert_eq!(even.count(), 5);
    assert_eq!(even.get(&4), Some(&16));

    let mut copy = map.clone();
    assert_eq!(copy, map);
    copy.put(3, 0);
    assert_ne!(copy, map);
}

#[test]
// A stress test with putting and removing
fn test_treemap_5() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut map = TreeMap::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        map.put(key, value);
    }

    assert_eq!(map.count(), COUNT);

    let mut rng = SmallRng::seed_from_u64(5678901234);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        assert_eq!(map.get(&key), Some(&key.to_string()));
        assert!(map.remove(&key));
    }

    assert_eq!(map.count(), 0);
    assert_eq!(map.height(), -1);
}
