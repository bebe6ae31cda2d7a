//! Implementation of an unbalanced binary search tree
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crate::util::{
    order_by, InOrder, LevelOrder, Placement, PostOrder, PreOrder, Traversal, Tree,
};

//-----------------------------------------------------------------------------------------------//

/// A strict less-than comparator, as used by `Bst::new` and `TreeMap::new`
pub type Less<T> = fn(&T, &T) -> bool;

pub(crate) fn natural<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

//-----------------------------------------------------------------------------------------------//

/// An ordered set of values held in an unbalanced binary search tree.
///
/// Values are ordered by a strict less-than comparator `F`, which defaults to `Ord`. Two values
/// are considered equal when neither is less than the other, and inserting a value equal to one
/// already stored leaves the tree untouched.
///
/// The tree never rebalances. Average operations are logarithmic, but inserting values in sorted
/// order builds a chain of height `n - 1`. `height` and `is_balanced` report the shape as it is.
#[derive(Clone)]
pub struct Bst<T, F = Less<T>> {
    tree: Tree,
    key_slice: Vec<T>,
    less: F,
}

impl<T> Bst<T>
where
    T: Ord,
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

impl<T, F> Bst<T, F> {
    /// Get the number of values in the `Bst`
    #[inline]
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    /// Check if there are any values in the `Bst`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all values from the `Bst`
    pub fn clear(&mut self) {
        self.tree.clear();
        self.key_slice.truncate(0);
    }

    /// Reserves capacity for at least `additional` more values
    pub fn reserve(&mut self, additional: usize) {
        debug_assert_eq!(self.key_slice.len(), self.tree.allocated_count());

        let required = self.tree.reserve(additional);
        if required > 0 {
            self.key_slice.reserve(required);
        }
    }

    /// Get the smallest value
    pub fn min(&self) -> Option<&T> {
        self.at(self.tree.first())
    }

    /// Get the largest value
    pub fn max(&self) -> Option<&T> {
        self.at(self.tree.last())
    }

    /// Get the value at a zero-based position in sorted order
    pub fn select(&self, rank: usize) -> Option<&T> {
        self.at(self.tree.select(rank))
    }

    /// Get the height of the tree: -1 when empty, 0 for a single value
    pub fn height(&self) -> isize {
        self.tree.height()
    }

    /// Check whether every node's subtrees differ in height by at most one
    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    /// Iterate over the values in ascending order
    pub fn iter(&self) -> Traversal<'_, T, InOrder<'_>> {
        self.in_order()
    }

    /// Iterate over the values in ascending order (left, node, right)
    pub fn in_order(&self) -> Traversal<'_, T, InOrder<'_>> {
        Traversal::new(self.tree.in_order(), &self.key_slice)
    }

    /// Iterate over the values in pre-order (node, left, right)
    pub fn pre_order(&self) -> Traversal<'_, T, PreOrder<'_>> {
        Traversal::new(self.tree.pre_order(), &self.key_slice)
    }

    /// Iterate over the values in post-order (left, right, node)
    pub fn post_order(&self) -> Traversal<'_, T, PostOrder<'_>> {
        Traversal::new(self.tree.post_order(), &self.key_slice)
    }

    /// Iterate over the values breadth first, level by level
    pub fn level_order(&self) -> Traversal<'_, T, LevelOrder<'_>> {
        Traversal::new(self.tree.level_order(), &self.key_slice)
    }

    #[inline]
    fn at(&self, leaf: usize) -> Option<&T> {
        if !leaf == 0 {
            None
        } else {
            Some(&self.key_slice[leaf])
        }
    }
}

impl<T, F> Bst<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Constructor, ordering values with a strict less-than comparator
    pub fn new_by(less: F) -> Self {
        Bst {
            tree: Tree::new(),
            key_slice: Vec::new(),
            less,
        }
    }

    /// Constructor, ordering values with a strict less-than comparator
    pub fn with_capacity_by(capacity: usize, less: F) -> Self {
        Bst {
            tree: Tree::with_capacity(capacity),
            key_slice: Vec::with_capacity(capacity),
            less,
        }
    }

    /// Build a `Bst` from a sequence of values, ordering them with `less`
    pub fn from_iter_by<I>(iter: I, less: F) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut bst = Self::new_by(less);
        bst.extend(iter);
        bst
    }

    /// Insert a value.
    ///
    /// Returns `false`, leaving the tree unchanged, if an equal value is already stored.
    pub fn insert(&mut self, value: T) -> bool {
        let placement = self
            .tree
            .insert(|x| order_by(&self.less, &value, &self.key_slice[x]));

        match placement {
            Placement::Found(_) => false,
            Placement::Created(leaf) => {
                if leaf == self.key_slice.len() {
                    self.key_slice.push(value);
                } else {
                    self.key_slice[leaf] = value;
                }
                true
            }
        }
    }

    /// Check if a value is stored
    pub fn search(&self, value: &T) -> bool {
        !self.tree.get(|x| self.probe(value, x)) != 0
    }

    /// Delete a value.
    ///
    /// Returns `false` if the value was not stored.
    pub fn delete(&mut self, value: &T) -> bool {
        let leaf = self
            .tree
            .remove(|x| order_by(&self.less, value, &self.key_slice[x]));
        !leaf != 0
    }

    /// Get the largest stored value less than or equal to `value`
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.at(self.tree.floor(|x| self.probe(value, x)))
    }

    /// Get the smallest stored value greater than or equal to `value`
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.at(self.tree.ceiling(|x| self.probe(value, x)))
    }

    /// Get the stored value that follows `value` in sorted order.
    ///
    /// `value` does not have to be stored itself.
    pub fn successor(&self, value: &T) -> Option<&T> {
        self.at(self.tree.higher(|x| self.probe(value, x)))
    }

    /// Get the stored value that precedes `value` in sorted order.
    ///
    /// `value` does not have to be stored itself.
    pub fn predecessor(&self, value: &T) -> Option<&T> {
        self.at(self.tree.lower(|x| self.probe(value, x)))
    }

    /// Count the stored values strictly less than `value`
    pub fn rank(&self, value: &T) -> usize {
        self.tree.rank(|x| self.probe(value, x))
    }

    /// Collect, in ascending order, every value `x` with `min <= x <= max`
    pub fn range(&self, min: &T, max: &T) -> Vec<&T> {
        self.tree
            .range(|x| self.probe(min, x), |x| self.probe(max, x))
            .into_iter()
            .map(|leaf| &self.key_slice[leaf])
            .collect()
    }

    /// Build a new `Bst` holding the values that satisfy `predicate`.
    ///
    /// Values are re-inserted in ascending order, so the result is shaped by the comparator
    /// rather than by the original insertion order.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        T: Clone,
        F: Clone,
        P: FnMut(&T) -> bool,
    {
        let mut result = Self::new_by(self.less.clone());
        for value in self.iter() {
            if predicate(value) {
                result.insert(value.clone());
            }
        }
        result
    }

    #[inline]
    fn probe(&self, value: &T, leaf: usize) -> core::cmp::Ordering {
        order_by(&self.less, value, &self.key_slice[leaf])
    }
}

impl<T> Default for Bst<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> fmt::Debug for Bst<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Bst")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

// Trees are equal when they hold the same values in the same order, whatever their shape
impl<T, F, G> PartialEq<Bst<T, G>> for Bst<T, F>
where
    T: PartialEq,
{
    fn eq(&self, other: &Bst<T, G>) -> bool {
        self.count() == other.count() && self.iter().eq(other.iter())
    }
}

impl<T, F> Eq for Bst<T, F> where T: Eq {}

impl<'a, T, F> IntoIterator for &'a Bst<T, F> {
    type Item = &'a T;
    type IntoIter = Traversal<'a, T, InOrder<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, F> Extend<T> for Bst<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for Bst<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bst = Self::with_capacity(iter.size_hint().0);
        bst.extend(iter);
        bst
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
impl<T, F> Bst<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn check(&self) -> bool {
        self.tree
            .check(|a, b| (self.less)(&self.key_slice[a], &self.key_slice[b]))
    }
}

#[test]
// Insert, look up and delete over a small fixed tree
fn test_bst_0() {
    let mut bst: Bst<i32> = [5, 3, 7, 2, 4, 6, 8].into_iter().collect();

    let v: Vec<i32> = bst.in_order().copied().collect();
    assert_eq!(v, [2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(bst.min(), Some(&2));
    assert_eq!(bst.max(), Some(&8));
    assert_eq!(bst.floor(&4), Some(&4));

    assert!(bst.delete(&5));
    assert!(!bst.search(&5));
    assert_eq!(bst.in_order().count(), 6);
    assert_eq!(bst.count(), 6);
    assert!(bst.check());
}

#[test]
// Duplicates are dropped and deleting an absent value changes nothing
fn test_bst_1() {
    let mut bst = Bst::new();
    assert!(bst.insert(4));
    assert!(bst.insert(2));
    assert!(!bst.insert(4));
    assert_eq!(bst.count(), 2);

    assert!(!bst.delete(&9));
    assert_eq!(bst.count(), 2);
    let v: Vec<i32> = bst.iter().copied().collect();
    assert_eq!(v, [2, 4]);
}

#[test]
// Floor, ceiling, successor and predecessor for present and absent values
fn test_bst_2() {
    let bst: Bst<i32> = [20, 10, 30, 5, 15, 25, 35].into_iter().collect();

    assert_eq!(bst.floor(&17), Some(&15));
    assert_eq!(bst.floor(&4), None);
    assert_eq!(bst.ceiling(&17), Some(&20));
    assert_eq!(bst.ceiling(&36), None);

    assert_eq!(bst.successor(&15), Some(&20));
    assert_eq!(bst.successor(&16), Some(&20));
    assert_eq!(bst.successor(&35), None);
    assert_eq!(bst.predecessor(&25), Some(&20));
    assert_eq!(bst.predecessor(&21), Some(&20));
    assert_eq!(bst.predecessor(&5), None);
}

#[test]
// Rank and select are inverse to each other
fn test_bst_3() {
    let bst: Bst<i32> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();

    for rank in 0..bst.count() {
        let value = bst.select(rank).copied();
        assert_eq!(value.map(|v| bst.rank(&v)), Some(rank));
    }
    assert_eq!(bst.select(7), None);
    assert_eq!(bst.rank(&45), 3);
    assert_eq!(bst.rank(&10), 0);
    assert_eq!(bst.rank(&90), 7);
}

#[test]
// Inclusive ranges, including bounds that are not stored
fn test_bst_4() {
    let bst: Bst<i32> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();

    assert_eq!(bst.range(&30, &60), [&30, &40, &50, &60]);
    assert_eq!(bst.range(&31, &59), [&40, &50]);
    assert_eq!(bst.range(&81, &99), Vec::<&i32>::new());
}

#[test]
// A custom comparator sorts in descending order
fn test_bst_5() {
    let bst = Bst::from_iter_by([3, 1, 4, 1, 5, 9, 2, 6], |a: &i32, b: &i32| a > b);

    let v: Vec<i32> = bst.iter().copied().collect();
    assert_eq!(v, [9, 6, 5, 4, 3, 2, 1]);
    assert_eq!(bst.min(), Some(&9));
    assert_eq!(bst.floor(&7), Some(&9));
    assert!(bst.check());
}

#[test]
// Height, balance, clone, equality and filter
fn test_bst_6() {
    let mut bst: Bst<i32> = Bst::new();
    assert_eq!(bst.height(), -1);
    assert!(bst.is_balanced());

    bst.extend([1, 2, 3]);
    assert_eq!(bst.height(), 2);
    assert!(!bst.is_balanced());

    let balanced: Bst<i32> = [2, 1, 3].into_iter().collect();
    assert_eq!(balanced.height(), 1);
    assert_eq!(bst, balanced);

    let copy = balanced.clone();
    let pre: Vec<i32> = copy.pre_order().copied().collect();
    assert_eq!(pre, [2, 1, 3]);

    let odd = balanced.filter(|v| v % 2 == 1);
    let v: Vec<i32> = odd.level_order().copied().collect();
    assert_eq!(v, [1, 3]);
}

#[test]
// A stress test with inserting and deleting
fn test_bst_7() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut bst = Bst::new();
    let mut inserted = 0;
    for _ in 0..COUNT {
        if bst.insert(rng.random_range(0..usize::MAX)) {
            inserted += 1;
        }
    }

    assert_eq!(bst.count(), inserted);
    assert!(bst.check());

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT / 2 {
        let value = rng.random_range(0..usize::MAX);
        assert!(bst.delete(&value));
        assert!(!bst.search(&value));
    }

    assert_eq!(bst.count(), inserted - COUNT / 2);
    assert!(bst.check());
}
