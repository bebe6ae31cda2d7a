//! Utility types to support unbalanced binary search trees
//!
//! `Tree` manages the shape of a binary search tree as a set of `usize` leaves, without storing
//! any keys. The owning collection keeps its payloads in a parallel vector indexed by leaf, and
//! drives every search with a *probe*: a function that compares the key being searched for
//! against the key stored at a given leaf.

#![warn(missing_docs)]

extern crate alloc;
use alloc::{collections::VecDeque, vec::Vec};

use core::{cmp::Ordering, iter::FusedIterator};

use tracing::trace;

//-----------------------------------------------------------------------------------------------//

// A leaf in a binary tree. `size` counts the leaf and all of its descendants.
#[derive(Clone)]
struct Leaf {
    left: usize,
    right: usize,
    size: usize,
}

/// Where an insertion landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// An equal key is already stored at this leaf
    Found(usize),
    /// A new leaf was attached to the tree
    Created(usize),
}

//-----------------------------------------------------------------------------------------------//

/// A tree of integer leaves
///
/// The tree is deliberately not self-balancing. Inserting keys in sorted order produces a chain
/// and every operation degrades to O(n); all algorithms are iterative so that such chains cannot
/// exhaust the call stack.
#[derive(Clone)]
pub struct Tree {
    leaf: Vec<Leaf>,
    root: usize,
    recycle: usize,
    count: usize,
}

impl Tree {
    /// Construct an empty tree
    pub fn new() -> Tree {
        Tree {
            leaf: Vec::new(),
            root: !0,
            recycle: !0,
            count: 0,
        }
    }

    /// Construct an empty tree, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize) -> Tree {
        Tree {
            leaf: Vec::with_capacity(capacity),
            root: !0,
            recycle: !0,
            count: 0,
        }
    }

    /// Get the number of leaves in the tree
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if there are any leaves in the tree
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the number of recycled leaves
    #[inline]
    pub fn recycle_count(&self) -> usize {
        self.leaf.len() - self.count
    }

    /// Get the current allocated size of the tree. This is the current `count` plus the
    /// `recycle_count`, and is always the length the caller's payload vector should have.
    #[inline]
    pub fn allocated_count(&self) -> usize {
        self.leaf.len()
    }

    /// Remove all leaves from the tree
    pub fn clear(&mut self) {
        self.leaf.truncate(0);
        self.root = !0;
        self.recycle = !0;
        self.count = 0;
    }

    /// Reserves capacity for at least `additional` more leaves
    ///
    /// Recycled leaves are subtracted from `additional`. Returns the amount of payload storage the
    /// caller needs to reserve as well (if any).
    pub fn reserve(&mut self, additional: usize) -> usize {
        let recycle_count = self.recycle_count();
        if additional > recycle_count {
            let required = additional - recycle_count;
            self.leaf.reserve(required);
            required
        } else {
            0
        }
    }

    /// Get a leaf by probe
    ///
    /// The probe returns the ordering of the wanted key relative to the key stored at a leaf. If
    /// no leaf compares `Equal`, then `usize::MAX` is returned.
    pub fn get<P>(&self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut x = self.root;
        while !x != 0 {
            x = match probe(x) {
                Ordering::Less => self.leaf[x].left,
                Ordering::Greater => self.leaf[x].right,
                Ordering::Equal => return x,
            };
        }
        !0
    }

    /// Insert a leaf by probe
    ///
    /// If an equal key exists its leaf is returned unchanged. Otherwise a new leaf is attached
    /// where the search fell off the tree. The new leaf may be a recycled one, in which case the
    /// caller must overwrite the payload stored at that index rather than push a new one.
    pub fn insert<P>(&mut self, probe: P) -> Placement
    where
        P: Fn(usize) -> Ordering,
    {
        let location = locate(&self.leaf, self.root, &probe);
        if let Location::Found(leaf) = location {
            return Placement::Found(leaf);
        }

        // Every leaf on the search path gains one descendant
        let mut x = self.root;
        while !x != 0 {
            self.leaf[x].size += 1;
            x = match probe(x) {
                Ordering::Less => self.leaf[x].left,
                _ => self.leaf[x].right,
            };
        }

        let leaf = self.alloc();
        match location {
            Location::Root => self.root = leaf,
            Location::Left(parent) => self.leaf[parent].left = leaf,
            Location::Right(parent) => self.leaf[parent].right = leaf,
            Location::Found(_) => {}
        }
        Placement::Created(leaf)
    }

    /// Remove a leaf by probe
    ///
    /// A leaf with two children is replaced by its in-order successor (the minimum of its right
    /// subtree), which is spliced out of its old position first. Returns the removed leaf, whose
    /// payload slot is now free for reuse, or `usize::MAX` if no leaf matched.
    pub fn remove<P>(&mut self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut parent = !0;
        let mut x = self.root;
        while !x != 0 {
            match probe(x) {
                Ordering::Less => {
                    parent = x;
                    x = self.leaf[x].left;
                }
                Ordering::Greater => {
                    parent = x;
                    x = self.leaf[x].right;
                }
                Ordering::Equal => break,
            }
        }
        if !x == 0 {
            return !0;
        }

        // Every ancestor loses one descendant
        let mut y = self.root;
        while y != x {
            self.leaf[y].size -= 1;
            y = match probe(y) {
                Ordering::Less => self.leaf[y].left,
                _ => self.leaf[y].right,
            };
        }

        let Leaf { left, right, size } = self.leaf[x].clone();
        let replacement = if !left == 0 {
            right
        } else if !right == 0 {
            left
        } else {
            let mut z = x;
            let mut s = right;
            while !self.leaf[s].left != 0 {
                self.leaf[s].size -= 1;
                z = s;
                s = self.leaf[s].left;
            }
            if z != x {
                self.leaf[z].left = self.leaf[s].right;
                self.leaf[s].right = right;
            }
            self.leaf[s].left = left;
            self.leaf[s].size = size - 1;
            trace!(leaf = x, successor = s, "promoted in-order successor");
            s
        };

        if !parent == 0 {
            self.root = replacement;
        } else if self.leaf[parent].left == x {
            self.leaf[parent].left = replacement;
        } else {
            debug_assert_eq!(self.leaf[parent].right, x);
            self.leaf[parent].right = replacement;
        }

        self.free(x);
        x
    }

    /// Get the first leaf in the tree (the left-most)
    #[inline]
    pub fn first(&self) -> usize {
        first(&self.leaf, self.root)
    }

    /// Get the last leaf in the tree (the right-most)
    #[inline]
    pub fn last(&self) -> usize {
        last(&self.leaf, self.root)
    }

    /// Get the greatest leaf whose key is less than or equal to the probed key
    pub fn floor<P>(&self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut best = !0;
        let mut x = self.root;
        while !x != 0 {
            match probe(x) {
                Ordering::Equal => return x,
                Ordering::Less => x = self.leaf[x].left,
                Ordering::Greater => {
                    best = x;
                    x = self.leaf[x].right;
                }
            }
        }
        best
    }

    /// Get the least leaf whose key is greater than or equal to the probed key
    pub fn ceiling<P>(&self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut best = !0;
        let mut x = self.root;
        while !x != 0 {
            match probe(x) {
                Ordering::Equal => return x,
                Ordering::Greater => x = self.leaf[x].right,
                Ordering::Less => {
                    best = x;
                    x = self.leaf[x].left;
                }
            }
        }
        best
    }

    /// Get the greatest leaf whose key is strictly less than the probed key
    ///
    /// The probed key does not need to be stored in the tree.
    pub fn lower<P>(&self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut best = !0;
        let mut x = self.root;
        while !x != 0 {
            if probe(x) == Ordering::Greater {
                best = x;
                x = self.leaf[x].right;
            } else {
                x = self.leaf[x].left;
            }
        }
        best
    }

    /// Get the least leaf whose key is strictly greater than the probed key
    ///
    /// The probed key does not need to be stored in the tree.
    pub fn higher<P>(&self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut best = !0;
        let mut x = self.root;
        while !x != 0 {
            if probe(x) == Ordering::Less {
                best = x;
                x = self.leaf[x].left;
            } else {
                x = self.leaf[x].right;
            }
        }
        best
    }

    /// Count the leaves whose key is strictly less than the probed key
    pub fn rank<P>(&self, probe: P) -> usize
    where
        P: Fn(usize) -> Ordering,
    {
        let mut rank = 0;
        let mut x = self.root;
        while !x != 0 {
            let left = self.leaf[x].left;
            match probe(x) {
                Ordering::Less => x = left,
                Ordering::Greater => {
                    rank += 1 + size(&self.leaf, left);
                    x = self.leaf[x].right;
                }
                Ordering::Equal => return rank + size(&self.leaf, left),
            }
        }
        rank
    }

    /// Get the leaf at a zero-based position in sorted order
    ///
    /// Returns `usize::MAX` if `rank` is not less than `count`.
    pub fn select(&self, mut rank: usize) -> usize {
        if rank >= self.count {
            return !0;
        }

        let mut x = self.root;
        while !x != 0 {
            let left = size(&self.leaf, self.leaf[x].left);
            match rank.cmp(&left) {
                Ordering::Less => x = self.leaf[x].left,
                Ordering::Greater => {
                    rank -= left + 1;
                    x = self.leaf[x].right;
                }
                Ordering::Equal => return x,
            }
        }
        !0
    }

    /// Collect, in order, the leaves whose keys lie between two probed bounds (inclusive)
    ///
    /// `low` compares the lower bound against a leaf key and `high` the upper bound. Subtrees that
    /// lie entirely outside the range are never visited.
    pub fn range<P, Q>(&self, low: P, high: Q) -> Vec<usize>
    where
        P: Fn(usize) -> Ordering,
        Q: Fn(usize) -> Ordering,
    {
        let mut result = Vec::new();
        let mut stack = Vec::new();
        let mut x = self.root;

        loop {
            while !x != 0 {
                stack.push(x);
                x = if low(x) == Ordering::Less {
                    self.leaf[x].left
                } else {
                    !0
                };
            }

            let Some(y) = stack.pop() else {
                break;
            };

            let above = low(y) != Ordering::Greater;
            let below = high(y);
            if above && below != Ordering::Less {
                result.push(y);
            }

            x = if below == Ordering::Greater {
                self.leaf[y].right
            } else {
                !0
            };
        }

        result
    }

    /// Get the height of the tree: -1 when empty, 0 for a single leaf
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut queue = VecDeque::new();
        if !self.root != 0 {
            queue.push_back(self.root);
        }

        while !queue.is_empty() {
            height += 1;
            for _ in 0..queue.len() {
                let Some(x) = queue.pop_front() else {
                    break;
                };
                let Leaf { left, right, .. } = self.leaf[x];
                if !left != 0 {
                    queue.push_back(left);
                }
                if !right != 0 {
                    queue.push_back(right);
                }
            }
        }

        height
    }

    /// Check that no leaf has subtrees whose heights differ by more than one
    ///
    /// This is a diagnostic only: the tree never rebalances itself.
    pub fn is_balanced(&self) -> bool {
        let mut height = alloc::vec![-1isize; self.leaf.len()];
        let h = |height: &[isize], x: usize| if !x == 0 { -1 } else { height[x] };

        for x in self.post_order() {
            let Leaf { left, right, .. } = self.leaf[x];
            let (l, r) = (h(&height, left), h(&height, right));
            if (l - r).abs() > 1 {
                return false;
            }
            height[x] = 1 + l.max(r);
        }
        true
    }

    /// Iterate over the leaves in order (left, leaf, right)
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder {
            tree: self,
            stack: Vec::new(),
            leaf: self.root,
            count: self.count,
        }
    }

    /// Iterate over the leaves in pre-order (leaf, left, right)
    pub fn pre_order(&self) -> PreOrder<'_> {
        let mut stack = Vec::new();
        if !self.root != 0 {
            stack.push(self.root);
        }
        PreOrder {
            tree: self,
            stack,
            count: self.count,
        }
    }

    /// Iterate over the leaves in post-order (left, right, leaf)
    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder {
            tree: self,
            stack: Vec::new(),
            leaf: self.root,
            last: !0,
            count: self.count,
        }
    }

    /// Iterate over the leaves breadth first, level by level
    pub fn level_order(&self) -> LevelOrder<'_> {
        let mut queue = VecDeque::new();
        if !self.root != 0 {
            queue.push_back(self.root);
        }
        LevelOrder {
            tree: self,
            queue,
            count: self.count,
        }
    }

    // Allocate and initialise a new leaf
    fn alloc(&mut self) -> usize {
        self.count += 1;

        // Recycle an old leaf
        let leaf = self.recycle;
        if !leaf != 0 {
            let l = &mut self.leaf[leaf];
            self.recycle = l.left;
            l.left = !0;
            l.right = !0;
            l.size = 1;
            return leaf;
        }

        // Initialise a new one
        let leaf = self.leaf.len();
        self.leaf.push(Leaf {
            left: !0,
            right: !0,
            size: 1,
        });
        leaf
    }

    // Free a leaf and add it to the recycle queue
    fn free(&mut self, leaf: usize) {
        self.count -= 1;
        self.leaf[leaf].left = self.recycle;
        self.leaf[leaf].right = !0;
        self.leaf[leaf].size = 0;
        self.recycle = leaf;
    }

    // Check links, sizes and key order. `ordered(a, b)` must report whether the key at leaf `a`
    // sorts strictly before the key at leaf `b`.
    #[cfg(test)]
    pub(crate) fn check<C>(&self, ordered: C) -> bool
    where
        C: Fn(usize, usize) -> bool,
    {
        let leaves: Vec<usize> = self.in_order().collect();
        if leaves.len() != self.count || size(&self.leaf, self.root) != self.count {
            return false;
        }
        let sizes = leaves.iter().all(|&x| {
            let Leaf { left, right, size: s } = self.leaf[x];
            s == 1 + size(&self.leaf, left) + size(&self.leaf, right)
        });
        sizes && leaves.windows(2).all(|w| ordered(w[0], w[1]))
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

//-----------------------------------------------------------------------------------------------//

/// In-order iterator over the leaves of a `Tree`
pub struct InOrder<'a> {
    tree: &'a Tree,
    stack: Vec<usize>,
    leaf: usize,
    count: usize,
}

impl Iterator for InOrder<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while !self.leaf != 0 {
            self.stack.push(self.leaf);
            self.leaf = self.tree.leaf[self.leaf].left;
        }

        let x = self.stack.pop()?;
        self.leaf = self.tree.leaf[x].right;
        self.count -= 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl FusedIterator for InOrder<'_> {}

/// Pre-order iterator over the leaves of a `Tree`
pub struct PreOrder<'a> {
    tree: &'a Tree,
    stack: Vec<usize>,
    count: usize,
}

impl Iterator for PreOrder<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let x = self.stack.pop()?;
        let Leaf { left, right, .. } = self.tree.leaf[x];
        if !right != 0 {
            self.stack.push(right);
        }
        if !left != 0 {
            self.stack.push(left);
        }
        self.count -= 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl FusedIterator for PreOrder<'_> {}

/// Post-order iterator over the leaves of a `Tree`
pub struct PostOrder<'a> {
    tree: &'a Tree,
    stack: Vec<usize>,
    leaf: usize,
    last: usize,
    count: usize,
}

impl Iterator for PostOrder<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            while !self.leaf != 0 {
                self.stack.push(self.leaf);
                self.leaf = self.tree.leaf[self.leaf].left;
            }

            let x = *self.stack.last()?;
            let right = self.tree.leaf[x].right;
            if !right != 0 && right != self.last {
                self.leaf = right;
            } else {
                self.stack.pop();
                self.last = x;
                self.count -= 1;
                return Some(x);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl FusedIterator for PostOrder<'_> {}

/// Breadth-first iterator over the leaves of a `Tree`
pub struct LevelOrder<'a> {
    tree: &'a Tree,
    queue: VecDeque<usize>,
    count: usize,
}

impl Iterator for LevelOrder<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let x = self.queue.pop_front()?;
        let Leaf { left, right, .. } = self.tree.leaf[x];
        if !left != 0 {
            self.queue.push_back(left);
        }
        if !right != 0 {
            self.queue.push_back(right);
        }
        self.count -= 1;
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl FusedIterator for LevelOrder<'_> {}

//-----------------------------------------------------------------------------------------------//

/// Iterator mapping an order of leaves onto the payloads stored against them
pub struct Traversal<'a, S, I> {
    order: I,
    slice: &'a [S],
}

impl<'a, S, I> Traversal<'a, S, I> {
    pub(crate) fn new(order: I, slice: &'a [S]) -> Self {
        Traversal { order, slice }
    }
}

impl<'a, S, I> Iterator for Traversal<'a, S, I>
where
    I: Iterator<Item = usize>,
{
    type Item = &'a S;

    fn next(&mut self) -> Option<&'a S> {
        self.order.next().map(|leaf| &self.slice[leaf])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<S, I> FusedIterator for Traversal<'_, S, I> where I: FusedIterator<Item = usize> {}

//-----------------------------------------------------------------------------------------------//

/// Turn a strict less-than predicate into a three-way comparison
#[inline]
pub fn order_by<K, F>(less: &F, a: &K, b: &K) -> Ordering
where
    F: Fn(&K, &K) -> bool,
{
    if less(a, b) {
        Ordering::Less
    } else if less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

//-----------------------------------------------------------------------------------------------//

// IMPLEMENTATION NOTE
//
// The functions below are low level. They work directly on the leaf slice and treat `!0` as the
// null link.

enum Location {
    Found(usize),
    Root,
    Left(usize),
    Right(usize),
}

// Locate a leaf in a tree, or if not found identify where to attach it
fn locate<P>(leaf: &[Leaf], mut x: usize, probe: &P) -> Location
where
    P: Fn(usize) -> Ordering,
{
    if !x == 0 {
        return Location::Root;
    }

    loop {
        match probe(x) {
            Ordering::Less => {
                let y = leaf[x].left;
                if !y == 0 {
                    return Location::Left(x);
                }
                x = y;
            }
            Ordering::Greater => {
                let y = leaf[x].right;
                if !y == 0 {
                    return Location::Right(x);
                }
                x = y;
            }
            Ordering::Equal => return Location::Found(x),
        }
    }
}

// Get the size of a subtree
#[inline]
fn size(leaf: &[Leaf], x: usize) -> usize {
    if !x == 0 {
        0
    } else {
        leaf[x].size
    }
}

// Get the first leaf (the left-most)
fn first(leaf: &[Leaf], mut x: usize) -> usize {
    if !x == 0 {
        return !0;
    }

    loop {
        let y = leaf[x].left;
        if !y == 0 {
            return x;
        }
        x = y;
    }
}

// Get the last leaf (the right-most)
fn last(leaf: &[Leaf], mut x: usize) -> usize {
    if !x == 0 {
        return !0;
    }

    loop {
        let y = leaf[x].right;
        if !y == 0 {
            return x;
        }
        x = y;
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn tree_of(keys: &[i32]) -> (Tree, alloc::vec::Vec<i32>) {
    let mut tree = Tree::new();
    let mut slice = Vec::new();
    for key in keys {
        if let Placement::Created(leaf) = tree.insert(|x| key.cmp(&slice[x])) {
            if leaf == slice.len() {
                slice.push(*key);
            } else {
                slice[leaf] = *key;
            }
        }
    }
    (tree, slice)
}

#[test]
// Traversal orders over a small fixed tree
fn test_tree_0() {
    let (tree, slice) = tree_of(&[5, 3, 7, 2, 4, 6, 8]);
    let keys = |order: &mut dyn Iterator<Item = usize>| order.map(|x| slice[x]).collect::<Vec<_>>();

    assert_eq!(keys(&mut tree.in_order()), [2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(keys(&mut tree.pre_order()), [5, 3, 2, 4, 7, 6, 8]);
    assert_eq!(keys(&mut tree.post_order()), [2, 4, 3, 6, 8, 7, 5]);
    assert_eq!(keys(&mut tree.level_order()), [5, 3, 7, 2, 4, 6, 8]);
    assert_eq!(tree.height(), 2);
    assert!(tree.is_balanced());
    assert!(tree.check(|a, b| slice[a] < slice[b]));
}

#[test]
// Removal of a leaf with two children promotes the in-order successor
fn test_tree_1() {
    let (mut tree, slice) = tree_of(&[5, 3, 8, 7, 9, 6]);
    let freed = tree.remove(|x| 5.cmp(&slice[x]));
    assert_eq!(slice[freed], 5);

    let pre: Vec<i32> = tree.pre_order().map(|x| slice[x]).collect();
    assert_eq!(pre, [6, 3, 8, 7, 9]);
    assert!(tree.check(|a, b| slice[a] < slice[b]));

    // The freed leaf is handed out again
    assert_eq!(tree.insert(|x| 10.cmp(&slice[x])), Placement::Created(freed));
    assert_eq!(tree.recycle_count(), 0);
}

#[test]
// A sorted insertion order degenerates into a chain without overflowing the stack
fn test_tree_2() {
    const COUNT: i32 = 10_000;

    let keys: Vec<i32> = (0..COUNT).collect();
    let (tree, slice) = tree_of(&keys);

    assert_eq!(tree.height(), (COUNT - 1) as isize);
    assert!(!tree.is_balanced());
    assert_eq!(tree.in_order().count(), COUNT as usize);
    assert_eq!(slice[tree.select(1_234)], 1_234);
    assert_eq!(tree.rank(|x| 500.cmp(&slice[x])), 500);
}
