//! Implementation of a prefix tree over strings, with wildcard and fuzzy search
#![warn(missing_docs)]

extern crate alloc;

use alloc::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};
use core::{fmt, mem, ops::ControlFlow};

use compact_str::CompactString;
use tracing::{trace, warn};

use crate::config::SearchLimits;
use crate::error::{Error, Result};

//-----------------------------------------------------------------------------------------------//

// A node in the trie. Every node lies on the path of at least one stored word, apart from the
// root of an empty trie.
#[derive(Clone)]
struct Node<V> {
    children: BTreeMap<char, Node<V>>,
    terminal: bool,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Node {
            children: BTreeMap::new(),
            terminal: false,
            value: None,
        }
    }
}

/// A prefix tree of words, each optionally carrying a value of type `V`.
///
/// Children are kept in character order, so every word listing is alphabetical by Unicode scalar
/// value. Words are returned as `CompactString`, which stores short words inline.
#[derive(Clone)]
pub struct Trie<V = ()> {
    root: Node<V>,
    count: usize,
}

impl<V> Trie<V> {
    /// Constructor
    pub fn new() -> Self {
        Trie {
            root: Node::new(),
            count: 0,
        }
    }

    /// Get the number of distinct words in the `Trie`
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if there are any words in the `Trie`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove all words from the `Trie`
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.count = 0;
    }

    /// Insert a word without a value.
    ///
    /// Returns `true` if the word was not already present. Re-inserting a word clears any value
    /// previously stored against it.
    pub fn insert(&mut self, word: &str) -> bool {
        self.place(word, None)
    }

    /// Insert a word together with a value.
    ///
    /// Returns `true` if the word was not already present. An existing word keeps its place in the
    /// count and has its value replaced.
    pub fn insert_with_value(&mut self, word: &str, value: V) -> bool {
        self.place(word, Some(value))
    }

    fn place(&mut self, word: &str, value: Option<V>) -> bool {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_insert_with(Node::new);
        }
        node.value = value;
        let created = !mem::replace(&mut node.terminal, true);
        if created {
            self.count += 1;
        }
        created
    }

    /// Check if a word is stored
    pub fn search(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.terminal)
    }

    /// Look up a word and its value.
    ///
    /// The outer `Option` reports whether the word is stored, the inner one whether a value was
    /// supplied when it was inserted.
    pub fn search_with_value(&self, word: &str) -> Option<Option<&V>> {
        self.find(word)
            .filter(|node| node.terminal)
            .map(|node| node.value.as_ref())
    }

    /// Check if any stored word begins with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.find(prefix).is_some()
    }

    /// Remove a word, pruning any branch left without words.
    ///
    /// Returns `false` if the word was not present. Longer words that share `word` as a prefix
    /// are untouched.
    pub fn delete(&mut self, word: &str) -> bool {
        let mut chars = word.chars();
        if unmark(&mut self.root, &mut chars).is_some() {
            self.count -= 1;
            true
        } else {
            false
        }
    }

    /// Collect every stored word in alphabetical order
    pub fn words(&self) -> Vec<CompactString> {
        self.words_with_prefix("")
    }

    /// Collect every stored word beginning with `prefix`
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<CompactString> {
        self.words_with_prefix_limit(prefix, usize::MAX)
    }

    /// Collect at most `limit` words beginning with `prefix`, stopping the walk early once the
    /// limit is reached
    pub fn words_with_prefix_limit(&self, prefix: &str, limit: usize) -> Vec<CompactString> {
        let mut words = Vec::new();
        if limit == 0 {
            return words;
        }
        if let Some(node) = self.find(prefix) {
            let mut word = CompactString::new(prefix);
            let _ = visit(node, &mut word, &mut |word, _| {
                words.push(CompactString::new(word));
                if words.len() < limit {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(())
                }
            });
        }
        words
    }

    /// Collect every stored word made of exactly `length` characters
    pub fn words_by_length(&self, length: usize) -> Vec<CompactString> {
        let mut words = Vec::new();
        let mut word = CompactString::default();
        collect_at_depth(&self.root, &mut word, length, &mut words);
        words
    }

    /// Collect every stored word ending with `suffix`. This scans the whole trie.
    pub fn words_with_suffix(&self, suffix: &str) -> Vec<CompactString> {
        self.scan(|word| word.ends_with(suffix))
    }

    /// Collect every stored word containing `substring`. This scans the whole trie.
    pub fn words_containing(&self, substring: &str) -> Vec<CompactString> {
        self.scan(|word| word.contains(substring))
    }

    /// Collect every stored word matching a wildcard pattern.
    ///
    /// `?` matches exactly one character and `*` matches any run of characters, including none.
    /// A word reachable through several expansions of `*` is reported once.
    pub fn words_with_pattern(&self, pattern: &str) -> Vec<CompactString> {
        // unbounded limits never trip
        self.words_with_pattern_limited(pattern, &SearchLimits::unbounded())
            .unwrap_or_default()
    }

    /// Collect every stored word matching a wildcard pattern, within `limits`.
    ///
    /// `max_depth` bounds how many characters the matcher may descend and `max_results` bounds
    /// the number of distinct matches. Exceeding either aborts the search with an error.
    pub fn words_with_pattern_limited(
        &self,
        pattern: &str,
        limits: &SearchLimits,
    ) -> Result<Vec<CompactString>> {
        let pattern: Vec<char> = pattern.chars().collect();
        let mut matcher = Matcher {
            pattern: &pattern,
            limits,
            word: CompactString::default(),
            depth: 0,
            found: BTreeSet::new(),
        };

        if let Err(error) = matcher.walk(&self.root, 0) {
            warn!(%error, "wildcard search aborted");
            return Err(error);
        }
        Ok(matcher.found.into_iter().collect())
    }

    /// Collect every stored word within `max_distance` edits of `target`.
    ///
    /// Every word is compared, so this is linear in the size of the trie.
    pub fn words_within_distance(&self, target: &str, max_distance: usize) -> Vec<CompactString> {
        self.scan(|word| edit_distance(word, target) <= max_distance)
    }

    /// Get the longest prefix shared by every stored word.
    ///
    /// The walk stops at the first branch or at the first node that ends a word.
    pub fn longest_common_prefix(&self) -> CompactString {
        let mut prefix = CompactString::default();
        if self.is_empty() {
            return prefix;
        }

        let mut node = &self.root;
        while !node.terminal && node.children.len() == 1 {
            match node.children.iter().next() {
                Some((c, child)) => {
                    prefix.push(*c);
                    node = child;
                }
                None => break,
            }
        }
        prefix
    }

    /// Get the length in characters of the longest stored word, or 0 when empty.
    ///
    /// The root holds no character and is not counted.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Call `f` on every stored word in alphabetical order
    pub fn for_each<C>(&self, mut f: C)
    where
        C: FnMut(&str),
    {
        let mut word = CompactString::default();
        let _ = visit(&self.root, &mut word, &mut |word, _| {
            f(word);
            ControlFlow::Continue(())
        });
    }

    /// Build a new `Trie` holding the words that satisfy `predicate`, with their values
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        V: Clone,
        P: FnMut(&str) -> bool,
    {
        let mut result = Trie::new();
        let mut word = CompactString::default();
        let _ = visit(&self.root, &mut word, &mut |word, value| {
            if predicate(word) {
                result.place(word, value.cloned());
            }
            ControlFlow::Continue(())
        });
        result
    }

    fn find(&self, prefix: &str) -> Option<&Node<V>> {
        let mut node = &self.root;
        for c in prefix.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    fn scan<P>(&self, mut predicate: P) -> Vec<CompactString>
    where
        P: FnMut(&str) -> bool,
    {
        let mut words = Vec::new();
        self.for_each(|word| {
            if predicate(word) {
                words.push(CompactString::new(word));
            }
        });
        words
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Trie")?;
        f.debug_list().entries(self.words()).finish()
    }
}

impl<V, W> PartialEq<Trie<W>> for Trie<V> {
    fn eq(&self, other: &Trie<W>) -> bool {
        self.count == other.count && self.words() == other.words()
    }
}

impl<V> Eq for Trie<V> {}

impl<'a, V> Extend<&'a str> for Trie<V> {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<'a, V> FromIterator<&'a str> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

//-----------------------------------------------------------------------------------------------//

/// Get the Levenshtein distance between two strings, counting characters rather than bytes.
///
/// Insertions, deletions and substitutions each cost one.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();

    // row[j] holds the distance between the prefix of `a` seen so far and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == *cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

//-----------------------------------------------------------------------------------------------//

// Unmark the word spelled by the rest of `chars` below `node`. Returns `None` if the word is not
// stored, otherwise whether `node` itself is now dead and should be pruned by its parent.
fn unmark<V>(node: &mut Node<V>, chars: &mut core::str::Chars<'_>) -> Option<bool> {
    match chars.next() {
        None => {
            if !node.terminal {
                return None;
            }
            node.terminal = false;
            node.value = None;
            Some(node.children.is_empty())
        }
        Some(c) => {
            let child = node.children.get_mut(&c)?;
            let dead = unmark(child, chars)?;
            if dead {
                node.children.remove(&c);
                trace!(character = %c, "pruned dead branch");
            }
            Some(!node.terminal && node.children.is_empty())
        }
    }
}

// Depth first walk over the terminal nodes below `node`, in character order. `word` holds the
// path to `node` on entry and is restored on exit.
fn visit<V, C>(node: &Node<V>, word: &mut CompactString, f: &mut C) -> ControlFlow<()>
where
    C: FnMut(&str, Option<&V>) -> ControlFlow<()>,
{
    if node.terminal {
        f(word.as_str(), node.value.as_ref())?;
    }
    for (c, child) in &node.children {
        word.push(*c);
        let flow = visit(child, word, f);
        word.pop();
        flow?;
    }
    ControlFlow::Continue(())
}

fn collect_at_depth<V>(
    node: &Node<V>,
    word: &mut CompactString,
    remaining: usize,
    words: &mut Vec<CompactString>,
) {
    if remaining == 0 {
        if node.terminal {
            words.push(word.clone());
        }
        return;
    }
    for (c, child) in &node.children {
        word.push(*c);
        collect_at_depth(child, word, remaining - 1, words);
        word.pop();
    }
}

fn height<V>(node: &Node<V>) -> usize {
    node.children
        .values()
        .map(|child| 1 + height(child))
        .max()
        .unwrap_or(0)
}

// State for a wildcard search. `depth` tracks the number of characters in `word`.
struct Matcher<'a> {
    pattern: &'a [char],
    limits: &'a SearchLimits,
    word: CompactString,
    depth: usize,
    found: BTreeSet<CompactString>,
}

impl Matcher<'_> {
    fn walk<V>(&mut self, node: &Node<V>, index: usize) -> Result<()> {
        let Some(&token) = self.pattern.get(index) else {
            if node.terminal && self.found.insert(self.word.clone()) {
                let limit = self.limits.max_results;
                if self.found.len() > limit {
                    return Err(Error::ResultLimit { limit });
                }
            }
            return Ok(());
        };

        match token {
            '?' => {
                for (c, child) in &node.children {
                    self.descend(*c, child, index + 1)?;
                }
            }
            '*' => {
                self.walk(node, index + 1)?;
                for (c, child) in &node.children {
                    self.descend(*c, child, index)?;
                }
            }
            c => {
                if let Some(child) = node.children.get(&c) {
                    self.descend(c, child, index + 1)?;
                }
            }
        }
        Ok(())
    }

    fn descend<V>(&mut self, c: char, child: &Node<V>, index: usize) -> Result<()> {
        let limit = self.limits.max_depth;
        if self.depth >= limit {
            return Err(Error::DepthLimit { limit });
        }

        self.word.push(c);
        self.depth += 1;
        let result = self.walk(child, index);
        self.depth -= 1;
        self.word.pop();
        result
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn strings(words: &[CompactString]) -> Vec<&str> {
    words.iter().map(CompactString::as_str).collect()
}

#[test]
// Insert, search and prefix queries
fn test_trie_0() {
    let mut trie: Trie = Trie::new();
    assert!(trie.insert("apple"));
    assert!(trie.insert("app"));
    assert!(trie.insert("application"));
    assert!(!trie.insert("app"));

    assert_eq!(trie.count(), 3);
    assert!(trie.search("app"));
    assert!(!trie.search("appl"));
    assert!(trie.starts_with("appl"));
    assert!(!trie.starts_with("b"));
    assert_eq!(
        strings(&trie.words_with_prefix("app")),
        ["app", "apple", "application"]
    );
}

#[test]
// Values are replaced on re-insertion without changing the count
fn test_trie_1() {
    let mut trie = Trie::new();
    assert!(trie.insert_with_value("one", 1));
    assert!(!trie.insert_with_value("one", 11));
    assert!(trie.insert("two"));

    assert_eq!(trie.count(), 2);
    assert_eq!(trie.search_with_value("one"), Some(Some(&11)));
    assert_eq!(trie.search_with_value("two"), Some(None));
    assert_eq!(trie.search_with_value("on"), None);
}

#[test]
// Delete prunes dead branches but keeps longer words
fn test_trie_2() {
    let mut trie: Trie = ["car", "cart", "dog"].into_iter().collect();

    assert!(trie.delete("car"));
    assert!(!trie.delete("car"));
    assert!(!trie.search("car"));
    assert!(trie.search("cart"));

    assert!(trie.delete("cart"));
    assert!(!trie.starts_with("c"));
    assert_eq!(trie.count(), 1);
    assert_eq!(trie.height(), 3);

    assert!(!trie.delete("do"));
    assert!(trie.delete("dog"));
    assert!(trie.is_empty());
    assert_eq!(trie.height(), 0);
}

#[test]
// Wildcard patterns with deduplication
fn test_trie_3() {
    let trie: Trie = ["cat", "cot", "coat", "cut", "dog"].into_iter().collect();

    assert_eq!(strings(&trie.words_with_pattern("c?t")), ["cat", "cot", "cut"]);
    assert_eq!(
        strings(&trie.words_with_pattern("c*t")),
        ["cat", "coat", "cot", "cut"]
    );
    assert_eq!(strings(&trie.words_with_pattern("**g")), ["dog"]);
    assert_eq!(
        strings(&trie.words_with_pattern("*")),
        ["cat", "coat", "cot", "cut", "dog"]
    );
    assert!(trie.words_with_pattern("c?").is_empty());
}

#[test]
// Limited wildcard search
fn test_trie_4() {
    let trie: Trie = ["a", "ab", "abc", "abcd"].into_iter().collect();

    let limits = SearchLimits::unbounded().with_max_results(2);
    assert_eq!(
        trie.words_with_pattern_limited("a*", &limits),
        Err(Error::ResultLimit { limit: 2 })
    );

    let limits = SearchLimits::unbounded().with_max_depth(3);
    assert_eq!(
        trie.words_with_pattern_limited("*", &limits),
        Err(Error::DepthLimit { limit: 3 })
    );

    let limits = SearchLimits::unbounded().with_max_depth(3);
    let words = trie.words_with_pattern_limited("a?", &limits);
    assert_eq!(words.as_deref().map(strings), Ok(alloc::vec!["ab"]));
}

#[test]
// Edit distance
fn test_trie_5() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("cat", "cat"), 0);
    assert_eq!(edit_distance("cat", "bat"), 1);
    assert_eq!(edit_distance("cat", "dog"), 3);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("naïve", "naive"), 1);

    let trie: Trie = ["cat", "bat", "cart", "dog"].into_iter().collect();
    assert_eq!(
        strings(&trie.words_within_distance("cat", 1)),
        ["bat", "cart", "cat"]
    );
}

#[test]
// Longest common prefix, words by length, suffix and substring scans
fn test_trie_6() {
    let mut trie: Trie = Trie::new();
    assert_eq!(trie.longest_common_prefix(), "");

    trie.extend(["flower", "flow", "flight"]);
    assert_eq!(trie.longest_common_prefix(), "fl");
    assert_eq!(strings(&trie.words_by_length(4)), ["flow"]);
    assert_eq!(strings(&trie.words_with_suffix("ow")), ["flow"]);
    assert_eq!(strings(&trie.words_containing("low")), ["flow", "flower"]);

    trie.delete("flight");
    assert_eq!(trie.longest_common_prefix(), "flow");

    let mut limited = trie.words_with_prefix_limit("f", 1);
    assert_eq!(limited.len(), 1);
    limited = trie.words_with_prefix_limit("f", 0);
    assert!(limited.is_empty());
}

#[test]
// Filter keeps values, equality ignores them
fn test_trie_7() {
    let mut trie = Trie::new();
    trie.insert_with_value("red", 1);
    trie.insert_with_value("green", 2);
    trie.insert_with_value("blue", 3);

    let short = trie.filter(|word| word.len() <= 4);
    assert_eq!(strings(&short.words()), ["blue", "red"]);
    assert_eq!(short.search_with_value("blue"), Some(Some(&3)));

    let plain: Trie = ["blue", "red"].into_iter().collect();
    assert_eq!(short, plain);
    assert_ne!(trie, plain);

    let copy = trie.clone();
    assert_eq!(copy, trie);

    let mut seen = Vec::new();
    trie.for_each(|word| seen.push(CompactString::new(word)));
    assert_eq!(strings(&seen), ["blue", "green", "red"]);
}

#[test]
// Height counts characters, not nodes
fn test_trie_8() {
    let mut trie: Trie = Trie::new();
    assert_eq!(trie.height(), 0);

    trie.insert("cat");
    assert_eq!(trie.height(), 3);
    trie.insert("");
    assert_eq!(trie.height(), 3);
    trie.insert("hé");
    trie.insert("cattle");
    assert_eq!(trie.height(), 6);
    assert_eq!(trie.words_by_length(trie.height()).len(), 1);
}
