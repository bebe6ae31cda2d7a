//! Property-based tests for the collections.
//!
//! Ordering, rank/select and deletion invariants of Bst and TreeMap, word-set invariants of Trie,
//! edit distance laws, and the symmetry and ordering invariants of Graph.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use spinney::{edit_distance, Bst, Graph, TreeMap, Trie};

// =============================================================================
// Strategies
// =============================================================================

fn arbitrary_values() -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(any::<i16>(), 0..200)
}

fn arbitrary_word() -> impl Strategy<Value = String> {
    "[a-d]{0,6}"
}

fn arbitrary_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arbitrary_word(), 0..40)
}

#[derive(Debug, Clone)]
enum EdgeOp {
    Add(u8, u8),
    Remove(u8, u8),
}

fn arbitrary_edge_ops() -> impl Strategy<Value = Vec<EdgeOp>> {
    let op = prop_oneof![
        (0..8u8, 0..8u8).prop_map(|(a, b)| EdgeOp::Add(a, b)),
        (0..8u8, 0..8u8).prop_map(|(a, b)| EdgeOp::Remove(a, b)),
    ];
    prop::collection::vec(op, 0..60)
}

// =============================================================================
// Bst: in-order is sorted and matches the tracked size
// =============================================================================

proptest! {
    #[test]
    fn prop_bst_in_order_is_sorted(values in arbitrary_values()) {
        let bst: Bst<i16> = values.iter().copied().collect();
        let expected: Vec<i16> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let in_order: Vec<i16> = bst.iter().copied().collect();

        prop_assert_eq!(bst.count(), expected.len());
        prop_assert_eq!(in_order, expected);
    }
}

// =============================================================================
// Bst: delete removes exactly one value, absent deletes change nothing
// =============================================================================

proptest! {
    #[test]
    fn prop_bst_delete(values in arbitrary_values(), absent in any::<i16>()) {
        let mut bst: Bst<i16> = values.iter().copied().collect();
        prop_assume!(!bst.search(&absent));

        let before: Vec<i16> = bst.pre_order().copied().collect();
        prop_assert!(!bst.delete(&absent));
        let after: Vec<i16> = bst.pre_order().copied().collect();
        prop_assert_eq!(before, after);

        for value in &values {
            let count = bst.count();
            if bst.delete(value) {
                prop_assert_eq!(bst.count(), count - 1);
            }
            prop_assert!(!bst.search(value));
            let in_order: Vec<i16> = bst.iter().copied().collect();
            prop_assert!(in_order.windows(2).all(|pair| pair[0] < pair[1]));
        }
        prop_assert!(bst.is_empty());
    }
}

// =============================================================================
// Bst: rank and select are inverse
// =============================================================================

proptest! {
    #[test]
    fn prop_bst_rank_select(values in arbitrary_values(), probe in any::<i16>()) {
        let bst: Bst<i16> = values.iter().copied().collect();

        for rank in 0..bst.count() {
            let value = bst.select(rank).copied();
            prop_assert_eq!(value.map(|v| bst.rank(&v)), Some(rank));
        }
        for value in &values {
            prop_assert_eq!(bst.select(bst.rank(value)), Some(value));
        }

        let below = bst.iter().filter(|v| **v < probe).count();
        prop_assert_eq!(bst.rank(&probe), below);
    }
}

// =============================================================================
// TreeMap: behaves like BTreeMap under put and remove
// =============================================================================

proptest! {
    #[test]
    fn prop_treemap_matches_btreemap(
        puts in prop::collection::vec((any::<u8>(), any::<u16>()), 0..100),
        removes in prop::collection::vec(any::<u8>(), 0..50)
    ) {
        let mut map = TreeMap::new();
        let mut model = BTreeMap::new();
        for (key, value) in puts {
            prop_assert_eq!(map.put(key, value), model.insert(key, value));
        }
        for key in removes {
            prop_assert_eq!(map.remove(&key), model.remove(&key).is_some());
        }

        let pairs: Vec<(u8, u16)> = map.iter().copied().collect();
        let expected: Vec<(u8, u16)> = model.into_iter().collect();
        prop_assert_eq!(pairs, expected);
    }
}

// =============================================================================
// Trie: stored words are exactly the distinct inserted words
// =============================================================================

proptest! {
    #[test]
    fn prop_trie_word_set(words in arbitrary_words()) {
        let trie: Trie = words.iter().map(String::as_str).collect();
        let expected: BTreeSet<String> = words.iter().cloned().collect();

        let stored: Vec<String> = trie.words().into_iter().map(String::from).collect();
        prop_assert_eq!(trie.count(), expected.len());
        prop_assert_eq!(stored, expected.into_iter().collect::<Vec<_>>());
        for word in &words {
            prop_assert!(trie.search(word));
        }
    }
}

// =============================================================================
// Trie: delete removes one word and keeps the rest
// =============================================================================

proptest! {
    #[test]
    fn prop_trie_delete(words in arbitrary_words(), index in any::<prop::sample::Index>()) {
        prop_assume!(!words.is_empty());
        let mut trie: Trie = words.iter().map(String::as_str).collect();
        let victim = index.get(&words).clone();

        prop_assert!(trie.delete(&victim));
        prop_assert!(!trie.search(&victim));
        for word in words.iter().filter(|word| **word != victim) {
            prop_assert!(trie.search(word));
        }
    }
}

// =============================================================================
// Edit distance laws
// =============================================================================

proptest! {
    #[test]
    fn prop_edit_distance_laws(a in arbitrary_word(), b in arbitrary_word()) {
        prop_assert_eq!(edit_distance(&a, &a), 0);
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));

        let longer = a.chars().count().max(b.chars().count());
        let shorter = a.chars().count().min(b.chars().count());
        let distance = edit_distance(&a, &b);
        prop_assert!(distance <= longer);
        prop_assert!(distance >= longer - shorter);
    }
}

// =============================================================================
// Graph: undirected edges stay symmetric
// =============================================================================

proptest! {
    #[test]
    fn prop_graph_undirected_symmetry(ops in arbitrary_edge_ops()) {
        let mut graph = Graph::undirected();
        for op in ops {
            match op {
                EdgeOp::Add(a, b) => graph.add_edge(a, b),
                EdgeOp::Remove(a, b) => {
                    graph.remove_edge(&a, &b);
                }
            }
        }

        for u in 0..8u8 {
            for v in 0..8u8 {
                prop_assert_eq!(graph.has_edge(&u, &v), graph.has_edge(&v, &u));
            }
        }
        prop_assert_eq!(graph.edges().len(), graph.edge_count());
    }
}

// =============================================================================
// Graph: topological order respects every edge
// =============================================================================

proptest! {
    #[test]
    fn prop_graph_topological_order(edges in prop::collection::vec((0..10u8, 0..10u8), 0..30)) {
        // only keep forward edges so the graph is acyclic
        let forward: Vec<(u8, u8)> = edges.into_iter().filter(|(a, b)| a < b).collect();
        let graph = Graph::from_edges(forward.iter().copied(), true);

        let order = graph.topological_sort();
        prop_assert!(order.is_some());
        let order = order.unwrap_or_default();
        prop_assert_eq!(order.len(), graph.node_count());

        let position = |node: u8| order.iter().position(|&n| n == node);
        for (a, b) in forward {
            prop_assert!(position(a) < position(b));
        }

        let mut cyclic = graph.clone();
        cyclic.add_edge(9, 0);
        cyclic.add_edge(0, 9);
        prop_assert_eq!(cyclic.topological_sort(), None);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn bst_scenario() {
    let mut bst: Bst<i32> = [5, 3, 7, 2, 4, 6, 8].into_iter().collect();
    let in_order: Vec<i32> = bst.iter().copied().collect();

    assert_eq!(in_order, [2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(bst.min(), Some(&2));
    assert_eq!(bst.max(), Some(&8));
    assert_eq!(bst.floor(&4), Some(&4));

    assert!(bst.delete(&5));
    assert!(!bst.search(&5));
    assert_eq!(bst.iter().count(), 6);
}

#[test]
fn graph_scenario() {
    let graph = Graph::from_edges([(1, 2), (2, 3)], true);
    assert_eq!(graph.bfs(&1), [1, 2, 3]);
    assert_eq!(graph.shortest_path(&1, &3), Some(vec![1, 2, 3]));

    let dag = Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)], true);
    let order = dag.topological_sort().unwrap_or_default();
    let position = |node: i32| order.iter().position(|&n| n == node);
    assert!(position(1) < position(2) && position(1) < position(3));
    assert!(position(2) < position(4) && position(3) < position(4));
}
