//! Integration tests for Graph.
//!
//! Covers symmetry of undirected edges, traversal orders, cycle handling and the set-style
//! operations.

use rstest::rstest;
use spinney::{Error, Graph, SearchLimits};

fn diamond(directed: bool) -> Graph<u32> {
    Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)], directed)
}

// =============================================================================
// Structure
// =============================================================================

#[rstest]
#[case(true, 4, 1, 2, 0)]
#[case(false, 4, 2, 2, 2)]
fn graph_degrees(
    #[case] directed: bool,
    #[case] edges: usize,
    #[case] in_degree_of_2: usize,
    #[case] out_degree_of_1: usize,
    #[case] out_degree_of_4: usize,
) {
    let graph = diamond(directed);
    assert_eq!(graph.edge_count(), edges);
    assert_eq!(graph.in_degree(&2), in_degree_of_2);
    assert_eq!(graph.out_degree(&1), out_degree_of_1);
    assert_eq!(graph.out_degree(&4), out_degree_of_4);
}

#[rstest]
fn graph_undirected_edges_stay_symmetric() {
    let mut graph = Graph::undirected();
    for (from, to) in [(1, 2), (2, 3), (3, 1), (1, 2), (4, 4)] {
        graph.add_edge(from, to);
    }
    graph.remove_edge(&2, &1);
    graph.remove_edge(&3, &2);
    graph.remove_node(&4);

    for &from in &[1, 2, 3] {
        for &to in &[1, 2, 3] {
            assert_eq!(graph.has_edge(&from, &to), graph.has_edge(&to, &from));
        }
    }
    let mut edges = graph.edges();
    edges.sort();
    assert_eq!(edges, [(&1, &2), (&1, &3)]);
}

#[rstest]
fn graph_display_summary() {
    let graph = diamond(true);
    assert_eq!(
        graph.to_string(),
        "Graph{Directed: true, Nodes: 4, Edges: 4}"
    );
}

// =============================================================================
// Traversals
// =============================================================================

#[rstest]
#[case(true, 1, vec![1, 2, 3, 4])]
#[case(true, 4, vec![4])]
#[case(false, 4, vec![4, 2, 3, 1])]
#[case(false, 9, vec![])]
fn graph_bfs(#[case] directed: bool, #[case] start: u32, #[case] expected: Vec<u32>) {
    assert_eq!(diamond(directed).bfs(&start), expected);
}

#[rstest]
fn graph_depth_first_orders() {
    let graph = diamond(true);
    assert_eq!(graph.dfs(&1), [1, 2, 4, 3]);
    assert_eq!(graph.dfs_iterative(&1), [1, 2, 4, 3]);
}

#[rstest]
fn graph_long_chain_does_not_recurse() {
    let graph = Graph::from_edges((0..100_000u32).map(|n| (n, n + 1)), true);
    assert_eq!(graph.dfs(&0).len(), 100_001);
    assert!(!graph.has_cycle());

    let order = graph.topological_sort().unwrap_or_default();
    assert_eq!(order.first(), Some(&0));
    assert_eq!(order.last(), Some(&100_000));
}

// =============================================================================
// Paths
// =============================================================================

#[rstest]
fn graph_shortest_path_counts_edges() {
    let graph = Graph::from_edges([(1, 2), (2, 3), (3, 4), (1, 5), (5, 4)], false);
    assert_eq!(graph.shortest_path(&1, &4), Some(vec![1, 5, 4]));
    assert_eq!(graph.shortest_path(&4, &1), Some(vec![4, 5, 1]));
    assert_eq!(graph.shortest_path(&2, &2), Some(vec![2]));
    assert_eq!(graph.shortest_path(&1, &9), None);
}

#[rstest]
fn graph_all_paths_are_simple() {
    let graph = diamond(false);
    let paths = graph.all_paths(&1, &4);
    assert_eq!(paths, [vec![1, 2, 4], vec![1, 3, 4]]);
}

#[rstest]
fn graph_all_paths_limited_on_complete_graph() {
    let mut graph = Graph::undirected();
    for from in 0..8u32 {
        for to in from + 1..8 {
            graph.add_edge(from, to);
        }
    }

    let limits = SearchLimits::default().with_max_results(100);
    assert_eq!(
        graph.all_paths_limited(&0, &7, &limits),
        Err(Error::ResultLimit { limit: 100 })
    );

    let limits = SearchLimits::default().with_max_depth(1);
    assert_eq!(
        graph.all_paths_limited(&0, &1, &limits).map(|paths| paths.len()),
        Err(Error::DepthLimit { limit: 1 })
    );
}

#[rstest]
fn graph_spanning_tree_covers_reachable_nodes() {
    let graph = diamond(false);
    let tree = graph.spanning_tree(&1);
    assert_eq!(tree, [(1, 2), (1, 3), (2, 4)]);
    assert_eq!(tree.len(), graph.node_count() - 1);
}

// =============================================================================
// Cycles and Ordering
// =============================================================================

#[rstest]
#[case(vec![(1, 2), (2, 3)], true, false)]
#[case(vec![(1, 2), (2, 3), (3, 1)], true, true)]
#[case(vec![(1, 2), (2, 3)], false, false)]
#[case(vec![(1, 2), (2, 3), (3, 1)], false, true)]
#[case(vec![(1, 2), (3, 4), (4, 5), (5, 3)], false, true)]
fn graph_has_cycle(#[case] edges: Vec<(u32, u32)>, #[case] directed: bool, #[case] cycle: bool) {
    assert_eq!(Graph::from_edges(edges, directed).has_cycle(), cycle);
}

#[rstest]
fn graph_topological_sort_orders_dag() {
    let order = diamond(true).topological_sort();
    assert_eq!(order, Some(vec![1, 3, 2, 4]));
    assert_eq!(diamond(false).topological_sort(), None);
}

#[rstest]
#[case(vec![(1, 2), (2, 3), (3, 4), (4, 1)], false, true)]
#[case(vec![(1, 2), (2, 3), (3, 1)], false, false)]
#[case(vec![(1, 2), (3, 4)], false, true)]
#[case(vec![(3, 1), (3, 2)], true, true)]
#[case(vec![(2, 1), (3, 2), (4, 3), (1, 4)], true, true)]
#[case(vec![(3, 1), (2, 3), (2, 1)], true, false)]
fn graph_is_bipartite(
    #[case] edges: Vec<(u32, u32)>,
    #[case] directed: bool,
    #[case] bipartite: bool,
) {
    assert_eq!(Graph::from_edges(edges, directed).is_bipartite(), bipartite);
}

// =============================================================================
// Set-style Operations
// =============================================================================

#[rstest]
fn graph_complement_of_complement_is_original() {
    let graph = diamond(false);
    let complement = graph.complement();
    assert_eq!(complement.edges(), [(&1, &4), (&2, &3)]);
    assert_eq!(complement.complement(), graph);

    let directed = diamond(true).complement();
    assert_eq!(directed.edge_count(), 12 - 4);
}

#[rstest]
fn graph_union_and_intersection() {
    let a = Graph::from_edges([(1, 2), (2, 3)], true);
    let b = Graph::from_edges([(2, 3), (3, 4)], true);

    let union = a.union(&b).unwrap_or_default();
    assert_eq!(union.node_count(), 4);
    assert_eq!(union.edges(), [(&1, &2), (&2, &3), (&2, &3), (&3, &4)]);

    let intersection = a.intersection(&b).unwrap_or_default();
    assert_eq!(intersection.edges(), [(&2, &3)]);

    assert_eq!(
        a.intersection(&Graph::undirected()),
        Err(Error::DirectednessMismatch)
    );
}

#[rstest]
fn graph_subgraph_keeps_induced_edges() {
    let graph = diamond(false);
    let sub = graph.subgraph(&[1, 2, 4]);
    assert_eq!(sub.edges(), [(&1, &2), (&2, &4)]);
    assert_eq!(sub.node_count(), 3);

    let hubs = graph.filter(|_, degree| degree >= 2);
    assert_eq!(hubs, [1, 2, 3, 4]);
}

#[rstest]
fn graph_components_cover_every_node() {
    let mut graph = Graph::from_edges([(1, 2), (3, 4), (4, 5)], false);
    graph.add_node(6);

    let components = graph.connected_components();
    assert_eq!(components, [vec![1, 2], vec![3, 4, 5], vec![6]]);
    let total: usize = components.iter().map(Vec::len).sum();
    assert_eq!(total, graph.node_count());
}

#[rstest]
#[case(vec![(3, 1), (3, 2)], vec![vec![1, 3, 2]])]
#[case(vec![(2, 1), (5, 4), (4, 3)], vec![vec![1, 2], vec![3, 4, 5]])]
#[case(vec![(1, 2), (3, 2)], vec![vec![1, 2, 3]])]
fn graph_directed_components_ignore_direction(
    #[case] edges: Vec<(u32, u32)>,
    #[case] expected: Vec<Vec<u32>>,
) {
    let graph = Graph::from_edges(edges, true);
    assert_eq!(graph.is_connected(), expected.len() == 1);
    assert_eq!(graph.connected_components(), expected);
}
