//! Implementation of an adjacency-list graph with traversal, path and ordering algorithms
#![warn(missing_docs)]

extern crate alloc;

use alloc::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    vec,
    vec::Vec,
};
use core::fmt;

use tracing::{debug, warn};

use crate::config::SearchLimits;
use crate::error::{Error, Result};

//-----------------------------------------------------------------------------------------------//

/// A graph held as a map from each node to the list of its neighbours.
///
/// Edges are plain entries in the neighbour lists. Parallel edges and self-loops are allowed and
/// are never merged. In an undirected graph every edge `(u, v)` appears in both lists, and a
/// self-loop appears twice in its node's list.
///
/// Nodes are kept in ascending order, so every traversal below is deterministic. All traversals
/// use explicit stacks and queues; none of them recurse.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    adjacency: BTreeMap<T, Vec<T>>,
    directed: bool,
}

impl<T> Graph<T> {
    /// Constructor
    pub fn new(directed: bool) -> Self {
        Graph {
            adjacency: BTreeMap::new(),
            directed,
        }
    }

    /// Constructor for a directed graph
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Constructor for an undirected graph
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Check if edges have a direction
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Get the number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Get the number of edges, counting parallel edges separately
    pub fn edge_count(&self) -> usize {
        let total: usize = self.adjacency.values().map(Vec::len).sum();
        if self.directed {
            total
        } else {
            total / 2
        }
    }

    /// Check if there are any nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Remove all nodes and edges
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Iterate over the nodes in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = &T> + '_ {
        self.adjacency.keys()
    }
}

impl<T> Graph<T>
where
    T: Ord + Clone,
{
    /// Build a graph from a list of edges
    pub fn from_edges<I>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let mut graph = Self::new(directed);
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Add a node. Adding a node that is already present does nothing.
    pub fn add_node(&mut self, node: T) {
        self.adjacency.entry(node).or_default();
    }

    /// Add an edge, creating either endpoint if needed.
    ///
    /// Adding the same edge twice creates a parallel edge.
    pub fn add_edge(&mut self, from: T, to: T) {
        let back = self.adjacency.entry(to.clone()).or_default();
        if !self.directed {
            back.push(from.clone());
        }
        self.adjacency.entry(from).or_default().push(to);
    }

    /// Remove one copy of an edge.
    ///
    /// Returns `false` if no such edge exists. Other parallel copies are left in place.
    pub fn remove_edge(&mut self, from: &T, to: &T) -> bool {
        let removed = self
            .adjacency
            .get_mut(from)
            .is_some_and(|neighbors| remove_first(neighbors, to));
        if removed && !self.directed {
            if let Some(neighbors) = self.adjacency.get_mut(to) {
                remove_first(neighbors, from);
            }
        }
        removed
    }

    /// Remove a node together with every edge that touches it.
    ///
    /// Returns `false` if the node was not present.
    pub fn remove_node(&mut self, node: &T) -> bool {
        let Some(own) = self.adjacency.remove(node) else {
            return false;
        };

        let mut dropped = 0;
        for neighbors in self.adjacency.values_mut() {
            let before = neighbors.len();
            neighbors.retain(|neighbor| neighbor != node);
            dropped += before - neighbors.len();
        }
        debug!(outgoing = own.len(), incoming = dropped, "removed node");
        true
    }

    /// Check if a node is present
    pub fn has_node(&self, node: &T) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Check if there is at least one edge from `from` to `to`
    pub fn has_edge(&self, from: &T, to: &T) -> bool {
        self.neighbors(from).contains(to)
    }

    /// Get the neighbour list of a node, empty if the node is not present
    pub fn neighbors(&self, node: &T) -> &[T] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the number of entries in a node's neighbour list
    pub fn degree(&self, node: &T) -> usize {
        self.neighbors(node).len()
    }

    /// Get the number of edges arriving at a node.
    ///
    /// For an undirected graph this is the degree. For a directed graph every neighbour list is
    /// scanned.
    pub fn in_degree(&self, node: &T) -> usize {
        if !self.directed {
            return self.degree(node);
        }
        self.adjacency
            .values()
            .flatten()
            .filter(|neighbor| *neighbor == node)
            .count()
    }

    /// Get the number of edges leaving a node
    pub fn out_degree(&self, node: &T) -> usize {
        self.degree(node)
    }

    /// List every edge.
    ///
    /// An undirected edge is listed once, from its smaller endpoint. Parallel edges are listed
    /// once per copy.
    pub fn edges(&self) -> Vec<(&T, &T)> {
        let mut edges = Vec::new();
        for (from, neighbors) in &self.adjacency {
            if self.directed {
                edges.extend(neighbors.iter().map(|to| (from, to)));
                continue;
            }

            let mut loops = 0;
            for to in neighbors {
                if from < to {
                    edges.push((from, to));
                } else if from == to {
                    loops += 1;
                }
            }
            // an undirected self-loop occupies two entries
            for _ in 0..loops / 2 {
                edges.push((from, from));
            }
        }
        edges
    }

    /// Visit the nodes reachable from `start` in breadth-first order
    pub fn bfs(&self, start: &T) -> Vec<T> {
        let mut order = Vec::new();
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return order;
        };

        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            order.push(node.clone());
            for neighbor in self.neighbors(node) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        order
    }

    /// Visit the nodes reachable from `start` in depth-first order, taking neighbours in list
    /// order as a recursive walk would
    pub fn dfs(&self, start: &T) -> Vec<T> {
        let mut order = Vec::new();
        if let Some((start, _)) = self.adjacency.get_key_value(start) {
            let mut visited = BTreeSet::new();
            self.dfs_from(start, &BTreeMap::new(), &mut visited, &mut order);
        }
        order
    }

    /// Visit the nodes reachable from `start` in depth-first order using a plain stack.
    ///
    /// Neighbours are pushed in reverse so the order usually matches `dfs`, but the two can
    /// differ when a node is reachable along several branches.
    pub fn dfs_iterative(&self, start: &T) -> Vec<T> {
        let mut order = Vec::new();
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return order;
        };

        let mut visited = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            order.push(node.clone());
            for neighbor in self.neighbors(node).iter().rev() {
                if !visited.contains(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        order
    }

    /// Split the nodes into groups, each the depth-first reach of its smallest unvisited node.
    ///
    /// In a directed graph edges are followed both ways, so the groups are the weakly connected
    /// components.
    pub fn connected_components(&self) -> Vec<Vec<T>> {
        let incoming = self.incoming();
        let mut components = Vec::new();
        let mut visited = BTreeSet::new();
        for node in self.adjacency.keys() {
            if !visited.contains(node) {
                let mut component = Vec::new();
                self.dfs_from(node, &incoming, &mut visited, &mut component);
                components.push(component);
            }
        }
        components
    }

    /// Check if the graph forms a single component, ignoring edge direction. An empty graph is
    /// connected.
    pub fn is_connected(&self) -> bool {
        self.is_empty() || self.connected_components().len() == 1
    }

    /// Find a path with the fewest edges from `start` to `end`, including both endpoints
    pub fn shortest_path(&self, start: &T, end: &T) -> Option<Vec<T>> {
        let (start, _) = self.adjacency.get_key_value(start)?;
        if !self.has_node(end) {
            return None;
        }

        let mut parent: BTreeMap<&T, &T> = BTreeMap::new();
        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            if node == end {
                let mut path = vec![node.clone()];
                let mut current = node;
                while let Some(&previous) = parent.get(current) {
                    path.push(previous.clone());
                    current = previous;
                }
                path.reverse();
                return Some(path);
            }
            for neighbor in self.neighbors(node) {
                if visited.insert(neighbor) {
                    parent.insert(neighbor, node);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }

    /// Enumerate every simple path from `start` to `end`.
    ///
    /// The number of paths can grow exponentially; see `all_paths_limited` for a capped search.
    pub fn all_paths(&self, start: &T, end: &T) -> Vec<Vec<T>> {
        // unbounded limits never trip
        self.all_paths_limited(start, end, &SearchLimits::unbounded())
            .unwrap_or_default()
    }

    /// Enumerate every simple path from `start` to `end`, within `limits`.
    ///
    /// `max_depth` bounds the number of edges in a path and `max_results` bounds the number of
    /// paths. Exceeding either aborts the search with an error.
    pub fn all_paths_limited(
        &self,
        start: &T,
        end: &T,
        limits: &SearchLimits,
    ) -> Result<Vec<Vec<T>>> {
        let result = self.enumerate_paths(start, end, limits);
        if let Err(error) = &result {
            warn!(%error, "path search aborted");
        }
        result
    }

    fn enumerate_paths(&self, start: &T, end: &T, limits: &SearchLimits) -> Result<Vec<Vec<T>>> {
        let mut paths = Vec::new();
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return Ok(paths);
        };
        if start == end {
            paths.push(vec![start.clone()]);
            return Ok(paths);
        }

        // path[i] is entered with its neighbour cursor at stack[i]
        let mut path = vec![start];
        let mut on_path = BTreeSet::from([start]);
        let mut stack = vec![0];
        while let Some(cursor) = stack.last_mut() {
            let Some(&node) = path.last() else {
                break;
            };
            let Some(next) = self.neighbors(node).get(*cursor) else {
                stack.pop();
                path.pop();
                on_path.remove(node);
                continue;
            };
            *cursor += 1;
            if on_path.contains(next) {
                continue;
            }

            if path.len() > limits.max_depth {
                return Err(Error::DepthLimit {
                    limit: limits.max_depth,
                });
            }
            if next == end {
                let mut found: Vec<T> = path.iter().map(|&node| node.clone()).collect();
                found.push(next.clone());
                paths.push(found);
                if paths.len() > limits.max_results {
                    return Err(Error::ResultLimit {
                        limit: limits.max_results,
                    });
                }
                continue;
            }

            path.push(next);
            on_path.insert(next);
            stack.push(0);
        }
        Ok(paths)
    }

    /// Check if the graph contains a cycle.
    ///
    /// A directed graph is checked for a back edge to a node on the current walk. In an
    /// undirected graph the edge just used to reach a node is not counted, so only a real cycle,
    /// a parallel edge or a self-loop reports `true`.
    pub fn has_cycle(&self) -> bool {
        if self.directed {
            self.has_directed_cycle()
        } else {
            self.has_undirected_cycle()
        }
    }

    fn has_directed_cycle(&self) -> bool {
        let mut visited = BTreeSet::new();
        let mut on_stack = BTreeSet::new();
        for root in self.adjacency.keys() {
            if !visited.insert(root) {
                continue;
            }
            on_stack.insert(root);
            let mut stack = vec![(root, 0)];
            while let Some((node, cursor)) = stack.last_mut() {
                let node = *node;
                match self.neighbors(node).get(*cursor) {
                    Some(next) => {
                        *cursor += 1;
                        if on_stack.contains(next) {
                            return true;
                        }
                        if visited.insert(next) {
                            on_stack.insert(next);
                            stack.push((next, 0));
                        }
                    }
                    None => {
                        on_stack.remove(node);
                        stack.pop();
                    }
                }
            }
        }
        false
    }

    fn has_undirected_cycle(&self) -> bool {
        struct Frame<'a, T> {
            node: &'a T,
            parent: Option<&'a T>,
            cursor: usize,
        }

        let mut visited = BTreeSet::new();
        for root in self.adjacency.keys() {
            if !visited.insert(root) {
                continue;
            }
            let mut stack = vec![Frame {
                node: root,
                parent: None,
                cursor: 0,
            }];
            while let Some(frame) = stack.last_mut() {
                let Some(next) = self.neighbors(frame.node).get(frame.cursor) else {
                    stack.pop();
                    continue;
                };
                frame.cursor += 1;
                if frame.parent == Some(next) {
                    // the tree edge back to the parent is skipped once
                    frame.parent = None;
                    continue;
                }
                if !visited.insert(next) {
                    return true;
                }
                let node = frame.node;
                stack.push(Frame {
                    node: next,
                    parent: Some(node),
                    cursor: 0,
                });
            }
        }
        false
    }

    /// Order the nodes so that every edge points forwards.
    ///
    /// Returns `None` for an undirected graph or a graph with a cycle.
    pub fn topological_sort(&self) -> Option<Vec<T>> {
        if !self.directed {
            debug!("topological sort rejected: graph is undirected");
            return None;
        }
        if self.has_directed_cycle() {
            debug!("topological sort rejected: graph has a cycle");
            return None;
        }

        let mut finished = Vec::with_capacity(self.node_count());
        let mut visited = BTreeSet::new();
        for root in self.adjacency.keys() {
            if !visited.insert(root) {
                continue;
            }
            let mut stack = vec![(root, 0)];
            while let Some((node, cursor)) = stack.last_mut() {
                let node = *node;
                match self.neighbors(node).get(*cursor) {
                    Some(next) => {
                        *cursor += 1;
                        if visited.insert(next) {
                            stack.push((next, 0));
                        }
                    }
                    None => {
                        finished.push(node.clone());
                        stack.pop();
                    }
                }
            }
        }
        finished.reverse();
        Some(finished)
    }

    /// Check if the nodes can be two-coloured with no edge joining nodes of the same colour.
    ///
    /// Edge direction plays no part in the colouring.
    pub fn is_bipartite(&self) -> bool {
        let incoming = self.incoming();
        let mut color: BTreeMap<&T, bool> = BTreeMap::new();
        for root in self.adjacency.keys() {
            if color.contains_key(root) {
                continue;
            }
            color.insert(root, true);
            let mut queue = VecDeque::from([root]);
            while let Some(node) = queue.pop_front() {
                let side = color.get(node).copied().unwrap_or(true);
                let arriving = incoming.get(node).into_iter().flatten().copied();
                for neighbor in self.neighbors(node).iter().chain(arriving) {
                    match color.get(neighbor) {
                        None => {
                            color.insert(neighbor, !side);
                            queue.push_back(neighbor);
                        }
                        Some(&other) if other == side => return false,
                        Some(_) => {}
                    }
                }
            }
        }
        true
    }

    /// Get the edges of a breadth-first spanning tree of the nodes reachable from `start`.
    ///
    /// Edges carry no weight, so this is a spanning tree with the fewest levels, not a minimum
    /// weight one.
    pub fn spanning_tree(&self, start: &T) -> Vec<(T, T)> {
        let mut tree = Vec::new();
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return tree;
        };

        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(node) {
                if visited.insert(neighbor) {
                    tree.push((node.clone(), neighbor.clone()));
                    queue.push_back(neighbor);
                }
            }
        }
        tree
    }

    /// Build the graph on the same nodes holding exactly the edges this one lacks.
    ///
    /// Self-loops are never added.
    pub fn complement(&self) -> Self {
        let mut result = Self::new(self.directed);
        for node in self.adjacency.keys() {
            result.add_node(node.clone());
        }
        for from in self.adjacency.keys() {
            for to in self.adjacency.keys() {
                let wanted = if self.directed { from != to } else { from < to };
                if wanted && !self.has_edge(from, to) {
                    result.add_edge(from.clone(), to.clone());
                }
            }
        }
        result
    }

    /// Build a graph holding the nodes and edges of both graphs.
    ///
    /// Edges present in both are kept twice, as parallel edges.
    pub fn union(&self, other: &Self) -> Result<Self> {
        if self.directed != other.directed {
            return Err(Error::DirectednessMismatch);
        }

        let mut result = self.clone();
        for node in other.adjacency.keys() {
            result.add_node(node.clone());
        }
        for (from, to) in other.edges() {
            result.add_edge(from.clone(), to.clone());
        }
        Ok(result)
    }

    /// Build a graph holding the nodes of this graph that `other` shares, and the edges of this
    /// graph that `other` also has
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        if self.directed != other.directed {
            return Err(Error::DirectednessMismatch);
        }

        let mut result = Self::new(self.directed);
        for node in self.adjacency.keys() {
            if other.has_node(node) {
                result.add_node(node.clone());
            }
        }
        for (from, to) in self.edges() {
            if other.has_edge(from, to) {
                result.add_edge(from.clone(), to.clone());
            }
        }
        Ok(result)
    }

    /// Build the subgraph induced by the nodes that satisfy `predicate`
    pub fn filter_nodes<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let kept: BTreeSet<&T> = self.adjacency.keys().filter(|&node| predicate(node)).collect();

        let mut result = Self::new(self.directed);
        for &node in &kept {
            let neighbors = self
                .neighbors(node)
                .iter()
                .filter(|neighbor| kept.contains(neighbor))
                .cloned()
                .collect();
            result.adjacency.insert(node.clone(), neighbors);
        }
        result
    }

    /// Build the subgraph induced by `nodes`
    pub fn subgraph(&self, nodes: &[T]) -> Self {
        let wanted: BTreeSet<&T> = nodes.iter().collect();
        self.filter_nodes(|node| wanted.contains(node))
    }

    /// Collect the nodes that satisfy `predicate`, which is given each node and its degree
    pub fn filter<P>(&self, mut predicate: P) -> Vec<T>
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.adjacency
            .iter()
            .filter(|&(node, neighbors)| predicate(node, neighbors.len()))
            .map(|(node, _)| node.clone())
            .collect()
    }

    // Sources of the edges arriving at each node. Empty for an undirected graph, where the
    // neighbour lists already hold both directions.
    fn incoming(&self) -> BTreeMap<&T, Vec<&T>> {
        let mut incoming: BTreeMap<&T, Vec<&T>> = BTreeMap::new();
        if self.directed {
            for (from, neighbors) in &self.adjacency {
                for to in neighbors {
                    incoming.entry(to).or_default().push(from);
                }
            }
        }
        incoming
    }

    // Neighbour number `index` of `node`, counting out-edges first and then `incoming`
    fn linked<'a>(
        &'a self,
        incoming: &BTreeMap<&'a T, Vec<&'a T>>,
        node: &T,
        index: usize,
    ) -> Option<&'a T> {
        let outgoing = self.neighbors(node);
        match outgoing.get(index) {
            Some(next) => Some(next),
            None => incoming
                .get(node)
                .and_then(|sources| sources.get(index - outgoing.len()))
                .copied(),
        }
    }

    // Recursive-order depth first walk using an explicit stack of neighbour cursors
    fn dfs_from<'a>(
        &'a self,
        start: &'a T,
        incoming: &BTreeMap<&'a T, Vec<&'a T>>,
        visited: &mut BTreeSet<&'a T>,
        order: &mut Vec<T>,
    ) {
        visited.insert(start);
        order.push(start.clone());

        let mut stack = vec![(start, 0)];
        while let Some((node, cursor)) = stack.last_mut() {
            match self.linked(incoming, node, *cursor) {
                Some(next) => {
                    *cursor += 1;
                    if visited.insert(next) {
                        order.push(next.clone());
                        stack.push((next, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::undirected()
    }
}

impl<T> PartialEq for Graph<T>
where
    T: Ord,
{
    /// Graphs are equal when they agree on direction and nodes, and every node has the same set
    /// of neighbours. Parallel edges are not counted.
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.adjacency.len() == other.adjacency.len()
            && self.adjacency.iter().all(|(node, neighbors)| {
                other.adjacency.get(node).is_some_and(|others| {
                    neighbors.iter().collect::<BTreeSet<_>>()
                        == others.iter().collect::<BTreeSet<_>>()
                })
            })
    }
}

impl<T> Eq for Graph<T> where T: Ord {}

impl<T> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph{{Directed: {}, Nodes: {}, Edges: {}}}",
            self.directed,
            self.node_count(),
            self.edge_count()
        )
    }
}

//-----------------------------------------------------------------------------------------------//

fn remove_first<T: PartialEq>(neighbors: &mut Vec<T>, target: &T) -> bool {
    match neighbors.iter().position(|neighbor| neighbor == target) {
        Some(index) => {
            neighbors.remove(index);
            true
        }
        None => false,
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Basic construction, symmetry and counts
fn test_graph_0() {
    use alloc::string::ToString;

    let mut graph = Graph::undirected();
    graph.add_edge(1, 2);
    graph.add_edge(2, 3);
    graph.add_node(4);

    assert!(graph.has_edge(&1, &2));
    assert!(graph.has_edge(&2, &1));
    assert!(!graph.has_edge(&1, &3));
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.degree(&2), 2);
    assert_eq!(graph.in_degree(&2), 2);
    assert_eq!(graph.neighbors(&4), &[] as &[i32]);
    assert_eq!(graph.neighbors(&9), &[] as &[i32]);
    assert_eq!(graph.edges(), [(&1, &2), (&2, &3)]);
    assert_eq!(graph.to_string(), "Graph{Directed: false, Nodes: 4, Edges: 2}");
}

#[test]
// Parallel edges, self-loops and removal
fn test_graph_1() {
    let mut graph = Graph::undirected();
    graph.add_edge('a', 'b');
    graph.add_edge('a', 'b');
    graph.add_edge('c', 'c');

    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.edges(), [(&'a', &'b'), (&'a', &'b'), (&'c', &'c')]);

    assert!(graph.remove_edge(&'b', &'a'));
    assert!(graph.has_edge(&'a', &'b'));
    assert!(graph.remove_edge(&'a', &'b'));
    assert!(!graph.has_edge(&'b', &'a'));
    assert!(!graph.remove_edge(&'a', &'b'));

    assert!(graph.remove_edge(&'c', &'c'));
    assert_eq!(graph.degree(&'c'), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
// Removing a node drops every edge that touches it
fn test_graph_2() {
    let mut graph = Graph::from_edges([(1, 2), (3, 2), (2, 2), (3, 1)], true);
    assert_eq!(graph.in_degree(&2), 3);

    assert!(graph.remove_node(&2));
    assert!(!graph.remove_node(&2));
    assert!(!graph.has_node(&2));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.neighbors(&1), &[] as &[i32]);
    assert_eq!(graph.neighbors(&3), &[1]);
}

#[test]
// Traversal orders
fn test_graph_3() {
    let graph = Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4), (4, 5)], false);

    assert_eq!(graph.bfs(&1), [1, 2, 3, 4, 5]);
    assert_eq!(graph.dfs(&1), [1, 2, 4, 3, 5]);
    assert_eq!(graph.dfs_iterative(&1), [1, 2, 4, 3, 5]);
    assert!(graph.bfs(&7).is_empty());
    assert!(graph.dfs(&7).is_empty());

    let directed = Graph::from_edges([(1, 2), (2, 3)], true);
    assert_eq!(directed.bfs(&1), [1, 2, 3]);
    assert_eq!(directed.bfs(&3), [3]);
}

#[test]
// Components and connectivity
fn test_graph_4() {
    let mut graph = Graph::from_edges([(1, 2), (3, 4)], false);
    graph.add_node(5);

    assert_eq!(
        graph.connected_components(),
        [vec![1, 2], vec![3, 4], vec![5]]
    );
    assert!(!graph.is_connected());

    graph.add_edge(2, 3);
    graph.add_edge(4, 5);
    assert!(graph.is_connected());
    assert!(Graph::<i32>::undirected().is_connected());

    // edges into the smallest node still join it to the rest
    let star = Graph::from_edges([(3, 1), (3, 2)], true);
    assert_eq!(star.connected_components(), [vec![1, 3, 2]]);
    assert!(star.is_connected());
    let split = Graph::from_edges([(2, 1), (4, 3)], true);
    assert_eq!(split.connected_components(), [vec![1, 2], vec![3, 4]]);
}

#[test]
// Cycle detection for directed and undirected graphs
fn test_graph_5() {
    assert!(!Graph::from_edges([(1, 2), (2, 3)], true).has_cycle());
    assert!(Graph::from_edges([(1, 2), (2, 3), (3, 1)], true).has_cycle());
    assert!(!Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)], true).has_cycle());
    assert!(Graph::from_edges([(1, 1)], true).has_cycle());

    assert!(!Graph::from_edges([(1, 2), (2, 3)], false).has_cycle());
    assert!(!Graph::from_edges([(1, 2), (1, 3), (3, 4)], false).has_cycle());
    assert!(Graph::from_edges([(1, 2), (2, 3), (3, 1)], false).has_cycle());
    assert!(Graph::from_edges([(1, 2), (1, 2)], false).has_cycle());
    assert!(Graph::from_edges([(1, 1)], false).has_cycle());
}

#[test]
// Topological sort
fn test_graph_6() {
    let dag = Graph::from_edges([(1, 2), (1, 3), (2, 4), (3, 4)], true);
    let order = dag.topological_sort().unwrap_or_default();
    let position = |n: i32| order.iter().position(|&x| x == n);

    assert_eq!(order.len(), 4);
    assert!(position(1) < position(2));
    assert!(position(1) < position(3));
    assert!(position(2) < position(4));
    assert!(position(3) < position(4));

    assert_eq!(Graph::from_edges([(1, 2), (2, 1)], true).topological_sort(), None);
    assert_eq!(Graph::from_edges([(1, 2)], false).topological_sort(), None);
}

#[test]
// Shortest paths and all paths
fn test_graph_7() {
    let graph = Graph::from_edges([(1, 2), (2, 3), (1, 4), (4, 3), (3, 5)], true);

    assert_eq!(graph.shortest_path(&1, &5), Some(vec![1, 2, 3, 5]));
    assert_eq!(graph.shortest_path(&1, &1), Some(vec![1]));
    assert_eq!(graph.shortest_path(&5, &1), None);
    assert_eq!(graph.shortest_path(&1, &9), None);

    assert_eq!(
        graph.all_paths(&1, &3),
        [vec![1, 2, 3], vec![1, 4, 3]]
    );
    assert_eq!(graph.all_paths(&2, &2), [vec![2]]);
    assert!(graph.all_paths(&5, &1).is_empty());

    let limits = SearchLimits::unbounded().with_max_results(1);
    assert_eq!(
        graph.all_paths_limited(&1, &3, &limits),
        Err(Error::ResultLimit { limit: 1 })
    );
    let limits = SearchLimits::unbounded().with_max_depth(2);
    assert_eq!(
        graph.all_paths_limited(&1, &5, &limits),
        Err(Error::DepthLimit { limit: 2 })
    );
    let limits = SearchLimits::unbounded().with_max_depth(3);
    assert_eq!(
        graph.all_paths_limited(&1, &5, &limits),
        Ok(vec![vec![1, 2, 3, 5], vec![1, 4, 3, 5]])
    );
}

#[test]
// Bipartite check and spanning tree
fn test_graph_8() {
    let square = Graph::from_edges([(1, 2), (2, 3), (3, 4), (4, 1)], false);
    assert!(square.is_bipartite());

    let triangle = Graph::from_edges([(1, 2), (2, 3), (3, 1)], false);
    assert!(!triangle.is_bipartite());
    assert!(Graph::<u8>::undirected().is_bipartite());

    // a node reached only by an incoming edge is coloured from its source
    assert!(Graph::from_edges([(3, 1), (3, 2)], true).is_bipartite());
    assert!(Graph::from_edges([(4, 1), (4, 2), (3, 1), (3, 2)], true).is_bipartite());
    assert!(!Graph::from_edges([(1, 2), (1, 3), (2, 3)], true).is_bipartite());

    assert_eq!(square.spanning_tree(&1), [(1, 2), (1, 4), (2, 3)]);
    assert!(square.spanning_tree(&9).is_empty());
}

#[test]
// Set-style operations
fn test_graph_9() {
    let path = Graph::from_edges([(1, 2), (2, 3)], false);

    let complement = path.complement();
    assert_eq!(complement.edges(), [(&1, &3)]);

    let other = Graph::from_edges([(2, 3), (3, 4)], false);
    let union = path.union(&other);
    assert_eq!(union.as_ref().map(Graph::edge_count), Ok(4));
    let intersection = path.intersection(&other);
    assert_eq!(
        intersection.as_ref().map(|graph| graph.nodes().copied().collect::<Vec<_>>()),
        Ok(vec![2, 3])
    );
    assert_eq!(intersection.map(|graph| graph.edge_count()), Ok(1));
    assert_eq!(
        path.union(&Graph::directed()),
        Err(Error::DirectednessMismatch)
    );

    let sub = path.subgraph(&[1, 2]);
    assert_eq!(sub.edges(), [(&1, &2)]);
    let odd = path.filter_nodes(|node| node % 2 == 1);
    assert_eq!(odd.node_count(), 2);
    assert_eq!(odd.edge_count(), 0);
    assert_eq!(path.filter(|_, degree| degree == 1), [1, 3]);
}

#[test]
// Equality ignores parallel edges but not direction
fn test_graph_10() {
    let a = Graph::from_edges([(1, 2), (2, 3)], false);
    let mut b = Graph::from_edges([(2, 3), (2, 1)], false);
    assert_eq!(a, b);

    b.add_edge(1, 2);
    assert_eq!(a, b);

    let c = Graph::from_edges([(1, 2), (2, 3)], true);
    assert_ne!(a, c);

    let copy = a.clone();
    assert_eq!(copy, a);
}
