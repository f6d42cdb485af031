//! Frontier-driven traversal and predicate search over a `LabeledGraph`.
//!
//! Unknown destinations are never followed: they are not nodes.

use std::collections::HashSet;
use std::hash::Hash;

use super::{Frontier, LabeledGraph, Order, Path, Queue, Stack, Step};

/// What a search predicate gets to look at for each candidate node.
#[derive(Debug)]
pub struct Candidate<'a, N, L> {
    /// The node being tested.
    pub node: &'a N,
    /// Path from the search origin to `node`.
    pub path: &'a Path<N, L>,
    /// Where the search started.
    pub origin: &'a N,
    /// Paths still waiting in the frontier.
    pub pending: usize,
    /// Nodes already expanded.
    pub visited: &'a HashSet<N>,
}

impl<N, L> LabeledGraph<N, L>
where
    N: Clone + Eq + Hash,
    L: Clone + Eq + Hash,
{
    /// Visit every node reachable from `from`, in the order the frontier
    /// dictates. Each reachable node appears exactly once, paired with the
    /// label it was first reached by.
    pub fn xft<F>(&self, from: &N, mut frontier: F) -> Vec<Step<N, L>>
    where
        F: Frontier<Step<N, L>>,
    {
        let mut visited = HashSet::new();
        let mut traversed = Vec::new();

        frontier.push(Step::start(from.clone()));

        while let Some(step) = frontier.pop() {
            if !visited.insert(step.node.clone()) {
                continue;
            }
            for (label, node) in self.known_neighbors(&step.node) {
                frontier.push(Step::via(label.clone(), node.clone()));
            }
            traversed.push(step);
        }

        traversed
    }

    /// Breadth-first traversal.
    pub fn bft(&self, from: &N) -> Vec<Step<N, L>> {
        self.xft(from, Queue::new())
    }

    /// Depth-first traversal.
    pub fn dft(&self, from: &N) -> Vec<Step<N, L>> {
        self.xft(from, Stack::new())
    }

    /// Search outward from `from` until `found` accepts a node, and return
    /// the path that reached it. Returns an empty path if the reachable
    /// graph is exhausted first.
    ///
    /// The predicate is tested when a path is generated, so with a FIFO
    /// frontier the first accepted path has the minimum edge count.
    pub fn xfs<F, P>(&self, from: &N, mut frontier: F, mut found: P) -> Path<N, L>
    where
        F: Frontier<Path<N, L>>,
        P: FnMut(&Candidate<'_, N, L>) -> bool,
    {
        let mut visited: HashSet<N> = HashSet::new();
        let start = Path::start(from.clone());

        let accepted = found(&Candidate {
            node: from,
            path: &start,
            origin: from,
            pending: frontier.len(),
            visited: &visited,
        });
        if accepted {
            return start;
        }
        frontier.push(start);

        while let Some(path) = frontier.pop() {
            let node = match path.terminal() {
                Some(node) => node.clone(),
                None => continue,
            };
            if !visited.insert(node.clone()) {
                continue;
            }

            for (label, next) in self.known_neighbors(&node) {
                let next_path = path.extend(label.clone(), next.clone());
                let accepted = found(&Candidate {
                    node: next,
                    path: &next_path,
                    origin: from,
                    pending: frontier.len(),
                    visited: &visited,
                });
                if accepted {
                    return next_path;
                }
                frontier.push(next_path);
            }
        }

        Path::empty()
    }

    /// Breadth-first predicate search: shortest path to an accepted node.
    pub fn bfs<P>(&self, from: &N, found: P) -> Path<N, L>
    where
        P: FnMut(&Candidate<'_, N, L>) -> bool,
    {
        self.xfs(from, Queue::new(), found)
    }

    /// Depth-first predicate search: some path to an accepted node.
    pub fn dfs<P>(&self, from: &N, found: P) -> Path<N, L>
    where
        P: FnMut(&Candidate<'_, N, L>) -> bool,
    {
        self.xfs(from, Stack::new(), found)
    }

    /// Predicate search with the discipline chosen at runtime.
    pub fn search<P>(&self, from: &N, order: Order, found: P) -> Path<N, L>
    where
        P: FnMut(&Candidate<'_, N, L>) -> bool,
    {
        match order {
            Order::Breadth => self.bfs(from, found),
            Order::Depth => self.dfs(from, found),
        }
    }

    pub fn xfs_to_node<F>(&self, from: &N, to: &N, frontier: F) -> Path<N, L>
    where
        F: Frontier<Path<N, L>>,
    {
        self.xfs(from, frontier, |c| c.node == to)
    }

    pub fn bfs_to_node(&self, from: &N, to: &N) -> Path<N, L> {
        self.xfs_to_node(from, to, Queue::new())
    }

    pub fn dfs_to_node(&self, from: &N, to: &N) -> Path<N, L> {
        self.xfs_to_node(from, to, Stack::new())
    }

    pub fn xfs_to_node_set<F>(&self, from: &N, targets: &HashSet<N>, frontier: F) -> Path<N, L>
    where
        F: Frontier<Path<N, L>>,
    {
        self.xfs(from, frontier, |c| targets.contains(c.node))
    }

    pub fn bfs_to_node_set(&self, from: &N, targets: &HashSet<N>) -> Path<N, L> {
        self.xfs_to_node_set(from, targets, Queue::new())
    }

    pub fn dfs_to_node_set(&self, from: &N, targets: &HashSet<N>) -> Path<N, L> {
        self.xfs_to_node_set(from, targets, Stack::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Direction, InverseLabelRegistry};
    use std::collections::{HashMap, VecDeque};
    use Direction::*;

    /// 1 - 2 - 3
    /// |       |
    /// 4   5 - 6
    /// |       |
    /// 7 - 8 - 9
    fn sample_graph() -> LabeledGraph<u32, Direction> {
        let edges = vec![
            (1, East, 2),
            (2, East, 3),
            (1, South, 4),
            (3, South, 6),
            (5, East, 6),
            (4, South, 7),
            (6, South, 9),
            (7, East, 8),
            (8, East, 9),
        ];
        LabeledGraph::from_edges(1..=9, edges, InverseLabelRegistry::cardinal(), true).unwrap()
    }

    /// Reference distances computed directly from `get_neighbors`.
    fn distances(graph: &LabeledGraph<u32, Direction>, from: u32) -> HashMap<u32, usize> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(from, 0);
        queue.push_back(from);
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            for (_, dest) in graph.get_neighbors(&node) {
                if let Some(next) = dest.known() {
                    if !dist.contains_key(next) {
                        dist.insert(*next, d + 1);
                        queue.push_back(*next);
                    }
                }
            }
        }
        dist
    }

    fn sorted_nodes(steps: &[Step<u32, Direction>]) -> Vec<u32> {
        let mut nodes: Vec<u32> = steps.iter().map(|s| s.node).collect();
        nodes.sort_unstable();
        nodes
    }

    #[test]
    fn test_bft_and_dft_visit_every_node_once() {
        let graph = sample_graph();
        for start in 1..=9 {
            let bft = graph.bft(&start);
            let dft = graph.dft(&start);
            assert_eq!(sorted_nodes(&bft), (1..=9).collect::<Vec<_>>());
            assert_eq!(sorted_nodes(&dft), (1..=9).collect::<Vec<_>>());
            assert_eq!(bft[0], Step::start(start));
            assert_eq!(dft[0], Step::start(start));
        }
    }

    #[test]
    fn test_bft_is_level_ordered() {
        let graph = sample_graph();
        let dist = distances(&graph, 1);
        let levels: Vec<usize> = graph.bft(&1).iter().map(|s| dist[&s.node]).collect();
        let mut sorted = levels.clone();
        sorted.sort_unstable();
        assert_eq!(levels, sorted);
    }

    #[test]
    fn test_dft_goes_deep_first() {
        // 1 -a-> 2 -a-> 3, 1 -b-> 4 (one-way edges)
        let mut graph: LabeledGraph<u32, char> = LabeledGraph::new();
        graph.add_edge(1, 'a', 2);
        graph.add_edge(2, 'a', 3);
        graph.add_edge(1, 'b', 4);
        let order: Vec<u32> = graph.dft(&1).iter().map(|s| s.node).collect();
        assert_eq!(order, vec![1, 4, 2, 3]);
        let order: Vec<u32> = graph.bft(&1).iter().map(|s| s.node).collect();
        assert_eq!(order, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_traversal_from_missing_node() {
        let graph = sample_graph();
        assert_eq!(graph.bft(&42), vec![Step::start(42)]);
    }

    #[test]
    fn test_bfs_to_node_sample_scenario() {
        let graph = sample_graph();
        let path = graph.bfs_to_node(&1, &5);
        assert_eq!(
            path.steps(),
            &[
                Step::start(1),
                Step::via(East, 2),
                Step::via(East, 3),
                Step::via(South, 6),
                Step::via(West, 5),
            ]
        );
    }

    #[test]
    fn test_bfs_is_shortest_for_all_pairs() {
        let graph = sample_graph();
        for from in 1..=9 {
            let dist = distances(&graph, from);
            for to in 1..=9 {
                let bfs = graph.bfs_to_node(&from, &to);
                let dfs = graph.dfs_to_node(&from, &to);
                assert_eq!(bfs.terminal(), Some(&to));
                assert_eq!(dfs.terminal(), Some(&to));
                assert_eq!(bfs.edge_count(), dist[&to], "bfs {} -> {}", from, to);
                assert!(bfs.edge_count() <= dfs.edge_count());
            }
        }
    }

    #[test]
    fn test_search_path_is_walkable() {
        let graph = sample_graph();
        let path = graph.dfs_to_node(&7, &3);
        let mut at = *path.origin().unwrap();
        for (label, node) in path.hops() {
            let dest = graph.neighbor(&at, label).unwrap();
            assert_eq!(dest.known(), Some(node));
            at = *node;
        }
        assert_eq!(at, 3);
    }

    #[test]
    fn test_search_from_target_is_singleton() {
        let graph = sample_graph();
        let path = graph.bfs_to_node(&4, &4);
        assert_eq!(path.steps(), &[Step::start(4)]);
        assert_eq!(path.edge_count(), 0);
    }

    #[test]
    fn test_search_not_found_is_empty() {
        let mut graph = sample_graph();
        graph.add_node(10);
        assert!(graph.bfs_to_node(&1, &10).is_empty());
        assert!(graph.dfs_to_node(&1, &10).is_empty());
        assert!(graph.bfs(&1, |_| false).is_empty());
    }

    #[test]
    fn test_to_node_set_finds_nearest_member() {
        let graph = sample_graph();
        let targets: HashSet<u32> = [3, 6, 5, 9].into_iter().collect();
        let path = graph.bfs_to_node_set(&1, &targets);
        assert_eq!(path.terminal(), Some(&3));
        assert_eq!(path.edge_count(), 2);

        let path = graph.dfs_to_node_set(&1, &targets);
        assert!(targets.contains(path.terminal().unwrap()));
    }

    #[test]
    fn test_unknown_edges_are_not_followed() {
        let mut graph: LabeledGraph<u32, Direction> =
            LabeledGraph::with_inverses(InverseLabelRegistry::cardinal());
        graph.add_both_edges(1, East, 2).unwrap();
        graph.add_unknown_edge(2, East);
        assert_eq!(graph.bft(&1).len(), 2);

        let path = graph.bfs(&1, |c| graph.has_unknown_exit(c.node));
        assert_eq!(path.steps(), &[Step::start(1), Step::via(East, 2)]);
    }

    #[test]
    fn test_predicate_sees_search_state() {
        let graph = sample_graph();
        let mut calls = 0;
        let mut most_pending = 0;
        let path = graph.bfs(&1, |c| {
            calls += 1;
            assert_eq!(c.origin, &1);
            assert_eq!(c.path.terminal(), Some(c.node));
            if c.path.edge_count() == 0 {
                assert_eq!(c.pending, 0);
            }
            most_pending = most_pending.max(c.pending);
            c.path.edge_count() == 3 && c.visited.len() >= 3
        });
        assert_eq!(path.edge_count(), 3);
        assert!(calls > 1);
        assert!(most_pending > 0);
    }

    #[test]
    fn test_search_with_runtime_order() {
        let graph = sample_graph();
        let breadth = graph.search(&9, Order::Breadth, |c| *c.node == 1);
        let depth = graph.search(&9, Order::Depth, |c| *c.node == 1);
        assert_eq!(breadth.edge_count(), 4);
        assert!(depth.edge_count() >= 4);
    }
}
