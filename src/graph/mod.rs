//! Labeled directed graph: node -> (label -> node-or-unknown).
//!
//! Nodes live in an append-only arena and edges point at arena indices, so
//! the structure never holds references into itself. Nothing is ever
//! removed; an edge can only be overwritten by a later write for the same
//! `(from, label)` pair.

mod frontier;
mod inverse;
mod traversal;

pub use frontier::{Frontier, Order, Queue, Stack};
pub use inverse::{Direction, InverseLabelRegistry};
pub use traversal::Candidate;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::{GraphwalkError, Result};

/// Where an edge leads: a known node, or not yet observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination<N> {
    Known(N),
    Unknown,
}

impl<N> Destination<N> {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Destination::Unknown)
    }

    pub fn known(&self) -> Option<&N> {
        match self {
            Destination::Known(node) => Some(node),
            Destination::Unknown => None,
        }
    }
}

/// One entry of a traversal or path: the label taken to reach `node`
/// (`None` for the starting node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step<N, L> {
    pub label: Option<L>,
    pub node: N,
}

impl<N, L> Step<N, L> {
    pub fn start(node: N) -> Self {
        Self { label: None, node }
    }

    pub fn via(label: L, node: N) -> Self {
        Self {
            label: Some(label),
            node,
        }
    }
}

/// Immutable sequence of steps produced by a search. Extending a path
/// yields a new path and leaves the original untouched. An empty path
/// means the search found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path<N, L> {
    steps: Vec<Step<N, L>>,
}

impl<N: Clone, L: Clone> Path<N, L> {
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn start(node: N) -> Self {
        Self {
            steps: vec![Step::start(node)],
        }
    }

    /// Copy of this path with one more step appended.
    pub fn extend(&self, label: L, node: N) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(Step::via(label, node));
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps, including the starting node.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Number of edges walked (`len() - 1` for a non-empty path).
    pub fn edge_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&N> {
        self.steps.first().map(|s| &s.node)
    }

    pub fn terminal(&self) -> Option<&N> {
        self.steps.last().map(|s| &s.node)
    }

    pub fn steps(&self) -> &[Step<N, L>] {
        &self.steps
    }

    /// `(label, node)` for every step after the start.
    pub fn hops(&self) -> impl Iterator<Item = (&L, &N)> {
        self.steps
            .iter()
            .filter_map(|s| s.label.as_ref().map(|label| (label, &s.node)))
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.hops().map(|(label, _)| label)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.steps.iter().map(|s| &s.node)
    }

    pub fn into_steps(self) -> Vec<Step<N, L>> {
        self.steps
    }
}

/// Labeled directed graph with an inverse label registry for reciprocal
/// edge insertion.
#[derive(Debug, Clone)]
pub struct LabeledGraph<N, L> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    /// Per-node edges in insertion order; `None` marks an unknown destination.
    edges: Vec<Vec<(L, Option<usize>)>>,
    inverses: InverseLabelRegistry<L>,
}

impl<N, L> Default for LabeledGraph<N, L> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            inverses: InverseLabelRegistry::default(),
        }
    }
}

impl<N, L> LabeledGraph<N, L>
where
    N: Clone + Eq + Hash,
    L: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inverses(inverses: InverseLabelRegistry<L>) -> Self {
        Self {
            inverses,
            ..Self::default()
        }
    }

    pub fn inverses(&self) -> &InverseLabelRegistry<L> {
        &self.inverses
    }

    pub fn inverses_mut(&mut self) -> &mut InverseLabelRegistry<L> {
        &mut self.inverses
    }

    /// Ensure `id` exists. Existing nodes keep their edges.
    pub fn add_node(&mut self, id: N) {
        self.slot(id);
    }

    fn slot(&mut self, id: N) -> usize {
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(id.clone());
        self.edges.push(Vec::new());
        self.index.insert(id, slot);
        slot
    }

    fn set_edge(&mut self, from: usize, label: L, to: Option<usize>) {
        let edges = &mut self.edges[from];
        match edges.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = to,
            None => edges.push((label, to)),
        }
    }

    /// Set `from --label--> to`, creating either node if absent. A prior
    /// destination for `(from, label)` is overwritten.
    pub fn add_edge(&mut self, from: N, label: L, to: N) {
        let from = self.slot(from);
        let to = self.slot(to);
        self.set_edge(from, label, Some(to));
    }

    /// Record that `from` has an exit `label` whose destination is not known.
    pub fn add_unknown_edge(&mut self, from: N, label: L) {
        let from = self.slot(from);
        self.set_edge(from, label, None);
    }

    pub fn contains(&self, id: &N) -> bool {
        self.index.contains_key(id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of edges, unknown ones included.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// Copy of the node's `label -> destination` mapping, in insertion order.
    /// Empty for a node that is not in the graph.
    pub fn get_neighbors(&self, id: &N) -> Vec<(L, Destination<N>)> {
        match self.index.get(id) {
            Some(&slot) => self.edges[slot]
                .iter()
                .map(|(label, to)| (label.clone(), self.destination(*to)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Destination of a single edge, if the node has that label.
    pub fn neighbor(&self, id: &N, label: &L) -> Option<Destination<N>> {
        let slot = *self.index.get(id)?;
        self.edges[slot]
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, to)| self.destination(*to))
    }

    pub fn has_label(&self, id: &N, label: &L) -> bool {
        self.index
            .get(id)
            .map(|&slot| self.edges[slot].iter().any(|(l, _)| l == label))
            .unwrap_or(false)
    }

    /// Labels at `id` whose destination is still unknown.
    pub fn unknown_labels(&self, id: &N) -> Vec<L> {
        match self.index.get(id) {
            Some(&slot) => self.edges[slot]
                .iter()
                .filter(|(_, to)| to.is_none())
                .map(|(label, _)| label.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_unknown_exit(&self, id: &N) -> bool {
        self.index
            .get(id)
            .map(|&slot| self.edges[slot].iter().any(|(_, to)| to.is_none()))
            .unwrap_or(false)
    }

    /// Iterate the known `(label, node)` neighbors without allocating a map.
    pub(crate) fn known_neighbors<'a>(
        &'a self,
        id: &N,
    ) -> impl Iterator<Item = (&'a L, &'a N)> + 'a {
        let edges: &'a [(L, Option<usize>)] = match self.index.get(id) {
            Some(&slot) => &self.edges[slot],
            None => &[],
        };
        edges
            .iter()
            .filter_map(move |(label, to)| to.map(move |slot| (label, &self.nodes[slot])))
    }

    fn destination(&self, to: Option<usize>) -> Destination<N> {
        match to {
            Some(slot) => Destination::Known(self.nodes[slot].clone()),
            None => Destination::Unknown,
        }
    }
}

impl<N, L> LabeledGraph<N, L>
where
    N: Clone + Eq + Hash,
    L: Clone + Eq + Hash + Debug,
{
    /// Add `from --label--> to` and the reciprocal `to --inverse(label)--> from`.
    ///
    /// Fails without touching the graph when `label` has no registered
    /// inverse.
    pub fn add_both_edges(&mut self, from: N, label: L, to: N) -> Result<()> {
        let inverse = self
            .inverses
            .inverse(&label)
            .cloned()
            .ok_or_else(|| GraphwalkError::UnregisteredInverseLabel(format!("{:?}", label)))?;
        self.add_edge(from.clone(), label, to.clone());
        self.add_edge(to, inverse, from);
        Ok(())
    }

    /// Build a graph from bulk node and edge lists.
    ///
    /// With `use_inverses`, edges whose label has a registered inverse are
    /// inserted with their reciprocal; all others are inserted one-way.
    pub fn from_edges<NI, EI>(
        nodes: NI,
        edges: EI,
        inverses: InverseLabelRegistry<L>,
        use_inverses: bool,
    ) -> Result<Self>
    where
        NI: IntoIterator<Item = N>,
        EI: IntoIterator<Item = (N, L, N)>,
    {
        let mut graph = Self::with_inverses(inverses);
        for node in nodes {
            graph.add_node(node);
        }
        for (from, label, to) in edges {
            if use_inverses && graph.inverses.contains(&label) {
                graph.add_both_edges(from, label, to)?;
            } else {
                graph.add_edge(from, label, to);
            }
        }
        Ok(graph)
    }
}
