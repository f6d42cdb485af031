//! Online exploration of an unknown graph by a physically moving agent.
//!
//! The explorer only ever sees the exits of the node it stands on. It keeps
//! what it has learned in a private memory graph, walks unknown exits when
//! there are any, and otherwise backtracks along the memory graph to the
//! nearest node that still has one.

mod verify;
mod world;

pub use verify::{verify_traversal, TraversalReport};
pub use world::{World, MAX_GRID_ROOMS};

use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::graph::{InverseLabelRegistry, LabeledGraph, Order, Path, Step};
use crate::{GraphwalkError, Result};

/// The capability the explorer needs from whatever is being explored.
pub trait Agent {
    type Node: Clone + Eq + Hash + Debug;
    type Label: Clone + Eq + Hash + Debug;

    fn current_position(&self) -> Self::Node;

    /// Exit labels visible from `node`. Only the node the agent stands on is
    /// guaranteed to report anything.
    fn exits_at(&self, node: &Self::Node) -> Vec<Self::Label>;

    /// Move along `label` and return the node arrived at. Fails with
    /// `InvalidMove` if `label` is not an exit of the current node.
    fn travel(&mut self, label: &Self::Label) -> Result<Self::Node>;
}

/// Explorer tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerOptions {
    /// Seed for the exit chooser; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Move ceiling is `rooms * labels * move_limit_factor`.
    pub move_limit_factor: usize,
    /// Frontier used when planning backtrack routes.
    pub order: Order,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            seed: None,
            move_limit_factor: 4,
            order: Order::Breadth,
        }
    }
}

/// Drives an [`Agent`] until every room has been seen.
pub struct Explorer<A: Agent, R = StdRng> {
    agent: A,
    memory: LabeledGraph<A::Node, A::Label>,
    room_count: usize,
    move_limit: usize,
    order: Order,
    rng: R,
    history: Vec<Step<A::Node, A::Label>>,
}

impl<A: Agent> Explorer<A, StdRng> {
    /// Create an explorer with the random source described by `options`.
    pub fn new(
        agent: A,
        inverses: InverseLabelRegistry<A::Label>,
        room_count: usize,
        options: &ExplorerOptions,
    ) -> Result<Self> {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(agent, inverses, room_count, options, rng)
    }
}

impl<A: Agent, R: Rng> Explorer<A, R> {
    /// Create an explorer with a caller-supplied random source.
    pub fn with_rng(
        agent: A,
        inverses: InverseLabelRegistry<A::Label>,
        room_count: usize,
        options: &ExplorerOptions,
        rng: R,
    ) -> Result<Self> {
        if room_count == 0 {
            return Err(GraphwalkError::InvalidInput(
                "room count must be greater than 0".to_string(),
            ));
        }
        if options.move_limit_factor == 0 {
            return Err(GraphwalkError::InvalidInput(
                "move_limit_factor must be greater than 0".to_string(),
            ));
        }
        let move_limit = room_count
            .saturating_mul(inverses.len().max(1))
            .saturating_mul(options.move_limit_factor);

        Ok(Self {
            agent,
            memory: LabeledGraph::with_inverses(inverses),
            room_count,
            move_limit,
            order: options.order,
            rng,
            history: Vec::new(),
        })
    }

    /// Explore until every room is known.
    ///
    /// Returns the physical history: the starting node with no label, then
    /// one step per move. Starts a fresh session each time it is called.
    pub fn run(&mut self) -> Result<Vec<Step<A::Node, A::Label>>> {
        let inverses = self.memory.inverses().clone();
        self.memory = LabeledGraph::with_inverses(inverses);
        self.history.clear();

        let start = self.agent.current_position();
        info!(
            "Exploring from {:?}: {} rooms expected, move limit {}",
            start, self.room_count, self.move_limit
        );
        self.memory.add_node(start.clone());
        self.history.push(Step::start(start.clone()));
        self.sense(&start);

        let mut current = start;
        while !self.coverage_complete() {
            let unknown = self.memory.unknown_labels(&current);
            if let Some(label) = unknown.choose(&mut self.rng).cloned() {
                current = self.step(&current, &label)?;
                continue;
            }

            let route = self.plan_route(&current);
            if route.is_empty() {
                return Err(GraphwalkError::ExplorationIncomplete {
                    discovered: self.memory.len(),
                    expected: self.room_count,
                });
            }
            debug!(
                "Backtracking {} moves from {:?} to {:?}",
                route.edge_count(),
                current,
                route.terminal()
            );
            current = self.replay(current, &route)?;
        }

        info!(
            "Exploration complete: {} rooms in {} moves",
            self.memory.len(),
            self.moves()
        );
        Ok(self.history.clone())
    }

    /// True once the memory graph holds as many rooms as the world has.
    pub fn coverage_complete(&self) -> bool {
        self.memory.len() >= self.room_count
    }

    /// Physical moves made so far in the current session.
    pub fn moves(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    pub fn move_limit(&self) -> usize {
        self.move_limit
    }

    pub fn memory(&self) -> &LabeledGraph<A::Node, A::Label> {
        &self.memory
    }

    pub fn history(&self) -> &[Step<A::Node, A::Label>] {
        &self.history
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn into_agent(self) -> A {
        self.agent
    }

    /// Merge the exits visible at `node` into memory as unknown edges.
    /// Edges already recorded are left alone.
    fn sense(&mut self, node: &A::Node) {
        self.memory.add_node(node.clone());
        let exits = self.agent.exits_at(node);
        let mut fresh = 0;
        for label in exits {
            if !self.memory.has_label(node, &label) {
                self.memory.add_unknown_edge(node.clone(), label);
                fresh += 1;
            }
        }
        debug!("Sensed {:?}: {} new exits", node, fresh);
    }

    /// Shortest known route to a room that still has an unknown exit.
    fn plan_route(&self, from: &A::Node) -> Path<A::Node, A::Label> {
        let memory = &self.memory;
        memory.search(from, self.order, |c| memory.has_unknown_exit(c.node))
    }

    /// Walk `route` move by move. Stops early if the world disagrees with
    /// memory about where a move leads, so the caller can re-plan.
    fn replay(
        &mut self,
        mut current: A::Node,
        route: &Path<A::Node, A::Label>,
    ) -> Result<A::Node> {
        for (label, expected) in route.hops() {
            let arrived = self.step(&current, label)?;
            if arrived != *expected {
                warn!(
                    "Graph drift: {:?} from {:?} led to {:?}, memory said {:?}",
                    label, current, arrived, expected
                );
                return Ok(arrived);
            }
            current = arrived;
        }
        Ok(current)
    }

    /// One physical move, recorded in memory together with its reciprocal.
    fn step(&mut self, from: &A::Node, label: &A::Label) -> Result<A::Node> {
        let moves = self.moves();
        if moves >= self.move_limit {
            return Err(GraphwalkError::MoveLimitExceeded {
                limit: self.move_limit,
                discovered: self.memory.len(),
                expected: self.room_count,
            });
        }
        if moves == self.move_limit * 3 / 4 {
            warn!(
                "{} of {} moves used with {} of {} rooms found",
                moves,
                self.move_limit,
                self.memory.len(),
                self.room_count
            );
        }

        // Checked before moving so a failure leaves the agent where history says it is.
        if !self.memory.inverses().contains(label) {
            return Err(GraphwalkError::UnregisteredInverseLabel(format!("{:?}", label)));
        }
        let to = self.agent.travel(label)?;
        self.memory.add_both_edges(from.clone(), label.clone(), to.clone())?;
        self.history.push(Step::via(label.clone(), to.clone()));
        debug!("Moved {:?} from {:?} to {:?}", label, from, to);
        self.sense(&to);
        Ok(to)
    }
}
