//! Replay a move sequence against the ground truth and count coverage.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use crate::explore::{Agent, World};
use crate::Result;

/// Outcome of replaying a traversal from the world's starting room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalReport {
    pub moves: usize,
    pub visited: usize,
    pub total: usize,
    pub passed: bool,
}

impl TraversalReport {
    pub fn unvisited(&self) -> usize {
        self.total.saturating_sub(self.visited)
    }
}

impl fmt::Display for TraversalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            write!(
                f,
                "TESTS PASSED: {} moves, {} rooms visited",
                self.moves, self.visited
            )
        } else {
            write!(
                f,
                "TESTS FAILED: INCOMPLETE TRAVERSAL ({} unvisited rooms)",
                self.unvisited()
            )
        }
    }
}

/// Walk `labels` on a fresh copy of `world`, starting from its starting
/// room, and report how many distinct rooms were seen. Fails on the first
/// label that is not an exit.
pub fn verify_traversal<N, L>(world: &World<N, L>, labels: &[L]) -> Result<TraversalReport>
where
    N: Clone + Eq + Hash + fmt::Debug,
    L: Clone + Eq + Hash + fmt::Debug,
{
    let mut replay = world.clone();
    replay.reset();

    let mut visited = HashSet::new();
    visited.insert(replay.current_position());
    for label in labels {
        visited.insert(replay.travel(label)?);
    }

    let total = world.room_count();
    Ok(TraversalReport {
        moves: labels.len(),
        visited: visited.len(),
        total,
        passed: visited.len() == total,
    })
}
