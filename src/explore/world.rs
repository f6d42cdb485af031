//! Ground-truth world: a fully known graph with an agent standing in it.

use std::fmt::Debug;
use std::hash::Hash;

use crate::explore::Agent;
use crate::graph::{Destination, Direction, InverseLabelRegistry, LabeledGraph};
use crate::{GraphwalkError, Result};

/// A fully known graph plus the agent's current position. Only the exits of
/// the room the agent stands in are visible through [`Agent`].
#[derive(Debug, Clone)]
pub struct World<N, L> {
    graph: LabeledGraph<N, L>,
    start: N,
    position: N,
}

impl<N, L> World<N, L>
where
    N: Clone + Eq + Hash + Debug,
    L: Clone + Eq + Hash + Debug,
{
    pub fn new(graph: LabeledGraph<N, L>, start: N) -> Result<Self> {
        if !graph.contains(&start) {
            return Err(GraphwalkError::InvalidInput(format!(
                "starting room {:?} is not in the world",
                start
            )));
        }
        Ok(Self {
            graph,
            position: start.clone(),
            start,
        })
    }

    pub fn graph(&self) -> &LabeledGraph<N, L> {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut LabeledGraph<N, L> {
        &mut self.graph
    }

    pub fn start(&self) -> &N {
        &self.start
    }

    pub fn position(&self) -> &N {
        &self.position
    }

    pub fn room_count(&self) -> usize {
        self.graph.len()
    }

    /// Put the agent back in the starting room.
    pub fn reset(&mut self) {
        self.position = self.start.clone();
    }
}

impl<N, L> Agent for World<N, L>
where
    N: Clone + Eq + Hash + Debug,
    L: Clone + Eq + Hash + Debug,
{
    type Node = N;
    type Label = L;

    fn current_position(&self) -> N {
        self.position.clone()
    }

    fn exits_at(&self, node: &N) -> Vec<L> {
        if *node != self.position {
            return Vec::new();
        }
        self.graph
            .get_neighbors(node)
            .into_iter()
            .filter(|(_, dest)| !dest.is_unknown())
            .map(|(label, _)| label)
            .collect()
    }

    fn travel(&mut self, label: &L) -> Result<N> {
        match self.graph.neighbor(&self.position, label) {
            Some(Destination::Known(next)) => {
                self.position = next.clone();
                Ok(next)
            }
            _ => Err(GraphwalkError::InvalidMove {
                label: format!("{:?}", label),
                node: format!("{:?}", self.position),
            }),
        }
    }
}

/// Largest number of rooms [`World::grid`] will build.
pub const MAX_GRID_ROOMS: u32 = 1_000_000;

impl World<u32, Direction> {
    /// A `rows x cols` grid of rooms numbered from 1 in row-major order,
    /// every neighbor pair joined both ways. Starts in room 1.
    pub fn grid(rows: u32, cols: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GraphwalkError::InvalidInput(format!(
                "grid must have at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        let rooms = rows
            .checked_mul(cols)
            .filter(|&rooms| rooms <= MAX_GRID_ROOMS)
            .ok_or_else(|| {
                GraphwalkError::InvalidInput(format!(
                    "grid of {}x{} exceeds {} rooms",
                    rows, cols, MAX_GRID_ROOMS
                ))
            })?;
        let room = |r: u32, c: u32| r * cols + c + 1;
        let mut edges = Vec::new();
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    edges.push((room(r, c), Direction::East, room(r, c + 1)));
                }
                if r + 1 < rows {
                    edges.push((room(r, c), Direction::South, room(r + 1, c)));
                }
            }
        }
        let graph = LabeledGraph::from_edges(
            1..=rooms,
            edges,
            InverseLabelRegistry::cardinal(),
            true,
        )?;
        Self::new(graph, 1)
    }

    /// The nine-room sample: a ring around room 5, which hangs off room 6.
    ///
    /// ```text
    /// 1 - 2 - 3
    /// |       |
    /// 4   5 - 6
    /// |       |
    /// 7 - 8 - 9
    /// ```
    pub fn sample() -> Result<Self> {
        use Direction::{East, South};
        let edges = [
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
        let graph =
            LabeledGraph::from_edges(1..=9, edges, InverseLabelRegistry::cardinal(), true)?;
        Self::new(graph, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_grid_shape() {
        let world = World::grid(2, 3).unwrap();
        assert_eq!(world.room_count(), 6);
        // 2 rows * 2 horizontal + 3 vertical links, each stored both ways
        assert_eq!(world.graph().edge_count(), 14);
        assert_eq!(
            world.graph().neighbor(&2, &South),
            Some(Destination::Known(5))
        );
        assert_eq!(world.graph().neighbor(&5, &North), Some(Destination::Known(2)));
    }

    #[test]
    fn test_grid_rejects_empty() {
        assert!(World::grid(0, 3).is_err());
        assert!(World::grid(3, 0).is_err());
    }

    #[test]
    fn test_grid_rejects_oversized() {
        assert!(matches!(
            World::grid(70_000, 70_000),
            Err(GraphwalkError::InvalidInput(_))
        ));
        assert!(matches!(
            World::grid(u32::MAX, 2),
            Err(GraphwalkError::InvalidInput(_))
        ));
        assert!(World::grid(1, MAX_GRID_ROOMS + 1).is_err());
    }

    #[test]
    fn test_exits_are_local() {
        let world = World::sample().unwrap();
        let mut exits = world.exits_at(&1);
        exits.sort_by_key(|d| d.as_str());
        assert_eq!(exits, vec![East, South]);
        assert!(world.exits_at(&5).is_empty());
    }

    #[test]
    fn test_travel_and_reset() {
        let mut world = World::sample().unwrap();
        assert_eq!(world.travel(&East).unwrap(), 2);
        assert_eq!(world.travel(&East).unwrap(), 3);
        assert_eq!(world.travel(&South).unwrap(), 6);
        assert_eq!(world.travel(&West).unwrap(), 5);
        assert_eq!(world.exits_at(&5), vec![East]);
        world.reset();
        assert_eq!(world.current_position(), 1);
    }

    #[test]
    fn test_invalid_move() {
        let mut world = World::sample().unwrap();
        let err = world.travel(&North).unwrap_err();
        assert!(matches!(err, GraphwalkError::InvalidMove { .. }));
        assert_eq!(world.position(), &1);
    }

    #[test]
    fn test_start_must_exist() {
        let graph: LabeledGraph<u32, Direction> = LabeledGraph::new();
        assert!(World::new(graph, 1).is_err());
    }
}
