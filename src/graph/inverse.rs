//! Inverse label registry and the cardinal direction alphabet.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GraphwalkError, Result};

/// Bijective mapping between opposite labels.
///
/// Every registration is stored in both directions, so
/// `inverse(inverse(l)) == l` holds for every registered label.
#[derive(Debug, Clone)]
pub struct InverseLabelRegistry<L> {
    pairs: HashMap<L, L>,
}

impl<L> Default for InverseLabelRegistry<L> {
    fn default() -> Self {
        Self {
            pairs: HashMap::new(),
        }
    }
}

impl<L: Clone + Eq + Hash + fmt::Debug> InverseLabelRegistry<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(a, b)` pairs, registering both directions.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, L)>,
    {
        let mut registry = Self::new();
        for (a, b) in pairs {
            registry.add_pair(a, b)?;
        }
        Ok(registry)
    }

    /// Register `a` and `b` as each other's inverse.
    ///
    /// Re-registering an existing pair is a no-op. Pairing a label that is
    /// already bound to a different inverse is rejected, since it would break
    /// symmetry.
    pub fn add_pair(&mut self, a: L, b: L) -> Result<()> {
        for (label, wanted) in [(&a, &b), (&b, &a)] {
            if let Some(existing) = self.pairs.get(label) {
                if existing != wanted {
                    return Err(GraphwalkError::InvalidInput(format!(
                        "label {:?} already has inverse {:?}, cannot pair with {:?}",
                        label, existing, wanted
                    )));
                }
            }
        }
        self.pairs.insert(a.clone(), b.clone());
        self.pairs.insert(b, a);
        Ok(())
    }

    /// The label that undoes `label`, if one is registered.
    pub fn inverse(&self, label: &L) -> Option<&L> {
        self.pairs.get(label)
    }

    pub fn contains(&self, label: &L) -> bool {
        self.pairs.contains_key(label)
    }

    /// Number of registered labels (each side of a pair counts once).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.pairs.keys()
    }
}

/// Compass direction used as an edge label in room graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "w")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::South => "s",
            Direction::East => "e",
            Direction::West => "w",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = GraphwalkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            other => Err(GraphwalkError::InvalidInput(format!(
                "unknown direction: {}",
                other
            ))),
        }
    }
}

impl InverseLabelRegistry<Direction> {
    /// The `(n, s)`, `(e, w)` registry used by room graphs.
    pub fn cardinal() -> Self {
        let mut pairs = HashMap::with_capacity(4);
        pairs.insert(Direction::North, Direction::South);
        pairs.insert(Direction::South, Direction::North);
        pairs.insert(Direction::East, Direction::West);
        pairs.insert(Direction::West, Direction::East);
        Self { pairs }
    }
}
