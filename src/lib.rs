pub mod config;
pub mod error;
pub mod explore;
pub mod graph;

pub use config::Config;
pub use error::{GraphwalkError, Result};
pub use explore::{verify_traversal, Agent, Explorer, ExplorerOptions, TraversalReport, World};
pub use graph::{
    Destination, Direction, Frontier, InverseLabelRegistry, LabeledGraph, Order, Path, Queue,
    Stack, Step,
};
