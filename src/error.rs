use thiserror::Error;

/// Main error type for Graphwalk
#[derive(Error, Debug)]
pub enum GraphwalkError {
    /// `add_both_edges` was asked to mirror a label with no registered inverse
    #[error("Unregistered inverse label: {0}")]
    UnregisteredInverseLabel(String),

    /// The agent refused a move (label is not an exit of the current node)
    #[error("Invalid move: no exit {label} from {node}")]
    InvalidMove { label: String, node: String },

    /// Backtracking found no reachable unknown exit while rooms remain unvisited
    #[error("Exploration incomplete: discovered {discovered} of {expected} rooms")]
    ExplorationIncomplete { discovered: usize, expected: usize },

    /// The physical move ceiling was reached before coverage completed
    #[error("Move limit of {limit} exceeded: discovered {discovered} of {expected} rooms")]
    MoveLimitExceeded {
        limit: usize,
        discovered: usize,
        expected: usize,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using GraphwalkError
pub type Result<T> = std::result::Result<T, GraphwalkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphwalkError::InvalidInput("Test error".to_string());
        assert!(err.to_string().contains("Invalid input"));
        assert!(err.to_string().contains("Test error"));
    }

    #[test]
    fn test_invalid_move_display() {
        let err = GraphwalkError::InvalidMove {
            label: "n".to_string(),
            node: "7".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid move: no exit n from 7");
    }

    #[test]
    fn test_exploration_incomplete_display() {
        let err = GraphwalkError::ExplorationIncomplete {
            discovered: 3,
            expected: 4,
        };
        assert!(err.to_string().contains("3 of 4"));
    }
}
