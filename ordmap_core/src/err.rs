use thiserror::Error;

/// A broken structural invariant, reported by the tree checker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("root node is red")]
    RedRoot,
    #[error("red node at depth {depth} has a red child")]
    RedRedEdge { depth: usize },
    #[error("black height mismatch at depth {depth}: left {left}, right {right}")]
    BlackHeightMismatch {
        depth: usize,
        left: usize,
        right: usize,
    },
    #[error("keys out of order at depth {depth}")]
    OutOfOrder { depth: usize },
}

pub type Result<T> = std::result::Result<T, InvariantViolation>;
