//! Error types for the Strata engine.

use thiserror::Error;

/// Errors reported by the document model that owns the cell tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Unknown cell: {cell}")]
    UnknownCell { cell: String },

    #[error("Child index {index} out of range for parent with {len} children")]
    InvalidIndex { index: usize, len: usize },

    #[error("Cell {child} is not a child of {parent}")]
    NotAChild { parent: String, child: String },

    #[error("Update batch rejected on commit: {reason}")]
    CommitRejected { reason: String },
}

/// Errors during layout computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

/// Errors while parsing a cell style string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("Invalid style entry at offset {offset}: {entry:?}")]
    InvalidEntry { entry: String, offset: usize },
}
