use thiserror::Error;

use crate::graph::EntityKind;

/// Core error type shared across payseed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A table received a second record with an id it already holds.
    #[error("duplicate id '{id}' in table {kind}")]
    DuplicateId { kind: EntityKind, id: String },
    /// The dataset violates internal invariants.
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    /// The entity dependency graph contains a cycle.
    #[error("dependency cycle between: {0:?}")]
    Cycle(Vec<EntityKind>),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by payseed crates.
pub type Result<T> = std::result::Result<T, Error>;
