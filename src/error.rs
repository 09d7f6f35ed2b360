//! Typed errors raised by the pick list engine.
//!
//! Failures coming from host collaborators (candidate fetch, ranking
//! strategies, input loading) travel as [`anyhow::Error`]; the variants here
//! cover misuse of the engine's own registries.

use thiserror::Error;

/// Errors raised by the column registry and pick list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    /// A column id was queried that was never registered
    #[error("no column registered with id '{0}'")]
    UnknownColumn(String),

    /// A column id was registered twice
    #[error("column id '{0}' is already registered")]
    DuplicateColumn(String),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, PickError>;
