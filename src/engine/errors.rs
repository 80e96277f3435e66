//! Error types for the execution engine
//!
//! Every [`EngineError`] except [`EngineError::Memory`] is raised while the
//! request is being validated, before the memory model is touched. Empty lists,
//! missing values and single-node reversals are not errors: they finish with a
//! descriptive terminal step and [`Outcome::NoOp`](super::Outcome::NoOp).

use crate::memory::MemoryError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The list variant name is not one of the four topologies
    #[error("unsupported list variant '{0}'")]
    UnsupportedVariant(String),

    /// The operation is unknown, or not defined for this variant
    #[error("operation '{operation}' is not supported for {variant} lists")]
    UnsupportedOperation { variant: String, operation: String },

    /// A required argument was not supplied
    #[error("operation '{operation}' requires a {parameter}")]
    MissingParameter {
        operation: &'static str,
        parameter: &'static str,
    },

    /// A procedure touched a node that is not allocated
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
