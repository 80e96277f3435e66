//! Execution engine
//!
//! The [`Engine`] validates a request, dispatches it to the procedure for the
//! chosen [`Variant`], and hands back the recorded
//! [`Step`](crate::snapshot::Step)s. Memory persists between operations so
//! that a sequence of requests builds one list.

pub mod errors;
pub mod executor;
pub mod ops;
pub mod variant;

pub use errors::EngineError;
pub use executor::Engine;
pub use ops::listing;
pub use variant::{OperationKind, Outcome, Params, Variant};
