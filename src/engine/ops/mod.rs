//! List procedures, one module per topology
//!
//! Every procedure pairs a reference listing (`&[&str]`, one C-like source
//! line per entry) with code that performs the same assignments in the same
//! order against the [`MemoryModel`]. After each line that changes something
//! worth drawing, the procedure records a [`Step`](crate::snapshot::Step)
//! whose `active_line` indexes into that listing.
//!
//! Procedures repair neighbour pointers themselves before calling
//! `free`; the memory model never does it for them.

pub mod circular_doubly;
pub mod circular_singly;
pub mod doubly;
pub mod singly;
pub mod walk;

use super::errors::EngineError;
use super::variant::{OperationKind, Outcome, Params, Variant};
use crate::memory::{MemoryModel, NodeId, Value};
use crate::snapshot::{StepLog, VarValue, Variables};

/// Recording context handed to every procedure
pub(crate) struct Tracer<'a> {
    pub mem: &'a mut MemoryModel,
    log: &'a mut StepLog,
    vars: Variables,
}

impl<'a> Tracer<'a> {
    pub fn new(mem: &'a mut MemoryModel, log: &'a mut StepLog) -> Self {
        Tracer {
            mem,
            log,
            vars: Variables::new(),
        }
    }

    /// Bind a pointer variable
    pub fn ptr(&mut self, name: &str, id: Option<NodeId>) {
        self.vars.set_ptr(name, id);
    }

    pub fn set(&mut self, name: &str, value: VarValue) {
        self.vars.set(name, value);
    }

    /// Refresh the `head` and `tail` variables from memory
    pub fn sync_ends(&mut self) {
        let (head, tail) = (self.mem.head(), self.mem.tail());
        self.vars.set_ptr("head", head);
        self.vars.set_ptr("tail", tail);
    }

    /// Record the current instant
    pub fn step(&mut self, line: usize, description: impl Into<String>) {
        self.log
            .add_step(line, self.vars.clone(), self.mem.get_state(), description);
    }

    /// Short label for descriptions: the node's value in brackets, or NULL
    pub fn label(&self, id: Option<NodeId>) -> String {
        match id {
            Some(id) => match self.mem.value_of(id) {
                Ok(value) => format!("[{}]", value),
                Err(_) => id.to_string(),
            },
            None => "NULL".to_string(),
        }
    }

    pub fn value_of(&self, id: NodeId) -> Result<Value, EngineError> {
        Ok(self.mem.value_of(id)?.clone())
    }
}

/// Run `op` for `variant`; the request has already been validated
pub(crate) fn run(
    tracer: &mut Tracer<'_>,
    variant: Variant,
    op: OperationKind,
    params: &Params,
) -> Result<Outcome, EngineError> {
    match variant {
        Variant::Singly => singly::run(tracer, op, params),
        Variant::Doubly => doubly::run(tracer, op, params),
        Variant::CircularSingly => circular_singly::run(tracer, op, params),
        Variant::CircularDoubly => circular_doubly::run(tracer, op, params),
    }
}

/// Reference listing shown alongside the steps of `op`
pub fn listing(variant: Variant, op: OperationKind) -> Option<&'static [&'static str]> {
    match variant {
        Variant::Singly => singly::listing(op),
        Variant::Doubly => doubly::listing(op),
        Variant::CircularSingly => circular_singly::listing(op),
        Variant::CircularDoubly => circular_doubly::listing(op),
    }
}

pub(crate) fn unsupported(variant: Variant, op: OperationKind) -> EngineError {
    EngineError::UnsupportedOperation {
        variant: variant.name().to_string(),
        operation: op.name().to_string(),
    }
}
