// Execution engine facade

use super::errors::EngineError;
use super::ops::{self, Tracer};
use super::variant::{OperationKind, Outcome, Params, Variant};
use crate::cursor::PlaybackCursor;
use crate::memory::{MemoryModel, MemoryState};
use crate::snapshot::{Step, StepLog};

/// Owns the simulated list for a session and replays operations on it
#[derive(Debug, Default)]
pub struct Engine {
    /// Live memory, persists across operations until `reset`
    memory: MemoryModel,

    /// Steps of the most recent operation
    log: StepLog,

    /// What the most recent operation reported
    outcome: Option<Outcome>,

    /// Topology the current memory was built as
    variant: Option<Variant>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch by name, the way a UI or script hands requests in
    pub fn execute_operation(
        &mut self,
        variant: &str,
        operation: &str,
        params: Params,
    ) -> Result<&[Step], EngineError> {
        let variant: Variant = variant.parse()?;
        let op = OperationKind::from_name(operation).ok_or_else(|| {
            EngineError::UnsupportedOperation {
                variant: variant.name().to_string(),
                operation: operation.to_string(),
            }
        })?;
        self.execute(variant, op, params)
    }

    /// Run one operation to completion and return its steps
    ///
    /// Validation happens before anything is mutated: an error leaves memory
    /// and the previous step log untouched.
    pub fn execute(
        &mut self,
        variant: Variant,
        op: OperationKind,
        params: Params,
    ) -> Result<&[Step], EngineError> {
        if !variant.supports(op) {
            return Err(ops::unsupported(variant, op));
        }
        params.validate(op)?;

        if self.variant.is_some_and(|active| active != variant) && !self.memory.is_empty() {
            tracing::debug!(
                from = ?self.variant,
                to = %variant,
                "switching list variant, clearing memory"
            );
            self.memory.reset();
        }
        self.variant = Some(variant);

        self.log.clear();
        self.outcome = None;

        let outcome = {
            let mut tracer = Tracer::new(&mut self.memory, &mut self.log);
            ops::run(&mut tracer, variant, op, &params)?
        };

        debug_assert!(
            self.memory.state().check_links(variant).is_ok(),
            "{} {} left an inconsistent list: {:?}",
            variant,
            op,
            self.memory.state().check_links(variant)
        );

        if outcome.is_noop() {
            tracing::debug!(%variant, %op, "operation finished without mutation");
        }
        tracing::debug!(
            %variant,
            %op,
            steps = self.log.len(),
            nodes = self.memory.len(),
            "operation complete"
        );

        self.outcome = Some(outcome);
        Ok(self.log.get_steps())
    }

    /// Clear memory and the step log
    pub fn reset(&mut self) {
        self.memory.reset();
        self.log.clear();
        self.outcome = None;
        self.variant = None;
    }

    /// Snapshot of current memory, usable before any operation has run
    pub fn get_memory_state(&self) -> MemoryState {
        self.memory.get_state()
    }

    /// Steps of the most recent operation
    pub fn steps(&self) -> &[Step] {
        self.log.get_steps()
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Topology the current memory belongs to
    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    /// Fresh playback cursor over a copy of the latest step log
    pub fn cursor(&self) -> PlaybackCursor {
        PlaybackCursor::new(self.log.get_steps().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Value;

    #[test]
    fn test_validation_happens_before_mutation() {
        let mut engine = Engine::new();
        engine
            .execute(Variant::Singly, OperationKind::InsertTail, Params::value(1))
            .unwrap();
        let before = engine.get_memory_state();
        let steps_before = engine.steps().len();

        let err = engine
            .execute(Variant::Singly, OperationKind::InsertHead, Params::none())
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingParameter { parameter: "value", .. }));
        assert_eq!(engine.get_memory_state(), before);
        assert_eq!(engine.steps().len(), steps_before);
    }

    #[test]
    fn test_unsupported_operation_for_variant() {
        let mut engine = Engine::new();
        let err = engine
            .execute(Variant::CircularSingly, OperationKind::Reverse, Params::none())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnsupportedOperation {
                variant: "circular-singly".into(),
                operation: "reverse".into(),
            }
        );
    }

    #[test]
    fn test_switching_variant_starts_a_new_list() {
        let mut engine = Engine::new();
        engine
            .execute(Variant::Singly, OperationKind::InsertTail, Params::value(1))
            .unwrap();
        engine
            .execute(Variant::CircularSingly, OperationKind::InsertTail, Params::value(2))
            .unwrap();

        let state = engine.get_memory_state();
        assert_eq!(state.values(), vec![Value::Int(2)]);
        assert_eq!(engine.variant(), Some(Variant::CircularSingly));
    }

    #[test]
    fn test_reset_clears_log_and_outcome() {
        let mut engine = Engine::new();
        engine
            .execute(Variant::Doubly, OperationKind::InsertHead, Params::value(3))
            .unwrap();
        assert!(engine.last_outcome().is_some());

        engine.reset();
        assert!(engine.steps().is_empty());
        assert!(engine.last_outcome().is_none());
        assert_eq!(engine.get_memory_state(), MemoryState::default());
    }
}
