//! Request and result vocabulary of the engine
//!
//! - [`Variant`]: the four list topologies
//! - [`OperationKind`]: every procedure name the engine knows
//! - [`Params`]: optional `value` / `position` arguments
//! - [`Outcome`]: what a finished operation reports besides its steps

use super::errors::EngineError;
use super::ops;
use crate::memory::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// List topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Singly,
    Doubly,
    CircularSingly,
    CircularDoubly,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Singly,
        Variant::Doubly,
        Variant::CircularSingly,
        Variant::CircularDoubly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Singly => "singly",
            Variant::Doubly => "doubly",
            Variant::CircularSingly => "circular-singly",
            Variant::CircularDoubly => "circular-doubly",
        }
    }

    pub fn is_circular(self) -> bool {
        matches!(self, Variant::CircularSingly | Variant::CircularDoubly)
    }

    pub fn is_doubly(self) -> bool {
        matches!(self, Variant::Doubly | Variant::CircularDoubly)
    }

    /// Operations defined for this topology
    pub fn operations(self) -> &'static [OperationKind] {
        match self {
            Variant::Singly => ops::singly::OPERATIONS,
            Variant::Doubly => ops::doubly::OPERATIONS,
            Variant::CircularSingly => ops::circular_singly::OPERATIONS,
            Variant::CircularDoubly => ops::circular_doubly::OPERATIONS,
        }
    }

    pub fn supports(self, op: OperationKind) -> bool {
        self.operations().contains(&op)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "singly" => Ok(Variant::Singly),
            "doubly" => Ok(Variant::Doubly),
            "circular-singly" | "circularsingly" => Ok(Variant::CircularSingly),
            "circular-doubly" | "circulardoubly" => Ok(Variant::CircularDoubly),
            _ => Err(EngineError::UnsupportedVariant(s.to_string())),
        }
    }
}

/// Named list procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    InsertHead,
    InsertTail,
    InsertAt,
    DeleteHead,
    DeleteTail,
    DeleteValue,
    Traverse,
    Search,
    Reverse,
    /// Browser history: insert after `curr`, dropping forward entries
    Visit,
    Back,
    Forward,
    /// Move `curr` one node along `next`
    Advance,
    /// Move `curr` one node along `prev`
    Retreat,
    /// Root-list insertion next to the minimum
    InsertRoot,
}

impl OperationKind {
    pub const ALL: [OperationKind; 15] = [
        OperationKind::InsertHead,
        OperationKind::InsertTail,
        OperationKind::InsertAt,
        OperationKind::DeleteHead,
        OperationKind::DeleteTail,
        OperationKind::DeleteValue,
        OperationKind::Traverse,
        OperationKind::Search,
        OperationKind::Reverse,
        OperationKind::Visit,
        OperationKind::Back,
        OperationKind::Forward,
        OperationKind::Advance,
        OperationKind::Retreat,
        OperationKind::InsertRoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OperationKind::InsertHead => "insertHead",
            OperationKind::InsertTail => "insertTail",
            OperationKind::InsertAt => "insertAt",
            OperationKind::DeleteHead => "deleteHead",
            OperationKind::DeleteTail => "deleteTail",
            OperationKind::DeleteValue => "deleteValue",
            OperationKind::Traverse => "traverse",
            OperationKind::Search => "search",
            OperationKind::Reverse => "reverse",
            OperationKind::Visit => "visit",
            OperationKind::Back => "back",
            OperationKind::Forward => "forward",
            OperationKind::Advance => "advance",
            OperationKind::Retreat => "retreat",
            OperationKind::InsertRoot => "insertRoot",
        }
    }

    pub fn needs_value(self) -> bool {
        matches!(
            self,
            OperationKind::InsertHead
                | OperationKind::InsertTail
                | OperationKind::InsertAt
                | OperationKind::DeleteValue
                | OperationKind::Search
                | OperationKind::Visit
                | OperationKind::InsertRoot
        )
    }

    pub fn needs_position(self) -> bool {
        matches!(self, OperationKind::InsertAt)
    }

    /// Look up a name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional operation arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub value: Option<Value>,
    pub position: Option<usize>,
}

impl Params {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Params {
            value: Some(value.into()),
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Reject a request whose required arguments are missing
    pub fn validate(&self, op: OperationKind) -> Result<(), EngineError> {
        if op.needs_value() && self.value.is_none() {
            return Err(EngineError::MissingParameter {
                operation: op.name(),
                parameter: "value",
            });
        }
        if op.needs_position() && self.position.is_none() {
            return Err(EngineError::MissingParameter {
                operation: op.name(),
                parameter: "position",
            });
        }
        Ok(())
    }

    pub(crate) fn require_value(&self, op: OperationKind) -> Result<Value, EngineError> {
        self.value.clone().ok_or(EngineError::MissingParameter {
            operation: op.name(),
            parameter: "value",
        })
    }

    pub(crate) fn require_position(&self, op: OperationKind) -> Result<usize, EngineError> {
        self.position.ok_or(EngineError::MissingParameter {
            operation: op.name(),
            parameter: "position",
        })
    }
}

/// Result of a completed operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The list changed (or the cursor moved) as requested
    Done,
    /// Empty list, missing value, nothing to move to: no mutation happened
    NoOp,
    Found(usize),
    NotFound,
    Visited(Vec<Value>),
}

impl Outcome {
    /// Search result as an index, `-1` when nothing matched
    pub fn index(&self) -> Option<i64> {
        match self {
            Outcome::Found(i) => Some(*i as i64),
            Outcome::NotFound => Some(-1),
            _ => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Outcome::NoOp | Outcome::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(variant.name().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!("Circular_Doubly".parse::<Variant>().unwrap(), Variant::CircularDoubly);
    }

    #[test]
    fn test_unknown_variant() {
        let err = "skip-list".parse::<Variant>().unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedVariant(ref v) if v == "skip-list"));
    }

    #[test]
    fn test_operation_lookup() {
        assert_eq!(OperationKind::from_name("insertHead"), Some(OperationKind::InsertHead));
        assert_eq!(OperationKind::from_name("DELETETAIL"), Some(OperationKind::DeleteTail));
        assert_eq!(OperationKind::from_name("pop"), None);
    }

    #[test]
    fn test_every_operation_belongs_to_some_variant() {
        for op in OperationKind::ALL {
            assert!(
                Variant::ALL.iter().any(|v| v.supports(op)),
                "{} is not reachable",
                op
            );
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(Params::none().validate(OperationKind::Traverse).is_ok());
        assert!(Params::none().validate(OperationKind::Search).is_err());
        assert!(Params::value(1).validate(OperationKind::InsertAt).is_err());
        assert!(Params::value(1).at(0).validate(OperationKind::InsertAt).is_ok());
    }

    #[test]
    fn test_outcome_index_sentinel() {
        assert_eq!(Outcome::Found(2).index(), Some(2));
        assert_eq!(Outcome::NotFound.index(), Some(-1));
        assert_eq!(Outcome::Done.index(), None);
    }
}
