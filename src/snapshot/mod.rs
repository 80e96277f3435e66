// Step recording for replaying list algorithms

use crate::memory::{MemoryState, NodeId, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable value as shown next to the listing
///
/// Serialized adjacently tagged: pointers, payloads and indices can all be
/// bare integers in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum VarValue {
    /// A `Node*`; `None` is NULL
    Pointer(Option<NodeId>),
    Value(Value),
    Index(i64),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::Pointer(Some(id)) => write!(f, "{}", id),
            VarValue::Pointer(None) => write!(f, "NULL"),
            VarValue::Value(v) => write!(f, "{}", v),
            VarValue::Index(n) => write!(f, "{}", n),
        }
    }
}

/// Ordered bag of named variables
///
/// Each operation grows its own set of names as the algorithm declares them;
/// there is no fixed schema. Setting an existing name overwrites it in place
/// so display order follows declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    entries: Vec<(String, VarValue)>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: VarValue) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn set_ptr(&mut self, name: &str, id: Option<NodeId>) {
        self.set(name, VarValue::Pointer(id));
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Pointer held by `name`; `None` both when unset and when NULL
    pub fn pointer(&self, name: &str) -> Option<NodeId> {
        match self.get(name) {
            Some(VarValue::Pointer(id)) => *id,
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One recorded instant of an algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub index: usize,
    /// Zero-based line of the operation's reference listing
    pub active_line: usize,
    pub variables: Variables,
    pub memory_state: MemoryState,
    pub description: String,
}

/// Append-only log of the steps produced by one operation
#[derive(Debug, Clone, Default)]
pub struct StepLog {
    steps: Vec<Step>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the log
    pub fn add_step(
        &mut self,
        active_line: usize,
        variables: Variables,
        memory_state: MemoryState,
        description: impl Into<String>,
    ) {
        let step = Step {
            index: self.steps.len(),
            active_line,
            variables,
            memory_state,
            description: description.into(),
        };
        tracing::trace!(
            index = step.index,
            line = step.active_line,
            "{}",
            step.description
        );
        self.steps.push(step);
    }

    /// Get all steps in recorded order
    pub fn get_steps(&self) -> &[Step] {
        &self.steps
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryModel;

    #[test]
    fn test_indices_are_sequential() {
        let mut log = StepLog::new();
        let mem = MemoryModel::new();
        for line in [0, 2, 1] {
            log.add_step(line, Variables::new(), mem.get_state(), "step");
        }

        let indices: Vec<usize> = log.get_steps().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(log.get(1).map(|s| s.active_line), Some(2));
    }

    #[test]
    fn test_clear_restarts_indices() {
        let mut log = StepLog::new();
        let mem = MemoryModel::new();
        log.add_step(0, Variables::new(), mem.get_state(), "a");
        log.add_step(1, Variables::new(), mem.get_state(), "b");
        log.clear();
        assert!(log.is_empty());

        log.add_step(3, Variables::new(), mem.get_state(), "c");
        assert_eq!(log.get_steps()[0].index, 0);
    }

    #[test]
    fn test_variables_keep_declaration_order() {
        let mut vars = Variables::new();
        vars.set_ptr("head", None);
        vars.set("value", VarValue::Value(Value::Int(5)));
        vars.set_ptr("head", Some(NodeId(0)));

        let names: Vec<&str> = vars.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["head", "value"]);
        assert_eq!(vars.pointer("head"), Some(NodeId(0)));
        assert_eq!(vars.get("value").map(|v| v.to_string()), Some("5".into()));
    }

    #[test]
    fn test_step_serializes_with_camel_case_keys() {
        let mut log = StepLog::new();
        let mut mem = MemoryModel::new();
        let id = mem.create_node(Value::Int(5));
        mem.set_head(Some(id));
        let mut vars = Variables::new();
        vars.set_ptr("newNode", Some(id));
        log.add_step(0, vars, mem.get_state(), "Create node");

        let json = serde_json::to_value(&log.get_steps()[0]).unwrap();
        assert_eq!(json["activeLine"], 0);
        assert_eq!(json["variables"][0][0], "newNode");
        assert_eq!(json["variables"][0][1]["kind"], "pointer");
        assert_eq!(json["variables"][0][1]["value"], 0);
        assert_eq!(json["memoryState"]["head"], 0);
        assert_eq!(json["memoryState"]["nodes"]["0"]["value"], 5);
    }

    #[test]
    fn test_step_json_keeps_variable_kinds() {
        let mut log = StepLog::new();
        let mut mem = MemoryModel::new();
        let id = mem.create_node(Value::Int(5));
        mem.set_head(Some(id));
        let mut vars = Variables::new();
        vars.set("value", VarValue::Value(Value::Int(5)));
        vars.set("position", VarValue::Index(5));
        vars.set_ptr("newNode", Some(NodeId(5)));
        vars.set_ptr("temp", None);
        vars.set("label", VarValue::Value(Value::Text("5".into())));
        log.add_step(1, vars, mem.get_state(), "Create node");

        let step = &log.get_steps()[0];
        let json = serde_json::to_string(step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, step);
        assert_eq!(back.variables.get("value"), Some(&VarValue::Value(Value::Int(5))));
        assert_eq!(back.variables.get("position"), Some(&VarValue::Index(5)));
    }
}
