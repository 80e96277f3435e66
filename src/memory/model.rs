//! Node arena implementation
//!
//! [`MemoryModel`] owns the live list: every node ever allocated in the
//! current session and the three named references (`head`, `tail`, `curr`).
//! Node ids are handed out monotonically and never reused until
//! [`MemoryModel::reset`].
//!
//! # Error Handling
//!
//! Pointer writes and reads against an id that is not in the arena return
//! [`MemoryError::InvalidReference`]. The list algorithms never do this on a
//! well-formed list, so the error marks a simulator bug rather than a user
//! mistake.

use super::value::Value;
use super::{NODE_ADDRESS_START, NODE_SIZE};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Opaque node identity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Simulated address of this node, for display
    pub fn address(self) -> u64 {
        NODE_ADDRESS_START + self.0 * NODE_SIZE
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.address())
    }
}

/// A single list node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub value: Value,
    pub next: Option<NodeId>,
    /// Only written by doubly linked variants
    pub prev: Option<NodeId>,
}

/// Errors raised by the arena
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("invalid reference: node {0} is not allocated")]
    InvalidReference(NodeId),
}

/// A deep copy of the arena at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    #[serde(serialize_with = "serialize_by_id")]
    pub nodes: FxHashMap<NodeId, Node>,
    pub head: Option<NodeId>,
    pub tail: Option<NodeId>,
    pub curr: Option<NodeId>,
}

/// Emit nodes in allocation order so dumps are stable across runs
fn serialize_by_id<S: Serializer>(
    nodes: &FxHashMap<NodeId, Node>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    nodes.iter().collect::<BTreeMap<_, _>>().serialize(serializer)
}

impl MemoryState {
    /// Number of allocated nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Value of the node a reference points at, if any
    pub fn value_at(&self, id: Option<NodeId>) -> Option<&Value> {
        id.and_then(|id| self.nodes.get(&id)).map(|n| &n.value)
    }

    /// Node ids ordered by allocation
    pub fn sorted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// The live node arena
#[derive(Debug, Clone, Default)]
pub struct MemoryModel {
    state: MemoryState,
    next_id: u64,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node with no links; references are left alone
    pub fn create_node(&mut self, value: Value) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.state.nodes.insert(
            id,
            Node {
                value,
                next: None,
                prev: None,
            },
        );
        id
    }

    /// Overwrite the `next` field of a node
    pub fn set_next(&mut self, id: NodeId, target: Option<NodeId>) -> Result<(), MemoryError> {
        self.node_mut(id)?.next = target;
        Ok(())
    }

    /// Overwrite the `prev` field of a node
    pub fn set_prev(&mut self, id: NodeId, target: Option<NodeId>) -> Result<(), MemoryError> {
        self.node_mut(id)?.prev = target;
        Ok(())
    }

    /// Free a node. Pointers into it are not repaired.
    pub fn delete_node(&mut self, id: NodeId) -> Result<Node, MemoryError> {
        self.state
            .nodes
            .remove(&id)
            .ok_or(MemoryError::InvalidReference(id))
    }

    pub fn set_head(&mut self, id: Option<NodeId>) {
        self.state.head = id;
    }

    pub fn set_tail(&mut self, id: Option<NodeId>) {
        self.state.tail = id;
    }

    pub fn set_curr(&mut self, id: Option<NodeId>) {
        self.state.curr = id;
    }

    pub fn head(&self) -> Option<NodeId> {
        self.state.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.state.tail
    }

    pub fn curr(&self) -> Option<NodeId> {
        self.state.curr
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Get a node (returns error if it was never allocated or has been freed)
    pub fn node(&self, id: NodeId) -> Result<&Node, MemoryError> {
        self.state
            .nodes
            .get(&id)
            .ok_or(MemoryError::InvalidReference(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, MemoryError> {
        self.state
            .nodes
            .get_mut(&id)
            .ok_or(MemoryError::InvalidReference(id))
    }

    pub fn next_of(&self, id: NodeId) -> Result<Option<NodeId>, MemoryError> {
        Ok(self.node(id)?.next)
    }

    pub fn prev_of(&self, id: NodeId) -> Result<Option<NodeId>, MemoryError> {
        Ok(self.node(id)?.prev)
    }

    pub fn value_of(&self, id: NodeId) -> Result<&Value, MemoryError> {
        Ok(&self.node(id)?.value)
    }

    /// Borrow the live state without copying
    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    /// Deep copy of the current state
    pub fn get_state(&self) -> MemoryState {
        self.state.clone()
    }

    /// Drop every node and reference and restart id allocation from zero
    pub fn reset(&mut self) {
        self.state = MemoryState::default();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node_does_not_touch_references() {
        let mut mem = MemoryModel::new();
        let a = mem.create_node(Value::Int(1));
        let b = mem.create_node(Value::Int(2));

        assert_ne!(a, b);
        assert_eq!(mem.head(), None);
        assert_eq!(mem.tail(), None);
        assert_eq!(mem.node(a).unwrap().next, None);
        assert_eq!(mem.node(b).unwrap().prev, None);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut mem = MemoryModel::new();
        let a = mem.create_node(Value::Int(1));
        mem.set_head(Some(a));
        let before = mem.get_state();

        let b = mem.create_node(Value::Int(2));
        mem.set_next(a, Some(b)).unwrap();
        mem.set_head(Some(b));

        assert_eq!(before.len(), 1);
        assert_eq!(before.head, Some(a));
        assert_eq!(before.node(a).unwrap().next, None);
    }

    #[test]
    fn test_delete_leaves_dangling_pointers() {
        let mut mem = MemoryModel::new();
        let a = mem.create_node(Value::Int(1));
        let b = mem.create_node(Value::Int(2));
        mem.set_next(a, Some(b)).unwrap();

        let freed = mem.delete_node(b).unwrap();
        assert_eq!(freed.value, Value::Int(2));
        assert_eq!(mem.node(a).unwrap().next, Some(b));
        assert_eq!(mem.delete_node(b), Err(MemoryError::InvalidReference(b)));
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let mut mem = MemoryModel::new();
        let ghost = NodeId(99);
        assert_eq!(
            mem.set_next(ghost, None),
            Err(MemoryError::InvalidReference(ghost))
        );
        assert!(mem.set_prev(ghost, None).is_err());
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let mut mem = MemoryModel::new();
        mem.create_node(Value::Int(1));
        let second = mem.create_node(Value::Int(2));
        mem.set_curr(Some(second));

        mem.reset();
        assert_eq!(mem.get_state(), MemoryState::default());
        assert_eq!(mem.create_node(Value::Int(3)), NodeId(0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut mem = MemoryModel::new();
        mem.create_node(Value::Int(1));
        mem.reset();
        let once = mem.get_state();
        mem.reset();
        assert_eq!(mem.get_state(), once);
    }

    #[test]
    fn test_node_address_display() {
        assert_eq!(NodeId(0).to_string(), "0x1000");
        assert_eq!(NodeId(2).to_string(), "0x1040");
    }

    #[test]
    fn test_state_serializes_nodes_in_id_order() {
        let mut mem = MemoryModel::new();
        let ids: Vec<NodeId> = (0..40).map(|v| mem.create_node(Value::Int(v))).collect();
        mem.delete_node(ids[7]).unwrap();

        let json = serde_json::to_string(&mem.get_state()).unwrap();
        let offsets: Vec<usize> = ids
            .iter()
            .filter(|id| **id != ids[7])
            .map(|id| json.find(&format!("\"{}\":{{", id.0)).unwrap())
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{}", json);

        let back: MemoryState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mem.get_state());
    }
}
