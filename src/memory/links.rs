//! Link walking and structural checks
//!
//! These helpers read a [`MemoryState`] and never mutate it. Every walk is
//! bounded by the node count, so a corrupted snapshot (an accidental cycle in
//! a linear list, a circular list that never returns to `head`) terminates
//! instead of spinning.

use super::model::{MemoryState, NodeId};
use super::value::Value;
use crate::engine::Variant;
use thiserror::Error;

/// A structural defect found in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkViolation {
    #[error("{field} of {from} points at freed node {target}")]
    Dangling {
        from: String,
        field: &'static str,
        target: NodeId,
    },

    #[error("head and tail disagree about emptiness")]
    HeadTailMismatch,

    #[error("list does not end after {expected} nodes")]
    Unterminated { expected: usize },

    #[error("circular list does not return to head after {expected} hops")]
    NotClosed { expected: usize },

    #[error("{reached} of {expected} nodes reachable from head")]
    Unreachable { reached: usize, expected: usize },

    #[error("tail is not the last node of the walk")]
    TailNotLast,

    #[error("{node}.next is {next} but {next}.prev is not {node}")]
    BrokenBackLink { node: NodeId, next: NodeId },

    #[error("head.prev must be {expected}")]
    HeadPrev { expected: String },
}

impl MemoryState {
    /// Follow `next` from `head`, stopping at null, at a return to `head`, or
    /// after visiting every allocated node once
    pub fn walk_forward(&self) -> Vec<NodeId> {
        self.walk(self.head, |id| self.node(id).and_then(|n| n.next))
    }

    /// Follow `prev` from `tail` under the same bounds as [`Self::walk_forward`]
    pub fn walk_backward(&self) -> Vec<NodeId> {
        self.walk(self.tail, |id| self.node(id).and_then(|n| n.prev))
    }

    fn walk(&self, start: Option<NodeId>, step: impl Fn(NodeId) -> Option<NodeId>) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut cursor = start;
        while let Some(id) = cursor {
            if order.len() >= self.len() || !self.nodes.contains_key(&id) {
                break;
            }
            order.push(id);
            cursor = step(id).filter(|&next| Some(next) != start);
        }
        order
    }

    /// Values in list order
    pub fn values(&self) -> Vec<Value> {
        self.walk_forward()
            .into_iter()
            .filter_map(|id| self.node(id).map(|n| n.value.clone()))
            .collect()
    }

    /// Check every structural invariant that a settled list of `variant` holds
    pub fn check_links(&self, variant: Variant) -> Result<(), LinkViolation> {
        self.check_dangling()?;

        if self.head.is_none() != self.tail.is_none() {
            return Err(LinkViolation::HeadTailMismatch);
        }
        let Some(head) = self.head else {
            return Ok(());
        };

        let expected = self.len();
        let mut hops = 0;
        let mut cursor = Some(head);
        let mut last = head;
        while let Some(id) = cursor {
            if hops == expected || (hops > 0 && id == head) {
                break;
            }
            last = id;
            hops += 1;
            cursor = self.node(id).and_then(|n| n.next);
        }

        if variant.is_circular() {
            if cursor != Some(head) || hops < expected {
                return Err(if hops < expected {
                    LinkViolation::Unreachable {
                        reached: hops,
                        expected,
                    }
                } else {
                    LinkViolation::NotClosed { expected }
                });
            }
        } else if cursor.is_some() {
            return Err(LinkViolation::Unterminated { expected });
        } else if hops < expected {
            return Err(LinkViolation::Unreachable {
                reached: hops,
                expected,
            });
        }

        if self.tail != Some(last) {
            return Err(LinkViolation::TailNotLast);
        }

        if variant.is_doubly() {
            self.check_back_links(variant, head, last)?;
        }
        Ok(())
    }

    fn check_dangling(&self) -> Result<(), LinkViolation> {
        let named = [("head", self.head), ("tail", self.tail), ("curr", self.curr)];
        for (field, target) in named {
            if let Some(target) = target.filter(|t| !self.nodes.contains_key(t)) {
                return Err(LinkViolation::Dangling {
                    from: "list".to_string(),
                    field,
                    target,
                });
            }
        }

        for (id, node) in &self.nodes {
            for (field, target) in [("next", node.next), ("prev", node.prev)] {
                if let Some(target) = target.filter(|t| !self.nodes.contains_key(t)) {
                    return Err(LinkViolation::Dangling {
                        from: id.to_string(),
                        field,
                        target,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_back_links(
        &self,
        variant: Variant,
        head: NodeId,
        tail: NodeId,
    ) -> Result<(), LinkViolation> {
        for (&id, node) in &self.nodes {
            if let Some(next) = node.next {
                let back = self.node(next).and_then(|n| n.prev);
                if back != Some(id) {
                    return Err(LinkViolation::BrokenBackLink { node: id, next });
                }
            }
        }

        let head_prev = self.node(head).and_then(|n| n.prev);
        if variant.is_circular() {
            if head_prev != Some(tail) {
                return Err(LinkViolation::HeadPrev {
                    expected: "tail".to_string(),
                });
            }
        } else if head_prev.is_some() {
            return Err(LinkViolation::HeadPrev {
                expected: "NULL".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::model::MemoryModel;

    fn linear(values: &[i64], doubly: bool) -> MemoryModel {
        let mut mem = MemoryModel::new();
        let mut prev = None;
        for &v in values {
            let id = mem.create_node(Value::Int(v));
            match prev {
                Some(p) => {
                    mem.set_next(p, Some(id)).unwrap();
                    if doubly {
                        mem.set_prev(id, Some(p)).unwrap();
                    }
                }
                None => mem.set_head(Some(id)),
            }
            mem.set_tail(Some(id));
            prev = Some(id);
        }
        mem
    }

    #[test]
    fn test_walk_and_values() {
        let mem = linear(&[1, 2, 3], true);
        let state = mem.get_state();
        assert_eq!(state.values(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let mut backward = state.walk_backward();
        backward.reverse();
        assert_eq!(backward, state.walk_forward());
        assert!(state.check_links(Variant::Doubly).is_ok());
        assert!(state.check_links(Variant::Singly).is_ok());
    }

    #[test]
    fn test_circular_walk_stops_after_one_cycle() {
        let mut mem = linear(&[1, 2, 3], false);
        let (head, tail) = (mem.head().unwrap(), mem.tail().unwrap());
        mem.set_next(tail, Some(head)).unwrap();

        let state = mem.get_state();
        assert_eq!(state.walk_forward().len(), 3);
        assert!(state.check_links(Variant::CircularSingly).is_ok());
        assert_eq!(
            state.check_links(Variant::Singly),
            Err(LinkViolation::Unterminated { expected: 3 })
        );
    }

    #[test]
    fn test_linear_list_is_not_circular() {
        let state = linear(&[1, 2], false).get_state();
        assert_eq!(
            state.check_links(Variant::CircularSingly),
            Err(LinkViolation::NotClosed { expected: 2 })
        );
    }

    #[test]
    fn test_detects_dangling_reference() {
        let mut mem = linear(&[1, 2], false);
        let tail = mem.tail().unwrap();
        mem.delete_node(tail).unwrap();
        assert!(matches!(
            mem.get_state().check_links(Variant::Singly),
            Err(LinkViolation::Dangling { .. })
        ));
    }

    #[test]
    fn test_detects_broken_back_link() {
        let mut mem = linear(&[1, 2], true);
        let tail = mem.tail().unwrap();
        mem.set_prev(tail, None).unwrap();
        assert!(matches!(
            mem.get_state().check_links(Variant::Doubly),
            Err(LinkViolation::BrokenBackLink { .. })
        ));
    }

    #[test]
    fn test_empty_state_is_consistent() {
        let state = MemoryState::default();
        assert!(state.walk_forward().is_empty());
        for variant in Variant::ALL {
            assert!(state.check_links(variant).is_ok());
        }
    }
}
