//! Circular doubly linked list procedures
//!
//! `head->prev` is the tail and `tail->next` is the head, so both ends are
//! reached in O(1). The same ring doubles as a heap root list: `insertRoot`
//! splices a node in beside `curr`, which then serves as the minimum pointer.

use super::{unsupported, walk, Tracer};
use crate::engine::errors::EngineError;
use crate::engine::variant::{OperationKind, Outcome, Params, Variant};
use crate::memory::{NodeId, Value};
use crate::snapshot::VarValue;

pub(crate) const OPERATIONS: &[OperationKind] = &[
    OperationKind::InsertHead,
    OperationKind::InsertTail,
    OperationKind::DeleteHead,
    OperationKind::DeleteTail,
    OperationKind::DeleteValue,
    OperationKind::Traverse,
    OperationKind::Search,
    OperationKind::Advance,
    OperationKind::Retreat,
    OperationKind::InsertRoot,
];

const INSERT_HEAD: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    newNode->next = newNode->prev = newNode;",
    "    head = tail = newNode;",
    "    return;",
    "}",
    "newNode->next = head;",
    "newNode->prev = tail;",
    "tail->next = newNode;",
    "head->prev = newNode;",
    "head = newNode;",
];

const INSERT_TAIL: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    newNode->next = newNode->prev = newNode;",
    "    head = tail = newNode;",
    "    return;",
    "}",
    "newNode->next = head;",
    "newNode->prev = tail;",
    "tail->next = newNode;",
    "head->prev = newNode;",
    "tail = newNode;",
];

const DELETE_HEAD: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = head;",
    "if (head == tail) {",
    "    head = tail = curr = NULL;",
    "} else {",
    "    head = head->next;",
    "    head->prev = tail;",
    "    tail->next = head;",
    "    if (curr == temp) curr = head;",
    "}",
    "free(temp);",
];

const DELETE_TAIL: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = tail;",
    "if (head == tail) {",
    "    head = tail = curr = NULL;",
    "} else {",
    "    tail = tail->prev;",
    "    tail->next = head;",
    "    head->prev = tail;",
    "    if (curr == temp) curr = tail;",
    "}",
    "free(temp);",
];

const DELETE_VALUE: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = head;",
    "do {",
    "    if (temp->data == value) break;",
    "    temp = temp->next;",
    "} while (temp != head);",
    "if (temp->data != value) return;",
    "if (head == tail) {",
    "    head = tail = curr = NULL;",
    "} else {",
    "    temp->prev->next = temp->next;",
    "    temp->next->prev = temp->prev;",
    "    if (temp == head) head = temp->next;",
    "    if (temp == tail) tail = temp->prev;",
    "    if (curr == temp) curr = temp->next;",
    "}",
    "free(temp);",
];

const INSERT_ROOT: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    newNode->next = newNode->prev = newNode;",
    "    head = tail = min = newNode;",
    "    return;",
    "}",
    "if (min == NULL) min = head;",
    "newNode->next = min->next;",
    "newNode->prev = min;",
    "min->next->prev = newNode;",
    "min->next = newNode;",
    "if (min == tail) tail = newNode;",
    "if (newNode->data < min->data) min = newNode;",
];

pub(crate) fn listing(op: OperationKind) -> Option<&'static [&'static str]> {
    Some(match op {
        OperationKind::InsertHead => INSERT_HEAD,
        OperationKind::InsertTail => INSERT_TAIL,
        OperationKind::DeleteHead => DELETE_HEAD,
        OperationKind::DeleteTail => DELETE_TAIL,
        OperationKind::DeleteValue => DELETE_VALUE,
        OperationKind::Traverse => walk::CIRCULAR_TRAVERSE,
        OperationKind::Search => walk::CIRCULAR_SEARCH,
        OperationKind::Advance => walk::ADVANCE,
        OperationKind::Retreat => walk::RETREAT,
        OperationKind::InsertRoot => INSERT_ROOT,
        _ => return None,
    })
}

pub(crate) fn run(
    t: &mut Tracer<'_>,
    op: OperationKind,
    params: &Params,
) -> Result<Outcome, EngineError> {
    match op {
        OperationKind::InsertHead => insert(t, params.require_value(op)?, true),
        OperationKind::InsertTail => insert(t, params.require_value(op)?, false),
        OperationKind::DeleteHead => delete_end(t, true),
        OperationKind::DeleteTail => delete_end(t, false),
        OperationKind::DeleteValue => delete_value(t, params.require_value(op)?),
        OperationKind::Traverse => walk::circular_traverse(t),
        OperationKind::Search => walk::circular_search(t, params.require_value(op)?),
        OperationKind::Advance => walk::advance(t),
        OperationKind::Retreat => walk::retreat(t),
        OperationKind::InsertRoot => insert_root(t, params.require_value(op)?),
        _ => Err(unsupported(Variant::CircularDoubly, op)),
    }
}

fn allocate(t: &mut Tracer<'_>, value: Value) -> NodeId {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let new_node = t.mem.create_node(value.clone());
    t.ptr("newNode", Some(new_node));
    t.step(0, format!("Allocate newNode holding {}", value));
    new_node
}

/// Empty ring: newNode becomes a ring of one and both ends point at it
fn seed(t: &mut Tracer<'_>, new_node: NodeId) -> Result<(), EngineError> {
    t.mem.set_next(new_node, Some(new_node))?;
    t.mem.set_prev(new_node, Some(new_node))?;
    t.step(2, "List is empty: newNode->next = newNode->prev = newNode");
    t.mem.set_head(Some(new_node));
    t.mem.set_tail(Some(new_node));
    t.sync_ends();
    Ok(())
}

fn insert(t: &mut Tracer<'_>, value: Value, at_head: bool) -> Result<Outcome, EngineError> {
    let new_node = allocate(t, value);
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        seed(t, new_node)?;
        t.step(3, "head = tail = newNode. Insertion complete");
        return Ok(Outcome::Done);
    };

    t.mem.set_next(new_node, Some(head))?;
    t.step(6, format!("newNode->next = head {}", t.label(Some(head))));

    t.mem.set_prev(new_node, Some(tail))?;
    t.step(7, format!("newNode->prev = tail {}", t.label(Some(tail))));

    t.mem.set_next(tail, Some(new_node))?;
    t.step(8, "tail->next = newNode");

    t.mem.set_prev(head, Some(new_node))?;
    t.step(9, "head->prev = newNode");

    if at_head {
        t.mem.set_head(Some(new_node));
        t.sync_ends();
        t.step(10, "head = newNode. Insertion complete");
    } else {
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(10, "tail = newNode. Insertion complete");
    }
    Ok(Outcome::Done)
}

fn delete_end(t: &mut Tracer<'_>, at_head: bool) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };
    let temp = if at_head { head } else { tail };
    t.ptr("temp", Some(temp));
    t.step(
        1,
        format!(
            "temp = {} {}",
            if at_head { "head" } else { "tail" },
            t.label(Some(temp))
        ),
    );

    if head == tail {
        t.mem.set_head(None);
        t.mem.set_tail(None);
        t.mem.set_curr(None);
        t.sync_ends();
        t.ptr("curr", None);
        t.step(3, "Only one node: head = tail = curr = NULL");
    } else if at_head {
        let new_head = t.mem.next_of(head)?;
        t.mem.set_head(new_head);
        t.sync_ends();
        t.step(5, format!("head moves to {}", t.label(new_head)));

        if let Some(h) = new_head {
            t.mem.set_prev(h, Some(tail))?;
        }
        t.step(6, "head->prev = tail");

        t.mem.set_next(tail, new_head)?;
        t.step(7, "tail->next = head closes the ring again");

        if t.mem.curr() == Some(temp) {
            t.mem.set_curr(new_head);
            t.ptr("curr", new_head);
            t.step(8, format!("curr pointed at temp, move it to {}", t.label(new_head)));
        }
    } else {
        let new_tail = t.mem.prev_of(tail)?;
        t.mem.set_tail(new_tail);
        t.sync_ends();
        t.step(5, format!("tail moves back to {} in O(1) via prev", t.label(new_tail)));

        if let Some(tl) = new_tail {
            t.mem.set_next(tl, Some(head))?;
        }
        t.step(6, "tail->next = head");

        t.mem.set_prev(head, new_tail)?;
        t.step(7, "head->prev = tail closes the ring again");

        if t.mem.curr() == Some(temp) {
            t.mem.set_curr(new_tail);
            t.ptr("curr", new_tail);
            t.step(8, format!("curr pointed at temp, move it to {}", t.label(new_tail)));
        }
    }

    let label = t.label(Some(temp));
    t.mem.delete_node(temp)?;
    t.step(10, format!("free(temp): {} released. Deletion complete", label));
    Ok(Outcome::Done)
}

fn delete_value(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };

    let mut temp = head;
    t.ptr("temp", Some(temp));
    t.step(1, "temp = head");

    let found = loop {
        if *t.mem.value_of(temp)? == value {
            t.step(3, format!("{} matches", t.label(Some(temp))));
            break true;
        }
        let next = t.mem.next_of(temp)?.unwrap_or(head);
        if next == head {
            break false;
        }
        temp = next;
        t.ptr("temp", Some(temp));
        t.step(4, format!("Not {}, move temp to {}", value, t.label(Some(temp))));
    };

    if !found {
        t.step(6, format!("Back at head. {} not found", value));
        return Ok(Outcome::NoOp);
    }

    if head == tail {
        t.mem.set_head(None);
        t.mem.set_tail(None);
        t.mem.set_curr(None);
        t.sync_ends();
        t.ptr("curr", None);
        t.step(8, "Only one node: head = tail = curr = NULL");
    } else {
        let prev = t.mem.prev_of(temp)?;
        let next = t.mem.next_of(temp)?;
        if let Some(p) = prev {
            t.mem.set_next(p, next)?;
        }
        t.step(10, format!("{} ->next = {}", t.label(prev), t.label(next)));

        if let Some(n) = next {
            t.mem.set_prev(n, prev)?;
        }
        t.step(11, format!("{} ->prev = {}", t.label(next), t.label(prev)));

        if temp == head {
            t.mem.set_head(next);
            t.sync_ends();
            t.step(12, format!("temp was the head, head = {}", t.label(next)));
        }
        if temp == tail {
            t.mem.set_tail(prev);
            t.sync_ends();
            t.step(13, format!("temp was the tail, tail = {}", t.label(prev)));
        }
        if t.mem.curr() == Some(temp) {
            t.mem.set_curr(next);
            t.ptr("curr", next);
            t.step(14, format!("curr pointed at temp, move it to {}", t.label(next)));
        }
    }

    t.mem.delete_node(temp)?;
    t.step(16, format!("free(temp): [{}] released. Deletion complete", value));
    Ok(Outcome::Done)
}

fn insert_root(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.ptr("min", t.mem.curr());
    let new_node = allocate(t, value.clone());
    let Some(head) = t.mem.head() else {
        seed(t, new_node)?;
        t.mem.set_curr(Some(new_node));
        t.ptr("min", Some(new_node));
        t.step(3, "head = tail = min = newNode. Insertion complete");
        return Ok(Outcome::Done);
    };

    let min = match t.mem.curr() {
        Some(min) => min,
        None => {
            t.mem.set_curr(Some(head));
            t.ptr("min", Some(head));
            t.step(6, format!("min was NULL, start from head {}", t.label(Some(head))));
            head
        }
    };

    let after = t.mem.next_of(min)?;
    t.mem.set_next(new_node, after)?;
    t.step(7, format!("newNode->next = min->next ({})", t.label(after)));

    t.mem.set_prev(new_node, Some(min))?;
    t.step(8, format!("newNode->prev = min {}", t.label(Some(min))));

    if let Some(a) = after {
        t.mem.set_prev(a, Some(new_node))?;
    }
    t.step(9, format!("{} ->prev = newNode", t.label(after)));

    t.mem.set_next(min, Some(new_node))?;
    t.step(10, "min->next = newNode");

    if t.mem.tail() == Some(min) {
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(11, "min was the tail, so tail = newNode");
    }

    if value < *t.mem.value_of(min)? {
        t.mem.set_curr(Some(new_node));
        t.ptr("min", Some(new_node));
        t.step(12, format!("{} is smaller than the old minimum: min = newNode. Insertion complete", value));
    } else {
        t.step(12, format!("min {} stays the minimum. Insertion complete", t.label(Some(min))));
    }
    Ok(Outcome::Done)
}
