//! Circular singly linked list procedures
//!
//! `tail->next` always closes the ring back to `head`, which keeps both
//! insertions O(1). Without `prev` pointers the tail's predecessor still has to
//! be found by walking the ring. `curr` is the running task for round-robin
//! scheduling and moves with `advance`.

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
];

const INSERT_HEAD: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    newNode->next = newNode;",
    "    head = tail = newNode;",
    "    return;",
    "}",
    "newNode->next = head;",
    "tail->next = newNode;",
    "head = newNode;",
];

const INSERT_TAIL: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    newNode->next = newNode;",
    "    head = tail = newNode;",
    "    return;",
    "}",
    "newNode->next = head;",
    "tail->next = newNode;",
    "tail = newNode;",
];

const DELETE_HEAD: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = head;",
    "if (head == tail) {",
    "    head = tail = curr = NULL;",
    "} else {",
    "    head = head->next;",
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
    "    Node* prev = head;",
    "    while (prev->next != tail)",
    "        prev = prev->next;",
    "    prev->next = head;",
    "    tail = prev;",
    "    if (curr == temp) curr = head;",
    "}",
    "free(temp);",
];

const DELETE_VALUE: &[&str] = &[
    "if (head == NULL) return;",
    "Node* prev = tail;",
    "Node* temp = head;",
    "do {",
    "    if (temp->data == value) break;",
    "    prev = temp;",
    "    temp = temp->next;",
    "} while (temp != head);",
    "if (temp->data != value) return;",
    "if (head == tail) {",
    "    head = tail = curr = NULL;",
    "} else {",
    "    prev->next = temp->next;",
    "    if (temp == head) head = temp->next;",
    "    if (temp == tail) tail = prev;",
    "    if (curr == temp) curr = temp->next;",
    "}",
    "free(temp);",
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
        _ => return None,
    })
}

pub(crate) fn run(
    t: &mut Tracer<'_>,
    op: OperationKind,
    params: &Params,
) -> Result<Outcome, EngineError> {
    match op {
        OperationKind::InsertHead => insert(t, params.require_value(op)?, End::Head),
        OperationKind::InsertTail => insert(t, params.require_value(op)?, End::Tail),
        OperationKind::DeleteHead => delete_head(t),
        OperationKind::DeleteTail => delete_tail(t),
        OperationKind::DeleteValue => delete_value(t, params.require_value(op)?),
        OperationKind::Traverse => walk::circular_traverse(t),
        OperationKind::Search => walk::circular_search(t, params.require_value(op)?),
        OperationKind::Advance => walk::advance(t),
        _ => Err(unsupported(Variant::CircularSingly, op)),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum End {
    Head,
    Tail,
}

/// Head and tail insertion differ only in which reference moves last
fn insert(t: &mut Tracer<'_>, value: Value, end: End) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let new_node = t.mem.create_node(value.clone());
    t.ptr("newNode", Some(new_node));
    t.step(0, format!("Allocate newNode holding {}", value));

    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.mem.set_next(new_node, Some(new_node))?;
        t.step(2, "List is empty: newNode->next = newNode closes a ring of one");
        t.mem.set_head(Some(new_node));
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(3, "head = tail = newNode. Insertion complete");
        return Ok(Outcome::Done);
    };

    t.mem.set_next(new_node, Some(head))?;
    t.step(6, format!("newNode->next = head {}", t.label(Some(head))));

    t.mem.set_next(tail, Some(new_node))?;
    t.step(7, format!("tail {} ->next = newNode", t.label(Some(tail))));

    match end {
        End::Head => {
            t.mem.set_head(Some(new_node));
            t.sync_ends();
            t.step(8, "head = newNode. Insertion complete");
        }
        End::Tail => {
            t.mem.set_tail(Some(new_node));
            t.sync_ends();
            t.step(8, "tail = newNode. Insertion complete");
        }
    }
    Ok(Outcome::Done)
}

/// Clear every reference when the last node goes away
fn empty_ring(t: &mut Tracer<'_>, line: usize) {
    t.mem.set_head(None);
    t.mem.set_tail(None);
    t.mem.set_curr(None);
    t.sync_ends();
    t.ptr("curr", None);
    t.step(line, "Only one node: head = tail = curr = NULL");
}

fn release(t: &mut Tracer<'_>, temp: NodeId, line: usize) -> Result<(), EngineError> {
    let label = t.label(Some(temp));
    t.mem.delete_node(temp)?;
    t.step(line, format!("free(temp): {} released. Deletion complete", label));
    Ok(())
}

fn delete_head(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };
    t.ptr("temp", Some(head));
    t.step(1, format!("temp = head {}", t.label(Some(head))));

    if head == tail {
        empty_ring(t, 3);
    } else {
        let next = t.mem.next_of(head)?;
        t.mem.set_head(next);
        t.sync_ends();
        t.step(5, format!("head moves to {}", t.label(next)));

        t.mem.set_next(tail, next)?;
        t.step(6, "tail->next = head closes the ring again");

        if t.mem.curr() == Some(head) {
            t.mem.set_curr(next);
            t.ptr("curr", next);
            t.step(7, format!("curr pointed at temp, move it to {}", t.label(next)));
        }
    }

    release(t, head, 9)?;
    Ok(Outcome::Done)
}

fn delete_tail(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };
    t.ptr("temp", Some(tail));
    t.step(1, format!("temp = tail {}", t.label(Some(tail))));

    if head == tail {
        empty_ring(t, 3);
        release(t, tail, 12)?;
        return Ok(Outcome::Done);
    }

    let mut prev = head;
    t.ptr("prev", Some(prev));
    t.step(5, "prev = head, walk to the node before tail");
    loop {
        let next = t.mem.next_of(prev)?.unwrap_or(head);
        if next == tail || next == head {
            break;
        }
        prev = next;
        t.ptr("prev", Some(prev));
        t.step(7, format!("Move prev to {}", t.label(Some(prev))));
    }

    t.mem.set_next(prev, Some(head))?;
    t.step(8, format!("prev {} ->next = head", t.label(Some(prev))));

    t.mem.set_tail(Some(prev));
    t.sync_ends();
    t.step(9, "tail = prev");

    if t.mem.curr() == Some(tail) {
        t.mem.set_curr(Some(head));
        t.ptr("curr", Some(head));
        t.step(10, "curr pointed at temp, wrap it to head");
    }

    release(t, tail, 12)?;
    Ok(Outcome::Done)
}

fn delete_value(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };

    let mut prev = tail;
    let mut temp = head;
    t.ptr("prev", Some(prev));
    t.ptr("temp", Some(temp));
    t.step(2, "prev = tail, temp = head");

    let found = loop {
        if *t.mem.value_of(temp)? == value {
            t.step(4, format!("{} matches", t.label(Some(temp))));
            break true;
        }
        let next = t.mem.next_of(temp)?.unwrap_or(head);
        if next == head {
            break false;
        }
        prev = temp;
        temp = next;
        t.ptr("prev", Some(prev));
        t.ptr("temp", Some(temp));
        t.step(6, format!("Not {}, move temp to {}", value, t.label(Some(temp))));
    };

    if !found {
        t.step(8, format!("Back at head. {} not found", value));
        return Ok(Outcome::NoOp);
    }

    if head == tail {
        empty_ring(t, 10);
    } else {
        let after = t.mem.next_of(temp)?;
        t.mem.set_next(prev, after)?;
        t.step(12, format!("prev {} ->next = {}", t.label(Some(prev)), t.label(after)));

        if temp == head {
            t.mem.set_head(after);
            t.sync_ends();
            t.step(13, format!("temp was the head, head = {}", t.label(after)));
        }
        if temp == tail {
            t.mem.set_tail(Some(prev));
            t.sync_ends();
            t.step(14, format!("temp was the tail, tail = {}", t.label(Some(prev))));
        }
        if t.mem.curr() == Some(temp) {
            t.mem.set_curr(after);
            t.ptr("curr", after);
            t.step(15, format!("curr pointed at temp, move it to {}", t.label(after)));
        }
    }

    release(t, temp, 17)?;
    Ok(Outcome::Done)
}
