//! Singly linked list procedures
//!
//! Only `next` pointers exist, so removing the tail walks from `head` to the
//! tail's predecessor: O(n), unlike every other variant.

use super::{unsupported, walk, Tracer};
use crate::engine::errors::EngineError;
use crate::engine::variant::{OperationKind, Outcome, Params, Variant};
use crate::memory::Value;
use crate::snapshot::VarValue;

pub(crate) const OPERATIONS: &[OperationKind] = &[
    OperationKind::InsertHead,
    OperationKind::InsertTail,
    OperationKind::InsertAt,
    OperationKind::DeleteHead,
    OperationKind::DeleteTail,
    OperationKind::DeleteValue,
    OperationKind::Traverse,
    OperationKind::Search,
    OperationKind::Reverse,
];

const INSERT_HEAD: &[&str] = &[
    "Node* newNode = createNode(value);",
    "newNode->next = head;",
    "head = newNode;",
    "if (tail == NULL) tail = newNode;",
];

const INSERT_TAIL: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    head = tail = newNode;",
    "    return;",
    "}",
    "tail->next = newNode;",
    "tail = newNode;",
];

const INSERT_AT: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (position == 0 || head == NULL) {",
    "    newNode->next = head;",
    "    head = newNode;",
    "    if (tail == NULL) tail = newNode;",
    "    return;",
    "}",
    "Node* temp = head;",
    "for (int i = 0; i < position - 1 && temp->next != NULL; i++)",
    "    temp = temp->next;",
    "newNode->next = temp->next;",
    "temp->next = newNode;",
    "if (newNode->next == NULL) tail = newNode;",
];

const DELETE_HEAD: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = head;",
    "head = head->next;",
    "if (head == NULL) tail = NULL;",
    "free(temp);",
];

const DELETE_TAIL: &[&str] = &[
    "if (head == NULL) return;",
    "if (head == tail) {",
    "    Node* temp = head;",
    "    head = tail = NULL;",
    "    free(temp);",
    "    return;",
    "}",
    "Node* prev = head;",
    "while (prev->next != tail)",
    "    prev = prev->next;",
    "Node* temp = tail;",
    "prev->next = NULL;",
    "tail = prev;",
    "free(temp);",
];

const DELETE_VALUE: &[&str] = &[
    "if (head == NULL) return;",
    "if (head->data == value) {",
    "    Node* temp = head;",
    "    head = head->next;",
    "    if (head == NULL) tail = NULL;",
    "    free(temp);",
    "    return;",
    "}",
    "Node* prev = head;",
    "while (prev->next != NULL && prev->next->data != value)",
    "    prev = prev->next;",
    "if (prev->next == NULL) return;",
    "Node* temp = prev->next;",
    "prev->next = temp->next;",
    "if (temp == tail) tail = prev;",
    "free(temp);",
];

const REVERSE: &[&str] = &[
    "if (head == NULL || head->next == NULL) return;",
    "Node* prev = NULL;",
    "Node* current = head;",
    "Node* next = NULL;",
    "tail = head;",
    "while (current != NULL) {",
    "    next = current->next;",
    "    current->next = prev;",
    "    prev = current;",
    "    current = next;",
    "}",
    "head = prev;",
];

pub(crate) fn listing(op: OperationKind) -> Option<&'static [&'static str]> {
    Some(match op {
        OperationKind::InsertHead => INSERT_HEAD,
        OperationKind::InsertTail => INSERT_TAIL,
        OperationKind::InsertAt => INSERT_AT,
        OperationKind::DeleteHead => DELETE_HEAD,
        OperationKind::DeleteTail => DELETE_TAIL,
        OperationKind::DeleteValue => DELETE_VALUE,
        OperationKind::Traverse => walk::LINEAR_TRAVERSE,
        OperationKind::Search => walk::LINEAR_SEARCH,
        OperationKind::Reverse => REVERSE,
        _ => return None,
    })
}

pub(crate) fn run(
    t: &mut Tracer<'_>,
    op: OperationKind,
    params: &Params,
) -> Result<Outcome, EngineError> {
    match op {
        OperationKind::InsertHead => insert_head(t, params.require_value(op)?),
        OperationKind::InsertTail => insert_tail(t, params.require_value(op)?),
        OperationKind::InsertAt => insert_at(
            t,
            params.require_value(op)?,
            params.require_position(op)?,
        ),
        OperationKind::DeleteHead => delete_head(t),
        OperationKind::DeleteTail => delete_tail(t),
        OperationKind::DeleteValue => delete_value(t, params.require_value(op)?),
        OperationKind::Traverse => walk::linear_traverse(t),
        OperationKind::Search => walk::linear_search(t, params.require_value(op)?),
        OperationKind::Reverse => reverse(t),
        _ => Err(unsupported(Variant::Singly, op)),
    }
}

fn insert_head(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let new_node = t.mem.create_node(value.clone());
    t.ptr("newNode", Some(new_node));
    t.step(0, format!("Allocate newNode holding {}", value));

    let head = t.mem.head();
    t.mem.set_next(new_node, head)?;
    t.step(1, format!("newNode->next = head ({})", t.label(head)));

    t.mem.set_head(Some(new_node));
    t.sync_ends();
    t.step(2, "head now points to newNode");

    if t.mem.tail().is_none() {
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(3, "List was empty, so tail = newNode too. Insertion complete");
    } else {
        t.step(3, "tail is unchanged. Insertion complete");
    }
    Ok(Outcome::Done)
}

fn insert_tail(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let new_node = t.mem.create_node(value.clone());
    t.ptr("newNode", Some(new_node));
    t.step(0, format!("Allocate newNode holding {}", value));

    let Some(tail) = t.mem.tail() else {
        t.mem.set_head(Some(new_node));
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(2, "List was empty: head = tail = newNode. Insertion complete");
        return Ok(Outcome::Done);
    };
    t.step(1, "List is not empty, append after tail");

    t.mem.set_next(tail, Some(new_node))?;
    t.step(5, format!("tail {} ->next = newNode", t.label(Some(tail))));

    t.mem.set_tail(Some(new_node));
    t.sync_ends();
    t.step(6, "tail now points to newNode. Insertion complete");
    Ok(Outcome::Done)
}

fn insert_at(t: &mut Tracer<'_>, value: Value, position: usize) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.set("position", VarValue::Index(position as i64));
    t.sync_ends();
    let new_node = t.mem.create_node(value.clone());
    t.ptr("newNode", Some(new_node));
    t.step(0, format!("Allocate newNode holding {}", value));

    let head = t.mem.head();
    let Some(head_id) = head.filter(|_| position > 0) else {
        t.step(1, "Inserting at the front");
        t.mem.set_next(new_node, head)?;
        t.step(2, format!("newNode->next = head ({})", t.label(head)));
        t.mem.set_head(Some(new_node));
        t.sync_ends();
        t.step(3, "head now points to newNode");
        if t.mem.tail().is_none() {
            t.mem.set_tail(Some(new_node));
            t.sync_ends();
            t.step(4, "List was empty, so tail = newNode too. Insertion complete");
        } else {
            t.step(4, "tail is unchanged. Insertion complete");
        }
        return Ok(Outcome::Done);
    };

    let mut temp = head_id;
    t.ptr("temp", Some(temp));
    t.step(7, format!("temp = head {}", t.label(Some(temp))));

    let mut i = 0;
    while i + 1 < position {
        let Some(next) = t.mem.next_of(temp)? else {
            break;
        };
        temp = next;
        i += 1;
        t.ptr("temp", Some(temp));
        t.set("i", VarValue::Index(i as i64));
        t.step(9, format!("Move temp to {}", t.label(Some(temp))));
    }

    let after = t.mem.next_of(temp)?;
    t.mem.set_next(new_node, after)?;
    t.step(10, format!("newNode->next = temp->next ({})", t.label(after)));

    t.mem.set_next(temp, Some(new_node))?;
    t.step(11, format!("temp {} ->next = newNode", t.label(Some(temp))));

    if after.is_none() {
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(12, "newNode is last, so tail = newNode. Insertion complete");
    } else {
        t.step(12, "tail is unchanged. Insertion complete");
    }
    Ok(Outcome::Done)
}

fn delete_head(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let Some(head) = t.mem.head() else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };
    t.ptr("temp", Some(head));
    t.step(1, format!("temp = head {}", t.label(Some(head))));

    let next = t.mem.next_of(head)?;
    t.mem.set_head(next);
    t.sync_ends();
    t.step(2, format!("head moves to {}", t.label(next)));

    if next.is_none() {
        t.mem.set_tail(None);
        t.sync_ends();
        t.step(3, "List is now empty, so tail = NULL");
    }

    let label = t.label(Some(head));
    t.mem.delete_node(head)?;
    t.step(4, format!("free(temp): {} released. Deletion complete", label));
    Ok(Outcome::Done)
}

fn delete_tail(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let (Some(head), Some(tail)) = (t.mem.head(), t.mem.tail()) else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };

    if head == tail {
        t.ptr("temp", Some(head));
        t.step(2, format!("Only one node: temp = head {}", t.label(Some(head))));
        t.mem.set_head(None);
        t.mem.set_tail(None);
        t.sync_ends();
        t.step(3, "head = tail = NULL");
        let label = t.label(Some(head));
        t.mem.delete_node(head)?;
        t.step(4, format!("free(temp): {} released. List is empty", label));
        return Ok(Outcome::Done);
    }

    let mut prev = head;
    t.ptr("prev", Some(prev));
    t.step(7, "prev = head, walk to the node before tail");
    loop {
        let next = t.mem.next_of(prev)?;
        if next == Some(tail) {
            break;
        }
        let Some(next) = next else {
            break;
        };
        prev = next;
        t.ptr("prev", Some(prev));
        t.step(9, format!("Move prev to {}", t.label(Some(prev))));
    }

    t.ptr("temp", Some(tail));
    t.step(10, format!("temp = tail {}", t.label(Some(tail))));

    t.mem.set_next(prev, None)?;
    t.step(11, format!("prev {} ->next = NULL", t.label(Some(prev))));

    t.mem.set_tail(Some(prev));
    t.sync_ends();
    t.step(12, "tail = prev");

    let label = t.label(Some(tail));
    t.mem.delete_node(tail)?;
    t.step(13, format!("free(temp): {} released. Deletion complete", label));
    Ok(Outcome::Done)
}

fn delete_value(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let Some(head) = t.mem.head() else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };

    if *t.mem.value_of(head)? == value {
        t.step(1, format!("head holds {}", value));
        t.ptr("temp", Some(head));
        t.step(2, "temp = head");
        let next = t.mem.next_of(head)?;
        t.mem.set_head(next);
        t.sync_ends();
        t.step(3, format!("head moves to {}", t.label(next)));
        if next.is_none() {
            t.mem.set_tail(None);
            t.sync_ends();
            t.step(4, "List is now empty, so tail = NULL");
        }
        t.mem.delete_node(head)?;
        t.step(5, format!("free(temp): [{}] released. Deletion complete", value));
        return Ok(Outcome::Done);
    }
    t.step(1, format!("head {} is not {}", t.label(Some(head)), value));

    let mut prev = head;
    t.ptr("prev", Some(prev));
    t.step(8, "prev = head");
    let target = loop {
        let Some(next) = t.mem.next_of(prev)? else {
            break None;
        };
        if *t.mem.value_of(next)? == value {
            break Some(next);
        }
        prev = next;
        t.ptr("prev", Some(prev));
        t.step(10, format!("prev->next is not {}, move prev to {}", value, t.label(Some(prev))));
    };

    let Some(temp) = target else {
        t.step(11, format!("Reached the end. {} not found", value));
        return Ok(Outcome::NoOp);
    };

    t.ptr("temp", Some(temp));
    t.step(12, format!("Found {}: temp = prev->next", value));

    let after = t.mem.next_of(temp)?;
    t.mem.set_next(prev, after)?;
    t.step(13, format!("prev->next = temp->next ({})", t.label(after)));

    if t.mem.tail() == Some(temp) {
        t.mem.set_tail(Some(prev));
        t.sync_ends();
        t.step(14, "temp was the tail, so tail = prev");
    }

    t.mem.delete_node(temp)?;
    t.step(15, format!("free(temp): [{}] released. Deletion complete", value));
    Ok(Outcome::Done)
}

fn reverse(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let head = t.mem.head();
    let single = match head {
        Some(id) => t.mem.next_of(id)?.is_none(),
        None => true,
    };
    if single {
        t.step(0, "Fewer than two nodes. Already reversed");
        return Ok(Outcome::NoOp);
    }

    let mut prev = None;
    let mut current = head;
    t.ptr("prev", prev);
    t.step(1, "prev = NULL");
    t.ptr("current", current);
    t.step(2, format!("current = head {}", t.label(current)));
    t.ptr("next", None);
    t.step(3, "next = NULL");

    t.mem.set_tail(head);
    t.sync_ends();
    t.step(4, "Old head will become the tail: tail = head");

    while let Some(cur) = current {
        let next = t.mem.next_of(cur)?;
        t.ptr("next", next);
        t.step(6, format!("Save next = {}", t.label(next)));

        t.mem.set_next(cur, prev)?;
        t.step(7, format!("Reverse link: {} ->next = {}", t.label(current), t.label(prev)));

        prev = current;
        t.ptr("prev", prev);
        t.step(8, format!("prev = {}", t.label(prev)));

        current = next;
        t.ptr("current", current);
        t.step(9, format!("current = {}", t.label(current)));
    }

    t.mem.set_head(prev);
    t.sync_ends();
    t.step(11, format!("head = prev {}. Reverse complete", t.label(prev)));
    Ok(Outcome::Done)
}
