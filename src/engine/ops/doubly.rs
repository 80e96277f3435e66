//! Doubly linked list procedures
//!
//! Both ends are O(1). `curr` models a browser history position: `visit`
//! inserts after it and frees every node that used to follow it, while `back`
//! and `forward` move it along `prev`/`next`.

use super::{unsupported, walk, Tracer};
use crate::engine::errors::EngineError;
use crate::engine::variant::{OperationKind, Outcome, Params, Variant};
use crate::memory::{NodeId, Value};
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
    OperationKind::Visit,
    OperationKind::Back,
    OperationKind::Forward,
];

const INSERT_HEAD: &[&str] = &[
    "Node* newNode = createNode(value);",
    "newNode->next = head;",
    "if (head != NULL) head->prev = newNode;",
    "head = newNode;",
    "if (tail == NULL) tail = newNode;",
];

const INSERT_TAIL: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (tail == NULL) {",
    "    head = tail = newNode;",
    "    return;",
    "}",
    "newNode->prev = tail;",
    "tail->next = newNode;",
    "tail = newNode;",
];

const INSERT_AT: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (position == 0 || head == NULL) {",
    "    newNode->next = head;",
    "    if (head != NULL) head->prev = newNode;",
    "    head = newNode;",
    "    if (tail == NULL) tail = newNode;",
    "    return;",
    "}",
    "Node* temp = head;",
    "for (int i = 0; i < position - 1 && temp->next != NULL; i++)",
    "    temp = temp->next;",
    "newNode->next = temp->next;",
    "newNode->prev = temp;",
    "if (temp->next != NULL) temp->next->prev = newNode;",
    "else tail = newNode;",
    "temp->next = newNode;",
];

const DELETE_HEAD: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = head;",
    "head = head->next;",
    "if (head != NULL) head->prev = NULL;",
    "else tail = NULL;",
    "if (curr == temp) curr = head;",
    "free(temp);",
];

const DELETE_TAIL: &[&str] = &[
    "if (tail == NULL) return;",
    "Node* temp = tail;",
    "tail = tail->prev;",
    "if (tail != NULL) tail->next = NULL;",
    "else head = NULL;",
    "if (curr == temp) curr = tail;",
    "free(temp);",
];

const DELETE_VALUE: &[&str] = &[
    "Node* temp = head;",
    "while (temp != NULL && temp->data != value)",
    "    temp = temp->next;",
    "if (temp == NULL) return;",
    "if (temp->prev != NULL) temp->prev->next = temp->next;",
    "else head = temp->next;",
    "if (temp->next != NULL) temp->next->prev = temp->prev;",
    "else tail = temp->prev;",
    "if (curr == temp) curr = temp->prev != NULL ? temp->prev : temp->next;",
    "free(temp);",
];

const REVERSE: &[&str] = &[
    "if (head == NULL || head->next == NULL) return;",
    "Node* current = head;",
    "Node* temp = NULL;",
    "while (current != NULL) {",
    "    temp = current->prev;",
    "    current->prev = current->next;",
    "    current->next = temp;",
    "    current = current->prev;",
    "}",
    "temp = head;",
    "head = tail;",
    "tail = temp;",
];

const VISIT: &[&str] = &[
    "Node* newNode = createNode(value);",
    "if (head == NULL) {",
    "    head = tail = curr = newNode;",
    "    return;",
    "}",
    "if (curr == NULL) curr = tail;",
    "Node* temp = curr->next;",
    "curr->next = NULL;",
    "tail = curr;",
    "while (temp != NULL) {",
    "    Node* next = temp->next;",
    "    if (next != NULL) next->prev = NULL;",
    "    free(temp);",
    "    temp = next;",
    "}",
    "curr->next = newNode;",
    "newNode->prev = curr;",
    "tail = newNode;",
    "curr = newNode;",
];

const BACK: &[&str] = &[
    "if (curr == NULL || curr->prev == NULL) return;",
    "curr = curr->prev;",
];

const FORWARD: &[&str] = &[
    "if (curr == NULL || curr->next == NULL) return;",
    "curr = curr->next;",
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
        OperationKind::Visit => VISIT,
        OperationKind::Back => BACK,
        OperationKind::Forward => FORWARD,
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
        OperationKind::Visit => visit(t, params.require_value(op)?),
        OperationKind::Back => back(t),
        OperationKind::Forward => forward(t),
        _ => Err(unsupported(Variant::Doubly, op)),
    }
}

/// Lines `newNode->next = head` .. `if (tail == NULL) tail = newNode`, shared by
/// head insertion and position-0 insertion. `first` is the listing line of
/// `newNode->next = head`.
fn link_at_front(t: &mut Tracer<'_>, new_node: NodeId, first: usize) -> Result<(), EngineError> {
    let head = t.mem.head();
    t.mem.set_next(new_node, head)?;
    t.step(first, format!("newNode->next = head ({})", t.label(head)));

    if let Some(head) = head {
        t.mem.set_prev(head, Some(new_node))?;
        t.step(first + 1, format!("Old head {} ->prev = newNode", t.label(Some(head))));
    }

    t.mem.set_head(Some(new_node));
    t.sync_ends();
    t.step(first + 2, "head now points to newNode");

    if t.mem.tail().is_none() {
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(first + 3, "List was empty, so tail = newNode too. Insertion complete");
    } else {
        t.step(first + 3, "tail is unchanged. Insertion complete");
    }
    Ok(())
}

fn allocate(t: &mut Tracer<'_>, value: Value) -> NodeId {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let new_node = t.mem.create_node(value.clone());
    t.ptr("newNode", Some(new_node));
    t.step(0, format!("Allocate newNode holding {}", value));
    new_node
}

fn insert_head(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    let new_node = allocate(t, value);
    link_at_front(t, new_node, 1)?;
    Ok(Outcome::Done)
}

fn insert_tail(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    let new_node = allocate(t, value);

    let Some(tail) = t.mem.tail() else {
        t.mem.set_head(Some(new_node));
        t.mem.set_tail(Some(new_node));
        t.sync_ends();
        t.step(2, "List was empty: head = tail = newNode. Insertion complete");
        return Ok(Outcome::Done);
    };
    t.step(1, "List is not empty, append after tail");

    t.mem.set_prev(new_node, Some(tail))?;
    t.step(5, format!("newNode->prev = tail {}", t.label(Some(tail))));

    t.mem.set_next(tail, Some(new_node))?;
    t.step(6, format!("tail {} ->next = newNode", t.label(Some(tail))));

    t.mem.set_tail(Some(new_node));
    t.sync_ends();
    t.step(7, "tail now points to newNode. Insertion complete");
    Ok(Outcome::Done)
}

fn insert_at(t: &mut Tracer<'_>, value: Value, position: usize) -> Result<Outcome, EngineError> {
    t.set("position", VarValue::Index(position as i64));
    let new_node = allocate(t, value);

    let Some(mut temp) = t.mem.head().filter(|_| position > 0) else {
        t.step(1, "Inserting at the front");
        link_at_front(t, new_node, 2)?;
        return Ok(Outcome::Done);
    };
    t.ptr("temp", Some(temp));
    t.step(8, format!("temp = head {}", t.label(Some(temp))));

    let mut i = 0;
    while i + 1 < position {
        let Some(next) = t.mem.next_of(temp)? else {
            break;
        };
        temp = next;
        i += 1;
        t.ptr("temp", Some(temp));
        t.set("i", VarValue::Index(i as i64));
        t.step(10, format!("Move temp to {}", t.label(Some(temp))));
    }

    let after = t.mem.next_of(temp)?;
    t.mem.set_next(new_node, after)?;
    t.step(11, format!("newNode->next = temp->next ({})", t.label(after)));

    t.mem.set_prev(new_node, Some(temp))?;
    t.step(12, format!("newNode->prev = temp {}", t.label(Some(temp))));

    match after {
        Some(after) => {
            t.mem.set_prev(after, Some(new_node))?;
            t.step(13, format!("{} ->prev = newNode", t.label(Some(after))));
        }
        None => {
            t.mem.set_tail(Some(new_node));
            t.sync_ends();
            t.step(14, "newNode is last, so tail = newNode");
        }
    }

    t.mem.set_next(temp, Some(new_node))?;
    t.step(15, format!("temp {} ->next = newNode. Insertion complete", t.label(Some(temp))));
    Ok(Outcome::Done)
}

fn delete_head(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let Some(temp) = t.mem.head() else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };
    t.ptr("temp", Some(temp));
    t.step(1, format!("temp = head {}", t.label(Some(temp))));

    let next = t.mem.next_of(temp)?;
    t.mem.set_head(next);
    t.sync_ends();
    t.step(2, format!("head moves to {}", t.label(next)));

    match next {
        Some(head) => {
            t.mem.set_prev(head, None)?;
            t.step(3, "New head's prev = NULL");
        }
        None => {
            t.mem.set_tail(None);
            t.sync_ends();
            t.step(4, "List is now empty, so tail = NULL");
        }
    }

    if t.mem.curr() == Some(temp) {
        t.mem.set_curr(next);
        t.ptr("curr", next);
        t.step(5, format!("curr pointed at temp, move it to {}", t.label(next)));
    }

    let label = t.label(Some(temp));
    t.mem.delete_node(temp)?;
    t.step(6, format!("free(temp): {} released. Deletion complete", label));
    Ok(Outcome::Done)
}

fn delete_tail(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    t.sync_ends();
    let Some(temp) = t.mem.tail() else {
        t.step(0, "List is empty. Nothing to delete");
        return Ok(Outcome::NoOp);
    };
    t.ptr("temp", Some(temp));
    t.step(1, format!("temp = tail {}", t.label(Some(temp))));

    let prev = t.mem.prev_of(temp)?;
    t.mem.set_tail(prev);
    t.sync_ends();
    t.step(2, format!("tail moves back to {} in O(1) via prev", t.label(prev)));

    match prev {
        Some(tail) => {
            t.mem.set_next(tail, None)?;
            t.step(3, "New tail's next = NULL");
        }
        None => {
            t.mem.set_head(None);
            t.sync_ends();
            t.step(4, "List is now empty, so head = NULL");
        }
    }

    if t.mem.curr() == Some(temp) {
        t.mem.set_curr(prev);
        t.ptr("curr", prev);
        t.step(5, format!("curr pointed at temp, move it to {}", t.label(prev)));
    }

    let label = t.label(Some(temp));
    t.mem.delete_node(temp)?;
    t.step(6, format!("free(temp): {} released. Deletion complete", label));
    Ok(Outcome::Done)
}

fn delete_value(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    t.sync_ends();
    let mut temp = t.mem.head();
    t.ptr("temp", temp);
    t.step(0, format!("temp = head {}", t.label(temp)));

    while let Some(id) = temp {
        if *t.mem.value_of(id)? == value {
            break;
        }
        temp = t.mem.next_of(id)?;
        t.ptr("temp", temp);
        t.step(2, format!("Not {}, move temp to {}", value, t.label(temp)));
    }

    let Some(target) = temp else {
        let description = if t.mem.is_empty() {
            "List is empty. Nothing to delete".to_string()
        } else {
            format!("Reached NULL. {} not found", value)
        };
        t.step(3, description);
        return Ok(Outcome::NoOp);
    };

    let prev = t.mem.prev_of(target)?;
    let next = t.mem.next_of(target)?;
    match prev {
        Some(p) => {
            t.mem.set_next(p, next)?;
            t.step(4, format!("{} ->next = {}", t.label(prev), t.label(next)));
        }
        None => {
            t.mem.set_head(next);
            t.sync_ends();
            t.step(5, format!("temp was the head, head = {}", t.label(next)));
        }
    }

    match next {
        Some(n) => {
            t.mem.set_prev(n, prev)?;
            t.step(6, format!("{} ->prev = {}", t.label(next), t.label(prev)));
        }
        None => {
            t.mem.set_tail(prev);
            t.sync_ends();
            t.step(7, format!("temp was the tail, tail = {}", t.label(prev)));
        }
    }

    if t.mem.curr() == Some(target) {
        let survivor = prev.or(next);
        t.mem.set_curr(survivor);
        t.ptr("curr", survivor);
        t.step(8, format!("curr pointed at temp, move it to {}", t.label(survivor)));
    }

    t.mem.delete_node(target)?;
    t.step(9, format!("free(temp): [{}] released. Deletion complete", value));
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

    let mut current = head;
    t.ptr("current", current);
    t.step(1, format!("current = head {}", t.label(current)));
    t.ptr("temp", None);
    t.step(2, "temp = NULL");

    while let Some(cur) = current {
        let temp = t.mem.prev_of(cur)?;
        t.ptr("temp", temp);
        t.step(4, format!("temp = current->prev ({})", t.label(temp)));

        let next = t.mem.next_of(cur)?;
        t.mem.set_prev(cur, next)?;
        t.step(5, format!("{} ->prev = {}", t.label(current), t.label(next)));

        t.mem.set_next(cur, temp)?;
        t.step(6, format!("{} ->next = {}", t.label(current), t.label(temp)));

        current = next;
        t.ptr("current", current);
        t.step(7, format!("current = current->prev ({})", t.label(current)));
    }

    let (old_head, old_tail) = (t.mem.head(), t.mem.tail());
    t.ptr("temp", old_head);
    t.step(9, "temp = head");
    t.mem.set_head(old_tail);
    t.sync_ends();
    t.step(10, format!("head = tail {}", t.label(old_tail)));
    t.mem.set_tail(old_head);
    t.sync_ends();
    t.step(11, format!("tail = temp {}. Reverse complete", t.label(old_head)));
    Ok(Outcome::Done)
}

fn visit(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.ptr("curr", t.mem.curr());
    let new_node = allocate(t, value);

    let Some(tail) = t.mem.tail() else {
        t.mem.set_head(Some(new_node));
        t.mem.set_tail(Some(new_node));
        t.mem.set_curr(Some(new_node));
        t.sync_ends();
        t.ptr("curr", Some(new_node));
        t.step(2, "First page: head = tail = curr = newNode. Visit complete");
        return Ok(Outcome::Done);
    };

    let curr = match t.mem.curr() {
        Some(curr) => curr,
        None => {
            t.mem.set_curr(Some(tail));
            t.ptr("curr", Some(tail));
            t.step(5, "curr was NULL, start from the tail");
            tail
        }
    };

    let mut temp = t.mem.next_of(curr)?;
    t.ptr("temp", temp);
    t.step(6, format!("temp = curr->next ({})", t.label(temp)));

    t.mem.set_next(curr, None)?;
    t.step(7, "Cut forward history: curr->next = NULL");

    t.mem.set_tail(Some(curr));
    t.sync_ends();
    t.step(8, "tail = curr");

    while let Some(id) = temp {
        let next = t.mem.next_of(id)?;
        t.ptr("next", next);
        if let Some(n) = next {
            t.mem.set_prev(n, None)?;
        }
        let label = t.label(Some(id));
        t.mem.delete_node(id)?;
        temp = next;
        t.ptr("temp", temp);
        t.step(13, format!("free({}) from forward history, temp = {}", label, t.label(temp)));
    }

    t.mem.set_next(curr, Some(new_node))?;
    t.step(15, "curr->next = newNode");

    t.mem.set_prev(new_node, Some(curr))?;
    t.step(16, format!("newNode->prev = curr {}", t.label(Some(curr))));

    t.mem.set_tail(Some(new_node));
    t.sync_ends();
    t.step(17, "tail = newNode");

    t.mem.set_curr(Some(new_node));
    t.ptr("curr", Some(new_node));
    t.step(18, "curr = newNode. Visit complete");
    Ok(Outcome::Done)
}

fn back(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    let curr = t.mem.curr();
    t.ptr("curr", curr);
    let target = match curr {
        Some(id) => t.mem.prev_of(id)?,
        None => None,
    };
    let Some(target) = target else {
        t.step(0, "No earlier page. curr stays put");
        return Ok(Outcome::NoOp);
    };
    t.mem.set_curr(Some(target));
    t.ptr("curr", Some(target));
    t.step(1, format!("Back: curr = {}", t.label(Some(target))));
    Ok(Outcome::Done)
}

fn forward(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    let curr = t.mem.curr();
    t.ptr("curr", curr);
    let target = match curr {
        Some(id) => t.mem.next_of(id)?,
        None => None,
    };
    let Some(target) = target else {
        t.step(0, "No later page. curr stays put");
        return Ok(Outcome::NoOp);
    };
    t.mem.set_curr(Some(target));
    t.ptr("curr", Some(target));
    t.step(1, format!("Forward: curr = {}", t.label(Some(target))));
    Ok(Outcome::Done)
}
