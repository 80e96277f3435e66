//! Read-only walks shared by several topologies
//!
//! Linear lists stop at NULL; circular lists use a `do { } while (temp != head)`
//! loop so exactly one lap is taken.

use super::Tracer;
use crate::engine::errors::EngineError;
use crate::engine::variant::Outcome;
use crate::memory::Value;
use crate::snapshot::VarValue;

pub const LINEAR_TRAVERSE: &[&str] = &[
    "Node* temp = head;",
    "while (temp != NULL) {",
    "    visit(temp->data);",
    "    temp = temp->next;",
    "}",
];

pub const CIRCULAR_TRAVERSE: &[&str] = &[
    "if (head == NULL) return;",
    "Node* temp = head;",
    "do {",
    "    visit(temp->data);",
    "    temp = temp->next;",
    "} while (temp != head);",
];

pub const LINEAR_SEARCH: &[&str] = &[
    "Node* temp = head;",
    "int index = 0;",
    "while (temp != NULL) {",
    "    if (temp->data == value) return index;",
    "    temp = temp->next;",
    "    index++;",
    "}",
    "return -1;",
];

pub const CIRCULAR_SEARCH: &[&str] = &[
    "if (head == NULL) return -1;",
    "Node* temp = head;",
    "int index = 0;",
    "do {",
    "    if (temp->data == value) return index;",
    "    temp = temp->next;",
    "    index++;",
    "} while (temp != head);",
    "return -1;",
];

pub const ADVANCE: &[&str] = &[
    "if (head == NULL) return;",
    "if (curr == NULL) curr = head;",
    "else curr = curr->next;",
];

pub const RETREAT: &[&str] = &[
    "if (head == NULL) return;",
    "if (curr == NULL) curr = tail;",
    "else curr = curr->prev;",
];

pub(crate) fn linear_traverse(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    let head = t.mem.head();
    let mut temp = head;
    let mut visited = Vec::new();
    t.ptr("head", head);
    t.ptr("temp", temp);
    t.step(0, format!("Start traversal: temp = head {}", t.label(temp)));

    while let Some(id) = temp {
        let value = t.value_of(id)?;
        visited.push(value.clone());
        t.step(2, format!("Visit {}", value));
        temp = t.mem.next_of(id)?;
        t.ptr("temp", temp);
    }

    t.step(1, format!("temp is NULL. Traversal complete, {} node(s) visited", visited.len()));
    Ok(Outcome::Visited(visited))
}

pub(crate) fn circular_traverse(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    let Some(head) = t.mem.head() else {
        t.ptr("head", None);
        t.step(0, "List is empty. Nothing to traverse");
        return Ok(Outcome::Visited(Vec::new()));
    };
    t.ptr("head", Some(head));
    t.ptr("temp", Some(head));
    t.step(1, format!("Start traversal: temp = head {}", t.label(Some(head))));

    let mut visited = Vec::new();
    let mut temp = head;
    loop {
        let value = t.value_of(temp)?;
        visited.push(value.clone());
        t.step(3, format!("Visit {}", value));
        temp = t.mem.next_of(temp)?.unwrap_or(head);
        t.ptr("temp", Some(temp));
        if temp == head {
            break;
        }
    }

    t.step(
        5,
        format!(
            "temp is back at head. Traversal complete, {} node(s) visited",
            visited.len()
        ),
    );
    Ok(Outcome::Visited(visited))
}

pub(crate) fn linear_search(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    let head = t.mem.head();
    let mut temp = head;
    let mut index: usize = 0;
    t.set("value", VarValue::Value(value.clone()));
    t.ptr("head", head);
    t.ptr("temp", temp);
    t.set("index", VarValue::Index(0));
    t.step(1, format!("Start search for {} at head", value));

    while let Some(id) = temp {
        if *t.mem.value_of(id)? == value {
            t.step(3, format!("{} matches. Found at index {}", t.label(temp), index));
            return Ok(Outcome::Found(index));
        }
        t.step(3, format!("{} does not match {}", t.label(temp), value));
        temp = t.mem.next_of(id)?;
        index += 1;
        t.ptr("temp", temp);
        t.set("index", VarValue::Index(index as i64));
        t.step(5, format!("Move temp to {}, index = {}", t.label(temp), index));
    }

    t.step(7, format!("Reached NULL. {} not found, return -1", value));
    Ok(Outcome::NotFound)
}

pub(crate) fn circular_search(t: &mut Tracer<'_>, value: Value) -> Result<Outcome, EngineError> {
    t.set("value", VarValue::Value(value.clone()));
    let Some(head) = t.mem.head() else {
        t.ptr("head", None);
        t.step(0, format!("List is empty. {} not found, return -1", value));
        return Ok(Outcome::NotFound);
    };
    t.ptr("head", Some(head));
    t.ptr("temp", Some(head));
    t.set("index", VarValue::Index(0));
    t.step(2, format!("Start search for {} at head", value));

    let mut temp = head;
    let mut index: usize = 0;
    loop {
        if *t.mem.value_of(temp)? == value {
            t.step(4, format!("{} matches. Found at index {}", t.label(Some(temp)), index));
            return Ok(Outcome::Found(index));
        }
        t.step(4, format!("{} does not match {}", t.label(Some(temp)), value));
        temp = t.mem.next_of(temp)?.unwrap_or(head);
        if temp == head {
            break;
        }
        index += 1;
        t.ptr("temp", Some(temp));
        t.set("index", VarValue::Index(index as i64));
        t.step(6, format!("Move temp to {}, index = {}", t.label(Some(temp)), index));
    }

    t.ptr("temp", Some(head));
    t.step(8, format!("temp is back at head. {} not found, return -1", value));
    Ok(Outcome::NotFound)
}

pub(crate) fn advance(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    let Some(head) = t.mem.head() else {
        t.ptr("head", None);
        t.step(0, "List is empty. No node to switch to");
        return Ok(Outcome::NoOp);
    };
    t.ptr("head", Some(head));
    let target = match t.mem.curr() {
        None => {
            t.mem.set_curr(Some(head));
            t.ptr("curr", Some(head));
            t.step(1, format!("curr was NULL. Start at head {}", t.label(Some(head))));
            return Ok(Outcome::Done);
        }
        Some(curr) => t.mem.next_of(curr)?.unwrap_or(head),
    };
    t.mem.set_curr(Some(target));
    t.ptr("curr", Some(target));
    t.step(2, format!("Advance curr to {}", t.label(Some(target))));
    Ok(Outcome::Done)
}

pub(crate) fn retreat(t: &mut Tracer<'_>) -> Result<Outcome, EngineError> {
    let Some(head) = t.mem.head() else {
        t.ptr("head", None);
        t.step(0, "List is empty. No node to switch to");
        return Ok(Outcome::NoOp);
    };
    t.ptr("head", Some(head));
    let target = match t.mem.curr() {
        None => {
            let tail = t.mem.tail();
            t.mem.set_curr(tail);
            t.ptr("curr", tail);
            t.step(1, format!("curr was NULL. Start at tail {}", t.label(tail)));
            return Ok(Outcome::Done);
        }
        Some(curr) => t.mem.prev_of(curr)?.or(t.mem.tail()),
    };
    t.mem.set_curr(target);
    t.ptr("curr", target);
    t.step(2, format!("Retreat curr to {}", t.label(target)));
    Ok(Outcome::Done)
}
