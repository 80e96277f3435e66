//! Operation scripts for the command line
//!
//! A script is a sequence of `op[:value][@position]` items such as
//! `insertTail:10 insertAt:15@1 reverse`. Values that parse as integers become
//! [`Value::Int`], anything else is kept as text.

use crate::engine::{OperationKind, Params};
use crate::memory::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("empty operation in script")]
    Empty,

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("invalid position '{position}' in '{item}'")]
    BadPosition { item: String, position: String },
}

/// One parsed script entry
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptItem {
    pub operation: OperationKind,
    pub params: Params,
}

pub fn parse_item(item: &str) -> Result<ScriptItem, ScriptError> {
    let item = item.trim();
    if item.is_empty() {
        return Err(ScriptError::Empty);
    }

    let (head, position) = match item.rsplit_once('@') {
        Some((head, pos)) => {
            let position = pos.trim().parse::<usize>().map_err(|_| ScriptError::BadPosition {
                item: item.to_string(),
                position: pos.to_string(),
            })?;
            (head, Some(position))
        }
        None => (item, None),
    };

    let (name, value) = match head.split_once(':') {
        Some((name, raw)) => (name, Some(Value::parse(raw))),
        None => (head, None),
    };

    let operation = OperationKind::from_name(name)
        .ok_or_else(|| ScriptError::UnknownOperation(name.trim().to_string()))?;

    Ok(ScriptItem {
        operation,
        params: Params { value, position },
    })
}

/// Parse every item; each argument may hold several whitespace or comma
/// separated items
pub fn parse_script<S: AsRef<str>>(args: &[S]) -> Result<Vec<ScriptItem>, ScriptError> {
    args.iter()
        .flat_map(|arg| {
            arg.as_ref()
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .map(|item| parse_item(&item))
        .collect()
}
