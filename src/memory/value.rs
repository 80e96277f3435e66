//! Node payload representation
//!
//! This module defines the [`Value`] enum, the opaque payload carried by each
//! simulated node. Payloads are either integers or text; the engine never
//! inspects them beyond equality (search, delete by value) and ordering
//! (root-list minimum tracking).
//!
//! # Ordering
//!
//! Integers compare numerically and text compares lexicographically. When the
//! two kinds are mixed, every integer sorts before every string.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Payload stored in a list node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    /// Parse a payload from user input: integers if they parse, text otherwise
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => Value::Int(n),
            Err(_) => Value::Text(raw.to_string()),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Int(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefers_integers() {
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse("-7"), Value::Int(-7));
        assert_eq!(Value::parse("google.com"), Value::Text("google.com".into()));
    }

    #[test]
    fn test_mixed_ordering() {
        assert!(Value::Int(100) < Value::Text("a".into()));
        assert!(Value::Int(3) < Value::Int(10));
        assert!(Value::from("apple") < Value::from("banana"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::from("tab").to_string(), "\"tab\"");
    }
}
