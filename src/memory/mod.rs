//! Memory model for the list simulator
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Node payload representation (Int, Text)
//! - [`model`]: The node arena with `head`/`tail`/`curr` references
//! - [`links`]: Link walking and structural checks over a snapshot
//!
//! # Ownership
//!
//! Nodes live in a single arena keyed by [`NodeId`]. Nothing outside the
//! arena holds a node by value; pointer fields, references and snapshot
//! variables all carry ids. A [`MemoryState`] is a plain value copy of the
//! arena, so a snapshot taken at step `n` is unaffected by every mutation
//! that follows it.
//!
//! # Deallocation
//!
//! [`MemoryModel::delete_node`] behaves like `free`: it removes the node and
//! leaves any pointer still aimed at it untouched. Repairing neighbours is the
//! job of the algorithm doing the deletion.

pub mod links;
pub mod model;
pub mod value;

pub use links::LinkViolation;
pub use model::{MemoryError, MemoryModel, MemoryState, Node, NodeId};
pub use value::Value;

/// Display address of the first allocated node
pub const NODE_ADDRESS_START: u64 = 0x1000;

/// Spacing between consecutive node addresses (one `struct Node`)
pub const NODE_SIZE: u64 = 0x20;
