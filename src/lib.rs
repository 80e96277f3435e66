//! # Introduction
//!
//! listtrace replays textbook linked-list algorithms one primitive step at a
//! time. Every step carries a deep copy of the simulated memory, the line of
//! the reference listing being executed and the live variable values, so the
//! recorded history can be scrubbed forward and backward without re-running
//! anything.
//!
//! ## Execution pipeline
//!
//! ```text
//! Request → Engine → Operation procedure → Memory model → Step log → Cursor → TUI
//! ```
//!
//! 1. [`engine`]: validates `(variant, operation, params)` and dispatches to
//!    the procedure for that list topology.
//! 2. [`memory`]: the node arena with `head`/`tail`/`curr` references and
//!    the invariant checks run against settled lists.
//! 3. [`snapshot`]: immutable [`snapshot::Step`]s collected into a
//!    [`snapshot::StepLog`].
//! 4. [`cursor`]: [`cursor::PlaybackCursor`], a read-only position over a
//!    finished log.
//! 5. [`script`]: `op[:value][@position]` command-line scripts.
//! 6. [`ui`]: ratatui-based step player; not part of the stable library API.
//!
//! ## Supported lists
//!
//! Singly, doubly, circular singly and circular doubly linked lists. Every
//! topology has head/tail insertion and deletion, delete by value, traversal
//! and search. Singly and doubly lists add positional insertion and reversal.
//! Doubly lists model browser history (`visit`, `back`, `forward`), circular
//! lists model round-robin scheduling (`advance`, `retreat`) and circular
//! doubly lists add root-list insertion next to a minimum pointer.
//!
//! ```
//! use listtrace::engine::{Engine, OperationKind, Params, Variant};
//!
//! let mut engine = Engine::new();
//! let steps = engine
//!     .execute(Variant::Singly, OperationKind::InsertHead, Params::value(5))
//!     .unwrap();
//! assert_eq!(steps.len(), 4);
//! ```

pub mod cursor;
pub mod engine;
pub mod memory;
pub mod script;
pub mod snapshot;
pub mod ui;
