//! Terminal step player built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: player state, keyboard event loop, pane focus, auto-play
//! - **[`panes`]**: stateless render functions for each visible pane (listing,
//!   step description, memory, variables, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The UI only reads recorded [`Step`](crate::snapshot::Step)s through a
//! [`PlaybackCursor`](crate::cursor::PlaybackCursor); it never drives the
//! engine. Construct an [`App`] from [`Recording`]s and call [`App::run`].
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::{App, Recording};
