//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`description`]: what the current step did, plus the final outcome
//! - [`listing`]: reference listing with the active line highlighted
//! - [`memory`]: the list as boxes and arrows plus a per-node table
//! - [`variables`]: named variables of the current step
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each module exports a primary `render_*` function; panes never hold state
//! beyond the scroll offsets passed in by the app.

pub mod description;
pub mod listing;
pub mod memory;
pub mod status;
pub mod variables;

pub use description::render_description_pane;
pub use listing::{render_listing_pane, ListingScrollState};
pub use memory::{render_memory_pane, MemoryRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use variables::render_variables_pane;
