//! Bidirectional proportional scroll synchronization.
//!
//! Keeps the editor pane (source) and the rendered preview pane (target)
//! visually aligned by scroll-position ratio rather than absolute pixel, so
//! panes of different total height still track each other. Feedback loops
//! between the two panes are broken by per-direction re-entrancy guards with
//! a short cooldown window.

mod controller;
mod region;

pub use controller::{COOLDOWN, ScrollSyncController, SyncOutcome};
pub use region::ScrollRegion;
