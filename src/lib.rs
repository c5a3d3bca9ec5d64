// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. preview::PreviewBlock)
    clippy::module_name_repetitions
)]

//! # cvpress
//!
//! A markdown resume editor core with PDF export.
//!
//! cvpress keeps an editor pane and a rendered preview pane in lockstep and
//! turns the preview into a print-faithful A4 PDF:
//! - Bidirectional proportional scroll sync with echo suppression
//! - Section landmark extraction in millimetres for print layout
//! - Avatar relocation from document flow to an absolute print layer
//! - Headless-browser rasterization to PDF
//!
//! ## Architecture
//!
//! cvpress uses The Elm Architecture (TEA) pattern:
//! - **Model**: Session state (content, preview, sync, theme)
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **Effect**: Follow-up work for the session or the host UI
//!
//! ## Modules
//!
//! - [`sync`]: Bidirectional proportional scroll synchronization
//! - [`preview`]: Markdown rendering and block layout capture
//! - [`export`]: Landmarks, avatar handling, print document, rasterization
//! - [`editor`]: The editor surface contract and a rope-backed buffer
//! - [`session`]: The TEA session tying it all together
//! - [`storage`]: Content/theme persistence with a template fallback
//! - [`watcher`]: File watching for live reload

pub mod config;
pub mod editor;
pub mod export;
pub mod preview;
pub mod session;
pub mod storage;
pub mod sync;
pub mod theme;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::export::{PdfExporter, PrintDocument, Rasterizer};
    pub use crate::preview::PreviewSnapshot;
    pub use crate::session::{Effect, Message, Model, Session};
    pub use crate::sync::ScrollSyncController;
}
