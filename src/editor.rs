//! The editor surface contract and a rope-backed host implementation.
//!
//! The core never talks to a concrete text-editing widget. It sees a narrow
//! surface: the document text plus the scroll metrics the sync controller
//! needs. Content-change notification is the host's job — when the widget's
//! text changes, the host sends [`crate::session::Message::ContentChanged`]
//! into the session rather than registering a callback here.

use ropey::Rope;

/// The narrow contract a text-editing widget exposes to the core.
pub trait EditorSurface {
    /// The full document text.
    fn value(&self) -> String;
    /// Current scroll offset from the top, px.
    fn scroll_top(&self) -> f64;
    /// Total scrollable content height, px.
    fn scroll_height(&self) -> f64;
    /// Visible viewport height, px.
    fn viewport_height(&self) -> f64;
    /// Drive the widget to a scroll offset, px.
    fn set_scroll_top(&mut self, offset: f64);
}

/// Editor line height in px, matching the original widget configuration.
pub const LINE_HEIGHT_PX: f64 = 20.0;

/// A minimal in-memory editor surface backed by a rope.
///
/// Used by the headless pipeline and by tests; a GUI host would implement
/// [`EditorSurface`] over its real widget instead.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    scroll_top: f64,
    viewport_height: f64,
}

impl TextBuffer {
    /// Create a buffer over `text` with the given viewport height.
    pub fn new(text: &str, viewport_height: f64) -> Self {
        Self {
            rope: Rope::from_str(text),
            scroll_top: 0.0,
            viewport_height: viewport_height.max(0.0),
        }
    }

    /// Replace the whole buffer content, keeping the scroll offset clamped.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }

    /// Number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Update the viewport height (pane resize).
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }

    fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.viewport_height).max(0.0)
    }
}

impl EditorSurface for TextBuffer {
    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    #[allow(clippy::cast_precision_loss)]
    fn scroll_height(&self) -> f64 {
        self.rope.len_lines() as f64 * LINE_HEIGHT_PX
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = offset.clamp(0.0, self.max_scroll());
    }
}
