use crate::editor::LINE_HEIGHT_PX;
use crate::preview::{self, PreviewSnapshot};
use crate::sync::{ScrollRegion, ScrollSyncController};
use crate::theme::Theme;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Default pane viewport height when the host has not reported one, px.
pub const DEFAULT_VIEWPORT_PX: f64 = 600.0;

/// The complete session state.
///
/// Owns the document text, its rendered preview, the scroll-sync controller
/// for the two panes, and the export/theme state. All mutation goes through
/// [`super::update`].
#[derive(Debug)]
pub struct Model {
    pub content: String,
    pub preview_html: String,
    pub snapshot: PreviewSnapshot,
    pub theme: Theme,
    pub export_in_flight: bool,
    pub sync: ScrollSyncController,
    editor_viewport_px: f64,
    preview_viewport_px: f64,
    notices: Vec<Notice>,
}

impl Model {
    /// Build a session model around initial document content.
    pub fn new(content: String, theme: Theme) -> Self {
        let preview_html = preview::render_html(&content);
        let snapshot = preview::estimate_layout(&content);

        let mut sync = ScrollSyncController::new();
        sync.attach(
            ScrollRegion::new(editor_content_px(&content), DEFAULT_VIEWPORT_PX),
            ScrollRegion::new(snapshot.content_px, DEFAULT_VIEWPORT_PX),
        );

        Self {
            content,
            preview_html,
            snapshot,
            theme,
            export_in_flight: false,
            sync,
            editor_viewport_px: DEFAULT_VIEWPORT_PX,
            preview_viewport_px: DEFAULT_VIEWPORT_PX,
            notices: Vec::new(),
        }
    }

    /// Replace the document content, re-render the preview, and keep the
    /// preview visually in place by restoring its scroll ratio against the
    /// new extent.
    pub fn set_content(&mut self, content: String) {
        let ratio = self
            .sync
            .target()
            .map_or(0.0, |region| preview::capture_ratio(region.offset(), region.extent()));

        self.preview_html = preview::render_html(&content);
        self.snapshot = preview::estimate_layout(&content);
        self.sync
            .set_source_metrics(editor_content_px(&content), self.editor_viewport_px);
        self.sync
            .set_target_metrics(self.snapshot.content_px, self.preview_viewport_px);

        if let Some(region) = self.sync.target() {
            let restored = preview::restored_offset(ratio, region.extent());
            self.sync.restore_target_offset(restored);
        }
        self.content = content;
    }

    /// Record new pane viewport heights (host resize).
    pub fn set_viewports(&mut self, editor_px: f64, preview_px: f64) {
        self.editor_viewport_px = editor_px.max(0.0);
        self.preview_viewport_px = preview_px.max(0.0);
        self.sync
            .set_source_metrics(editor_content_px(&self.content), self.editor_viewport_px);
        self.sync
            .set_target_metrics(self.snapshot.content_px, self.preview_viewport_px);
    }

    /// Queue a transient notice for the host to display.
    pub fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice {
            level,
            text: text.into(),
        });
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[allow(clippy::cast_precision_loss)]
fn editor_content_px(content: &str) -> f64 {
    (content.lines().count().max(1) as f64) * LINE_HEIGHT_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_renders_preview() {
        let model = Model::new("# Jane Doe".to_string(), Theme::Light);
        assert!(model.preview_html.contains("Jane Doe"));
        assert!(!model.snapshot.blocks.is_empty());
        assert!(model.sync.source().is_some());
    }

    #[test]
    fn test_set_content_preserves_preview_ratio() {
        let long = "## Section\n\ntext\n\n".repeat(50);
        let mut model = Model::new(long.clone(), Theme::Light);

        // Scroll the preview halfway down.
        let extent = model.sync.target().unwrap().extent();
        assert!(extent > 0.0, "fixture must scroll");
        model.sync.restore_target_offset(extent / 2.0);

        // Append content; the ratio should hold against the new extent.
        model.set_content(format!("{long}\n## More\n\nmore text\n"));
        let region = model.sync.target().unwrap();
        let ratio = region.offset() / region.extent();
        assert!((ratio - 0.5).abs() < 0.01, "ratio drifted to {ratio}");
    }

    #[test]
    fn test_notices_drain_once() {
        let mut model = Model::new(String::new(), Theme::Light);
        model.push_notice(NoticeLevel::Info, "saved");
        assert_eq!(model.take_notices().len(), 1);
        assert!(model.take_notices().is_empty());
    }
}
