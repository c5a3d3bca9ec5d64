//! Markdown preview rendering and measurement.
//!
//! This module handles:
//! - Rendering markdown source to preview HTML with comrak
//! - Producing a measured [`PreviewSnapshot`] of block positions for export
//! - Preserving the scroll ratio across a content refresh

mod layout;

pub use layout::estimate_layout;

use comrak::{Options, markdown_to_html};

/// One block-level element of the rendered preview, with its measured
/// vertical position.
///
/// Hosts with a live DOM build these from real measurements; the headless
/// pipeline builds them with [`estimate_layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewBlock {
    /// What kind of block this is.
    pub kind: BlockKind,
    /// The block's visible text, inline markup stripped.
    pub text: String,
    /// The block's rendered HTML fragment.
    pub html: String,
    /// Vertical offset of the block's top edge relative to the preview
    /// root's top edge, in pixels.
    pub top_px: f64,
    /// The first image inside the block, if any.
    pub image: Option<ImageRef>,
}

/// Block-level element kinds the exporter cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A heading with its level (1-6).
    Heading(u8),
    Paragraph,
    List,
    BlockQuote,
    CodeBlock,
    Rule,
    Other,
}

/// An image reference found inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
}

/// A measured snapshot of the rendered preview, taken at export time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewSnapshot {
    /// Block-level elements in document order, tops non-decreasing.
    pub blocks: Vec<PreviewBlock>,
    /// Total content height in pixels.
    pub content_px: f64,
}

impl PreviewSnapshot {
    /// Concatenate every block's HTML, skipping the blocks named in `skip`
    /// (indices into [`Self::blocks`]).
    pub fn content_html(&self, skip: &[usize]) -> String {
        let mut out = String::new();
        for (index, block) in self.blocks.iter().enumerate() {
            if skip.contains(&index) {
                continue;
            }
            out.push_str(&block.html);
        }
        out
    }
}

/// Render markdown source to preview HTML.
///
/// Options mirror the original renderer configuration: GFM tables and
/// autolinks, hard line breaks, and generated heading IDs.
pub fn render_html(markdown: &str) -> String {
    markdown_to_html(markdown, &create_options())
}

pub(crate) fn create_options() -> Options {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    options.extension.header_ids = Some(String::new());

    // The original editor renders with `breaks: true`.
    options.render.hardbreaks = true;

    options
}

/// Capture the scroll position of a region as a ratio of its extent.
///
/// A non-positive extent (content fits without scrolling) captures as zero.
pub fn capture_ratio(offset: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        0.0
    } else {
        (offset / extent).clamp(0.0, 1.0)
    }
}

/// Map a captured ratio back onto a refreshed region's new extent.
///
/// Used to keep the preview visually in place when its content is replaced
/// and its height changes.
pub fn restored_offset(ratio: f64, new_extent: f64) -> f64 {
    (ratio * new_extent.max(0.0)).clamp(0.0, new_extent.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_html_produces_heading() {
        let html = render_html("# Jane Doe");
        assert!(html.contains("<h1"), "missing h1 in: {html}");
        assert!(html.contains("Jane Doe"));
    }

    #[test]
    fn test_render_html_hard_breaks() {
        let html = render_html("line one\nline two");
        assert!(html.contains("<br"), "hard breaks should be enabled: {html}");
    }

    #[test]
    fn test_render_html_table_extension() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table"), "tables should render: {html}");
    }

    #[test]
    fn test_capture_ratio_zero_extent() {
        assert_eq!(capture_ratio(100.0, 0.0), 0.0);
        assert_eq!(capture_ratio(100.0, -5.0), 0.0);
    }

    #[test]
    fn test_ratio_round_trip_preserves_relative_position() {
        let ratio = capture_ratio(300.0, 1200.0);
        // Content grew after refresh.
        assert_eq!(restored_offset(ratio, 2400.0), 600.0);
        // Content shrank after refresh.
        assert_eq!(restored_offset(ratio, 600.0), 150.0);
    }

    #[test]
    fn test_restored_offset_clamps_to_new_extent() {
        assert_eq!(restored_offset(1.0, 500.0), 500.0);
        assert_eq!(restored_offset(2.0, 500.0), 500.0);
        assert_eq!(restored_offset(0.5, -10.0), 0.0);
    }

    #[test]
    fn test_content_html_skips_named_blocks() {
        let snapshot = PreviewSnapshot {
            blocks: vec![
                PreviewBlock {
                    kind: BlockKind::Heading(1),
                    text: "Jane".into(),
                    html: "<h1>Jane</h1>".into(),
                    top_px: 0.0,
                    image: None,
                },
                PreviewBlock {
                    kind: BlockKind::Paragraph,
                    text: String::new(),
                    html: "<p><img src=\"a.png\" alt=\"avatar\"/></p>".into(),
                    top_px: 50.0,
                    image: Some(ImageRef {
                        src: "a.png".into(),
                        alt: "avatar".into(),
                    }),
                },
            ],
            content_px: 100.0,
        };
        let html = snapshot.content_html(&[1]);
        assert!(html.contains("<h1>Jane</h1>"));
        assert!(!html.contains("avatar"));
    }
}
