//! Deterministic block layout estimation.
//!
//! The original editor measured block positions off a live DOM. The headless
//! export pipeline has no DOM, so this walks the comrak AST and assigns each
//! top-level block an estimated top edge using fixed 96 dpi metrics that
//! approximate the preview stylesheet. Hosts with real measurements should
//! build a [`PreviewSnapshot`] directly instead.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, format_html, parse_document};
use tracing::debug;

use super::{BlockKind, ImageRef, PreviewBlock, PreviewSnapshot, create_options};

/// Preview container top padding, px.
const PADDING_TOP_PX: f64 = 16.0;
/// Body text line height, px.
const LINE_PX: f64 = 22.0;
/// Vertical gap between adjacent blocks, px.
const BLOCK_GAP_PX: f64 = 12.0;
/// Rendered height of an inline image inside a paragraph, px.
const IMAGE_PX: f64 = 120.0;

/// Parse markdown and estimate the rendered position of every top-level
/// block.
pub fn estimate_layout(markdown: &str) -> PreviewSnapshot {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, markdown, &options);

    let mut blocks = Vec::new();
    let mut top = PADDING_TOP_PX;
    for node in root.children() {
        let kind = classify(node);
        let text = collect_text(node);
        let image = find_image(node);
        let mut html = Vec::new();
        if let Err(err) = format_html(node, &options, &mut html) {
            debug!(%err, "skipping unrenderable block");
            continue;
        }
        let html = String::from_utf8_lossy(&html).into_owned();

        let height = estimate_height(kind, &text, image.is_some());
        blocks.push(PreviewBlock {
            kind,
            text,
            html,
            top_px: top,
            image,
        });
        top += height + BLOCK_GAP_PX;
    }

    PreviewSnapshot {
        blocks,
        content_px: top + PADDING_TOP_PX,
    }
}

fn classify<'a>(node: &'a AstNode<'a>) -> BlockKind {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => BlockKind::Heading(heading.level),
        NodeValue::Paragraph => BlockKind::Paragraph,
        NodeValue::List(_) => BlockKind::List,
        NodeValue::BlockQuote => BlockKind::BlockQuote,
        NodeValue::CodeBlock(_) => BlockKind::CodeBlock,
        NodeValue::ThematicBreak => BlockKind::Rule,
        _ => BlockKind::Other,
    }
}

// Line counts are tiny; precision loss is impossible in practice.
#[allow(clippy::cast_precision_loss)]
fn estimate_height(kind: BlockKind, text: &str, has_image: bool) -> f64 {
    let lines = text.lines().count().max(1) as f64;
    let base = match kind {
        BlockKind::Heading(1) => 45.0,
        BlockKind::Heading(2) => 34.0,
        BlockKind::Heading(3) => 28.0,
        BlockKind::Heading(_) => 24.0,
        BlockKind::Paragraph | BlockKind::Other => lines * LINE_PX,
        BlockKind::List | BlockKind::BlockQuote => lines * LINE_PX + BLOCK_GAP_PX,
        BlockKind::CodeBlock => lines * 20.0 + 24.0,
        BlockKind::Rule => 29.0,
    };
    if has_image { base + IMAGE_PX } else { base }
}

/// Concatenate the literal text under a node, one line per soft/hard break.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.descendants() {
        match &child.data.borrow().value {
            NodeValue::Text(literal) | NodeValue::Code(comrak::nodes::NodeCode { literal, .. }) => {
                out.push_str(literal);
            }
            NodeValue::CodeBlock(block) => out.push_str(&block.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push('\n'),
            _ => {}
        }
    }
    out
}

fn find_image<'a>(node: &'a AstNode<'a>) -> Option<ImageRef> {
    for child in node.descendants() {
        if let NodeValue::Image(link) = &child.data.borrow().value {
            let alt = collect_text(child);
            return Some(ImageRef {
                src: link.url.clone(),
                alt,
            });
        }
    }
    None
}
