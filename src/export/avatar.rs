//! Avatar discovery and URL resolution.
//!
//! The avatar image does not paginate reliably when left inline, so it is
//! pulled out of the content flow and re-added as an absolutely positioned
//! layer. Its URL must be resolvable by the rasterizer process, which means
//! local paths become `file://` URIs with forward slashes.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::preview::PreviewSnapshot;

/// Substitute avatar when the document carries none.
pub const PLACEHOLDER_AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/583231?v=4";

/// The marker that identifies the avatar image in the document.
const AVATAR_ALT: &str = "avatar";

/// Find the avatar image block in a snapshot.
///
/// Returns the index of the block to remove from the content flow and the
/// image's raw source URL.
pub fn locate_avatar(snapshot: &PreviewSnapshot) -> Option<(usize, String)> {
    snapshot.blocks.iter().enumerate().find_map(|(index, block)| {
        block
            .image
            .as_ref()
            .filter(|image| image.alt == AVATAR_ALT)
            .map(|image| (index, image.src.clone()))
    })
}

/// Resolve a raw avatar source into a form the rasterizer can load.
///
/// Network URLs and `file://`/`data:` URIs pass through unchanged. Anything
/// else is treated as a local path: leading `./` or `../` is stripped,
/// relative paths are resolved against `base_dir`, and the result becomes a
/// `file://` URI with forward slashes only. An empty source falls back to
/// the placeholder.
pub fn resolve_avatar_url(raw: &str, base_dir: &Path) -> String {
    if raw.is_empty() {
        warn!("avatar source is empty, using placeholder");
        return PLACEHOLDER_AVATAR_URL.to_string();
    }
    if raw.starts_with("http://")
        || raw.starts_with("https://")
        || raw.starts_with("file://")
        || raw.starts_with("data:")
    {
        return raw.to_string();
    }

    let trimmed = raw
        .strip_prefix("./")
        .or_else(|| raw.strip_prefix("../"))
        .unwrap_or(raw);
    let path = PathBuf::from(trimmed);
    let absolute = if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    };
    format!(
        "file://{}",
        absolute.to_string_lossy().replace('\\', "/")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{BlockKind, ImageRef, PreviewBlock};

    fn image_block(src: &str, alt: &str) -> PreviewBlock {
        PreviewBlock {
            kind: BlockKind::Paragraph,
            text: String::new(),
            html: format!("<p><img src=\"{src}\" alt=\"{alt}\"/></p>"),
            top_px: 40.0,
            image: Some(ImageRef {
                src: src.to_string(),
                alt: alt.to_string(),
            }),
        }
    }

    #[test]
    fn test_locate_avatar_by_alt_marker() {
        let snapshot = PreviewSnapshot {
            blocks: vec![image_block("logo.png", "logo"), image_block("me.png", "avatar")],
            content_px: 100.0,
        };
        assert_eq!(locate_avatar(&snapshot), Some((1, "me.png".to_string())));
    }

    #[test]
    fn test_locate_avatar_absent() {
        let snapshot = PreviewSnapshot::default();
        assert_eq!(locate_avatar(&snapshot), None);
    }

    #[test]
    fn test_relative_path_resolves_to_file_uri_with_forward_slashes() {
        let url = resolve_avatar_url("./img/me.png", Path::new("/home/jane/resume"));
        assert!(url.starts_with("file://"), "got {url}");
        assert!(url.ends_with("/img/me.png"), "got {url}");
        assert!(!url.contains('\\'), "got {url}");
    }

    #[test]
    fn test_parent_relative_path_is_stripped_and_resolved() {
        let url = resolve_avatar_url("../img/me.png", Path::new("/home/jane/resume"));
        assert_eq!(url, "file:///home/jane/resume/img/me.png");
    }

    #[test]
    fn test_network_urls_pass_through() {
        let url = "https://example.com/me.png";
        assert_eq!(resolve_avatar_url(url, Path::new("/tmp")), url);
    }

    #[test]
    fn test_file_uri_passes_through() {
        let url = "file:///srv/me.png";
        assert_eq!(resolve_avatar_url(url, Path::new("/tmp")), url);
    }

    #[test]
    fn test_empty_source_falls_back_to_placeholder() {
        assert_eq!(
            resolve_avatar_url("", Path::new("/tmp")),
            PLACEHOLDER_AVATAR_URL
        );
    }

    #[test]
    fn test_bare_relative_path_resolves_against_base_dir() {
        let url = resolve_avatar_url("me.png", Path::new("/home/jane"));
        assert_eq!(url, "file:///home/jane/me.png");
    }
}
