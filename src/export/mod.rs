//! PDF export pipeline.
//!
//! Turns a measured preview snapshot into a paginated PDF:
//! landmark extraction → avatar relocation → print-document assembly →
//! rasterization handoff. Extraction and layout failures degrade with
//! defaults; only rasterization and I/O failures reach the caller.

mod avatar;
mod landmarks;
mod print;
mod rasterize;

pub use avatar::{PLACEHOLDER_AVATAR_URL, locate_avatar, resolve_avatar_url};
pub use landmarks::{
    DEFAULT_CONTACT_TOP_MM, DEFAULT_NAME_TOP_MM, DEFAULT_SKILLS_TOP_MM, Landmarks, PX_PER_MM,
    SectionKind, SectionMatcher, default_section_matcher, extract_landmarks,
};
pub use print::{AVATAR_OFFSET_MM, PrintDocument, build_print_document};
pub use rasterize::{ChromiumRasterizer, PageOptions, PageSize, RasterizeError, Rasterizer};

use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::preview::PreviewSnapshot;

/// Errors surfaced to the export caller.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A second export was requested while one is in flight.
    #[error("an export is already in progress")]
    InProgress,
    #[error("rasterization failed: {0}")]
    Rasterization(#[from] RasterizeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Drives one export at a time from snapshot to PDF bytes.
///
/// The exporter owns the rasterizer, the section matcher, and the base
/// directory used to resolve local avatar paths. Exports never run
/// concurrently with themselves: a request made while one is in flight is
/// rejected with [`ExportError::InProgress`].
pub struct PdfExporter<R> {
    rasterizer: R,
    matcher: Box<dyn Fn(&str) -> Option<SectionKind>>,
    base_dir: PathBuf,
    options: PageOptions,
    in_flight: Cell<bool>,
}

impl<R: Rasterizer> PdfExporter<R> {
    /// Create an exporter with the default matcher, page options, and the
    /// current directory as the avatar base.
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            matcher: Box::new(default_section_matcher),
            base_dir: PathBuf::from("."),
            options: PageOptions::default(),
            in_flight: Cell::new(false),
        }
    }

    /// Resolve local avatar paths against `base_dir`.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Replace the section-heading matcher.
    pub fn with_matcher(
        mut self,
        matcher: impl Fn(&str) -> Option<SectionKind> + 'static,
    ) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Replace the page options handed to the rasterizer.
    pub fn with_page_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether an export is currently in flight.
    pub fn is_exporting(&self) -> bool {
        self.in_flight.get()
    }

    /// Assemble the print document for a snapshot without rasterizing.
    pub fn build_document(&self, snapshot: &PreviewSnapshot) -> PrintDocument {
        let marks = extract_landmarks(snapshot, &self.matcher);
        let (content_html, avatar_url) = match locate_avatar(snapshot) {
            Some((index, src)) => (
                snapshot.content_html(&[index]),
                resolve_avatar_url(&src, &self.base_dir),
            ),
            None => (
                snapshot.content_html(&[]),
                PLACEHOLDER_AVATAR_URL.to_string(),
            ),
        };
        build_print_document(&content_html, &marks, &avatar_url)
    }

    /// Export a snapshot to PDF bytes.
    ///
    /// # Errors
    /// Fails if an export is already in flight, if the print document cannot
    /// be written, or if rasterization fails. The temporary print HTML is
    /// removed in every case.
    pub fn export(&self, snapshot: &PreviewSnapshot) -> Result<Vec<u8>, ExportError> {
        if self.in_flight.replace(true) {
            return Err(ExportError::InProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let document = self.build_document(snapshot);
        let bytes = self.rasterize(&document)?;
        info!(bytes = bytes.len(), "export finished");
        Ok(bytes)
    }

    fn rasterize(&self, document: &PrintDocument) -> Result<Vec<u8>, ExportError> {
        // NamedTempFile removes the print HTML when it drops, including on
        // the error paths.
        let mut html_file = tempfile::Builder::new()
            .prefix("cvpress-print-")
            .suffix(".html")
            .tempfile()?;
        html_file.write_all(document.html.as_bytes())?;
        html_file.flush()?;

        let bytes = self.rasterizer.render_to_pdf(html_file.path(), &self.options)?;
        Ok(bytes)
    }
}

/// Clears the in-flight flag when the export scope ends, success or failure.
struct InFlightGuard<'a>(&'a Cell<bool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Write exported PDF bytes to `path`, discarding any partial file on error.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_pdf(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Err(err) = std::fs::write(path, bytes) {
        let _ = std::fs::remove_file(path);
        return Err(err);
    }
    Ok(())
}
