//! Rasterization handoff.
//!
//! The core never rasterizes HTML itself; it hands a print document to an
//! external [`Rasterizer`]. The stock implementation drives a headless
//! Chromium subprocess, which is what the original application used (via its
//! embedded browser) to produce the paginated PDF.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Physical page sizes the exporter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
}

impl PageSize {
    /// Page dimensions in millimeters (width, height).
    pub const fn dimensions_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
        }
    }
}

/// Page setup handed to the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub page_size: PageSize,
    /// Uniform page margin, mm.
    pub margin_mm: f64,
    /// Content scale. Slightly below 1.0 so nothing clips at the page edge.
    pub scale: f64,
    pub landscape: bool,
    pub print_background: bool,
    pub display_header_footer: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin_mm: 0.0,
            scale: 0.98,
            landscape: false,
            print_background: true,
            display_header_footer: false,
        }
    }
}

/// Errors from the rasterization handoff.
#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("rasterizer exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },
    #[error("rasterizer produced an empty PDF")]
    EmptyOutput,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An external capability that turns an HTML file into PDF bytes.
pub trait Rasterizer {
    /// Rasterize the document at `html_path` into a binary PDF payload.
    ///
    /// # Errors
    /// Returns an error if the rasterization process fails or produces no
    /// output. Temporary artifacts are the implementation's responsibility
    /// and must be cleaned up on both success and failure.
    fn render_to_pdf(&self, html_path: &Path, options: &PageOptions) -> Result<Vec<u8>, RasterizeError>;
}

/// Rasterizes by spawning a headless Chromium-family browser.
#[derive(Debug, Clone)]
pub struct ChromiumRasterizer {
    binary: PathBuf,
    settle: Duration,
}

impl ChromiumRasterizer {
    /// Create a rasterizer that spawns `binary` (e.g. `chromium`,
    /// `google-chrome`, `msedge`).
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            // The original export waited 2s for content to settle before
            // capturing; the virtual time budget plays the same role.
            settle: Duration::from_millis(2000),
        }
    }

    /// Override the content-settling budget.
    pub const fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

impl Rasterizer for ChromiumRasterizer {
    fn render_to_pdf(&self, html_path: &Path, options: &PageOptions) -> Result<Vec<u8>, RasterizeError> {
        let out_dir = tempfile::tempdir()?;
        let out_path = out_dir.path().join("resume.pdf");

        let url = format!(
            "file://{}",
            html_path.to_string_lossy().replace('\\', "/")
        );
        let mut command = Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--disable-gpu")
            .arg(format!("--print-to-pdf={}", out_path.display()))
            .arg(format!("--virtual-time-budget={}", self.settle.as_millis()));
        if !options.display_header_footer {
            command.arg("--no-pdf-header-footer");
        }
        command.arg(&url);

        debug!(binary = %self.binary.display(), %url, "spawning rasterizer");
        let output = command.output()?;
        if !output.status.success() {
            return Err(RasterizeError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let bytes = std::fs::read(&out_path)?;
        if bytes.is_empty() {
            return Err(RasterizeError::EmptyOutput);
        }
        // out_dir drops here and removes the PDF copy; the returned bytes
        // are the caller's.
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_options_match_export_contract() {
        let options = PageOptions::default();
        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.margin_mm, 0.0);
        assert_eq!(options.scale, 0.98);
        assert!(!options.landscape);
        assert!(options.print_background);
        assert!(!options.display_header_footer);
    }

    #[test]
    fn test_a4_dimensions() {
        assert_eq!(PageSize::A4.dimensions_mm(), (210.0, 297.0));
    }

    #[test]
    fn test_missing_binary_surfaces_as_io_error() {
        let rasterizer = ChromiumRasterizer::new("/nonexistent/cvpress-test-browser");
        let err = rasterizer
            .render_to_pdf(Path::new("/tmp/nope.html"), &PageOptions::default())
            .unwrap_err();
        assert!(matches!(err, RasterizeError::Io(_)));
    }
}
