//! Print document assembly.
//!
//! Builds the self-contained, single-page HTML document handed to the
//! rasterizer: the cloned preview content (avatar removed from flow), a
//! stylesheet tuned for A4 density, and the avatar re-added as an absolutely
//! positioned circular layer anchored below the contact-info heading.

use super::landmarks::Landmarks;

/// Vertical distance from the contact-info heading to the avatar layer, mm.
pub const AVATAR_OFFSET_MM: f64 = 30.0;

/// The assembled print-ready document.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    /// Complete HTML, ready to write to disk and rasterize.
    pub html: String,
    /// Resolved avatar layer top edge, mm from the page top.
    pub avatar_top_mm: f64,
    /// Resolved avatar image URL baked into the stylesheet.
    pub avatar_url: String,
}

/// Assemble the print document from cloned content, landmark offsets, and a
/// resolved avatar URL.
pub fn build_print_document(
    content_html: &str,
    landmarks: &Landmarks,
    avatar_url: &str,
) -> PrintDocument {
    let avatar_top_mm = landmarks.contact_top_mm + AVATAR_OFFSET_MM;
    let html = PRINT_TEMPLATE
        .replace("@@AVATAR_TOP_MM@@", &format!("{avatar_top_mm:.2}"))
        .replace("@@AVATAR_URL@@", avatar_url)
        .replace("@@CONTENT@@", content_html);
    PrintDocument {
        html,
        avatar_top_mm,
        avatar_url: avatar_url.to_string(),
    }
}

/// Single-page A4 template. Spacing is deliberately tight (point-based
/// margins) so a full resume fits one physical page; the print-media rules
/// scale to 0.98 to keep content clear of the page edges.
const PRINT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>
    :root {
      --text-color: #353a42;
      --primary-color: #4870ac;
      --link-color: #4c91da;
      --border-color: #dae3ea;
      --bg-color: #ffffff;
    }

    @page {
      size: A4;
      margin: 0;
    }

    * {
      margin: 0;
      padding: 0;
      box-sizing: border-box;
    }

    body {
      width: 210mm;
      height: 297mm;
      background: var(--bg-color);
      position: relative;
      overflow: hidden;
      margin: 0 auto;
    }

    .cv-page {
      width: 210mm;
      height: 297mm;
      padding: 15mm;
      background: var(--bg-color);
      font-size: 10pt;
      line-height: 1.3;
      color: var(--text-color);
      position: relative;
      overflow: hidden;
      page-break-after: always;
    }

    .cv-page > * {
      max-width: 100%;
    }

    p {
      margin: 2pt 0;
    }

    img[alt="avatar"] {
      display: none;
    }

    h1 {
      font-size: 16pt;
      text-align: center !important;
      margin-bottom: 10pt;
      padding-right: 0 !important;
      position: relative;
      z-index: 1;
      width: 100% !important;
    }

    h2 {
      font-size: 13pt;
      color: var(--primary-color);
      border-bottom: 1px solid var(--primary-color);
      margin-top: 5pt;
      margin-bottom: 4pt;
      padding-bottom: 2pt;
      position: relative;
    }

    ul {
      list-style-type: disc;
      margin: 2pt 0;
      padding-left: 12pt;
    }

    li {
      margin: 1pt 0;
      padding-right: 0;
    }

    a {
      color: var(--link-color);
      text-decoration: none;
      font-weight: normal;
    }

    hr {
      display: none;
    }

    section, div {
      margin-bottom: 3pt;
    }

    .avatar-layer {
      position: absolute;
      top: @@AVATAR_TOP_MM@@mm;
      right: 15mm;
      width: 40mm;
      height: 40mm;
      z-index: 100;
      background-image: url('@@AVATAR_URL@@');
      background-size: cover;
      background-position: center;
      border-radius: 50%;
      border: 2px solid var(--border-color);
      box-shadow: 0 0 0 2mm var(--bg-color);
    }

    @media print {
      body {
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
      }
      .cv-page {
        transform-origin: top left;
        transform: scale(0.98);
        page-break-inside: avoid;
        position: relative;
      }
      a {
        font-weight: normal;
        text-decoration: none !important;
      }
      h1 {
        text-align: center !important;
        padding-right: 0 !important;
        width: 100% !important;
        margin-left: auto !important;
        margin-right: auto !important;
      }
      .cv-page > p:first-of-type:not(:has(img)) {
        text-align: center !important;
        width: 100% !important;
        margin-left: auto !important;
        margin-right: auto !important;
      }
      .avatar-layer {
        position: absolute !important;
        top: @@AVATAR_TOP_MM@@mm !important;
        right: 15mm !important;
        width: 40mm !important;
        height: 40mm !important;
      }
    }
  </style>
</head>
<body>
  <div class="cv-page">
    @@CONTENT@@
    <div class="avatar-layer"></div>
  </div>
</body>
</html>
"#;
