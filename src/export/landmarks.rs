//! Landmark extraction.
//!
//! The print layout needs to know where a few named elements sit in the
//! rendered preview: the name heading and the contact-info and skills
//! section headings. Positions are measured in preview pixels and converted
//! to millimeters. A landmark that cannot be found falls back to a fixed
//! default so export never fails on a missing or unmatched heading.

use tracing::debug;

use crate::preview::{BlockKind, PreviewSnapshot};

/// Pixels per millimeter at 96 dpi (96 / 25.4, as used by the original
/// measurement code).
pub const PX_PER_MM: f64 = 3.78;

/// Default name-heading top when no `h1` is present, mm.
pub const DEFAULT_NAME_TOP_MM: f64 = 60.0;
/// Default contact-section top when no heading matches, mm.
pub const DEFAULT_CONTACT_TOP_MM: f64 = 120.0;
/// Default skills-section top when no heading matches, mm.
pub const DEFAULT_SKILLS_TOP_MM: f64 = 240.0;

/// Sections the print layout anchors on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The section introducing basic/contact information.
    Contact,
    /// The section introducing skills.
    Skills,
}

/// Classifies a section heading by its visible text.
///
/// Supplied by the caller so locale-specific section names stay out of the
/// core; [`default_section_matcher`] covers the stock templates.
pub type SectionMatcher = dyn Fn(&str) -> Option<SectionKind>;

/// Vertical positions of the landmark elements, mm from the preview top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmarks {
    pub name_top_mm: f64,
    pub contact_top_mm: f64,
    pub skills_top_mm: f64,
}

impl Default for Landmarks {
    fn default() -> Self {
        Self {
            name_top_mm: DEFAULT_NAME_TOP_MM,
            contact_top_mm: DEFAULT_CONTACT_TOP_MM,
            skills_top_mm: DEFAULT_SKILLS_TOP_MM,
        }
    }
}

/// Match section headings against the labels used by the stock resume
/// templates, both the English ones and the original Chinese ones.
pub fn default_section_matcher(text: &str) -> Option<SectionKind> {
    const CONTACT_LABELS: &[&str] = &["基本信息", "个人信息", "Basic Information", "Contact"];
    const SKILLS_LABELS: &[&str] = &["专业技能", "技能特长", "Skills"];

    if CONTACT_LABELS.iter().any(|label| text.contains(label)) {
        Some(SectionKind::Contact)
    } else if SKILLS_LABELS.iter().any(|label| text.contains(label)) {
        Some(SectionKind::Skills)
    } else {
        None
    }
}

/// Locate the landmark elements in a measured snapshot.
///
/// The first top-level `h1` is the name heading. Section landmarks are `h2`
/// blocks classified by `matcher`; the first match per section wins. Any
/// missing landmark takes its default offset.
pub fn extract_landmarks(snapshot: &PreviewSnapshot, matcher: &SectionMatcher) -> Landmarks {
    let mut landmarks = Landmarks::default();
    let mut found_name = false;
    let mut found_contact = false;
    let mut found_skills = false;

    for block in &snapshot.blocks {
        match block.kind {
            BlockKind::Heading(1) if !found_name => {
                landmarks.name_top_mm = block.top_px / PX_PER_MM;
                found_name = true;
            }
            BlockKind::Heading(2) => match matcher(&block.text) {
                Some(SectionKind::Contact) if !found_contact => {
                    landmarks.contact_top_mm = block.top_px / PX_PER_MM;
                    found_contact = true;
                }
                Some(SectionKind::Skills) if !found_skills => {
                    landmarks.skills_top_mm = block.top_px / PX_PER_MM;
                    found_skills = true;
                }
                _ => {}
            },
            _ => {}
        }
    }

    if !found_name {
        debug!("name heading not found, using default {DEFAULT_NAME_TOP_MM}mm");
    }
    if !found_contact {
        debug!("contact section not found, using default {DEFAULT_CONTACT_TOP_MM}mm");
    }
    if !found_skills {
        debug!("skills section not found, using default {DEFAULT_SKILLS_TOP_MM}mm");
    }

    landmarks
}
