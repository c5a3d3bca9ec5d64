use std::time::Instant;

use crate::session::model::{Model, NoticeLevel};
use crate::sync::SyncOutcome;

/// All events a host can feed into a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The editor widget's text changed.
    ContentChanged(String),
    /// The user scrolled the editor pane to this offset, px.
    SourceScrolled(f64),
    /// The user scrolled the preview pane to this offset, px.
    TargetScrolled(f64),
    /// The user asked for a PDF export.
    ExportRequested,
    /// An export finished with this many PDF bytes.
    ExportSucceeded(usize),
    /// An export failed with a human-readable message.
    ExportFailed(String),
    /// The user toggled light/dark theme.
    ThemeToggled,
    /// The user asked to save the document explicitly.
    SaveRequested,
    /// The backing file changed on disk.
    FileChanged,
    /// A pane was resized (editor viewport px, preview viewport px).
    PanesResized(f64, f64),
}

/// Follow-up work an update asks for.
///
/// Persistence and export run inside [`super::Session`]; scroll drives and
/// reloads are applied by the host UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistContent(String),
    PersistTheme(crate::theme::Theme),
    RunExport,
    /// Drive the preview widget to this scroll offset, px.
    DriveTarget(f64),
    /// Drive the editor widget to this scroll offset, px.
    DriveSource(f64),
    /// Re-read the backing file and feed it back as `ContentChanged`.
    Reload,
}

/// Apply a message to the model and return the follow-up effects.
///
/// All state transitions happen here; no I/O does.
pub fn update(model: &mut Model, msg: Message, now: Instant) -> Vec<Effect> {
    match msg {
        Message::ContentChanged(content) => {
            model.set_content(content.clone());
            vec![Effect::PersistContent(content)]
        }
        Message::SourceScrolled(offset) => match model.sync.on_source_scroll(offset, now) {
            SyncOutcome::Applied(driven) => vec![Effect::DriveTarget(driven)],
            SyncOutcome::Suppressed | SyncOutcome::Detached => Vec::new(),
        },
        Message::TargetScrolled(offset) => match model.sync.on_target_scroll(offset, now) {
            SyncOutcome::Applied(driven) => vec![Effect::DriveSource(driven)],
            SyncOutcome::Suppressed | SyncOutcome::Detached => Vec::new(),
        },
        Message::ExportRequested => {
            if model.export_in_flight {
                model.push_notice(NoticeLevel::Warning, "Export already in progress");
                Vec::new()
            } else {
                model.export_in_flight = true;
                vec![Effect::RunExport]
            }
        }
        Message::ExportSucceeded(bytes) => {
            model.export_in_flight = false;
            model.push_notice(NoticeLevel::Info, format!("PDF exported ({bytes} bytes)"));
            Vec::new()
        }
        Message::ExportFailed(message) => {
            model.export_in_flight = false;
            model.push_notice(NoticeLevel::Error, format!("PDF export failed: {message}"));
            Vec::new()
        }
        Message::ThemeToggled => {
            model.theme = model.theme.toggle();
            vec![Effect::PersistTheme(model.theme)]
        }
        Message::SaveRequested => {
            model.push_notice(NoticeLevel::Info, "Resume saved");
            vec![Effect::PersistContent(model.content.clone())]
        }
        Message::FileChanged => vec![Effect::Reload],
        Message::PanesResized(editor_px, preview_px) => {
            model.set_viewports(editor_px, preview_px);
            Vec::new()
        }
    }
}
