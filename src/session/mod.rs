//! Document session state and wiring.
//!
//! Follows The Elm Architecture split:
//! - [`Model`]: the complete session state
//! - [`Message`]: everything a host can feed in
//! - [`update`]: pure state transitions returning [`Effect`]s
//! - [`Session`]: executes persistence and export effects, hands the rest
//!   (scroll drives, reloads) back to the host UI layer

mod model;
mod update;

pub use model::{DEFAULT_VIEWPORT_PX, Model, Notice, NoticeLevel};
pub use update::{Effect, Message, update};

use std::time::Instant;

use crate::export::{PdfExporter, Rasterizer};
use crate::storage::{CONTENT_KEY, Storage, load_or_template};
use crate::theme::{load_theme, save_theme};

/// One open document session.
///
/// Owns the model, the storage backend, and the exporter. `handle` applies a
/// message, runs the storage/export effects internally, and returns the
/// effects the host must apply to its widgets.
pub struct Session<R, S> {
    model: Model,
    storage: S,
    exporter: PdfExporter<R>,
    last_pdf: Option<Vec<u8>>,
}

impl<R: Rasterizer, S: Storage> Session<R, S> {
    /// Open a session from storage, falling back to the built-in template.
    pub fn open(storage: S, exporter: PdfExporter<R>) -> Self {
        let content = load_or_template(&storage);
        let theme = load_theme(&storage);
        Self {
            model: Model::new(content, theme),
            storage,
            exporter,
            last_pdf: None,
        }
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Drain queued user-facing notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.model.take_notices()
    }

    /// Take the bytes of the most recent successful export.
    pub fn take_pdf(&mut self) -> Option<Vec<u8>> {
        self.last_pdf.take()
    }

    /// Apply one message and return the effects left for the host.
    pub fn handle(&mut self, msg: Message, now: Instant) -> Vec<Effect> {
        let mut host_effects = Vec::new();
        for effect in update(&mut self.model, msg, now) {
            match effect {
                Effect::PersistContent(content) => {
                    if let Err(err) = self.storage.save(CONTENT_KEY, &content) {
                        self.model
                            .push_notice(NoticeLevel::Error, format!("Save failed: {err}"));
                    }
                }
                Effect::PersistTheme(theme) => {
                    if let Err(err) = save_theme(&mut self.storage, theme) {
                        self.model
                            .push_notice(NoticeLevel::Warning, format!("Theme not saved: {err}"));
                    }
                }
                Effect::RunExport => {
                    let followup = match self.exporter.export(&self.model.snapshot) {
                        Ok(bytes) => {
                            let len = bytes.len();
                            self.last_pdf = Some(bytes);
                            Message::ExportSucceeded(len)
                        }
                        Err(err) => Message::ExportFailed(err.to_string()),
                    };
                    host_effects.extend(self.handle(followup, now));
                }
                other => host_effects.push(other),
            }
        }
        host_effects
    }
}
