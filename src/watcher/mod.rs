//! External-change watching for the backing markdown file.
//!
//! The resume file may be edited by another program while a session is open.
//! The watcher observes the file's parent directory (editors that save via
//! rename never touch the original inode) and reports debounced changes the
//! session turns into a reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::debug;

/// Watches one markdown source file and reports debounced modifications.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    source_path: PathBuf,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl SourceWatcher {
    /// Watch `path` with the given debounce window.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the parent
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Canonicalize so the absolute paths in OS events compare equal to
        // ours.
        let source_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let watch_root = source_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            source_path,
            debounce,
            pending_since: None,
        })
    }

    /// The canonical path being watched.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Drain pending events; returns true once a debounced change is ready.
    pub fn poll_changed(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(event) if self.is_relevant(&event) => {
                    self.pending_since = Some(Instant::now());
                }
                Ok(event) => {
                    debug!(kind = ?event.kind, "ignoring event for other path");
                }
                Err(err) => {
                    debug!(%err, "watch error");
                }
            }
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        let name = self.source_path.file_name();
        event.paths.iter().any(|path| {
            path == &self.source_path
                || name.is_some_and(|name| path.file_name().is_some_and(|f| f == name))
                // Some backends only report the directory.
                || Some(path.as_path()) == self.source_path.parent()
        })
    }
}
