//! Persistent storage for document text and small settings.
//!
//! The core only needs `load`/`save` by key; whether that is backed by files,
//! browser storage, or an HTTP endpoint is the host's business. The file
//! backend stores one file per key in a directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

/// Storage key for the resume markdown source.
pub const CONTENT_KEY: &str = "resume-content";
/// Storage key for the persisted theme choice.
pub const THEME_KEY: &str = "theme";

/// The built-in resume template, used when no saved document exists.
pub const DEFAULT_TEMPLATE: &str = "\
# My Resume

## Basic Information

- Name:
- Age:
- Email:
- Phone:

## Education

- School:
- Major:
- Degree:
- Years:

## Work Experience

### Company (xxxx.xx - xxxx.xx)

- Role:
- Responsibilities:
- Achievements:

## Skills

- Languages:
- Tools:
- Frameworks:

## Projects

### Project Name

- Description:
- Stack:
- Contribution:
- Outcome:
";

/// Narrow persistence contract.
pub trait Storage {
    /// Load the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key storage rooted in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage dir {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// In-memory storage for tests and browser-like hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load the saved document, falling back to the built-in template when the
/// document is absent or the store is unreadable.
pub fn load_or_template(storage: &dyn Storage) -> String {
    match storage.load(CONTENT_KEY) {
        Ok(Some(content)) => content,
        Ok(None) => DEFAULT_TEMPLATE.to_string(),
        Err(err) => {
            warn!(%err, "storage unreadable, starting from template");
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

/// Read a document straight from a markdown file, falling back to the
/// template when the file does not exist.
///
/// # Errors
/// Returns an error only when the file exists but cannot be read.
pub fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(DEFAULT_TEMPLATE.to_string());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
