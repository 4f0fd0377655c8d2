//! Plain-text document buffer

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};

/// Save dialog filters as (name, extensions)
pub const SAVE_FILTERS: [(&str, &[&str]); 3] = [
    ("ThinkMine Files", &["tm"]),
    ("Text Files", &["txt"]),
    ("All Files", &["*"]),
];

/// Open dialog filters as (name, extensions)
pub const OPEN_FILTERS: [(&str, &[&str]); 2] = [
    ("Text Files", &["txt", "tm"]),
    ("All Files", &["*"]),
];

/// Result of a plain save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the document's path
    Saved,
    /// Document has no path yet; the caller should run Save As
    NeedsPath,
}

/// The document being edited
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// File path, `None` until first saved or opened
    pub path: Option<PathBuf>,
    /// Document text
    pub content: String,
    /// Whether the document has unsaved changes
    pub dirty: bool,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document from a file
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        tracing::info!("Opened document: {}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            content,
            dirty: false,
        })
    }

    /// Write to the current path, if there is one
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let Some(path) = self.path.clone() else {
            return Ok(SaveOutcome::NeedsPath);
        };
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to save file: {}", path.display()))?;
        self.dirty = false;
        tracing::info!("Saved document: {}", path.display());
        Ok(SaveOutcome::Saved)
    }

    /// Adopt `path` and write to it
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.path = Some(path);
        self.save()?;
        Ok(())
    }

    /// Replace the text, marking the document dirty when it changed
    pub fn set_content(&mut self, content: String) {
        if self.content != content {
            self.content = content;
            self.dirty = true;
        }
    }

    /// Title for the window and library
    pub fn title(&self) -> String {
        self.path
            .as_deref()
            .map(display_name)
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

/// File name with a `.tm` or `.txt` extension stripped
pub fn display_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    [".tm", ".txt"]
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .map(str::to_string)
        .unwrap_or(name)
}

/// Suggested file name for Save As
pub fn default_save_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Thoughts-{}", now.format("%Y-%m-%d_%H-%M"))
}
