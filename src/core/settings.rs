//! Persisted user settings
//!
//! A flat record stored as JSON under the per-user local data directory.
//! Loading never fails: a missing or corrupt file yields defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recent::RecentFiles;
use super::theme::Alignment;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Window width in logical pixels
    pub window_width: f32,
    /// Window height in logical pixels
    pub window_height: f32,
    /// Window top edge
    pub window_top: f32,
    /// Window left edge
    pub window_left: f32,
    /// Whether the window is borderless full screen
    pub is_full_screen: bool,
    /// Index into the background palette
    pub background_index: usize,
    /// Editor font family name
    pub font_family: String,
    /// Editor font size in points
    pub font_size: f32,
    pub is_bold: bool,
    pub is_italic: bool,
    /// Last applied text colour as hex
    pub text_color: String,
    pub text_alignment: Alignment,
    /// Remaining seconds on the focus timer at exit
    pub last_timer_seconds: u32,
    pub is_first_run: bool,
    pub has_seen_tutorial: bool,
    /// Version that last showed the welcome screen
    pub last_version: String,
    /// Recently opened or saved documents
    pub recent_files: RecentFiles,
    /// Anonymous identifier sent with the launch beacon
    pub client_id: Uuid,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: 800.0,
            window_height: 600.0,
            window_top: 100.0,
            window_left: 100.0,
            is_full_screen: false,
            background_index: 0,
            font_family: "Inter".to_string(),
            font_size: 18.0,
            is_bold: false,
            is_italic: false,
            text_color: "#000000".to_string(),
            text_alignment: Alignment::Left,
            last_timer_seconds: 0,
            is_first_run: true,
            has_seen_tutorial: false,
            last_version: "0.0.0".to_string(),
            recent_files: RecentFiles::new(),
            client_id: Uuid::new_v4(),
        }
    }
}

impl AppSettings {
    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "thinkmine", "ThinkMine")
            .map(|dirs| dirs.data_local_dir().join("settings.json"))
    }

    /// Load settings from the per-user path, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("Could not determine settings directory, using defaults");
            return Self::default();
        };

        Self::load_or_default(&path)
    }

    /// Load settings from `path`; any failure is logged and yields defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path
    ///
    /// A missing file is not an error and yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let mut settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        settings.recent_files.enforce_limit();
        Ok(settings)
    }

    /// Save settings to the per-user path; failures are logged and dropped
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("Could not determine settings directory, not saving");
            return;
        };

        if let Err(e) = self.save_to(&path) {
            tracing::warn!("Failed to save settings: {:#}", e);
        }
    }

    /// Save settings to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings: {}", path.display()))?;

        tracing::debug!("Saved settings to: {}", path.display());
        Ok(())
    }

    /// Add a document to recent files
    pub fn add_recent_file(&mut self, path: impl Into<PathBuf>) {
        self.recent_files.push(path);
    }
}
