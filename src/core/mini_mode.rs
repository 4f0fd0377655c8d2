//! Mini mode: a compact always-on-top overlay with a live preview

use std::time::{Duration, Instant};

use super::delay::Delayed;

/// Preview shown when the document is blank
pub const PLACEHOLDER_PREVIEW: &str = "Start writing...";

pub const COPIED_FEEDBACK: &str = "Copied!";

/// How long the copy feedback replaces the preview
pub const COPIED_DURATION: Duration = Duration::from_millis(1000);

pub const MIN_OPACITY: f32 = 0.2;
pub const MAX_OPACITY: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct MiniMode {
    active: bool,
    drawer_open: bool,
    opacity: f32,
    copied: Delayed,
}

impl Default for MiniMode {
    fn default() -> Self {
        Self {
            active: false,
            drawer_open: true,
            opacity: MAX_OPACITY,
            copied: Delayed::new(),
        }
    }
}

impl MiniMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Switch to the overlay; the drawer always reopens
    pub fn enter(&mut self) {
        self.active = true;
        self.drawer_open = true;
        tracing::debug!("Entered mini mode");
    }

    /// Back to the full editor
    pub fn exit(&mut self) {
        self.active = false;
        self.copied.cancel();
        tracing::debug!("Left mini mode");
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Drawer tab glyph: `^` collapses an open drawer, `v` expands it
    pub fn drawer_icon(&self) -> &'static str {
        if self.drawer_open {
            "^"
        } else {
            "v"
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(MIN_OPACITY, MAX_OPACITY);
    }

    /// Start the "Copied!" feedback
    pub fn mark_copied(&mut self, now: Instant) {
        self.copied.arm(now, COPIED_DURATION);
    }

    /// Whether the copy feedback is showing
    pub fn is_showing_copied(&mut self, now: Instant) -> bool {
        if self.copied.take_expired(now) {
            return false;
        }
        self.copied.is_pending(now)
    }

    /// Text for the overlay at `now`
    pub fn preview(&mut self, document_text: &str, now: Instant) -> String {
        if self.is_showing_copied(now) {
            COPIED_FEEDBACK.to_string()
        } else {
            preview_text(document_text)
        }
    }
}

/// Trimmed document text, or the placeholder when blank
pub fn preview_text(document_text: &str) -> String {
    let trimmed = document_text.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_PREVIEW.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_text() {
        assert_eq!(preview_text("   \n\t"), PLACEHOLDER_PREVIEW);
        assert_eq!(preview_text("\n  an idea  \n"), "an idea");
    }

    #[test]
    fn test_enter_resets_drawer() {
        let mut mini = MiniMode::new();
        mini.enter();
        mini.toggle_drawer();
        assert_eq!(mini.drawer_icon(), "v");
        mini.exit();
        mini.enter();
        assert!(mini.is_drawer_open());
        assert!(mini.is_active());
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut mini = MiniMode::new();
        mini.set_opacity(0.0);
        assert_eq!(mini.opacity(), MIN_OPACITY);
        mini.set_opacity(3.0);
        assert_eq!(mini.opacity(), MAX_OPACITY);
        mini.set_opacity(0.5);
        assert_eq!(mini.opacity(), 0.5);
    }

    #[test]
    fn test_copied_feedback_reverts() {
        let now = Instant::now();
        let mut mini = MiniMode::new();
        mini.enter();
        mini.mark_copied(now);
        assert_eq!(mini.preview("draft", now + Duration::from_millis(10)), COPIED_FEEDBACK);
        assert_eq!(mini.preview("draft", now + COPIED_DURATION), "draft");
    }
}
