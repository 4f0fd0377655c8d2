//! First-run welcome and the guided tutorial

use std::time::{Duration, Instant};

use super::delay::Delayed;
use super::settings::AppSettings;

pub const WELCOME_MESSAGE: &str = "Welcome to ThinkMine :P";

/// Delay between typed characters of the welcome message
pub const TYPE_INTERVAL: Duration = Duration::from_millis(100);

/// Clicks on "Next" within this window after a step change are ignored
pub const NEXT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Control highlighted by a tutorial step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    AlignButton,
    FontButton,
    FontSizeButton,
    BoldButton,
    ItalicButton,
    TimerDisplay,
    MiniModeButton,
    LibraryButton,
}

#[derive(Debug, Clone, Copy)]
pub struct TutorialStep {
    pub target: Target,
    pub title: &'static str,
    pub instruction: &'static str,
}

pub static TUTORIAL_STEPS: [TutorialStep; 8] = [
    TutorialStep {
        target: Target::AlignButton,
        title: "Text Alignment",
        instruction: "Click to cycle through Left, Center, Right, and Justify alignment. Right-click to go backwards.",
    },
    TutorialStep {
        target: Target::FontButton,
        title: "Font Selection",
        instruction: "Click to cycle through available fonts. Right-click to go backwards.",
    },
    TutorialStep {
        target: Target::FontSizeButton,
        title: "Font Size",
        instruction: "Click to decrease font size. Right-click to increase.",
    },
    TutorialStep {
        target: Target::BoldButton,
        title: "Bold Text",
        instruction: "Click to toggle bold formatting.",
    },
    TutorialStep {
        target: Target::ItalicButton,
        title: "Italic Text",
        instruction: "Click to toggle italic formatting.",
    },
    TutorialStep {
        target: Target::TimerDisplay,
        title: "Focus Timer",
        instruction: "Click to start/pause the timer. Right-click to edit the duration.",
    },
    TutorialStep {
        target: Target::MiniModeButton,
        title: "Mini Mode (Docker)",
        instruction: "Click to enter Mini Mode - a compact overlay that stays on top of other windows.",
    },
    TutorialStep {
        target: Target::LibraryButton,
        title: "Library",
        instruction: "Access your saved files, create new documents, and manage your work.",
    },
];

/// Whether this launch should show the welcome screen
pub fn needs_welcome(settings: &AppSettings, version: &str) -> bool {
    settings.is_first_run || settings.last_version != version
}

/// Record that the welcome for `version` was shown
///
/// The welcome always opens full screen.
pub fn mark_welcomed(settings: &mut AppSettings, version: &str) {
    settings.is_full_screen = true;
    settings.is_first_run = false;
    settings.last_version = version.to_string();
}

/// Check for a welcome and record it in `settings`
///
/// Returns whether this launch shows the welcome.
pub fn take_welcome(settings: &mut AppSettings, version: &str) -> bool {
    if !needs_welcome(settings, version) {
        return false;
    }
    mark_welcomed(settings, version);
    true
}

/// Typewriter reveal of the welcome message
#[derive(Debug, Clone)]
pub struct Welcome {
    started: Instant,
}

impl Welcome {
    pub fn new(now: Instant) -> Self {
        Self { started: now }
    }

    /// Prefix of the message typed so far
    pub fn visible_text(&self, now: Instant) -> &'static str {
        let elapsed = now.saturating_duration_since(self.started);
        let typed = (elapsed.as_millis() / TYPE_INTERVAL.as_millis()) as usize;
        let end = WELCOME_MESSAGE
            .char_indices()
            .nth(typed)
            .map(|(i, _)| i)
            .unwrap_or(WELCOME_MESSAGE.len());
        &WELCOME_MESSAGE[..end]
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.visible_text(now).len() == WELCOME_MESSAGE.len()
    }
}

/// Outcome of advancing the tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialProgress {
    /// Now showing the step at this index
    Step(usize),
    /// Past the last step
    Completed,
    /// Click swallowed by the debounce
    Ignored,
}

/// Linear walk through `TUTORIAL_STEPS`
#[derive(Debug, Clone, Default)]
pub struct Tutorial {
    step: usize,
    debounce: Delayed,
}

impl Tutorial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&'static TutorialStep> {
        TUTORIAL_STEPS.get(self.step)
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    /// "Next" button
    pub fn next(&mut self, now: Instant) -> TutorialProgress {
        if self.debounce.take_expired(now) || !self.debounce.is_armed() {
            self.step += 1;
            self.debounce.arm(now, NEXT_DEBOUNCE);
            if self.step >= TUTORIAL_STEPS.len() {
                TutorialProgress::Completed
            } else {
                TutorialProgress::Step(self.step)
            }
        } else {
            TutorialProgress::Ignored
        }
    }
}

/// Persist that the tutorial has been finished or skipped
pub fn mark_tutorial_seen(settings: &mut AppSettings) {
    settings.has_seen_tutorial = true;
    settings.save();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_welcome() {
        let mut settings = AppSettings::default();
        assert!(needs_welcome(&settings, "1.1.1"));

        mark_welcomed(&mut settings, "1.1.1");
        assert!(settings.is_full_screen);
        assert!(!needs_welcome(&settings, "1.1.1"));
        assert!(needs_welcome(&settings, "1.2.0"));
    }

    #[test]
    fn test_take_welcome_once_per_version() {
        let mut settings = AppSettings {
            is_first_run: false,
            last_version: "1.0.0".to_string(),
            ..AppSettings::default()
        };
        assert!(take_welcome(&mut settings, "1.1.1"));
        assert!(settings.is_full_screen);
        assert_eq!(settings.last_version, "1.1.1");

        settings.is_full_screen = false;
        assert!(!take_welcome(&mut settings, "1.1.1"));
        assert!(!settings.is_full_screen);
    }

    #[test]
    fn test_welcome_types_one_char_per_interval() {
        let start = Instant::now();
        let welcome = Welcome::new(start);
        assert_eq!(welcome.visible_text(start), "");
        assert_eq!(welcome.visible_text(start + Duration::from_millis(350)), "Wel");
        assert!(!welcome.is_complete(start + Duration::from_millis(350)));
        assert!(welcome.is_complete(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_tutorial_walks_every_step() {
        let mut now = Instant::now();
        let mut tutorial = Tutorial::new();
        assert_eq!(tutorial.current().map(|s| s.target), Some(Target::AlignButton));

        for expected in 1..TUTORIAL_STEPS.len() {
            assert_eq!(tutorial.next(now), TutorialProgress::Step(expected));
            now += NEXT_DEBOUNCE;
        }
        assert_eq!(tutorial.current().map(|s| s.title), Some("Library"));
        assert_eq!(tutorial.next(now), TutorialProgress::Completed);
        assert!(tutorial.current().is_none());
    }

    #[test]
    fn test_double_click_does_not_skip_steps() {
        let now = Instant::now();
        let mut tutorial = Tutorial::new();
        assert_eq!(tutorial.next(now), TutorialProgress::Step(1));
        assert_eq!(
            tutorial.next(now + Duration::from_millis(50)),
            TutorialProgress::Ignored
        );
        assert_eq!(tutorial.step_index(), 1);
        assert_eq!(
            tutorial.next(now + Duration::from_millis(600)),
            TutorialProgress::Step(2)
        );
    }
}
