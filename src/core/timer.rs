//! Countdown focus timer
//!
//! Ticks once per second while running. Clicking toggles run/pause, right
//! clicking opens an inline editor for the duration.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::delay::Delayed;

/// Interval between ticks
pub const TICK: Duration = Duration::from_secs(1);

/// How long the display stays red after the countdown ends
pub const FINISH_FLASH: Duration = Duration::from_millis(800);

/// Duration loaded when a new document is started
pub const NEW_DOCUMENT_SECONDS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown reached zero on this tick
    Finished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerParseError {
    #[error("empty duration")]
    Empty,
    #[error("expected \"m\" or \"m:ss\", got {0:?}")]
    BadFormat(String),
    #[error("duration too large: {0:?}")]
    Overflow(String),
}

/// Parse a duration typed into the timer editor
///
/// `"25"` is 25 minutes, `"12:30"` is 12 minutes 30 seconds. Seconds are not
/// limited to 59.
pub fn parse_duration(text: &str) -> Result<u32, TimerParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimerParseError::Empty);
    }

    let number = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| TimerParseError::BadFormat(text.to_string()))
    };

    let (minutes, seconds) = match text.split_once(':') {
        Some((m, s)) if !s.contains(':') => (number(m)?, number(s)?),
        Some(_) => return Err(TimerParseError::BadFormat(text.to_string())),
        None => (number(text)?, 0),
    };

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| TimerParseError::Overflow(text.to_string()))
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_duration(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// The focus timer
#[derive(Debug, Clone, Default)]
pub struct FocusTimer {
    remaining: u32,
    state: TimerState,
    next_tick: Option<Instant>,
    /// Text of the inline editor while editing
    edit_buffer: Option<String>,
    flash: Delayed,
}

impl FocusTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: seconds,
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    pub fn display(&self) -> String {
        format_duration(self.remaining)
    }

    /// Stop and load a new duration
    pub fn reset(&mut self, seconds: u32) {
        self.remaining = seconds;
        self.state = TimerState::Idle;
        self.next_tick = None;
    }

    /// Click: pause a running timer, otherwise start it. Ignored while editing.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_editing() {
            return;
        }
        if self.is_running() {
            self.state = TimerState::Paused;
            self.next_tick = None;
            tracing::debug!("Timer paused at {}", self.display());
        } else {
            self.state = TimerState::Running;
            self.next_tick = Some(now + TICK);
            tracing::debug!("Timer started at {}", self.display());
        }
    }

    /// Process every tick due by `now`
    pub fn advance(&mut self, now: Instant) -> Option<TimerEvent> {
        let mut event = None;
        while let Some(due) = self.next_tick {
            if now < due {
                break;
            }
            self.next_tick = Some(due + TICK);
            if let Some(e) = self.tick(due) {
                event = Some(e);
            }
        }
        event
    }

    /// One interval elapsed
    fn tick(&mut self, at: Instant) -> Option<TimerEvent> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.remaining > 0 {
            return None;
        }

        self.state = TimerState::Idle;
        self.next_tick = None;
        self.flash.arm(at, FINISH_FLASH);
        tracing::info!("Focus timer finished");
        Some(TimerEvent::Finished)
    }

    /// Time until the next tick, for scheduling a repaint
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|t| t.saturating_duration_since(now))
    }

    /// Time until the finish flash ends, for scheduling a repaint
    pub fn until_flash_end(&self, now: Instant) -> Option<Duration> {
        self.flash.remaining(now)
    }

    /// Whether the finish flash is showing
    pub fn is_flashing(&mut self, now: Instant) -> bool {
        if self.flash.take_expired(now) {
            return false;
        }
        self.flash.is_pending(now)
    }

    /// Right click: open the inline editor pre-filled with the display
    pub fn begin_edit(&mut self) {
        if !self.is_editing() {
            self.edit_buffer = Some(self.display());
        }
    }

    /// Mutable access to the editor text
    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        self.edit_buffer.as_mut()
    }

    /// Enter or focus lost: apply the edited duration if it parses
    ///
    /// Invalid text closes the editor and leaves the countdown unchanged.
    pub fn commit_edit(&mut self) -> Result<(), TimerParseError> {
        let Some(text) = self.edit_buffer.take() else {
            return Ok(());
        };
        let seconds = parse_duration(&text)?;
        self.remaining = seconds;
        Ok(())
    }

    /// Escape: close the editor without changes
    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }
}
