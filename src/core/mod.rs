//! Core state: settings, document, theming, timer and onboarding

pub mod delay;
pub mod document;
pub mod mini_mode;
pub mod onboarding;
pub mod recent;
pub mod settings;
pub mod theme;
pub mod timer;
