//! UI components for ThinkMine

pub mod editor;
pub mod library;
pub mod mini_mode;
pub mod overlays;
pub mod status;
pub mod toolbar;

use eframe::egui;

use crate::core::theme::Rgb;

/// Convert a theme colour to egui's
pub fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Families rendered with egui's monospace font
const MONOSPACE_FONTS: [&str; 3] = ["Space Mono", "Fira Code", "Courier Prime"];

/// Closest built-in egui family for a named font
pub fn font_family(name: &str) -> egui::FontFamily {
    if MONOSPACE_FONTS.contains(&name) {
        egui::FontFamily::Monospace
    } else {
        egui::FontFamily::Proportional
    }
}

/// Label-style button used across the toolbar
pub fn flat_button(
    ui: &mut egui::Ui,
    text: impl Into<egui::RichText>,
    color: egui::Color32,
) -> egui::Response {
    ui.add(
        egui::Button::new(text.into().color(color))
            .frame(false)
            .sense(egui::Sense::click()),
    )
}
