//! Bottom info line: clock and document name

use eframe::egui;

use crate::app::ThinkMineApp;

use super::color32;

/// `Monday, Mar 04 | 9:07 AM`
const CLOCK_FORMAT: &str = "%A, %b %d | %-I:%M %p";

pub struct StatusBar;

impl StatusBar {
    pub fn show(ui: &mut egui::Ui, app: &ThinkMineApp) {
        let color = color32(app.theme.text_color()).gamma_multiply(0.6);
        ui.horizontal(|ui| {
            let clock = chrono::Local::now().format(CLOCK_FORMAT).to_string();
            ui.label(egui::RichText::new(clock).color(color));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let title = if app.document.dirty {
                    format!("{}*", app.document.title())
                } else {
                    app.document.title()
                };
                ui.label(egui::RichText::new(title).color(color));
            });
        });
    }
}
