//! Main writing surface

use eframe::egui;

use crate::app::ThinkMineApp;
use crate::core::theme::Alignment;

use super::{color32, font_family};

/// Placeholder shown over an empty document
const PLACEHOLDER: &str = "Start writing...";

/// Full-window editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut ThinkMineApp) {
        let theme = &app.theme;
        let font_id = egui::FontId::new(theme.font_size, font_family(theme.font_family()));
        let text_color = color32(theme.text_color());
        let strong = theme.bold;
        let italics = theme.italic;
        let halign = match theme.alignment {
            Alignment::Left | Alignment::Justify => egui::Align::LEFT,
            Alignment::Center => egui::Align::Center,
            Alignment::Right => egui::Align::RIGHT,
        };

        let mut layouter = |ui: &egui::Ui, text: &dyn egui::TextBuffer, wrap_width: f32| {
            let format = egui::TextFormat {
                font_id: font_id.clone(),
                color: text_color,
                italics,
                // egui has no synthetic bold; widen the glyph spacing instead
                extra_letter_spacing: if strong { 0.6 } else { 0.0 },
                ..Default::default()
            };
            let mut job = egui::text::LayoutJob::single_section(text.as_str().to_owned(), format);
            job.wrap.max_width = wrap_width;
            job.halign = halign;
            ui.fonts(|f| f.layout_job(job))
        };

        let mut content = app.document.content.clone();
        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut content)
                    .frame(false)
                    .hint_text(egui::RichText::new(PLACEHOLDER).font(font_id.clone()))
                    .desired_width(f32::INFINITY)
                    .desired_rows(20)
                    .layouter(&mut layouter)
                    .show(ui);
            });
        app.document.set_content(content);
    }
}
