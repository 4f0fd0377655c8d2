//! Library overlay: recent files and document actions

use eframe::egui;

use crate::app::ThinkMineApp;
use crate::core::document::display_name;

pub struct LibraryPanel;

impl LibraryPanel {
    /// Show the library window
    pub fn show(ctx: &egui::Context, app: &mut ThinkMineApp) {
        let mut open = app.library_visible;
        let mut chosen = None;

        egui::Window::new("Library")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("New").clicked() {
                        app.request_new_document();
                    }
                    if ui.button("Open...").clicked() {
                        app.open_document_dialog();
                    }
                    if ui.button("Save").clicked() && app.save_document() {
                        app.library_visible = false;
                    }
                    if ui.button("Save As...").clicked() && app.save_document_as() {
                        app.library_visible = false;
                    }
                });

                ui.separator();
                ui.label(egui::RichText::new("Recent").strong());

                let recent: Vec<_> = app.settings.recent_files.existing().cloned().collect();
                if recent.is_empty() {
                    ui.label(egui::RichText::new("No recent files").italics().weak());
                }
                for path in recent {
                    let response = ui
                        .selectable_label(false, display_name(&path))
                        .on_hover_text(path.display().to_string());
                    if response.clicked() {
                        chosen = Some(path);
                    }
                }
            });

        if let Some(path) = chosen {
            app.load_document(path);
        }
        if !open {
            app.library_visible = false;
        }
    }
}
