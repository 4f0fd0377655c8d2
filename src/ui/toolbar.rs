//! Top controls: style cyclers, focus timer, mode buttons

use std::time::Instant;

use eframe::egui;

use crate::app::ThinkMineApp;
use crate::core::onboarding::Target;
use crate::core::theme::Direction;
use crate::core::timer::TimerState;

use super::{color32, flat_button};

/// Row of controls above the editor
pub struct Toolbar;

impl Toolbar {
    /// Show the toolbar
    pub fn show(ui: &mut egui::Ui, app: &mut ThinkMineApp, now: Instant) {
        let color = color32(app.theme.text_color());
        let dim = color.gamma_multiply(0.4);

        ui.horizontal(|ui| {
            let align = flat_button(ui, app.theme.alignment.label(), color)
                .on_hover_text("Alignment");
            if align.clicked() {
                app.theme.cycle_alignment(Direction::Forward);
            }
            if align.secondary_clicked() {
                app.theme.cycle_alignment(Direction::Backward);
            }
            app.targets.insert(Target::AlignButton, align.rect);

            let font = flat_button(ui, app.theme.font_family(), color)
                .on_hover_text(app.theme.font_family());
            if font.clicked() {
                app.theme.cycle_font(Direction::Forward);
            }
            if font.secondary_clicked() {
                app.theme.cycle_font(Direction::Backward);
            }
            app.targets.insert(Target::FontButton, font.rect);

            // Click shrinks, right click grows
            let size = flat_button(ui, format!("{}", app.theme.font_size), color)
                .on_hover_text("Font size");
            if size.clicked() {
                app.theme.cycle_font_size(Direction::Backward);
            }
            if size.secondary_clicked() {
                app.theme.cycle_font_size(Direction::Forward);
            }
            app.targets.insert(Target::FontSizeButton, size.rect);

            let bold_color = if app.theme.bold { color } else { dim };
            let bold = flat_button(ui, egui::RichText::new("B").strong(), bold_color);
            if bold.clicked() {
                app.theme.toggle_bold();
            }
            app.targets.insert(Target::BoldButton, bold.rect);

            let italic_color = if app.theme.italic { color } else { dim };
            let italic = flat_button(ui, egui::RichText::new("I").italics(), italic_color);
            if italic.clicked() {
                app.theme.toggle_italic();
            }
            app.targets.insert(Target::ItalicButton, italic.rect);

            ui.separator();
            Self::show_timer(ui, app, color, now);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if flat_button(ui, "\u{2715}", color).on_hover_text("Close").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
                if flat_button(ui, "\u{25A1}", color).on_hover_text("Full screen").clicked() {
                    app.toggle_full_screen(ui.ctx());
                }
                if flat_button(ui, "\u{2013}", color).on_hover_text("Minimize").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Minimized(true));
                }

                ui.separator();

                let library = flat_button(ui, "Library", color);
                if library.clicked() {
                    app.library_visible = !app.library_visible;
                }
                app.targets.insert(Target::LibraryButton, library.rect);

                let mini = flat_button(ui, "Mini", color).on_hover_text("Mini mode");
                if mini.clicked() {
                    app.enter_mini_mode(ui.ctx());
                }
                app.targets.insert(Target::MiniModeButton, mini.rect);

                if let Some(ref update) = app.update {
                    let label = format!("Update {}", update.version);
                    let response = flat_button(ui, label, egui::Color32::from_rgb(46, 125, 50));
                    let response = if update.notes.is_empty() {
                        response
                    } else {
                        response.on_hover_text(update.notes.as_str())
                    };
                    if response.clicked() {
                        if let Err(e) = open::that(update.download_url()) {
                            tracing::warn!("Failed to open update page: {}", e);
                        }
                    }
                }
            });
        });
    }

    /// Countdown display, or the inline duration editor
    fn show_timer(ui: &mut egui::Ui, app: &mut ThinkMineApp, color: egui::Color32, now: Instant) {
        if let Some(buffer) = app.timer.edit_buffer_mut() {
            let response = ui.add(
                egui::TextEdit::singleline(buffer)
                    .desired_width(60.0)
                    .font(egui::TextStyle::Monospace),
            );
            if !response.has_focus() && !response.lost_focus() {
                response.request_focus();
            }
            app.targets.insert(Target::TimerDisplay, response.rect);

            if response.lost_focus() {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    app.timer.cancel_edit();
                } else if let Err(e) = app.timer.commit_edit() {
                    tracing::debug!("Ignoring timer input: {}", e);
                }
            }
            return;
        }

        let color = if app.timer.is_flashing(now) {
            egui::Color32::RED
        } else {
            match app.timer.state() {
                TimerState::Running => color,
                TimerState::Paused => color.gamma_multiply(0.7),
                TimerState::Idle => color.gamma_multiply(0.5),
            }
        };
        let display = flat_button(
            ui,
            egui::RichText::new(app.timer.display()).monospace().size(18.0),
            color,
        )
        .on_hover_text("Click to start/pause, right click to edit");
        if display.clicked() {
            app.timer.toggle(now);
        }
        if display.secondary_clicked() {
            app.timer.begin_edit();
        }
        app.targets.insert(Target::TimerDisplay, display.rect);
    }
}
