//! Mini mode overlay

use std::time::Instant;

use eframe::egui;

use crate::app::ThinkMineApp;
use crate::core::mini_mode::{MAX_OPACITY, MIN_OPACITY};

use super::{color32, flat_button};

pub struct MiniModePanel;

impl MiniModePanel {
    /// Replace the editor with the compact preview drawer
    pub fn show(ctx: &egui::Context, app: &mut ThinkMineApp, now: Instant) {
        let opacity = app.mini_mode.opacity();
        let fill = color32(app.theme.background()).gamma_multiply(opacity);
        let text_color = color32(app.theme.text_color()).gamma_multiply(opacity.max(0.6));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(fill).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    if flat_button(ui, app.mini_mode.drawer_icon(), text_color)
                        .on_hover_text("Toggle drawer")
                        .clicked()
                    {
                        app.mini_mode.toggle_drawer();
                    }

                    if !app.mini_mode.is_drawer_open() {
                        return;
                    }

                    let copied = app.mini_mode.is_showing_copied(now);
                    let preview = app.mini_mode.preview(&app.document.content, now);
                    let preview_color = if copied {
                        egui::Color32::from_rgb(46, 125, 50)
                    } else {
                        text_color
                    };
                    egui::ScrollArea::vertical()
                        .id_salt("mini_preview")
                        .max_height(120.0)
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(preview).color(preview_color));
                        });

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        let mut value = app.mini_mode.opacity();
                        let slider = egui::Slider::new(&mut value, MIN_OPACITY..=MAX_OPACITY)
                            .show_value(false);
                        if ui.add(slider).on_hover_text("Opacity").changed() {
                            app.mini_mode.set_opacity(value);
                        }

                        if flat_button(ui, "Copy", text_color).clicked() {
                            ui.ctx().copy_text(app.document.content.clone());
                            app.mini_mode.mark_copied(now);
                        }
                        if flat_button(ui, "Full", text_color)
                            .on_hover_text("Back to full mode")
                            .clicked()
                        {
                            app.exit_mini_mode(ui.ctx());
                        }
                    });
                });
            });

        if app.mini_mode.is_showing_copied(now) {
            ctx.request_repaint_after(crate::core::mini_mode::COPIED_DURATION);
        }
    }
}
