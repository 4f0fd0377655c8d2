//! Modal overlays: welcome, tutorial spotlight, unsaved-changes prompt

use std::time::Instant;

use eframe::egui;

use crate::app::{PendingAction, ThinkMineApp};
use crate::core::onboarding::TUTORIAL_STEPS;

/// Dimmed full-screen backdrop, returns whether it was clicked
fn backdrop(ctx: &egui::Context, id: &str) -> bool {
    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new(id))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let response = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
            response.clicked()
        })
        .inner
}

/// Typewriter welcome; a click anywhere dismisses it
pub fn show_welcome(ctx: &egui::Context, app: &mut ThinkMineApp, now: Instant) {
    let Some(welcome) = &app.welcome else {
        return;
    };
    let text = welcome.visible_text(now);
    let complete = welcome.is_complete(now);

    let clicked = backdrop(ctx, "welcome_backdrop");
    egui::Area::new(egui::Id::new("welcome_text"))
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .size(42.0)
                    .color(egui::Color32::WHITE),
            );
            if complete {
                ui.label(egui::RichText::new("Click anywhere to begin").color(egui::Color32::GRAY));
            }
        });

    if clicked {
        app.dismiss_welcome();
    }
}

/// Spotlight around the current target with Next / Skip
pub fn show_tutorial(ctx: &egui::Context, app: &mut ThinkMineApp, now: Instant) {
    let Some((index, step)) = app
        .tutorial
        .as_ref()
        .and_then(|t| Some((t.step_index(), t.current()?)))
    else {
        return;
    };

    let spotlight = app.targets.get(&step.target).map(|r| r.expand(5.0));
    if let Some(rect) = spotlight {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("tutorial_spotlight"),
        ));
        painter.rect_stroke(
            rect,
            egui::CornerRadius::same(6),
            egui::Stroke::new(2.0, egui::Color32::from_rgb(255, 193, 7)),
            egui::StrokeKind::Outside,
        );
    }

    let mut next = false;
    let mut skip = false;
    let window = egui::Window::new(step.title)
        .id(egui::Id::new("tutorial_window"))
        .collapsible(false)
        .resizable(false)
        .title_bar(true);
    let window = match spotlight {
        Some(rect) => window.fixed_pos(rect.left_bottom() + egui::vec2(0.0, 12.0)),
        None => window.anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO),
    };
    window.show(ctx, |ui| {
        ui.set_max_width(320.0);
        ui.label(step.instruction);
        ui.add_space(8.0);
        ui.weak(format!("Step {} of {}", index + 1, TUTORIAL_STEPS.len()));
        ui.horizontal(|ui| {
            skip = ui.button("Skip").clicked();
            next = ui.button("Next").clicked();
        });
    });

    if skip {
        app.finish_tutorial();
    } else if next {
        app.tutorial_next(now);
    }
}

/// Save / Don't Save / Cancel for pending exit or new document
pub fn show_unsaved_prompt(ctx: &egui::Context, app: &mut ThinkMineApp) {
    let Some(action) = app.pending else {
        return;
    };
    let question = match action {
        PendingAction::Exit => "Save changes before closing?",
        PendingAction::NewDocument => "Save changes before starting a new document?",
    };

    backdrop(ctx, "unsaved_backdrop");

    let mut choice = None;
    egui::Window::new("Unsaved changes")
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(question);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    choice = Some(Some(true));
                }
                if ui.button("Don't Save").clicked() {
                    choice = Some(Some(false));
                }
                if ui.button("Cancel").clicked() {
                    choice = Some(None);
                }
            });
        });

    match choice {
        Some(Some(save)) => app.resolve_pending(ctx, save),
        Some(None) => app.cancel_pending(),
        None => {}
    }
}
