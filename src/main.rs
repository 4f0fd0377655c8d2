//! ThinkMine - distraction-free writing
//!
//! A single-window editor with calm themes, a focus timer and a mini mode.

mod app;
mod core;
mod services;
mod ui;

use app::ThinkMineApp;
use crate::core::{onboarding, settings::AppSettings};
use eframe::egui;
use services::config::APP_VERSION;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting ThinkMine {}...", APP_VERSION);

    let mut settings = AppSettings::load();

    // Decided before the window exists so the welcome opens full screen
    let show_welcome = onboarding::take_welcome(&mut settings, APP_VERSION);
    if show_welcome {
        settings.save();
    }

    let native_options = eframe::NativeOptions {
        viewport: build_viewport(&settings),
        ..Default::default()
    };

    eframe::run_native(
        "ThinkMine",
        native_options,
        Box::new(move |cc| Ok(Box::new(ThinkMineApp::new(cc, settings, show_welcome)))),
    )
}

/// Window from the saved geometry
fn build_viewport(settings: &AppSettings) -> egui::ViewportBuilder {
    let mut viewport = egui::ViewportBuilder::default()
        .with_min_inner_size([360.0, 240.0])
        .with_title("ThinkMine")
        .with_fullscreen(settings.is_full_screen);
    if settings.window_width > 0.0 && settings.window_height > 0.0 {
        viewport = viewport.with_inner_size([settings.window_width, settings.window_height]);
    }
    viewport.with_position([settings.window_left, settings.window_top])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_launch_opens_full_screen() {
        let mut settings = AppSettings::default();
        assert!(onboarding::take_welcome(&mut settings, APP_VERSION));
        assert_eq!(build_viewport(&settings).fullscreen, Some(true));
    }

    #[test]
    fn test_viewport_uses_saved_geometry() {
        let settings = AppSettings {
            window_width: 1024.0,
            window_height: 700.0,
            window_left: 40.0,
            window_top: 30.0,
            ..AppSettings::default()
        };
        let viewport = build_viewport(&settings);
        assert_eq!(viewport.fullscreen, Some(false));
        assert_eq!(viewport.inner_size, Some(egui::vec2(1024.0, 700.0)));
        assert_eq!(viewport.position, Some(egui::pos2(40.0, 30.0)));
    }
}
