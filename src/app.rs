//! Main application state and UI coordination

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::core::{
    document::{self, Document, SaveOutcome},
    mini_mode::MiniMode,
    onboarding::{self, Target, Tutorial, TutorialProgress, Welcome},
    settings::AppSettings,
    theme::{Direction, Theme},
    timer::{FocusTimer, TimerEvent, NEW_DOCUMENT_SECONDS},
};
use crate::services::{update::UpdateInfo, ServiceEvent, Services};
use crate::ui::{
    editor::EditorPanel, library::LibraryPanel, mini_mode::MiniModePanel, overlays,
    status::StatusBar, toolbar::Toolbar,
};

/// What to do once the unsaved-changes prompt is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Exit,
    NewDocument,
}

/// Main application state
pub struct ThinkMineApp {
    /// Persisted settings
    pub settings: AppSettings,
    /// The document being edited
    pub document: Document,
    /// Background, font and alignment state
    pub theme: Theme,
    /// Focus timer
    pub timer: FocusTimer,
    /// Mini mode overlay state
    pub mini_mode: MiniMode,
    /// Typewriter welcome, while showing
    pub welcome: Option<Welcome>,
    /// Tutorial, while running
    pub tutorial: Option<Tutorial>,
    /// Screen rects of tutorial targets from the last frame
    pub targets: HashMap<Target, egui::Rect>,
    /// Whether the library overlay is visible
    pub library_visible: bool,
    /// Action waiting on the unsaved-changes prompt
    pub pending: Option<PendingAction>,
    /// Newer release, once the check finds one
    pub update: Option<UpdateInfo>,
    /// Whether the window is full screen
    pub full_screen: bool,
    /// Set once the user confirmed leaving
    exiting: bool,
    services: Services,
}

impl ThinkMineApp {
    /// Create a new application instance
    ///
    /// `show_welcome` comes from `onboarding::take_welcome`, run before the
    /// window was built.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: AppSettings,
        show_welcome: bool,
    ) -> Self {
        configure_context(&cc.egui_ctx);
        let welcome = show_welcome.then(|| Welcome::new(Instant::now()));

        let services = Services::new();
        let ctx = cc.egui_ctx.clone();
        services.spawn_update_check(move || ctx.request_repaint());
        services.spawn_launch_beacon(settings.client_id);

        Self {
            theme: Theme::from_settings(&settings),
            timer: FocusTimer::new(settings.last_timer_seconds),
            full_screen: settings.is_full_screen,
            settings,
            document: Document::new(),
            mini_mode: MiniMode::new(),
            welcome,
            tutorial: None,
            targets: HashMap::new(),
            library_visible: false,
            pending: None,
            update: None,
            exiting: false,
            services,
        }
    }

    /// Save to the current path, falling back to Save As
    ///
    /// Returns whether the document ended up on disk.
    pub fn save_document(&mut self) -> bool {
        match self.document.save() {
            Ok(SaveOutcome::Saved) => {
                self.remember_document();
                true
            }
            Ok(SaveOutcome::NeedsPath) => self.save_document_as(),
            Err(e) => {
                tracing::error!("Failed to save document: {:#}", e);
                show_error(&format!("Error saving: {e:#}"));
                false
            }
        }
    }

    /// Ask for a path and save there
    pub fn save_document_as(&mut self) -> bool {
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(document::default_save_name(&chrono::Local::now()));
        for (name, extensions) in document::SAVE_FILTERS {
            dialog = dialog.add_filter(name, extensions);
        }
        let Some(path) = dialog.save_file() else {
            return false;
        };

        match self.document.save_as(path) {
            Ok(()) => {
                self.remember_document();
                true
            }
            Err(e) => {
                tracing::error!("Failed to save document: {:#}", e);
                show_error(&format!("Error saving: {e:#}"));
                false
            }
        }
    }

    /// Pick a file and open it
    pub fn open_document_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        for (name, extensions) in document::OPEN_FILTERS {
            dialog = dialog.add_filter(name, extensions);
        }
        if let Some(path) = dialog.pick_file() {
            self.load_document(path);
        }
    }

    /// Replace the buffer with a file's contents
    pub fn load_document(&mut self, path: PathBuf) {
        match Document::open(&path) {
            Ok(doc) => {
                self.document = doc;
                self.library_visible = false;
                self.remember_document();
            }
            Err(e) => {
                tracing::error!("Failed to open document: {:#}", e);
                show_error(&format!("Error loading: {e:#}"));
            }
        }
    }

    /// Start an empty document, prompting first if there are unsaved changes
    pub fn request_new_document(&mut self) {
        if self.document.dirty {
            self.pending = Some(PendingAction::NewDocument);
        } else {
            self.new_document();
        }
    }

    fn new_document(&mut self) {
        self.document = Document::new();
        self.timer.reset(NEW_DOCUMENT_SECONDS);
        self.library_visible = false;
    }

    fn remember_document(&mut self) {
        if let Some(path) = self.document.path.clone() {
            self.settings.add_recent_file(path);
            self.settings.save();
        }
    }

    /// Resolve the unsaved-changes prompt
    pub fn resolve_pending(&mut self, ctx: &egui::Context, save: bool) {
        let Some(action) = self.pending.take() else {
            return;
        };
        if save && !self.save_document() {
            return;
        }
        match action {
            PendingAction::Exit => {
                self.exiting = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            PendingAction::NewDocument => self.new_document(),
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn toggle_full_screen(&mut self, ctx: &egui::Context) {
        self.full_screen = !self.full_screen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.full_screen));
    }

    pub fn enter_mini_mode(&mut self, ctx: &egui::Context) {
        self.mini_mode.enter();
        self.library_visible = false;
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(
            egui::WindowLevel::AlwaysOnTop,
        ));
    }

    pub fn exit_mini_mode(&mut self, ctx: &egui::Context) {
        self.mini_mode.exit();
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(egui::WindowLevel::Normal));
    }

    /// Close the welcome and start the tutorial if it was never finished
    pub fn dismiss_welcome(&mut self) {
        self.welcome = None;
        if !self.settings.has_seen_tutorial {
            self.tutorial = Some(Tutorial::new());
        }
    }

    pub fn tutorial_next(&mut self, now: Instant) {
        let Some(tutorial) = self.tutorial.as_mut() else {
            return;
        };
        if tutorial.next(now) == TutorialProgress::Completed {
            self.finish_tutorial();
        }
    }

    pub fn finish_tutorial(&mut self) {
        self.tutorial = None;
        onboarding::mark_tutorial_seen(&mut self.settings);
    }

    /// Copy live state into the settings record and write it out
    fn persist_settings(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            let viewport = i.viewport();
            if let Some(rect) = viewport.inner_rect {
                self.settings.window_width = rect.width();
                self.settings.window_height = rect.height();
            }
            if let Some(rect) = viewport.outer_rect {
                self.settings.window_left = rect.left();
                self.settings.window_top = rect.top();
            }
        });
        self.settings.is_full_screen = self.full_screen;
        self.theme.store(&mut self.settings);
        self.settings.last_timer_seconds = self.timer.remaining();
        self.settings.save();
    }

    /// Handle keyboard shortcuts
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let keys = Shortcuts::read(ctx);

        if keys.save {
            self.save_document();
        }
        if keys.save_as {
            self.save_document_as();
        }
        if keys.grow_font {
            self.theme.grow_font();
        }
        if keys.shrink_font {
            self.theme.shrink_font();
        }
        if keys.full_screen {
            self.toggle_full_screen(ctx);
        }
        if keys.escape && !self.timer.is_editing() && self.pending.is_none() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
        }
    }

    /// Intercept window close while there are unsaved changes
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        if !self.exiting && self.document.dirty {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            self.pending = Some(PendingAction::Exit);
            return;
        }
        self.persist_settings(ctx);
    }

    fn poll_services(&mut self) {
        for event in self.services.poll() {
            match event {
                ServiceEvent::UpdateAvailable(info) => self.update = Some(info),
            }
        }
    }

    /// Right click in the writing area cycles the background, middle click the font
    fn handle_canvas(&mut self, ctx: &egui::Context, area: egui::Rect) {
        if self.welcome.is_some() || self.pending.is_some() {
            return;
        }
        match canvas_gesture(ctx, area) {
            Some(CanvasGesture::Background(dir)) => self.theme.cycle_background(dir),
            Some(CanvasGesture::Font(dir)) => self.theme.cycle_font(dir),
            None => {}
        }
    }

    /// Shortest wait before something on screen changes on its own
    fn next_repaint(&self, now: Instant) -> Duration {
        let mut wait = Duration::from_secs(1);
        if let Some(tick) = self.timer.until_next_tick(now) {
            wait = wait.min(tick);
        }
        if let Some(flash) = self.timer.until_flash_end(now) {
            wait = wait.min(flash);
        }
        if self.welcome.is_some() {
            wait = wait.min(onboarding::TYPE_INTERVAL);
        }
        wait
    }
}

impl eframe::App for ThinkMineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.poll_services();
        if self.timer.advance(now) == Some(TimerEvent::Finished) {
            ctx.send_viewport_cmd(egui::ViewportCommand::RequestUserAttention(
                egui::UserAttentionType::Informational,
            ));
        }

        self.handle_close_request(ctx);
        self.handle_shortcuts(ctx);

        let background = crate::ui::color32(self.theme.background());

        if self.mini_mode.is_active() {
            MiniModePanel::show(ctx, self, now);
        } else {
            egui::TopBottomPanel::top("top_controls")
                .frame(egui::Frame::new().fill(background).inner_margin(8.0))
                .show_separator_line(false)
                .show(ctx, |ui| {
                    Toolbar::show(ui, self, now);
                });

            egui::TopBottomPanel::bottom("bottom_info")
                .frame(egui::Frame::new().fill(background).inner_margin(8.0))
                .show_separator_line(false)
                .show(ctx, |ui| {
                    StatusBar::show(ui, self);
                });

            let writing_area = egui::CentralPanel::default()
                .frame(egui::Frame::new().fill(background).inner_margin(32.0))
                .show(ctx, |ui| {
                    EditorPanel::show(ui, self);
                })
                .response
                .rect;
            self.handle_canvas(ctx, writing_area);

            if self.library_visible {
                LibraryPanel::show(ctx, self);
            }
        }

        if self.welcome.is_some() {
            overlays::show_welcome(ctx, self, now);
        } else if self.tutorial.is_some() {
            overlays::show_tutorial(ctx, self, now);
        }
        if self.pending.is_some() {
            overlays::show_unsaved_prompt(ctx, self);
        }

        ctx.request_repaint_after(self.next_repaint(now));
    }
}

/// Keyboard shortcuts pressed this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Shortcuts {
    save: bool,
    save_as: bool,
    grow_font: bool,
    shrink_font: bool,
    full_screen: bool,
    escape: bool,
}

impl Shortcuts {
    fn read(ctx: &egui::Context) -> Self {
        ctx.input(|i| {
            let ctrl = i.modifiers.command;
            Self {
                save: ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::S),
                save_as: ctrl && i.modifiers.shift && i.key_pressed(egui::Key::S),
                grow_font: ctrl
                    && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)),
                shrink_font: ctrl && i.key_pressed(egui::Key::Minus),
                full_screen: i.key_pressed(egui::Key::F11),
                escape: i.key_pressed(egui::Key::Escape),
            }
        })
    }
}

/// Ctrl+= / Ctrl+- belong to the editor font, not egui's UI zoom
fn configure_context(ctx: &egui::Context) {
    ctx.options_mut(|o| o.zoom_with_keyboard = false);
}

/// Style change requested by a click in the writing area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CanvasGesture {
    Background(Direction),
    Font(Direction),
}

/// Right or middle button released over `area`
///
/// The editor covers most of the area, so this reads raw pointer input
/// rather than a response. Windows and overlays above the panels block it.
fn canvas_gesture(ctx: &egui::Context, area: egui::Rect) -> Option<CanvasGesture> {
    let (pos, secondary, middle, shift) = ctx.input(|i| {
        (
            i.pointer.interact_pos(),
            i.pointer.button_released(egui::PointerButton::Secondary),
            i.pointer.button_released(egui::PointerButton::Middle),
            i.modifiers.shift,
        )
    });
    let pos = pos.filter(|p| area.contains(*p))?;
    let covered = ctx
        .layer_id_at(pos)
        .is_some_and(|layer| layer.order != egui::Order::Background);
    if covered {
        return None;
    }

    let dir = Direction::from_reverse(shift);
    if secondary {
        Some(CanvasGesture::Background(dir))
    } else if middle {
        Some(CanvasGesture::Font(dir))
    } else {
        None
    }
}

/// Blocking error dialog
fn show_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("ThinkMine")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: egui::Rect =
        egui::Rect::from_min_max(egui::Pos2::ZERO, egui::Pos2::new(800.0, 600.0));

    fn key_press(ctx: &egui::Context, key: egui::Key, modifiers: egui::Modifiers) -> Shortcuts {
        let input = egui::RawInput {
            screen_rect: Some(SCREEN),
            modifiers,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        };
        let mut keys = Shortcuts::default();
        let _ = ctx.run(input, |ctx| keys = Shortcuts::read(ctx));
        keys
    }

    /// Runs an idle frame, then a frame with a click at `pos`, over a full-size editor
    fn click_over_editor(
        pos: egui::Pos2,
        button: egui::PointerButton,
        modifiers: egui::Modifiers,
    ) -> Option<CanvasGesture> {
        let ctx = egui::Context::default();
        let mut text = String::from("A few words on the page");
        let click = vec![
            egui::Event::PointerMoved(pos),
            egui::Event::PointerButton {
                pos,
                button,
                pressed: true,
                modifiers,
            },
            egui::Event::PointerButton {
                pos,
                button,
                pressed: false,
                modifiers,
            },
        ];

        let mut gesture = None;
        for events in [Vec::new(), click] {
            let input = egui::RawInput {
                screen_rect: Some(SCREEN),
                modifiers,
                events,
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                let area = egui::CentralPanel::default()
                    .show(ctx, |ui| {
                        egui::TextEdit::multiline(&mut text)
                            .frame(false)
                            .desired_width(f32::INFINITY)
                            .desired_rows(20)
                            .show(ui);
                    })
                    .response
                    .rect;
                gesture = canvas_gesture(ctx, area);
            });
        }
        gesture
    }

    #[test]
    fn test_font_shortcuts_do_not_zoom_the_ui() {
        let ctx = egui::Context::default();
        configure_context(&ctx);

        assert!(key_press(&ctx, egui::Key::Equals, egui::Modifiers::COMMAND).grow_font);
        assert!(key_press(&ctx, egui::Key::Plus, egui::Modifiers::COMMAND).grow_font);
        assert!(key_press(&ctx, egui::Key::Minus, egui::Modifiers::COMMAND).shrink_font);
        assert_eq!(ctx.zoom_factor(), 1.0);

        // One more frame so any deferred zoom change would have landed
        key_press(&ctx, egui::Key::A, egui::Modifiers::NONE);
        assert_eq!(ctx.zoom_factor(), 1.0);
    }

    #[test]
    fn test_save_shortcuts() {
        let ctx = egui::Context::default();
        let keys = key_press(&ctx, egui::Key::S, egui::Modifiers::COMMAND);
        assert!(keys.save && !keys.save_as);

        let keys = key_press(
            &ctx,
            egui::Key::S,
            egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
        );
        assert!(keys.save_as && !keys.save);

        assert_eq!(key_press(&ctx, egui::Key::S, egui::Modifiers::NONE), Shortcuts::default());
    }

    #[test]
    fn test_right_click_over_editor_cycles_background() {
        let gesture = click_over_editor(
            egui::pos2(400.0, 300.0),
            egui::PointerButton::Secondary,
            egui::Modifiers::NONE,
        );
        assert_eq!(gesture, Some(CanvasGesture::Background(Direction::Forward)));
    }

    #[test]
    fn test_shift_middle_click_cycles_font_backward() {
        let gesture = click_over_editor(
            egui::pos2(120.0, 80.0),
            egui::PointerButton::Middle,
            egui::Modifiers::SHIFT,
        );
        assert_eq!(gesture, Some(CanvasGesture::Font(Direction::Backward)));
    }

    #[test]
    fn test_left_click_is_not_a_canvas_gesture() {
        let gesture = click_over_editor(
            egui::pos2(400.0, 300.0),
            egui::PointerButton::Primary,
            egui::Modifiers::NONE,
        );
        assert_eq!(gesture, None);
    }
}
