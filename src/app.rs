use eframe::egui;
use egui::text::{CCursor, CCursorRange};
use std::path::PathBuf;

use text_viewer_core::{
    spawn_load, Application, FileRef, OpenState, PendingLoad, WindowCommand, WindowEvent, ABOUT,
};

use crate::chooser::{choose_file, PendingDialog};
use crate::cli::report_open_error;
use crate::shortcuts::{self, ACTION_ABOUT, ACTION_OPEN, ACTION_QUIT, ACTION_SAVE_AS};

const TEXT_VIEW_ID: &str = "main_text_view";

pub struct TextViewerApp {
    application: Application,
    pending_dialog: Option<PendingDialog>,
    pending_load: Option<PendingLoad>,

    // Display revision last pushed to the viewport and text view
    shown_revision: u64,
    scroll_to_top: bool,
}

impl TextViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut application: Application,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let window = application.activate();
        let command = initial_file.and_then(|path| window.open_path(path));

        let mut app = Self {
            application,
            pending_dialog: None,
            pending_load: None,
            shown_revision: 0,
            scroll_to_top: false,
        };
        if let Some(WindowCommand::StartLoad(file)) = command {
            app.start_load(&cc.egui_ctx, file);
        }
        app
    }

    fn start_load(&mut self, ctx: &egui::Context, file: FileRef) {
        let ctx = ctx.clone();
        self.pending_load = Some(spawn_load(file, move || ctx.request_repaint()));
    }

    /// Feeds an event to the window and carries out whatever it asks for.
    fn dispatch(&mut self, ctx: &egui::Context, frame: &eframe::Frame, event: WindowEvent) {
        let Some(window) = self.application.window_mut() else {
            return;
        };
        match window.handle(event) {
            Ok(Some(WindowCommand::ShowOpenDialog(request))) => {
                let repaint = ctx.clone();
                self.pending_dialog = Some(choose_file(&request, frame, move || {
                    repaint.request_repaint()
                }));
            }
            Ok(Some(WindowCommand::StartLoad(file))) => self.start_load(ctx, file),
            Ok(None) => {}
            Err(e) => report_open_error(&e),
        }
    }

    fn poll_dialog(&mut self, ctx: &egui::Context, frame: &eframe::Frame) {
        let response = match &self.pending_dialog {
            Some(pending) => pending.try_response(),
            None => return,
        };
        if let Some(response) = response {
            self.pending_dialog = None;
            self.dispatch(ctx, frame, WindowEvent::DialogResponded(response));
        }
    }

    fn poll_load(&mut self, ctx: &egui::Context, frame: &eframe::Frame) {
        let completed = match &self.pending_load {
            Some(pending) => pending.try_complete(),
            None => return,
        };
        if let Some(completed) = completed {
            self.pending_load = None;
            self.dispatch(ctx, frame, WindowEvent::LoadCompleted(completed));
        }
    }

    fn activate_named(&mut self, ctx: &egui::Context, frame: &eframe::Frame, action: &str) {
        if self.application.activate_named(action) {
            return;
        }
        match action {
            ACTION_OPEN if self.application.accepts_window_input() => {
                self.dispatch(ctx, frame, WindowEvent::OpenRequested)
            }
            ACTION_OPEN => tracing::debug!("open ignored while about is shown"),
            ACTION_SAVE_AS => tracing::debug!("{} has no handler", ACTION_SAVE_AS),
            other => tracing::warn!(action = other, "unknown action"),
        }
    }

    fn handle_accelerators(&mut self, ctx: &egui::Context, frame: &eframe::Frame) {
        let triggered = ctx.input_mut(shortcuts::consume_triggered);
        for action in triggered {
            self.activate_named(ctx, frame, action);
        }
    }

    /// Pushes a newly opened document to the viewport title and resets the
    /// text view's cursor.
    fn sync_display(&mut self, ctx: &egui::Context) {
        let Some(window) = self.application.window() else {
            return;
        };
        let display = window.display();
        if display.revision() == self.shown_revision {
            return;
        }
        self.shown_revision = display.revision();

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(display.title().to_string()));

        let id = egui::Id::new(TEXT_VIEW_ID);
        if let Some(mut state) = egui::TextEdit::load_state(ctx, id) {
            let cursor = CCursor::new(display.cursor());
            state.cursor.set_char_range(Some(CCursorRange::one(cursor)));
            state.store(ctx, id);
        }
        self.scroll_to_top = true;
    }

    fn render_header_bar(&mut self, ctx: &egui::Context, frame: &eframe::Frame) {
        let Some(window) = self.application.window() else {
            return;
        };
        let idle = window.is_idle();
        let enabled = self.application.accepts_window_input();
        let loading = matches!(window.state(), OpenState::Loading(_));
        let title = window.display().title().to_string();

        let mut action = None;
        egui::TopBottomPanel::top("header_bar").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    let open_hint = shortcuts::shortcut_text(ctx, ACTION_OPEN).unwrap_or_default();
                    if ui
                        .add_enabled(idle, egui::Button::new("Open"))
                        .on_hover_text(format!("Open a file ({})", open_hint))
                        .clicked()
                    {
                        action = Some(ACTION_OPEN);
                    }

                    if loading {
                        ui.add(egui::Spinner::new().size(16.0));
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.menu_button("☰", |ui| {
                            if ui.button("About Text Viewer").clicked() {
                                action = Some(ACTION_ABOUT);
                                ui.close_menu();
                            }
                            let quit = egui::Button::new("Quit").shortcut_text(
                                shortcuts::shortcut_text(ctx, ACTION_QUIT).unwrap_or_default(),
                            );
                            if ui.add(quit).clicked() {
                                action = Some(ACTION_QUIT);
                                ui.close_menu();
                            }
                        });
                        ui.centered_and_justified(|ui| {
                            ui.strong(title);
                        });
                    });
                });
            });
        });

        if let Some(action) = action {
            self.activate_named(ctx, frame, action);
        }
    }

    fn render_text_area(&mut self, ctx: &egui::Context) {
        let scroll_to_top = std::mem::take(&mut self.scroll_to_top);
        let enabled = self.application.accepts_window_input();
        let Some(window) = self.application.window() else {
            return;
        };
        let mut text = window.display().text();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                let mut scroll = egui::ScrollArea::both().auto_shrink([false, false]);
                if scroll_to_top {
                    scroll = scroll.vertical_scroll_offset(0.0).horizontal_scroll_offset(0.0);
                }
                scroll.show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .id(egui::Id::new(TEXT_VIEW_ID))
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .frame(false),
                    );
                });
            });
        });
    }

    fn render_about(&mut self, ctx: &egui::Context) {
        if !self.application.about_visible() {
            return;
        }
        let mut open = true;
        egui::Window::new("About")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(ABOUT.application_name);
                    ui.label(format!("Version {}", ABOUT.version));
                    ui.label(ABOUT.developer_name);
                    ui.small(ABOUT.application_icon);
                    ui.separator();
                    ui.label("Developers");
                    for developer in ABOUT.developers {
                        ui.label(*developer);
                    }
                    ui.separator();
                    ui.small(ABOUT.copyright);
                });
            });
        if !open {
            self.application.close_about();
        }
    }
}

impl eframe::App for TextViewerApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if self.application.take_focus_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        }

        self.handle_accelerators(ctx, frame);
        self.poll_dialog(ctx, frame);
        self.poll_load(ctx, frame);
        self.sync_display(ctx);

        self.render_header_bar(ctx, frame);
        self.render_text_area(ctx);
        self.render_about(ctx);

        if !self.application.is_running() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
