//! Main application: panels, keyboard routing, and the debounce loop.
//!
//! `JotApp` wires the pure editing core to egui. Keyboard input is routed
//! through a single dispatch on [`InputFocus`]: whichever modal is open owns
//! Enter and Escape, and editor shortcuts only fire while no modal is up.

use std::time::{Duration, Instant};

use eframe::egui;
use log::{debug, info, warn};

use crate::config::{save_config_silent, EditorFont, Settings, WindowState};
use crate::editor::EditorSurface;
use crate::markdown::{apply_format, render_html, FormatCommand, FormatOutcome};
use crate::state::{AppState, InputFocus};
use crate::storage::FsNoteStore;
use crate::ui::{
    scroll_fraction, CommandPalette, DeleteConfirmDialog, DeleteConfirmResult, LinkModal,
    PreviewPane,
};
use crate::workspace::SaveOutcome;

/// Application name shown in the title bar.
const APP_NAME: &str = "Jot";

/// Interval of the window-state reporter.
const WINDOW_REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// Actions triggered by global keyboard shortcuts while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardAction {
    /// Open the command palette (Ctrl+P)
    OpenPalette,
    /// Create a new note (Ctrl+N)
    NewNote,
    /// Save immediately (Ctrl+S)
    SaveNow,
    /// Close the note, back to the welcome screen (Ctrl+W)
    CloseNote,
    /// Apply a formatting command (Ctrl+B / Ctrl+I / Ctrl+K, Ctrl+Shift+U/O)
    Format(FormatCommand),
}

impl KeyboardAction {
    /// Consume any matching shortcut key from this frame's input.
    fn from_input(i: &mut egui::InputState) -> Option<Self> {
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::P) {
            debug!("Keyboard shortcut: Ctrl+P (Command Palette)");
            return Some(KeyboardAction::OpenPalette);
        }
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::N) {
            debug!("Keyboard shortcut: Ctrl+N (New Note)");
            return Some(KeyboardAction::NewNote);
        }
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::S) {
            debug!("Keyboard shortcut: Ctrl+S (Save Now)");
            return Some(KeyboardAction::SaveNow);
        }
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::W) {
            debug!("Keyboard shortcut: Ctrl+W (Close Note)");
            return Some(KeyboardAction::CloseNote);
        }
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::B) {
            return Some(KeyboardAction::Format(FormatCommand::Bold));
        }
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::I) {
            return Some(KeyboardAction::Format(FormatCommand::Italic));
        }
        if i.consume_key(egui::Modifiers::CTRL, egui::Key::K) {
            return Some(KeyboardAction::Format(FormatCommand::Link));
        }
        if i.consume_key(egui::Modifiers::CTRL | egui::Modifiers::SHIFT, egui::Key::U) {
            return Some(KeyboardAction::Format(FormatCommand::UnorderedList));
        }
        if i.consume_key(egui::Modifiers::CTRL | egui::Modifiers::SHIFT, egui::Key::O) {
            return Some(KeyboardAction::Format(FormatCommand::OrderedList));
        }
        None
    }
}

/// The main application struct that holds all state and implements eframe::App.
pub struct JotApp {
    /// Central application state
    state: AppState,
    /// Note storage
    store: FsNoteStore,
    /// The multiline editor widget glue
    surface: EditorSurface,
    /// Command palette (Ctrl+P)
    palette: CommandPalette,
    /// Link capture form (Ctrl+K)
    link_modal: LinkModal,
    /// Active delete confirmation, if any
    delete_dialog: Option<DeleteConfirmDialog>,
    /// Rendered preview of the current note
    preview: PreviewPane,
    /// Application start time for toast timing
    start_time: Instant,
    /// Last run of the window-state reporter
    last_window_report: Instant,
}

impl JotApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings, store: FsNoteStore) -> Self {
        info!("Initializing {}", APP_NAME);

        let mut state = AppState::new(settings);
        state.refresh_catalog(&store);

        Self {
            state,
            store,
            surface: EditorSurface::new("note_editor"),
            palette: CommandPalette::new(),
            link_modal: LinkModal::default(),
            delete_dialog: None,
            preview: PreviewPane::default(),
            start_time: Instant::now(),
            last_window_report: Instant::now(),
        }
    }

    /// Elapsed time since app start in seconds, used for toast expiry.
    fn app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn window_title(&self) -> String {
        match self.state.session.as_ref() {
            Some(session) if !session.title.trim().is_empty() => {
                format!("{} - {}", session.title.trim(), APP_NAME)
            }
            Some(_) => format!("Untitled - {}", APP_NAME),
            None => APP_NAME.to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyboard routing
    // ─────────────────────────────────────────────────────────────────────────

    /// Global shortcuts, active only while no modal owns the keyboard.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        ctx.input_mut(KeyboardAction::from_input)
            .map(|action| self.dispatch(action));
    }

    fn dispatch(&mut self, action: KeyboardAction) {
        match action {
            KeyboardAction::OpenPalette => {
                self.palette.open(&self.state.catalog);
                self.state.focus = InputFocus::PaletteOpen;
            }
            KeyboardAction::NewNote => {
                self.state.new_note();
                self.preview.clear();
            }
            KeyboardAction::SaveNow => self.save_now(),
            KeyboardAction::CloseNote => {
                // Flush the pending save before dropping the session.
                self.save_now();
                self.state.close_note();
                self.preview.clear();
            }
            KeyboardAction::Format(command) => self.apply_format_command(command),
        }
    }

    /// Explicit save: cancels the debounced save and writes synchronously.
    fn save_now(&mut self) {
        if self.state.session.is_none() {
            return;
        }
        self.state.pipeline.take_save_now();
        let now = self.app_time();
        if let Some(SaveOutcome::Saved { canonical, .. }) = self.state.save_current(&self.store, now)
        {
            self.state.set_toast(format!("Saved '{}'", canonical), false, now);
        }
    }

    fn apply_format_command(&mut self, command: FormatCommand) {
        if self.state.session.is_none() {
            return;
        }
        match apply_format(&mut self.state.buffer, command) {
            FormatOutcome::OpenLinkCapture { default_text } => {
                self.link_modal.open(&default_text);
                self.state.focus = InputFocus::CapturingLink;
            }
            outcome if outcome.mutated() => {
                self.surface.request_selection_sync();
                self.state.pipeline.note_edited(Instant::now());
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modal surfaces
    // ─────────────────────────────────────────────────────────────────────────

    fn show_modals(&mut self, ctx: &egui::Context) {
        match self.state.focus {
            InputFocus::ConfirmingDelete => {
                let Some(dialog) = &self.delete_dialog else {
                    // Stale focus with no dialog; recover to editing.
                    self.state.focus = InputFocus::Editing;
                    return;
                };
                match dialog.show(ctx) {
                    DeleteConfirmResult::Confirmed => {
                        if let Err(e) = self.state.delete_current(&self.store) {
                            warn!("Delete failed: {}", e);
                            let now = self.app_time();
                            self.state.set_toast("Delete failed".to_string(), true, now);
                        }
                        self.preview.clear();
                        self.delete_dialog = None;
                        self.state.focus = InputFocus::Editing;
                    }
                    DeleteConfirmResult::Cancelled => {
                        self.delete_dialog = None;
                        self.state.focus = InputFocus::Editing;
                    }
                    DeleteConfirmResult::None => {}
                }
            }
            InputFocus::CapturingLink => {
                let output = self.link_modal.show(ctx, &mut self.state.buffer);
                if output.inserted {
                    self.surface.request_selection_sync();
                    self.state.pipeline.note_edited(Instant::now());
                    self.state.focus = InputFocus::Editing;
                } else if output.cancelled {
                    self.state.focus = InputFocus::Editing;
                }
            }
            InputFocus::PaletteOpen => {
                let output = self.palette.show(ctx);
                if let Some(name) = output.selected_note {
                    let now = self.app_time();
                    self.state.open_note(&self.store, &name, now);
                    self.preview.set_html(render_html(self.state.buffer.text()));
                }
                if output.closed {
                    self.state.focus = InputFocus::Editing;
                }
            }
            InputFocus::Editing => {}
        }
    }

    /// Open the delete confirmation for the current note.
    fn request_delete(&mut self) {
        let Some(name) = self
            .state
            .session
            .as_ref()
            .and_then(|s| s.canonical.clone())
        else {
            // Never-saved notes have nothing to delete.
            return;
        };
        self.delete_dialog = Some(DeleteConfirmDialog::new(&name));
        self.state.focus = InputFocus::ConfirmingDelete;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Debounce loop
    // ─────────────────────────────────────────────────────────────────────────

    fn poll_pipeline(&mut self, ctx: &egui::Context) {
        let now = Instant::now();

        if self.state.pipeline.poll_render(now) {
            self.preview.set_html(render_html(self.state.buffer.text()));
        }

        if self.state.pipeline.poll_save(now) {
            let app_now = self.app_time();
            self.state.save_current(&self.store, app_now);
        }

        // Wake up again when the next timer is due.
        if let Some(deadline) = self.state.pipeline.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Window state reporter
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot window geometry into settings on a fixed interval, off the
    /// editing event path.
    fn report_window_state(&mut self, ctx: &egui::Context) {
        if self.last_window_report.elapsed() < WINDOW_REPORT_INTERVAL {
            return;
        }
        self.last_window_report = Instant::now();

        let snapshot = ctx.input(|i| {
            i.viewport().outer_rect.map(|rect| WindowState {
                width: rect.width(),
                height: rect.height(),
                x: Some(rect.min.x),
                y: Some(rect.min.y),
                maximized: i.viewport().maximized.unwrap_or(false),
            })
        });

        if let Some(window) = snapshot {
            if window != self.state.settings.window {
                self.state.settings.window = window;
                self.state.mark_settings_dirty();
            }
        }

        if self.state.take_settings_dirty() {
            save_config_silent(&self.state.settings);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panels
    // ─────────────────────────────────────────────────────────────────────────

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        let mut open_request: Option<String> = None;

        egui::SidePanel::left("note_sidebar")
            .resizable(true)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.heading("Notes");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("＋").on_hover_text("New note (Ctrl+N)").clicked() {
                            self.dispatch(KeyboardAction::NewNote);
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let current = self
                            .state
                            .session
                            .as_ref()
                            .and_then(|s| s.canonical.as_deref());
                        for name in &self.state.catalog {
                            let selected = Some(name.as_str()) == current;
                            if ui.selectable_label(selected, name).clicked() {
                                open_request = Some(name.clone());
                            }
                        }
                        if self.state.catalog.is_empty() {
                            ui.label(
                                egui::RichText::new("No notes yet")
                                    .weak()
                                    .italics(),
                            );
                        }
                    });
            });

        if let Some(name) = open_request {
            // Flush the current note before switching away.
            self.save_now();
            let now = self.app_time();
            self.state.open_note(&self.store, &name, now);
            self.preview.set_html(render_html(self.state.buffer.text()));
        }
    }

    fn show_footer(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(toast) = self.state.toast() {
                    let color = if toast.is_error {
                        egui::Color32::from_rgb(220, 80, 80)
                    } else {
                        egui::Color32::from_rgb(110, 170, 110)
                    };
                    ui.colored_label(color, &toast.message);
                } else if self.state.pipeline.save_pending() {
                    ui.label(egui::RichText::new("● Unsaved changes").weak());
                } else if self.state.has_persisted_note() {
                    ui.label(egui::RichText::new("Saved").weak());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if self.state.settings.ui.preview_focused {
                        "Hide preview"
                    } else {
                        "Show preview"
                    };
                    if ui.small_button(label).clicked() {
                        self.state.settings.ui.preview_focused =
                            !self.state.settings.ui.preview_focused;
                        self.state.mark_settings_dirty();
                    }

                    ui.add_space(8.0);

                    egui::ComboBox::from_id_source("editor_font")
                        .selected_text(self.state.settings.ui.font.display_name())
                        .show_ui(ui, |ui| {
                            for font in EditorFont::all() {
                                if ui
                                    .selectable_value(
                                        &mut self.state.settings.ui.font,
                                        *font,
                                        font.display_name(),
                                    )
                                    .changed()
                                {
                                    self.state.mark_settings_dirty();
                                }
                            }
                        });
                });
            });
        });
    }

    fn show_welcome(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading(APP_NAME);
            ui.add_space(8.0);
            ui.label("Keyboard-first Markdown notes");
            ui.add_space(24.0);
            if ui.button("New note  (Ctrl+N)").clicked() {
                self.dispatch(KeyboardAction::NewNote);
            }
            ui.add_space(4.0);
            if ui.button("Open palette  (Ctrl+P)").clicked() {
                self.dispatch(KeyboardAction::OpenPalette);
            }
        });
    }

    fn editor_font(&self) -> egui::FontId {
        let size = self.state.settings.ui.font_size;
        match self.state.settings.ui.font {
            EditorFont::Proportional => egui::FontId::proportional(size),
            EditorFont::Monospace => egui::FontId::monospace(size),
        }
    }

    fn show_editor_area(&mut self, ui: &mut egui::Ui) {
        let mut edited = false;
        let mut render_only = false;

        // Title row
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if let Some(session) = self.state.session.as_mut() {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut session.title)
                        .hint_text("Untitled")
                        .font(egui::TextStyle::Heading)
                        .desired_width(ui.available_width() - 120.0),
                );
                if response.changed() {
                    edited = true;
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑").on_hover_text("Delete note").clicked() {
                    self.request_delete();
                }
            });
        });

        // Formatting toolbar
        ui.horizontal(|ui| {
            for command in [
                FormatCommand::Bold,
                FormatCommand::Italic,
                FormatCommand::Link,
                FormatCommand::UnorderedList,
                FormatCommand::OrderedList,
            ] {
                if ui
                    .button(command.icon())
                    .on_hover_text(command.tooltip())
                    .clicked()
                {
                    self.apply_format_command(command);
                }
            }
        });
        ui.separator();

        // Editor, with the preview pane beside it when enabled
        let show_preview = self.state.settings.ui.preview_focused;
        let font = self.editor_font();
        let available = ui.available_width();

        let mut editor_scroll: Option<f32> = None;

        ui.horizontal_top(|ui| {
            let editor_width = if show_preview {
                (available - 12.0) / 2.0
            } else {
                available
            };

            ui.allocate_ui_with_layout(
                egui::vec2(editor_width, ui.available_height()),
                egui::Layout::top_down(egui::Align::Min),
                |ui| {
                    let scroll = egui::ScrollArea::vertical()
                        .id_source("editor_scroll")
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let output = self.surface.show(ui, &mut self.state.buffer, font);
                            if output.changed {
                                if output
                                    .continuation
                                    .map(|c| c.intercepted())
                                    .unwrap_or(false)
                                {
                                    render_only = true;
                                } else {
                                    edited = true;
                                }
                            }
                        });
                    editor_scroll = Some(scroll_fraction(
                        scroll.state.offset.y,
                        scroll.content_size.y,
                        scroll.inner_rect.height(),
                    ));
                },
            );

            if show_preview {
                ui.separator();
                ui.allocate_ui_with_layout(
                    egui::vec2(ui.available_width(), ui.available_height()),
                    egui::Layout::top_down(egui::Align::Min),
                    |ui| {
                        self.preview.show(ui, editor_scroll);
                    },
                );
            }
        });

        let now = Instant::now();
        if edited {
            self.state.pipeline.note_edited(now);
        } else if render_only {
            self.state.pipeline.render_only(now);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe::App
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for JotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let app_now = self.app_time();
        self.state.update_toast(app_now);

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        self.report_window_state(ctx);

        // Modals first: whichever is open consumes Enter/Escape before the
        // editor shortcuts run.
        self.show_modals(ctx);

        if self.state.focus == InputFocus::Editing {
            self.handle_keyboard_shortcuts(ctx);
        }

        self.show_sidebar(ctx);
        self.show_footer(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.is_some() {
                self.show_editor_area(ui);
            } else {
                self.show_welcome(ui);
            }
        });

        self.poll_pipeline(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        // Flush the pending save and persist settings.
        if self.state.pipeline.take_save_now() {
            let now = self.app_time();
            self.state.save_current(&self.store, now);
        }
        save_config_silent(&self.state.settings);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
