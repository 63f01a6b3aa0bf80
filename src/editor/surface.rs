//! egui glue for the text buffer.
//!
//! Wraps a multiline `TextEdit` and keeps its cursor state and the
//! byte-offset selection in [`TextBuffer`] in sync. egui reports character
//! indices; the conversions live in `string_utils`.
//!
//! Enter is consumed here while the editor has focus so list continuation
//! can run before the widget inserts a plain newline.

use eframe::egui::{
    self,
    text::{CCursor, CCursorRange},
    Key, Modifiers, TextEdit,
};

use crate::editor::list::{continue_list, ContinuationOutcome};
use crate::editor::TextBuffer;
use crate::string_utils::{byte_to_char_index, char_to_byte_index};

/// What happened inside the editor during one frame.
#[derive(Debug, Default)]
pub struct SurfaceOutput {
    /// The buffer text changed (typing, paste, or an intercepted Enter)
    pub changed: bool,
    /// Outcome of list continuation, when Enter was intercepted
    pub continuation: Option<ContinuationOutcome>,
}

/// The multiline editor widget plus its selection-sync state.
pub struct EditorSurface {
    id: egui::Id,
    /// Set when the buffer selection was changed outside the widget and the
    /// widget cursor must be moved to match on the next frame.
    selection_dirty: bool,
}

impl EditorSurface {
    pub fn new(id_source: impl std::hash::Hash) -> Self {
        Self {
            id: egui::Id::new(id_source),
            selection_dirty: false,
        }
    }

    /// Mark the widget cursor stale after an external buffer mutation
    /// (formatting command, link insertion, note switch).
    pub fn request_selection_sync(&mut self) {
        self.selection_dirty = true;
    }

    pub fn has_focus(&self, ctx: &egui::Context) -> bool {
        ctx.memory(|m| m.has_focus(self.id))
    }

    pub fn request_focus(&self, ctx: &egui::Context) {
        ctx.memory_mut(|m| m.request_focus(self.id));
    }

    /// Show the editor for one frame.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        buffer: &mut TextBuffer,
        font: egui::FontId,
    ) -> SurfaceOutput {
        let mut output = SurfaceOutput::default();

        // Intercept Enter before the widget sees it, so list continuation
        // decides what gets inserted. Shift+Enter keeps the default path.
        if self.has_focus(ui.ctx())
            && ui
                .ctx()
                .input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter))
        {
            let outcome = continue_list(buffer);
            if outcome == ContinuationOutcome::NotIntercepted {
                buffer.insert_at_cursor("\n");
            }
            output.changed = true;
            output.continuation = Some(outcome);
            self.selection_dirty = true;
        }

        // Push the buffer selection into the widget before it renders.
        if self.selection_dirty {
            let start = byte_to_char_index(buffer.text(), buffer.selection_start());
            let end = byte_to_char_index(buffer.text(), buffer.selection_end());
            let mut state =
                TextEdit::load_state(ui.ctx(), self.id).unwrap_or_default();
            state.cursor.set_char_range(Some(CCursorRange::two(
                CCursor::new(start),
                CCursor::new(end),
            )));
            state.store(ui.ctx(), self.id);
        }

        let text_output = TextEdit::multiline(buffer.text_mut())
            .id(self.id)
            .font(font)
            .frame(false)
            .desired_width(f32::INFINITY)
            .desired_rows(20)
            .show(ui);

        if text_output.response.changed() {
            output.changed = true;
        }

        if self.selection_dirty {
            // The cursor range reported this frame predates the sync we just
            // stored; re-reading it would undo the move. The widget may still
            // have edited the text, so the tracked offsets get re-clamped.
            buffer.set_selection(buffer.selection_start(), buffer.selection_end());
            self.selection_dirty = false;
        } else if let Some(cursor_range) = text_output.cursor_range {
            let primary = cursor_range.primary.ccursor.index;
            let secondary = cursor_range.secondary.ccursor.index;
            let (start_chars, end_chars) = if primary <= secondary {
                (primary, secondary)
            } else {
                (secondary, primary)
            };
            let start = char_to_byte_index(buffer.text(), start_chars);
            let end = char_to_byte_index(buffer.text(), end_chars);
            buffer.set_selection(start, end);
        } else {
            // Widget has no cursor state; just clamp whatever we tracked
            // against the possibly-changed text.
            buffer.set_selection(buffer.selection_start(), buffer.selection_end());
        }

        output
    }
}
