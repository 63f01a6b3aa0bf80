//! Link capture modal.
//!
//! Invoked from the Ctrl+K / toolbar link command: collects a URL and an
//! optional display text, then inserts a Markdown link at the cursor. The
//! URL is required; confirming with a blank URL keeps the form open. The
//! display text falls back to the URL itself.

use eframe::egui::{self, Color32, Key};

use crate::editor::{SelectionPolicy, TextBuffer};

/// Output from showing the link modal for one frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LinkModalOutput {
    /// A link was inserted into the buffer
    pub inserted: bool,
    /// The modal was dismissed without inserting
    pub cancelled: bool,
}

/// State of the link capture form.
#[derive(Debug, Default)]
pub struct LinkModal {
    is_open: bool,
    url: String,
    text: String,
}

impl LinkModal {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the form. `default_text` is the selection captured when the link
    /// command fired.
    pub fn open(&mut self, default_text: &str) {
        self.is_open = true;
        self.url.clear();
        self.text = default_text.to_string();
    }

    /// Discard the form without touching the buffer.
    pub fn cancel(&mut self) {
        self.is_open = false;
        self.url.clear();
        self.text.clear();
    }

    /// The Markdown link the current form state would produce, or `None`
    /// when the URL is blank.
    pub fn link_markup(&self) -> Option<String> {
        let url = self.url.trim();
        if url.is_empty() {
            return None;
        }
        let text = self.text.trim();
        let text = if text.is_empty() { url } else { text };
        Some(format!("[{text}]({url})"))
    }

    /// Try to confirm the form: inserts the link at the cursor and closes.
    /// With a blank URL nothing happens and the form stays open.
    pub fn confirm(&mut self, buffer: &mut TextBuffer) -> bool {
        let Some(markup) = self.link_markup() else {
            return false;
        };
        buffer.replace_range(
            buffer.selection_start(),
            buffer.selection_end(),
            &markup,
            SelectionPolicy::CollapseToEnd,
        );
        self.cancel();
        true
    }

    /// Render the modal window and return what happened this frame.
    pub fn show(&mut self, ctx: &egui::Context, buffer: &mut TextBuffer) -> LinkModalOutput {
        let mut output = LinkModalOutput::default();

        if !self.is_open {
            return output;
        }

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.cancel();
            output.cancelled = true;
            return output;
        }

        let confirm_pressed = ctx.input(|i| i.key_pressed(Key::Enter));

        egui::Window::new("🔗 Insert Link")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(
                egui::Frame::window(&ctx.style())
                    .stroke(egui::Stroke::new(1.0, Color32::from_rgb(70, 70, 80)))
                    .rounding(8.0),
            )
            .show(ctx, |ui| {
                ui.set_min_width(350.0);

                ui.add_space(8.0);
                ui.label("URL:");
                let url_response =
                    ui.add(egui::TextEdit::singleline(&mut self.url).desired_width(330.0));
                if self.url.is_empty() {
                    url_response.request_focus();
                }

                ui.add_space(8.0);
                ui.label("Text (optional):");
                ui.add(egui::TextEdit::singleline(&mut self.text).desired_width(330.0));

                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let insert_enabled = !self.url.trim().is_empty();
                        if ui
                            .add_enabled(insert_enabled, egui::Button::new("Insert"))
                            .clicked()
                            || confirm_pressed
                        {
                            if self.confirm(buffer) {
                                output.inserted = true;
                            }
                        }

                        ui.add_space(8.0);

                        if ui.button("Cancel").clicked() {
                            self.cancel();
                            output.cancelled = true;
                        }
                    });
                });

                ui.add_space(4.0);
            });

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_markup_requires_url() {
        let mut modal = LinkModal::default();
        modal.open("some selection");
        assert_eq!(modal.link_markup(), None);

        modal.url = "   ".to_string();
        assert_eq!(modal.link_markup(), None);
    }

    #[test]
    fn test_link_markup_text_falls_back_to_url() {
        let mut modal = LinkModal::default();
        modal.open("");
        modal.url = "https://example.com".to_string();
        assert_eq!(
            modal.link_markup().as_deref(),
            Some("[https://example.com](https://example.com)")
        );
    }

    #[test]
    fn test_link_markup_uses_captured_text() {
        let mut modal = LinkModal::default();
        modal.open("Example");
        modal.url = "https://example.com".to_string();
        assert_eq!(
            modal.link_markup().as_deref(),
            Some("[Example](https://example.com)")
        );
    }

    #[test]
    fn test_confirm_empty_url_is_noop_and_stays_open() {
        let mut modal = LinkModal::default();
        modal.open("sel");
        let mut buffer = TextBuffer::with_selection("before after", 7, 7);

        assert!(!modal.confirm(&mut buffer));
        assert!(modal.is_open());
        assert_eq!(buffer.text(), "before after");
    }

    #[test]
    fn test_confirm_inserts_at_cursor_and_closes() {
        let mut modal = LinkModal::default();
        modal.open("docs");
        modal.url = "https://docs.rs".to_string();
        let mut buffer = TextBuffer::with_selection("see ", 4, 4);

        assert!(modal.confirm(&mut buffer));
        assert!(!modal.is_open());
        assert_eq!(buffer.text(), "see [docs](https://docs.rs)");
        // Cursor collapses after the inserted link.
        assert_eq!(buffer.selection_start(), buffer.text().len());
        assert_eq!(buffer.selection_end(), buffer.text().len());
    }

    #[test]
    fn test_confirm_replaces_selection() {
        let mut modal = LinkModal::default();
        modal.open("target");
        modal.url = "x.org".to_string();
        // "target" selected inside a longer line
        let mut buffer = TextBuffer::with_selection("go to target now", 6, 12);

        assert!(modal.confirm(&mut buffer));
        assert_eq!(buffer.text(), "go to [target](x.org) now");
    }

    #[test]
    fn test_cancel_discards_fields() {
        let mut modal = LinkModal::default();
        modal.open("sel");
        modal.url = "https://example.com".to_string();
        modal.cancel();

        assert!(!modal.is_open());
        modal.open("fresh");
        assert!(modal.link_markup().is_none());
    }
}
