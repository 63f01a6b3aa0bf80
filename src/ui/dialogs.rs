//! Modal dialogs.
//!
//! Currently just the delete confirmation dialog. While it is open it owns
//! Enter (confirm) and Escape (cancel).

use eframe::egui::{self, Color32, Key, RichText};

/// Result from showing the delete confirmation dialog.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteConfirmResult {
    /// Dialog still open, no decision yet
    None,
    /// User confirmed the deletion
    Confirmed,
    /// Dialog was dismissed
    Cancelled,
}

/// Delete confirmation state: the name of the note awaiting confirmation.
#[derive(Debug, Clone)]
pub struct DeleteConfirmDialog {
    note_name: String,
}

impl DeleteConfirmDialog {
    pub fn new(note_name: &str) -> Self {
        Self {
            note_name: note_name.to_string(),
        }
    }

    pub fn note_name(&self) -> &str {
        &self.note_name
    }

    /// Show the dialog and return the user's decision, if any.
    pub fn show(&self, ctx: &egui::Context) -> DeleteConfirmResult {
        let mut result = DeleteConfirmResult::None;

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            return DeleteConfirmResult::Cancelled;
        }
        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            return DeleteConfirmResult::Confirmed;
        }

        egui::Window::new("🗑 Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(
                egui::Frame::window(&ctx.style())
                    .stroke(egui::Stroke::new(1.0, Color32::from_rgb(70, 70, 80)))
                    .rounding(8.0),
            )
            .show(ctx, |ui| {
                ui.set_min_width(320.0);

                ui.add_space(8.0);
                ui.label("Are you sure you want to delete this note?");
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new("📝").size(16.0));
                    ui.label(RichText::new(&self.note_name).strong());
                });

                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete_button =
                            egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                                .fill(Color32::from_rgb(200, 60, 60));

                        if ui.add(delete_button).clicked() {
                            result = DeleteConfirmResult::Confirmed;
                        }

                        ui.add_space(8.0);

                        if ui.button("Cancel").clicked() {
                            result = DeleteConfirmResult::Cancelled;
                        }
                    });
                });

                ui.add_space(4.0);
            });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_carries_note_name() {
        let dialog = DeleteConfirmDialog::new("Old Ideas");
        assert_eq!(dialog.note_name(), "Old Ideas");
    }
}
