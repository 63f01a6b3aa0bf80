//! Command palette with fuzzy search over the note catalog.
//!
//! Provides a Ctrl+P overlay for jumping between notes. The catalog is
//! snapshotted when the palette opens; notes created or deleted while it is
//! open do not appear until the next open.

#![allow(clippy::collapsible_if)]

use eframe::egui::{self, Color32, Key, RichText, Sense};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Maximum number of results to show in the palette.
const MAX_RESULTS: usize = 15;

/// Output from the command palette.
#[derive(Debug, Default)]
pub struct PaletteOutput {
    /// Note selected by the user (should be opened)
    pub selected_note: Option<String>,
    /// Whether the palette was closed (Escape or selection)
    pub closed: bool,
}

/// Command palette state.
pub struct CommandPalette {
    /// Whether the palette is open
    is_open: bool,
    /// Catalog snapshot taken when the palette opened
    snapshot: Vec<String>,
    /// Current search query
    query: String,
    /// Currently selected result index
    selected_index: usize,
    /// Fuzzy matcher
    matcher: SkimMatcherV2,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPalette {
    pub fn new() -> Self {
        Self {
            is_open: false,
            snapshot: Vec::new(),
            query: String::new(),
            selected_index: 0,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the palette over a snapshot of the catalog.
    pub fn open(&mut self, catalog: &[String]) {
        self.is_open = true;
        self.snapshot = catalog.to_vec();
        self.query.clear();
        self.selected_index = 0;
    }

    /// Close the palette, discarding all transient state.
    pub fn close(&mut self) {
        self.is_open = false;
        self.snapshot.clear();
        self.query.clear();
        self.selected_index = 0;
    }

    /// Filter and score the snapshot against the current query.
    ///
    /// An empty query lists the snapshot in catalog order; otherwise results
    /// are sorted by fuzzy score, best first.
    pub fn filtered(&self) -> Vec<String> {
        if self.query.is_empty() {
            return self.snapshot.iter().take(MAX_RESULTS).cloned().collect();
        }

        let mut scored: Vec<(i64, &String)> = self
            .snapshot
            .iter()
            .filter_map(|name| {
                self.matcher
                    .fuzzy_match(name, &self.query)
                    .map(|score| (score, name))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(MAX_RESULTS)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Move the highlight down, wrapping past the last result.
    pub fn move_down(&mut self, result_count: usize) {
        if result_count > 0 {
            self.selected_index = (self.selected_index + 1) % result_count;
        }
    }

    /// Move the highlight up, wrapping past the first result.
    pub fn move_up(&mut self, result_count: usize) {
        if result_count > 0 {
            self.selected_index = if self.selected_index == 0 {
                result_count - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    fn set_query(&mut self, query: String) {
        if query != self.query {
            self.query = query;
            self.selected_index = 0;
        }
    }

    /// Render the palette overlay and return any output.
    pub fn show(&mut self, ctx: &egui::Context) -> PaletteOutput {
        let mut output = PaletteOutput::default();

        if !self.is_open {
            return output;
        }

        let results = self.filtered();

        // Keyboard handling while open
        ctx.input(|i| {
            if i.key_pressed(Key::Escape) {
                output.closed = true;
            }
            if i.key_pressed(Key::ArrowDown) {
                self.move_down(results.len());
            }
            if i.key_pressed(Key::ArrowUp) {
                self.move_up(results.len());
            }
            if i.key_pressed(Key::Enter) {
                if let Some(name) = results.get(self.selected_index) {
                    output.selected_note = Some(name.clone());
                    output.closed = true;
                }
            }
        });

        let bg_color = Color32::from_rgb(35, 35, 40);
        let border_color = Color32::from_rgb(80, 80, 90);
        let text_color = Color32::from_rgb(220, 220, 220);
        let secondary_color = Color32::from_rgb(140, 140, 150);
        let selected_bg = Color32::from_rgb(55, 65, 85);
        let hover_bg = Color32::from_rgb(45, 50, 60);

        egui::Area::new(egui::Id::new("command_palette_overlay"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 100.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(bg_color)
                    .stroke(egui::Stroke::new(1.0, border_color))
                    .rounding(8.0)
                    .shadow(egui::epaint::Shadow {
                        offset: [0.0, 4.0].into(),
                        blur: 12.0,
                        spread: 0.0,
                        color: Color32::from_black_alpha(60),
                    })
                    .show(ui, |ui| {
                        ui.set_width(420.0);

                        ui.add_space(8.0);

                        // Search input
                        ui.horizontal(|ui| {
                            ui.add_space(12.0);
                            ui.label(RichText::new("🔍").size(16.0));
                            ui.add_space(4.0);

                            let mut query = self.query.clone();
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut query)
                                    .hint_text("Search notes...")
                                    .frame(false)
                                    .desired_width(370.0)
                                    .font(egui::TextStyle::Body),
                            );
                            response.request_focus();
                            if response.changed() {
                                self.set_query(query);
                            }

                            ui.add_space(8.0);
                        });

                        ui.add_space(4.0);
                        ui.separator();
                        ui.add_space(4.0);

                        // Results list
                        if results.is_empty() {
                            ui.horizontal(|ui| {
                                ui.add_space(16.0);
                                ui.label(
                                    RichText::new("No matching notes")
                                        .color(secondary_color)
                                        .italics(),
                                );
                            });
                            ui.add_space(8.0);
                        } else {
                            for (idx, name) in results.iter().enumerate() {
                                let is_selected = idx == self.selected_index;

                                let response = ui
                                    .horizontal(|ui| {
                                        let row_response = ui.interact(
                                            ui.available_rect_before_wrap(),
                                            ui.id().with(idx),
                                            Sense::click(),
                                        );

                                        if is_selected {
                                            ui.painter().rect_filled(
                                                row_response.rect.expand2(egui::vec2(8.0, 2.0)),
                                                4.0,
                                                selected_bg,
                                            );
                                        } else if row_response.hovered() {
                                            ui.painter().rect_filled(
                                                row_response.rect.expand2(egui::vec2(8.0, 2.0)),
                                                4.0,
                                                hover_bg,
                                            );
                                        }

                                        ui.add_space(16.0);
                                        ui.label(RichText::new("📝").size(14.0));
                                        ui.add_space(8.0);
                                        ui.label(RichText::new(name).color(text_color).strong());

                                        row_response
                                    })
                                    .inner;

                                if response.clicked() {
                                    output.selected_note = Some(name.clone());
                                    output.closed = true;
                                }

                                ui.add_space(2.0);
                            }
                            ui.add_space(4.0);
                        }

                        // Keyboard hints
                        ui.separator();
                        ui.horizontal(|ui| {
                            ui.add_space(12.0);
                            ui.label(
                                RichText::new("↑↓ Navigate  ⏎ Open  Esc Close")
                                    .color(secondary_color)
                                    .small(),
                            );
                        });
                        ui.add_space(6.0);
                    });
            });

        if output.closed {
            self.close();
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<String> {
        vec![
            "daily journal".to_string(),
            "groceries".to_string(),
            "project ideas".to_string(),
        ]
    }

    #[test]
    fn test_palette_open_snapshots_catalog() {
        let mut palette = CommandPalette::new();
        let mut notes = catalog();
        palette.open(&notes);

        // Later catalog changes are invisible to the open palette.
        notes.push("new arrival".to_string());
        assert_eq!(palette.filtered().len(), 3);
    }

    #[test]
    fn test_palette_close_discards_state() {
        let mut palette = CommandPalette::new();
        palette.open(&catalog());
        palette.set_query("jour".to_string());
        palette.move_down(1);
        palette.close();

        assert!(!palette.is_open());
        palette.open(&catalog());
        assert_eq!(palette.selected_index(), 0);
        assert_eq!(palette.filtered().len(), 3);
    }

    #[test]
    fn test_filter_matches_fuzzy() {
        let mut palette = CommandPalette::new();
        palette.open(&catalog());
        palette.set_query("grc".to_string());

        let results = palette.filtered();
        assert_eq!(results, vec!["groceries"]);
    }

    #[test]
    fn test_filter_no_matches() {
        let mut palette = CommandPalette::new();
        palette.open(&catalog());
        palette.set_query("zzzzz".to_string());
        assert!(palette.filtered().is_empty());
    }

    #[test]
    fn test_query_change_resets_selection() {
        let mut palette = CommandPalette::new();
        palette.open(&catalog());
        palette.move_down(3);
        assert_eq!(palette.selected_index(), 1);

        palette.set_query("o".to_string());
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn test_wraparound_down() {
        let mut palette = CommandPalette::new();
        palette.open(&catalog());

        palette.move_down(3);
        palette.move_down(3);
        assert_eq!(palette.selected_index(), 2);
        palette.move_down(3);
        assert_eq!(palette.selected_index(), 0);
    }

    #[test]
    fn test_wraparound_up_from_first() {
        let mut palette = CommandPalette::new();
        palette.open(&catalog());

        assert_eq!(palette.selected_index(), 0);
        palette.move_up(3);
        assert_eq!(palette.selected_index(), 2);
        palette.move_up(3);
        assert_eq!(palette.selected_index(), 1);
    }

    #[test]
    fn test_navigation_noop_on_empty_results() {
        let mut palette = CommandPalette::new();
        palette.open(&[]);
        palette.move_down(0);
        palette.move_up(0);
        assert_eq!(palette.selected_index(), 0);
    }
}
