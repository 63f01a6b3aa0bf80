//! Preview pane.
//!
//! Holds the most recently rendered HTML for the current note and displays
//! it alongside the editor. Hyperlinks found in the rendered output are
//! listed below the markup and open in the system browser.

use std::sync::OnceLock;

use eframe::egui::{self, RichText, ScrollArea};
use log::warn;
use regex::Regex;

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"href="([^"]+)""#).expect("valid href regex"))
}

/// Fraction of the scrollable range a scroll offset represents. Content
/// that fits entirely in the viewport maps to 0.
pub fn scroll_fraction(offset: f32, content_height: f32, viewport_height: f32) -> f32 {
    let max = content_height - viewport_height;
    if max <= 0.0 {
        0.0
    } else {
        (offset / max).clamp(0.0, 1.0)
    }
}

/// Rendered-preview state for the current note.
#[derive(Debug, Default)]
pub struct PreviewPane {
    html: String,
    /// Scrollable overflow measured on the previous frame, used to map the
    /// editor's scroll fraction onto this pane's range.
    last_max_scroll: f32,
}

impl PreviewPane {
    /// Replace the rendered output, typically after a render debounce fires.
    pub fn set_html(&mut self, html: String) {
        self.html = html;
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    /// External `http(s)` links present in the rendered output, in order.
    pub fn external_links(&self) -> Vec<String> {
        href_pattern()
            .captures_iter(&self.html)
            .map(|c| c[1].to_string())
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
            .collect()
    }

    /// Render the pane contents into the given `ui`.
    ///
    /// `sync_fraction` carries the editor's relative scroll position; when
    /// present the pane scrolls to the proportionally matching offset.
    pub fn show(&mut self, ui: &mut egui::Ui, sync_fraction: Option<f32>) {
        let mut scroll_area = ScrollArea::vertical()
            .id_source("preview_scroll")
            .auto_shrink([false, false]);

        if let Some(fraction) = sync_fraction {
            scroll_area = scroll_area.vertical_scroll_offset(fraction * self.last_max_scroll);
        }

        let output = scroll_area
            .show(ui, |ui| {
                if self.html.is_empty() {
                    ui.label(RichText::new("Nothing to preview yet").weak().italics());
                    return;
                }

                ui.label(RichText::new(&self.html).monospace());

                let links = self.external_links();
                if !links.is_empty() {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.label(RichText::new("Links").small().weak());
                    for url in links {
                        if ui.link(&url).clicked() {
                            if let Err(e) = open::that(&url) {
                                warn!("Failed to open link '{}': {}", url, e);
                            }
                        }
                    }
                }
            });

        self.last_max_scroll = (output.content_size.y - output.inner_rect.height()).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_links_extracted_in_order() {
        let mut pane = PreviewPane::default();
        pane.set_html(
            r#"<p><a href="https://a.example">a</a> and <a href="http://b.example">b</a></p>"#
                .to_string(),
        );
        assert_eq!(
            pane.external_links(),
            vec!["https://a.example", "http://b.example"]
        );
    }

    #[test]
    fn test_non_http_links_ignored() {
        let mut pane = PreviewPane::default();
        pane.set_html(r#"<a href="file:///etc/passwd">x</a> <a href="mailto:a@b.c">m</a>"#.into());
        assert!(pane.external_links().is_empty());
    }

    #[test]
    fn test_scroll_fraction_is_proportional() {
        assert_eq!(scroll_fraction(0.0, 1000.0, 200.0), 0.0);
        assert_eq!(scroll_fraction(400.0, 1000.0, 200.0), 0.5);
        assert_eq!(scroll_fraction(800.0, 1000.0, 200.0), 1.0);
    }

    #[test]
    fn test_scroll_fraction_clamps_overscroll() {
        assert_eq!(scroll_fraction(950.0, 1000.0, 200.0), 1.0);
        assert_eq!(scroll_fraction(-20.0, 1000.0, 200.0), 0.0);
    }

    #[test]
    fn test_scroll_fraction_zero_when_content_fits() {
        assert_eq!(scroll_fraction(0.0, 150.0, 200.0), 0.0);
        assert_eq!(scroll_fraction(50.0, 200.0, 200.0), 0.0);
    }

    #[test]
    fn test_clear_empties_output() {
        let mut pane = PreviewPane::default();
        pane.set_html(r#"<a href="https://a.example">a</a>"#.to_string());
        pane.clear();
        assert!(pane.html.is_empty());
        assert!(pane.external_links().is_empty());
    }
}
