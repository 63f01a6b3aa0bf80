//! List marker parsing and automatic list continuation.
//!
//! Pressing Enter inside a list item should extend the list with the next
//! marker, and pressing Enter on an empty item should end the list. The
//! marker grammar is the leading indent plus either `N.` or one of `* + -`,
//! followed by a space and the item content.

use crate::editor::{SelectionPolicy, TextBuffer};
use regex::Regex;
use std::sync::OnceLock;

fn ordered_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)(\d+)\.\s*(.*)$").expect("valid ordered list pattern"))
}

fn unordered_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)([*+-])\s*(.*)$").expect("valid unordered list pattern"))
}

/// A parsed list marker at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    /// `indent` + `number.` + space, e.g. `"  3. "`
    Ordered { indent: String, number: u32 },
    /// `indent` + bullet + space, e.g. `"- "`
    Unordered { indent: String, bullet: char },
}

impl ListMarker {
    /// Parse the marker and item content from a line.
    ///
    /// Returns the marker and the content that follows it. Lines that are
    /// not list items return `None`.
    pub fn parse(line: &str) -> Option<(ListMarker, &str)> {
        if let Some(caps) = ordered_pattern().captures(line) {
            let number = caps[2].parse().ok()?;
            let content = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            return Some((
                ListMarker::Ordered {
                    indent: caps[1].to_string(),
                    number,
                },
                content,
            ));
        }
        if let Some(caps) = unordered_pattern().captures(line) {
            let bullet = caps[2].chars().next()?;
            let content = caps.get(3).map(|m| m.as_str()).unwrap_or("");
            return Some((
                ListMarker::Unordered {
                    indent: caps[1].to_string(),
                    bullet,
                },
                content,
            ));
        }
        None
    }

    /// The marker text for the next item in the list: same indent, same
    /// bullet or incremented number, trailing space included. The number
    /// saturates at `u32::MAX` rather than wrapping.
    pub fn continuation(&self) -> String {
        match self {
            ListMarker::Ordered { indent, number } => {
                format!("{}{}. ", indent, number.saturating_add(1))
            }
            ListMarker::Unordered { indent, bullet } => format!("{}{} ", indent, bullet),
        }
    }
}

/// What handling the line-break key did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationOutcome {
    /// A new item marker was inserted; the default line break is suppressed.
    Extended,
    /// The empty item's marker was removed, ending the list; the default
    /// line break is suppressed.
    Terminated,
    /// The cursor is not in a list item; let the line break through.
    NotIntercepted,
}

impl ContinuationOutcome {
    /// Whether the default newline insertion must be suppressed.
    pub fn intercepted(&self) -> bool {
        !matches!(self, ContinuationOutcome::NotIntercepted)
    }
}

/// Handle the line-break key inside the editing surface.
///
/// Only the text from the start of the current line up to the cursor is
/// considered. An item with content gets a fresh marker on a new line, with
/// the cursor landing right after it; an empty item is collapsed, which
/// terminates the list without inserting a line break.
pub fn continue_list(buffer: &mut TextBuffer) -> ContinuationOutcome {
    let line_text = buffer.line_before_cursor();
    let Some((marker, content)) = ListMarker::parse(line_text) else {
        return ContinuationOutcome::NotIntercepted;
    };

    let cursor = buffer.selection_start();
    if content.trim().is_empty() {
        // Empty item: remove the marker text, ending the list
        let line_len = line_text.len();
        buffer.replace_range(cursor - line_len, cursor, "", SelectionPolicy::CollapseToEnd);
        ContinuationOutcome::Terminated
    } else {
        let insertion = format!("\n{}", marker.continuation());
        buffer.replace_range(cursor, cursor, &insertion, SelectionPolicy::CollapseToEnd);
        ContinuationOutcome::Extended
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
