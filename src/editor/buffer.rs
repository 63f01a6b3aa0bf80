//! The text buffer: note content plus the current selection.
//!
//! `TextBuffer` is the single source of truth for what is being edited. All
//! mutation goes through [`TextBuffer::replace_range`], which also decides
//! where the selection lands afterwards. Offsets are byte positions into
//! `value`; anything arriving from outside is clamped to UTF-8 character
//! boundaries so arbitrary indices can never panic.

// Allow dead code - the buffer exposes its complete accessor API; some
// constructors are only reached from tests
#![allow(dead_code)]

use crate::string_utils::{ceil_char_boundary, floor_char_boundary};

/// A line's byte range within the buffer, excluding the trailing newline.
///
/// Derived on demand and never cached across mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    pub end: usize,
}

/// Where the selection lands after a range replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// The new selection spans the inserted text.
    SelectReplacement,
    /// The selection collapses to a zero-width cursor after the inserted text.
    CollapseToEnd,
}

/// Mutable text with a selection range.
///
/// Invariant: `selection_start <= selection_end <= value.len()`, and both
/// offsets sit on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    selection_start: usize,
    selection_end: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer with a collapsed selection at position 0.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            selection_start: 0,
            selection_end: 0,
        }
    }

    /// Create a buffer from existing content, cursor collapsed at the start.
    pub fn from_text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            selection_start: 0,
            selection_end: 0,
        }
    }

    /// Create a buffer with an explicit selection (clamped to valid bounds).
    pub fn with_selection(value: impl Into<String>, start: usize, end: usize) -> Self {
        let mut buffer = Self::from_text(value);
        buffer.set_selection(start, end);
        buffer
    }

    /// The full buffer text.
    pub fn text(&self) -> &str {
        &self.value
    }

    /// Mutable access to the text for the egui widget.
    ///
    /// The widget edits the string in place; callers must re-sync the
    /// selection afterwards (via [`set_selection`](Self::set_selection),
    /// which clamps stale offsets).
    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.value
    }

    /// Byte offset where the selection begins.
    pub fn selection_start(&self) -> usize {
        self.selection_start
    }

    /// Byte offset where the selection ends.
    pub fn selection_end(&self) -> usize {
        self.selection_end
    }

    /// The selected text (empty when the selection is collapsed).
    pub fn selected_text(&self) -> &str {
        &self.value[self.selection_start..self.selection_end]
    }

    /// Whether the selection is a zero-width cursor.
    pub fn is_collapsed(&self) -> bool {
        self.selection_start == self.selection_end
    }

    /// Set the selection, swapping and clamping as needed to keep the
    /// invariant.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let collapsed = start == end;
        let start = floor_char_boundary(&self.value, start.min(self.value.len()));
        let end = if collapsed {
            start
        } else {
            ceil_char_boundary(&self.value, end.min(self.value.len()))
        };
        if start <= end {
            self.selection_start = start;
            self.selection_end = end;
        } else {
            self.selection_start = end;
            self.selection_end = start;
        }
    }

    /// Replace the whole content, collapsing the cursor at the start.
    ///
    /// Used when switching notes; edits within a note go through
    /// [`replace_range`](Self::replace_range).
    pub fn reset(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.selection_start = 0;
        self.selection_end = 0;
    }

    /// The line containing the selection.
    ///
    /// Scans backward from `selection_start` for the previous line break and
    /// forward from `selection_end` for the next one; buffer boundaries act
    /// as line boundaries when no break exists.
    pub fn current_line(&self) -> Line {
        let start = self.value[..self.selection_start]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let end = self.value[self.selection_end..]
            .find('\n')
            .map(|i| self.selection_end + i)
            .unwrap_or(self.value.len());
        Line { start, end }
    }

    /// Text of the current line from its start up to the cursor.
    ///
    /// List continuation only considers what precedes the cursor; content
    /// after it on the same line is ignored.
    pub fn line_before_cursor(&self) -> &str {
        let line = self.current_line();
        &self.value[line.start..self.selection_start]
    }

    /// Replace `[start, end)` with `text` and position the selection per
    /// `policy`. Out-of-range or mid-character offsets are clamped first.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str, policy: SelectionPolicy) {
        let start = floor_char_boundary(&self.value, start.min(self.value.len()));
        let end = ceil_char_boundary(&self.value, end.min(self.value.len()));
        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        self.value.replace_range(start..end, text);

        let inserted_end = start + text.len();
        match policy {
            SelectionPolicy::SelectReplacement => {
                self.selection_start = start;
                self.selection_end = inserted_end;
            }
            SelectionPolicy::CollapseToEnd => {
                self.selection_start = inserted_end;
                self.selection_end = inserted_end;
            }
        }

        // Clamp against the new length; replace_range above keeps offsets on
        // boundaries, but a zero-length buffer still needs the min().
        self.selection_start = self.selection_start.min(self.value.len());
        self.selection_end = self.selection_end.min(self.value.len());
    }

    /// Insert `text` at the current cursor, collapsing the selection after it.
    ///
    /// A non-collapsed selection is replaced by the insertion.
    pub fn insert_at_cursor(&mut self, text: &str) {
        self.replace_range(
            self.selection_start,
            self.selection_end,
            text,
            SelectionPolicy::CollapseToEnd,
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
