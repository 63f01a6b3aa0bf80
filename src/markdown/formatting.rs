//! Markdown Formatting Operations
//!
//! Toolbar and keyboard formatting commands applied to the current selection
//! in the text buffer.
//!
//! # Supported Formatting Commands
//! - **Inline**: Bold, Italic — wrap the selection in delimiters
//! - **Links**: deferred to the link capture form
//! - **Blocks**: Ordered and unordered lists, toggled over whole lines
//!
//! Inline commands are selection-local and do not detect existing delimiters:
//! bolding `**x**` produces `****x****`. List commands are fully toggleable.

use crate::editor::{ListMarker, SelectionPolicy, TextBuffer};

// ─────────────────────────────────────────────────────────────────────────────
// Format Command Enum
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown formatting commands that can be applied to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Link ([text](url)) — opens the capture form instead of mutating
    Link,
    /// Unordered list (`* item`)
    UnorderedList,
    /// Ordered list (`1. item`)
    OrderedList,
}

impl FormatCommand {
    /// Get the keyboard shortcut label for this command.
    pub fn shortcut_label(&self) -> &'static str {
        match self {
            Self::Bold => "Ctrl+B",
            Self::Italic => "Ctrl+I",
            Self::Link => "Ctrl+K",
            Self::UnorderedList => "Ctrl+Shift+U",
            Self::OrderedList => "Ctrl+Shift+O",
        }
    }

    /// Get the icon for this command (for the toolbar).
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Bold => "𝐁",
            Self::Italic => "𝐼",
            Self::Link => "🔗",
            Self::UnorderedList => "\u{2022}", // bullet •
            Self::OrderedList => "1.",
        }
    }

    /// Get the tooltip text for this command.
    pub fn tooltip(&self) -> String {
        let name = match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Link => "Insert Link",
            Self::UnorderedList => "Bullet List",
            Self::OrderedList => "Numbered List",
        };
        format!("{} ({})", name, self.shortcut_label())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The buffer was mutated; both debounced pipeline actions should run.
    Applied,
    /// List markers were removed (toggle-off path); still a mutation.
    Removed,
    /// The link capture form should open, seeded with the selection's text.
    /// Nothing was mutated.
    OpenLinkCapture { default_text: String },
}

impl FormatOutcome {
    /// Whether the buffer content changed.
    pub fn mutated(&self) -> bool {
        !matches!(self, FormatOutcome::OpenLinkCapture { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a formatting command to the buffer's current selection.
pub fn apply_format(buffer: &mut TextBuffer, command: FormatCommand) -> FormatOutcome {
    match command {
        FormatCommand::Bold => apply_inline_format(buffer, "**"),
        FormatCommand::Italic => apply_inline_format(buffer, "*"),
        FormatCommand::Link => FormatOutcome::OpenLinkCapture {
            default_text: buffer.selected_text().to_string(),
        },
        FormatCommand::UnorderedList => apply_list_format(buffer, ListStyle::Unordered),
        FormatCommand::OrderedList => apply_list_format(buffer, ListStyle::Ordered),
    }
}

/// Wrap the exact selection in a symmetric delimiter.
///
/// No toggle-off: pre-existing delimiters on the selection are not detected.
/// An empty selection still inserts the delimiter pair, leaving it selected
/// so typing replaces it.
fn apply_inline_format(buffer: &mut TextBuffer, delimiter: &str) -> FormatOutcome {
    let wrapped = format!("{}{}{}", delimiter, buffer.selected_text(), delimiter);
    buffer.replace_range(
        buffer.selection_start(),
        buffer.selection_end(),
        &wrapped,
        SelectionPolicy::SelectReplacement,
    );
    FormatOutcome::Applied
}

// ─────────────────────────────────────────────────────────────────────────────
// List Formatting
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListStyle {
    Ordered,
    Unordered,
}

impl ListStyle {
    /// The idempotence test: does this line already carry a marker of this
    /// style? Ordered wants `digits.` + space, unordered wants a bullet +
    /// space.
    fn line_matches(&self, line: &str) -> bool {
        match ListMarker::parse(line) {
            Some((ListMarker::Ordered { .. }, _)) => {
                *self == ListStyle::Ordered && has_space_after_marker(line)
            }
            Some((ListMarker::Unordered { .. }, _)) => {
                *self == ListStyle::Unordered && has_space_after_marker(line)
            }
            None => false,
        }
    }

    fn marker_for(&self, index: usize) -> String {
        match self {
            ListStyle::Ordered => format!("{}. ", index + 1),
            ListStyle::Unordered => "* ".to_string(),
        }
    }
}

/// The toggle check requires a space after the marker symbol (`1. x`, `* x`);
/// `*emphasis*` must not count as an existing bullet.
fn has_space_after_marker(line: &str) -> bool {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix(|c| matches!(c, '*' | '+' | '-')) {
        return rest.starts_with(' ');
    }
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    trimmed[digits..].starts_with(". ")
}

/// Strip a leading list marker of either kind, returning the bare content.
///
/// Application path: greedy about whitespace after the marker, so switching
/// styles never leaves stray spaces between the new marker and the content.
fn strip_any_marker(line: &str) -> &str {
    match ListMarker::parse(line) {
        Some((_, content)) => content,
        None => line,
    }
}

/// Strip a marker for the toggle-off path: indent, symbol, and at most one
/// space. Only a single space comes off so a toggle round-trip restores the
/// original text exactly.
fn strip_marker_for_removal(line: &str) -> &str {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix(['*', '+', '-']) {
        return rest.strip_prefix(' ').unwrap_or(rest);
    }
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix('.') {
            return rest.strip_prefix(' ').unwrap_or(rest);
        }
    }
    line
}

/// Toggle list formatting over every line touched by the selection.
///
/// The affected range expands to full lines. If every line already carries
/// the target style the markers are stripped (toggle-off); otherwise any
/// existing marker of either kind is replaced by the target style, numbering
/// from 1, with blank lines left blank. The rewritten block stays selected.
fn apply_list_format(buffer: &mut TextBuffer, style: ListStyle) -> FormatOutcome {
    let block = buffer.current_line();
    let lines: Vec<&str> = buffer.text()[block.start..block.end].split('\n').collect();

    let all_match = lines.iter().all(|line| style.line_matches(line));

    let new_lines: Vec<String> = if all_match {
        // Removal: strip the marker prefix from each line
        lines
            .iter()
            .map(|line| strip_marker_for_removal(line).to_string())
            .collect()
    } else {
        // Application: replace any existing marker, renumber from 1,
        // skip blank lines
        let mut item_index = 0;
        lines
            .iter()
            .map(|line| {
                let content = strip_any_marker(line);
                if content.trim().is_empty() {
                    String::new()
                } else {
                    let marked = format!("{}{}", style.marker_for(item_index), content);
                    item_index += 1;
                    marked
                }
            })
            .collect()
    };

    let replacement = new_lines.join("\n");
    buffer.replace_range(
        block.start,
        block.end,
        &replacement,
        SelectionPolicy::SelectReplacement,
    );

    if all_match {
        FormatOutcome::Removed
    } else {
        FormatOutcome::Applied
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Formatting Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_wraps_selection() {
        let mut buffer = TextBuffer::with_selection("Hello world", 0, 5);
        let outcome = apply_format(&mut buffer, FormatCommand::Bold);
        assert_eq!(outcome, FormatOutcome::Applied);
        assert_eq!(buffer.text(), "**Hello** world");
        assert_eq!(buffer.selected_text(), "**Hello**");
    }

    #[test]
    fn test_italic_wraps_selection() {
        let mut buffer = TextBuffer::with_selection("Hello world", 6, 11);
        apply_format(&mut buffer, FormatCommand::Italic);
        assert_eq!(buffer.text(), "Hello *world*");
    }

    #[test]
    fn test_bold_is_not_idempotent() {
        // Inline marks deliberately do not toggle off; applying twice stacks
        let mut buffer = TextBuffer::with_selection("x", 0, 1);
        apply_format(&mut buffer, FormatCommand::Bold);
        apply_format(&mut buffer, FormatCommand::Bold);
        assert_eq!(buffer.text(), "****x****");
    }

    #[test]
    fn test_bold_empty_selection_inserts_delimiters() {
        let mut buffer = TextBuffer::with_selection("ab", 1, 1);
        apply_format(&mut buffer, FormatCommand::Bold);
        assert_eq!(buffer.text(), "a****b");
        assert_eq!(buffer.selected_text(), "****");
    }

    #[test]
    fn test_bold_unicode_selection() {
        let text = "Hei på deg";
        let start = text.find("på").unwrap();
        let mut buffer = TextBuffer::with_selection(text, start, start + "på".len());
        apply_format(&mut buffer, FormatCommand::Bold);
        assert!(buffer.text().contains("**på**"));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Link Command Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_link_defers_to_capture_form() {
        let mut buffer = TextBuffer::with_selection("Click here", 6, 10);
        let outcome = apply_format(&mut buffer, FormatCommand::Link);
        assert_eq!(
            outcome,
            FormatOutcome::OpenLinkCapture {
                default_text: "here".to_string()
            }
        );
        assert!(!outcome.mutated());
        // Buffer untouched until the form confirms
        assert_eq!(buffer.text(), "Click here");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // List Formatting Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_unordered_list_single_line() {
        let mut buffer = TextBuffer::with_selection("Item one", 2, 2);
        let outcome = apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(outcome, FormatOutcome::Applied);
        assert_eq!(buffer.text(), "* Item one");
        assert_eq!(buffer.selected_text(), "* Item one");
    }

    #[test]
    fn test_ordered_list_multi_line_renumbers_from_one() {
        let text = "alpha\nbeta\ngamma";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::OrderedList);
        assert_eq!(buffer.text(), "1. alpha\n2. beta\n3. gamma");
    }

    #[test]
    fn test_selection_expands_to_full_lines() {
        // Selection touches the middle of the first and last lines
        let text = "alpha\nbeta\ngamma";
        let mut buffer = TextBuffer::with_selection(text, 2, 13);
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.text(), "* alpha\n* beta\n* gamma");
    }

    #[test]
    fn test_unordered_toggle_off_round_trip() {
        let text = "alpha\nbeta";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        let outcome = apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(outcome, FormatOutcome::Removed);
        assert_eq!(buffer.text(), text);
    }

    #[test]
    fn test_ordered_toggle_off_round_trip() {
        let text = "alpha\nbeta\ngamma";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::OrderedList);
        let outcome = apply_format(&mut buffer, FormatCommand::OrderedList);
        assert_eq!(outcome, FormatOutcome::Removed);
        assert_eq!(buffer.text(), text);
    }

    #[test]
    fn test_round_trip_preserves_inner_whitespace() {
        // Only the single separating space is removed on toggle-off, so
        // content that itself begins with spaces survives a round trip
        let text = "  indented line";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.text(), "*   indented line");
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.text(), text);
    }

    #[test]
    fn test_removal_accepts_any_bullet_char() {
        let text = "* a\n+ b\n- c";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        let outcome = apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(outcome, FormatOutcome::Removed);
        assert_eq!(buffer.text(), "a\nb\nc");
    }

    #[test]
    fn test_style_switch_replaces_markers() {
        let text = "* a\n- b";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        let outcome = apply_format(&mut buffer, FormatCommand::OrderedList);
        assert_eq!(outcome, FormatOutcome::Applied);
        // No residual bullets, numbering starts at 1
        assert_eq!(buffer.text(), "1. a\n2. b");
    }

    #[test]
    fn test_switch_ordered_to_unordered() {
        let text = "4. a\n9. b";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.text(), "* a\n* b");
    }

    #[test]
    fn test_application_renumbers_regardless_of_source_numbers() {
        // Mixed block: one ordered line, one plain, so it is an application
        let text = "7. a\nb";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::OrderedList);
        assert_eq!(buffer.text(), "1. a\n2. b");
    }

    #[test]
    fn test_blank_lines_stay_blank_on_application() {
        let text = "a\n\nb";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.text(), "* a\n\n* b");
    }

    #[test]
    fn test_blank_lines_do_not_consume_numbers() {
        let text = "a\n\nb";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::OrderedList);
        assert_eq!(buffer.text(), "1. a\n\n2. b");
    }

    #[test]
    fn test_emphasis_line_is_not_treated_as_existing_bullet() {
        // '*word*' has no space after the asterisk, so this is an
        // application, not a toggle-off
        let text = "*word*";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        let outcome = apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(outcome, FormatOutcome::Applied);
        assert_eq!(buffer.text(), "* word*");
    }

    #[test]
    fn test_list_selection_policy_selects_block() {
        let text = "a\nb";
        let mut buffer = TextBuffer::with_selection(text, 0, text.len());
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.selection_start(), 0);
        assert_eq!(buffer.selection_end(), buffer.text().len());
    }

    #[test]
    fn test_list_with_unicode_content() {
        let text = "日本語テスト";
        let mut buffer = TextBuffer::with_selection(text, 0, 0);
        apply_format(&mut buffer, FormatCommand::UnorderedList);
        assert_eq!(buffer.text(), "* 日本語テスト");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Command Metadata Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_shortcut_labels() {
        assert_eq!(FormatCommand::Bold.shortcut_label(), "Ctrl+B");
        assert_eq!(FormatCommand::Italic.shortcut_label(), "Ctrl+I");
        assert_eq!(FormatCommand::Link.shortcut_label(), "Ctrl+K");
    }

    #[test]
    fn test_tooltips() {
        let tooltip = FormatCommand::Bold.tooltip();
        assert!(tooltip.contains("Bold"));
        assert!(tooltip.contains("Ctrl+B"));
    }

    #[test]
    fn test_no_panic_on_any_byte_index() {
        let text = "Hei på deg 你好 🎉\n* liste";
        for i in 0..=text.len() + 2 {
            for j in i..=text.len() + 2 {
                let mut buffer = TextBuffer::with_selection(text, i, j);
                apply_format(&mut buffer, FormatCommand::Bold);
                let mut buffer = TextBuffer::with_selection(text, i, j);
                apply_format(&mut buffer, FormatCommand::UnorderedList);
            }
        }
    }
}
