//! Central application state for Jot
//!
//! `AppState` owns everything that is not an egui widget: the text buffer,
//! the current note session, the catalog, settings, the debounce pipeline,
//! and the modal focus state that routes keyboard input.

use log::{info, warn};

use crate::config::Settings;
use crate::editor::TextBuffer;
use crate::error::Result;
use crate::storage::NoteStore;
use crate::workspace::{save_session, NoteSession, Pipeline, SaveOutcome};

// ─────────────────────────────────────────────────────────────────────────────
// Input Focus
// ─────────────────────────────────────────────────────────────────────────────

/// Which surface currently owns keyboard input.
///
/// At most one modal is active at a time; while one is open, Enter and
/// Escape belong to it and never reach the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    /// Normal editing, no modal open
    #[default]
    Editing,
    /// Delete confirmation dialog is open
    ConfirmingDelete,
    /// Link capture form is open
    CapturingLink,
    /// Command palette is open
    PaletteOpen,
}

// ─────────────────────────────────────────────────────────────────────────────
// Toast
// ─────────────────────────────────────────────────────────────────────────────

/// Transient status message shown in the footer.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    /// App time (seconds since launch) at which the toast disappears
    pub expires_at: f64,
}

/// How long a toast stays visible, in seconds.
const TOAST_DURATION: f64 = 3.0;

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// All non-widget application state.
pub struct AppState {
    /// The text being edited
    pub buffer: TextBuffer,

    /// The note the buffer belongs to. `None` shows the welcome screen.
    pub session: Option<NoteSession>,

    /// Note names shown in the sidebar, sorted
    pub catalog: Vec<String>,

    /// User settings
    pub settings: Settings,

    /// Modal keyboard-routing state
    pub focus: InputFocus,

    /// Render/save debounce timers
    pub pipeline: Pipeline,

    /// Pending transient status message
    toast: Option<Toast>,

    /// Whether settings changed since the last persist
    settings_dirty: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            buffer: TextBuffer::new(),
            session: None,
            catalog: Vec::new(),
            settings,
            focus: InputFocus::default(),
            pipeline: Pipeline::new(),
            toast: None,
            settings_dirty: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog and note lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Reload the sidebar catalog. Failure keeps the previous catalog.
    pub fn refresh_catalog(&mut self, store: &dyn NoteStore) {
        match store.list_notes() {
            Ok(names) => self.catalog = names,
            Err(e) => warn!("Failed to refresh note catalog: {}", e),
        }
    }

    /// Open a note from the catalog, replacing the buffer.
    pub fn open_note(&mut self, store: &dyn NoteStore, name: &str, now: f64) {
        match store.read_note(name) {
            Ok(content) => {
                self.pipeline.cancel_all();
                self.buffer.reset(content);
                self.session = Some(NoteSession::existing(name));
                self.focus = InputFocus::Editing;
                info!("Opened note '{}'", name);
            }
            Err(e) => {
                warn!("Failed to open note '{}': {}", name, e);
                self.set_toast(format!("Could not open '{}'", name), true, now);
            }
        }
    }

    /// Start a fresh, unsaved note.
    pub fn new_note(&mut self) {
        self.pipeline.cancel_all();
        self.buffer.reset("");
        self.session = Some(NoteSession::new_note());
        self.focus = InputFocus::Editing;
    }

    /// Back to the welcome screen, dropping any pending timers.
    ///
    /// Unsaved keystrokes inside the debounce window are lost; the save
    /// timers are best-effort by design.
    pub fn close_note(&mut self) {
        self.pipeline.cancel_all();
        self.buffer.reset("");
        self.session = None;
        self.focus = InputFocus::Editing;
    }

    /// Whether the current note exists in storage (delete is meaningful).
    pub fn has_persisted_note(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.canonical.is_some())
            .unwrap_or(false)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Saving
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a save of the current buffer. No-op without a session or with an
    /// unresolvable title. Failures become a toast and leave everything in
    /// place for the next attempt.
    pub fn save_current(&mut self, store: &dyn NoteStore, now: f64) -> Option<SaveOutcome> {
        let session = self.session.as_mut()?;
        match save_session(store, session, self.buffer.text()) {
            Ok(outcome) => {
                if let SaveOutcome::Saved {
                    refresh_catalog, ..
                } = &outcome
                {
                    if *refresh_catalog {
                        self.refresh_catalog(store);
                    }
                }
                Some(outcome)
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                self.set_toast("Save failed".to_string(), true, now);
                None
            }
        }
    }

    /// Delete the current note after confirmation.
    pub fn delete_current(&mut self, store: &dyn NoteStore) -> Result<()> {
        let Some(name) = self
            .session
            .as_ref()
            .and_then(|s| s.canonical.clone())
        else {
            return Ok(());
        };
        store.delete_note(&name)?;
        info!("Deleted note '{}'", name);
        self.refresh_catalog(store);
        self.close_note();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toast
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_toast(&mut self, message: String, is_error: bool, now: f64) {
        self.toast = Some(Toast {
            message,
            is_error,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Drop the toast once its time is up.
    pub fn update_toast(&mut self, now: f64) {
        if let Some(toast) = &self.toast {
            if now >= toast.expires_at {
                self.toast = None;
            }
        }
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings persistence tracking
    // ─────────────────────────────────────────────────────────────────────────

    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Take the dirty flag, clearing it.
    pub fn take_settings_dirty(&mut self) -> bool {
        std::mem::take(&mut self.settings_dirty)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::MemNoteStore;

    fn state() -> AppState {
        AppState::new(Settings::default())
    }

    #[test]
    fn test_initial_state_shows_welcome() {
        let state = state();
        assert!(state.session.is_none());
        assert_eq!(state.focus, InputFocus::Editing);
        assert!(!state.has_persisted_note());
    }

    #[test]
    fn test_open_note_loads_content() {
        let store = MemNoteStore::new();
        store.save_note("Todo", "- milk\n").unwrap();

        let mut state = state();
        state.open_note(&store, "Todo", 0.0);

        assert_eq!(state.buffer.text(), "- milk\n");
        assert!(state.has_persisted_note());
        assert!(state.toast().is_none());
    }

    #[test]
    fn test_open_missing_note_is_nonfatal() {
        let store = MemNoteStore::new();
        let mut state = state();
        state.buffer.reset("kept");

        state.open_note(&store, "ghost", 1.0);

        // The buffer and session are untouched and an error toast appears.
        assert_eq!(state.buffer.text(), "kept");
        assert!(state.session.is_none());
        assert!(state.toast().is_some());
        assert!(state.toast().unwrap().is_error);
    }

    #[test]
    fn test_new_note_clears_buffer() {
        let mut state = state();
        state.buffer.reset("leftovers");
        state.new_note();

        assert_eq!(state.buffer.text(), "");
        assert!(state.session.is_some());
        assert!(!state.has_persisted_note());
    }

    #[test]
    fn test_save_without_session_is_noop() {
        let store = MemNoteStore::new();
        let mut state = state();
        assert!(state.save_current(&store, 0.0).is_none());
        assert!(store.list_notes().unwrap().is_empty());
    }

    #[test]
    fn test_save_refreshes_catalog_on_new_note() {
        let store = MemNoteStore::new();
        let mut state = state();
        state.new_note();
        state.session.as_mut().unwrap().title = "Plans".to_string();
        state.buffer.reset("content");

        let outcome = state.save_current(&store, 0.0).unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { .. }));
        assert_eq!(state.catalog, vec!["Plans"]);
    }

    #[test]
    fn test_save_failure_sets_toast_and_keeps_buffer() {
        let mut store = MemNoteStore::new();
        store.fail_writes = true;

        let mut state = state();
        state.new_note();
        state.session.as_mut().unwrap().title = "Doomed".to_string();
        state.buffer.reset("content");

        assert!(state.save_current(&store, 2.0).is_none());
        assert_eq!(state.buffer.text(), "content");
        assert!(state.toast().unwrap().is_error);
    }

    #[test]
    fn test_delete_current_removes_and_closes() {
        let store = MemNoteStore::new();
        store.save_note("Gone", "x").unwrap();

        let mut state = state();
        state.open_note(&store, "Gone", 0.0);
        state.delete_current(&store).unwrap();

        assert!(state.session.is_none());
        assert!(state.catalog.is_empty());
        assert_eq!(state.buffer.text(), "");
    }

    #[test]
    fn test_delete_without_persisted_note_is_noop() {
        let store = MemNoteStore::new();
        let mut state = state();
        state.new_note();
        state.buffer.reset("draft");

        state.delete_current(&store).unwrap();

        // Never-saved notes have nothing to delete; the buffer survives.
        assert_eq!(state.buffer.text(), "draft");
        assert!(state.session.is_some());
    }

    #[test]
    fn test_toast_expires() {
        let mut state = state();
        state.set_toast("Saved".to_string(), false, 10.0);
        state.update_toast(11.0);
        assert!(state.toast().is_some());
        state.update_toast(13.5);
        assert!(state.toast().is_none());
    }

    #[test]
    fn test_settings_dirty_flag_is_taken_once() {
        let mut state = state();
        assert!(!state.take_settings_dirty());
        state.mark_settings_dirty();
        assert!(state.take_settings_dirty());
        assert!(!state.take_settings_dirty());
    }
}
