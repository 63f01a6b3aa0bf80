//! Note session state and the autosave/preview pipeline.
//!
//! A [`NoteSession`] tracks the identity of the note being edited: the title
//! the user typed, the canonical name storage last confirmed, and whether the
//! note has ever been persisted. [`save_session`] implements the save gate
//! (no save without a resolvable title) and tells the caller whether the
//! catalog needs a refresh afterwards.
//!
//! [`Pipeline`] bundles the two debounce timers that sit between keystrokes
//! and their effects: preview rendering after a short quiet period, the
//! storage write after a longer one.

use std::time::Instant;

use log::{info, warn};

use crate::error::Result;
use crate::schedule::{Debouncer, RENDER_DELAY, SAVE_DELAY};
use crate::storage::NoteStore;

// ─────────────────────────────────────────────────────────────────────────────
// NoteSession
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of the note currently being edited.
#[derive(Debug, Clone)]
pub struct NoteSession {
    /// Title as typed in the title field. May disagree with `canonical`
    /// until the next successful save.
    pub title: String,

    /// Name storage last confirmed for this note, extensionless. `None`
    /// until the note is saved for the first time.
    pub canonical: Option<String>,

    /// True until the first successful save.
    pub is_new: bool,
}

impl NoteSession {
    /// Session for a brand-new, never-saved note.
    pub fn new_note() -> Self {
        Self {
            title: String::new(),
            canonical: None,
            is_new: true,
        }
    }

    /// Session for a note opened from the catalog.
    pub fn existing(name: &str) -> Self {
        Self {
            title: name.to_string(),
            canonical: Some(name.to_string()),
            is_new: false,
        }
    }

    /// The name a save would use: the typed title if non-blank (with any
    /// `.md` suffix dropped), else the tracked canonical name. `None` means
    /// there is nothing to save under.
    pub fn resolved_title(&self) -> Option<String> {
        let trimmed = self.title.trim();
        let stripped = trimmed.strip_suffix(".md").unwrap_or(trimmed).trim();
        if !stripped.is_empty() {
            return Some(stripped.to_string());
        }
        self.canonical.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Saving
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a save attempt that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The note was written. `refresh_catalog` is true when the note's
    /// identity changed: first save, or a rename the store confirmed.
    Saved {
        canonical: String,
        refresh_catalog: bool,
    },

    /// No resolvable title; nothing was sent to storage.
    SkippedEmptyTitle,
}

/// Save the buffer content under the session's resolved title.
///
/// An empty resolved title is a silent skip, not an error. On success the
/// session is updated to the canonical name the store returned; on failure
/// the session is left untouched so the next attempt can retry.
pub fn save_session(
    store: &dyn NoteStore,
    session: &mut NoteSession,
    content: &str,
) -> Result<SaveOutcome> {
    let Some(title) = session.resolved_title() else {
        return Ok(SaveOutcome::SkippedEmptyTitle);
    };

    let canonical = store.save_note(&title, content)?;
    let refresh_catalog = session.is_new || session.canonical.as_deref() != Some(&canonical);

    if refresh_catalog {
        info!("Saved note '{canonical}' (identity changed, catalog refresh needed)");
    }

    // Renames leave the old file behind; drop it once the new name is
    // confirmed so the catalog does not show both.
    if let Some(previous) = session.canonical.as_deref() {
        if previous != canonical {
            if let Err(e) = store.delete_note(previous) {
                warn!("Failed to remove renamed note '{previous}': {e}");
            }
        }
    }

    session.canonical = Some(canonical.clone());
    session.is_new = false;

    Ok(SaveOutcome::Saved {
        canonical,
        refresh_catalog,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// The two debounce timers between edits and their effects.
pub struct Pipeline {
    render: Debouncer<()>,
    save: Debouncer<()>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            render: Debouncer::new(RENDER_DELAY),
            save: Debouncer::new(SAVE_DELAY),
        }
    }

    /// A content or title edit: both the preview and the save clock restart.
    pub fn note_edited(&mut self, now: Instant) {
        self.render.schedule_at((), now);
        self.save.schedule_at((), now);
    }

    /// A structural edit whose persistence is carried by the surrounding
    /// content change (list continuation): preview only.
    pub fn render_only(&mut self, now: Instant) {
        self.render.schedule_at((), now);
    }

    /// True when the render quiet period has elapsed.
    pub fn poll_render(&mut self, now: Instant) -> bool {
        self.render.poll(now).is_some()
    }

    /// True when the save quiet period has elapsed.
    pub fn poll_save(&mut self, now: Instant) -> bool {
        self.save.poll(now).is_some()
    }

    /// Explicit save-now: cancels any pending debounced save. Returns true
    /// if a save was pending (callers save unconditionally anyway).
    pub fn take_save_now(&mut self) -> bool {
        self.save.fire_now().is_some()
    }

    /// Whether a debounced save is waiting to fire.
    pub fn save_pending(&self) -> bool {
        self.save.is_pending()
    }

    /// Drop any pending work, used when switching notes.
    pub fn cancel_all(&mut self) {
        self.render.cancel();
        self.save.cancel();
    }

    /// Earliest pending deadline, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.render.next_deadline(), self.save.next_deadline()) {
            (Some(r), Some(s)) => Some(r.min(s)),
            (r, s) => r.or(s),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
