//! Filesystem-backed note store.
//!
//! Notes live as flat `.md` files in a single directory. The default
//! directory is `<data_dir>/jot/notes`, created on first use.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::storage::NoteStore;

// ─────────────────────────────────────────────────────────────────────────────
// FsNoteStore
// ─────────────────────────────────────────────────────────────────────────────

/// [`NoteStore`] implementation over a flat directory of `.md` files.
pub struct FsNoteStore {
    notes_dir: PathBuf,
}

impl FsNoteStore {
    /// Store rooted at the platform data directory (`<data_dir>/jot/notes`).
    pub fn new() -> Result<Self> {
        let base = dirs::data_dir().ok_or(Error::DataDirNotFound)?;
        Ok(Self::with_root(base.join("jot").join("notes")))
    }

    /// Store rooted at an explicit directory. Used by tests and by
    /// command-line overrides.
    pub fn with_root(notes_dir: PathBuf) -> Self {
        Self { notes_dir }
    }

    /// The directory notes are stored in.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.notes_dir)?;
        Ok(())
    }

    fn note_path(&self, canonical: &str) -> PathBuf {
        self.notes_dir.join(format!("{canonical}.md"))
    }

    /// Validate and normalize a note name: trim whitespace, strip a trailing
    /// `.md`, and reject names that are empty or could escape the notes
    /// directory.
    fn canonicalize_name(&self, name: &str) -> Result<String> {
        let trimmed = name.trim();
        let stripped = trimmed.strip_suffix(".md").unwrap_or(trimmed);
        if stripped.is_empty()
            || stripped.contains("..")
            || stripped.contains('/')
            || stripped.contains('\\')
        {
            return Err(Error::InvalidNoteName {
                name: name.to_string(),
            });
        }
        Ok(stripped.to_string())
    }
}

impl NoteStore for FsNoteStore {
    fn list_notes(&self) -> Result<Vec<String>> {
        self.ensure_dir()?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.notes_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_note(&self, name: &str) -> Result<String> {
        let canonical = self.canonicalize_name(name)?;
        let path = self.note_path(&canonical);
        if !path.exists() {
            return Err(Error::NoteNotFound { name: canonical });
        }
        fs::read_to_string(&path).map_err(|source| Error::NoteRead {
            name: canonical,
            source,
        })
    }

    fn save_note(&self, name: &str, content: &str) -> Result<String> {
        let canonical = self.canonicalize_name(name)?;
        self.ensure_dir()?;
        fs::write(self.note_path(&canonical), content).map_err(|source| Error::NoteWrite {
            name: canonical.clone(),
            source,
        })?;
        Ok(canonical)
    }

    fn delete_note(&self, name: &str) -> Result<()> {
        let canonical = self.canonicalize_name(name)?;
        let path = self.note_path(&canonical);
        // Already-deleted notes are fine; a repeated delete is a no-op.
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
