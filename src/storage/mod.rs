//! Note storage collaborator.
//!
//! The editing core only sees the [`NoteStore`] trait; the filesystem
//! implementation keeps each note as a `.md` file in a flat notes directory.
//! Note names are extensionless everywhere outside this module — the store
//! appends `.md` on disk and strips it again in every name it returns.

mod fs;

pub use fs::FsNoteStore;

use crate::error::Result;

/// Contract between the editing core and durable note storage.
///
/// Implementations may normalize names on save; the canonical name returned
/// by [`save_note`](Self::save_note) is authoritative.
pub trait NoteStore {
    /// All known note names, sorted, without extension.
    fn list_notes(&self) -> Result<Vec<String>>;

    /// Read a note's content. Fails with `Error::NoteNotFound` if absent.
    fn read_note(&self, name: &str) -> Result<String>;

    /// Create or overwrite a note. Returns the canonical (normalized) name.
    fn save_note(&self, name: &str, content: &str) -> Result<String>;

    /// Delete a note. Deleting a note that is already gone succeeds, so a
    /// stale repeat delete is harmless.
    fn delete_note(&self, name: &str) -> Result<()>;
}

#[cfg(test)]
pub mod testing {
    //! In-memory store shared by tests that exercise the save path.

    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use crate::error::Error;

    use super::*;

    pub struct MemNoteStore {
        notes: RefCell<BTreeMap<String, String>>,
        pub fail_writes: bool,
    }

    impl MemNoteStore {
        pub fn new() -> Self {
            Self {
                notes: RefCell::new(BTreeMap::new()),
                fail_writes: false,
            }
        }
    }

    impl NoteStore for MemNoteStore {
        fn list_notes(&self) -> Result<Vec<String>> {
            Ok(self.notes.borrow().keys().cloned().collect())
        }

        fn read_note(&self, name: &str) -> Result<String> {
            self.notes
                .borrow()
                .get(name)
                .cloned()
                .ok_or_else(|| Error::NoteNotFound {
                    name: name.to_string(),
                })
        }

        fn save_note(&self, name: &str, content: &str) -> Result<String> {
            if self.fail_writes {
                return Err(Error::Application("disk full".to_string()));
            }
            let trimmed = name.trim();
            let canonical = trimmed.strip_suffix(".md").unwrap_or(trimmed).to_string();
            self.notes
                .borrow_mut()
                .insert(canonical.clone(), content.to_string());
            Ok(canonical)
        }

        fn delete_note(&self, name: &str) -> Result<()> {
            self.notes.borrow_mut().remove(name);
            Ok(())
        }
    }
}
