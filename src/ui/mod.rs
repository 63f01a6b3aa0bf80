//! UI components for Jot
//!
//! This module contains the overlay and panel widgets that sit on top of the
//! editing core: the command palette, the link capture modal, the delete
//! confirmation dialog, and the preview pane.

mod dialogs;
mod link_modal;
mod palette;
mod preview;

pub use dialogs::{DeleteConfirmDialog, DeleteConfirmResult};
pub use link_modal::{LinkModal, LinkModalOutput};
pub use palette::{CommandPalette, PaletteOutput};
pub use preview::{scroll_fraction, PreviewPane};
