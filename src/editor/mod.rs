//! Editing core: the text buffer, list handling, and the editor surface.

mod buffer;
mod list;
mod surface;

pub use buffer::{Line, SelectionPolicy, TextBuffer};
pub use list::{continue_list, ContinuationOutcome, ListMarker};
pub use surface::{EditorSurface, SurfaceOutput};
