//! Markdown support: formatting commands and preview rendering.

mod formatting;
mod renderer;

pub use formatting::{apply_format, FormatCommand, FormatOutcome};
pub use renderer::render_html;
