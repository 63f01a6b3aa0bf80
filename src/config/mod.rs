//! Configuration management for Jot
//!
//! This module handles user settings and their persistence to
//! platform-specific config directories.

mod persistence;
mod settings;

pub use persistence::{get_config_dir, get_config_file_path, load_config, save_config_silent};
pub use settings::{EditorFont, Settings, UiFlags, WindowState};
