//! User settings for Jot
//!
//! Defines the `Settings` struct persisted as JSON: window geometry plus a
//! small set of UI flags. All fields default sensibly so a partial or missing
//! config file never breaks startup.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Editor Font
// ─────────────────────────────────────────────────────────────────────────────

/// Available font families for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EditorFont {
    /// Proportional UI font (default)
    #[default]
    Proportional,
    /// Monospace font, for code-heavy notes
    Monospace,
}

impl EditorFont {
    /// Display name for the settings menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorFont::Proportional => "Proportional",
            EditorFont::Monospace => "Monospace",
        }
    }

    pub fn all() -> &'static [EditorFont] {
        &[EditorFont::Proportional, EditorFont::Monospace]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window State
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position, restored on launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 750.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI Flags
// ─────────────────────────────────────────────────────────────────────────────

/// Miscellaneous UI state worth restoring across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UiFlags {
    /// Whether the preview pane has focus over the editor pane
    pub preview_focused: bool,
    /// Editor font family
    pub font: EditorFont,
    /// Editor font size in points
    pub font_size: f32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences, serialized to JSON in the user's config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Window size and position
    pub window: WindowState,

    /// UI flags (preview focus, font)
    pub ui: UiFlags,
}

impl Settings {
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Font size used when the config carries none or zero.
    pub const DEFAULT_FONT_SIZE: f32 = 15.0;

    /// Clamp values to valid ranges, for config files edited by hand.
    pub fn sanitize(&mut self) {
        self.window.width = self
            .window
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window.height = self
            .window
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        if self.ui.font_size == 0.0 {
            self.ui.font_size = Self::DEFAULT_FONT_SIZE;
        }
        self.ui.font_size = self
            .ui
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
    }

    /// Deserialize and then sanitize.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
