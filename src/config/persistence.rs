//! Configuration file persistence for Jot
//!
//! Loads and saves the settings JSON in the platform config directory, with
//! graceful fallback to defaults when the file is missing or corrupted.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "jot";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Scratch file name used during atomic writes
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Platform config directory for the application:
/// `%APPDATA%\jot\` on Windows, `~/Library/Application Support/jot/` on
/// macOS, `~/.config/jot/` on Linux.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir()?;

    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.clone(),
            source: Box::new(e),
        })?;
    }

    Ok(config_dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default location.
///
/// A missing, empty, or corrupted config file falls back to defaults; the
/// failure is logged, never surfaced.
pub fn load_config() -> Settings {
    load_config_internal()
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

fn load_config_internal() -> Result<Settings> {
    let config_path = get_config_file_path()?;

    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        let mut settings = Settings::default();
        settings.sanitize();
        return Ok(settings);
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(&config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        let mut settings = Settings::default();
        settings.sanitize();
        return Ok(settings);
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration: write to a scratch file, then rename over the
/// original.
pub fn save_config(settings: &Settings) -> Result<()> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let backup_path = config_dir.join(CONFIG_BACKUP_NAME);

    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, &config_path).map_err(|e| Error::ConfigSave {
        path: config_path.clone(),
        source: Box::new(e),
    })?;

    Ok(())
}

/// Save configuration, logging instead of surfacing failure. Used on the
/// periodic window-state report and on exit.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_dir = temp_dir.path().join(APP_NAME);
            let config_file = config_dir.join(CONFIG_FILE_NAME);
            fs::create_dir_all(&config_dir).expect("Failed to create config dir");
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            fs::write(&self.config_file, content).expect("Failed to write config");
        }
    }

    #[test]
    fn test_get_config_dir_returns_path() {
        let path = get_config_dir().unwrap();
        assert!(path.to_string_lossy().contains(APP_NAME));
    }

    #[test]
    fn test_get_config_file_path() {
        let path = get_config_file_path().unwrap();
        assert!(path.to_string_lossy().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_load_valid_config() {
        let env = TestEnv::new();
        let mut settings = Settings::default();
        settings.ui.preview_focused = true;
        settings.ui.font_size = 18.0;
        env.write_config(&serde_json::to_string_pretty(&settings).unwrap());

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let loaded = Settings::from_json_sanitized(&contents).unwrap();
        assert!(loaded.ui.preview_focused);
        assert_eq!(loaded.ui.font_size, 18.0);
    }

    #[test]
    fn test_load_corrupted_config_returns_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");

        let contents = fs::read_to_string(&env.config_file).unwrap();
        assert!(serde_json::from_str::<Settings>(&contents).is_err());
    }

    #[test]
    fn test_load_config_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"window": {"width": 5.0, "height": 600.0}}"#);

        let contents = fs::read_to_string(&env.config_file).unwrap();
        let settings = Settings::from_json_sanitized(&contents).unwrap();
        assert_eq!(settings.window.width, Settings::MIN_WINDOW_SIZE);
    }

    #[test]
    fn test_load_config_graceful_fallback() {
        // Public API always yields usable settings, whatever is on disk.
        let settings = load_config();
        assert!(settings.window.width >= Settings::MIN_WINDOW_SIZE);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let env = TestEnv::new();
        let mut original = Settings::default();
        original.window.width = 800.0;
        original.window.maximized = true;
        original.ui.font_size = 16.0;

        env.write_config(&serde_json::to_string_pretty(&original).unwrap());
        let contents = fs::read_to_string(&env.config_file).unwrap();
        let loaded: Settings = serde_json::from_str(&contents).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn test_save_config_silent_never_panics() {
        // Whether the write succeeds depends on the real config dir; the
        // silent variant must swallow either way.
        let _ = save_config_silent(&Settings::default());
    }
}
