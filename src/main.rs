// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Jot - Main Entry Point
//!
//! A keyboard-first Markdown note-taking app. Built with Rust and egui.

mod app;
mod config;
mod editor;
mod error;
mod markdown;
mod schedule;
mod state;
mod storage;
mod string_utils;
mod ui;
mod workspace;

use app::JotApp;
use config::load_config;
use log::{error, info};
use storage::FsNoteStore;

/// Application name constant.
const APP_NAME: &str = "Jot";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let settings = load_config();
    let window = &settings.window;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window.width, window.height, window.maximized
    );

    let store = match FsNoteStore::new() {
        Ok(store) => {
            info!("Notes directory: {}", store.notes_dir().display());
            store
        }
        Err(e) => {
            error!("Could not resolve the notes directory: {}", e);
            // Fall back to a store rooted in the working directory so the
            // app still comes up.
            FsNoteStore::with_root(std::path::PathBuf::from("notes"))
        }
    };

    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window.width, window.height])
        .with_min_inner_size([400.0, 300.0]);

    if let (Some(x), Some(y)) = (window.x, window.y) {
        viewport = viewport.with_position([x, y]);
    }

    if window.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(JotApp::new(cc, settings, store)))),
    )
}
