//! # Statboard Application Entry Point
//!
//! With a subcommand the binary runs as a CLI and exits:
//! ```bash
//! statboard analyse scores.csv --hist math --scatter math:science
//! statboard export scores.csv --columns math,science --out processed/
//! ```
//!
//! Without one it opens the desktop app:
//! ```bash
//! statboard
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;

use clap::Parser as _;
use statboard::gui::StatboardApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = statboard::logging::init() {
        // Console-only fallback when the data directory is unusable.
        statboard::logging::init_console()?;
        tracing::warn!("File logging unavailable: {e:#}");
    }

    let cli = cli::Cli::parse();

    if let Some(command) = cli.command {
        cli::run_command(command)?;
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Statboard")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Statboard",
        native_options,
        Box::new(|cc| Ok(Box::new(StatboardApp::new(cc)))),
    )?;
    Ok(())
}
