use crate::analyser::logic::types::{DEFAULT_HISTOGRAM_BINS, ExportScope, PipelineRequest};
use crate::analyser::render::RendererKind;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User preferences shared by the CLI and the desktop app.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Bin count offered for new histograms (default: 20)
    pub histogram_bins: usize,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Digits shown after the decimal point in tables (default: 2)
    pub display_decimals: u32,
    /// Renderer used by the CLI when `--renderer` is not given
    pub renderer: RendererKind,
    pub export_scope: ExportScope,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            chart_width: 600,
            chart_height: 400,
            display_decimals: 2,
            renderer: RendererKind::default(),
            export_scope: ExportScope::default(),
        }
    }
}

impl AppSettings {
    /// An empty pipeline request carrying the configured chart size and
    /// export scope.
    pub fn to_request(&self) -> PipelineRequest {
        PipelineRequest {
            export_scope: self.export_scope,
            chart_width: self.chart_width,
            chart_height: self.chart_height,
            ..PipelineRequest::default()
        }
    }
}

/// `<data dir>/statboard`
pub fn base_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base.join("statboard"))
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.json"))
}

/// Loads the settings, falling back to defaults when the file is missing or
/// unreadable.
pub fn load_app_config() -> AppSettings {
    match get_config_path() {
        Ok(path) => load_from(&path),
        Err(e) => {
            tracing::warn!("Using default settings: {e:#}");
            AppSettings::default()
        }
    }
}

pub fn load_from(path: &Path) -> AppSettings {
    if path.exists()
        && let Ok(content) = std::fs::read_to_string(path)
    {
        match serde_json::from_str::<AppSettings>(&content) {
            Ok(settings) => return settings,
            Err(e) => tracing::warn!(path = %path.display(), "Ignoring unreadable settings: {e}"),
        }
    }
    AppSettings::default()
}

pub fn save_app_config(settings: &AppSettings) -> Result<()> {
    save_to(&get_config_path()?, settings)
}

pub fn save_to(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Saved settings");
    Ok(())
}
