use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "analyzer.toml";

/// Values pre-filled into the analysis form, plus where to send it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub microns_per_pixel: String,
    pub fps: String,
    pub drop_volume_ul: String,
    pub confidence_threshold: String,
    pub weights: Option<String>,
    pub max_frames: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            microns_per_pixel: "0.5".into(),
            fps: "25".into(),
            drop_volume_ul: "2.0".into(),
            confidence_threshold: "0.25".into(),
            weights: None,
            max_frames: None,
        }
    }
}

/// File keys accept strings or bare TOML numbers (`fps = 30`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    server_url: Option<toml::Value>,
    microns_per_pixel: Option<toml::Value>,
    fps: Option<toml::Value>,
    drop_volume_ul: Option<toml::Value>,
    conf: Option<toml::Value>,
    weights: Option<toml::Value>,
    max_frames: Option<toml::Value>,
}

fn scalar_text(value: Option<toml::Value>) -> Option<String> {
    match value? {
        toml::Value::String(v) => Some(v),
        toml::Value::Integer(v) => Some(v.to_string()),
        toml::Value::Float(v) => Some(v.to_string()),
        _ => None,
    }
}

/// Defaults, then the config file, then `ANALYZER_URL` and `APP__*` environment variables.
///
/// An explicit `path` must exist; the default `analyzer.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = scalar_text(file_cfg.server_url) {
        settings.server_url = v;
    }
    if let Some(v) = scalar_text(file_cfg.microns_per_pixel) {
        settings.microns_per_pixel = v;
    }
    if let Some(v) = scalar_text(file_cfg.fps) {
        settings.fps = v;
    }
    if let Some(v) = scalar_text(file_cfg.drop_volume_ul) {
        settings.drop_volume_ul = v;
    }
    if let Some(v) = scalar_text(file_cfg.conf) {
        settings.confidence_threshold = v;
    }
    if let Some(v) = scalar_text(file_cfg.weights) {
        settings.weights = Some(v);
    }
    if let Some(v) = scalar_text(file_cfg.max_frames) {
        settings.max_frames = Some(v);
    }
    Ok(())
}

pub fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ANALYZER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__MICRONS_PER_PIXEL") {
        settings.microns_per_pixel = v;
    }
    if let Some(v) = var("APP__FPS") {
        settings.fps = v;
    }
    if let Some(v) = var("APP__DROP_VOLUME_UL") {
        settings.drop_volume_ul = v;
    }
    if let Some(v) = var("APP__CONF") {
        settings.confidence_threshold = v;
    }
    if let Some(v) = var("APP__WEIGHTS") {
        settings.weights = Some(v);
    }
    if let Some(v) = var("APP__MAX_FRAMES") {
        settings.max_frames = Some(v);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
